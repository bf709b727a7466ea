//! Base repository trait for database operations.

use std::collections::HashMap;
use std::hash::Hash;

use crate::db::errors::Result;

/// Base repository trait providing common database operations.
///
/// A repository is a data access layer for one postgres table. Each
/// repository wraps a connection (or transaction) and exposes
/// strongly-typed CRUD operations over it, with separate associated
/// types for create requests, update requests, and responses.
///
/// Empty results are not errors at this layer: `get_by_id` and
/// `update` return `None` for a missing row and `delete_many` reports
/// how many rows matched - the caller decides whether that means "not
/// found".
#[async_trait::async_trait]
pub trait Repository {
    /// The request type for creating entities
    type CreateRequest: Send + Sync;

    /// The request type for updating entities
    type UpdateRequest: Send + Sync;

    /// The response/DTO type returned by operations
    type Response;

    /// The identifier type for lookups
    type Id: Copy + Eq + Hash + Send + Sync;

    /// The filter type for list operations
    type Filter: Send + Sync;

    /// Create a new entity
    async fn create(&mut self, request: &Self::CreateRequest) -> Result<Self::Response>;

    /// Get an entity by ID
    async fn get_by_id(&mut self, id: Self::Id) -> Result<Option<Self::Response>>;

    /// Get lots of entities by their IDs, keyed by ID
    async fn get_bulk(&mut self, ids: Vec<Self::Id>) -> Result<HashMap<Self::Id, Self::Response>>;

    /// List entities matching the filter
    async fn list(&mut self, filter: &Self::Filter) -> Result<Vec<Self::Response>>;

    /// Update an entity by ID; `None` when no row matched
    async fn update(&mut self, id: Self::Id, request: &Self::UpdateRequest) -> Result<Option<Self::Response>>;

    /// Delete entities whose ID is in the set, returning the number of rows removed
    async fn delete_many(&mut self, ids: &[Self::Id]) -> Result<u64>;
}
