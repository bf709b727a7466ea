//! Database models for resources (individual equipment).

use chrono::NaiveDateTime;
use sqlx::FromRow;

use crate::types::{ResourceId, ResourceTypeId};

/// Database record for a piece of equipment.
///
/// `resource_type_id` references the owning category; the store
/// enforces the reference and `current_speed >= 0`.
#[derive(Debug, Clone, FromRow)]
pub struct Resource {
    pub id: ResourceId,
    pub name: String,
    pub resource_type_id: ResourceTypeId,
    pub current_speed: i32,
    pub created_at: NaiveDateTime,
}

/// Validated data for inserting a resource.
#[derive(Debug, Clone)]
pub struct ResourceCreateDBRequest {
    pub name: String,
    pub resource_type_id: ResourceTypeId,
    pub current_speed: i32,
}

/// Partial update for a resource. `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct ResourceUpdateDBRequest {
    pub name: Option<String>,
    pub resource_type_id: Option<ResourceTypeId>,
    pub current_speed: Option<i32>,
}

/// Filter for listing resources.
#[derive(Debug, Clone, Default)]
pub struct ResourceFilter {
    /// Restrict the listing to resources of these types (IN semantics).
    pub type_ids: Option<Vec<ResourceTypeId>>,
}
