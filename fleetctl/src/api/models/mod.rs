//! API request and response data models.
//!
//! These structures define the public API contract and are distinct
//! from the database models in [`crate::db::models`], so the wire
//! representation and the storage representation can evolve
//! independently. All models are annotated with `utoipa` for the
//! generated API docs.
//!
//! Request models use `Option` for every field: create handlers check
//! presence explicitly and update handlers treat `None` as "leave
//! untouched", which keeps an explicit `0` distinguishable from an
//! absent field.

pub mod resource_types;
pub mod resources;

use serde::Deserialize;
use utoipa::IntoParams;

/// Query parameters for bulk deletion on a collection route.
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct BulkDeleteParams {
    /// Comma-separated ids to delete, e.g. `1,2,3`
    #[serde(default)]
    pub id: Option<String>,
}
