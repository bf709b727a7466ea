//! Database models for resource types (equipment categories).

use chrono::NaiveDateTime;
use sqlx::FromRow;

use crate::types::ResourceTypeId;

/// Database record for an equipment category.
///
/// `max_speed` is the maximum speed allowed for equipment of this
/// category; the store enforces `max_speed > 0`.
#[derive(Debug, Clone, FromRow)]
pub struct ResourceType {
    pub id: ResourceTypeId,
    pub name: String,
    pub max_speed: i32,
    pub created_at: NaiveDateTime,
}

/// Validated data for inserting a resource type.
#[derive(Debug, Clone)]
pub struct ResourceTypeCreateDBRequest {
    pub name: String,
    pub max_speed: i32,
}

/// Partial update for a resource type. `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct ResourceTypeUpdateDBRequest {
    pub name: Option<String>,
    pub max_speed: Option<i32>,
}

/// Filter for listing resource types. No filters are supported yet.
#[derive(Debug, Clone, Default)]
pub struct ResourceTypeFilter;
