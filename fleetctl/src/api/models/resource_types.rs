//! API request and response models for resource type endpoints.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::db::models::resource_types::ResourceType;
use crate::types::ResourceTypeId;

/// Request to create a resource type.
///
/// Both fields are required; they are `Option` so that presence can be
/// checked explicitly and a present `0` is distinguishable from an
/// absent field.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ResourceTypeCreate {
    /// Unique category name
    #[serde(default)]
    pub name: Option<String>,
    /// Maximum allowed speed for equipment of this category (must be > 0)
    #[serde(default)]
    pub max_speed: Option<i32>,
}

/// Request to update a resource type. Omitted fields are left untouched.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ResourceTypeUpdate {
    /// New category name (optional)
    #[serde(default)]
    pub name: Option<String>,
    /// New maximum speed (optional, must be > 0)
    #[serde(default)]
    pub max_speed: Option<i32>,
}

impl ResourceTypeUpdate {
    /// Whether the request carries at least one recognized field.
    /// A present `0` counts as a change.
    pub fn has_changes(&self) -> bool {
        self.name.is_some() || self.max_speed.is_some()
    }
}

/// Response for a resource type.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ResourceTypeResponse {
    pub id: ResourceTypeId,
    pub name: String,
    pub max_speed: i32,
    pub created_at: NaiveDateTime,
}

impl From<ResourceType> for ResourceTypeResponse {
    fn from(resource_type: ResourceType) -> Self {
        Self {
            id: resource_type.id,
            name: resource_type.name,
            max_speed: resource_type.max_speed,
            created_at: resource_type.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_zero_counts_as_a_change() {
        let update: ResourceTypeUpdate = serde_json::from_str(r#"{"max_speed": 0}"#).unwrap();
        assert_eq!(update.max_speed, Some(0));
        assert!(update.has_changes());
    }

    #[test]
    fn empty_body_has_no_changes() {
        let update: ResourceTypeUpdate = serde_json::from_str("{}").unwrap();
        assert!(!update.has_changes());
    }
}
