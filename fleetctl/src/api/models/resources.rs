//! API request and response models for resource endpoints.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::db::models::{resource_types::ResourceType, resources::Resource};
use crate::types::{ResourceId, ResourceTypeId};

/// Request to create a resource.
///
/// All fields are required; they are `Option` so that presence can be
/// checked explicitly and a present `0` is distinguishable from an
/// absent field.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ResourceCreate {
    /// Unique equipment name
    #[serde(default)]
    pub name: Option<String>,
    /// Owning resource type id
    #[serde(default)]
    pub resource_type_id: Option<ResourceTypeId>,
    /// Current speed (must be >= 0)
    #[serde(default)]
    pub current_speed: Option<i32>,
}

/// Request to update a resource. Omitted fields are left untouched.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ResourceUpdate {
    /// New equipment name (optional)
    #[serde(default)]
    pub name: Option<String>,
    /// New owning resource type id (optional)
    #[serde(default)]
    pub resource_type_id: Option<ResourceTypeId>,
    /// New current speed (optional, must be >= 0)
    #[serde(default)]
    pub current_speed: Option<i32>,
}

impl ResourceUpdate {
    /// Whether the request carries at least one recognized field.
    /// A present `0` counts as a change.
    pub fn has_changes(&self) -> bool {
        self.name.is_some() || self.resource_type_id.is_some() || self.current_speed.is_some()
    }
}

/// Query parameters for listing resources.
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct ResourceListParams {
    /// Comma-separated resource type ids to filter by, e.g. `1,2`
    #[serde(rename = "type", default)]
    pub type_ids: Option<String>,
}

/// Response for a resource, including the derived overspeed metric.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ResourceResponse {
    pub id: ResourceId,
    pub name: String,
    pub resource_type_id: ResourceTypeId,
    pub current_speed: i32,
    /// Percentage by which `current_speed` exceeds the type's
    /// `max_speed`, floored at zero. Computed at read time, never stored.
    pub speed_exceeding_percentage: i32,
    pub created_at: NaiveDateTime,
}

impl ResourceResponse {
    /// Build the wire representation of a resource from the record and
    /// its owning type.
    pub fn from_parts(resource: Resource, resource_type: &ResourceType) -> Self {
        Self {
            id: resource.id,
            name: resource.name,
            resource_type_id: resource.resource_type_id,
            current_speed: resource.current_speed,
            speed_exceeding_percentage: speed_exceeding_percentage(resource.current_speed, resource_type.max_speed),
            created_at: resource.created_at,
        }
    }
}

/// Percentage by which `current_speed` exceeds `max_speed`, rounded to
/// the nearest integer, `0` when the speed is within the limit.
pub fn speed_exceeding_percentage(current_speed: i32, max_speed: i32) -> i32 {
    if current_speed <= max_speed {
        return 0;
    }
    ((f64::from(current_speed) / f64::from(max_speed) - 1.0) * 100.0).round() as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentage_of_overspeeding_resource() {
        assert_eq!(speed_exceeding_percentage(120, 100), 20);
    }

    #[test]
    fn percentage_floors_at_zero_within_limit() {
        assert_eq!(speed_exceeding_percentage(80, 100), 0);
        assert_eq!(speed_exceeding_percentage(100, 100), 0);
        assert_eq!(speed_exceeding_percentage(0, 100), 0);
    }

    #[test]
    fn percentage_rounds_to_nearest() {
        // 125/60 - 1 = 1.0833.. -> 108
        assert_eq!(speed_exceeding_percentage(125, 60), 108);
        // 31/30 - 1 = 0.0333.. -> 3
        assert_eq!(speed_exceeding_percentage(31, 30), 3);
        // 91/90 - 1 = 0.0111.. -> 1
        assert_eq!(speed_exceeding_percentage(91, 90), 1);
    }

    #[test]
    fn explicit_zero_speed_counts_as_a_change() {
        let update: ResourceUpdate = serde_json::from_str(r#"{"current_speed": 0}"#).unwrap();
        assert_eq!(update.current_speed, Some(0));
        assert!(update.has_changes());
    }

    #[test]
    fn response_carries_record_fields_and_derived_metric() {
        let resource_type = ResourceType {
            id: 1,
            name: "truck".to_string(),
            max_speed: 90,
            created_at: chrono::NaiveDateTime::default(),
        };
        let resource = Resource {
            id: 7,
            name: "truck-7".to_string(),
            resource_type_id: 1,
            current_speed: 99,
            created_at: chrono::NaiveDateTime::default(),
        };

        let response = ResourceResponse::from_parts(resource, &resource_type);
        assert_eq!(response.id, 7);
        assert_eq!(response.name, "truck-7");
        assert_eq!(response.resource_type_id, 1);
        assert_eq!(response.current_speed, 99);
        assert_eq!(response.speed_exceeding_percentage, 10);
    }
}
