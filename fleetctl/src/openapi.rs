//! OpenAPI documentation configuration.

use utoipa::OpenApi;

use crate::api::models::resource_types::{ResourceTypeCreate, ResourceTypeResponse, ResourceTypeUpdate};
use crate::api::models::resources::{ResourceCreate, ResourceResponse, ResourceUpdate};

/// OpenAPI document for the fleet registry API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "fleetctl",
        description = "CRUD API for fleet equipment categories and equipment, with read-time overspeed tracking."
    ),
    paths(
        crate::api::handlers::resource_types::list_resource_types,
        crate::api::handlers::resource_types::get_resource_type,
        crate::api::handlers::resource_types::create_resource_type,
        crate::api::handlers::resource_types::update_resource_type,
        crate::api::handlers::resource_types::delete_resource_types,
        crate::api::handlers::resources::list_resources,
        crate::api::handlers::resources::get_resource,
        crate::api::handlers::resources::create_resource,
        crate::api::handlers::resources::update_resource,
        crate::api::handlers::resources::delete_resources,
    ),
    components(schemas(
        ResourceTypeCreate,
        ResourceTypeUpdate,
        ResourceTypeResponse,
        ResourceCreate,
        ResourceUpdate,
        ResourceResponse,
    )),
    tags(
        (name = "resource_types", description = "Equipment categories and their speed limits"),
        (name = "resources", description = "Individual equipment and current speeds"),
    )
)]
pub struct ApiDoc;
