//! HTTP handlers for resource endpoints.
//!
//! Resource representations carry a derived `speed_exceeding_percentage`,
//! so every read resolves the owning resource type - a single lookup
//! for item reads, one batched lookup for listings.

use std::collections::{BTreeSet, HashMap};

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use sqlx::PgConnection;
use tracing::instrument;

use crate::{
    AppState,
    api::handlers::{parse_id_list, parse_path_id, require_json_body},
    api::models::BulkDeleteParams,
    api::models::resources::{ResourceCreate, ResourceListParams, ResourceResponse, ResourceUpdate},
    db::handlers::{Repository, ResourceTypes, Resources},
    db::models::resource_types::ResourceType,
    db::models::resources::{Resource, ResourceCreateDBRequest, ResourceFilter, ResourceUpdateDBRequest},
    errors::{Error, Result},
    types::{ResourceTypeId, ResourceId},
};

/// Resolve the owning type of a single resource record.
async fn fetch_owning_type(conn: &mut PgConnection, resource_type_id: ResourceTypeId) -> Result<ResourceType> {
    let mut repo = ResourceTypes::new(conn);
    repo.get_by_id(resource_type_id).await?.ok_or_else(|| Error::Internal {
        operation: format!("resolve resource type {resource_type_id}"),
    })
}

/// Build responses for a batch of records, resolving all referenced
/// types in one query.
async fn build_responses(conn: &mut PgConnection, resources: Vec<Resource>) -> Result<Vec<ResourceResponse>> {
    let type_ids: Vec<ResourceTypeId> = resources
        .iter()
        .map(|r| r.resource_type_id)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let types: HashMap<ResourceTypeId, ResourceType> = {
        let mut repo = ResourceTypes::new(conn);
        repo.get_bulk(type_ids).await?
    };

    resources
        .into_iter()
        .map(|resource| {
            let resource_type = types.get(&resource.resource_type_id).ok_or_else(|| Error::Internal {
                operation: format!("resolve resource type {}", resource.resource_type_id),
            })?;
            Ok(ResourceResponse::from_parts(resource, resource_type))
        })
        .collect()
}

/// List resources, optionally filtered by resource type.
#[utoipa::path(
    get,
    path = "/resources",
    tag = "resources",
    summary = "List resources",
    params(ResourceListParams),
    responses(
        (status = 200, description = "Matching resources", body = [ResourceResponse]),
        (status = 400, description = "Malformed type filter"),
        (status = 500, description = "Internal server error"),
    )
)]
#[instrument(skip_all)]
pub async fn list_resources(
    State(state): State<AppState>,
    params: std::result::Result<Query<ResourceListParams>, QueryRejection>,
) -> Result<Json<Vec<ResourceResponse>>> {
    let Query(params) = params.map_err(|rejection| Error::BadRequest {
        message: rejection.body_text(),
    })?;

    let type_ids = match params.type_ids.as_deref() {
        Some(raw) => Some(parse_id_list(raw).ok_or_else(|| Error::BadRequest {
            message: "wrong type url parameters".to_string(),
        })?),
        None => None,
    };
    let filter = ResourceFilter { type_ids };

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let resources = {
        let mut repo = Resources::new(&mut conn);
        repo.list(&filter).await?
    };
    let responses = build_responses(&mut conn, resources).await?;

    Ok(Json(responses))
}

/// Get a single resource by id.
#[utoipa::path(
    get,
    path = "/resources/{id}",
    tag = "resources",
    summary = "Get resource",
    params(("id" = String, Path, description = "Resource id")),
    responses(
        (status = 200, description = "Resource", body = ResourceResponse),
        (status = 404, description = "Resource not found"),
        (status = 500, description = "Internal server error"),
    )
)]
#[instrument(skip_all)]
pub async fn get_resource(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<ResourceResponse>> {
    let id = parse_path_id(&id)?;

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let resource = {
        let mut repo = Resources::new(&mut conn);
        repo.get_by_id(id).await?.ok_or_else(|| Error::NotFound {
            message: format!("object with id = {id} not found"),
        })?
    };
    let resource_type = fetch_owning_type(&mut conn, resource.resource_type_id).await?;

    Ok(Json(ResourceResponse::from_parts(resource, &resource_type)))
}

/// Create a resource.
#[utoipa::path(
    post,
    path = "/resources",
    tag = "resources",
    summary = "Create resource",
    request_body = ResourceCreate,
    responses(
        (status = 201, description = "Resource created", body = ResourceResponse),
        (status = 400, description = "Missing or invalid fields, name already taken, or unknown resource type"),
        (status = 500, description = "Internal server error"),
    )
)]
#[instrument(skip_all)]
pub async fn create_resource(
    State(state): State<AppState>,
    body: std::result::Result<Json<ResourceCreate>, JsonRejection>,
) -> Result<(StatusCode, Json<ResourceResponse>)> {
    let request = require_json_body(body)?;

    let name = match request.name {
        Some(name) if !name.is_empty() => name,
        _ => {
            return Err(Error::BadRequest {
                message: "you have to specify name".to_string(),
            });
        }
    };
    let resource_type_id = request.resource_type_id.ok_or_else(|| Error::BadRequest {
        message: "you have to specify resource_type_id".to_string(),
    })?;
    let current_speed = request.current_speed.ok_or_else(|| Error::BadRequest {
        message: "you have to specify current_speed".to_string(),
    })?;
    if current_speed < 0 {
        return Err(Error::BadRequest {
            message: "current_speed can't be negative".to_string(),
        });
    }

    let db_request = ResourceCreateDBRequest {
        name,
        resource_type_id,
        current_speed,
    };

    let mut tx = state.db.begin().await.map_err(|e| Error::Database(e.into()))?;
    let created = {
        let mut repo = Resources::new(&mut tx);
        // An unknown resource_type_id trips the foreign key constraint
        // and surfaces as a 400 through the error taxonomy.
        repo.create(&db_request).await?
    };
    let resource_type = fetch_owning_type(&mut tx, created.resource_type_id).await?;
    tx.commit().await.map_err(|e| Error::Database(e.into()))?;

    Ok((StatusCode::CREATED, Json(ResourceResponse::from_parts(created, &resource_type))))
}

/// Partially update a resource.
#[utoipa::path(
    patch,
    path = "/resources/{id}",
    tag = "resources",
    summary = "Update resource",
    params(("id" = String, Path, description = "Resource id")),
    request_body = ResourceUpdate,
    responses(
        (status = 200, description = "Updated resource", body = ResourceResponse),
        (status = 400, description = "Empty body or invalid fields"),
        (status = 404, description = "Resource not found"),
        (status = 500, description = "Internal server error"),
    )
)]
#[instrument(skip_all)]
pub async fn update_resource(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: std::result::Result<Json<ResourceUpdate>, JsonRejection>,
) -> Result<Json<ResourceResponse>> {
    let id = parse_path_id(&id)?;
    let request = require_json_body(body)?;

    if !request.has_changes() {
        return Err(Error::BadRequest {
            message: "at least one attribute to change have to be specified".to_string(),
        });
    }
    if let Some(name) = &request.name
        && name.is_empty()
    {
        return Err(Error::BadRequest {
            message: "name can't be empty".to_string(),
        });
    }
    if let Some(current_speed) = request.current_speed
        && current_speed < 0
    {
        return Err(Error::BadRequest {
            message: "current_speed can't be negative".to_string(),
        });
    }

    let db_request = ResourceUpdateDBRequest {
        name: request.name,
        resource_type_id: request.resource_type_id,
        current_speed: request.current_speed,
    };

    let mut tx = state.db.begin().await.map_err(|e| Error::Database(e.into()))?;
    let updated = {
        let mut repo = Resources::new(&mut tx);
        repo.update(id, &db_request).await?.ok_or_else(|| Error::NotFound {
            message: format!("object with id = {id} not found"),
        })?
    };
    let resource_type = fetch_owning_type(&mut tx, updated.resource_type_id).await?;
    tx.commit().await.map_err(|e| Error::Database(e.into()))?;

    Ok(Json(ResourceResponse::from_parts(updated, &resource_type)))
}

/// Delete resources by id set.
#[utoipa::path(
    delete,
    path = "/resources",
    tag = "resources",
    summary = "Delete resources",
    params(BulkDeleteParams),
    responses(
        (status = 204, description = "Resources deleted"),
        (status = 400, description = "Missing or malformed id parameter"),
        (status = 500, description = "Internal server error"),
    )
)]
#[instrument(skip_all)]
pub async fn delete_resources(
    State(state): State<AppState>,
    params: std::result::Result<Query<BulkDeleteParams>, QueryRejection>,
) -> Result<StatusCode> {
    let Query(params) = params.map_err(|rejection| Error::BadRequest {
        message: rejection.body_text(),
    })?;
    let ids: Vec<ResourceId> = params
        .id
        .as_deref()
        .and_then(parse_id_list)
        .ok_or_else(|| Error::BadRequest {
            message: "wrong id parameters".to_string(),
        })?;

    let mut tx = state.db.begin().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Resources::new(&mut tx);
    repo.delete_many(&ids).await?;
    tx.commit().await.map_err(|e| Error::Database(e.into()))?;

    Ok(StatusCode::NO_CONTENT)
}
