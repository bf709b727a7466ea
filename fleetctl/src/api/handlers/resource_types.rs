//! HTTP handlers for resource type endpoints.

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use tracing::instrument;

use crate::{
    AppState,
    api::handlers::{parse_id_list, parse_path_id, require_json_body},
    api::models::BulkDeleteParams,
    api::models::resource_types::{ResourceTypeCreate, ResourceTypeResponse, ResourceTypeUpdate},
    db::handlers::{Repository, ResourceTypes},
    db::models::resource_types::{ResourceTypeCreateDBRequest, ResourceTypeFilter, ResourceTypeUpdateDBRequest},
    errors::{Error, Result},
};

/// List all resource types.
#[utoipa::path(
    get,
    path = "/resource_types",
    tag = "resource_types",
    summary = "List resource types",
    responses(
        (status = 200, description = "All resource types", body = [ResourceTypeResponse]),
        (status = 500, description = "Internal server error"),
    )
)]
#[instrument(skip_all)]
pub async fn list_resource_types(State(state): State<AppState>) -> Result<Json<Vec<ResourceTypeResponse>>> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = ResourceTypes::new(&mut conn);

    let resource_types = repo.list(&ResourceTypeFilter).await?;
    let responses: Vec<ResourceTypeResponse> = resource_types.into_iter().map(Into::into).collect();

    Ok(Json(responses))
}

/// Get a single resource type by id.
#[utoipa::path(
    get,
    path = "/resource_types/{id}",
    tag = "resource_types",
    summary = "Get resource type",
    params(("id" = String, Path, description = "Resource type id")),
    responses(
        (status = 200, description = "Resource type", body = ResourceTypeResponse),
        (status = 404, description = "Resource type not found"),
        (status = 500, description = "Internal server error"),
    )
)]
#[instrument(skip_all)]
pub async fn get_resource_type(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<ResourceTypeResponse>> {
    let id = parse_path_id(&id)?;

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = ResourceTypes::new(&mut conn);

    let resource_type = repo.get_by_id(id).await?.ok_or_else(|| Error::NotFound {
        message: format!("object with id = {id} not found"),
    })?;

    Ok(Json(resource_type.into()))
}

/// Create a resource type.
#[utoipa::path(
    post,
    path = "/resource_types",
    tag = "resource_types",
    summary = "Create resource type",
    request_body = ResourceTypeCreate,
    responses(
        (status = 201, description = "Resource type created", body = ResourceTypeResponse),
        (status = 400, description = "Missing or invalid fields, or name already taken"),
        (status = 500, description = "Internal server error"),
    )
)]
#[instrument(skip_all)]
pub async fn create_resource_type(
    State(state): State<AppState>,
    body: std::result::Result<Json<ResourceTypeCreate>, JsonRejection>,
) -> Result<(StatusCode, Json<ResourceTypeResponse>)> {
    let request = require_json_body(body)?;

    let name = match request.name {
        Some(name) if !name.is_empty() => name,
        _ => {
            return Err(Error::BadRequest {
                message: "you have to specify name".to_string(),
            });
        }
    };
    let max_speed = request.max_speed.ok_or_else(|| Error::BadRequest {
        message: "you have to specify max_speed".to_string(),
    })?;
    if max_speed <= 0 {
        return Err(Error::BadRequest {
            message: "max_speed can't be less than one".to_string(),
        });
    }

    let db_request = ResourceTypeCreateDBRequest { name, max_speed };

    let mut tx = state.db.begin().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = ResourceTypes::new(&mut tx);
    let created = repo.create(&db_request).await?;
    tx.commit().await.map_err(|e| Error::Database(e.into()))?;

    Ok((StatusCode::CREATED, Json(created.into())))
}

/// Partially update a resource type.
#[utoipa::path(
    patch,
    path = "/resource_types/{id}",
    tag = "resource_types",
    summary = "Update resource type",
    params(("id" = String, Path, description = "Resource type id")),
    request_body = ResourceTypeUpdate,
    responses(
        (status = 200, description = "Updated resource type", body = ResourceTypeResponse),
        (status = 400, description = "Empty body or invalid fields"),
        (status = 404, description = "Resource type not found"),
        (status = 500, description = "Internal server error"),
    )
)]
#[instrument(skip_all)]
pub async fn update_resource_type(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: std::result::Result<Json<ResourceTypeUpdate>, JsonRejection>,
) -> Result<Json<ResourceTypeResponse>> {
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
    if let Some(max_speed) = request.max_speed
        && max_speed <= 0
    {
        return Err(Error::BadRequest {
            message: "max_speed can't be less than one".to_string(),
        });
    }

    let db_request = ResourceTypeUpdateDBRequest {
        name: request.name,
        max_speed: request.max_speed,
    };

    let mut tx = state.db.begin().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = ResourceTypes::new(&mut tx);
    let updated = repo.update(id, &db_request).await?.ok_or_else(|| Error::NotFound {
        message: format!("object with id = {id} not found"),
    })?;
    tx.commit().await.map_err(|e| Error::Database(e.into()))?;

    Ok(Json(updated.into()))
}

/// Delete resource types by id set. Dependent resources are removed by
/// the store's cascade rule.
#[utoipa::path(
    delete,
    path = "/resource_types",
    tag = "resource_types",
    summary = "Delete resource types",
    params(BulkDeleteParams),
    responses(
        (status = 204, description = "Resource types deleted"),
        (status = 400, description = "Missing or malformed id parameter"),
        (status = 500, description = "Internal server error"),
    )
)]
#[instrument(skip_all)]
pub async fn delete_resource_types(
    State(state): State<AppState>,
    params: std::result::Result<Query<BulkDeleteParams>, QueryRejection>,
) -> Result<StatusCode> {
    let Query(params) = params.map_err(|rejection| Error::BadRequest {
        message: rejection.body_text(),
    })?;
    let ids = params
        .id
        .as_deref()
        .and_then(parse_id_list)
        .ok_or_else(|| Error::BadRequest {
            message: "wrong id parameters".to_string(),
        })?;

    let mut tx = state.db.begin().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = ResourceTypes::new(&mut tx);
    repo.delete_many(&ids).await?;
    tx.commit().await.map_err(|e| Error::Database(e.into()))?;

    Ok(StatusCode::NO_CONTENT)
}
