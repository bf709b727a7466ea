//! Database repository for resources.

use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::PgConnection;
use tracing::instrument;

use crate::{
    db::{
        errors::Result,
        handlers::Repository,
        models::resources::{Resource, ResourceCreateDBRequest, ResourceFilter, ResourceUpdateDBRequest},
    },
    types::ResourceId,
};

pub struct Resources<'c> {
    db: &'c mut PgConnection,
}

impl<'c> Resources<'c> {
    /// Create a new Resources repository instance
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl Repository for Resources<'_> {
    type CreateRequest = ResourceCreateDBRequest;
    type UpdateRequest = ResourceUpdateDBRequest;
    type Response = Resource;
    type Id = ResourceId;
    type Filter = ResourceFilter;

    #[instrument(skip(self, request), fields(name = %request.name, resource_type_id = %request.resource_type_id), err)]
    async fn create(&mut self, request: &ResourceCreateDBRequest) -> Result<Resource> {
        let resource = sqlx::query_as::<_, Resource>(
            r#"
            INSERT INTO resource (name, resource_type_id, current_speed)
            VALUES ($1, $2, $3)
            RETURNING id, name, resource_type_id, current_speed, created_at
            "#,
        )
        .bind(&request.name)
        .bind(request.resource_type_id)
        .bind(request.current_speed)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(resource)
    }

    #[instrument(skip(self), err)]
    async fn get_by_id(&mut self, id: ResourceId) -> Result<Option<Resource>> {
        let resource = sqlx::query_as::<_, Resource>(
            r#"
            SELECT id, name, resource_type_id, current_speed, created_at
            FROM resource
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *self.db)
        .await?;

        Ok(resource)
    }

    #[instrument(skip(self, ids), fields(count = ids.len()), err)]
    async fn get_bulk(&mut self, ids: Vec<ResourceId>) -> Result<HashMap<ResourceId, Resource>> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        let resources = sqlx::query_as::<_, Resource>(
            r#"
            SELECT id, name, resource_type_id, current_speed, created_at
            FROM resource
            WHERE id = ANY($1)
            "#,
        )
        .bind(ids)
        .fetch_all(&mut *self.db)
        .await?;

        Ok(resources.into_iter().map(|r| (r.id, r)).collect())
    }

    /// List resources, optionally restricted to a set of resource types.
    #[instrument(skip_all, err)]
    async fn list(&mut self, filter: &ResourceFilter) -> Result<Vec<Resource>> {
        let resources = match &filter.type_ids {
            Some(type_ids) => {
                sqlx::query_as::<_, Resource>(
                    r#"
                    SELECT id, name, resource_type_id, current_speed, created_at
                    FROM resource
                    WHERE resource_type_id = ANY($1)
                    ORDER BY id
                    "#,
                )
                .bind(type_ids.clone())
                .fetch_all(&mut *self.db)
                .await?
            }
            None => {
                sqlx::query_as::<_, Resource>(
                    r#"
                    SELECT id, name, resource_type_id, current_speed, created_at
                    FROM resource
                    ORDER BY id
                    "#,
                )
                .fetch_all(&mut *self.db)
                .await?
            }
        };

        Ok(resources)
    }

    #[instrument(skip(self, request), err)]
    async fn update(&mut self, id: ResourceId, request: &ResourceUpdateDBRequest) -> Result<Option<Resource>> {
        let resource = sqlx::query_as::<_, Resource>(
            r#"
            UPDATE resource
            SET name = COALESCE($2, name),
                resource_type_id = COALESCE($3, resource_type_id),
                current_speed = COALESCE($4, current_speed)
            WHERE id = $1
            RETURNING id, name, resource_type_id, current_speed, created_at
            "#,
        )
        .bind(id)
        .bind(request.name.as_deref())
        .bind(request.resource_type_id)
        .bind(request.current_speed)
        .fetch_optional(&mut *self.db)
        .await?;

        Ok(resource)
    }

    #[instrument(skip(self, ids), fields(count = ids.len()), err)]
    async fn delete_many(&mut self, ids: &[ResourceId]) -> Result<u64> {
        if ids.is_empty() {
            return Ok(0);
        }
        let result = sqlx::query("DELETE FROM resource WHERE id = ANY($1)")
            .bind(ids.to_vec())
            .execute(&mut *self.db)
            .await?;

        Ok(result.rows_affected())
    }
}
