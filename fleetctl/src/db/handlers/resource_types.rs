//! Database repository for resource types.

use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::PgConnection;
use tracing::instrument;

use crate::{
    db::{
        errors::Result,
        handlers::Repository,
        models::resource_types::{
            ResourceType, ResourceTypeCreateDBRequest, ResourceTypeFilter, ResourceTypeUpdateDBRequest,
        },
    },
    types::ResourceTypeId,
};

pub struct ResourceTypes<'c> {
    db: &'c mut PgConnection,
}

impl<'c> ResourceTypes<'c> {
    /// Create a new ResourceTypes repository instance
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl Repository for ResourceTypes<'_> {
    type CreateRequest = ResourceTypeCreateDBRequest;
    type UpdateRequest = ResourceTypeUpdateDBRequest;
    type Response = ResourceType;
    type Id = ResourceTypeId;
    type Filter = ResourceTypeFilter;

    #[instrument(skip(self, request), fields(name = %request.name), err)]
    async fn create(&mut self, request: &ResourceTypeCreateDBRequest) -> Result<ResourceType> {
        let resource_type = sqlx::query_as::<_, ResourceType>(
            r#"
            INSERT INTO resource_type (name, max_speed)
            VALUES ($1, $2)
            RETURNING id, name, max_speed, created_at
            "#,
        )
        .bind(&request.name)
        .bind(request.max_speed)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(resource_type)
    }

    #[instrument(skip(self), err)]
    async fn get_by_id(&mut self, id: ResourceTypeId) -> Result<Option<ResourceType>> {
        let resource_type = sqlx::query_as::<_, ResourceType>(
            r#"
            SELECT id, name, max_speed, created_at
            FROM resource_type
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *self.db)
        .await?;

        Ok(resource_type)
    }

    #[instrument(skip(self, ids), fields(count = ids.len()), err)]
    async fn get_bulk(&mut self, ids: Vec<ResourceTypeId>) -> Result<HashMap<ResourceTypeId, ResourceType>> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        let resource_types = sqlx::query_as::<_, ResourceType>(
            r#"
            SELECT id, name, max_speed, created_at
            FROM resource_type
            WHERE id = ANY($1)
            "#,
        )
        .bind(ids)
        .fetch_all(&mut *self.db)
        .await?;

        Ok(resource_types.into_iter().map(|rt| (rt.id, rt)).collect())
    }

    #[instrument(skip_all, err)]
    async fn list(&mut self, _filter: &ResourceTypeFilter) -> Result<Vec<ResourceType>> {
        let resource_types = sqlx::query_as::<_, ResourceType>(
            r#"
            SELECT id, name, max_speed, created_at
            FROM resource_type
            ORDER BY id
            "#,
        )
        .fetch_all(&mut *self.db)
        .await?;

        Ok(resource_types)
    }

    #[instrument(skip(self, request), err)]
    async fn update(&mut self, id: ResourceTypeId, request: &ResourceTypeUpdateDBRequest) -> Result<Option<ResourceType>> {
        let resource_type = sqlx::query_as::<_, ResourceType>(
            r#"
            UPDATE resource_type
            SET name = COALESCE($2, name),
                max_speed = COALESCE($3, max_speed)
            WHERE id = $1
            RETURNING id, name, max_speed, created_at
            "#,
        )
        .bind(id)
        .bind(request.name.as_deref())
        .bind(request.max_speed)
        .fetch_optional(&mut *self.db)
        .await?;

        Ok(resource_type)
    }

    #[instrument(skip(self, ids), fields(count = ids.len()), err)]
    async fn delete_many(&mut self, ids: &[ResourceTypeId]) -> Result<u64> {
        if ids.is_empty() {
            return Ok(0);
        }
        let result = sqlx::query("DELETE FROM resource_type WHERE id = ANY($1)")
            .bind(ids.to_vec())
            .execute(&mut *self.db)
            .await?;

        Ok(result.rows_affected())
    }
}
