//! API layer for HTTP request handling and data models.
//!
//! - **[`handlers`]**: Axum route handlers for all endpoints
//! - **[`models`]**: Request/response data structures for the wire contract
//!
//! The API surface is small and flat:
//!
//! - **Resource types** (`/resource_types`): equipment categories with
//!   a maximum allowed speed
//! - **Resources** (`/resources`): individual equipment with a current
//!   speed, each belonging to one category
//!
//! All endpoints are documented with OpenAPI annotations via `utoipa`;
//! the rendered docs are served at `/docs` when the server is running.

pub mod handlers;
pub mod models;
