//! Repository implementations for database access.
//!
//! Each repository wraps a SQLx connection or transaction, provides
//! strongly-typed CRUD operations with bound parameters, and returns
//! records from [`crate::db::models`]. All repositories implement the
//! [`Repository`] trait, which is the single capability interface
//! (create / retrieve / update / delete) the API layer programs
//! against.
//!
//! Usage pattern:
//!
//! ```ignore
//! use fleetctl::db::handlers::{Repository, ResourceTypes};
//!
//! async fn example(pool: &sqlx::PgPool) -> Result<(), Box<dyn std::error::Error>> {
//!     let mut tx = pool.begin().await?;
//!     let mut repo = ResourceTypes::new(&mut tx);
//!     let created = repo.create(&create_request).await?;
//!     tx.commit().await?;
//!     Ok(())
//! }
//! ```
//!
//! Writes go through a transaction (commit on success, rollback on
//! drop); read-only operations may run on a plain acquired connection.

pub mod repository;
pub mod resource_types;
pub mod resources;

pub use repository::Repository;
pub use resource_types::ResourceTypes;
pub use resources::Resources;
