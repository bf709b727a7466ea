//! Database record structures matching the table schemas.
//!
//! Each record derives `sqlx::FromRow`, so the explicit, ordered field
//! list on the struct is what maps raw rows to typed records - there is
//! no per-type mapping code. Alongside the records live the
//! `*CreateDBRequest` / `*UpdateDBRequest` types carrying validated
//! data from the API layer into the repositories, and the filter types
//! consumed by list operations.

pub mod resource_types;
pub mod resources;
