//! Database Infrastructure
//!
//! This crate provides PostgreSQL access for the sinistro system using SQLx:
//!
//! - **Pool**: connection pool configuration and creation
//! - **Repositories**: row-level access to the sinistro, status, user,
//!   and audit tables
//! - **Adapters**: implementations of the `domain_claims` ports on top of
//!   the repositories
//!
//! Schema migrations live in the top-level `migrations/` directory and are
//! applied externally.

pub mod adapters;
pub mod error;
pub mod pool;
pub mod repositories;

pub use adapters::{PgAuditSink, PgSinistroStore, PgStatusSource};
pub use error::DatabaseError;
pub use pool::{create_pool, create_pool_from_url, DatabaseConfig, DatabasePool};
pub use repositories::{
    AuditRepository, SinistroRepository, StatusRepository, UserRepository,
};
