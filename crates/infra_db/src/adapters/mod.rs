//! Port adapters
//!
//! Implementations of the `domain_claims` ports backed by the SQL
//! repositories.

pub mod claims;

pub use claims::{PgAuditSink, PgSinistroStore, PgStatusSource};
