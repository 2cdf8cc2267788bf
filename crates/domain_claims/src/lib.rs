//! Claim Lifecycle Domain
//!
//! This crate implements the server side of the sinistro lifecycle: the
//! persisted claim record, sequential claim numbering, the TTL-cached
//! status registry, and token-gated completion links for claims a manager
//! opens on a client's behalf.
//!
//! External collaborators (the relational store and the audit log) are
//! reached through async ports; `ports` also ships in-memory
//! implementations used by the test suites.

pub mod claim;
pub mod completion;
pub mod error;
pub mod numbering;
pub mod ports;
pub mod status_registry;

pub use claim::{Sinistro, StatusDef};
pub use completion::{CompletionLink, CompletionLinkService, TOKEN_LIFETIME_DAYS};
pub use error::ClaimError;
pub use numbering::ClaimNumberGenerator;
pub use ports::{AuditEvent, AuditSink, ClaimNumberStore, SinistroStore, StatusSource};
pub use status_registry::{is_terminal, StatusRegistry, TERMINAL_STATUSES};
