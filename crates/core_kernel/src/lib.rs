//! Core Kernel - Foundational types and utilities for the sinistro intake system
//!
//! This crate provides the fundamental building blocks used across all domain modules:
//! - Strongly-typed identifiers and the claim-number value object
//! - The clock abstraction used to make time-dependent logic testable
//! - Common error types

pub mod claim_number;
pub mod clock;
pub mod error;
pub mod identifiers;

pub use claim_number::{ClaimNumber, ClaimNumberError, CLAIM_NUMBER_PREFIX};
pub use clock::{Clock, ManualClock, SystemClock};
pub use error::CoreError;
pub use identifiers::{AuditEventId, PhotoId, SinistroId, StatusId, UserId};
