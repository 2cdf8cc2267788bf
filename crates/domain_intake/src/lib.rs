//! Claim Intake Domain
//!
//! This crate implements the customer-facing side of the sinistro intake
//! wizard: document-number validation, photo handling with canonical file
//! names, the accumulating form draft, and the step-by-step intake flow.
//!
//! # Intake Flow
//!
//! ```text
//! claim type -> [branch by type] -> ... -> police report -> finalize
//! ```
//!
//! Collision claims collect own-vehicle photos, third-party details, and
//! third-party photos. Theft and robbery claims branch on whether the
//! vehicle documents were stolen along with the vehicle.

pub mod documents;
pub mod draft;
pub mod error;
pub mod flow;
pub mod validation;

pub use documents::{canonical_file_name, display_label, PhotoDocument, PhotoKind};
pub use draft::{ClaimSubmission, ClaimType, FormDraft};
pub use error::IntakeError;
pub use flow::{can_proceed, step_sequence, IntakeFlow, IntakeStep};
pub use validation::{format_cpf, format_plate, validate_cpf, validate_plate};
