//! Sinistro aggregate

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use core_kernel::{ClaimNumber, SinistroId, StatusId};
use domain_intake::{ClaimSubmission, ClaimType};

use crate::error::ClaimError;
use crate::status_registry::is_terminal;

/// A claim-status definition served by the status registry
///
/// The set of statuses is data, not code: administrators add and reorder
/// them in the store. Only `active` statuses are selectable for new
/// transitions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusDef {
    pub id: StatusId,
    /// Unique key, e.g. "pendente"
    pub name: String,
    pub color: String,
    pub icon: String,
    pub order: i32,
    pub active: bool,
}

/// A persisted insurance claim
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sinistro {
    /// Unique identifier
    pub id: SinistroId,
    /// Human-readable claim number, immutable once assigned
    pub numero_sinistro: ClaimNumber,
    pub claim_type: ClaimType,
    /// Current status name (key into the status registry)
    pub status: String,
    /// Whether a manager opened this claim on a client's behalf
    pub created_by_manager: bool,
    /// Completion-link token, present once a link was issued
    pub completion_token: Option<Uuid>,
    pub token_expires_at: Option<DateTime<Utc>>,
    pub claimant_name: Option<String>,
    pub claimant_cpf: Option<String>,
    pub vehicle_plate: Option<String>,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Sinistro {
    /// Status every new claim starts in
    pub const INITIAL_STATUS: &'static str = "pendente";

    /// Builds a claim record from a finalized intake submission
    pub fn from_submission(
        numero_sinistro: ClaimNumber,
        submission: ClaimSubmission,
        created_by_manager: bool,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: SinistroId::new_v7(),
            numero_sinistro,
            claim_type: submission.claim_type,
            status: Self::INITIAL_STATUS.to_string(),
            created_by_manager,
            completion_token: None,
            token_expires_at: None,
            claimant_name: submission.claimant_name,
            claimant_cpf: submission.claimant_cpf,
            vehicle_plate: submission.vehicle_plate,
            description: submission.description,
            created_at: now,
            updated_at: now,
        }
    }

    /// True while the claim carries an unexpired completion token
    pub fn has_valid_token(&self, now: DateTime<Utc>) -> bool {
        matches!(
            (self.completion_token, self.token_expires_at),
            (Some(_), Some(expiry)) if expiry > now
        )
    }

    /// Checks that a transition to `target` is allowed
    ///
    /// Claims in a terminal status accept no further transitions, and the
    /// target must be an active registry entry.
    pub fn ensure_can_transition(&self, target: &StatusDef) -> Result<(), ClaimError> {
        if is_terminal(&self.status) {
            return Err(ClaimError::InvalidStatusTransition {
                from: self.status.clone(),
                to: target.name.clone(),
            });
        }
        if !target.active {
            return Err(ClaimError::InactiveStatus(target.name.clone()));
        }
        Ok(())
    }

    /// Applies a validated status transition
    pub fn transition_to(
        &mut self,
        target: &StatusDef,
        now: DateTime<Utc>,
    ) -> Result<(), ClaimError> {
        self.ensure_can_transition(target)?;
        self.status = target.name.clone();
        self.updated_at = now;
        Ok(())
    }
}
