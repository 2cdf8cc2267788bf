//! Completion-link DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use domain_claims::CompletionLink;

use crate::dto::sinistros::SinistroResponse;

/// Response to a link-issuance request
#[derive(Debug, Serialize)]
pub struct CompletionLinkResponse {
    pub success: bool,
    pub link: String,
    pub token: Uuid,
    pub expires_at: DateTime<Utc>,
    pub numero_sinistro: String,
}

impl From<CompletionLink> for CompletionLinkResponse {
    fn from(link: CompletionLink) -> Self {
        Self {
            success: true,
            link: link.url,
            token: link.token,
            expires_at: link.expires_at,
            numero_sinistro: link.numero_sinistro.to_string(),
        }
    }
}

/// Query parameters of the link-validation request
#[derive(Debug, Deserialize)]
pub struct ValidateLinkQuery {
    pub sinistro_id: Uuid,
    pub token: Uuid,
}

/// Response to a successful link validation
#[derive(Debug, Serialize)]
pub struct ValidateLinkResponse {
    pub success: bool,
    pub valid: bool,
    pub sinistro: SinistroResponse,
}
