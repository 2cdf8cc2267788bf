//! OCR vendor proxy client
//!
//! The wizard sends captured CNH/CRLV photos through this proxy instead of
//! talking to the vendor directly. The vendor's contract is
//! transport-success-always: logical failures come back with HTTP 200 and
//! `success: false`, and this client folds its own transport errors into
//! the same shape so callers never branch on an HTTP status.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::warn;

/// Outcome of one extraction request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OcrOutcome {
    pub success: bool,
    #[serde(rename = "extractedData", skip_serializing_if = "Option::is_none")]
    pub extracted_data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl OcrOutcome {
    fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            extracted_data: None,
            message: Some(message.into()),
        }
    }
}

#[derive(Debug, Serialize)]
struct VendorRequest<'a> {
    #[serde(rename = "base64Image")]
    base64_image: &'a str,
    #[serde(rename = "type")]
    document_type: &'a str,
}

/// Client for the document-OCR vendor
#[derive(Debug, Clone)]
pub struct OcrClient {
    http: Client,
    endpoint: String,
}

impl OcrClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_default();

        Self {
            http,
            endpoint: endpoint.into(),
        }
    }

    /// Extracts structured data from a base64-encoded document photo
    ///
    /// `document_type` is the vendor's model selector (`cnh` or `crlv`).
    /// Never returns an error: malformed input and vendor/transport
    /// failures all yield a `success: false` outcome.
    pub async fn extract(&self, base64_image: &str, document_type: &str) -> OcrOutcome {
        if STANDARD.decode(base64_image).is_err() {
            return OcrOutcome::failure("Image payload is not valid base64");
        }

        let request = VendorRequest {
            base64_image,
            document_type,
        };

        let response = match self.http.post(&self.endpoint).json(&request).send().await {
            Ok(response) => response,
            Err(err) => {
                warn!(error = %err, "OCR vendor unreachable");
                return OcrOutcome::failure("Document reader is temporarily unavailable");
            }
        };

        if !response.status().is_success() {
            warn!(status = %response.status(), "OCR vendor returned an error status");
            return OcrOutcome::failure("Document reader is temporarily unavailable");
        }

        match response.json::<OcrOutcome>().await {
            Ok(outcome) => outcome,
            Err(err) => {
                warn!(error = %err, "OCR vendor response unparsable");
                OcrOutcome::failure("Document reader returned an unexpected response")
            }
        }
    }
}
