//! OCR proxy handler

use axum::{extract::State, Json};
use validator::Validate;

use crate::dto::ocr::OcrRequest;
use crate::ocr::OcrOutcome;
use crate::{error::ApiError, AppState};

/// Proxies a document photo to the OCR vendor
///
/// Vendor and transport failures come back as HTTP 200 with
/// `success: false`, matching the vendor's own contract, so the wizard
/// only ever branches on the `success` field.
pub async fn extract_document(
    State(state): State<AppState>,
    Json(request): Json<OcrRequest>,
) -> Result<Json<OcrOutcome>, ApiError> {
    request
        .validate()
        .map_err(|e| ApiError::Validation(e.to_string()))?;

    if !request.document_type_supported() {
        return Err(ApiError::Validation(format!(
            "Unsupported document type {:?}; expected cnh or crlv",
            request.document_type
        )));
    }

    let outcome = state
        .ocr
        .extract(&request.base64_image, &request.document_type)
        .await;

    Ok(Json(outcome))
}
