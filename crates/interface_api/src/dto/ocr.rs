//! OCR proxy DTOs

use serde::Deserialize;
use validator::Validate;

/// Document types the OCR vendor can read
pub const OCR_DOCUMENT_TYPES: [&str; 2] = ["cnh", "crlv"];

/// OCR extraction request
#[derive(Debug, Deserialize, Validate)]
pub struct OcrRequest {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub base64_image: String,
    pub document_type: String,
}

impl OcrRequest {
    /// Returns true when the document type is one the vendor supports
    pub fn document_type_supported(&self) -> bool {
        OCR_DOCUMENT_TYPES.contains(&self.document_type.as_str())
    }
}
