//! Photo documents and canonical file naming
//!
//! Every photo captured during intake is stored under a deterministic file
//! name derived from its kind, its display label, and the capture
//! timestamp. The label↔slug mapping is a fixed table covering the
//! own-vehicle views, other-vehicle views, scene shots, and repair photos
//! the wizard asks for.
//!
//! The reverse direction (`display_label`) is a best-effort display
//! transform: `reparo_dano` and `chassi_reparo` each absorb more than one
//! forward label, so the reverse table returns the canonical label for
//! those slugs.

use chrono::{DateTime, Utc};
use core_kernel::PhotoId;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The kind of document a photo captures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhotoKind {
    /// Driver's license (CNH)
    License,
    /// Vehicle registration document (CRLV)
    Registration,
    /// A labeled photo of a vehicle or the scene
    VehiclePhoto,
    /// Police report (boletim de ocorrência)
    PoliceReport,
}

impl PhotoKind {
    /// File-name slug used when no label-specific slug applies
    pub fn slug(&self) -> &'static str {
        match self {
            PhotoKind::License => "cnh",
            PhotoKind::Registration => "crlv",
            PhotoKind::VehiclePhoto => "foto_veiculo",
            PhotoKind::PoliceReport => "boletim",
        }
    }
}

/// Wizard label -> file-name slug
///
/// Two repair labels intentionally share a slug with a sibling label; the
/// reverse table resolves those to the canonical label.
static LABEL_TO_SLUG: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        // Own vehicle
        ("Frente do Seu Veículo", "frente_veiculo"),
        ("Traseira do Seu Veículo", "traseira_veiculo"),
        ("Lateral Esquerda do Seu Veículo", "lateral_esquerda_veiculo"),
        ("Lateral Direita do Seu Veículo", "lateral_direita_veiculo"),
        ("Painel do Veículo", "painel_veiculo"),
        ("Chassi do Veículo", "chassi_veiculo"),
        // Other vehicle
        ("Frente do Outro Veículo", "frente_outro_veiculo"),
        ("Traseira do Outro Veículo", "traseira_outro_veiculo"),
        ("Lateral Esquerda do Outro Veículo", "lateral_esquerda_outro_veiculo"),
        ("Lateral Direita do Outro Veículo", "lateral_direita_outro_veiculo"),
        // Scene
        ("Visão Geral da Cena", "visao_geral_cena"),
        ("Local do Acidente", "local_acidente"),
        // Damage and repairs
        ("Foto do Dano", "foto_dano"),
        ("Reparo do Dano", "reparo_dano"),
        ("Dano já Reparado", "reparo_dano"),
        ("Chassi com Reparo", "chassi_reparo"),
        ("Reparo no Chassi", "chassi_reparo"),
    ])
});

/// File-name slug -> canonical wizard label
static SLUG_TO_LABEL: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("frente_veiculo", "Frente do Seu Veículo"),
        ("traseira_veiculo", "Traseira do Seu Veículo"),
        ("lateral_esquerda_veiculo", "Lateral Esquerda do Seu Veículo"),
        ("lateral_direita_veiculo", "Lateral Direita do Seu Veículo"),
        ("painel_veiculo", "Painel do Veículo"),
        ("chassi_veiculo", "Chassi do Veículo"),
        ("frente_outro_veiculo", "Frente do Outro Veículo"),
        ("traseira_outro_veiculo", "Traseira do Outro Veículo"),
        ("lateral_esquerda_outro_veiculo", "Lateral Esquerda do Outro Veículo"),
        ("lateral_direita_outro_veiculo", "Lateral Direita do Outro Veículo"),
        ("visao_geral_cena", "Visão Geral da Cena"),
        ("local_acidente", "Local do Acidente"),
        ("foto_dano", "Foto do Dano"),
        ("reparo_dano", "Reparo do Dano"),
        ("chassi_reparo", "Chassi com Reparo"),
    ])
});

/// Returns true when the label belongs to the other-vehicle photo group
pub fn is_other_vehicle_label(label: &str) -> bool {
    LABEL_TO_SLUG
        .get(label)
        .map(|slug| slug.contains("outro"))
        .unwrap_or(false)
}

/// Derives the canonical file name for a captured photo
///
/// License and registration photos use their kind slug; vehicle photos use
/// the label table and fall through to the kind slug for unknown labels;
/// police reports use `boletim`.
pub fn canonical_file_name(
    kind: PhotoKind,
    label: Option<&str>,
    captured_at: DateTime<Utc>,
    extension: &str,
) -> String {
    let slug = match (kind, label) {
        (PhotoKind::VehiclePhoto, Some(label)) => {
            LABEL_TO_SLUG.get(label).copied().unwrap_or(kind.slug())
        }
        _ => kind.slug(),
    };

    format!("{}_{}.{}", slug, captured_at.timestamp_millis(), extension)
}

/// Best-effort reverse transform from a stored file name to a display label
///
/// Strips any path prefix, the extension, and a trailing all-digit
/// timestamp segment, then looks the remaining slug up in the reverse
/// table. Unknown slugs are title-cased token by token.
pub fn display_label(file_name: &str) -> String {
    let base = file_name.rsplit('/').next().unwrap_or(file_name);
    let stem = base.rsplit_once('.').map(|(s, _)| s).unwrap_or(base);

    let mut tokens: Vec<&str> = stem.split('_').filter(|t| !t.is_empty()).collect();
    if tokens
        .last()
        .map(|t| t.chars().all(|c| c.is_ascii_digit()))
        .unwrap_or(false)
    {
        tokens.pop();
    }

    let slug = tokens.join("_");
    if let Some(label) = SLUG_TO_LABEL.get(slug.as_str()) {
        return (*label).to_string();
    }

    tokens
        .iter()
        .map(|t| title_case(t))
        .collect::<Vec<_>>()
        .join(" ")
}

fn title_case(token: &str) -> String {
    let mut chars = token.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// A photo captured during intake
///
/// Immutable once captured; removed from the draft as a whole when the
/// user discards it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhotoDocument {
    pub id: PhotoId,
    pub kind: PhotoKind,
    /// Display label; only vehicle photos carry one
    pub label: Option<String>,
    pub captured_at: DateTime<Utc>,
    pub extension: String,
    pub file_name: String,
    /// Raw image bytes held until submission
    #[serde(skip)]
    pub content: Vec<u8>,
}

impl PhotoDocument {
    /// Captures a photo, deriving its canonical file name
    pub fn capture(
        kind: PhotoKind,
        label: Option<String>,
        captured_at: DateTime<Utc>,
        extension: impl Into<String>,
        content: Vec<u8>,
    ) -> Self {
        let extension = extension.into();
        let file_name = canonical_file_name(kind, label.as_deref(), captured_at, &extension);

        Self {
            id: PhotoId::new(),
            kind,
            label,
            captured_at,
            extension,
            file_name,
            content,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ts(millis: i64) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(millis).unwrap()
    }

    #[test]
    fn test_vehicle_photo_with_known_label() {
        let name = canonical_file_name(
            PhotoKind::VehiclePhoto,
            Some("Frente do Seu Veículo"),
            ts(1_700_000_000_000),
            "jpg",
        );
        assert_eq!(name, "frente_veiculo_1700000000000.jpg");
    }

    #[test]
    fn test_vehicle_photo_with_unknown_label_falls_through() {
        let name = canonical_file_name(
            PhotoKind::VehiclePhoto,
            Some("Ângulo Inusitado"),
            ts(1_700_000_000_000),
            "png",
        );
        assert_eq!(name, "foto_veiculo_1700000000000.png");
    }

    #[test]
    fn test_license_and_registration_use_kind_slug() {
        assert_eq!(
            canonical_file_name(PhotoKind::License, None, ts(1), "jpg"),
            "cnh_1.jpg"
        );
        assert_eq!(
            canonical_file_name(PhotoKind::Registration, None, ts(1), "jpg"),
            "crlv_1.jpg"
        );
    }

    #[test]
    fn test_police_report_uses_boletim() {
        assert_eq!(
            canonical_file_name(PhotoKind::PoliceReport, None, ts(42), "pdf"),
            "boletim_42.pdf"
        );
    }

    #[test]
    fn test_display_label_round_trip_for_known_slug() {
        assert_eq!(
            display_label("frente_veiculo_1700000000000.jpg"),
            "Frente do Seu Veículo"
        );
    }

    #[test]
    fn test_display_label_strips_path_prefix() {
        assert_eq!(
            display_label("sinistros/abc/boletim_1700000000000.pdf"),
            "Boletim"
        );
    }

    #[test]
    fn test_display_label_title_cases_unknown_slug() {
        assert_eq!(display_label("porta_malas_1700000000000.jpg"), "Porta Malas");
    }

    #[test]
    fn test_reuse_prone_slugs_resolve_to_canonical_label() {
        // Both "Reparo do Dano" and "Dano já Reparado" produce reparo_dano;
        // the reverse lookup settles on the canonical label.
        let name = canonical_file_name(
            PhotoKind::VehiclePhoto,
            Some("Dano já Reparado"),
            ts(7),
            "jpg",
        );
        assert_eq!(display_label(&name), "Reparo do Dano");

        let name = canonical_file_name(
            PhotoKind::VehiclePhoto,
            Some("Reparo no Chassi"),
            ts(7),
            "jpg",
        );
        assert_eq!(display_label(&name), "Chassi com Reparo");
    }

    #[test]
    fn test_capture_derives_file_name() {
        let photo = PhotoDocument::capture(
            PhotoKind::VehiclePhoto,
            Some("Traseira do Seu Veículo".to_string()),
            ts(1_700_000_000_000),
            "jpg",
            vec![0xFF, 0xD8],
        );
        assert_eq!(photo.file_name, "traseira_veiculo_1700000000000.jpg");
        assert_eq!(photo.content.len(), 2);
    }

    #[test]
    fn test_other_vehicle_label_detection() {
        assert!(is_other_vehicle_label("Frente do Outro Veículo"));
        assert!(!is_other_vehicle_label("Frente do Seu Veículo"));
        assert!(!is_other_vehicle_label("Visão Geral da Cena"));
    }
}
