//! Pre-built Test Fixtures
//!
//! Provides ready-to-use test data for common entities across the sinistro
//! system. These fixtures are designed to be consistent and predictable
//! for unit tests.

use chrono::{DateTime, TimeZone, Utc};
use core_kernel::{SinistroId, StatusId, UserId};
use domain_claims::StatusDef;
use uuid::Uuid;

/// Fixture for temporal test data
pub struct TemporalFixtures;

impl TemporalFixtures {
    /// Standard intake instant (Jun 1, 2024 noon UTC)
    pub fn intake_instant() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    /// Capture timestamp used for deterministic photo file names
    pub fn capture_instant() -> DateTime<Utc> {
        Utc.timestamp_millis_opt(1_700_000_000_000).unwrap()
    }

    /// An instant inside the status-cache TTL relative to `intake_instant`
    pub fn within_cache_ttl() -> DateTime<Utc> {
        Self::intake_instant() + chrono::Duration::minutes(4)
    }

    /// An instant past the status-cache TTL relative to `intake_instant`
    pub fn after_cache_ttl() -> DateTime<Utc> {
        Self::intake_instant() + chrono::Duration::minutes(6)
    }

    /// An instant past a 30-day token lifetime started at `intake_instant`
    pub fn after_token_lifetime() -> DateTime<Utc> {
        Self::intake_instant() + chrono::Duration::days(31)
    }
}

/// Fixture for identifier test data
pub struct IdFixtures;

impl IdFixtures {
    /// Creates a deterministic sinistro ID for testing
    pub fn sinistro_id() -> SinistroId {
        SinistroId::from_uuid(Uuid::parse_str("550e8400-e29b-41d4-a716-446655440001").unwrap())
    }

    /// Creates a deterministic status ID for testing
    pub fn status_id() -> StatusId {
        StatusId::from_uuid(Uuid::parse_str("550e8400-e29b-41d4-a716-446655440002").unwrap())
    }

    /// Creates a deterministic user ID for testing
    pub fn user_id() -> UserId {
        UserId::from_uuid(Uuid::parse_str("550e8400-e29b-41d4-a716-446655440003").unwrap())
    }

    /// Creates a deterministic completion token for testing
    pub fn completion_token() -> Uuid {
        Uuid::parse_str("550e8400-e29b-41d4-a716-446655440099").unwrap()
    }
}

/// Fixture for string test data
pub struct StringFixtures;

impl StringFixtures {
    /// A CPF with correct check digits (canonical checksum example)
    pub fn valid_cpf() -> &'static str {
        "52998224725"
    }

    /// The same CPF with display formatting applied
    pub fn formatted_cpf() -> &'static str {
        "529.982.247-25"
    }

    /// A CPF whose final check digit is wrong
    pub fn invalid_cpf() -> &'static str {
        "52998224726"
    }

    /// A legacy-format vehicle plate
    pub fn legacy_plate() -> &'static str {
        "ABC1234"
    }

    /// A Mercosul-format vehicle plate
    pub fn mercosul_plate() -> &'static str {
        "ABC1D23"
    }

    /// Standard claim number
    pub fn claim_number() -> &'static str {
        "SIN-2024-000042"
    }

    /// An own-vehicle photo label with a slug-table entry
    pub fn own_vehicle_label() -> &'static str {
        "Frente do Seu Veículo"
    }

    /// An other-vehicle photo label with a slug-table entry
    pub fn other_vehicle_label() -> &'static str {
        "Frente do Outro Veículo"
    }

    /// Standard claimant name
    pub fn claimant_name() -> &'static str {
        "Maria Souza"
    }

    /// Test staff email address
    pub fn staff_email() -> &'static str {
        "gestor@seguradora.example"
    }
}

/// Fixture for status-registry test data
pub struct StatusFixtures;

impl StatusFixtures {
    /// One status definition with the given name and activity flag
    pub fn status(name: &str, active: bool) -> StatusDef {
        StatusDef {
            id: StatusId::new(),
            name: name.to_string(),
            color: "#10b981".to_string(),
            icon: "check-circle".to_string(),
            order: 1,
            active,
        }
    }

    /// A small registry covering the intake lifecycle
    pub fn registry() -> Vec<StatusDef> {
        ["pendente", "em_analise", "aprovado", "concluido"]
            .iter()
            .enumerate()
            .map(|(i, name)| StatusDef {
                order: i as i32 + 1,
                ..Self::status(name, true)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain_intake::{validate_cpf, validate_plate};

    #[test]
    fn test_cpf_fixtures_agree_with_the_validator() {
        assert!(validate_cpf(StringFixtures::valid_cpf()));
        assert!(validate_cpf(StringFixtures::formatted_cpf()));
        assert!(!validate_cpf(StringFixtures::invalid_cpf()));
    }

    #[test]
    fn test_plate_fixtures_agree_with_the_validator() {
        assert!(validate_plate(StringFixtures::legacy_plate()));
        assert!(validate_plate(StringFixtures::mercosul_plate()));
    }

    #[test]
    fn test_id_fixtures_are_deterministic() {
        assert_eq!(IdFixtures::sinistro_id(), IdFixtures::sinistro_id());
    }

    #[test]
    fn test_temporal_fixtures_ordering() {
        assert!(TemporalFixtures::within_cache_ttl() < TemporalFixtures::after_cache_ttl());
        assert!(TemporalFixtures::after_cache_ttl() < TemporalFixtures::after_token_lifetime());
    }
}
