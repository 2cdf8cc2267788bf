//! Property-Based Test Generators
//!
//! Provides proptest strategies for generating random test data
//! that maintains domain invariants.

use chrono::{DateTime, Duration, TimeZone, Utc};
use core_kernel::{ClaimNumber, SinistroId};
use proptest::prelude::*;

/// Appends the two CPF check digits to nine base digits
fn append_check_digits(mut digits: Vec<u32>) -> Vec<u32> {
    for start_weight in [10u32, 11] {
        let sum: u32 = digits
            .iter()
            .zip((2..=start_weight).rev())
            .map(|(d, w)| d * w)
            .sum();
        digits.push(match (sum * 10) % 11 {
            10 => 0,
            d => d,
        });
    }
    digits
}

/// Strategy for generating CPFs with correct check digits
///
/// Degenerate all-identical sequences are filtered out; those satisfy the
/// checksum but are rejected by the validator.
pub fn valid_cpf_strategy() -> impl Strategy<Value = String> {
    proptest::array::uniform9(0u32..10)
        .prop_filter("all-identical CPFs are invalid", |base| {
            !base.iter().all(|&d| d == base[0])
        })
        .prop_map(|base| {
            append_check_digits(base.to_vec())
                .iter()
                .map(|d| char::from_digit(*d, 10).unwrap())
                .collect()
        })
}

/// Strategy for generating legacy-format plates (`LLLDDDD`)
pub fn legacy_plate_strategy() -> impl Strategy<Value = String> {
    ("[A-Z]{3}", "[0-9]{4}").prop_map(|(letters, digits)| format!("{}{}", letters, digits))
}

/// Strategy for generating Mercosul-format plates (`LLLDLDD`)
pub fn mercosul_plate_strategy() -> impl Strategy<Value = String> {
    ("[A-Z]{3}", "[0-9]", "[A-Z]", "[0-9]{2}")
        .prop_map(|(l3, d, l, d2)| format!("{}{}{}{}", l3, d, l, d2))
}

/// Strategy for generating valid plates in either format
pub fn plate_strategy() -> impl Strategy<Value = String> {
    prop_oneof![legacy_plate_strategy(), mercosul_plate_strategy()]
}

/// Strategy for generating claim numbers within the sequence range
pub fn claim_number_strategy() -> impl Strategy<Value = ClaimNumber> {
    (2000i32..2100, 1u32..=999_999)
        .prop_map(|(year, sequence)| ClaimNumber::new(year, sequence).unwrap())
}

/// Strategy for generating SinistroId
pub fn sinistro_id_strategy() -> impl Strategy<Value = SinistroId> {
    any::<[u8; 16]>().prop_map(|bytes| SinistroId::from_uuid(uuid::Uuid::from_bytes(bytes)))
}

/// Strategy for generating vehicle-photo labels with slug-table entries
pub fn vehicle_label_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("Frente do Seu Veículo".to_string()),
        Just("Traseira do Seu Veículo".to_string()),
        Just("Lateral Esquerda do Seu Veículo".to_string()),
        Just("Frente do Outro Veículo".to_string()),
        Just("Visão Geral da Cena".to_string()),
        Just("Foto do Dano".to_string()),
    ]
}

/// Strategy for generating capture timestamps within 2024
pub fn capture_instant_strategy() -> impl Strategy<Value = DateTime<Utc>> {
    (0i64..365).prop_map(|days| {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + Duration::days(days)
    })
}

/// Strategy for generating claimant names
pub fn name_strategy() -> impl Strategy<Value = String> {
    ("[A-Z][a-z]{2,10}", "[A-Z][a-z]{2,10}").prop_map(|(first, last)| format!("{} {}", first, last))
}
