//! Claim-number value object
//!
//! Claim numbers are human-readable identifiers of the form
//! `SIN-<year>-<6-digit sequence>`, unique per year. The numeric suffix is
//! zero-padded to a fixed width so that lexicographic ordering of the
//! rendered string matches numeric ordering of the sequence.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Prefix shared by every claim number
pub const CLAIM_NUMBER_PREFIX: &str = "SIN";

/// Width of the zero-padded sequence suffix
const SEQUENCE_WIDTH: usize = 6;

/// Largest sequence value representable in the fixed-width suffix
const MAX_SEQUENCE: u32 = 999_999;

/// Errors raised when constructing or parsing claim numbers
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClaimNumberError {
    #[error("Malformed claim number: {0}")]
    Malformed(String),

    #[error("Claim sequence {0} exceeds the {MAX_SEQUENCE} suffix capacity")]
    SequenceOverflow(u32),
}

/// A claim number: `SIN-<year>-<6-digit sequence>`
///
/// Created once per claim and immutable thereafter. Within a year the
/// sequence is strictly increasing in normal operation; fallback numbers
/// derived from a timestamp keep the same rendered shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClaimNumber {
    year: i32,
    sequence: u32,
}

impl ClaimNumber {
    /// Creates a claim number from its parts
    pub fn new(year: i32, sequence: u32) -> Result<Self, ClaimNumberError> {
        if sequence > MAX_SEQUENCE {
            return Err(ClaimNumberError::SequenceOverflow(sequence));
        }
        Ok(Self { year, sequence })
    }

    /// The first claim number of a year
    pub fn first(year: i32) -> Self {
        Self { year, sequence: 1 }
    }

    /// Returns the next number in the sequence for the same year
    pub fn next(&self) -> Result<Self, ClaimNumberError> {
        Self::new(self.year, self.sequence + 1)
    }

    /// The year component
    pub fn year(&self) -> i32 {
        self.year
    }

    /// The numeric sequence component
    pub fn sequence(&self) -> u32 {
        self.sequence
    }

    /// The prefix shared by all claim numbers of a year, e.g. `SIN-2024-`
    ///
    /// Store queries filter on this prefix; ordering the matching strings
    /// lexicographically is safe because the suffix is zero-padded.
    pub fn year_prefix(year: i32) -> String {
        format!("{}-{}-", CLAIM_NUMBER_PREFIX, year)
    }
}

impl fmt::Display for ClaimNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}-{:0width$}",
            CLAIM_NUMBER_PREFIX,
            self.year,
            self.sequence,
            width = SEQUENCE_WIDTH
        )
    }
}

impl FromStr for ClaimNumber {
    type Err = ClaimNumberError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || ClaimNumberError::Malformed(s.to_string());

        let rest = s.strip_prefix(CLAIM_NUMBER_PREFIX).ok_or_else(malformed)?;
        let rest = rest.strip_prefix('-').ok_or_else(malformed)?;
        let (year_part, seq_part) = rest.split_once('-').ok_or_else(malformed)?;

        if year_part.len() != 4 || seq_part.len() != SEQUENCE_WIDTH {
            return Err(malformed());
        }

        let year: i32 = year_part.parse().map_err(|_| malformed())?;
        let sequence: u32 = seq_part.parse().map_err(|_| malformed())?;

        Self::new(year, sequence)
    }
}

impl Serialize for ClaimNumber {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for ClaimNumber {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_zero_pads_sequence() {
        let number = ClaimNumber::new(2024, 42).unwrap();
        assert_eq!(number.to_string(), "SIN-2024-000042");
    }

    #[test]
    fn test_first_of_year() {
        assert_eq!(ClaimNumber::first(2025).to_string(), "SIN-2025-000001");
    }

    #[test]
    fn test_next_increments_sequence() {
        let number = ClaimNumber::new(2024, 42).unwrap();
        assert_eq!(number.next().unwrap().to_string(), "SIN-2024-000043");
    }

    #[test]
    fn test_next_rejects_overflow() {
        let number = ClaimNumber::new(2024, 999_999).unwrap();
        assert!(matches!(
            number.next(),
            Err(ClaimNumberError::SequenceOverflow(_))
        ));
    }

    #[test]
    fn test_parse_round_trip() {
        let parsed: ClaimNumber = "SIN-2024-000042".parse().unwrap();
        assert_eq!(parsed.year(), 2024);
        assert_eq!(parsed.sequence(), 42);
        assert_eq!(parsed.to_string(), "SIN-2024-000042");
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for input in ["SIN-2024-42", "CLM-2024-000042", "SIN-24-000042", "SIN-2024-00004a", ""] {
            assert!(input.parse::<ClaimNumber>().is_err(), "accepted {:?}", input);
        }
    }

    #[test]
    fn test_ordering_matches_rendered_ordering() {
        let a = ClaimNumber::new(2024, 7).unwrap();
        let b = ClaimNumber::new(2024, 100).unwrap();
        assert!(a < b);
        assert!(a.to_string() < b.to_string());
    }
}
