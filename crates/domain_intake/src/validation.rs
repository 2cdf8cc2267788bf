//! Document-number validation rules
//!
//! This module validates and formats the two Brazilian identifiers collected
//! during intake:
//!
//! - **CPF**: the 11-digit personal tax number, verified with the standard
//!   modulo-11 check digits.
//! - **Vehicle plates**: the legacy `LLLDDDD` format and the Mercosul
//!   `LLLDLDD` format.
//!
//! All functions are pure; formatting helpers are lenient and accept partial
//! input so the wizard can format as the user types.

/// Validates a CPF number
///
/// Strips every non-digit character, then requires exactly 11 digits, a
/// non-degenerate digit pattern (all-identical CPFs pass the checksum but
/// are invalid), and both check digits.
pub fn validate_cpf(input: &str) -> bool {
    let digits: Vec<u32> = input.chars().filter_map(|c| c.to_digit(10)).collect();

    if digits.len() != 11 {
        return false;
    }

    // All-identical sequences like 111.111.111-11 satisfy the checksum
    if digits.iter().all(|&d| d == digits[0]) {
        return false;
    }

    check_digit(&digits[..9], 10) == digits[9] && check_digit(&digits[..10], 11) == digits[10]
}

/// Computes one CPF check digit
///
/// The leading digits are weighted `start_weight` down to 2, and the digit
/// is `(sum * 10) mod 11`, with 10 mapped to 0.
fn check_digit(digits: &[u32], start_weight: u32) -> u32 {
    let sum: u32 = digits
        .iter()
        .zip((2..=start_weight).rev())
        .map(|(d, w)| d * w)
        .sum();

    match (sum * 10) % 11 {
        10 => 0,
        d => d,
    }
}

/// Formats a CPF number as `000.000.000-00`
///
/// Strips non-digits, inserts `.` after the 3rd and 6th digits and `-`
/// after the 9th, and truncates to 14 characters. Idempotent on input that
/// is already formatted.
pub fn format_cpf(input: &str) -> String {
    let digits: Vec<char> = input.chars().filter(|c| c.is_ascii_digit()).take(11).collect();

    let mut formatted = String::with_capacity(14);
    for (i, digit) in digits.iter().enumerate() {
        match i {
            3 | 6 => formatted.push('.'),
            9 => formatted.push('-'),
            _ => {}
        }
        formatted.push(*digit);
    }
    formatted
}

/// Validates a vehicle plate in either the legacy or the Mercosul format
///
/// Strips non-alphanumerics and uppercases before matching, so
/// `"abc-1234"` and `"ABC1234"` are both accepted.
pub fn validate_plate(input: &str) -> bool {
    let plate = normalize_plate(input);
    let chars: Vec<char> = plate.chars().collect();

    if chars.len() != 7 {
        return false;
    }

    let legacy = chars[..3].iter().all(|c| c.is_ascii_alphabetic())
        && chars[3..].iter().all(|c| c.is_ascii_digit());

    let mercosul = chars[..3].iter().all(|c| c.is_ascii_alphabetic())
        && chars[3].is_ascii_digit()
        && chars[4].is_ascii_alphabetic()
        && chars[5..].iter().all(|c| c.is_ascii_digit());

    legacy || mercosul
}

/// Formats a vehicle plate for display
///
/// Uppercases and strips separators, then re-inserts a hyphen after the
/// 3rd character for plate-length input (7 or 8 characters). Anything
/// longer is truncated to 8 characters unmodified.
pub fn format_plate(input: &str) -> String {
    let plate = normalize_plate(input);

    match plate.len() {
        7 | 8 => format!("{}-{}", &plate[..3], &plate[3..]),
        _ => plate.chars().take(8).collect(),
    }
}

fn normalize_plate(input: &str) -> String {
    input
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_uppercase())
        .collect()
}
