//! Checksum over descriptor and date field.
//!
//! ## Security Properties
//!
//! None worth the name. The checksum only makes casual edits to a code fail
//! validation; anyone who reads this module can mint valid codes. It must
//! stay in step with the external sheet that generates codes, so do not
//! "strengthen" it here.

use tracing::debug;

use crate::code::ParsedCode;

/// Modulus applied to the combined checksum (four decimal digits).
pub const CHECKSUM_MODULUS: u64 = 10_000;

/// Position-weighted sum of the uppercased descriptor's UTF-16 code units.
///
/// Each code unit is multiplied by its zero-based index, matching the sheet
/// that issues codes; characters outside the BMP count as two units.
/// Uppercasing is per character and only applied where it maps to a single
/// character, so the index of every unit is preserved.
pub fn descriptor_checksum(descriptor: &str) -> u64 {
    let upper: String = descriptor.chars().map(simple_uppercase).collect();
    upper
        .encode_utf16()
        .enumerate()
        .map(|(index, unit)| u64::from(unit) * index as u64)
        .sum()
}

fn simple_uppercase(c: char) -> char {
    let mut upper = c.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(single), None) => single,
        _ => c,
    }
}

/// Checksum field value expected for a descriptor and date field.
pub fn combined_checksum(descriptor: &str, date_part: u32) -> u64 {
    let root = floor_sqrt(u64::from(date_part));
    (root + descriptor_checksum(descriptor)) % CHECKSUM_MODULUS
}

/// Check a parsed code's checksum field.
///
/// Codes with an empty descriptor or a zero numeric field are never correct.
pub fn is_checksum_correct(parsed: &ParsedCode) -> bool {
    if !parsed.is_verifiable() {
        return false;
    }
    let expected = combined_checksum(&parsed.descriptor, parsed.date_part);
    let matches = expected == u64::from(parsed.checksum_part);
    if !matches {
        debug!(descriptor = %parsed.descriptor, "Subscription code checksum mismatch");
    }
    matches
}

// Date fields are at most six digits, well inside f64's exact range; the
// correction steps guard against rounding at perfect squares.
fn floor_sqrt(n: u64) -> u64 {
    let mut root = (n as f64).sqrt() as u64;
    while root * root > n {
        root -= 1;
    }
    while (root + 1) * (root + 1) <= n {
        root += 1;
    }
    root
}
