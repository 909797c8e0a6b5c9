//! Issuing codes.
//!
//! Mirrors the external sheet that generates subscription codes, so support
//! tooling and tests can mint codes that validate.

use chrono::NaiveDate;

use crate::checksum::combined_checksum;
use crate::config::REDACTED_SUFFIX;
use crate::error::CodeError;
use crate::expiration::field_for_date;

const MAX_DATE_FIELD: i64 = 999_999;

/// Build a code for `descriptor` that expires on `expires_on`.
///
/// # Errors
///
/// Fails if the descriptor is empty or ends with the redaction mask, if the
/// date cannot be written as a non-zero six-digit field, or if the resulting
/// checksum is zero.
pub fn issue_code(descriptor: &str, expires_on: NaiveDate) -> Result<String, CodeError> {
    if descriptor.is_empty() {
        return Err(CodeError::EmptyDescriptor);
    }
    if descriptor.ends_with(REDACTED_SUFFIX) {
        return Err(CodeError::RedactedDescriptor {
            descriptor: descriptor.into(),
        });
    }

    let date_part = field_for_date(expires_on);
    if !(1..=MAX_DATE_FIELD).contains(&date_part) {
        return Err(CodeError::DateOutOfRange {
            date: expires_on,
            date_part,
        });
    }
    let date_part = date_part as u32;

    let checksum = combined_checksum(descriptor, date_part);
    if checksum == 0 {
        return Err(CodeError::UnverifiableChecksum {
            descriptor: descriptor.into(),
            date: expires_on,
        });
    }

    Ok(format!("{descriptor}-{date_part:06}-{checksum:04}"))
}
