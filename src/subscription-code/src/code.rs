//! Splitting a raw code into descriptor, date and checksum fields.
//!
//! A complete code looks like `PNG-RISE-361769-3637`: a descriptor that may
//! itself contain hyphens, a six-digit date field and a four-digit checksum.
//! Anything that does not end in that shape is treated as a bare descriptor
//! with both numeric fields zero.
//!
//! | code                  | descriptor     | date   | checksum |
//! |-----------------------|----------------|--------|----------|
//! | (empty)               | ""             | 0      | 0        |
//! | `foo-bar`             | `foo-bar`      | 0      | 0        |
//! | `foo-blah-bar`        | `foo-blah-bar` | 0      | 0        |
//! | `foo-bar-123456-7890` | `foo-bar`      | 123456 | 7890     |
//! | `foo-bar-***-***`     | `foo-bar`      | 0      | 0        |

use crate::config::REDACTED_SUFFIX;

const DATE_FIELD_LEN: usize = 6;
const CHECKSUM_FIELD_LEN: usize = 4;

/// The three logical fields of a code.
///
/// Zero in either numeric field means "absent".
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ParsedCode {
    /// Branding/tier identifying prefix.
    pub descriptor: String,
    /// Encoded expiry date.
    pub date_part: u32,
    /// Combined checksum over the descriptor and date.
    pub checksum_part: u32,
}

impl ParsedCode {
    /// Split a raw code. Never fails; unrecognized shapes keep the whole code
    /// as the descriptor.
    pub fn parse(code: &str) -> Self {
        if code.is_empty() {
            return Self::default();
        }

        if let Some(descriptor) = code.strip_suffix(REDACTED_SUFFIX) {
            return Self::descriptor_only(descriptor);
        }

        let parts: Vec<&str> = code.split('-').collect();
        if parts.len() < 3 {
            return Self::descriptor_only(code);
        }

        let (head, tail) = parts.split_at(parts.len() - 2);
        let (date_field, checksum_field) = (tail[0], tail[1]);
        if date_field.encode_utf16().count() != DATE_FIELD_LEN
            || checksum_field.encode_utf16().count() != CHECKSUM_FIELD_LEN
        {
            return Self::descriptor_only(code);
        }

        match (parse_number(date_field), parse_number(checksum_field)) {
            (Some(date_part), Some(checksum_part)) => Self {
                descriptor: head.join("-"),
                date_part,
                checksum_part,
            },
            _ => Self::descriptor_only(code),
        }
    }

    fn descriptor_only(descriptor: &str) -> Self {
        Self {
            descriptor: descriptor.to_string(),
            date_part: 0,
            checksum_part: 0,
        }
    }

    /// Check if both numeric fields are present (non-zero) and the descriptor is not empty.
    pub fn is_verifiable(&self) -> bool {
        !self.descriptor.is_empty() && self.date_part != 0 && self.checksum_part != 0
    }
}

/// Parse an all-digit field. Signs, whitespace and empty strings are rejected.
pub(crate) fn parse_number(field: &str) -> Option<u32> {
    if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    field.parse().ok()
}

/// Best-effort guess that the user is still typing `code`.
///
/// Used for live feedback so a half-entered code is not flagged as wrong.
/// Descriptors may contain hyphens and digits, so a descriptor segment that
/// happens to be numeric can be mistaken for the date field
/// (`ethnos-360-guatemala` reads as complete). That ambiguity is accepted.
pub fn looks_incomplete(code: Option<&str>) -> bool {
    let Some(code) = code else {
        return true;
    };

    let parts: Vec<&str> = code.split('-').collect();
    if parts.len() < 3 {
        return true;
    }

    let last = parts[parts.len() - 1];
    let second_last = parts[parts.len() - 2];

    // No digits yet: still in the name part.
    if parse_number(second_last).is_none() {
        return true;
    }

    // Date field done, checksum partly typed (or not started).
    second_last.chars().count() == DATE_FIELD_LEN
        && last.chars().count() < CHECKSUM_FIELD_LEN
        && (last.is_empty() || parse_number(last).is_some())
}
