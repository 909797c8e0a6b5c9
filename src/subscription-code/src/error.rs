//! Error types for the fallible edges of the crate.
//!
//! Parsing and validating a code never fails: malformed input degrades to
//! sentinel values. These errors only come from name lookups and from
//! issuing new codes.

use chrono::NaiveDate;
use thiserror::Error;

/// Errors that can occur outside the parse/validate path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodeError {
    /// Tier name did not match any known tier.
    #[error("Unknown subscription tier: {name}")]
    UnknownTier {
        /// The name that was looked up.
        name: String,
    },

    /// Integrity label did not match any known label.
    #[error("Unknown integrity label: {name}")]
    UnknownLabel {
        /// The name that was looked up.
        name: String,
    },

    /// Feature name did not match any registered feature.
    #[error("Unknown feature: {name}")]
    UnknownFeature {
        /// The name that was looked up.
        name: String,
    },

    /// A code cannot be issued for an empty descriptor.
    #[error("Descriptor must not be empty")]
    EmptyDescriptor,

    /// Descriptor would be misread as a redacted code.
    #[error("Descriptor must not end with the redaction mask: {descriptor}")]
    RedactedDescriptor {
        /// The offending descriptor.
        descriptor: String,
    },

    /// Expiry date falls outside the six-digit date field.
    #[error("Expiry date {date} cannot be encoded (date field would be {date_part})")]
    DateOutOfRange {
        /// Requested expiry date.
        date: NaiveDate,
        /// The date field value it would need.
        date_part: i64,
    },

    /// The combined checksum came out as zero, which validators read as absent.
    #[error("Checksum for {descriptor} on {date} is zero and cannot be verified")]
    UnverifiableChecksum {
        /// Requested descriptor.
        descriptor: String,
        /// Requested expiry date.
        date: NaiveDate,
    },
}

impl CodeError {
    /// Check if this error came from an unrecognized name lookup.
    #[must_use]
    pub fn is_unknown_name(&self) -> bool {
        matches!(
            self,
            Self::UnknownTier { .. } | Self::UnknownLabel { .. } | Self::UnknownFeature { .. }
        )
    }

    /// Check if this error was raised while issuing a code.
    #[must_use]
    pub fn is_issuance_error(&self) -> bool {
        matches!(
            self,
            Self::EmptyDescriptor
                | Self::RedactedDescriptor { .. }
                | Self::DateOutOfRange { .. }
                | Self::UnverifiableChecksum { .. }
        )
    }
}
