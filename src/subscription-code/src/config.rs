//! Fixed constants and runtime policy for subscription codes.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Day zero of the date field (spreadsheet serial date origin).
pub const EPOCH: NaiveDate = ymd(1899, 12, 30);

/// Added to the six-digit date field before counting days from [`EPOCH`].
pub const DATE_OFFSET_DAYS: u64 = 40_000;

/// Expiry applied to every legacy Community code.
pub const LEGACY_EXPIRY: NaiveDate = ymd(2025, 7, 1);

/// Year that once meant "never expires". Such codes now get [`LEGACY_EXPIRY`].
pub const RETIRED_PERPETUAL_YEAR: i32 = 3000;

/// Descriptor (and bare code) used by collections that predate checksummed codes.
pub const LEGACY_COMMUNITY: &str = "Local-Community";

/// Pre-4.4 spelling of [`LEGACY_COMMUNITY`].
pub const LEGACY_COMMUNITY_SPACED: &str = "Local Community";

/// Checksummed code that legacy Community collections migrate to. Expires on [`LEGACY_EXPIRY`].
pub const LEGACY_CODE: &str = "Legacy-LC-005839-2533";

/// Replaces the date and checksum fields in display-safe codes.
pub const REDACTED_SUFFIX: &str = "-***-***";

/// Descriptor suffix that marks a Community subscription.
pub const COMMUNITY_SUFFIX: &str = "-LC";

/// Branding key used when no subscription applies.
pub const DEFAULT_BRANDING: &str = "Default";

const fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    match NaiveDate::from_ymd_opt(year, month, day) {
        Some(date) => date,
        None => panic!("invalid calendar constant"),
    }
}

/// Runtime policy for building subscriptions from stored settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SubscriptionConfig {
    /// Code substituted when a legacy Community collection has no code.
    pub legacy_code: String,
    /// Days of validity granted while editing a book published under a redacted code.
    pub edit_grace_days: u32,
}

impl Default for SubscriptionConfig {
    fn default() -> Self {
        Self {
            legacy_code: LEGACY_CODE.into(),
            edit_grace_days: 1,
        }
    }
}

/// Subscription fields as handed over by the settings store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SubscriptionSettings {
    /// Stored subscription code, if any.
    pub code: Option<String>,
    /// Stored branding/descriptor name (older collections only have this).
    pub branding: Option<String>,
    /// True when the collection was downloaded to edit a published book.
    pub editing_published_book: bool,
}

impl SubscriptionSettings {
    /// Settings holding only a code.
    pub fn with_code(code: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            ..Self::default()
        }
    }
}
