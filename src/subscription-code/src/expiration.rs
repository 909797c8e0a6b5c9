//! Expiration date decoding.
//!
//! The date field counts days from [`EPOCH`] after adding
//! [`DATE_OFFSET_DAYS`], the same serial-date scheme spreadsheets use. So
//! `005839` is serial 45839, i.e. 2025-07-01.

use chrono::{Datelike, Days, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::checksum::is_checksum_correct;
use crate::code::ParsedCode;
use crate::config::{
    DATE_OFFSET_DAYS, EPOCH, LEGACY_COMMUNITY, LEGACY_EXPIRY, RETIRED_PERPETUAL_YEAR,
};

/// When a subscription stops being valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ExpirationDate {
    /// The code never conferred a valid subscription.
    Invalid,
    /// Valid until this moment (local time).
    At(NaiveDateTime),
}

impl ExpirationDate {
    /// Expiration at the start of `date`.
    pub fn on(date: NaiveDate) -> Self {
        Self::At(date.and_time(NaiveTime::MIN))
    }

    /// Fixed expiration shared by all legacy Community codes.
    pub fn legacy() -> Self {
        Self::on(LEGACY_EXPIRY)
    }

    /// Check if this is the never-valid sentinel.
    pub fn is_invalid(&self) -> bool {
        matches!(self, Self::Invalid)
    }

    /// The moment of expiration, if any.
    pub fn datetime(&self) -> Option<NaiveDateTime> {
        match self {
            Self::Invalid => None,
            Self::At(at) => Some(*at),
        }
    }

    /// The calendar date of expiration, if any.
    pub fn date(&self) -> Option<NaiveDate> {
        self.datetime().map(|at| at.date())
    }

    /// The later of this expiration and `floor`.
    ///
    /// The sentinel is earlier than any moment, so it always becomes `floor`.
    pub fn extended_to(self, floor: NaiveDateTime) -> Self {
        match self {
            Self::At(at) if at >= floor => self,
            _ => Self::At(floor),
        }
    }

    /// Check if the subscription is no longer valid at `now`.
    ///
    /// The sentinel is always expired.
    pub fn is_expired_at(&self, now: NaiveDateTime) -> bool {
        match self {
            Self::Invalid => true,
            Self::At(at) => *at < now,
        }
    }
}

/// Decode the expiration of `code`, given its parsed fields.
///
/// Anything that fails the checksum decodes to [`ExpirationDate::Invalid`].
/// The bare legacy marker `Local-Community` carries no fields but still
/// expires on the legacy date.
pub fn decode(code: Option<&str>, parsed: &ParsedCode) -> ExpirationDate {
    let Some(code) = code else {
        return ExpirationDate::Invalid;
    };

    if code == LEGACY_COMMUNITY {
        return ExpirationDate::legacy();
    }

    if !is_checksum_correct(parsed) {
        return ExpirationDate::Invalid;
    }

    let Some(date) = date_for_field(parsed.date_part) else {
        warn!(
            date_part = parsed.date_part,
            "Subscription date field is outside the calendar range"
        );
        return ExpirationDate::Invalid;
    };

    if date.year() == RETIRED_PERPETUAL_YEAR {
        debug!(descriptor = %parsed.descriptor, "Retired perpetual code; applying legacy expiry");
        return ExpirationDate::legacy();
    }

    ExpirationDate::on(date)
}

/// Calendar date encoded by a date field.
pub fn date_for_field(date_part: u32) -> Option<NaiveDate> {
    EPOCH.checked_add_days(Days::new(u64::from(date_part) + DATE_OFFSET_DAYS))
}

/// Date field value that encodes `date`. May be negative or exceed six digits.
pub fn field_for_date(date: NaiveDate) -> i64 {
    date.signed_duration_since(EPOCH).num_days() - DATE_OFFSET_DAYS as i64
}
