//! The validated subscription record.
//!
//! A [`Subscription`] is built once from a code and never changes. Besides
//! plain parsing there are three construction paths:
//!
//! - **Legacy migration**: a collection with no code but a legacy Community
//!   branding gets the fixed legacy code substituted before parsing.
//! - **Published-book edit**: a book downloaded for editing usually carries
//!   a redacted code. Checksums are not verified, the stored branding fills
//!   in for a blank code, and expiry is pushed out to a short grace window.
//! - **Testing**: constructors that skip parsing entirely.

use std::fmt;

use chrono::{Days, Local, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::checksum::is_checksum_correct;
use crate::code::{looks_incomplete, ParsedCode};
use crate::config::{SubscriptionConfig, SubscriptionSettings, LEGACY_COMMUNITY, REDACTED_SUFFIX};
use crate::descriptor;
use crate::expiration::{self, ExpirationDate};
use crate::integrity::IntegrityLabel;
use crate::tier::SubscriptionTier;

/// Entitlement derived from a subscription code.
#[derive(Clone, PartialEq, Eq)]
pub struct Subscription {
    code: Option<String>,
    parsed: ParsedCode,
    descriptor: String,
    tier: SubscriptionTier,
    expiration: ExpirationDate,
    editing_published_book: bool,
}

impl Subscription {
    /// Build from a code, or from no code at all.
    pub fn new(code: Option<&str>) -> Self {
        let parsed = code.map(ParsedCode::parse).unwrap_or_default();
        let expiration = expiration::decode(code, &parsed);
        Self {
            code: code.map(str::to_string),
            descriptor: parsed.descriptor.clone(),
            tier: SubscriptionTier::for_descriptor(&parsed.descriptor),
            parsed,
            expiration,
            editing_published_book: false,
        }
    }

    /// Build from a code string.
    pub fn from_code(code: &str) -> Self {
        Self::new(Some(code))
    }

    /// A subscription with no code.
    pub fn absent() -> Self {
        Self::new(None)
    }

    /// Build from stored collection settings, using the local clock.
    pub fn from_settings(settings: &SubscriptionSettings, config: &SubscriptionConfig) -> Self {
        Self::from_settings_at(settings, config, Local::now().naive_local())
    }

    /// Build from stored collection settings.
    ///
    /// Legacy Community collections without a code get
    /// [`SubscriptionConfig::legacy_code`]. So do published books downloaded
    /// for editing with the redacted legacy marker and a `Default` branding.
    /// When editing a published book the descriptor comes from the code,
    /// falling back to the stored branding only when the code is blank.
    pub fn from_settings_at(
        settings: &SubscriptionSettings,
        config: &SubscriptionConfig,
        now: NaiveDateTime,
    ) -> Self {
        let branding = descriptor::canonical(settings.branding.as_deref().unwrap_or_default());
        let mut code = settings.code.as_deref();

        let code_is_blank = code.map_or(true, |c| c.trim().is_empty());
        if code_is_blank && descriptor::is_legacy_community_name(branding) {
            info!(
                branding = %branding,
                "Migrating legacy Community collection to checksummed code"
            );
            code = Some(config.legacy_code.as_str());
        }

        if !settings.editing_published_book {
            return Self::new(code);
        }

        let redacted_legacy = code
            .and_then(|c| c.strip_suffix(REDACTED_SUFFIX))
            .is_some_and(|d| d == LEGACY_COMMUNITY);
        if redacted_legacy && descriptor::is_default(branding) {
            info!("Migrating downloaded legacy Community book to checksummed code");
            code = Some(config.legacy_code.as_str());
        }

        let parsed = code.map(ParsedCode::parse).unwrap_or_default();
        let descriptor = if !parsed.descriptor.is_empty() {
            parsed.descriptor.clone()
        } else if descriptor::is_default(branding) {
            String::new()
        } else {
            branding.to_string()
        };

        // Branding keeps saying Local-Community after the code migrated.
        let tier = if descriptor.is_empty() {
            SubscriptionTier::None
        } else if descriptor::is_legacy_community_name(branding) {
            SubscriptionTier::Community
        } else {
            SubscriptionTier::for_descriptor(&descriptor)
        };

        Self::published_edit(code, parsed, descriptor, tier, config.edit_grace_days, now)
    }

    /// Subscription for editing a book that was published under a redacted code.
    ///
    /// The code is kept for reference but not verified. Descriptor and tier
    /// come from `descriptor`. Whatever the code decodes to, the subscription
    /// stays valid for at least `grace_days` from `now`.
    pub fn for_published_edit_at(
        code: Option<&str>,
        descriptor: &str,
        grace_days: u32,
        now: NaiveDateTime,
    ) -> Self {
        let parsed = code.map(ParsedCode::parse).unwrap_or_default();
        let tier = SubscriptionTier::for_descriptor(descriptor);
        Self::published_edit(code, parsed, descriptor.to_string(), tier, grace_days, now)
    }

    fn published_edit(
        code: Option<&str>,
        parsed: ParsedCode,
        descriptor: String,
        tier: SubscriptionTier,
        grace_days: u32,
        now: NaiveDateTime,
    ) -> Self {
        let decoded = expiration::decode(code, &parsed);
        let expiration = match now.checked_add_days(Days::new(u64::from(grace_days))) {
            Some(grace_end) => decoded.extended_to(grace_end),
            None => decoded,
        };
        let subscription = Self {
            code: code.map(str::to_string),
            parsed,
            descriptor,
            tier,
            expiration,
            editing_published_book: true,
        };
        info!(
            descriptor = %subscription.descriptor,
            tier = %subscription.tier,
            "Granting edit grace for published book"
        );
        subscription
    }

    /// Subscription for a collection that only records a branding name.
    ///
    /// Only the legacy Community brandings still mean anything; every other
    /// legacy branding is treated as having no subscription.
    pub fn from_legacy_branding(branding: Option<&str>) -> Self {
        match branding {
            Some(name) if descriptor::is_legacy_community_name(name) => {
                Self::from_code(LEGACY_COMMUNITY)
            },
            _ => Self::from_code(""),
        }
    }

    /// The raw code, if any. Do not log or display this; use
    /// [`redacted_code`](Self::redacted_code).
    pub fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }

    /// Branding/tier identifying part of the code.
    pub fn descriptor(&self) -> &str {
        &self.descriptor
    }

    /// Entitlement tier.
    pub fn tier(&self) -> SubscriptionTier {
        self.tier
    }

    /// Expiration decoded from the code.
    pub fn expiration_date(&self) -> ExpirationDate {
        self.expiration
    }

    /// True only for subscriptions built for editing a published book.
    pub fn editing_published_book(&self) -> bool {
        self.editing_published_book
    }

    /// Check expiry against the local clock.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Local::now().naive_local())
    }

    /// Check expiry at `now`. Codes that never validated are always expired.
    pub fn is_expired_at(&self, now: NaiveDateTime) -> bool {
        self.expiration.is_expired_at(now)
    }

    /// Check if the code still looks like it is being typed.
    pub fn looks_incomplete(&self) -> bool {
        looks_incomplete(self.code.as_deref())
    }

    /// Check the code's checksum field.
    pub fn checksum_correct(&self) -> bool {
        is_checksum_correct(&self.parsed)
    }

    /// Validation state for UI display.
    pub fn integrity_label(&self) -> IntegrityLabel {
        IntegrityLabel::classify(self.code.as_deref(), &self.parsed)
    }

    /// Code with the date and checksum masked, safe to display or log.
    ///
    /// Parsing the result gives back the descriptor with both numeric fields zero.
    pub fn redacted_code(&self) -> String {
        match self.code.as_deref() {
            None | Some("") => String::new(),
            Some(_) => format!("{}{}", self.descriptor, REDACTED_SUFFIX),
        }
    }

    /// Key for locating this subscription's branding assets.
    pub fn branding_project_key(&self) -> &str {
        descriptor::branding_key(&self.descriptor)
    }

    /// Subscriber name embedded in a Community descriptor, or empty.
    pub fn personalization(&self) -> String {
        descriptor::personalization(&self.descriptor)
    }

    /// Check if the tier is a paid one. Does not consider expiry.
    pub fn have_active_subscription(&self) -> bool {
        self.tier.is_subscribed()
    }

    /// Check if `code` differs from the held code. Empty and absent are the same.
    pub fn is_different(&self, code: Option<&str>) -> bool {
        let held = self.code.as_deref().unwrap_or_default();
        held != code.unwrap_or_default()
    }

    /// Display record for UI callers, using the local clock.
    pub fn summary(&self) -> SubscriptionSummary {
        self.summary_at(Local::now().naive_local())
    }

    /// Display record for UI callers. Never contains the raw code.
    pub fn summary_at(&self, now: NaiveDateTime) -> SubscriptionSummary {
        SubscriptionSummary {
            descriptor: self.descriptor.clone(),
            tier: self.tier,
            expiration_date: self.expiration.date(),
            expired: self.is_expired_at(now),
            integrity_label: self.integrity_label(),
            redacted_code: self.redacted_code(),
            branding_key: self.branding_project_key().to_string(),
            personalization: self.personalization(),
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
impl Subscription {
    fn injected(tier: SubscriptionTier, descriptor: &str, expiration: ExpirationDate) -> Self {
        Self {
            code: None,
            parsed: ParsedCode::default(),
            descriptor: descriptor.to_string(),
            tier,
            expiration,
            editing_published_book: false,
        }
    }

    fn tomorrow() -> ExpirationDate {
        ExpirationDate::At(Local::now().naive_local() + chrono::Duration::days(1))
    }

    /// Subscription with only a tier set.
    pub fn for_testing_with_tier(tier: SubscriptionTier) -> Self {
        Self::injected(tier, "", ExpirationDate::Invalid)
    }

    /// Subscription with tier and descriptor set, valid until tomorrow.
    pub fn for_testing_with_tier_and_descriptor(tier: SubscriptionTier, descriptor: &str) -> Self {
        Self::injected(tier, descriptor, Self::tomorrow())
    }

    /// Subscription with a descriptor set, valid until tomorrow. Tier stays `None`.
    pub fn for_testing_with_descriptor(descriptor: &str) -> Self {
        Self::injected(SubscriptionTier::None, descriptor, Self::tomorrow())
    }
}

impl Default for Subscription {
    fn default() -> Self {
        Self::absent()
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("code", &self.redacted_code())
            .field("descriptor", &self.descriptor)
            .field("tier", &self.tier)
            .field("expiration", &self.expiration)
            .field("editing_published_book", &self.editing_published_book)
            .finish()
    }
}

/// What the UI needs to show about a subscription.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionSummary {
    /// Branding/tier identifying part of the code.
    pub descriptor: String,
    /// Entitlement tier.
    pub tier: SubscriptionTier,
    /// Expiration day, absent when the code never validated.
    pub expiration_date: Option<NaiveDate>,
    /// Whether the subscription has expired.
    pub expired: bool,
    /// Validation state.
    pub integrity_label: IntegrityLabel,
    /// Display-safe code.
    pub redacted_code: String,
    /// Branding asset key.
    pub branding_key: String,
    /// Community subscriber name, or empty.
    pub personalization: String,
}
