//! Property-based tests for splitting and checksumming codes.

use chrono::{Datelike, Days, NaiveDate};
use proptest::prelude::*;

use subscription_code::checksum::{combined_checksum, descriptor_checksum};
use subscription_code::code::ParsedCode;
use subscription_code::config::{EPOCH, REDACTED_SUFFIX};
use subscription_code::{issue_code, looks_incomplete, IntegrityLabel, Subscription};

/// Strategy for descriptors: hyphen-joined alphanumeric segments.
fn descriptor_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec("[A-Za-z][A-Za-z0-9]{0,7}", 1..4).prop_map(|parts| parts.join("-"))
}

/// Strategy for arbitrary user-typed text, hyphens and digits included.
fn typed_text() -> impl Strategy<Value = String> {
    "[A-Za-z0-9* -]{0,32}"
}

/// Strategy for encodable expiry dates.
fn expiry_strategy() -> impl Strategy<Value = NaiveDate> {
    (1u64..=999_999).prop_map(|date_part| {
        EPOCH
            .checked_add_days(Days::new(date_part + 40_000))
            .unwrap()
    })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        max_shrink_iters: 1000,
        ..ProptestConfig::default()
    })]

    // ========================================================================
    // Splitter
    // ========================================================================

    /// Parsing the same code twice gives the same fields.
    #[test]
    fn parse_is_deterministic(code in typed_text()) {
        prop_assert_eq!(ParsedCode::parse(&code), ParsedCode::parse(&code));
    }

    /// The descriptor never carries the numeric fields it was split from.
    #[test]
    fn parse_strips_numeric_suffix(
        descriptor in descriptor_strategy(),
        date_part in 0u32..=999_999,
        checksum in 0u32..=9_999
    ) {
        let code = format!("{descriptor}-{date_part:06}-{checksum:04}");
        let parsed = ParsedCode::parse(&code);
        prop_assert_eq!(parsed.descriptor, descriptor);
        prop_assert_eq!(parsed.date_part, date_part);
        prop_assert_eq!(parsed.checksum_part, checksum);
    }

    /// Redacting and reparsing yields the descriptor with zeroed fields.
    #[test]
    fn redaction_round_trip(code in typed_text().prop_filter("non-empty", |c| !c.is_empty())) {
        let sub = Subscription::from_code(&code);
        let redacted = sub.redacted_code();
        prop_assert!(redacted.ends_with(REDACTED_SUFFIX));

        let reparsed = ParsedCode::parse(&redacted);
        prop_assert_eq!(reparsed.descriptor.as_str(), sub.descriptor());
        prop_assert_eq!(reparsed.date_part, 0);
        prop_assert_eq!(reparsed.checksum_part, 0);

        // Redaction is idempotent.
        prop_assert_eq!(Subscription::from_code(&redacted).redacted_code(), redacted);
    }

    // ========================================================================
    // Checksum
    // ========================================================================

    /// Checksums ignore ASCII case.
    #[test]
    fn checksum_case_insensitive(descriptor in descriptor_strategy()) {
        prop_assert_eq!(
            descriptor_checksum(&descriptor.to_ascii_lowercase()),
            descriptor_checksum(&descriptor.to_ascii_uppercase())
        );
    }

    /// Combined checksums always fit the four-digit field.
    #[test]
    fn combined_checksum_fits_field(descriptor in typed_text(), date_part in 0u32..=999_999) {
        prop_assert!(combined_checksum(&descriptor, date_part) < 10_000);
    }

    /// Issued codes validate and decode back to their expiry.
    #[test]
    fn issued_codes_validate(descriptor in descriptor_strategy(), expires_on in expiry_strategy()) {
        let Ok(code) = issue_code(&descriptor, expires_on) else {
            // Zero checksums cannot be issued.
            return Ok(());
        };
        let sub = Subscription::from_code(&code);
        prop_assert_eq!(sub.integrity_label(), IntegrityLabel::Ok);
        prop_assert_eq!(sub.descriptor(), descriptor.as_str());
        prop_assert!(!sub.looks_incomplete());
        if expires_on.year() != 3000 {
            prop_assert_eq!(sub.expiration_date().date(), Some(expires_on));
        }
    }

    /// Changing the checksum field of a valid code makes it invalid and expired.
    #[test]
    fn tampered_checksum_is_invalid(
        descriptor in descriptor_strategy(),
        expires_on in expiry_strategy(),
        delta in 1u32..10_000
    ) {
        let Ok(code) = issue_code(&descriptor, expires_on) else {
            return Ok(());
        };
        let (head, checksum) = code.rsplit_once('-').unwrap();
        let tampered = (checksum.parse::<u32>().unwrap() + delta) % 10_000;
        let sub = Subscription::from_code(&format!("{head}-{tampered:04}"));
        prop_assert_eq!(sub.integrity_label(), IntegrityLabel::Invalid);
        prop_assert!(sub.is_expired());
    }

    // ========================================================================
    // Incompleteness heuristic
    // ========================================================================

    /// Every strict prefix of a code's checksum field reads as incomplete.
    #[test]
    fn partial_checksum_is_incomplete(
        descriptor in descriptor_strategy(),
        date_part in 0u32..=999_999,
        checksum in "[0-9]{0,3}"
    ) {
        let code = format!("{descriptor}-{date_part:06}-{checksum}");
        prop_assert!(looks_incomplete(Some(&code)));
    }

    /// Descriptors with no numeric segment are still being typed.
    #[test]
    fn alphabetic_descriptor_is_incomplete(descriptor in "[A-Za-z]{1,8}(-[A-Za-z]{1,8}){0,4}") {
        prop_assert!(looks_incomplete(Some(&descriptor)));
    }
}
