//! Scenario tests for building subscriptions from codes and settings.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use proptest::prelude::*;

use subscription_code::config::{EPOCH, LEGACY_CODE, LEGACY_EXPIRY};
use subscription_code::{
    feature_status, issue_code, ExpirationDate, FeatureName, IntegrityLabel, Subscription,
    SubscriptionConfig, SubscriptionSettings, SubscriptionTier,
};

fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d).unwrap().and_time(NaiveTime::MIN)
}

#[test]
fn empty_code_has_no_subscription() {
    let sub = Subscription::from_code("");
    assert_eq!(sub.tier(), SubscriptionTier::None);
    assert!(sub.is_expired());
    assert_eq!(sub.integrity_label().as_str(), "none");
    assert!(!sub.have_active_subscription());
}

#[test]
fn documented_enterprise_code() {
    let sub = Subscription::from_code("Foo-Bar-123456-1804");
    assert!(sub.checksum_correct());
    assert_eq!(sub.integrity_label().as_str(), "ok");
    assert_eq!(sub.tier(), SubscriptionTier::Enterprise);
    assert_eq!(
        sub.expiration_date().date(),
        Some(NaiveDate::from_ymd_opt(2347, 7, 11).unwrap())
    );
    assert_eq!(
        sub.expiration_date().date(),
        EPOCH.checked_add_days(chrono::Days::new(163_456))
    );

    let tampered = Subscription::from_code("Foo-Bar-123456-1809");
    assert_eq!(tampered.integrity_label().as_str(), "invalid");
    assert!(tampered.is_expired());
}

#[test]
fn legacy_marker_expires_on_legacy_date() {
    let sub = Subscription::from_code("Local-Community");
    assert_eq!(sub.expiration_date().date(), Some(LEGACY_EXPIRY));
}

#[test]
fn legacy_collection_migrates_to_legacy_code() {
    let settings: SubscriptionSettings =
        serde_json::from_str(r#"{"code": "", "branding": "Local-Community"}"#).unwrap();
    let sub = Subscription::from_settings_at(&settings, &SubscriptionConfig::default(), at(2025, 6, 1));
    assert_eq!(sub.code(), Some(LEGACY_CODE));
    assert_eq!(sub.tier(), SubscriptionTier::Community);
    assert!(!sub.is_expired_at(at(2025, 6, 1)));
    assert!(sub.is_expired_at(at(2025, 7, 1) + chrono::Duration::seconds(1)));
}

#[test]
fn configured_legacy_code_is_used() {
    let code = issue_code("Legacy-LC", NaiveDate::from_ymd_opt(2027, 1, 1).unwrap()).unwrap();
    let config = SubscriptionConfig {
        legacy_code: code.clone(),
        ..SubscriptionConfig::default()
    };
    let settings = SubscriptionSettings {
        branding: Some("Local Community".into()),
        ..SubscriptionSettings::default()
    };
    let sub = Subscription::from_settings_at(&settings, &config, at(2026, 10, 19));
    assert_eq!(sub.code(), Some(code.as_str()));
    assert!(!sub.is_expired_at(at(2026, 10, 19)));
}

#[test]
fn published_edit_ignores_expired_code() {
    let expired = issue_code("Acme-Literacy", NaiveDate::from_ymd_opt(2020, 1, 1).unwrap()).unwrap();
    let settings = SubscriptionSettings {
        code: Some(expired),
        branding: Some("Acme-Literacy".into()),
        editing_published_book: true,
    };
    let now = at(2026, 10, 19);
    let sub = Subscription::from_settings_at(&settings, &SubscriptionConfig::default(), now);
    assert!(sub.editing_published_book());
    assert_eq!(sub.tier(), SubscriptionTier::Enterprise);
    assert!(!sub.is_expired_at(now));
    assert!(sub.is_expired_at(at(2026, 10, 21)));
    assert_eq!(sub.expiration_date(), ExpirationDate::At(at(2026, 10, 20)));
}

#[test]
fn plain_settings_match_plain_code() {
    let code = "Foo-Bar-123456-1804";
    let from_settings = Subscription::from_settings(
        &SubscriptionSettings::with_code(code),
        &SubscriptionConfig::default(),
    );
    assert_eq!(from_settings, Subscription::from_code(code));
}

#[test]
fn features_follow_tier() {
    let community = Subscription::from_code(LEGACY_CODE);
    assert!(feature_status(&community, FeatureName::TeamCollection).enabled);
    assert!(!feature_status(&community, FeatureName::Bookshelf).enabled);

    let enterprise = Subscription::from_code("Foo-Bar-123456-1804");
    assert!(feature_status(&enterprise, FeatureName::Bookshelf).enabled);
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        ..ProptestConfig::default()
    })]

    /// Arbitrary input never panics and always yields a consistent record.
    #[test]
    fn arbitrary_input_degrades_gracefully(code in ".{0,48}") {
        let sub = Subscription::from_code(&code);
        let label = sub.integrity_label();

        prop_assert_eq!(sub.tier(), SubscriptionTier::for_descriptor(sub.descriptor()));
        prop_assert_eq!(sub.have_active_subscription(), sub.tier() != SubscriptionTier::None);
        if label != IntegrityLabel::Ok && code != "Local-Community" {
            prop_assert!(sub.expiration_date().is_invalid());
        }
        if sub.checksum_correct() {
            prop_assert!(!sub.expiration_date().is_invalid());
        }
        prop_assert_eq!(label.as_str().parse::<IntegrityLabel>().unwrap(), label);
    }
}
