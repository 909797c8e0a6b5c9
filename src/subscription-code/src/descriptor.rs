//! Descriptor normalization.
//!
//! The legacy Community names and the `-LC` suffix are recognized here and
//! nowhere else; tier, expiration and branding logic all go through these
//! predicates.

use crate::config::{
    COMMUNITY_SUFFIX, DEFAULT_BRANDING, LEGACY_COMMUNITY, LEGACY_COMMUNITY_SPACED,
};

/// Check if `name` is one of the legacy Community branding names.
pub fn is_legacy_community_name(name: &str) -> bool {
    name == LEGACY_COMMUNITY || name == LEGACY_COMMUNITY_SPACED
}

/// Map legacy spellings onto their current form.
pub fn canonical(descriptor: &str) -> &str {
    if descriptor == LEGACY_COMMUNITY_SPACED {
        LEGACY_COMMUNITY
    } else {
        descriptor
    }
}

/// Check if a descriptor names a Community subscription.
pub fn is_community(descriptor: &str) -> bool {
    is_legacy_community_name(descriptor) || descriptor.ends_with(COMMUNITY_SUFFIX)
}

/// Check if a descriptor means "no subscription".
pub fn is_default(descriptor: &str) -> bool {
    descriptor.trim().is_empty() || descriptor == DEFAULT_BRANDING
}

/// Key used to look up the branding asset folder for a descriptor.
///
/// Community descriptors share one branding. Enterprise descriptors map to
/// their own folder, which may carry a region or flavor.
pub fn branding_key(descriptor: &str) -> &str {
    let descriptor = canonical(descriptor);
    if descriptor.contains(COMMUNITY_SUFFIX) {
        LEGACY_COMMUNITY
    } else if descriptor.trim().is_empty() {
        DEFAULT_BRANDING
    } else {
        descriptor
    }
}

/// Subscriber name embedded in a Community descriptor.
///
/// `"Foobar-Village-LC"` yields `"Foobar Village"`. Descriptors without an
/// `LC` part, or with nothing before it, yield an empty string.
pub fn personalization(descriptor: &str) -> String {
    let parts: Vec<&str> = descriptor.split('-').collect();
    match parts.iter().position(|part| *part == "LC") {
        Some(index) if index > 0 => parts[..index].join(" "),
        _ => String::new(),
    }
}
