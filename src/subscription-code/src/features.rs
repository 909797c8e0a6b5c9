//! Feature gating by subscription tier.
//!
//! A static registry maps each gated feature to the lowest tier that unlocks
//! it. Tiers are ordered, so any higher tier unlocks it too.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CodeError;
use crate::subscription::Subscription;
use crate::tier::SubscriptionTier;

/// Features whose availability depends on the subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FeatureName {
    /// Ordinary page; always available.
    BasicPage,
    /// Deleting a book; always available.
    DeleteBook,
    /// Canvas elements (formerly overlays).
    Canvas,
    /// Game pages that are not HTML5 widgets.
    Game,
    /// HTML5 widget pages.
    Widget,
    /// Motion book playback.
    Motion,
    /// Background music.
    Music,
    /// Full-bleed front cover image.
    FullPageCoverImage,
    /// Audio recorded for a whole text box.
    WholeTextBoxAudio,
    /// EPUB export.
    ExportEpub,
    /// Audio/video export.
    ExportAudioVideo,
    /// Spreadsheet import/export.
    Spreadsheet,
    /// Shared team collections.
    TeamCollection,
    /// Book history view.
    ViewBookHistory,
    /// Print-shop ready PDFs.
    PrintShopReady,
    /// Bulk upload to the library.
    BulkUpload,
    /// Bulk BloomPUB publishing.
    BulkBloomPub,
    /// Bookshelf assignment.
    Bookshelf,
}

/// Registry entry for a feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureInfo {
    /// The feature.
    pub feature: FeatureName,
    /// Lowest tier that unlocks it.
    pub required_tier: SubscriptionTier,
}

const fn entry(feature: FeatureName, required_tier: SubscriptionTier) -> FeatureInfo {
    FeatureInfo {
        feature,
        required_tier,
    }
}

/// Every gated feature and the tier it needs.
pub const FEATURES: &[FeatureInfo] = &[
    // Free
    entry(FeatureName::BasicPage, SubscriptionTier::None),
    entry(FeatureName::DeleteBook, SubscriptionTier::None),
    // Community and up
    entry(FeatureName::Canvas, SubscriptionTier::Community),
    entry(FeatureName::Game, SubscriptionTier::Community),
    entry(FeatureName::Widget, SubscriptionTier::Community),
    entry(FeatureName::Motion, SubscriptionTier::Community),
    entry(FeatureName::Music, SubscriptionTier::Community),
    entry(FeatureName::FullPageCoverImage, SubscriptionTier::Community),
    entry(FeatureName::WholeTextBoxAudio, SubscriptionTier::Community),
    entry(FeatureName::ExportEpub, SubscriptionTier::Community),
    entry(FeatureName::ExportAudioVideo, SubscriptionTier::Community),
    entry(FeatureName::Spreadsheet, SubscriptionTier::Community),
    entry(FeatureName::TeamCollection, SubscriptionTier::Community),
    entry(FeatureName::ViewBookHistory, SubscriptionTier::Community),
    // Enterprise only
    entry(FeatureName::PrintShopReady, SubscriptionTier::Enterprise),
    entry(FeatureName::BulkUpload, SubscriptionTier::Enterprise),
    entry(FeatureName::BulkBloomPub, SubscriptionTier::Enterprise),
    entry(FeatureName::Bookshelf, SubscriptionTier::Enterprise),
];

impl FeatureName {
    /// Registry entry for this feature.
    pub fn info(&self) -> FeatureInfo {
        FEATURES
            .iter()
            .copied()
            .find(|info| info.feature == *self)
            .unwrap_or(entry(*self, SubscriptionTier::Enterprise))
    }

    /// Lowest tier that unlocks this feature.
    pub fn required_tier(&self) -> SubscriptionTier {
        self.info().required_tier
    }

    fn name(&self) -> &'static str {
        match self {
            Self::BasicPage => "BasicPage",
            Self::DeleteBook => "DeleteBook",
            Self::Canvas => "Canvas",
            Self::Game => "Game",
            Self::Widget => "Widget",
            Self::Motion => "Motion",
            Self::Music => "Music",
            Self::FullPageCoverImage => "FullPageCoverImage",
            Self::WholeTextBoxAudio => "WholeTextBoxAudio",
            Self::ExportEpub => "ExportEpub",
            Self::ExportAudioVideo => "ExportAudioVideo",
            Self::Spreadsheet => "Spreadsheet",
            Self::TeamCollection => "TeamCollection",
            Self::ViewBookHistory => "ViewBookHistory",
            Self::PrintShopReady => "PrintShopReady",
            Self::BulkUpload => "BulkUpload",
            Self::BulkBloomPub => "BulkBloomPub",
            Self::Bookshelf => "Bookshelf",
        }
    }
}

impl fmt::Display for FeatureName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FeatureName {
    type Err = CodeError;

    /// Case-insensitive, as names arrive from the UI layer.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FEATURES
            .iter()
            .map(|info| info.feature)
            .find(|feature| feature.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| CodeError::UnknownFeature { name: s.into() })
    }
}

/// Availability of a feature under a particular subscription.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureStatus {
    /// The feature.
    pub feature: FeatureName,
    /// Lowest tier that unlocks it (not the subscription's tier).
    pub required_tier: SubscriptionTier,
    /// Whether the subscription unlocks it.
    pub enabled: bool,
    /// Whether the UI should show it at all.
    pub visible: bool,
}

/// Availability of `feature` under `subscription`.
///
/// Only the tier is consulted; callers that care about expiry check
/// [`Subscription::is_expired`] themselves.
pub fn feature_status(subscription: &Subscription, feature: FeatureName) -> FeatureStatus {
    let required_tier = feature.required_tier();
    FeatureStatus {
        feature,
        required_tier,
        enabled: subscription.tier() >= required_tier,
        visible: true,
    }
}

/// Features `subscription` does not unlock.
pub fn disabled_features(subscription: &Subscription) -> Vec<FeatureName> {
    FEATURES
        .iter()
        .filter(|info| subscription.tier() < info.required_tier)
        .map(|info| info.feature)
        .collect()
}
