//! Entitlement tiers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::descriptor;
use crate::error::CodeError;

/// Entitlement level unlocked by a subscription.
///
/// Tiers are ordered: a higher tier can use every feature of the lower ones.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum SubscriptionTier {
    /// No subscription; basic features only.
    #[default]
    None,
    /// Local Community subscription.
    Community,
    /// Full Enterprise subscription.
    Enterprise,
}

impl SubscriptionTier {
    /// Classify a descriptor.
    #[must_use]
    pub fn for_descriptor(descriptor: &str) -> Self {
        if descriptor::is_default(descriptor) {
            Self::None
        } else if descriptor::is_community(descriptor) {
            Self::Community
        } else {
            Self::Enterprise
        }
    }

    /// Check if this tier represents a paid subscription.
    #[must_use]
    pub fn is_subscribed(&self) -> bool {
        matches!(self, Self::Community | Self::Enterprise)
    }

    /// Name used in settings and UI messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Community => "Community",
            Self::Enterprise => "Enterprise",
        }
    }
}

impl fmt::Display for SubscriptionTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SubscriptionTier {
    type Err = CodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "None" => Ok(Self::None),
            "Community" => Ok(Self::Community),
            "Enterprise" => Ok(Self::Enterprise),
            other => Err(CodeError::UnknownTier { name: other.into() }),
        }
    }
}
