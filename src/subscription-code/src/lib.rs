//! # subscription-code
//!
//! Offline validation of human-typed subscription codes. A code such as
//! `PNG-RISE-361769-2630` is turned into a [`Subscription`]: descriptor,
//! entitlement tier, expiration date and a display-safe redacted form.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      Subscription                            │
//! │                                                              │
//! │  raw code ──► ParsedCode (descriptor, date, checksum)        │
//! │                   │                                          │
//! │       ┌───────────┼──────────────┬──────────────┐            │
//! │       ▼           ▼              ▼              ▼            │
//! │  ┌─────────┐ ┌──────────┐ ┌────────────┐ ┌────────────┐     │
//! │  │  Tier   │ │ Checksum │ │ Expiration │ │ Integrity  │     │
//! │  │(descr.) │ │ (weak)   │ │ (serial)   │ │  label     │     │
//! │  └─────────┘ └──────────┘ └────────────┘ └────────────┘     │
//! │                                                              │
//! │  redacted code, branding key, feature status                 │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Properties
//!
//! - **Never fails**: malformed input degrades to sentinels (empty
//!   descriptor, zero fields, [`ExpirationDate::Invalid`], tier `None`).
//! - **Pure**: no I/O, no shared state; safe to call on every keystroke
//!   from any thread.
//! - **Not tamper-proof**: the checksum only catches typos and casual edits.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)] // Allow Type in module::Type
#![allow(clippy::must_use_candidate)] // Not all functions need must_use

pub mod checksum;
pub mod code;
pub mod config;
pub mod descriptor;
pub mod error;
pub mod expiration;
pub mod features;
pub mod integrity;
pub mod issue;
pub mod subscription;
pub mod tier;

pub use code::{looks_incomplete, ParsedCode};
pub use config::{SubscriptionConfig, SubscriptionSettings};
pub use error::CodeError;
pub use expiration::ExpirationDate;
pub use features::{feature_status, FeatureName, FeatureStatus};
pub use integrity::IntegrityLabel;
pub use issue::issue_code;
pub use subscription::{Subscription, SubscriptionSummary};
pub use tier::SubscriptionTier;
