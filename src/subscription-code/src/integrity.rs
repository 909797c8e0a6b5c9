//! Coarse validation state of a code, for UI display.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::checksum::is_checksum_correct;
use crate::code::{looks_incomplete, ParsedCode};
use crate::error::CodeError;

/// Summary of how far a code got through validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntegrityLabel {
    /// No code entered.
    None,
    /// Probably still being typed.
    Incomplete,
    /// Complete but the checksum does not match.
    Invalid,
    /// Checksum verified.
    Ok,
}

impl IntegrityLabel {
    /// Classify a code.
    ///
    /// Incompleteness is checked before the checksum so that a code the user
    /// is still typing is not reported as invalid.
    pub fn classify(code: Option<&str>, parsed: &ParsedCode) -> Self {
        match code {
            None => Self::None,
            Some(code) if code.trim().is_empty() => Self::None,
            Some(code) if looks_incomplete(Some(code)) => Self::Incomplete,
            Some(_) if !is_checksum_correct(parsed) => Self::Invalid,
            Some(_) => Self::Ok,
        }
    }

    /// Label string as consumed by the UI.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Incomplete => "incomplete",
            Self::Invalid => "invalid",
            Self::Ok => "ok",
        }
    }
}

impl fmt::Display for IntegrityLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IntegrityLabel {
    type Err = CodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(Self::None),
            "incomplete" => Ok(Self::Incomplete),
            "invalid" => Ok(Self::Invalid),
            "ok" => Ok(Self::Ok),
            other => Err(CodeError::UnknownLabel { name: other.into() }),
        }
    }
}
