//! Domain primitive types used across the Dapper workspace.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DapperError;

/// Tag assigned to the image built from a definition file.
///
/// Usually `<directory>:<branch>`; the part before the first `:` names
/// the ephemeral containers started from it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImageTag(String);

impl ImageTag {
    /// Creates a tag from a string value.
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    /// Returns the tag up to its first `:`, or the whole tag.
    #[must_use]
    pub fn prefix(&self) -> &str {
        self.0.split(':').next().unwrap_or(&self.0)
    }

    /// Returns the inner string representation.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ImageTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Resolved run mode of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunMode {
    /// The host workspace is bind-mounted live into the container.
    Bind,
    /// The workspace is baked into a derived image before running.
    Copy,
}

impl RunMode {
    /// Interprets a mode value read from image metadata.
    ///
    /// Only `bind` selects bind mode; every other value means copy.
    #[must_use]
    pub fn from_descriptor(value: &str) -> Self {
        if value.trim() == "bind" {
            Self::Bind
        } else {
            Self::Copy
        }
    }
}

impl fmt::Display for RunMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bind => write!(f, "bind"),
            Self::Copy => write!(f, "cp"),
        }
    }
}

/// Caller-selected mode, applied on top of the image's own preference.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModeOverride {
    /// Defer to the image's `DAPPER_MODE`, falling back to bind.
    #[default]
    Auto,
    /// Force bind mode.
    Bind,
    /// Force copy mode.
    Copy,
}

impl ModeOverride {
    /// Returns the forced mode, if any.
    #[must_use]
    pub const fn forced(self) -> Option<RunMode> {
        match self {
            Self::Auto => None,
            Self::Bind => Some(RunMode::Bind),
            Self::Copy => Some(RunMode::Copy),
        }
    }
}

impl FromStr for ModeOverride {
    type Err = DapperError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" | "auto" => Ok(Self::Auto),
            "bind" => Ok(Self::Bind),
            "cp" | "copy" => Ok(Self::Copy),
            other => Err(DapperError::Config {
                message: format!("unknown mode '{other}' (expected auto, bind or cp)"),
            }),
        }
    }
}

impl fmt::Display for ModeOverride {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auto => write!(f, "auto"),
            Self::Bind => write!(f, "bind"),
            Self::Copy => write!(f, "cp"),
        }
    }
}
