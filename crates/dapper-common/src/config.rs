//! Session configuration model.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::types::ModeOverride;

/// Caller intent for one build-and-run session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Build definition file.
    pub file: PathBuf,
    /// Container engine executable, resolved through `PATH`.
    pub engine: String,
    /// Mode override applied on top of the image's preference.
    pub mode: ModeOverride,
    /// Force engine socket passthrough even if the image does not ask for it.
    pub socket: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            file: PathBuf::from(crate::constants::DEFAULT_FILE),
            engine: crate::constants::DEFAULT_ENGINE.to_string(),
            mode: ModeOverride::default(),
            socket: false,
        }
    }
}
