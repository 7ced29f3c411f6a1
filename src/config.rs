// SPDX-License-Identifier: GPL-3.0-only

use crate::backends::camera::types::Facing;
use crate::capture::EncodingQuality;
use cosmic::cosmic_config::{self, CosmicConfigEntry, cosmic_config_derive::CosmicConfigEntry};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, CosmicConfigEntry, Eq, PartialEq, Serialize, Deserialize)]
#[version = 1]
pub struct Config {
    /// Base URL of the submission endpoint (the upload path is appended)
    pub endpoint_url: String,
    /// Last selected camera facing direction
    pub facing: Facing,
    /// JPEG quality preset for captured stills
    pub photo_quality: EncodingQuality,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            // Not validated here; submission fails fast when left unset
            endpoint_url: String::new(),
            facing: Facing::default(),
            photo_quality: EncodingQuality::default(),
        }
    }
}

/// Load the config entry, falling back to defaults on partial errors
pub fn load(app_id: &str) -> (Option<cosmic_config::Config>, Config) {
    match cosmic_config::Config::new(app_id, Config::VERSION) {
        Ok(handler) => {
            let config = match Config::get_entry(&handler) {
                Ok(config) => config,
                Err((errors, config)) => {
                    tracing::error!(?errors, "Errors loading config");
                    config
                }
            };
            (Some(handler), config)
        }
        Err(err) => {
            tracing::error!(%err, "Failed to create config handler");
            (None, Config::default())
        }
    }
}
