//! Animator Settings
//!
//! Startup configuration of a [`ViewerSession`](crate::session::ViewerSession).
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use glb_animator::settings::AnimatorSettings;
//! use glb_animator::motion::ProfileId;
//!
//! // Defaults: sample model, `rotate`, clips override every non-custom profile
//! let settings = AnimatorSettings::default();
//!
//! // Or from JSON; missing fields keep their defaults
//! let settings = AnimatorSettings::from_json_str(r#"{ "initial_profile": "walk" }"#)?;
//! assert_eq!(settings.initial_profile, ProfileId::Walk);
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::Result;
use crate::motion::{ClipPolicy, CustomParams, ProfileId};

pub const DEFAULT_MODEL_URI: &str = "/sample-model.glb";
pub const DEFAULT_MODEL_NAME: &str = "Sample Model";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimatorSettings {
    /// Model loaded by [`ViewerSession::start`](crate::session::ViewerSession::start).
    /// `None` starts with an empty viewport.
    pub initial_model_uri: Option<String>,

    /// Display name shown for the initial model.
    pub initial_model_name: String,

    pub initial_profile: ProfileId,

    /// Starting parameters of the `custom` profile. Clamped on load.
    pub custom_params: CustomParams,

    pub clip_policy: ClipPolicy,

    /// Directory that plain source paths are resolved against by the headless renderer.
    pub asset_root: Option<PathBuf>,
}

impl Default for AnimatorSettings {
    fn default() -> Self {
        Self {
            initial_model_uri: Some(DEFAULT_MODEL_URI.to_string()),
            initial_model_name: DEFAULT_MODEL_NAME.to_string(),
            initial_profile: ProfileId::Rotate,
            custom_params: CustomParams::default(),
            clip_policy: ClipPolicy::OverrideAll,
            asset_root: None,
        }
    }
}

impl AnimatorSettings {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let mut settings: Self = serde_json::from_str(json)?;
        settings.custom_params = settings.custom_params.clamped();
        Ok(settings)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        log::info!("Loading animator settings from {}", path.display());
        Self::from_json_str(&json)
    }
}
