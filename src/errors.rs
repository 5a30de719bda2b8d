//! Error Types
//!
//! This module defines the error types used throughout the animator.
//!
//! # Overview
//!
//! The main error type [`AnimatorError`] covers all failure modes including:
//! - Rejected files at ingestion (wrong extension or container signature)
//! - Decode failures reported by the scene renderer
//! - Configuration parsing errors
//! - Operations attempted on a session that has been torn down
//!
//! Releasing an already released temporary handle is deliberately absent from
//! this list: it is a logged no-op so that teardown stays idempotent.
//!
//! # Usage
//!
//! All public APIs return [`Result<T>`] which is an alias for `std::result::Result<T, AnimatorError>`.
//!
//! ```rust,ignore
//! use glb_animator::errors::{AnimatorError, Result};
//!
//! fn accept(file: &LocalFile) -> Result<()> {
//!     glb_animator::assets::validate_glb(file)?;
//!     Ok(())
//! }
//! ```

use thiserror::Error;

/// The main error type for the animator.
#[derive(Error, Debug)]
pub enum AnimatorError {
    // ========================================================================
    // Asset Ingestion & Decoding Errors
    // ========================================================================
    /// The user supplied file is not a binary glTF container.
    ///
    /// Surfaced to the user; the previously loaded asset stays live.
    #[error("Invalid asset '{file_name}': {reason}")]
    InvalidAsset {
        /// Name of the rejected file
        file_name: String,
        /// Why the file was rejected
        reason: String,
    },

    /// The renderer failed to parse a structurally valid container.
    #[error("Decode error: {0}")]
    Decode(String),

    /// glTF parsing error.
    #[error("glTF error: {0}")]
    Gltf(String),

    // ========================================================================
    // I/O & Configuration Errors
    // ========================================================================
    /// File I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parse error.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    // ========================================================================
    // Session Errors
    // ========================================================================
    /// A profile id outside the built-in catalogue.
    #[error("Unknown motion profile: {0}")]
    UnknownProfile(String),

    /// A custom-profile parameter name outside the known set.
    #[error("Unknown custom parameter: {0}")]
    UnknownParameter(String),

    /// The session was torn down and accepts no further loads.
    #[error("Viewer session has been torn down")]
    SessionSuspended,
}

impl AnimatorError {
    /// Returns `true` for failures that happened while decoding a container,
    /// as opposed to rejecting it up front.
    #[must_use]
    pub fn is_decode_failure(&self) -> bool {
        matches!(self, Self::Decode(_) | Self::Gltf(_) | Self::Io(_))
    }
}

impl From<gltf::Error> for AnimatorError {
    fn from(err: gltf::Error) -> Self {
        AnimatorError::Gltf(err.to_string())
    }
}

/// Alias for `Result<T, AnimatorError>`.
pub type Result<T> = std::result::Result<T, AnimatorError>;
