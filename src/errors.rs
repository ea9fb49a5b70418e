//! Error Types
//!
//! This module defines the error types used by the character shadow subsystem.
//!
//! # Overview
//!
//! The main error type [`CharShadowError`] only covers real failures:
//! - Configuration assets that fail to decode or validate
//! - Render target allocation refused by the backend
//!
//! Missing data (no tracked target, no lights, no main light, out-of-range
//! camera) is never an error. Those states degrade to "no shadow caster this
//! frame" and are reported through
//! [`FeatureOutcome`](crate::renderer::graph::FeatureOutcome).
//!
//! # Usage
//!
//! ```rust,ignore
//! use character_shadow::errors::{CharShadowError, Result};
//!
//! fn load() -> Result<CharacterShadowConfig> {
//!     CharacterShadowConfig::from_json_str(include_str!("shadow.json"))
//! }
//! ```

use thiserror::Error;

use crate::renderer::graph::target::TextureHandle;

/// The main error type for the character shadow subsystem.
#[derive(Error, Debug)]
pub enum CharShadowError {
    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// The configuration asset decoded but holds inconsistent values.
    #[error("Invalid character shadow config: {0}")]
    InvalidConfig(String),

    /// The configuration asset could not be decoded.
    #[error("Config parse error: {0}")]
    ConfigParse(#[from] serde_json::Error),

    // ========================================================================
    // Render Target Errors
    // ========================================================================
    /// The render target backend refused an allocation.
    #[error("Failed to allocate render target '{label}' ({width}x{height}): {reason}")]
    TargetAllocation {
        /// Debug label of the requested target
        label: &'static str,
        /// Requested width in texels
        width: u32,
        /// Requested height in texels
        height: u32,
        /// Backend-provided reason
        reason: String,
    },

    /// A texture handle not owned by the allocator was used.
    #[error("Unknown render target handle: {0:?}")]
    UnknownTarget(TextureHandle),

    // ========================================================================
    // Pass Errors
    // ========================================================================
    /// A pass was recorded before its render targets were configured.
    #[error("Pass '{0}' recorded before configure")]
    PassNotConfigured(&'static str),
}

/// Alias for `Result<T, CharShadowError>`.
pub type Result<T> = std::result::Result<T, CharShadowError>;
