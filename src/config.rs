//! Character Shadow Configuration
//!
//! Flat, data-driven options consumed once per frame by the shadow passes.
//! The asset is a JSON object with camelCase keys; every key is optional and
//! falls back to the defaults below.
//!
//! # Example
//!
//! ```rust,ignore
//! let config = CharacterShadowConfig::from_json_str(r#"{
//!     "enableTransparentShadow": true,
//!     "followLayerMask": 256,
//!     "textureScale": "X2",
//!     "cascadeSplit": [3.5, 7.0, 11.0, 22.0]
//! }"#)?;
//! ```
//!
//! | Key                          | Default                 |
//! |------------------------------|-------------------------|
//! | `enableTransparentShadow`    | `false`                 |
//! | `useBrightestLight`          | `true`                  |
//! | `followLayerMask`            | `0` (no follow layer)   |
//! | `bias` / `normalBias`        | `0.001`                 |
//! | `stepSmoothness`             | `0.0001`                |
//! | `textureScale`               | `X4`                    |
//! | `transparentTextureScale`    | `X2`                    |
//! | `precision`                  | `RFloat`                |
//! | `softShadowMode`             | `Normal`                |
//! | `highSoftShadowBlurDistance` | `4.0`                   |
//! | `cascadeSplit`               | `[3.5, 7.0, 11.0, 22.0]`|

use serde::{Deserialize, Serialize};

use crate::errors::{CharShadowError, Result};
use crate::shadow::cascade::CascadeSplit;

/// Base edge length of the shadow targets before the tier multiplier.
pub const BASE_SHADOW_MAP_RESOLUTION: u32 = 1024;

// ---------------------------------------------------------------------------
// Enumerated options
// ---------------------------------------------------------------------------

/// Resolution tier applied on top of [`BASE_SHADOW_MAP_RESOLUTION`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ShadowMapScale {
    X1,
    X2,
    #[default]
    X4,
    X8,
}

impl ShadowMapScale {
    #[inline]
    #[must_use]
    pub const fn factor(self) -> u32 {
        match self {
            Self::X1 => 1,
            Self::X2 => 2,
            Self::X4 => 4,
            Self::X8 => 8,
        }
    }

    /// Edge length in texels of a square target at this tier.
    #[inline]
    #[must_use]
    pub const fn resolution(self) -> u32 {
        BASE_SHADOW_MAP_RESOLUTION * self.factor()
    }
}

/// Single-channel float precision of the shadow buffers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ShadowMapPrecision {
    #[default]
    RFloat,
    RHalf,
}

impl ShadowMapPrecision {
    #[inline]
    #[must_use]
    pub const fn texture_format(self) -> wgpu::TextureFormat {
        match self {
            Self::RFloat => wgpu::TextureFormat::R32Float,
            Self::RHalf => wgpu::TextureFormat::R16Float,
        }
    }
}

/// Soft shadow filtering quality; `High` enables the wide-blur shader feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SoftShadowMode {
    #[default]
    Normal,
    High,
}

/// Bitmask selecting the light layer treated as the character's key light.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayerMask(pub u32);

impl LayerMask {
    /// Returns the layer index encoded by the mask.
    ///
    /// Only one bit is expected to be set. With several bits the highest one
    /// wins (floor of log2). An empty mask selects no layer.
    #[inline]
    #[must_use]
    pub const fn layer(self) -> Option<u32> {
        if self.0 == 0 {
            None
        } else {
            Some(31 - self.0.leading_zeros())
        }
    }

    /// Mask with only `layer` set. Layers outside `0..32` give an empty mask.
    #[inline]
    #[must_use]
    pub const fn from_layer(layer: u32) -> Self {
        match 1u32.checked_shl(layer) {
            Some(bits) => Self(bits),
            None => Self(0),
        }
    }
}

// ---------------------------------------------------------------------------
// CharacterShadowConfig
// ---------------------------------------------------------------------------

/// Options read by both shadow passes every frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CharacterShadowConfig {
    /// Render the transparent (cloth) shadow and alpha-sum buffers.
    pub enable_transparent_shadow: bool,
    /// Compare the main light against the best spot light and cast from the
    /// brighter one. Only honoured in [`RenderingMode::ForwardPlus`].
    ///
    /// [`RenderingMode::ForwardPlus`]: crate::renderer::graph::RenderingMode::ForwardPlus
    pub use_brightest_light: bool,
    pub follow_layer_mask: LayerMask,
    pub bias: f32,
    pub normal_bias: f32,
    pub step_smoothness: f32,
    pub texture_scale: ShadowMapScale,
    pub transparent_texture_scale: ShadowMapScale,
    pub precision: ShadowMapPrecision,
    pub soft_shadow_mode: SoftShadowMode,
    pub high_soft_shadow_blur_distance: f32,
    pub cascade_split: CascadeSplit,
}

impl Default for CharacterShadowConfig {
    fn default() -> Self {
        Self {
            enable_transparent_shadow: false,
            use_brightest_light: true,
            follow_layer_mask: LayerMask::default(),
            bias: 0.001,
            normal_bias: 0.001,
            step_smoothness: 0.0001,
            texture_scale: ShadowMapScale::X4,
            transparent_texture_scale: ShadowMapScale::X2,
            precision: ShadowMapPrecision::RFloat,
            soft_shadow_mode: SoftShadowMode::Normal,
            high_soft_shadow_blur_distance: 4.0,
            cascade_split: CascadeSplit::default(),
        }
    }
}

impl CharacterShadowConfig {
    /// Decodes and validates a JSON configuration asset.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the invariants the passes rely on.
    pub fn validate(&self) -> Result<()> {
        let scalars = [
            ("bias", self.bias),
            ("normalBias", self.normal_bias),
            ("stepSmoothness", self.step_smoothness),
            ("highSoftShadowBlurDistance", self.high_soft_shadow_blur_distance),
        ];
        for (name, value) in scalars {
            if !value.is_finite() {
                return Err(CharShadowError::InvalidConfig(format!(
                    "{name} must be finite, got {value}"
                )));
            }
        }

        self.cascade_split.validate()
    }

    /// Layer index preferred for follow lighting, if any.
    #[inline]
    #[must_use]
    pub fn follow_layer(&self) -> Option<u32> {
        self.follow_layer_mask.layer()
    }
}
