//! Distance-Based Resolution Tiers
//!
//! A coarse, cascade-like LOD: the camera-to-character distance picks one of
//! four resolution scales. There are no per-band matrices; only the scale and
//! the far distance are handed to the shaders.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::errors::{CharShadowError, Result};

/// Scale returned for the farthest band and when nothing is tracked.
pub const MIN_RESOLUTION_SCALE: f32 = 0.125;

const BAND_SCALES: [f32; 3] = [1.0, 0.5, 0.25];

/// Four strictly ascending distance thresholds; the last is the cull distance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CascadeSplit(pub [f32; 4]);

impl Default for CascadeSplit {
    fn default() -> Self {
        Self([3.5, 7.0, 11.0, 22.0])
    }
}

impl CascadeSplit {
    pub fn validate(&self) -> Result<()> {
        let bands = self.0;
        if bands.iter().any(|d| !d.is_finite() || *d <= 0.0) {
            return Err(CharShadowError::InvalidConfig(format!(
                "cascadeSplit must be positive and finite, got {bands:?}"
            )));
        }
        if bands.windows(2).any(|w| w[0] >= w[1]) {
            return Err(CharShadowError::InvalidConfig(format!(
                "cascadeSplit must be strictly ascending, got {bands:?}"
            )));
        }
        Ok(())
    }

    #[inline]
    #[must_use]
    pub fn max_distance(&self) -> f32 {
        self.0[3]
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CascadeScale {
    pub resolution_scale: f32,
    pub max_cull_distance: f32,
}

/// Resolution scale for a camera-to-target distance.
///
/// `None` means there is no valid target and yields the smallest scale.
#[must_use]
pub fn scale_for(distance: Option<f32>, split: &CascadeSplit) -> CascadeScale {
    let resolution_scale = distance.map_or(MIN_RESOLUTION_SCALE, |d| {
        split.0[..3]
            .iter()
            .zip(BAND_SCALES)
            .find(|(threshold, _)| d < **threshold)
            .map_or(MIN_RESOLUTION_SCALE, |(_, scale)| scale)
    });

    CascadeScale {
        resolution_scale,
        max_cull_distance: split.max_distance(),
    }
}

/// [`scale_for`] measured from `camera_position` to an optional target.
#[must_use]
pub fn scale_for_target(
    camera_position: Vec3,
    target_position: Option<Vec3>,
    split: &CascadeSplit,
) -> CascadeScale {
    scale_for(target_position.map(|p| camera_position.distance(p)), split)
}
