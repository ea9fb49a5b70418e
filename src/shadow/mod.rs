//! Shadow Algorithms
//!
//! Pure, per-frame decision logic with no GPU access:
//!
//! - [`ranker`]: spot light ranking against the tracked character
//! - [`resolve`]: main light vs. ranked spot light
//! - [`camera`]: shadow camera framing
//! - [`cascade`]: distance-based resolution tiers
//!
//! [`ShadowContext`] bundles the state these keep across frames so that the
//! orchestrator can pass it explicitly instead of reaching for globals.

pub mod camera;
pub mod cascade;
pub mod ranker;
pub mod resolve;

use glam::Vec3;

use crate::scene::target::TargetTransform;

pub use camera::{ShadowCameraController, ShadowCameraSettings, ShadowCameraState, ShadowProjection};
pub use cascade::{CascadeScale, CascadeSplit};
pub use ranker::{LightRanker, LightSelection};
pub use resolve::CasterResolution;

/// Cameras at or beyond this distance from the character skip the shadow.
pub const CHAR_SHADOW_CULLING_DISTANCE: f32 = 18.0;

/// Persistent per-subsystem state: ranking scratch space and the shadow camera.
#[derive(Debug, Default)]
pub struct ShadowContext {
    pub ranker: LightRanker,
    pub camera: ShadowCameraController,
}

impl ShadowContext {
    #[must_use]
    pub fn new(camera_settings: ShadowCameraSettings) -> Self {
        Self {
            ranker: LightRanker::new(),
            camera: ShadowCameraController::new(camera_settings),
        }
    }
}

/// Whether a camera at `camera_position` is close enough to `target` to need
/// a character shadow update.
#[must_use]
pub fn is_update_needed(camera_position: Vec3, target: Option<&TargetTransform>) -> bool {
    target.is_some_and(|t| camera_position.distance(t.position) < CHAR_SHADOW_CULLING_DISTANCE)
}
