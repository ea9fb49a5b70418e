//! Shadow Camera Framing
//!
//! The shadow camera looks along the cast light's direction at the tracked
//! character from a fixed distance. Only yaw and pitch of the light are kept;
//! roll is pinned to zero so the shadow map does not spin with the light.

use glam::{EulerRot, Mat4, Quat, Vec3};

use crate::scene::light::SceneLightView;
use crate::scene::target::TargetTransform;

/// Projection used by the shadow camera.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShadowProjection {
    Orthographic { half_extent: f32, near: f32, far: f32 },
    Perspective { fov_y: f32, near: f32, far: f32 },
}

impl Default for ShadowProjection {
    fn default() -> Self {
        Self::Orthographic {
            half_extent: 1.5,
            near: 0.1,
            far: 10.0,
        }
    }
}

impl ShadowProjection {
    /// Square projection; the shadow targets are always square.
    #[must_use]
    pub fn matrix(&self) -> Mat4 {
        match *self {
            Self::Orthographic {
                half_extent,
                near,
                far,
            } => Mat4::orthographic_rh(
                -half_extent,
                half_extent,
                -half_extent,
                half_extent,
                near,
                far,
            ),
            Self::Perspective { fov_y, near, far } => Mat4::perspective_rh(fov_y, 1.0, near, far),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShadowCameraSettings {
    /// Distance from the target back along the light direction.
    pub distance: f32,
    /// Vertical offset applied to the target position.
    pub height_offset: f32,
    pub projection: ShadowProjection,
}

impl Default for ShadowCameraSettings {
    fn default() -> Self {
        Self {
            distance: 4.0,
            height_offset: 0.0,
            projection: ShadowProjection::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShadowCameraState {
    pub rotation: Quat,
    pub position: Vec3,
    pub view_matrix: Mat4,
    pub projection_matrix: Mat4,
}

impl ShadowCameraState {
    fn new(rotation: Quat, position: Vec3, projection_matrix: Mat4) -> Self {
        let view_matrix = Mat4::from_rotation_translation(rotation, position).inverse();
        Self {
            rotation,
            position,
            view_matrix,
            projection_matrix,
        }
    }

    #[inline]
    #[must_use]
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::NEG_Z
    }

    #[inline]
    #[must_use]
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix * self.view_matrix
    }
}

/// Drops the roll component of `rotation`, keeping yaw and pitch.
#[must_use]
pub fn strip_roll(rotation: Quat) -> Quat {
    let (yaw, pitch, _roll) = rotation.to_euler(EulerRot::YXZ);
    Quat::from_euler(EulerRot::YXZ, yaw, pitch, 0.0)
}

/// Frames `target` from a light with `light_rotation`.
///
/// A missing target frames the world origin.
#[must_use]
pub fn frame_target(
    light_rotation: Quat,
    target: Option<&TargetTransform>,
    distance: f32,
    height_offset: f32,
    projection: &ShadowProjection,
) -> ShadowCameraState {
    let rotation = strip_roll(light_rotation);
    let forward = rotation * Vec3::NEG_Z;
    let anchor = target.map_or(Vec3::ZERO, |t| t.position);
    let position = anchor + Vec3::Y * height_offset - forward * distance;

    ShadowCameraState::new(rotation, position, projection.matrix())
}

/// Owns the single shadow camera transform, persisted across frames.
#[derive(Debug, Clone)]
pub struct ShadowCameraController {
    settings: ShadowCameraSettings,
    state: ShadowCameraState,
}

impl ShadowCameraController {
    #[must_use]
    pub fn new(settings: ShadowCameraSettings) -> Self {
        let state = frame_target(
            Quat::IDENTITY,
            None,
            settings.distance,
            settings.height_offset,
            &settings.projection,
        );
        Self { settings, state }
    }

    #[inline]
    #[must_use]
    pub fn settings(&self) -> &ShadowCameraSettings {
        &self.settings
    }

    pub fn set_settings(&mut self, settings: ShadowCameraSettings) {
        self.settings = settings;
        self.state.projection_matrix = settings.projection.matrix();
    }

    /// Last framed state. Stays put on frames without a cast light.
    #[inline]
    #[must_use]
    pub fn state(&self) -> &ShadowCameraState {
        &self.state
    }

    /// Re-aims the camera at `target` from `light`.
    pub fn aim_at(
        &mut self,
        light: &SceneLightView,
        target: Option<&TargetTransform>,
    ) -> &ShadowCameraState {
        self.state = frame_target(
            light.rotation,
            target,
            self.settings.distance,
            self.settings.height_offset,
            &self.settings.projection,
        );
        &self.state
    }
}

impl Default for ShadowCameraController {
    fn default() -> Self {
        Self::new(ShadowCameraSettings::default())
    }
}
