//! Per-frame light snapshot.
//!
//! [`FrameLights`] is rebuilt every frame from the host's visibility culling
//! result and is only ever read by the shadow core.

use glam::{Quat, Vec3};

/// Luminance weights used for ranking spot lights against each other.
///
/// These intentionally differ from [`LUMA_WEIGHTS`] in the red channel and do
/// not sum to one. Rankings tuned against them would shift if they changed.
pub const RANK_LUMA_WEIGHTS: Vec3 = Vec3::new(0.229, 0.587, 0.114);

/// Rec. 601 luma weights used when comparing the main light to a spot light.
pub const LUMA_WEIGHTS: Vec3 = Vec3::new(0.299, 0.587, 0.114);

/// Emission cone of a spot light.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpotCone {
    /// Half-angle of the cone, in radians.
    pub half_angle: f32,
    /// Distance at which the light's contribution reaches zero.
    pub range: f32,
}

/// Light type with its type-specific shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LightKind {
    /// Infinitely distant light; only its rotation matters.
    Directional,
    /// Cone light; the only kind the ranker considers.
    Spot(SpotCone),
    /// Omni light. Never casts the character shadow.
    Point {
        /// Distance at which the light's contribution reaches zero.
        range: f32,
    },
}

impl LightKind {
    #[inline]
    #[must_use]
    pub fn is_directional(&self) -> bool {
        matches!(self, Self::Directional)
    }
}

/// Read-only view of one visible light for the current frame.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneLightView {
    pub kind: LightKind,
    pub position: Vec3,
    pub rotation: Quat,
    /// Linear color, not premultiplied by intensity.
    pub color: Vec3,
    pub intensity: f32,
    /// Scene layer the light's node lives on (0..32).
    pub layer: u32,
    /// Position in the frame's visible-light list. Assigned by [`FrameLights`].
    pub index: usize,
}

impl SceneLightView {
    #[must_use]
    pub fn directional(rotation: Quat, color: Vec3, intensity: f32) -> Self {
        Self {
            kind: LightKind::Directional,
            position: Vec3::ZERO,
            rotation,
            color,
            intensity,
            layer: 0,
            index: 0,
        }
    }

    #[must_use]
    pub fn spot(
        position: Vec3,
        rotation: Quat,
        color: Vec3,
        intensity: f32,
        half_angle: f32,
        range: f32,
    ) -> Self {
        Self {
            kind: LightKind::Spot(SpotCone { half_angle, range }),
            position,
            rotation,
            color,
            intensity,
            layer: 0,
            index: 0,
        }
    }

    #[must_use]
    pub fn point(position: Vec3, color: Vec3, intensity: f32, range: f32) -> Self {
        Self {
            kind: LightKind::Point { range },
            position,
            rotation: Quat::IDENTITY,
            color,
            intensity,
            layer: 0,
            index: 0,
        }
    }

    #[must_use]
    pub fn with_layer(mut self, layer: u32) -> Self {
        self.layer = layer;
        self
    }

    /// World-space direction the light shines along (`rotation * -Z`).
    #[inline]
    #[must_use]
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::NEG_Z
    }

    /// Color scaled by intensity.
    #[inline]
    #[must_use]
    pub fn final_color(&self) -> Vec3 {
        self.color * self.intensity
    }

    #[inline]
    #[must_use]
    pub fn luminance(&self) -> f32 {
        self.final_color().dot(LUMA_WEIGHTS)
    }

    #[inline]
    #[must_use]
    pub fn rank_luminance(&self) -> f32 {
        self.final_color().dot(RANK_LUMA_WEIGHTS)
    }
}

/// Visible lights for one frame plus the host's main-light choice.
#[derive(Debug, Clone, Default)]
pub struct FrameLights {
    lights: Vec<SceneLightView>,
    main_light_index: Option<usize>,
}

impl FrameLights {
    /// Builds the snapshot, assigning each light its visible index.
    ///
    /// Hosts are expected to list directional lights first. The ranker does
    /// not depend on that ordering, but a violation is reported since the
    /// per-light data arrays on the GPU side do.
    #[must_use]
    pub fn new(mut lights: Vec<SceneLightView>, main_light_index: Option<usize>) -> Self {
        for (index, light) in lights.iter_mut().enumerate() {
            light.index = index;
        }

        let first_non_directional = lights
            .iter()
            .position(|l| !l.kind.is_directional())
            .unwrap_or(lights.len());
        if lights[first_non_directional..]
            .iter()
            .any(|l| l.kind.is_directional())
        {
            log::warn!("Visible lights are not sorted directional-first");
        }

        let main_light_index = main_light_index.filter(|&i| i < lights.len());

        Self {
            lights,
            main_light_index,
        }
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.lights.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lights.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&SceneLightView> {
        self.lights.get(index)
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, SceneLightView> {
        self.lights.iter()
    }

    #[inline]
    #[must_use]
    pub fn main_light_index(&self) -> Option<usize> {
        self.main_light_index
    }

    /// The main light, if the host chose one and it is directional.
    #[must_use]
    pub fn main_light(&self) -> Option<&SceneLightView> {
        self.main_light_index
            .and_then(|i| self.lights.get(i))
            .filter(|l| l.kind.is_directional())
    }

    /// Index into the per-light data array, which excludes the main light.
    #[must_use]
    pub fn additional_light_index(&self, visible_index: usize) -> Option<usize> {
        if visible_index >= self.lights.len() || Some(visible_index) == self.main_light_index {
            return None;
        }
        match self.main_light_index {
            Some(main) if main < visible_index => Some(visible_index - 1),
            _ => Some(visible_index),
        }
    }
}

impl<'a> IntoIterator for &'a FrameLights {
    type Item = &'a SceneLightView;
    type IntoIter = std::slice::Iter<'a, SceneLightView>;

    fn into_iter(self) -> Self::IntoIter {
        self.lights.iter()
    }
}
