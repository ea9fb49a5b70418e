//! Shared fixtures: recording collaborators and light builders.

#![allow(dead_code)]

use glam::{Quat, Vec3, Vec4};

use character_shadow::errors::{CharShadowError, Result};
use character_shadow::renderer::graph::draw::{DrawRequest, DrawSubmitter};
use character_shadow::renderer::graph::target::{
    RenderTargetAllocator, RenderTargetDesc, TextureHandle,
};
use character_shadow::scene::SceneLightView;

pub const EPSILON: f32 = 1e-4;

pub fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

pub fn approx_vec3(a: Vec3, b: Vec3) -> bool {
    (a - b).length() < EPSILON
}

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Rotation whose `-Z` axis points along `direction`.
pub fn looking_along(direction: Vec3) -> Quat {
    Quat::from_rotation_arc(Vec3::NEG_Z, direction.normalize())
}

/// White spot light at `position` aimed straight at `target`.
pub fn spot_towards(
    position: Vec3,
    target: Vec3,
    intensity: f32,
    half_angle_deg: f32,
    range: f32,
) -> SceneLightView {
    SceneLightView::spot(
        position,
        looking_along(target - position),
        Vec3::ONE,
        intensity,
        half_angle_deg.to_radians(),
        range,
    )
}

pub fn white_sun(intensity: f32) -> SceneLightView {
    SceneLightView::directional(looking_along(Vec3::new(0.3, -1.0, -0.2)), Vec3::ONE, intensity)
}

// ---------------------------------------------------------------------------
// Recording collaborators
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct RecordingTargets {
    pub live: Vec<(TextureHandle, RenderTargetDesc)>,
    pub allocations: usize,
    pub releases: usize,
    next_id: u64,
    /// Requests above this edge length are refused.
    pub max_dimension: Option<u32>,
}

impl RenderTargetAllocator for RecordingTargets {
    fn allocate(&mut self, desc: &RenderTargetDesc) -> Result<TextureHandle> {
        if let Some(max) = self.max_dimension
            && (desc.width > max || desc.height > max)
        {
            return Err(CharShadowError::TargetAllocation {
                label: desc.label,
                width: desc.width,
                height: desc.height,
                reason: "too large".to_string(),
            });
        }
        let handle = TextureHandle(self.next_id);
        self.next_id += 1;
        self.allocations += 1;
        self.live.push((handle, *desc));
        Ok(handle)
    }

    fn release(&mut self, handle: TextureHandle) -> Result<()> {
        let index = self
            .live
            .iter()
            .position(|(h, _)| *h == handle)
            .ok_or(CharShadowError::UnknownTarget(handle))?;
        self.live.remove(index);
        self.releases += 1;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawEvent {
    PushGroup(String),
    PopGroup,
    SetTarget(TextureHandle, Vec4),
    Draw(DrawRequest),
}

#[derive(Debug, Default)]
pub struct RecordingDraw {
    pub events: Vec<DrawEvent>,
}

impl RecordingDraw {
    pub fn draw_requests(&self) -> Vec<DrawRequest> {
        self.events
            .iter()
            .filter_map(|e| match e {
                DrawEvent::Draw(r) => Some(*r),
                _ => None,
            })
            .collect()
    }
}

impl DrawSubmitter for RecordingDraw {
    fn set_render_target(&mut self, target: TextureHandle, clear_color: Vec4) {
        self.events.push(DrawEvent::SetTarget(target, clear_color));
    }

    fn draw_renderers(&mut self, request: &DrawRequest) {
        self.events.push(DrawEvent::Draw(*request));
    }

    fn push_debug_group(&mut self, label: &str) {
        self.events.push(DrawEvent::PushGroup(label.to_string()));
    }

    fn pop_debug_group(&mut self) {
        self.events.push(DrawEvent::PopGroup);
    }
}
