//! Frame and Backend Contexts
//!
//! - [`FrameContext`]: read-only per-frame snapshot handed to every phase
//!   (lights, output camera, tracked target, rendering mode).
//! - [`RenderBackend`]: the host collaborators the passes write through
//!   (render target allocation, global shader state, draw submission).
//!
//! Both store plain references so that the borrow checker can split access
//! across disjoint collaborators within one call.

use crate::renderer::graph::draw::DrawSubmitter;
use crate::renderer::graph::globals::GlobalStateSink;
use crate::renderer::graph::target::RenderTargetAllocator;
use crate::scene::camera::OutputCamera;
use crate::scene::light::FrameLights;
use crate::scene::target::TargetTransform;

/// Lighting path of the host renderer.
///
/// Defaults to [`RenderingMode::ForwardPlus`], the path the character shadow
/// is authored for. Hosts on another path opt out with
/// [`FrameContext::with_rendering_mode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderingMode {
    /// Plain forward; the main light is the only shadowed light.
    Forward,
    /// Clustered forward; the only path with additional-light shadows.
    #[default]
    ForwardPlus,
    /// Deferred shading; additional-light shadows are unavailable.
    Deferred,
}

impl RenderingMode {
    #[inline]
    #[must_use]
    pub fn supports_additional_shadows(self) -> bool {
        matches!(self, Self::ForwardPlus)
    }
}

/// Read-only inputs for one output camera in one frame.
#[derive(Debug, Clone, Copy)]
pub struct FrameContext<'a> {
    pub lights: &'a FrameLights,
    pub camera: &'a OutputCamera,
    pub target: Option<&'a TargetTransform>,
    pub rendering_mode: RenderingMode,
}

impl<'a> FrameContext<'a> {
    #[must_use]
    pub fn new(
        lights: &'a FrameLights,
        camera: &'a OutputCamera,
        target: Option<&'a TargetTransform>,
    ) -> Self {
        Self {
            lights,
            camera,
            target,
            rendering_mode: RenderingMode::default(),
        }
    }

    #[must_use]
    pub fn with_rendering_mode(mut self, mode: RenderingMode) -> Self {
        self.rendering_mode = mode;
        self
    }

    /// Distance from the output camera to the tracked target.
    #[must_use]
    pub fn target_distance(&self) -> Option<f32> {
        self.target
            .map(|t| self.camera.position.distance(t.position))
    }
}

/// Host collaborators written through by the passes.
pub struct RenderBackend<'a> {
    pub targets: &'a mut dyn RenderTargetAllocator,
    pub globals: &'a mut dyn GlobalStateSink,
    pub draw: &'a mut dyn DrawSubmitter,
}

impl<'a> RenderBackend<'a> {
    pub fn new(
        targets: &'a mut dyn RenderTargetAllocator,
        globals: &'a mut dyn GlobalStateSink,
        draw: &'a mut dyn DrawSubmitter,
    ) -> Self {
        Self {
            targets,
            globals,
            draw,
        }
    }
}
