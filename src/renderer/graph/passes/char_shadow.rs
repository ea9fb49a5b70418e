//! Character Shadow Map Pass
//!
//! Renders opaque character casters into a single square float target from
//! the point of view of the resolved cast light.
//!
//! # Data Flow
//!
//! ```text
//! FrameLights ──► LightRanker ──► resolve_caster ──► ShadowCameraController
//!                                                          │
//!  config ──► prepare ──► configure (target, cascade) ──► record
//!                                                          │
//!                          globals: matrices, params, offsets, size, light
//!                          draw:    clear + "CharacterDepth" (opaque queue)
//! ```
//!
//! Texture size is `1024 * textureScale`. The cascade scale is published for
//! the shaders and does not change the allocation, so moving the camera
//! never triggers a reallocation.

use glam::Vec4;

use crate::config::{CharacterShadowConfig, SoftShadowMode};
use crate::errors::{CharShadowError, Result};
use crate::renderer::graph::context::{FrameContext, RenderBackend};
use crate::renderer::graph::draw::{DrawRequest, QueueRange, SortingCriteria, tags};
use crate::renderer::graph::globals::ids;
use crate::renderer::graph::node::ShadowNode;
use crate::renderer::graph::stage::PassEvent;
use crate::renderer::graph::target::{RenderTargetAllocator, RenderTargetDesc, ShadowTarget};
use crate::shadow::ShadowContext;
use crate::shadow::cascade::{self, CascadeScale};
use crate::shadow::resolve::{CasterResolution, resolve_caster};

/// Parameters computed in `prepare` for one camera.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CharShadowPlan {
    pub target: RenderTargetDesc,
    /// `(bias, normal_bias, step_smoothness, high_soft_shadow_blur_distance)`
    pub params: Vec4,
    pub cascade: CascadeScale,
    /// Effective flag: config toggle gated by the rendering mode.
    pub use_brightest_light: bool,
    pub follow_layer: Option<u32>,
    pub soft_shadow_mode: SoftShadowMode,
}

/// Opaque character shadow map pass.
#[derive(Debug)]
pub struct CharacterShadowPass {
    target: ShadowTarget,
    queue_range: QueueRange,
    event: PassEvent,
    last_resolution: CasterResolution,
}

impl CharacterShadowPass {
    #[must_use]
    pub fn new(event: PassEvent, queue_range: QueueRange) -> Self {
        Self {
            target: ShadowTarget::new(),
            queue_range,
            event,
            last_resolution: CasterResolution::default(),
        }
    }

    #[inline]
    #[must_use]
    pub fn target(&self) -> &ShadowTarget {
        &self.target
    }

    /// Cast-light decision of the most recent `record`.
    #[inline]
    #[must_use]
    pub fn last_resolution(&self) -> CasterResolution {
        self.last_resolution
    }
}

impl Default for CharacterShadowPass {
    fn default() -> Self {
        Self::new(PassEvent::BeforeRenderingPrePasses, QueueRange::Opaque)
    }
}

/// Two vec4s encoding four half-texel filter taps.
#[must_use]
pub fn soft_shadow_offsets(width: u32, height: u32) -> [Vec4; 2] {
    let half_w = 0.5 / width as f32;
    let half_h = 0.5 / height as f32;
    [
        Vec4::new(-half_w, -half_h, half_w, -half_h),
        Vec4::new(-half_w, half_h, half_w, half_h),
    ]
}

/// `(1/w, 1/h, w, h)`
#[must_use]
pub fn shadow_map_size_vector(width: u32, height: u32) -> Vec4 {
    let (w, h) = (width as f32, height as f32);
    Vec4::new(1.0 / w, 1.0 / h, w, h)
}

impl ShadowNode for CharacterShadowPass {
    type Plan = CharShadowPlan;

    fn name(&self) -> &'static str {
        "CharacterShadowMap"
    }

    fn event(&self) -> PassEvent {
        self.event
    }

    fn prepare(&mut self, frame: &FrameContext<'_>, config: &CharacterShadowConfig) -> CharShadowPlan {
        let size = config.texture_scale.resolution();
        let cascade = cascade::scale_for(frame.target_distance(), &config.cascade_split);

        CharShadowPlan {
            target: RenderTargetDesc::square(size, config.precision.texture_format(), "CharShadowMap"),
            params: Vec4::new(
                config.bias,
                config.normal_bias,
                config.step_smoothness,
                config.high_soft_shadow_blur_distance,
            ),
            cascade,
            use_brightest_light: config.use_brightest_light
                && frame.rendering_mode.supports_additional_shadows(),
            follow_layer: config.follow_layer(),
            soft_shadow_mode: config.soft_shadow_mode,
        }
    }

    fn configure(&mut self, plan: &CharShadowPlan, backend: &mut RenderBackend<'_>) -> Result<()> {
        let handle = self.target.reallocate_if_needed(&plan.target, backend.targets)?;

        let globals = &mut *backend.globals;
        globals.set_texture(ids::CHAR_SHADOW_MAP, handle);
        globals.set_vector(
            ids::CASCADE_PARAMS,
            Vec4::new(plan.cascade.max_cull_distance, plan.cascade.resolution_scale, 0.0, 0.0),
        );
        globals.set_int(ids::USE_BRIGHTEST_LIGHT, i32::from(plan.use_brightest_light));
        globals.set_keyword(
            ids::HIGH_SOFT_SHADOW_KEYWORD,
            plan.soft_shadow_mode == SoftShadowMode::High,
        );
        Ok(())
    }

    fn record(
        &mut self,
        plan: &CharShadowPlan,
        frame: &FrameContext<'_>,
        shadow: &mut ShadowContext,
        backend: &mut RenderBackend<'_>,
    ) -> Result<()> {
        let handle = self
            .target
            .handle()
            .ok_or(CharShadowError::PassNotConfigured(self.name()))?;

        // Light selection and camera framing
        let selection = shadow
            .ranker
            .select_lights(frame.lights, frame.target, plan.follow_layer);
        let resolution = resolve_caster(frame.lights, selection, plan.use_brightest_light);
        self.last_resolution = resolution;

        let globals = &mut *backend.globals;
        if let Some(light) = resolution.caster_light(frame.lights) {
            shadow.camera.aim_at(light, frame.target);
            globals.set_vector(ids::BRIGHTEST_LIGHT_DIRECTION, (-light.forward()).extend(0.0));
        } else {
            log::debug!("{}: no cast light, keeping last camera", self.name());
        }

        let local_light_index = resolution
            .spot
            .and_then(|i| frame.lights.additional_light_index(i))
            .map_or(-1, |i| i as i32);
        globals.set_int(ids::LOCAL_LIGHT_INDEX, local_light_index);

        // Matrices; the view x-scale compensates the square target being
        // sampled against a non-square screen.
        let camera = shadow.camera.state();
        let mut view = camera.view_matrix;
        view.x_axis.x *= frame.camera.aspect;
        globals.set_matrix(ids::VIEW_MATRIX, view);
        globals.set_matrix(ids::PROJ_MATRIX, camera.projection_matrix);

        let (width, height) = (plan.target.width, plan.target.height);
        let [offset0, offset1] = soft_shadow_offsets(width, height);
        globals.set_vector(ids::CHAR_SHADOW_PARAMS, plan.params);
        globals.set_vector(ids::SHADOW_OFFSET_0, offset0);
        globals.set_vector(ids::SHADOW_OFFSET_1, offset1);
        globals.set_vector(ids::SHADOW_MAP_SIZE, shadow_map_size_vector(width, height));

        // Draw
        let draw = &mut *backend.draw;
        draw.push_debug_group(self.name());
        draw.set_render_target(handle, Vec4::ZERO);
        draw.draw_renderers(&DrawRequest {
            pass_tag: tags::CHARACTER_DEPTH,
            queue_range: self.queue_range,
            sorting: SortingCriteria::CommonOpaque,
        });
        draw.pop_debug_group();

        Ok(())
    }

    fn dispose(&mut self, targets: &mut dyn RenderTargetAllocator) -> Result<()> {
        self.target.release(targets)
    }
}
