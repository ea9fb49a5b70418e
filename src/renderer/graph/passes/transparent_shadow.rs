//! Transparent Shadow Pass
//!
//! Cloth-like transparent casters write two same-sized targets:
//!
//! - a depth-like shadow buffer (`TransparentShadow`, max-blended)
//! - an alpha accumulation buffer (`TransparentAlphaSum`, add-blended)
//!
//! No light selection happens here. The caster shaders sample the matrices
//! the main pass published this frame.
//!
//! # Limitations
//!
//! Alpha is summed, not composited, so more than two overlapping transparent
//! layers produce a too-dense shadow. Intended for character cloth only;
//! anything else using these tags also casts onto distant geometry.

use glam::Vec4;

use crate::config::CharacterShadowConfig;
use crate::errors::{CharShadowError, Result};
use crate::renderer::graph::context::{FrameContext, RenderBackend};
use crate::renderer::graph::draw::{DrawRequest, QueueRange, SortingCriteria, tags};
use crate::renderer::graph::globals::ids;
use crate::renderer::graph::node::ShadowNode;
use crate::renderer::graph::passes::char_shadow::shadow_map_size_vector;
use crate::renderer::graph::stage::PassEvent;
use crate::renderer::graph::target::{RenderTargetAllocator, RenderTargetDesc, ShadowTarget};
use crate::shadow::ShadowContext;

/// Alpha accumulation always uses half floats.
pub const ALPHA_SUM_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::R16Float;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransparentShadowPlan {
    pub shadow_target: RenderTargetDesc,
    pub alpha_sum_target: RenderTargetDesc,
}

#[derive(Debug)]
pub struct TransparentShadowPass {
    shadow_target: ShadowTarget,
    alpha_sum_target: ShadowTarget,
    queue_range: QueueRange,
    event: PassEvent,
}

impl TransparentShadowPass {
    #[must_use]
    pub fn new(event: PassEvent, queue_range: QueueRange) -> Self {
        Self {
            shadow_target: ShadowTarget::new(),
            alpha_sum_target: ShadowTarget::new(),
            queue_range,
            event,
        }
    }

    #[inline]
    #[must_use]
    pub fn shadow_target(&self) -> &ShadowTarget {
        &self.shadow_target
    }

    #[inline]
    #[must_use]
    pub fn alpha_sum_target(&self) -> &ShadowTarget {
        &self.alpha_sum_target
    }
}

impl Default for TransparentShadowPass {
    fn default() -> Self {
        Self::new(PassEvent::BeforeRenderingOpaques, QueueRange::Transparent)
    }
}

impl ShadowNode for TransparentShadowPass {
    type Plan = TransparentShadowPlan;

    fn name(&self) -> &'static str {
        "TransparentShadowMap"
    }

    fn event(&self) -> PassEvent {
        self.event
    }

    fn prepare(
        &mut self,
        _frame: &FrameContext<'_>,
        config: &CharacterShadowConfig,
    ) -> TransparentShadowPlan {
        let size = config.transparent_texture_scale.resolution();
        TransparentShadowPlan {
            shadow_target: RenderTargetDesc::square(
                size,
                config.precision.texture_format(),
                "TransparentShadowMap",
            ),
            alpha_sum_target: RenderTargetDesc::square(size, ALPHA_SUM_FORMAT, "TransparentAlphaSum"),
        }
    }

    fn configure(&mut self, plan: &TransparentShadowPlan, backend: &mut RenderBackend<'_>) -> Result<()> {
        let shadow = self
            .shadow_target
            .reallocate_if_needed(&plan.shadow_target, backend.targets)?;
        let alpha_sum = self
            .alpha_sum_target
            .reallocate_if_needed(&plan.alpha_sum_target, backend.targets)?;

        let globals = &mut *backend.globals;
        globals.set_texture(ids::TRANSPARENT_SHADOW_MAP, shadow);
        globals.set_texture(ids::TRANSPARENT_ALPHA_SUM, alpha_sum);
        globals.set_vector(
            ids::TRANSPARENT_SHADOW_MAP_SIZE,
            shadow_map_size_vector(plan.shadow_target.width, plan.shadow_target.height),
        );
        Ok(())
    }

    fn record(
        &mut self,
        _plan: &TransparentShadowPlan,
        _frame: &FrameContext<'_>,
        _shadow: &mut ShadowContext,
        backend: &mut RenderBackend<'_>,
    ) -> Result<()> {
        let (Some(shadow), Some(alpha_sum)) =
            (self.shadow_target.handle(), self.alpha_sum_target.handle())
        else {
            return Err(CharShadowError::PassNotConfigured(self.name()));
        };

        backend.globals.set_float(ids::SHADOW_MAP_INDEX, 0.0);

        let draw = &mut *backend.draw;
        draw.push_debug_group(self.name());

        draw.set_render_target(shadow, Vec4::ZERO);
        draw.draw_renderers(&DrawRequest {
            pass_tag: tags::TRANSPARENT_SHADOW,
            queue_range: self.queue_range,
            sorting: SortingCriteria::CommonTransparent,
        });

        draw.set_render_target(alpha_sum, Vec4::ZERO);
        draw.draw_renderers(&DrawRequest {
            pass_tag: tags::TRANSPARENT_ALPHA_SUM,
            queue_range: self.queue_range,
            sorting: SortingCriteria::CommonTransparent,
        });

        draw.pop_debug_group();
        Ok(())
    }

    fn dispose(&mut self, targets: &mut dyn RenderTargetAllocator) -> Result<()> {
        self.shadow_target.release(targets)?;
        self.alpha_sum_target.release(targets)
    }
}
