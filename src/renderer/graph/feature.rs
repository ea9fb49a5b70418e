//! Character Shadow Feature
//!
//! Top-level orchestrator, run once per output camera per frame.
//!
//! ```text
//! render_camera(frame)
//!   ├─ gate: config? target? distance < 18? not a reflection camera?
//!   ├─ enqueue CharacterShadowPass            (BeforeRenderingPrePasses)
//!   ├─ enqueue TransparentShadowPass if on    (BeforeRenderingOpaques)
//!   └─ for each pass in event order: prepare → configure → record
//! ```
//!
//! A skipped frame touches nothing: no allocation, no draw, and the globals
//! keep the values of the last rendered frame.
//!
//! The feature owns the only [`ShadowContext`] of the subsystem, so there is
//! exactly one shadow camera per feature instance.

use crate::config::CharacterShadowConfig;
use crate::errors::Result;
use crate::renderer::graph::context::{FrameContext, RenderBackend};
use crate::renderer::graph::node::ShadowNode;
use crate::renderer::graph::passes::{CharacterShadowPass, TransparentShadowPass};
use crate::renderer::graph::target::RenderTargetAllocator;
use crate::scene::camera::CameraKind;
use crate::shadow::{self, ShadowCameraSettings, ShadowContext};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// No configuration asset is assigned.
    NoConfig,
    /// No active tracked character this frame.
    NoTarget,
    /// Camera is at or beyond the culling distance.
    OutOfRange,
    ReflectionCamera,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureOutcome {
    Skipped(SkipReason),
    Rendered {
        /// Visible index of the light the shadow was cast from.
        caster: Option<usize>,
        /// Visible index of the ranked spot light, whether or not it won.
        spot: Option<usize>,
        transparent: bool,
    },
}

impl FeatureOutcome {
    #[inline]
    #[must_use]
    pub fn is_rendered(&self) -> bool {
        matches!(self, Self::Rendered { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EnqueuedPass {
    CharacterShadow,
    TransparentShadow,
}

#[derive(Debug)]
pub struct CharacterShadowFeature {
    config: Option<CharacterShadowConfig>,
    shadow_pass: CharacterShadowPass,
    transparent_pass: TransparentShadowPass,
    context: ShadowContext,
}

impl CharacterShadowFeature {
    #[must_use]
    pub fn new(config: Option<CharacterShadowConfig>, camera: ShadowCameraSettings) -> Self {
        Self {
            config,
            shadow_pass: CharacterShadowPass::default(),
            transparent_pass: TransparentShadowPass::default(),
            context: ShadowContext::new(camera),
        }
    }

    #[inline]
    #[must_use]
    pub fn config(&self) -> Option<&CharacterShadowConfig> {
        self.config.as_ref()
    }

    pub fn set_config(&mut self, config: Option<CharacterShadowConfig>) {
        self.config = config;
    }

    #[inline]
    #[must_use]
    pub fn context(&self) -> &ShadowContext {
        &self.context
    }

    #[inline]
    pub fn context_mut(&mut self) -> &mut ShadowContext {
        &mut self.context
    }

    #[inline]
    #[must_use]
    pub fn shadow_pass(&self) -> &CharacterShadowPass {
        &self.shadow_pass
    }

    #[inline]
    #[must_use]
    pub fn transparent_pass(&self) -> &TransparentShadowPass {
        &self.transparent_pass
    }

    /// Why this frame would be skipped, or `None` if the passes should run.
    #[must_use]
    pub fn skip_reason(&self, frame: &FrameContext<'_>) -> Option<SkipReason> {
        if self.config.is_none() {
            return Some(SkipReason::NoConfig);
        }
        if frame.target.is_none() {
            return Some(SkipReason::NoTarget);
        }
        if !shadow::is_update_needed(frame.camera.position, frame.target) {
            return Some(SkipReason::OutOfRange);
        }
        if frame.camera.kind == CameraKind::Reflection {
            return Some(SkipReason::ReflectionCamera);
        }
        None
    }

    /// Runs the enabled passes for one output camera.
    pub fn render_camera(
        &mut self,
        frame: &FrameContext<'_>,
        backend: &mut RenderBackend<'_>,
    ) -> Result<FeatureOutcome> {
        if let Some(reason) = self.skip_reason(frame) {
            log::trace!("Character shadow skipped: {reason:?}");
            return Ok(FeatureOutcome::Skipped(reason));
        }
        let Some(config) = self.config.as_ref() else {
            return Ok(FeatureOutcome::Skipped(SkipReason::NoConfig));
        };

        let mut queue = [
            (self.shadow_pass.event(), EnqueuedPass::CharacterShadow),
            (self.transparent_pass.event(), EnqueuedPass::TransparentShadow),
        ];
        let enqueued = if config.enable_transparent_shadow { 2 } else { 1 };
        let queue = &mut queue[..enqueued];
        queue.sort_by_key(|(event, _)| *event);

        for (_, pass) in queue.iter() {
            match pass {
                EnqueuedPass::CharacterShadow => {
                    run_node(&mut self.shadow_pass, frame, config, &mut self.context, backend)?;
                }
                EnqueuedPass::TransparentShadow => {
                    run_node(&mut self.transparent_pass, frame, config, &mut self.context, backend)?;
                }
            }
        }

        let resolution = self.shadow_pass.last_resolution();
        Ok(FeatureOutcome::Rendered {
            caster: resolution.caster,
            spot: resolution.spot,
            transparent: config.enable_transparent_shadow,
        })
    }

    /// Releases every render target held by the passes.
    pub fn dispose(&mut self, targets: &mut dyn RenderTargetAllocator) -> Result<()> {
        self.shadow_pass.dispose(targets)?;
        self.transparent_pass.dispose(targets)
    }
}

impl Default for CharacterShadowFeature {
    fn default() -> Self {
        Self::new(None, ShadowCameraSettings::default())
    }
}

fn run_node<N: ShadowNode>(
    node: &mut N,
    frame: &FrameContext<'_>,
    config: &CharacterShadowConfig,
    shadow: &mut ShadowContext,
    backend: &mut RenderBackend<'_>,
) -> Result<()> {
    let plan = node.prepare(frame, config);
    node.configure(&plan, backend)?;
    node.record(&plan, frame, shadow, backend)
}
