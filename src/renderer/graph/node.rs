//! Shadow Node Trait
//!
//! Each shadow pass runs in three phases per output camera:
//!
//! 1. `prepare`: pure computation of the resources and parameters the frame
//!    needs. No collaborator is touched.
//! 2. `configure`: (re)allocates render targets and publishes the globals
//!    that do not depend on light selection.
//! 3. `record`: per-frame decisions (light selection, camera framing), the
//!    remaining globals, and draw submission.

use crate::config::CharacterShadowConfig;
use crate::errors::Result;
use crate::renderer::graph::context::{FrameContext, RenderBackend};
use crate::renderer::graph::stage::PassEvent;
use crate::renderer::graph::target::RenderTargetAllocator;
use crate::shadow::ShadowContext;

pub trait ShadowNode {
    /// Resource and parameter plan produced by `prepare`.
    type Plan;

    /// Node name, also used as the debug group label.
    fn name(&self) -> &'static str;

    fn event(&self) -> PassEvent;

    fn prepare(&mut self, frame: &FrameContext<'_>, config: &CharacterShadowConfig) -> Self::Plan;

    fn configure(&mut self, plan: &Self::Plan, backend: &mut RenderBackend<'_>) -> Result<()>;

    fn record(
        &mut self,
        plan: &Self::Plan,
        frame: &FrameContext<'_>,
        shadow: &mut ShadowContext,
        backend: &mut RenderBackend<'_>,
    ) -> Result<()>;

    /// Releases persistent resources.
    fn dispose(&mut self, targets: &mut dyn RenderTargetAllocator) -> Result<()>;
}
