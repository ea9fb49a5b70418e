//! Draw submission contract.
//!
//! The host engine owns culling results, materials and command recording.
//! The shadow passes only describe *what* to draw: a pass tag selecting the
//! caster shader variant, a render queue range, and a sort order.

use std::ops::RangeInclusive;

use glam::Vec4;

use crate::renderer::graph::target::TextureHandle;

/// Pass tags identifying caster shader variants.
pub mod tags {
    /// Depth-only variant for opaque character casters.
    pub const CHARACTER_DEPTH: &str = "CharacterDepth";
    /// Depth variant for transparent casters (max-blended).
    pub const TRANSPARENT_SHADOW: &str = "TransparentShadow";
    /// Alpha accumulation variant for transparent casters (add-blended).
    pub const TRANSPARENT_ALPHA_SUM: &str = "TransparentAlphaSum";
}

/// Render queue filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueRange {
    Opaque,
    Transparent,
}

impl QueueRange {
    #[must_use]
    pub const fn range(self) -> RangeInclusive<u32> {
        match self {
            Self::Opaque => 0..=2500,
            Self::Transparent => 2501..=5000,
        }
    }

    #[must_use]
    pub fn contains(self, queue: u32) -> bool {
        self.range().contains(&queue)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortingCriteria {
    /// Front to back, grouped by material.
    CommonOpaque,
    /// Back to front.
    CommonTransparent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawRequest {
    pub pass_tag: &'static str,
    pub queue_range: QueueRange,
    pub sorting: SortingCriteria,
}

/// Host-side draw recording used by the shadow passes.
pub trait DrawSubmitter {
    /// Binds `target` as the color attachment and clears it to `clear_color`.
    fn set_render_target(&mut self, target: TextureHandle, clear_color: Vec4);

    /// Draws all visible renderers with a shader pass tagged `request.pass_tag`.
    fn draw_renderers(&mut self, request: &DrawRequest);

    fn push_debug_group(&mut self, _label: &str) {}

    fn pop_debug_group(&mut self) {}
}
