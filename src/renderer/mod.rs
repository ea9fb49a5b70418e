//! Rendering side of the character shadow: pass orchestration against host
//! collaborators, and a wgpu implementation of the render target backend.

pub mod graph;
pub mod wgpu_targets;

pub use graph::{CharacterShadowFeature, FeatureOutcome, FrameContext, RenderBackend};
pub use wgpu_targets::WgpuRenderTargets;
