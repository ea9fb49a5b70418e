//! Shadow pass orchestration
//!
//! Provides:
//! - CharacterShadowFeature: per-camera orchestrator and gate
//! - ShadowNode: three-phase pass interface (prepare / configure / record)
//! - CharacterShadowPass / TransparentShadowPass: the two passes
//! - FrameContext / RenderBackend: per-frame inputs and host collaborators
//! - GlobalStateSink / DrawSubmitter / RenderTargetAllocator: collaborator contracts

pub mod context;
pub mod draw;
pub mod feature;
pub mod globals;
pub mod node;
pub mod passes;
pub mod stage;
pub mod target;

pub use context::{FrameContext, RenderBackend, RenderingMode};
pub use draw::{DrawRequest, DrawSubmitter, QueueRange, SortingCriteria};
pub use feature::{CharacterShadowFeature, FeatureOutcome, SkipReason};
pub use globals::{CharShadowUniforms, GlobalShaderState, GlobalStateSink, GlobalValue};
pub use node::ShadowNode;
pub use passes::{CharacterShadowPass, TransparentShadowPass};
pub use stage::PassEvent;
pub use target::{RenderTargetAllocator, RenderTargetDesc, ShadowTarget, TextureHandle};
