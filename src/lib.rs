//! Camera-independent character shadow maps.
//!
//! Per output camera and frame, [`CharacterShadowFeature`] picks the light
//! that should cast the tracked character's shadow, frames a dedicated shadow
//! camera on the character, and renders the character's casters into its own
//! shadow target. An optional second pass accumulates transparent (cloth)
//! shadows.
//!
//! The host engine supplies the visible lights, the output camera and the
//! tracked target through [`FrameContext`], and receives render target
//! allocations, global shader writes and draw requests through the
//! collaborator traits in [`renderer::graph`].

pub mod config;
pub mod errors;
pub mod renderer;
pub mod scene;
pub mod shadow;

pub use config::{CharacterShadowConfig, LayerMask, ShadowMapPrecision, ShadowMapScale, SoftShadowMode};
pub use errors::{CharShadowError, Result};
pub use renderer::graph::{
    CharacterShadowFeature, FeatureOutcome, FrameContext, GlobalShaderState, RenderBackend,
    RenderingMode, SkipReason,
};
pub use renderer::WgpuRenderTargets;
pub use scene::{CameraKind, FrameLights, OutputCamera, SceneLightView, TargetTracker, TargetTransform};
pub use shadow::{CascadeSplit, LightRanker, LightSelection, ShadowCameraController, ShadowCameraSettings, ShadowContext};
