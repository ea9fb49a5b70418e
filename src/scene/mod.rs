//! Per-frame scene inputs: visible lights, the output camera, and the
//! tracked character.

pub mod camera;
pub mod light;
pub mod target;

pub use camera::{CameraKind, OutputCamera};
pub use light::{FrameLights, LightKind, SceneLightView, SpotCone};
pub use target::{TargetTracker, TargetTransform};
