pub mod char_shadow;
pub mod transparent_shadow;

pub use char_shadow::{CharShadowPlan, CharacterShadowPass};
pub use transparent_shadow::{TransparentShadowPass, TransparentShadowPlan};
