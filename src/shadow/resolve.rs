//! Final cast-light resolution between the main light and the ranked spots.

use crate::scene::light::{FrameLights, SceneLightView};
use crate::shadow::ranker::LightSelection;

/// Which light casts the character shadow this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CasterResolution {
    /// Visible index of the light the shadow camera aims from.
    pub caster: Option<usize>,
    /// Visible index of the spot light considered, whether or not it won.
    pub spot: Option<usize>,
}

impl CasterResolution {
    #[inline]
    #[must_use]
    pub fn caster_light<'a>(&self, lights: &'a FrameLights) -> Option<&'a SceneLightView> {
        self.caster.and_then(|i| lights.get(i))
    }
}

/// Resolves the cast light.
///
/// - No ranked spot: the main light, or nothing.
/// - `use_brightest_light` off: the main light when present, else the spot.
/// - `use_brightest_light` on: the brighter of main and spot by luma; the
///   main light keeps ties.
#[must_use]
pub fn resolve_caster(
    lights: &FrameLights,
    selection: LightSelection,
    use_brightest_light: bool,
) -> CasterResolution {
    let main = lights.main_light();
    let spot = selection.best().and_then(|i| lights.get(i));

    let caster = match (main, spot) {
        (None, None) => None,
        (Some(main), None) => Some(main.index),
        (None, Some(spot)) => Some(spot.index),
        (Some(main), Some(_)) if !use_brightest_light => Some(main.index),
        (Some(main), Some(spot)) => {
            if main.luminance() >= spot.luminance() {
                Some(main.index)
            } else {
                Some(spot.index)
            }
        }
    };

    CasterResolution {
        caster,
        spot: spot.map(|s| s.index),
    }
}
