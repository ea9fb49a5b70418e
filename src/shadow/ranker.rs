//! Light Ranking
//!
//! Picks which spot lights may cast the character's shadow this frame.
//!
//! # Algorithm
//!
//! 1. Only spot lights are candidates; directional and point lights are
//!    skipped by kind, not by their position in the visible list.
//! 2. A spot light is rejected when the target lies on or outside its cone
//!    (`dot(dir_to_target, forward) <= cos(half_angle)`) or at or beyond its
//!    range.
//! 3. Survivors are scored as
//!    `rank_luma(color * intensity) * (1 - distance / range) * cos(half_angle)`
//!    and anything at or below [`SCORE_DEAD_ZONE`] is dropped.
//! 4. Candidates are stably sorted by score, highest first, so equal scores
//!    keep visible-list order.
//! 5. One walk over the sorted list fills `preferred` with the first light on
//!    the follow layer and `fallback` with the first light off it.

use crate::scene::light::{FrameLights, LightKind};
use crate::scene::target::TargetTransform;

/// Scores at or below this value never reach the selection.
pub const SCORE_DEAD_ZONE: f32 = 0.01;

/// Result of one ranking pass. Indices point into the frame's visible lights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LightSelection {
    /// Best light on the follow layer.
    pub preferred: Option<usize>,
    /// Best light off the follow layer.
    pub fallback: Option<usize>,
}

impl LightSelection {
    pub const NONE: Self = Self {
        preferred: None,
        fallback: None,
    };

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.preferred.is_none() && self.fallback.is_none()
    }

    /// The spot light to consider for casting: preferred over fallback.
    #[inline]
    #[must_use]
    pub fn best(&self) -> Option<usize> {
        self.preferred.or(self.fallback)
    }
}

#[derive(Debug, Clone, Copy)]
struct Candidate {
    score: f32,
    index: usize,
    layer: u32,
}

/// Ranks visible spot lights. Owns a scratch list reused across frames.
#[derive(Debug, Default)]
pub struct LightRanker {
    candidates: Vec<Candidate>,
}

impl LightRanker {
    #[must_use]
    pub fn new() -> Self {
        Self {
            candidates: Vec::with_capacity(64),
        }
    }

    /// Selects the preferred and fallback spot lights for `target`.
    ///
    /// Returns [`LightSelection::NONE`] when there is no target.
    pub fn select_lights(
        &mut self,
        lights: &FrameLights,
        target: Option<&TargetTransform>,
        follow_layer: Option<u32>,
    ) -> LightSelection {
        self.candidates.clear();

        let Some(target) = target else {
            return LightSelection::NONE;
        };

        for light in lights {
            let LightKind::Spot(cone) = light.kind else {
                continue;
            };

            let diff = target.position - light.position;
            let distance = diff.length();
            let Some(dir_to_target) = diff.try_normalize() else {
                log::trace!("Spot light {} sits on the target, skipped", light.index);
                continue;
            };

            let cone_cos = cone.half_angle.cos();
            if dir_to_target.dot(light.forward()) <= cone_cos {
                log::trace!("Spot light {} rejected: target outside cone", light.index);
                continue;
            }
            if distance >= cone.range {
                log::trace!("Spot light {} rejected: target out of range", light.index);
                continue;
            }

            let attenuation = 1.0 - distance / cone.range;
            let score = light.rank_luminance() * attenuation * cone_cos;
            if score > SCORE_DEAD_ZONE {
                self.candidates.push(Candidate {
                    score,
                    index: light.index,
                    layer: light.layer,
                });
            }
        }

        // `sort_by` is stable: ties keep visible-list order.
        self.candidates
            .sort_by(|a, b| b.score.total_cmp(&a.score));

        let mut selection = LightSelection::NONE;
        for candidate in &self.candidates {
            if Some(candidate.layer) == follow_layer {
                selection.preferred.get_or_insert(candidate.index);
            } else {
                selection.fallback.get_or_insert(candidate.index);
            }
            if selection.preferred.is_some() && selection.fallback.is_some() {
                break;
            }
        }

        log::debug!(
            "Light selection: {} candidates, preferred {:?}, fallback {:?}",
            self.candidates.len(),
            selection.preferred,
            selection.fallback
        );

        selection
    }
}
