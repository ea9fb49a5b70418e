//! Light Ranking Tests
//!
//! Tests for:
//! - Determinism and scratch reuse across calls
//! - Cone and range rejection at the exact boundary
//! - Dead-zone filtering of weak candidates
//! - Follow-layer preference vs. score
//! - Caster resolution between the main light and the ranked spot

mod common;

use glam::{Quat, Vec3};

use character_shadow::scene::{FrameLights, LightKind, SceneLightView, SpotCone, TargetTransform};
use character_shadow::shadow::ranker::{LightRanker, LightSelection, SCORE_DEAD_ZONE};
use character_shadow::shadow::resolve::resolve_caster;

use common::{spot_towards, white_sun};

const FOLLOW_LAYER: u32 = 8;

fn origin_target() -> TargetTransform {
    TargetTransform::from_position(Vec3::ZERO)
}

// ============================================================================
// Basic selection
// ============================================================================

#[test]
fn no_target_selects_nothing() {
    let lights = FrameLights::new(vec![spot_towards(Vec3::Z * 2.0, Vec3::ZERO, 5.0, 45.0, 10.0)], None);
    let mut ranker = LightRanker::new();

    let selection = ranker.select_lights(&lights, None, Some(FOLLOW_LAYER));
    assert_eq!(selection, LightSelection::NONE);
}

#[test]
fn directional_and_point_lights_are_never_candidates() {
    let lights = FrameLights::new(
        vec![
            white_sun(10.0),
            SceneLightView::point(Vec3::X, Vec3::ONE, 10.0, 10.0),
        ],
        Some(0),
    );
    let mut ranker = LightRanker::new();

    let selection = ranker.select_lights(&lights, Some(&origin_target()), Some(FOLLOW_LAYER));
    assert!(selection.is_empty());
}

#[test]
fn selection_uses_visible_indices() {
    let lights = FrameLights::new(
        vec![
            white_sun(1.0),
            spot_towards(Vec3::Z * 2.0, Vec3::ZERO, 5.0, 45.0, 10.0).with_layer(FOLLOW_LAYER),
        ],
        Some(0),
    );
    let mut ranker = LightRanker::new();

    let selection = ranker.select_lights(&lights, Some(&origin_target()), Some(FOLLOW_LAYER));
    assert_eq!(selection.preferred, Some(1));
    assert_eq!(selection.fallback, None);
}

#[test]
fn ordering_is_not_trusted_for_partitioning() {
    // Spot first, directional last: still only the spot is considered.
    let lights = FrameLights::new(
        vec![
            spot_towards(Vec3::Z * 2.0, Vec3::ZERO, 5.0, 45.0, 10.0),
            white_sun(1.0),
        ],
        Some(1),
    );
    let mut ranker = LightRanker::new();

    let selection = ranker.select_lights(&lights, Some(&origin_target()), None);
    assert_eq!(selection.fallback, Some(0));
    assert_eq!(selection.preferred, None);
}

// ============================================================================
// P1: Determinism
// ============================================================================

#[test]
fn repeated_selection_is_identical() {
    let lights = FrameLights::new(
        vec![
            white_sun(1.0),
            spot_towards(Vec3::new(1.0, 2.0, 2.0), Vec3::ZERO, 3.0, 40.0, 8.0).with_layer(FOLLOW_LAYER),
            spot_towards(Vec3::new(-2.0, 1.0, 0.5), Vec3::ZERO, 4.0, 30.0, 6.0),
            spot_towards(Vec3::new(0.0, 3.0, -1.0), Vec3::ZERO, 2.0, 50.0, 9.0),
        ],
        Some(0),
    );
    let mut ranker = LightRanker::new();
    let target = origin_target();

    let first = ranker.select_lights(&lights, Some(&target), Some(FOLLOW_LAYER));
    for _ in 0..8 {
        assert_eq!(ranker.select_lights(&lights, Some(&target), Some(FOLLOW_LAYER)), first);
    }
}

#[test]
fn scratch_does_not_leak_between_frames() {
    let mut ranker = LightRanker::new();
    let target = origin_target();

    let busy = FrameLights::new(
        vec![
            spot_towards(Vec3::Z * 2.0, Vec3::ZERO, 5.0, 45.0, 10.0),
            spot_towards(Vec3::X * 2.0, Vec3::ZERO, 5.0, 45.0, 10.0).with_layer(FOLLOW_LAYER),
        ],
        None,
    );
    assert!(!ranker.select_lights(&busy, Some(&target), Some(FOLLOW_LAYER)).is_empty());

    let empty = FrameLights::new(Vec::new(), None);
    assert!(ranker.select_lights(&empty, Some(&target), Some(FOLLOW_LAYER)).is_empty());
}

#[test]
fn equal_scores_keep_visible_order() {
    let lights = FrameLights::new(
        vec![
            spot_towards(Vec3::X * 2.0, Vec3::ZERO, 5.0, 45.0, 10.0),
            spot_towards(Vec3::NEG_X * 2.0, Vec3::ZERO, 5.0, 45.0, 10.0),
        ],
        None,
    );
    let mut ranker = LightRanker::new();

    let selection = ranker.select_lights(&lights, Some(&origin_target()), None);
    assert_eq!(selection.fallback, Some(0));
}

// ============================================================================
// P2: Cone / range rejection
// ============================================================================

#[test]
fn target_exactly_on_cone_edge_is_rejected() {
    // Identity rotation shines along -Z; the target is dead ahead so
    // dot == 1 == cos(0).
    let on_edge = SceneLightView::spot(Vec3::Z * 2.0, Quat::IDENTITY, Vec3::ONE, 5.0, 0.0, 10.0);
    let inside = SceneLightView::spot(
        Vec3::Z * 2.0,
        Quat::IDENTITY,
        Vec3::ONE,
        5.0,
        1.0_f32.to_radians(),
        10.0,
    );
    let mut ranker = LightRanker::new();
    let target = origin_target();

    let rejected = ranker.select_lights(&FrameLights::new(vec![on_edge], None), Some(&target), None);
    assert!(rejected.is_empty());

    let accepted = ranker.select_lights(&FrameLights::new(vec![inside], None), Some(&target), None);
    assert_eq!(accepted.fallback, Some(0));
}

#[test]
fn target_exactly_at_range_is_rejected() {
    let at_range = SceneLightView::spot(
        Vec3::Z * 2.0,
        Quat::IDENTITY,
        Vec3::ONE,
        5.0,
        45.0_f32.to_radians(),
        2.0,
    );
    let within = SceneLightView {
        kind: LightKind::Spot(SpotCone {
            half_angle: 45.0_f32.to_radians(),
            range: 2.5,
        }),
        ..at_range.clone()
    };
    let mut ranker = LightRanker::new();
    let target = origin_target();

    let rejected = ranker.select_lights(&FrameLights::new(vec![at_range], None), Some(&target), None);
    assert!(rejected.is_empty());

    let accepted = ranker.select_lights(&FrameLights::new(vec![within], None), Some(&target), None);
    assert_eq!(accepted.fallback, Some(0));
}

#[test]
fn target_behind_light_is_rejected() {
    // Aimed away from the target.
    let light = SceneLightView::spot(
        Vec3::NEG_Z * 2.0,
        Quat::IDENTITY,
        Vec3::ONE,
        5.0,
        60.0_f32.to_radians(),
        10.0,
    );
    let mut ranker = LightRanker::new();
    let selection = ranker.select_lights(&FrameLights::new(vec![light], None), Some(&origin_target()), None);
    assert!(selection.is_empty());
}

#[test]
fn light_on_top_of_target_is_rejected() {
    let light = SceneLightView::spot(Vec3::ZERO, Quat::IDENTITY, Vec3::ONE, 5.0, 1.0, 10.0);
    let mut ranker = LightRanker::new();
    let selection = ranker.select_lights(&FrameLights::new(vec![light], None), Some(&origin_target()), None);
    assert!(selection.is_empty());
}

// ============================================================================
// P3: Dead zone
// ============================================================================

#[test]
fn weak_lights_fall_in_dead_zone() {
    // score = 0.93 * i * (1 - 2/10) * cos(45°) ≈ 0.526 * i
    let weak = spot_towards(Vec3::Z * 2.0, Vec3::ZERO, 0.01, 45.0, 10.0);
    let strong_enough = spot_towards(Vec3::Z * 2.0, Vec3::ZERO, 0.03, 45.0, 10.0);
    let score = |i: f32| 0.93 * i * 0.8 * 45.0_f32.to_radians().cos();
    assert!(score(0.01) <= SCORE_DEAD_ZONE);
    assert!(score(0.03) > SCORE_DEAD_ZONE);

    let mut ranker = LightRanker::new();
    let target = origin_target();

    let selection = ranker.select_lights(&FrameLights::new(vec![weak], None), Some(&target), None);
    assert!(selection.is_empty());

    let selection =
        ranker.select_lights(&FrameLights::new(vec![strong_enough], None), Some(&target), None);
    assert_eq!(selection.fallback, Some(0));
}

#[test]
fn black_light_never_selected() {
    let mut light = spot_towards(Vec3::Z * 2.0, Vec3::ZERO, 100.0, 45.0, 10.0);
    light.color = Vec3::ZERO;
    let mut ranker = LightRanker::new();
    let selection = ranker.select_lights(&FrameLights::new(vec![light], None), Some(&origin_target()), None);
    assert!(selection.is_empty());
}

// ============================================================================
// P4: Layer preference
// ============================================================================

#[test]
fn follow_layer_wins_preferred_slot_over_higher_score() {
    let lights = FrameLights::new(
        vec![
            spot_towards(Vec3::X * 2.0, Vec3::ZERO, 8.0, 45.0, 10.0),
            spot_towards(Vec3::Z * 2.0, Vec3::ZERO, 2.0, 45.0, 10.0).with_layer(FOLLOW_LAYER),
        ],
        None,
    );
    let mut ranker = LightRanker::new();

    let selection = ranker.select_lights(&lights, Some(&origin_target()), Some(FOLLOW_LAYER));
    assert_eq!(selection.preferred, Some(1));
    assert_eq!(selection.fallback, Some(0));
    assert_eq!(selection.best(), Some(1));
}

#[test]
fn score_orders_lights_within_a_slot() {
    let lights = FrameLights::new(
        vec![
            spot_towards(Vec3::X * 2.0, Vec3::ZERO, 2.0, 45.0, 10.0).with_layer(FOLLOW_LAYER),
            spot_towards(Vec3::Z * 2.0, Vec3::ZERO, 6.0, 45.0, 10.0).with_layer(FOLLOW_LAYER),
            spot_towards(Vec3::NEG_X * 3.0, Vec3::ZERO, 1.0, 45.0, 10.0),
            spot_towards(Vec3::Y * 2.0, Vec3::ZERO, 4.0, 45.0, 10.0),
        ],
        None,
    );
    let mut ranker = LightRanker::new();

    let selection = ranker.select_lights(&lights, Some(&origin_target()), Some(FOLLOW_LAYER));
    assert_eq!(selection.preferred, Some(1));
    assert_eq!(selection.fallback, Some(3));
    assert_ne!(selection.preferred, selection.fallback);
}

#[test]
fn without_follow_layer_everything_is_fallback() {
    let lights = FrameLights::new(
        vec![spot_towards(Vec3::Z * 2.0, Vec3::ZERO, 5.0, 45.0, 10.0).with_layer(FOLLOW_LAYER)],
        None,
    );
    let mut ranker = LightRanker::new();

    let selection = ranker.select_lights(&lights, Some(&origin_target()), None);
    assert_eq!(selection.preferred, None);
    assert_eq!(selection.fallback, Some(0));
}

// ============================================================================
// Caster resolution (P8)
// ============================================================================

fn main_and_bright_fallback() -> FrameLights {
    FrameLights::new(
        vec![
            white_sun(1.0),
            spot_towards(Vec3::Z * 2.0, Vec3::ZERO, 5.0, 45.0, 10.0),
        ],
        Some(0),
    )
}

#[test]
fn brightest_off_keeps_main_light() {
    let lights = main_and_bright_fallback();
    let selection = LightSelection {
        preferred: None,
        fallback: Some(1),
    };

    let resolution = resolve_caster(&lights, selection, false);
    assert_eq!(resolution.caster, Some(0));
    assert_eq!(resolution.spot, Some(1));
}

#[test]
fn brightest_on_picks_strictly_brighter_spot() {
    let lights = main_and_bright_fallback();
    let selection = LightSelection {
        preferred: None,
        fallback: Some(1),
    };

    let resolution = resolve_caster(&lights, selection, true);
    assert_eq!(resolution.caster, Some(1));
}

#[test]
fn brightest_on_tie_goes_to_main() {
    let lights = FrameLights::new(
        vec![
            white_sun(2.0),
            spot_towards(Vec3::Z * 2.0, Vec3::ZERO, 2.0, 45.0, 10.0),
        ],
        Some(0),
    );
    let selection = LightSelection {
        preferred: Some(1),
        fallback: None,
    };

    assert_eq!(resolve_caster(&lights, selection, true).caster, Some(0));
}

#[test]
fn no_spot_falls_back_to_main_or_nothing() {
    let with_main = FrameLights::new(vec![white_sun(1.0)], Some(0));
    assert_eq!(resolve_caster(&with_main, LightSelection::NONE, true).caster, Some(0));

    let without_main = FrameLights::new(vec![white_sun(1.0)], None);
    let resolution = resolve_caster(&without_main, LightSelection::NONE, true);
    assert_eq!(resolution.caster, None);
    assert_eq!(resolution.spot, None);
}

#[test]
fn spot_wins_when_no_main_light() {
    let lights = FrameLights::new(
        vec![spot_towards(Vec3::Z * 2.0, Vec3::ZERO, 0.5, 45.0, 10.0)],
        None,
    );
    let selection = LightSelection {
        preferred: None,
        fallback: Some(0),
    };

    assert_eq!(resolve_caster(&lights, selection, false).caster, Some(0));
    assert_eq!(resolve_caster(&lights, selection, true).caster, Some(0));
}

#[test]
fn additional_light_index_skips_main_light() {
    let lights = main_and_bright_fallback();
    assert_eq!(lights.additional_light_index(0), None);
    assert_eq!(lights.additional_light_index(1), Some(0));

    let no_main = FrameLights::new(
        vec![spot_towards(Vec3::Z * 2.0, Vec3::ZERO, 1.0, 45.0, 10.0)],
        None,
    );
    assert_eq!(no_main.additional_light_index(0), Some(0));
    assert_eq!(no_main.additional_light_index(3), None);
}
