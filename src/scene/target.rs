//! Tracked character targets.
//!
//! The shadow camera follows exactly one character at a time: the first
//! candidate whose node is active in the hierarchy.

use glam::{Quat, Vec3};

/// World transform of the tracked character.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetTransform {
    pub position: Vec3,
    pub rotation: Quat,
}

impl TargetTransform {
    #[must_use]
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            rotation: Quat::IDENTITY,
        }
    }
}

/// One character the tracker may follow.
#[derive(Debug, Clone)]
pub struct TargetCandidate {
    /// Label used in log output.
    pub name: String,
    pub transform: TargetTransform,
    /// Whether the character's node is active; inactive candidates are skipped.
    pub active_in_hierarchy: bool,
}

/// Ordered list of character candidates and the one currently followed.
#[derive(Debug, Clone, Default)]
pub struct TargetTracker {
    candidates: Vec<TargetCandidate>,
    active: Option<usize>,
}

impl TargetTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a candidate and returns its slot.
    pub fn add(&mut self, name: impl Into<String>, transform: TargetTransform) -> usize {
        self.candidates.push(TargetCandidate {
            name: name.into(),
            transform,
            active_in_hierarchy: true,
        });
        self.candidates.len() - 1
    }

    pub fn candidate_mut(&mut self, slot: usize) -> Option<&mut TargetCandidate> {
        self.candidates.get_mut(slot)
    }

    /// Picks the first active candidate. Call once per frame before rendering.
    pub fn update(&mut self) {
        let next = self.candidates.iter().position(|c| c.active_in_hierarchy);
        if next != self.active {
            log::debug!(
                "Character shadow target changed: {:?} -> {:?}",
                self.active.map(|i| self.candidates[i].name.as_str()),
                next.map(|i| self.candidates[i].name.as_str()),
            );
        }
        self.active = next;
    }

    #[must_use]
    pub fn active_target(&self) -> Option<TargetTransform> {
        self.active.map(|i| self.candidates[i].transform)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_active_candidate_wins() {
        let mut tracker = TargetTracker::new();
        let a = tracker.add("a", TargetTransform::from_position(Vec3::X));
        tracker.add("b", TargetTransform::from_position(Vec3::Y));

        tracker.update();
        assert_eq!(tracker.active_target().map(|t| t.position), Some(Vec3::X));

        tracker.candidate_mut(a).unwrap().active_in_hierarchy = false;
        tracker.update();
        assert_eq!(tracker.active_target().map(|t| t.position), Some(Vec3::Y));
    }

    #[test]
    fn no_active_candidate_clears_target() {
        let mut tracker = TargetTracker::new();
        let a = tracker.add("a", TargetTransform::from_position(Vec3::X));
        tracker.update();
        tracker.candidate_mut(a).unwrap().active_in_hierarchy = false;
        tracker.update();
        assert!(tracker.active_target().is_none());
    }
}
