//! Entity vs obstacle overlap tests
//!
//! The entity is an axis-aligned square at a fixed x. An obstacle is two
//! columns sharing an x span; the entity is safe inside that span only while
//! it fits entirely within the gap.

use glam::Vec2;

use super::state::{Obstacle, SessionState};
use crate::tuning::Tuning;

/// Axis-aligned box, y grows downward
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Strict overlap on the x axis (touching edges do not overlap)
    #[inline]
    pub fn overlaps_x(&self, left: f32, right: f32) -> bool {
        self.max.x > left && self.min.x < right
    }
}

/// Bounding box of the controlled entity
pub fn entity_box(entity_y: f32, tuning: &Tuning) -> Aabb {
    let min = Vec2::new(tuning.entity_x, entity_y);
    Aabb::new(min, min + Vec2::splat(tuning.entity_size))
}

/// Does the entity hit this obstacle's columns?
pub fn hits_obstacle(entity: &Aabb, obstacle: &Obstacle, tuning: &Tuning) -> bool {
    if !entity.overlaps_x(obstacle.x, obstacle.trailing_edge(tuning.obstacle_width)) {
        return false;
    }
    entity.min.y < obstacle.gap_top || entity.max.y > obstacle.gap_bottom(tuning.gap_height)
}

/// First obstacle the entity collides with, if any
///
/// Any single hit is terminal, so evaluation order does not change whether
/// this returns `Some`.
pub fn find_collision(state: &SessionState, tuning: &Tuning) -> Option<u32> {
    let entity = entity_box(state.entity_y, tuning);
    state
        .obstacles
        .iter()
        .find(|o| hits_obstacle(&entity, o, tuning))
        .map(|o| o.id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn state_with(entity_y: f32, obstacles: Vec<Obstacle>) -> SessionState {
        let tuning = Tuning::default();
        let mut state = SessionState::new(&tuning);
        state.begin_run(&tuning, 1);
        state.entity_y = entity_y;
        state.obstacles = obstacles;
        state
    }

    #[test]
    fn test_inside_gap_is_safe() {
        let tuning = Tuning::default();
        // Gap 200..350, entity 250..290, columns overlapping horizontally
        let state = state_with(250.0, vec![Obstacle::new(0, 90.0, 200.0)]);
        assert_eq!(find_collision(&state, &tuning), None);
    }

    #[test]
    fn test_gap_edges_are_inclusive() {
        let tuning = Tuning::default();
        let top = state_with(200.0, vec![Obstacle::new(0, 90.0, 200.0)]);
        assert_eq!(find_collision(&top, &tuning), None);
        let bottom = state_with(310.0, vec![Obstacle::new(0, 90.0, 200.0)]);
        assert_eq!(find_collision(&bottom, &tuning), None);
    }

    #[test]
    fn test_hits_upper_and_lower_column() {
        let tuning = Tuning::default();
        let upper = state_with(199.0, vec![Obstacle::new(3, 90.0, 200.0)]);
        assert_eq!(find_collision(&upper, &tuning), Some(3));
        let lower = state_with(311.0, vec![Obstacle::new(4, 90.0, 200.0)]);
        assert_eq!(find_collision(&lower, &tuning), Some(4));
    }

    #[test]
    fn test_no_horizontal_overlap_is_safe() {
        let tuning = Tuning::default();
        // Right edge of entity at 140 touches left edge of obstacle
        let ahead = state_with(0.0, vec![Obstacle::new(0, 140.0, 300.0)]);
        assert_eq!(find_collision(&ahead, &tuning), None);
        // Obstacle right edge at 100 touches entity left edge
        let behind = state_with(0.0, vec![Obstacle::new(0, 40.0, 300.0)]);
        assert_eq!(find_collision(&behind, &tuning), None);
    }

    #[test]
    fn test_any_overlapping_obstacle_is_enough() {
        let tuning = Tuning::default();
        let state = state_with(
            250.0,
            vec![Obstacle::new(0, 60.0, 200.0), Obstacle::new(1, 120.0, 50.0)],
        );
        assert_eq!(find_collision(&state, &tuning), Some(1));
    }

    fn obstacle_strategy() -> impl Strategy<Value = Obstacle> {
        (0u32..1000, -60.0f32..800.0, 50.0f32..400.0)
            .prop_map(|(id, x, gap_top)| Obstacle::new(id, x, gap_top))
    }

    proptest! {
        #[test]
        fn prop_collision_independent_of_order(
            entity_y in 0.0f32..560.0,
            (obstacles, shuffled) in proptest::collection::vec(obstacle_strategy(), 0..8)
                .prop_flat_map(|v| (Just(v.clone()), Just(v).prop_shuffle())),
        ) {
            let tuning = Tuning::default();
            let forward = state_with(entity_y, obstacles);
            let shuffled = state_with(entity_y, shuffled);

            prop_assert_eq!(
                find_collision(&forward, &tuning).is_some(),
                find_collision(&shuffled, &tuning).is_some()
            );
        }
    }
}
