//! Visual separation of moves that share a hold.

use crate::geometry::Point;
use crate::types::{BodyPart, HoldId, Move, MoveId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::f64::consts::FRAC_PI_2;
use tracing::warn;

/// Default distance between a move's marker and its hold, when spread.
pub const DEFAULT_DISAMBIGUATION_DISTANCE: f64 = 5.0;

/// Layout configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Radius of the offset applied to moves sharing a hold, in the same
    /// units as move positions.
    pub disambiguation_distance: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            disambiguation_distance: DEFAULT_DISAMBIGUATION_DISTANCE,
        }
    }
}

/// Where a move should be drawn.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct VisualPosition {
    /// The move's true position (its hold, or its own free position).
    pub anchor: Point,

    /// Rendering-only nudge away from the anchor. Zero when the move has
    /// its anchor to itself.
    pub offset: Point,
}

impl VisualPosition {
    /// The position to render at.
    pub fn position(&self) -> Point {
        self.anchor + self.offset
    }
}

/// Compute the visual position of every move in a beta.
///
/// Moves that share a hold are spread around it: each body part owns a 90°
/// slice (right hand, left hand, left foot, right foot, counter-clockwise
/// from angle 0), and the `k` moves of one body part are evenly spaced inside
/// their slice at the `k` internal boundaries of `k+1` sub-slices, so no
/// marker ever sits on the edge between two limbs' slices.
///
/// A move alone on its hold, or a free move, keeps a zero offset. Moves with
/// no anchor are left out of the result. Input is expected sorted by order.
pub fn visual_positions(moves: &[Move], config: &LayoutConfig) -> HashMap<MoveId, VisualPosition> {
    let mut positions = HashMap::with_capacity(moves.len());
    let mut by_hold: HashMap<&HoldId, Vec<&Move>> = HashMap::new();

    for mv in moves {
        let Some(anchor) = &mv.anchor else {
            warn!(id = %mv.id, "move has no anchor, excluded from layout");
            continue;
        };

        positions.insert(
            mv.id.clone(),
            VisualPosition {
                anchor: anchor.position(),
                offset: Point::ZERO,
            },
        );

        // Free moves never share the *exact* same position
        if let Some(hold) = anchor.hold_id() {
            by_hold.entry(hold).or_default().push(mv);
        }
    }

    for hold_moves in by_hold.values().filter(|group| group.len() > 1) {
        for (mv, offset) in spread(hold_moves, config.disambiguation_distance) {
            if let Some(position) = positions.get_mut(&mv.id) {
                position.offset = offset;
            }
        }
    }

    positions
}

/// Offsets for one group of moves sharing a hold.
fn spread<'a>(hold_moves: &[&'a Move], radius: f64) -> Vec<(&'a Move, Point)> {
    let mut by_body_part: [Vec<&Move>; 4] = Default::default();
    for &mv in hold_moves {
        by_body_part[mv.body_part.quadrant()].push(mv);
    }

    let mut offsets = Vec::with_capacity(hold_moves.len());
    for body_part in BodyPart::COUNTER_CLOCKWISE {
        let mut part_moves = std::mem::take(&mut by_body_part[body_part.quadrant()]);
        if part_moves.is_empty() {
            continue;
        }
        part_moves.sort_by_key(|mv| mv.order);

        let slice_start = FRAC_PI_2 * body_part.quadrant() as f64;
        let subslice = FRAC_PI_2 / (part_moves.len() + 1) as f64;

        for (i, mv) in part_moves.into_iter().enumerate() {
            // i+1 so we never sit on the slice's edge
            let angle = slice_start + subslice * (i + 1) as f64;
            offsets.push((mv, Point::from_polar(radius, angle)));
        }
    }
    offsets
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Anchor, Hold};
    use std::f64::consts::FRAC_PI_4;

    const EPSILON: f64 = 1e-9;

    fn hold(id: &str, x: f64, y: f64) -> Hold {
        Hold {
            id: id.into(),
            position: Point::new(x, y),
        }
    }

    fn on_hold(id: &str, order: u32, body_part: BodyPart, hold: &Hold) -> Move {
        Move::new(id, order, body_part, Anchor::hold(hold))
    }

    fn assert_close(a: Point, b: Point) {
        assert!(
            (a.x - b.x).abs() < EPSILON && (a.y - b.y).abs() < EPSILON,
            "{:?} != {:?}",
            a,
            b
        );
    }

    #[test]
    fn test_lone_move_has_zero_offset() {
        let h = hold("h1", 10.0, 10.0);
        let moves = vec![on_hold("m1", 1, BodyPart::LeftHand, &h)];
        let positions = visual_positions(&moves, &LayoutConfig::default());

        let position = positions[&MoveId::from("m1")];
        assert!(position.offset.is_zero());
        assert_eq!(position.position(), Point::new(10.0, 10.0));
    }

    #[test]
    fn test_free_moves_are_not_spread() {
        let moves = vec![
            Move::new("m1", 1, BodyPart::LeftHand, Anchor::free(Point::new(3.0, 3.0))),
            Move::new("m2", 2, BodyPart::RightHand, Anchor::free(Point::new(3.0, 3.0))),
        ];
        let positions = visual_positions(&moves, &LayoutConfig::default());
        assert!(positions.values().all(|p| p.offset.is_zero()));
    }

    #[test]
    fn test_distinct_body_parts_get_their_quadrant_midpoints() {
        let h = hold("h1", 50.0, 50.0);
        let moves = vec![
            on_hold("rh", 1, BodyPart::RightHand, &h),
            on_hold("lh", 2, BodyPart::LeftHand, &h),
            on_hold("lf", 3, BodyPart::LeftFoot, &h),
            on_hold("rf", 4, BodyPart::RightFoot, &h),
        ];
        let config = LayoutConfig::default();
        let positions = visual_positions(&moves, &config);
        let r = config.disambiguation_distance;

        // One move per slice lands halfway through it
        assert_close(positions[&MoveId::from("rh")].offset, Point::from_polar(r, FRAC_PI_4));
        assert_close(
            positions[&MoveId::from("lh")].offset,
            Point::from_polar(r, FRAC_PI_2 + FRAC_PI_4),
        );
        assert_close(
            positions[&MoveId::from("lf")].offset,
            Point::from_polar(r, 2.0 * FRAC_PI_2 + FRAC_PI_4),
        );
        assert_close(
            positions[&MoveId::from("rf")].offset,
            Point::from_polar(r, 3.0 * FRAC_PI_2 + FRAC_PI_4),
        );

        // Hands up, feet down (screen y grows downward)
        assert!(positions[&MoveId::from("lh")].offset.y < 0.0);
        assert!(positions[&MoveId::from("rf")].offset.y > 0.0);
    }

    #[test]
    fn test_same_body_part_splits_its_slice() {
        let h = hold("h1", 0.0, 0.0);
        let moves = vec![
            on_hold("a", 1, BodyPart::RightHand, &h),
            on_hold("b", 2, BodyPart::RightHand, &h),
        ];
        let positions = visual_positions(&moves, &LayoutConfig::default());

        let third = FRAC_PI_2 / 3.0;
        assert_close(positions[&MoveId::from("a")].offset, Point::from_polar(5.0, third));
        assert_close(positions[&MoveId::from("b")].offset, Point::from_polar(5.0, 2.0 * third));
    }

    #[test]
    fn test_missing_anchor_is_excluded() {
        let h = hold("h1", 0.0, 0.0);
        let mut orphan = on_hold("orphan", 2, BodyPart::LeftFoot, &h);
        orphan.anchor = None;
        let moves = vec![on_hold("m1", 1, BodyPart::LeftHand, &h), orphan];

        let positions = visual_positions(&moves, &LayoutConfig::default());
        assert_eq!(positions.len(), 1);
        // The remaining move is alone on the hold now
        assert!(positions[&MoveId::from("m1")].offset.is_zero());
    }

    #[test]
    fn test_custom_radius() {
        let h = hold("h1", 0.0, 0.0);
        let moves = vec![
            on_hold("a", 1, BodyPart::LeftHand, &h),
            on_hold("b", 2, BodyPart::LeftFoot, &h),
        ];
        let config = LayoutConfig {
            disambiguation_distance: 12.0,
        };
        let positions = visual_positions(&moves, &config);
        for position in positions.values() {
            assert!((position.offset.magnitude() - 12.0).abs() < EPSILON);
        }
    }
}
