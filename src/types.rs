//! Core types for betas and their moves.

use crate::error::BetaError;
use crate::geometry::Point;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Unique identifier for a move within a beta.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MoveId(pub String);

impl MoveId {
    pub fn new(id: impl Into<String>) -> Self {
        MoveId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for MoveId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MoveId({})", self.0)
    }
}

impl fmt::Display for MoveId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for MoveId {
    fn from(s: &str) -> Self {
        MoveId(s.to_string())
    }
}

/// Unique identifier for a hold on a problem.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HoldId(pub String);

impl fmt::Debug for HoldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HoldId({})", self.0)
    }
}

impl fmt::Display for HoldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for HoldId {
    fn from(s: &str) -> Self {
        HoldId(s.to_string())
    }
}

/// The limb that makes a move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BodyPart {
    LeftHand,
    RightHand,
    LeftFoot,
    RightFoot,
}

impl BodyPart {
    /// All body parts, top-left to bottom-right.
    pub const ALL: [BodyPart; 4] = [
        BodyPart::LeftHand,
        BodyPart::RightHand,
        BodyPart::LeftFoot,
        BodyPart::RightFoot,
    ];

    /// Body parts sorted counter-clockwise, following the unit circle from
    /// angle 0. Each one owns a 90° slice around a shared hold.
    pub const COUNTER_CLOCKWISE: [BodyPart; 4] = [
        BodyPart::RightHand,
        BodyPart::LeftHand,
        BodyPart::LeftFoot,
        BodyPart::RightFoot,
    ];

    /// Index of this body part's slice in [`BodyPart::COUNTER_CLOCKWISE`].
    pub fn quadrant(self) -> usize {
        match self {
            BodyPart::RightHand => 0,
            BodyPart::LeftHand => 1,
            BodyPart::LeftFoot => 2,
            BodyPart::RightFoot => 3,
        }
    }

    /// Wire name, e.g. `LEFT_HAND`.
    pub fn as_str(self) -> &'static str {
        match self {
            BodyPart::LeftHand => "LEFT_HAND",
            BodyPart::RightHand => "RIGHT_HAND",
            BodyPart::LeftFoot => "LEFT_FOOT",
            BodyPart::RightFoot => "RIGHT_FOOT",
        }
    }
}

/// User-friendly label, e.g. "Left Hand".
impl fmt::Display for BodyPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            BodyPart::LeftHand => "Left Hand",
            BodyPart::RightHand => "Right Hand",
            BodyPart::LeftFoot => "Left Foot",
            BodyPart::RightFoot => "Right Foot",
        };
        f.write_str(label)
    }
}

impl FromStr for BodyPart {
    type Err = BetaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BodyPart::ALL
            .into_iter()
            .find(|part| part.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| BetaError::InvalidBodyPart(s.to_string()))
    }
}

/// A fixed point of contact on the problem image.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Hold {
    pub id: HoldId,
    pub position: Point,
}

/// Where a move is placed: on a hold, or free-floating (smear, flag, ...).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Anchor {
    /// Attached to a hold. The position is the hold's position.
    Hold { hold: HoldId, position: Point },

    /// Free-floating at its own position.
    Free { position: Point },
}

impl Anchor {
    /// Anchor a move to a hold.
    pub fn hold(hold: &Hold) -> Self {
        Anchor::Hold {
            hold: hold.id.clone(),
            position: hold.position,
        }
    }

    pub fn free(position: Point) -> Self {
        Anchor::Free { position }
    }

    /// The true (undisambiguated) position of this anchor.
    pub fn position(&self) -> Point {
        match self {
            Anchor::Hold { position, .. } | Anchor::Free { position } => *position,
        }
    }

    /// The hold this anchor is attached to, if any.
    pub fn hold_id(&self) -> Option<&HoldId> {
        match self {
            Anchor::Hold { hold, .. } => Some(hold),
            Anchor::Free { .. } => None,
        }
    }

    pub fn is_free(&self) -> bool {
        matches!(self, Anchor::Free { .. })
    }
}

/// A single limb placement within a beta.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Move {
    /// Stable identity within the beta.
    pub id: MoveId,

    /// 1-indexed position among all moves in the beta.
    pub order: u32,

    pub body_part: BodyPart,

    /// Part of the opening stance. Owned by the authority; the sequence
    /// operations only carry it through.
    #[serde(default)]
    pub is_start: bool,

    /// `None` when the anchor data is missing, in which case the move is
    /// skipped by layout and stance derivation.
    pub anchor: Option<Anchor>,

    #[serde(default)]
    pub annotation: String,
}

impl Move {
    /// Build a move at the given order. Mostly useful for fixtures.
    pub fn new(id: impl Into<String>, order: u32, body_part: BodyPart, anchor: Anchor) -> Self {
        Self {
            id: MoveId::new(id),
            order,
            body_part,
            is_start: false,
            anchor: Some(anchor),
            annotation: String::new(),
        }
    }

    /// Mark this move as part of the opening stance.
    pub fn with_start(mut self, is_start: bool) -> Self {
        self.is_start = is_start;
        self
    }

    pub fn with_annotation(mut self, annotation: impl Into<String>) -> Self {
        self.annotation = annotation.into();
        self
    }
}

/// Input for creating a new move (before its order is assigned).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MoveInput {
    pub id: MoveId,
    pub body_part: BodyPart,
    pub anchor: Option<Anchor>,
    #[serde(default)]
    pub annotation: String,
}

impl MoveInput {
    /// A new move attached to a hold.
    pub fn on_hold(id: impl Into<String>, body_part: BodyPart, hold: &Hold) -> Self {
        Self {
            id: MoveId::new(id),
            body_part,
            anchor: Some(Anchor::hold(hold)),
            annotation: String::new(),
        }
    }

    /// A new free-floating move.
    pub fn free(id: impl Into<String>, body_part: BodyPart, position: Point) -> Self {
        Self {
            id: MoveId::new(id),
            body_part,
            anchor: Some(Anchor::free(position)),
            annotation: String::new(),
        }
    }

    pub fn with_annotation(mut self, annotation: impl Into<String>) -> Self {
        self.annotation = annotation.into();
        self
    }

    /// Materialize the move at `order`. New moves are never start moves
    /// until the authority says otherwise.
    pub fn into_move(self, order: u32) -> Move {
        Move {
            id: self.id,
            order,
            body_part: self.body_part,
            is_start: false,
            anchor: self.anchor,
            annotation: self.annotation,
        }
    }
}

/// Identifier for a beta, used by sessions to discard stale responses.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BetaId(pub String);

impl fmt::Debug for BetaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BetaId({})", self.0)
    }
}

impl fmt::Display for BetaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for BetaId {
    fn from(s: &str) -> Self {
        BetaId(s.to_string())
    }
}
