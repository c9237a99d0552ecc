//! Body position snapshots.

use crate::types::{BodyPart, Move, MoveId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::warn;

use super::cursor::{StanceCursor, StanceNavigator};

/// The climber's body position at one point in a beta: for each limb, the
/// move that currently represents it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Stance(BTreeMap<BodyPart, MoveId>);

impl Stance {
    /// The move currently representing a limb.
    pub fn get(&self, body_part: BodyPart) -> Option<&MoveId> {
        self.0.get(&body_part)
    }

    /// Whether a move is part of this stance.
    pub fn contains(&self, id: &MoveId) -> bool {
        self.0.values().any(|member| member == id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (BodyPart, &MoveId)> {
        self.0.iter().map(|(part, id)| (*part, id))
    }
}

/// Derive the stance for a cursor.
///
/// The cursor is normalized against `moves` first, so a cursor left stale by
/// an edit still yields a sensible stance.
pub fn derive_stance(moves: &[Move], cursor: StanceCursor) -> Stance {
    StanceNavigator::new(moves).stance(cursor)
}

/// Last-write-wins scan over every move up to and including `index`.
pub(super) fn scan(moves: &[Move], index: usize) -> Stance {
    let mut stance = BTreeMap::new();
    let last_order = index as u64 + 1;

    // Moves are sorted by order, so the last one seen per limb is the most recent
    for mv in moves.iter().take_while(|mv| u64::from(mv.order) <= last_order) {
        if mv.anchor.is_none() {
            warn!(id = %mv.id, "move has no anchor, excluded from stance");
            continue;
        }
        stance.insert(mv.body_part, mv.id.clone());
    }

    Stance(stance)
}
