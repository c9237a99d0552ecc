//! Sequence operation application.
//!
//! Every function here takes the move list by value and hands back the new
//! list. They are total: a missing id is a no-op and an out-of-range order is
//! clamped to the nearest valid boundary. Moves are expected to be sorted by
//! `order` on input.

use crate::error::{BetaError, Result};
use crate::types::{Anchor, Move, MoveId, MoveInput};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::debug;

/// A mutation intent on a beta's move list.
///
/// The same value is applied locally as a prediction and sent to the
/// authority, which applies it for real.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum SequenceOperation {
    /// Insert a new move at the requested order.
    Insert { input: MoveInput, order: i64 },

    /// Remove a move.
    Delete { id: MoveId },

    /// Move an existing move to a new order.
    Reorder { id: MoveId, order: i64 },

    /// Change where a move is placed.
    Relocate { id: MoveId, anchor: Anchor },

    /// Replace a move's annotation.
    Annotate { id: MoveId, annotation: String },
}

impl SequenceOperation {
    /// The move this operation targets.
    pub fn target(&self) -> &MoveId {
        match self {
            SequenceOperation::Insert { input, .. } => &input.id,
            SequenceOperation::Delete { id }
            | SequenceOperation::Reorder { id, .. }
            | SequenceOperation::Relocate { id, .. }
            | SequenceOperation::Annotate { id, .. } => id,
        }
    }
}

/// Apply a sequence operation to a move list.
pub fn apply_operation(moves: Vec<Move>, operation: SequenceOperation) -> Vec<Move> {
    match operation {
        SequenceOperation::Insert { input, order } => insert_move(moves, input, order),
        SequenceOperation::Delete { id } => delete_move(moves, &id),
        SequenceOperation::Reorder { id, order } => reorder_move(moves, &id, order),
        SequenceOperation::Relocate { id, anchor } => relocate_move(moves, &id, anchor),
        SequenceOperation::Annotate { id, annotation } => annotate_move(moves, &id, annotation),
    }
}

/// Insert a new move. The requested order is clamped into `[1, N+1]`.
///
/// Inserting an id that is already present is a no-op, so replaying an
/// insert the list already contains never duplicates the move.
pub fn insert_move(mut moves: Vec<Move>, input: MoveInput, requested_order: i64) -> Vec<Move> {
    if position_of(&moves, &input.id).is_some() {
        debug!(id = %input.id, "insert of existing move ignored");
        return moves;
    }

    let index = clamp_index(requested_order, moves.len() + 1);
    moves.insert(index, input.into_move(0));
    renumber(&mut moves);
    moves
}

/// Remove a move and close the gap it leaves.
pub fn delete_move(mut moves: Vec<Move>, id: &MoveId) -> Vec<Move> {
    let Some(index) = position_of(&moves, id) else {
        debug!(%id, "delete of unknown move ignored");
        return moves;
    };

    moves.remove(index);
    renumber(&mut moves);
    moves
}

/// Move an existing move to a new order. The requested order is clamped into
/// `[1, N]`, and every other move shifts to make room.
pub fn reorder_move(mut moves: Vec<Move>, id: &MoveId, requested_order: i64) -> Vec<Move> {
    let Some(old_index) = position_of(&moves, id) else {
        debug!(%id, "reorder of unknown move ignored");
        return moves;
    };

    let new_index = clamp_index(requested_order, moves.len());
    if new_index == old_index {
        return moves;
    }

    let target = moves.remove(old_index);
    moves.insert(new_index, target);
    renumber(&mut moves);
    moves
}

/// Attach a move to a different hold, or free it.
pub fn relocate_move(mut moves: Vec<Move>, id: &MoveId, anchor: Anchor) -> Vec<Move> {
    match moves.iter_mut().find(|mv| &mv.id == id) {
        Some(mv) => mv.anchor = Some(anchor),
        None => debug!(%id, "relocate of unknown move ignored"),
    }
    moves
}

pub fn annotate_move(mut moves: Vec<Move>, id: &MoveId, annotation: String) -> Vec<Move> {
    match moves.iter_mut().find(|mv| &mv.id == id) {
        Some(mv) => mv.annotation = annotation,
        None => debug!(%id, "annotation of unknown move ignored"),
    }
    moves
}

/// The order to request when inserting a move directly after `previous`.
///
/// Without a previous move (or with one that is no longer in the list) the
/// new move is appended.
pub fn insertion_order_after(moves: &[Move], previous: Option<&MoveId>) -> i64 {
    previous
        .and_then(|id| moves.iter().find(|mv| &mv.id == id))
        .map(|mv| i64::from(mv.order) + 1)
        .unwrap_or(moves.len() as i64 + 1)
}

/// Check the dense order invariant and id uniqueness.
///
/// The list must be sorted with orders exactly `1..=N`.
pub fn validate_sequence(moves: &[Move]) -> Result<()> {
    let mut seen = HashSet::with_capacity(moves.len());
    for (index, mv) in moves.iter().enumerate() {
        let expected = index as u32 + 1;
        if mv.order != expected {
            return Err(BetaError::InvalidOrder {
                id: mv.id.clone(),
                expected,
                got: mv.order,
            });
        }
        if !seen.insert(&mv.id) {
            return Err(BetaError::DuplicateMove(mv.id.clone()));
        }
    }
    Ok(())
}

fn position_of(moves: &[Move], id: &MoveId) -> Option<usize> {
    moves.iter().position(|mv| &mv.id == id)
}

/// Clamp a 1-indexed order into `[1, max]` and convert it to an index.
fn clamp_index(requested_order: i64, max: usize) -> usize {
    let clamped = requested_order.clamp(1, max.max(1) as i64);
    clamped as usize - 1
}

fn renumber(moves: &mut [Move]) {
    for (index, mv) in moves.iter_mut().enumerate() {
        mv.order = index as u32 + 1;
    }
}
