//! In-memory reference authority.

use crate::error::{BetaError, Result};
use crate::sequence::{apply_operation, validate_sequence, SequenceOperation};
use crate::types::{BodyPart, Move};
use std::collections::HashSet;
use tracing::debug;

/// The system of record for a beta's moves.
///
/// An authority receives the same mutation intents the session predicts
/// locally, applies them for real, and returns the full confirmed list. It
/// alone decides `is_start`.
pub trait Authority {
    /// Apply an operation and return the confirmed move list.
    fn commit(&mut self, operation: &SequenceOperation) -> Result<Vec<Move>>;

    /// The current confirmed move list.
    fn moves(&self) -> &[Move];
}

/// Authority that keeps the move list in memory.
///
/// Unlike the local prediction it is strict: operations on unknown moves are
/// rejected, as are inserts that reuse an id.
#[derive(Clone, Debug, Default)]
pub struct InMemoryAuthority {
    moves: Vec<Move>,
}

impl InMemoryAuthority {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing, valid move list. Start flags are re-derived.
    pub fn with_moves(mut moves: Vec<Move>) -> Result<Self> {
        validate_sequence(&moves)?;
        derive_start_flags(&mut moves);
        Ok(Self { moves })
    }

    fn check(&self, operation: &SequenceOperation) -> Result<()> {
        let target = operation.target();
        let exists = self.moves.iter().any(|mv| &mv.id == target);
        match operation {
            SequenceOperation::Insert { .. } if exists => {
                Err(BetaError::DuplicateMove(target.clone()))
            }
            SequenceOperation::Insert { .. } => Ok(()),
            _ if !exists => Err(BetaError::MoveNotFound(target.clone())),
            _ => Ok(()),
        }
    }
}

impl Authority for InMemoryAuthority {
    fn commit(&mut self, operation: &SequenceOperation) -> Result<Vec<Move>> {
        self.check(operation)?;

        let mut moves = apply_operation(std::mem::take(&mut self.moves), operation.clone());
        derive_start_flags(&mut moves);
        debug!(target_move = %operation.target(), count = moves.len(), "operation committed");

        self.moves = moves;
        Ok(self.moves.clone())
    }

    fn moves(&self) -> &[Move] {
        &self.moves
    }
}

/// Recompute `is_start` for a sorted move list.
///
/// A start move is any move made before the first time some body part makes
/// its *second* move. So a beta has between one and four start moves, and if
/// no body part ever moves twice, every move is a start move.
pub fn derive_start_flags(moves: &mut [Move]) {
    let mut seen: HashSet<BodyPart> = HashSet::with_capacity(BodyPart::ALL.len());
    let first_non_start = moves
        .iter()
        .find(|mv| !seen.insert(mv.body_part))
        .map_or(u32::MAX, |mv| mv.order);

    for mv in moves.iter_mut() {
        mv.is_start = mv.order < first_non_start;
    }
}
