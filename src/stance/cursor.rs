//! The stance cursor and its navigation.

use crate::types::Move;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::warn;

use super::derive::{scan, Stance};

/// Index into a beta's full ordered move list, naming the most recent move
/// of the stance being viewed.
///
/// The cursor is owned by the caller and may go stale as the move list
/// changes; every read normalizes it against the current list. On the wire
/// it is a plain integer with `-1` for an empty stance.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub struct StanceCursor(Option<usize>);

impl StanceCursor {
    /// No stance selected.
    pub const EMPTY: StanceCursor = StanceCursor(None);

    /// Point at a move index.
    pub const fn at(index: usize) -> Self {
        StanceCursor(Some(index))
    }

    /// Build from the raw integer form. Any negative value is empty.
    pub fn from_raw(raw: i64) -> Self {
        usize::try_from(raw).map(StanceCursor::at).unwrap_or(StanceCursor::EMPTY)
    }

    /// The raw integer form, `-1` when empty.
    pub fn as_raw(self) -> i64 {
        self.0.map_or(-1, |index| index as i64)
    }

    pub fn index(self) -> Option<usize> {
        self.0
    }

    pub fn is_empty(self) -> bool {
        self.0.is_none()
    }
}

impl fmt::Debug for StanceCursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StanceCursor({})", self.as_raw())
    }
}

impl From<i64> for StanceCursor {
    fn from(raw: i64) -> Self {
        StanceCursor::from_raw(raw)
    }
}

impl From<StanceCursor> for i64 {
    fn from(cursor: StanceCursor) -> i64 {
        cursor.as_raw()
    }
}

/// Read-only view over a move list for deriving and moving a stance cursor.
///
/// Nothing is cached: every call normalizes the given cursor against the
/// list, because the list can change for reasons unrelated to the cursor.
#[derive(Clone, Copy, Debug)]
pub struct StanceNavigator<'a> {
    moves: &'a [Move],
}

impl<'a> StanceNavigator<'a> {
    pub fn new(moves: &'a [Move]) -> Self {
        Self { moves }
    }

    /// Index of the first move that can be selected as the stance move.
    ///
    /// This is the *last* start move: selecting an earlier start move would
    /// just show the start stance again. When no move is flagged as a start
    /// move, every move is selectable.
    pub fn first_selectable(&self) -> Option<usize> {
        if self.moves.is_empty() {
            return None;
        }
        Some(self.moves.iter().rposition(|mv| mv.is_start).unwrap_or(0))
    }

    /// Index of the final move, if any.
    pub fn last_selectable(&self) -> Option<usize> {
        self.moves.len().checked_sub(1)
    }

    /// Clamp a cursor into `[first_selectable, N-1]`. An empty cursor stays
    /// empty, and any cursor over an empty list becomes empty.
    pub fn normalize(&self, cursor: StanceCursor) -> StanceCursor {
        match (cursor.index(), self.first_selectable(), self.last_selectable()) {
            (Some(index), Some(first), Some(last)) => StanceCursor::at(index.clamp(first, last)),
            _ => StanceCursor::EMPTY,
        }
    }

    /// The stance at a cursor.
    pub fn stance(&self, cursor: StanceCursor) -> Stance {
        match self.normalize(cursor).index() {
            Some(index) => scan(self.moves, index),
            None => Stance::default(),
        }
    }

    /// The move the cursor points at, after normalization.
    pub fn stance_move(&self, cursor: StanceCursor) -> Option<&'a Move> {
        self.normalize(cursor)
            .index()
            .and_then(|index| self.moves.get(index))
    }

    /// Can we step backwards?
    pub fn has_previous(&self, cursor: StanceCursor) -> bool {
        match (self.normalize(cursor).index(), self.first_selectable()) {
            (Some(index), Some(first)) => index > first,
            _ => false,
        }
    }

    /// Can we step forwards?
    pub fn has_next(&self, cursor: StanceCursor) -> bool {
        match (self.normalize(cursor).index(), self.last_selectable()) {
            (Some(index), Some(last)) => index < last,
            _ => false,
        }
    }

    /// Jump to the move with the given order, e.g. right after inserting it.
    pub fn select(&self, order: i64) -> StanceCursor {
        StanceCursor::from_raw(order.saturating_sub(1).max(0))
    }

    pub fn select_first(&self) -> StanceCursor {
        self.first_selectable()
            .map_or(StanceCursor::EMPTY, StanceCursor::at)
    }

    pub fn select_last(&self) -> StanceCursor {
        self.last_selectable()
            .map_or(StanceCursor::EMPTY, StanceCursor::at)
    }

    /// Step one move forward. Stepping past the last move is a caller bug:
    /// it is logged and the cursor comes back unchanged.
    pub fn select_next(&self, cursor: StanceCursor) -> StanceCursor {
        self.step(cursor, 1)
    }

    /// Step one move back, never before the first selectable move.
    pub fn select_previous(&self, cursor: StanceCursor) -> StanceCursor {
        self.step(cursor, -1)
    }

    /// Clear the stance.
    pub fn reset(&self) -> StanceCursor {
        StanceCursor::EMPTY
    }

    fn step(&self, cursor: StanceCursor, steps: i64) -> StanceCursor {
        let bounds = self.first_selectable().zip(self.last_selectable());
        let (Some(index), Some((first, last))) = (self.normalize(cursor).index(), bounds) else {
            warn!(steps, "attempted to step an empty stance");
            return cursor;
        };

        let target = index as i64 + steps;
        if target < first as i64 || target > last as i64 {
            warn!(steps, ?cursor, "attempted to step stance when not possible");
            return cursor;
        }

        StanceCursor::at(target as usize)
    }
}
