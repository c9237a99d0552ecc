//! Session state for one editor: the loaded beta, in-flight mutations and
//! the stance cursor.

use crate::authority::check_prediction;
use crate::config::EngineConfig;
use crate::error::{BetaError, Result};
use crate::layout::{move_colors, visual_positions, MoveColor, VisualPosition};
use crate::sequence::{apply_operation, validate_sequence, SequenceOperation};
use crate::stance::{Stance, StanceCursor, StanceNavigator};
use crate::types::{BetaId, Move, MoveId};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, warn};

use super::events::EventBroadcaster;
use super::types::{MutationId, PendingMutation, SessionEvent, SessionHandle, SubscriptionId};

#[derive(Default)]
struct SessionState {
    beta: Option<BetaId>,

    /// Last list returned by the authority.
    confirmed: Vec<Move>,

    /// Mutations awaiting the authority, in dispatch order.
    pending: Vec<PendingMutation>,

    /// `confirmed` with every pending prediction applied on top. This is
    /// what the UI renders.
    visible: Vec<Move>,

    cursor: StanceCursor,
}

impl SessionState {
    fn replay(&mut self) {
        self.visible = self
            .pending
            .iter()
            .fold(self.confirmed.clone(), |moves, pending| {
                apply_operation(moves, pending.operation.clone())
            });
    }

    fn moves_changed(&self) -> SessionEvent {
        SessionEvent::MovesChanged {
            move_count: self.visible.len(),
            pending: self.pending.len(),
        }
    }

    fn take_pending(&mut self, id: MutationId) -> Option<PendingMutation> {
        let index = self.pending.iter().position(|pending| pending.id == id)?;
        Some(self.pending.remove(index))
    }
}

/// An editor session over one beta at a time.
///
/// Mutations are predicted locally the moment they are dispatched, so the UI
/// never waits on the authority. When the authority answers, its list
/// replaces confirmed state wholesale (the last response to arrive wins)
/// and predictions still in flight are replayed on top. Responses for a beta
/// that has since been unloaded are discarded.
///
/// The session also owns the stance cursor, which is reset whenever a beta
/// is loaded and normalized against the visible moves on every read.
pub struct BetaSession {
    config: EngineConfig,
    state: RwLock<SessionState>,
    next_mutation: AtomicU64,
    events: EventBroadcaster,
}

impl BetaSession {
    pub fn new(config: EngineConfig) -> Self {
        let events = EventBroadcaster::new(config.session.event_buffer_size);
        Self {
            config,
            state: RwLock::new(SessionState::default()),
            next_mutation: AtomicU64::new(1),
            events,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Switch to a beta. Pending mutations for the previous beta are
    /// forgotten and the stance is reset.
    pub fn load_beta(&self, beta: BetaId, moves: Vec<Move>) -> Result<()> {
        validate_sequence(&moves)?;

        let events = {
            let mut state = self.state.write();
            if !state.pending.is_empty() {
                debug!(count = state.pending.len(), "discarding pending mutations on beta switch");
            }
            state.beta = Some(beta.clone());
            state.confirmed = moves;
            state.pending.clear();
            state.cursor = StanceCursor::EMPTY;
            state.replay();

            vec![
                SessionEvent::BetaLoaded {
                    beta,
                    move_count: state.visible.len(),
                },
                SessionEvent::StanceChanged {
                    cursor: StanceCursor::EMPTY,
                },
            ]
        };

        self.emit(events);
        Ok(())
    }

    /// Predict a mutation locally and record it as pending. The returned
    /// mutation is what should be sent to the authority.
    ///
    /// Inserting a move also selects the stance at the new move.
    pub fn dispatch(&self, operation: SequenceOperation) -> Result<PendingMutation> {
        let (pending, events) = {
            let mut state = self.state.write();
            let beta = state.beta.clone().ok_or(BetaError::NoBetaLoaded)?;

            let pending = PendingMutation {
                id: MutationId(self.next_mutation.fetch_add(1, Ordering::SeqCst)),
                beta,
                operation,
            };

            let visible = std::mem::take(&mut state.visible);
            state.visible = apply_operation(visible, pending.operation.clone());
            state.pending.push(pending.clone());

            let mut events = vec![state.moves_changed()];

            if let SequenceOperation::Insert { input, .. } = &pending.operation {
                let order = state
                    .visible
                    .iter()
                    .find(|mv| mv.id == input.id)
                    .map(|mv| i64::from(mv.order));
                if let Some(order) = order {
                    let cursor = StanceNavigator::new(&state.visible).select(order);
                    state.cursor = cursor;
                    events.push(SessionEvent::StanceChanged { cursor });
                }
            }

            (pending, events)
        };

        debug!(mutation = %pending.id, target_move = %pending.operation.target(), "mutation dispatched");
        self.emit(events);
        Ok(pending)
    }

    /// Accept the authority's response to a mutation.
    ///
    /// Returns `Ok(false)` when the response is stale (unknown mutation, or
    /// one dispatched against a beta that is no longer loaded) and was
    /// discarded.
    pub fn confirm(&self, mutation: MutationId, confirmed: Vec<Move>) -> Result<bool> {
        validate_sequence(&confirmed)?;

        let events = {
            let mut state = self.state.write();
            let Some(pending) = state.take_pending(mutation) else {
                debug!(%mutation, "discarding response for unknown mutation");
                return Ok(false);
            };

            let predicted = apply_operation(state.confirmed.clone(), pending.operation);
            if let Err(e) = check_prediction(&predicted, &confirmed) {
                warn!(%mutation, error = %e, "confirmed state replaces local prediction");
            }

            state.confirmed = confirmed;
            state.replay();

            vec![
                SessionEvent::MutationConfirmed { mutation },
                state.moves_changed(),
            ]
        };

        self.emit(events);
        Ok(true)
    }

    /// The authority refused a mutation: roll its prediction back.
    pub fn reject(&self, mutation: MutationId) -> bool {
        let events = {
            let mut state = self.state.write();
            if state.take_pending(mutation).is_none() {
                debug!(%mutation, "discarding rejection for unknown mutation");
                return false;
            }
            state.replay();

            vec![
                SessionEvent::MutationRejected { mutation },
                state.moves_changed(),
            ]
        };

        self.emit(events);
        true
    }

    /// Replace confirmed state with a fresh copy from the authority, e.g.
    /// after a refetch. Pending predictions are replayed on top.
    pub fn refresh(&self, confirmed: Vec<Move>) -> Result<()> {
        validate_sequence(&confirmed)?;

        let event = {
            let mut state = self.state.write();
            if state.beta.is_none() {
                return Err(BetaError::NoBetaLoaded);
            }
            state.confirmed = confirmed;
            state.replay();
            state.moves_changed()
        };

        self.emit(vec![event]);
        Ok(())
    }

    // --- Reads ---

    pub fn beta(&self) -> Option<BetaId> {
        self.state.read().beta.clone()
    }

    /// The moves to render: confirmed state plus pending predictions.
    pub fn moves(&self) -> Vec<Move> {
        self.state.read().visible.clone()
    }

    pub fn pending_count(&self) -> usize {
        self.state.read().pending.len()
    }

    /// The cursor, normalized against the visible moves.
    pub fn cursor(&self) -> StanceCursor {
        let state = self.state.read();
        StanceNavigator::new(&state.visible).normalize(state.cursor)
    }

    pub fn stance(&self) -> Stance {
        let state = self.state.read();
        StanceNavigator::new(&state.visible).stance(state.cursor)
    }

    /// The move the stance is currently defined by.
    pub fn stance_move(&self) -> Option<Move> {
        let state = self.state.read();
        StanceNavigator::new(&state.visible)
            .stance_move(state.cursor)
            .cloned()
    }

    pub fn has_next(&self) -> bool {
        let state = self.state.read();
        StanceNavigator::new(&state.visible).has_next(state.cursor)
    }

    pub fn has_previous(&self) -> bool {
        let state = self.state.read();
        StanceNavigator::new(&state.visible).has_previous(state.cursor)
    }

    pub fn visual_positions(&self) -> HashMap<MoveId, VisualPosition> {
        visual_positions(&self.state.read().visible, &self.config.layout)
    }

    pub fn colors(&self) -> HashMap<MoveId, MoveColor> {
        move_colors(&self.state.read().visible, &self.config.colors)
    }

    // --- Stance navigation ---

    pub fn select(&self, order: i64) {
        self.navigate(|nav, _| nav.select(order));
    }

    pub fn select_first(&self) {
        self.navigate(|nav, _| nav.select_first());
    }

    pub fn select_last(&self) {
        self.navigate(|nav, _| nav.select_last());
    }

    pub fn select_next(&self) {
        self.navigate(|nav, cursor| nav.select_next(cursor));
    }

    pub fn select_previous(&self) {
        self.navigate(|nav, cursor| nav.select_previous(cursor));
    }

    pub fn reset_stance(&self) {
        self.navigate(|nav, _| nav.reset());
    }

    fn navigate<F>(&self, f: F)
    where
        F: FnOnce(&StanceNavigator<'_>, StanceCursor) -> StanceCursor,
    {
        let changed = {
            let mut state = self.state.write();
            let cursor = f(&StanceNavigator::new(&state.visible), state.cursor);
            let changed = cursor != state.cursor;
            state.cursor = cursor;
            changed.then_some(cursor)
        };

        if let Some(cursor) = changed {
            self.emit(vec![SessionEvent::StanceChanged { cursor }]);
        }
    }

    // --- Subscriptions ---

    /// Subscribe to session events.
    pub fn subscribe(&self) -> SessionHandle {
        self.events.subscribe()
    }

    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.events.unsubscribe(id);
    }

    pub fn subscription_count(&self) -> usize {
        self.events.subscription_count()
    }

    fn emit(&self, events: Vec<SessionEvent>) {
        for event in events {
            self.events.broadcast(event);
        }
    }
}

impl Default for BetaSession {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}
