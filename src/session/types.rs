//! Session types: configuration, mutations and events.

use crate::sequence::SequenceOperation;
use crate::stance::StanceCursor;
use crate::types::BetaId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Configuration for a session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Max buffered events per subscriber before it is dropped.
    /// Default: 1000
    pub event_buffer_size: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            event_buffer_size: 1000,
        }
    }
}

/// Identifier for a dispatched mutation, unique within a session.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MutationId(pub u64);

impl fmt::Debug for MutationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MutationId({})", self.0)
    }
}

impl fmt::Display for MutationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A mutation that has been predicted locally and is waiting on the
/// authority.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PendingMutation {
    pub id: MutationId,

    /// The beta the mutation was dispatched against. Responses for a beta
    /// that is no longer loaded are discarded.
    pub beta: BetaId,

    /// The intent to send to the authority.
    pub operation: SequenceOperation,
}

/// Events emitted by a session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionEvent {
    /// A beta was loaded; the stance was reset.
    BetaLoaded { beta: BetaId, move_count: usize },

    /// The visible move list changed (prediction, confirmation or refresh).
    MovesChanged { move_count: usize, pending: usize },

    /// The stance cursor moved.
    StanceChanged { cursor: StanceCursor },

    /// The authority confirmed a mutation.
    MutationConfirmed { mutation: MutationId },

    /// The authority rejected a mutation; its prediction was rolled back.
    MutationRejected { mutation: MutationId },

    /// Last event on a subscription before it is closed.
    Dropped { reason: DropReason },
}

/// Why a subscription was dropped.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DropReason {
    /// The subscriber's buffer filled up.
    BufferOverflow,
    Unsubscribed,
}

/// Unique identifier for a subscription.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub u64);

/// Receiving end of a session subscription.
pub struct SessionHandle {
    pub id: SubscriptionId,
    pub receiver: crossbeam_channel::Receiver<SessionEvent>,
}

impl SessionHandle {
    /// Block until the next event.
    pub fn recv(&self) -> Result<SessionEvent, crossbeam_channel::RecvError> {
        self.receiver.recv()
    }

    /// The next event if one is buffered.
    pub fn try_recv(&self) -> Result<SessionEvent, crossbeam_channel::TryRecvError> {
        self.receiver.try_recv()
    }

    pub fn recv_timeout(
        &self,
        timeout: std::time::Duration,
    ) -> Result<SessionEvent, crossbeam_channel::RecvTimeoutError> {
        self.receiver.recv_timeout(timeout)
    }

    /// Everything buffered right now, without blocking.
    pub fn drain(&self) -> Vec<SessionEvent> {
        self.receiver.try_iter().collect()
    }
}
