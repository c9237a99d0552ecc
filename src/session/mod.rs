//! Optimistic editing sessions.
//!
//! A session keeps what the UI shows consistent with what the authority
//! eventually confirms:
//! - Mutations are predicted locally and rendered right away
//! - Confirmed responses replace local state (server wins, no merge)
//! - Rejections roll the prediction back
//! - Late responses for a beta that is no longer loaded are discarded
//!
//! # Example
//!
//! ```ignore
//! let session = BetaSession::new(EngineConfig::default());
//! session.load_beta("beta1".into(), moves)?;
//!
//! let pending = session.dispatch(SequenceOperation::Reorder { id, order: 3 })?;
//! // ... send pending.operation to the authority ...
//! match authority.commit(&pending.operation) {
//!     Ok(confirmed) => session.confirm(pending.id, confirmed)?,
//!     Err(_) => session.reject(pending.id),
//! };
//! ```

mod beta_session;
mod events;
mod types;

pub use beta_session::BetaSession;
pub use events::EventBroadcaster;
pub use types::{
    DropReason, MutationId, PendingMutation, SessionConfig, SessionEvent, SessionHandle,
    SubscriptionId,
};
