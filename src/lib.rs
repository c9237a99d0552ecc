//! # Beta Engine
//!
//! Move sequencing and stance derivation for climbing betas. A beta is an
//! ordered list of limb placements ("moves") on a problem's holds.
//!
//! ## Core Concepts
//!
//! - **Sequence**: dense, 1-indexed move orders kept valid under insert,
//!   reorder and delete; a missing id is a no-op and positions are clamped
//! - **Stance**: each limb's most recent move at a caller-owned cursor
//! - **Layout**: visual offsets that spread moves sharing a hold
//! - **Authority**: the system of record, which owns `is_start` and always
//!   wins over local predictions
//! - **Session**: optimistic predictions, reconciliation and the cursor for
//!   one editor
//!
//! ## Example
//!
//! ```ignore
//! use beta_engine::{insert_move, reorder_move, derive_stance, MoveInput, StanceCursor};
//!
//! let moves = insert_move(moves, MoveInput::on_hold("m4", BodyPart::LeftHand, &hold), 2);
//! let moves = reorder_move(moves, &"m4".into(), 4);
//!
//! let stance = derive_stance(&moves, StanceCursor::at(3));
//! let positions = visual_positions(&moves, &LayoutConfig::default());
//! ```

pub mod authority;
pub mod config;
pub mod error;
pub mod geometry;
pub mod layout;
pub mod sequence;
pub mod session;
pub mod stance;
pub mod types;

// Re-exports
pub use authority::{check_prediction, derive_start_flags, Authority, InMemoryAuthority};
pub use config::EngineConfig;
pub use error::{BetaError, Result};
pub use geometry::Point;
pub use layout::{
    move_colors, visual_positions, Color, ColorRange, LayoutConfig, MoveColor, VisualPosition,
};
pub use sequence::{
    annotate_move, apply_operation, chain, chain_links, chains, delete_move, insert_move,
    insertion_order_after, last_in_chain_ids, relocate_move, reorder_move, validate_sequence,
    ChainLink, SequenceOperation,
};
pub use session::{
    BetaSession, DropReason, MutationId, PendingMutation, SessionConfig, SessionEvent,
    SessionHandle, SubscriptionId,
};
pub use stance::{derive_stance, Stance, StanceCursor, StanceNavigator};
pub use types::*;
