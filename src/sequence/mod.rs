//! Ordered move sequences.
//!
//! A beta's moves carry a dense, 1-indexed `order` across all limbs. The
//! operations here keep that invariant under insertion, reordering and
//! deletion, and are used both to apply authoritative results and to predict
//! them before the authority responds.

mod chains;
mod operations;

pub use chains::{chain, chain_links, chains, last_in_chain_ids, ChainLink};
pub use operations::{
    annotate_move, apply_operation, delete_move, insert_move, insertion_order_after,
    relocate_move, reorder_move, validate_sequence, SequenceOperation,
};
