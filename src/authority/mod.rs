//! The authoritative side of a beta.
//!
//! The UI predicts every mutation locally with the sequence operations and
//! renders the prediction immediately. The authority applies the same
//! intent for real and has the final word: its response replaces local state
//! wholesale. The prediction must match it on membership and order; only
//! `is_start` may lag behind.

mod backend;
mod contract;

pub use backend::{derive_start_flags, Authority, InMemoryAuthority};
pub use contract::check_prediction;
