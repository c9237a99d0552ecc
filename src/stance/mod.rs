//! Stance derivation and navigation.
//!
//! A stance is derived from the ordered move list plus a single cursor. The
//! cursor is plain caller-owned state; it is re-clamped on every read rather
//! than trusted, so it stays usable across deletions, reorders and refreshes.
//!
//! # Example
//!
//! ```ignore
//! let nav = StanceNavigator::new(&moves);
//! let mut cursor = nav.select_first();
//! while nav.has_next(cursor) {
//!     cursor = nav.select_next(cursor);
//!     render(nav.stance(cursor));
//! }
//! ```

mod cursor;
mod derive;

pub use cursor::{StanceCursor, StanceNavigator};
pub use derive::{derive_stance, Stance};
