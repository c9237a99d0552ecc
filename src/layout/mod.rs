//! Rendering layout for moves.
//!
//! Nothing here draws anything. The renderer asks for a visual position and
//! a color per move and uses them for markers and chain lines.

mod colors;
mod disambiguation;

pub use colors::{move_colors, Color, ColorRange, MoveColor};
pub use disambiguation::{
    visual_positions, LayoutConfig, VisualPosition, DEFAULT_DISAMBIGUATION_DISTANCE,
};
