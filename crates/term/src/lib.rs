//! Terminal playback layer: pure board projection plus a crossterm
//! frame renderer for driving phase sequences on screen.

pub mod board_view;
pub mod renderer;

pub use board_view::{board_rows, cell_glyph, describe_phase, CellGlyph};
pub use renderer::TerminalRenderer;
