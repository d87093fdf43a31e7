//! Match-3 resolution engine
//!
//! Re-exports the full public surface: grid creation and access, match
//! detection, power activation, cascade resolution, the swap
//! orchestrator, and the terminal playback layer.
//!
//! The typical flow:
//!
//! ```
//! use nebula_match::{Grid, SimpleRng, SwapOptions, handle_swap_and_resolve, find_hint};
//!
//! let mut rng = SimpleRng::new(42);
//! let mut grid = Grid::generate(9, 9, 8, &mut rng);
//! if let Some((a, b)) = find_hint(&grid) {
//!     let outcome = handle_swap_and_resolve(&mut grid, a, b, &SwapOptions::default(), &mut rng);
//!     assert!(!grid.has_holes());
//!     assert!(outcome.phases.len() >= 2);
//! }
//! ```

pub use nebula_match_core::{
    apply_removals_cascading, find_hint, find_matches, is_valid_swap, resolve_all, resolve_once,
    swap_effect, CoordSet, Effect, Grid, MatchGroup, PassOutcome, Phase, PowerCreation,
    ResolveError, ResolveOutcome, SimpleRng, SwapBlast, SwapTrigger, MAX_CASCADE_PASSES,
};
pub use nebula_match_engine::{compute_score, handle_swap_and_resolve, SwapOptions, SwapOutcome};
pub use nebula_match_term::{board_rows, cell_glyph, describe_phase, TerminalRenderer};
pub use nebula_match_types::{
    Cell, ComboKind, Orientation, Pos, PowerKind, SymbolId, Tile, DEFAULT_COLS,
    DEFAULT_PALETTE_SIZE, DEFAULT_ROWS,
};
