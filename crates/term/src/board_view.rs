//! Pure board-to-text projection
//!
//! Builds styled cell glyphs for the renderer without touching the
//! terminal, so it stays testable. Symbols map to a fixed color wheel;
//! power tiles override the glyph so they read at a glance.

use crossterm::style::Color;

use nebula_match_core::{Grid, Phase};
use nebula_match_types::{Orientation, Pos, PowerKind, SymbolId, Tile};

/// One rendered cell: a glyph plus its foreground color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellGlyph {
    pub ch: char,
    pub color: Color,
}

const SYMBOL_GLYPHS: [char; 8] = ['●', '■', '▲', '◆', '★', '♦', '♥', '♣'];

const SYMBOL_COLORS: [Color; 8] = [
    Color::Red,
    Color::Green,
    Color::Yellow,
    Color::Blue,
    Color::Magenta,
    Color::Cyan,
    Color::White,
    Color::DarkYellow,
];

pub fn symbol_color(value: SymbolId) -> Color {
    SYMBOL_COLORS[value as usize % SYMBOL_COLORS.len()]
}

/// Glyph for a single cell; holes render as a dim dot.
pub fn cell_glyph(cell: Option<Tile>) -> CellGlyph {
    let Some(tile) = cell else {
        return CellGlyph {
            ch: '·',
            color: Color::DarkGrey,
        };
    };
    let ch = match tile.power {
        Some(PowerKind::Striped) => match tile.stripe_orientation() {
            Orientation::Horizontal => '═',
            Orientation::Vertical => '║',
        },
        Some(PowerKind::Wrapped) => '▣',
        Some(PowerKind::ColorBomb) => '◉',
        Some(PowerKind::Bomb) => '✹',
        Some(PowerKind::Hammer) => '✚',
        None => SYMBOL_GLYPHS[tile.value as usize % SYMBOL_GLYPHS.len()],
    };
    CellGlyph {
        ch,
        color: symbol_color(tile.value),
    }
}

/// Project a whole grid into rows of glyphs
pub fn board_rows(grid: &Grid) -> Vec<Vec<CellGlyph>> {
    (0..grid.rows())
        .map(|row| {
            (0..grid.cols())
                .map(|col| cell_glyph(grid.tile(Pos::new(row, col))))
                .collect()
        })
        .collect()
}

/// Short human-readable caption for a phase, shown in the status line
pub fn describe_phase(phase: &Phase) -> String {
    match phase {
        Phase::AfterSwap { .. } => "swap".to_string(),
        Phase::MatchFound { groups, creations, .. } => {
            if creations.is_empty() {
                format!("match x{}", groups.len())
            } else {
                format!("match x{} (+{} power)", groups.len(), creations.len())
            }
        }
        Phase::PowerActivated { removals, .. } => {
            format!("power blast ({} tiles)", removals.len())
        }
        Phase::AfterRemove { removed, .. } => format!("removed {removed}"),
        Phase::AfterGravity { .. } => "gravity".to_string(),
        Phase::AfterRefill { lucky, .. } => {
            if lucky.is_empty() {
                "refill".to_string()
            } else {
                format!("refill ({} lucky)", lucky.len())
            }
        }
        Phase::NoMatch { .. } => "settled".to_string(),
    }
}
