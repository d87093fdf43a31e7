//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the engine.
//! All types are pure serializable data with no behavior beyond small
//! helpers, making them usable in any context (resolution core, terminal
//! playback, test harnesses, external renderers).
//!
//! # Board Dimensions
//!
//! The default board matches the original level layout:
//!
//! - **Columns**: 9 (indexed 0-8, left to right)
//! - **Rows**: 9 (indexed 0-8, top to bottom)
//! - **Palette**: 8 symbols (values 0-7)
//!
//! Dimensions and palette size are grid-creation parameters; the engine
//! itself handles any rectangular board.
//!
//! # Scoring Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `POINTS_PER_TILE` | 15 | Base points per removed tile |
//! | `POWER_ACTIVATION_BONUS` | 100 | Bonus per power activation |
//! | `CASCADE_FACTOR` | 0.8 | Score multiplier growth per cascade wave |
//!
//! # Luck Bias Weights
//!
//! Refill candidates are weighed when the luck draw succeeds:
//!
//! | Constant | Value | Meaning |
//! |----------|-------|---------|
//! | `LUCK_MATCH_WEIGHT` | 10 | Symbol completes an immediate 3+ run |
//! | `LUCK_NEAR_WEIGHT` | 3 | Symbol gains an adjacent same-value neighbor |
//!
//! # Examples
//!
//! ```
//! use nebula_match_types::{PowerKind, Orientation, Pos, Tile};
//!
//! let plain = Tile::plain(3);
//! assert_eq!(plain.value, 3);
//! assert!(plain.power.is_none());
//!
//! let striped = Tile::striped(3, Orientation::Horizontal);
//! assert_eq!(striped.power, Some(PowerKind::Striped));
//!
//! // Midpoint rounds down, independent of argument order.
//! let a = Pos::new(2, 2);
//! let b = Pos::new(2, 3);
//! assert_eq!(a.midpoint(b), Pos::new(2, 2));
//! assert_eq!(b.midpoint(a), Pos::new(2, 2));
//! ```

use serde::{Deserialize, Serialize};

/// Default board width in cells (9 columns)
pub const DEFAULT_COLS: usize = 9;

/// Default board height in cells (9 rows)
pub const DEFAULT_ROWS: usize = 9;

/// Default symbol palette size (8 symbols, values 0-7)
pub const DEFAULT_PALETTE_SIZE: u8 = 8;

/// Upper bound on palette size, used to size bounded scratch buffers
pub const MAX_PALETTE_SIZE: usize = 16;

/// Minimum run length that counts as a match
pub const MIN_RUN_LEN: usize = 3;

/// Bounded retry count when generating a board without immediate matches
pub const FILL_RETRY_LIMIT: u32 = 20;

/// Base points per removed tile
pub const POINTS_PER_TILE: u32 = 15;

/// Bonus points per power activation
pub const POWER_ACTIVATION_BONUS: u32 = 100;

/// Score multiplier growth per cascade wave (1 + cascades * factor)
pub const CASCADE_FACTOR: f64 = 0.8;

/// Luck-refill weight for a symbol that completes an immediate 3+ run
pub const LUCK_MATCH_WEIGHT: u8 = 10;

/// Luck-refill weight for a symbol that creates an adjacent same-value pair
pub const LUCK_NEAR_WEIGHT: u8 = 3;

/// A symbol ("color") identifier, in `[0, palette_size)`
pub type SymbolId = u8;

/// A board coordinate: `row` counts from the top, `col` from the left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Pos {
    pub row: usize,
    pub col: usize,
}

impl Pos {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Component-wise integer midpoint (floored).
    ///
    /// Symmetric in its arguments, so combination origins do not depend on
    /// which swapped position is passed first.
    pub fn midpoint(self, other: Pos) -> Pos {
        Pos::new((self.row + other.row) / 2, (self.col + other.col) / 2)
    }
}

/// The five power-tile kinds
///
/// Each power has a distinct activation footprint:
/// - **Striped**: clears its row or column (per orientation)
/// - **Wrapped**: clears a 3x3 block
/// - **ColorBomb**: clears every tile of a target symbol
/// - **Bomb**: clears a 3x3 block (distinct identity from Wrapped)
/// - **Hammer**: clears a 5-cell plus shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PowerKind {
    Striped,
    Wrapped,
    #[serde(rename = "colorbomb")]
    ColorBomb,
    Bomb,
    Hammer,
}

impl PowerKind {
    /// Parse power kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use nebula_match_types::PowerKind;
    ///
    /// assert_eq!(PowerKind::from_str("striped"), Some(PowerKind::Striped));
    /// assert_eq!(PowerKind::from_str("Colorbomb"), Some(PowerKind::ColorBomb));
    /// assert_eq!(PowerKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "striped" => Some(PowerKind::Striped),
            "wrapped" => Some(PowerKind::Wrapped),
            "colorbomb" => Some(PowerKind::ColorBomb),
            "bomb" => Some(PowerKind::Bomb),
            "hammer" => Some(PowerKind::Hammer),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PowerKind::Striped => "striped",
            PowerKind::Wrapped => "wrapped",
            PowerKind::ColorBomb => "colorbomb",
            PowerKind::Bomb => "bomb",
            PowerKind::Hammer => "hammer",
        }
    }
}

/// Striped-tile clearing direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    #[serde(rename = "h")]
    Horizontal,
    #[serde(rename = "v")]
    Vertical,
}

impl Orientation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Orientation::Horizontal => "h",
            Orientation::Vertical => "v",
        }
    }
}

/// Combination effects triggered by swapping power tiles together
///
/// Keyed by the unordered pair of the swapped tiles' powers; see the
/// activation library for dispatch order and footprints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ComboKind {
    /// striped + striped: full row and column through the origin
    MegaStriped,
    /// wrapped + wrapped: 5x5 block
    MegaWrapped,
    /// colorbomb + colorbomb: entire grid
    RainbowBomb,
    /// hammer + hammer: 5x5 block
    MegaHammer,
    /// bomb + bomb: 7x7 block
    NuclearBomb,
    /// bomb + striped: 5 full rows and 5 full columns
    UltraCross,
    /// bomb + wrapped: 7x7 block
    SuperNova,
    /// striped + wrapped: 3 full rows and 3 full columns
    MegaCross,
    /// colorbomb + striped/wrapped: convert matching tiles, then fire each
    ColorConvert,
    /// colorbomb + plain tile: clear every tile of that value
    ColorSweep,
    /// hammer + another power: 3x3 at the hammer's own cell
    HammerSmash,
    /// bomb + another power without a dedicated pairing: 5x5 at the bomb
    BombBlast,
}

impl ComboKind {
    /// Convert to kebab-case string (matches the serialized phase metadata)
    pub fn as_str(&self) -> &'static str {
        match self {
            ComboKind::MegaStriped => "mega-striped",
            ComboKind::MegaWrapped => "mega-wrapped",
            ComboKind::RainbowBomb => "rainbow-bomb",
            ComboKind::MegaHammer => "mega-hammer",
            ComboKind::NuclearBomb => "nuclear-bomb",
            ComboKind::UltraCross => "ultra-cross",
            ComboKind::SuperNova => "super-nova",
            ComboKind::MegaCross => "mega-cross",
            ComboKind::ColorConvert => "color-convert",
            ComboKind::ColorSweep => "color-sweep",
            ComboKind::HammerSmash => "hammer-smash",
            ComboKind::BombBlast => "bomb-blast",
        }
    }
}

/// A single occupied grid cell
///
/// Carries a symbol value and at most one power. `orientation` is only
/// meaningful (and only set) when `power` is `Striped`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub value: SymbolId,
    pub power: Option<PowerKind>,
    pub orientation: Option<Orientation>,
}

impl Tile {
    /// A plain tile with no power
    pub fn plain(value: SymbolId) -> Self {
        Self {
            value,
            power: None,
            orientation: None,
        }
    }

    /// A power tile (use [`Tile::striped`] for striped tiles)
    pub fn with_power(value: SymbolId, power: PowerKind) -> Self {
        Self {
            value,
            power: Some(power),
            orientation: None,
        }
    }

    /// A striped tile with an explicit clearing orientation
    pub fn striped(value: SymbolId, orientation: Orientation) -> Self {
        Self {
            value,
            power: Some(PowerKind::Striped),
            orientation: Some(orientation),
        }
    }

    /// Striped clearing direction, defaulting to horizontal when unset
    pub fn stripe_orientation(&self) -> Orientation {
        self.orientation.unwrap_or(Orientation::Horizontal)
    }
}

/// A cell on the board
///
/// - `None`: empty (only observable mid-resolution)
/// - `Some(Tile)`: occupied
pub type Cell = Option<Tile>;
