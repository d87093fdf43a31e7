//! Power-tile activation library
//!
//! Footprint computation only: every function here reads the grid and
//! inserts coordinates into a [`CoordSet`]. Applying removals, conversions,
//! and cascading is the resolver's job.
//!
//! The combination table is keyed by the unordered pair of swapped powers
//! and consulted in a fixed order: dedicated pairs first, then the
//! colorbomb rows, then hammer-with-any-power, then bomb-with-any-power,
//! and finally solo activation for a single power swapped onto a plain
//! tile.

use nebula_match_types::{ComboKind, Orientation, Pos, PowerKind, SymbolId, Tile};

use crate::coords::CoordSet;
use crate::grid::Grid;

/// What a power-involving swap triggers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwapTrigger {
    /// Two powers (or colorbomb + plain) combined
    Combo { kind: ComboKind, origin: Pos },
    /// A single striped/wrapped/bomb/hammer fired at its own cell
    Solo { kind: PowerKind, origin: Pos },
}

/// The initial blast computed for a power-involving swap
#[derive(Debug, Clone)]
pub struct SwapBlast {
    pub trigger: SwapTrigger,
    /// Coordinates to feed into cascading removal (always includes both
    /// swapped positions)
    pub removals: CoordSet,
    /// Tiles to rewrite in place before removal starts, so they fire as
    /// powers when the cascade reaches them (color-convert only)
    pub conversions: Vec<(Pos, Tile)>,
}

/// Footprint of a single power tile activated in place during a cascade.
///
/// A colorbomb caught in a blast (rather than swapped against a target)
/// sweeps its own symbol value.
pub fn activation_footprint(grid: &Grid, origin: Pos, tile: Tile, out: &mut CoordSet) {
    match tile.power {
        Some(PowerKind::Striped) => match tile.stripe_orientation() {
            Orientation::Horizontal => full_row(grid, origin.row as isize, out),
            Orientation::Vertical => full_col(grid, origin.col as isize, out),
        },
        Some(PowerKind::Wrapped) | Some(PowerKind::Bomb) => block(grid, origin, 1, out),
        Some(PowerKind::Hammer) => plus(grid, origin, out),
        Some(PowerKind::ColorBomb) => sweep(grid, tile.value, out),
        None => {
            out.insert(origin);
        }
    }
}

/// Compute the blast triggered by swapping `a` and `b`, or `None` when
/// neither tile carries a power. Both swapped positions are always part
/// of the removal set.
pub fn swap_effect(grid: &Grid, a: Pos, b: Pos) -> Option<SwapBlast> {
    let tile_a = grid.tile(a)?;
    let tile_b = grid.tile(b)?;
    let (pa, pb) = (tile_a.power, tile_b.power);
    if pa.is_none() && pb.is_none() {
        return None;
    }

    let origin = a.midpoint(b);
    let mut removals = CoordSet::new(grid.cols(), grid.rows());
    removals.insert(a);
    removals.insert(b);
    let mut conversions = Vec::new();

    let trigger = match (pa, pb) {
        // Dedicated pairs.
        (Some(PowerKind::Striped), Some(PowerKind::Striped)) => {
            full_row(grid, origin.row as isize, &mut removals);
            full_col(grid, origin.col as isize, &mut removals);
            SwapTrigger::Combo {
                kind: ComboKind::MegaStriped,
                origin,
            }
        }
        (Some(PowerKind::Wrapped), Some(PowerKind::Wrapped)) => {
            block(grid, origin, 2, &mut removals);
            SwapTrigger::Combo {
                kind: ComboKind::MegaWrapped,
                origin,
            }
        }
        (Some(PowerKind::ColorBomb), Some(PowerKind::ColorBomb)) => {
            for pos in grid.positions() {
                removals.insert(pos);
            }
            SwapTrigger::Combo {
                kind: ComboKind::RainbowBomb,
                origin,
            }
        }
        (Some(PowerKind::Hammer), Some(PowerKind::Hammer)) => {
            block(grid, origin, 2, &mut removals);
            SwapTrigger::Combo {
                kind: ComboKind::MegaHammer,
                origin,
            }
        }
        (Some(PowerKind::Bomb), Some(PowerKind::Bomb)) => {
            block(grid, origin, 3, &mut removals);
            SwapTrigger::Combo {
                kind: ComboKind::NuclearBomb,
                origin,
            }
        }
        (Some(PowerKind::Bomb), Some(PowerKind::Striped))
        | (Some(PowerKind::Striped), Some(PowerKind::Bomb)) => {
            line_band(grid, origin, 2, &mut removals);
            SwapTrigger::Combo {
                kind: ComboKind::UltraCross,
                origin,
            }
        }
        (Some(PowerKind::Bomb), Some(PowerKind::Wrapped))
        | (Some(PowerKind::Wrapped), Some(PowerKind::Bomb)) => {
            block(grid, origin, 3, &mut removals);
            SwapTrigger::Combo {
                kind: ComboKind::SuperNova,
                origin,
            }
        }
        (Some(PowerKind::Striped), Some(PowerKind::Wrapped))
        | (Some(PowerKind::Wrapped), Some(PowerKind::Striped)) => {
            line_band(grid, origin, 1, &mut removals);
            SwapTrigger::Combo {
                kind: ComboKind::MegaCross,
                origin,
            }
        }
        // Colorbomb conversions and sweeps.
        (Some(PowerKind::ColorBomb), Some(PowerKind::Striped | PowerKind::Wrapped)) => {
            convert_and_seed(grid, tile_b, a, b, &mut removals, &mut conversions);
            SwapTrigger::Combo {
                kind: ComboKind::ColorConvert,
                origin,
            }
        }
        (Some(PowerKind::Striped | PowerKind::Wrapped), Some(PowerKind::ColorBomb)) => {
            convert_and_seed(grid, tile_a, a, b, &mut removals, &mut conversions);
            SwapTrigger::Combo {
                kind: ComboKind::ColorConvert,
                origin,
            }
        }
        // Hammer paired with any remaining power.
        (Some(PowerKind::Hammer), Some(_)) => {
            block(grid, a, 1, &mut removals);
            SwapTrigger::Combo {
                kind: ComboKind::HammerSmash,
                origin: a,
            }
        }
        (Some(_), Some(PowerKind::Hammer)) => {
            block(grid, b, 1, &mut removals);
            SwapTrigger::Combo {
                kind: ComboKind::HammerSmash,
                origin: b,
            }
        }
        // Bomb paired with any remaining power.
        (Some(PowerKind::Bomb), Some(_)) => {
            block(grid, a, 2, &mut removals);
            SwapTrigger::Combo {
                kind: ComboKind::BombBlast,
                origin: a,
            }
        }
        (Some(_), Some(PowerKind::Bomb)) => {
            block(grid, b, 2, &mut removals);
            SwapTrigger::Combo {
                kind: ComboKind::BombBlast,
                origin: b,
            }
        }
        // Colorbomb onto a plain tile sweeps that tile's value.
        (Some(PowerKind::ColorBomb), None) => {
            sweep(grid, tile_b.value, &mut removals);
            SwapTrigger::Combo {
                kind: ComboKind::ColorSweep,
                origin: a,
            }
        }
        (None, Some(PowerKind::ColorBomb)) => {
            sweep(grid, tile_a.value, &mut removals);
            SwapTrigger::Combo {
                kind: ComboKind::ColorSweep,
                origin: b,
            }
        }
        // A single power onto a plain tile fires its solo footprint.
        (Some(kind), None) => {
            activation_footprint(grid, a, tile_a, &mut removals);
            SwapTrigger::Solo { kind, origin: a }
        }
        (None, Some(kind)) => {
            activation_footprint(grid, b, tile_b, &mut removals);
            SwapTrigger::Solo { kind, origin: b }
        }
        (None, None) => unreachable!("checked above"),
    };

    Some(SwapBlast {
        trigger,
        removals,
        conversions,
    })
}

/// Convert every other tile matching the partner's value into a carrier
/// of the partner's power and seed it into the removal set so the
/// cascade fires each converted tile. Converted stripes inherit the
/// partner's orientation.
fn convert_and_seed(
    grid: &Grid,
    partner: Tile,
    a: Pos,
    b: Pos,
    removals: &mut CoordSet,
    conversions: &mut Vec<(Pos, Tile)>,
) {
    let converted = match partner.power {
        Some(PowerKind::Striped) => Tile::striped(partner.value, partner.stripe_orientation()),
        Some(power) => Tile::with_power(partner.value, power),
        None => Tile::plain(partner.value),
    };
    for pos in grid.positions() {
        if pos == a || pos == b {
            continue;
        }
        if grid.tile(pos).is_some_and(|t| t.value == partner.value) {
            conversions.push((pos, converted));
            removals.insert(pos);
        }
    }
}

fn full_row(grid: &Grid, row: isize, out: &mut CoordSet) {
    if row < 0 || row as usize >= grid.rows() {
        return;
    }
    for col in 0..grid.cols() {
        out.insert(Pos::new(row as usize, col));
    }
}

fn full_col(grid: &Grid, col: isize, out: &mut CoordSet) {
    if col < 0 || col as usize >= grid.cols() {
        return;
    }
    for row in 0..grid.rows() {
        out.insert(Pos::new(row, col as usize));
    }
}

/// Square block of Chebyshev radius `r` centered on `origin`, clipped to
/// the grid.
fn block(grid: &Grid, origin: Pos, r: isize, out: &mut CoordSet) {
    let (or, oc) = (origin.row as isize, origin.col as isize);
    for row in (or - r)..=(or + r) {
        for col in (oc - r)..=(oc + r) {
            if row >= 0
                && col >= 0
                && (row as usize) < grid.rows()
                && (col as usize) < grid.cols()
            {
                out.insert(Pos::new(row as usize, col as usize));
            }
        }
    }
}

/// Origin plus its four orthogonal neighbors
fn plus(grid: &Grid, origin: Pos, out: &mut CoordSet) {
    let (or, oc) = (origin.row as isize, origin.col as isize);
    for (row, col) in [(or, oc), (or - 1, oc), (or + 1, oc), (or, oc - 1), (or, oc + 1)] {
        if row >= 0 && col >= 0 && (row as usize) < grid.rows() && (col as usize) < grid.cols() {
            out.insert(Pos::new(row as usize, col as usize));
        }
    }
}

/// Every cell whose tile value equals `value`
fn sweep(grid: &Grid, value: SymbolId, out: &mut CoordSet) {
    for pos in grid.positions() {
        if grid.tile(pos).is_some_and(|t| t.value == value) {
            out.insert(pos);
        }
    }
}

/// `2r + 1` full rows and full columns centered on `origin`
fn line_band(grid: &Grid, origin: Pos, r: isize, out: &mut CoordSet) {
    let (or, oc) = (origin.row as isize, origin.col as isize);
    for d in -r..=r {
        full_row(grid, or + d, out);
        full_col(grid, oc + d, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::SimpleRng;

    fn uniform_grid(cols: usize, rows: usize) -> Grid {
        // Deterministic varied board for footprint tests.
        let mut rng = SimpleRng::new(777);
        Grid::generate(cols, rows, 8, &mut rng)
    }

    fn set_power(grid: &mut Grid, pos: Pos, tile: Tile) {
        grid.set(pos, Some(tile));
    }

    #[test]
    fn test_striped_solo_clears_row_or_column() {
        let grid = uniform_grid(9, 9);
        let origin = Pos::new(4, 4);
        let mut out = CoordSet::new(9, 9);
        activation_footprint(&grid, origin, Tile::striped(1, Orientation::Horizontal), &mut out);
        assert_eq!(out.len(), 9);
        assert!(out.iter().all(|p| p.row == 4));

        let mut out = CoordSet::new(9, 9);
        activation_footprint(&grid, origin, Tile::striped(1, Orientation::Vertical), &mut out);
        assert_eq!(out.len(), 9);
        assert!(out.iter().all(|p| p.col == 4));
    }

    #[test]
    fn test_wrapped_and_bomb_are_3x3_clipped() {
        let grid = uniform_grid(9, 9);
        let mut out = CoordSet::new(9, 9);
        activation_footprint(&grid, Pos::new(4, 4), Tile::with_power(0, PowerKind::Wrapped), &mut out);
        assert_eq!(out.len(), 9);

        // Corner clips to 2x2.
        let mut corner = CoordSet::new(9, 9);
        activation_footprint(&grid, Pos::new(0, 0), Tile::with_power(0, PowerKind::Bomb), &mut corner);
        assert_eq!(corner.len(), 4);
    }

    #[test]
    fn test_hammer_plus_shape() {
        let grid = uniform_grid(9, 9);
        let mut out = CoordSet::new(9, 9);
        activation_footprint(&grid, Pos::new(4, 4), Tile::with_power(0, PowerKind::Hammer), &mut out);
        assert_eq!(
            out.to_vec(),
            vec![
                Pos::new(3, 4),
                Pos::new(4, 3),
                Pos::new(4, 4),
                Pos::new(4, 5),
                Pos::new(5, 4),
            ]
        );
    }

    #[test]
    fn test_colorbomb_in_cascade_sweeps_own_value() {
        let mut grid = uniform_grid(9, 9);
        let origin = Pos::new(2, 2);
        set_power(&mut grid, origin, Tile::with_power(3, PowerKind::ColorBomb));
        let mut out = CoordSet::new(9, 9);
        activation_footprint(&grid, origin, Tile::with_power(3, PowerKind::ColorBomb), &mut out);
        for pos in grid.positions() {
            let is_three = grid.tile(pos).is_some_and(|t| t.value == 3);
            assert_eq!(out.contains(pos), is_three);
        }
    }

    #[test]
    fn test_mega_striped_is_row_union_column() {
        let mut grid = uniform_grid(9, 9);
        let a = Pos::new(2, 2);
        let b = Pos::new(2, 3);
        set_power(&mut grid, a, Tile::striped(1, Orientation::Horizontal));
        set_power(&mut grid, b, Tile::striped(2, Orientation::Vertical));

        let blast = swap_effect(&grid, a, b).expect("powers present");
        let SwapTrigger::Combo { kind, origin } = blast.trigger else {
            panic!("expected combo");
        };
        assert_eq!(kind, ComboKind::MegaStriped);
        assert_eq!(origin, Pos::new(2, 2));
        // Row 2 union column 2, plus both swapped positions (already inside).
        assert_eq!(blast.removals.len(), 9 + 9 - 1);
        for pos in blast.removals.iter() {
            assert!(pos.row == 2 || pos.col == 2);
        }

        // Order-independent.
        let reverse = swap_effect(&grid, b, a).expect("powers present");
        assert_eq!(reverse.removals.to_vec(), blast.removals.to_vec());
    }

    #[test]
    fn test_nuclear_bomb_7x7_clipped() {
        let mut grid = uniform_grid(9, 9);
        let a = Pos::new(4, 4);
        let b = Pos::new(4, 5);
        set_power(&mut grid, a, Tile::with_power(0, PowerKind::Bomb));
        set_power(&mut grid, b, Tile::with_power(1, PowerKind::Bomb));
        let blast = swap_effect(&grid, a, b).unwrap();
        let SwapTrigger::Combo { kind, origin } = blast.trigger else {
            panic!("expected combo");
        };
        assert_eq!(kind, ComboKind::NuclearBomb);
        assert_eq!(origin, Pos::new(4, 4));
        // Rows 1..=7, cols 1..=7, plus b already inside the block.
        assert_eq!(blast.removals.len(), 49);
    }

    #[test]
    fn test_hammer_beats_bomb_in_dispatch() {
        let mut grid = uniform_grid(9, 9);
        let hammer = Pos::new(4, 4);
        let bomb = Pos::new(4, 5);
        set_power(&mut grid, hammer, Tile::with_power(0, PowerKind::Hammer));
        set_power(&mut grid, bomb, Tile::with_power(1, PowerKind::Bomb));
        let blast = swap_effect(&grid, bomb, hammer).unwrap();
        let SwapTrigger::Combo { kind, origin } = blast.trigger else {
            panic!("expected combo");
        };
        assert_eq!(kind, ComboKind::HammerSmash);
        assert_eq!(origin, hammer);
        // 3x3 around the hammer, plus the bomb cell inside it already.
        assert_eq!(blast.removals.len(), 9);
    }

    #[test]
    fn test_color_convert_seeds_converted_tiles() {
        let mut grid = Grid::empty(5, 5, 8);
        for pos in grid.positions().collect::<Vec<_>>() {
            grid.set(pos, Some(Tile::plain(((pos.row + pos.col) % 4) as u8)));
        }
        let bomb_pos = Pos::new(2, 2);
        let striped_pos = Pos::new(2, 3);
        grid.set(bomb_pos, Some(Tile::with_power(7, PowerKind::ColorBomb)));
        grid.set(striped_pos, Some(Tile::striped(1, Orientation::Horizontal)));

        let blast = swap_effect(&grid, bomb_pos, striped_pos).unwrap();
        let SwapTrigger::Combo { kind, .. } = blast.trigger else {
            panic!("expected combo");
        };
        assert_eq!(kind, ComboKind::ColorConvert);
        assert!(!blast.conversions.is_empty());
        for (pos, tile) in &blast.conversions {
            assert_eq!(grid.tile(*pos).unwrap().value, 1);
            assert_eq!(tile.power, Some(PowerKind::Striped));
            assert!(blast.removals.contains(*pos));
        }
    }

    #[test]
    fn test_color_convert_stripes_inherit_partner_orientation() {
        let mut grid = Grid::empty(5, 5, 8);
        for pos in grid.positions().collect::<Vec<_>>() {
            grid.set(pos, Some(Tile::plain(((pos.row + pos.col) % 4) as u8)));
        }
        let bomb_pos = Pos::new(2, 2);
        let striped_pos = Pos::new(2, 3);
        grid.set(bomb_pos, Some(Tile::with_power(7, PowerKind::ColorBomb)));
        grid.set(striped_pos, Some(Tile::striped(1, Orientation::Vertical)));

        let blast = swap_effect(&grid, bomb_pos, striped_pos).unwrap();
        assert!(!blast.conversions.is_empty());
        for (_, tile) in &blast.conversions {
            assert_eq!(tile.orientation, Some(Orientation::Vertical));
        }

        // Same board with a horizontal partner converts horizontally.
        grid.set(striped_pos, Some(Tile::striped(1, Orientation::Horizontal)));
        let blast = swap_effect(&grid, bomb_pos, striped_pos).unwrap();
        for (_, tile) in &blast.conversions {
            assert_eq!(tile.orientation, Some(Orientation::Horizontal));
        }
    }

    #[test]
    fn test_colorbomb_on_plain_sweeps_target_value() {
        let mut grid = uniform_grid(9, 9);
        let a = Pos::new(0, 0);
        let b = Pos::new(0, 1);
        set_power(&mut grid, a, Tile::with_power(5, PowerKind::ColorBomb));
        let target = grid.tile(b).unwrap().value;

        let blast = swap_effect(&grid, a, b).unwrap();
        let SwapTrigger::Combo { kind, .. } = blast.trigger else {
            panic!("expected combo");
        };
        assert_eq!(kind, ComboKind::ColorSweep);
        for pos in grid.positions() {
            let expected = pos == a
                || pos == b
                || grid.tile(pos).is_some_and(|t| t.value == target);
            assert_eq!(blast.removals.contains(pos), expected, "at {pos:?}");
        }
    }

    #[test]
    fn test_plain_swap_has_no_blast() {
        let grid = uniform_grid(9, 9);
        assert!(swap_effect(&grid, Pos::new(0, 0), Pos::new(0, 1)).is_none());
    }

    #[test]
    fn test_solo_power_fires_at_own_cell() {
        let mut grid = uniform_grid(9, 9);
        let a = Pos::new(3, 3);
        set_power(&mut grid, a, Tile::with_power(0, PowerKind::Hammer));
        let blast = swap_effect(&grid, a, Pos::new(3, 4)).unwrap();
        let SwapTrigger::Solo { kind, origin } = blast.trigger else {
            panic!("expected solo");
        };
        assert_eq!(kind, PowerKind::Hammer);
        assert_eq!(origin, a);
        // Plus shape around (3,3) plus the swapped neighbor (3,4) already in it.
        assert_eq!(blast.removals.len(), 5);
    }
}
