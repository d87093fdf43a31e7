//! Match detection: run scanning and swap validation
//!
//! Runs are maximal same-value sequences of length 3 or more in a single
//! row or column. Horizontal groups come out row-major, vertical groups
//! column-major; classification of intersections happens in the resolver.

use serde::{Deserialize, Serialize};

use nebula_match_types::{Orientation, Pos, SymbolId, MIN_RUN_LEN};

use crate::grid::Grid;

/// A maximal run of 3+ same-value tiles in one line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchGroup {
    pub cells: Vec<Pos>,
    pub orientation: Orientation,
    pub value: SymbolId,
}

impl MatchGroup {
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Find every maximal 3+ run, horizontal then vertical.
pub fn find_matches(grid: &Grid) -> Vec<MatchGroup> {
    let mut groups = Vec::new();

    for row in 0..grid.rows() {
        let mut run: Vec<Pos> = Vec::new();
        let mut run_value: Option<SymbolId> = None;
        for col in 0..=grid.cols() {
            let cell = grid.get(row as isize, col as isize);
            let value = cell.map(|t| t.value);
            if value.is_some() && value == run_value {
                run.push(Pos::new(row, col));
            } else {
                flush_run(&mut groups, &mut run, run_value, Orientation::Horizontal);
                run_value = value;
                if value.is_some() {
                    run.push(Pos::new(row, col));
                }
            }
        }
    }

    for col in 0..grid.cols() {
        let mut run: Vec<Pos> = Vec::new();
        let mut run_value: Option<SymbolId> = None;
        for row in 0..=grid.rows() {
            let cell = grid.get(row as isize, col as isize);
            let value = cell.map(|t| t.value);
            if value.is_some() && value == run_value {
                run.push(Pos::new(row, col));
            } else {
                flush_run(&mut groups, &mut run, run_value, Orientation::Vertical);
                run_value = value;
                if value.is_some() {
                    run.push(Pos::new(row, col));
                }
            }
        }
    }

    groups
}

fn flush_run(
    groups: &mut Vec<MatchGroup>,
    run: &mut Vec<Pos>,
    value: Option<SymbolId>,
    orientation: Orientation,
) {
    if run.len() >= MIN_RUN_LEN {
        if let Some(value) = value {
            groups.push(MatchGroup {
                cells: std::mem::take(run),
                orientation,
                value,
            });
            return;
        }
    }
    run.clear();
}

/// Whether swapping the two positions is playable.
///
/// A swap involving any power tile is always valid (it triggers an effect
/// on its own). Otherwise the swap is tried on a clone and accepted iff it
/// produces at least one match.
pub fn is_valid_swap(grid: &Grid, a: Pos, b: Pos) -> bool {
    let power_involved = grid.tile(a).is_some_and(|t| t.power.is_some())
        || grid.tile(b).is_some_and(|t| t.power.is_some());
    if power_involved {
        return true;
    }
    let mut scratch = grid.clone();
    scratch.swap(a, b);
    !find_matches(&scratch).is_empty()
}

/// Find some playable swap, scanning row-major and checking each cell's
/// right and down neighbor. Returns `None` when the board is stuck.
pub fn find_hint(grid: &Grid) -> Option<(Pos, Pos)> {
    for pos in grid.positions() {
        let right = Pos::new(pos.row, pos.col + 1);
        if grid.in_bounds(right) && is_valid_swap(grid, pos, right) {
            return Some((pos, right));
        }
        let down = Pos::new(pos.row + 1, pos.col);
        if grid.in_bounds(down) && is_valid_swap(grid, pos, down) {
            return Some((pos, down));
        }
    }
    None
}
