//! Cascade resolver: match classification, cascading removal, gravity,
//! and luck-biased refill
//!
//! A single pass (`resolve_once`) runs the full pipeline once and records
//! a phase snapshot after every observable step. `resolve_all` repeats
//! passes until the board is quiescent (no matches, no holes). Phases are
//! plain data for external playback; the resolver never blocks on the
//! consumer.

use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use nebula_match_types::{
    ComboKind, Orientation, Pos, PowerKind, SymbolId, Tile, LUCK_MATCH_WEIGHT, LUCK_NEAR_WEIGHT,
    MAX_PALETTE_SIZE, MIN_RUN_LEN,
};

use crate::coords::CoordSet;
use crate::grid::Grid;
use crate::matcher::{find_matches, MatchGroup};
use crate::power::activation_footprint;
use crate::rng::SimpleRng;

/// Cascade passes allowed before a resolution is declared runaway
pub const MAX_CASCADE_PASSES: u32 = 64;

/// A power tile planned during match classification, instantiated after
/// removal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PowerCreation {
    pub pos: Pos,
    pub power: PowerKind,
    pub orientation: Option<Orientation>,
    pub value: SymbolId,
}

/// What fired in a `power-activated` phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Effect {
    Power(PowerKind),
    Combo(ComboKind),
}

/// One observable step of resolution, with a full board snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Phase {
    AfterSwap {
        board: Grid,
    },
    MatchFound {
        board: Grid,
        groups: Vec<MatchGroup>,
        creations: Vec<PowerCreation>,
    },
    PowerActivated {
        board: Grid,
        effect: Effect,
        origin: Pos,
        removals: Vec<Pos>,
    },
    AfterRemove {
        board: Grid,
        removed: usize,
    },
    AfterGravity {
        board: Grid,
    },
    AfterRefill {
        board: Grid,
        lucky: Vec<Pos>,
    },
    #[serde(rename = "nomatch")]
    NoMatch {
        board: Grid,
    },
}

impl Phase {
    /// The serialized `type` tag for this phase
    pub fn kind(&self) -> &'static str {
        match self {
            Phase::AfterSwap { .. } => "after-swap",
            Phase::MatchFound { .. } => "match-found",
            Phase::PowerActivated { .. } => "power-activated",
            Phase::AfterRemove { .. } => "after-remove",
            Phase::AfterGravity { .. } => "after-gravity",
            Phase::AfterRefill { .. } => "after-refill",
            Phase::NoMatch { .. } => "nomatch",
        }
    }
}

#[derive(Debug, Error)]
pub enum ResolveError {
    /// The cascade failed to reach quiescence within the pass budget.
    /// Carries the phases produced so far so callers can degrade instead
    /// of discarding the whole resolution.
    #[error("cascade did not settle within {passes} passes")]
    CascadeOverflow { passes: u32, phases: Vec<Phase> },
}

/// Aggregate result of resolving a board to quiescence
#[derive(Debug, Clone)]
pub struct ResolveOutcome {
    pub phases: Vec<Phase>,
    /// Tiles nulled out across all passes
    pub removed: usize,
    /// Power tiles fired during cascading removal
    pub activations: usize,
    /// Power tiles created by match classification
    pub creations: usize,
    /// Number of match-found waves
    pub cascades: usize,
}

/// Result of one `resolve_once` pass
#[derive(Debug, Clone)]
pub struct PassOutcome {
    /// True when the terminal `nomatch` phase was emitted
    pub done: bool,
    pub removed: usize,
    pub activations: usize,
    pub creations: usize,
    /// True when this pass found at least one match group
    pub matched: bool,
}

/// Apply a removal set with cascading power activation.
///
/// Breadth-first work queue: any power tile reached by the blast fires
/// once, contributing its own footprint to the queue. `consumed` is the
/// already-activated set; callers pre-seed it with positions whose powers
/// were spent before the cascade starts (swapped power tiles). All
/// accumulated coordinates are nulled after the queue drains.
///
/// Returns `(removed, activations)`.
pub fn apply_removals_cascading(
    grid: &mut Grid,
    initial: &CoordSet,
    consumed: &mut CoordSet,
    phases: &mut Vec<Phase>,
) -> (usize, usize) {
    let mut accumulated = CoordSet::new(grid.cols(), grid.rows());
    let mut queue: Vec<Pos> = Vec::new();
    let mut head = 0;
    for pos in initial.iter() {
        if accumulated.insert(pos) {
            queue.push(pos);
        }
    }

    let mut activations = 0;
    while head < queue.len() {
        let pos = queue[head];
        head += 1;
        let Some(tile) = grid.tile(pos) else { continue };
        let Some(power) = tile.power else { continue };
        if !consumed.insert(pos) {
            continue;
        }
        let mut footprint = CoordSet::new(grid.cols(), grid.rows());
        activation_footprint(grid, pos, tile, &mut footprint);
        activations += 1;
        phases.push(Phase::PowerActivated {
            board: grid.clone(),
            effect: Effect::Power(power),
            origin: pos,
            removals: footprint.to_vec(),
        });
        for hit in footprint.iter() {
            if accumulated.insert(hit) {
                queue.push(hit);
            }
        }
    }

    let mut removed = 0;
    for pos in accumulated.iter() {
        if grid.tile(pos).is_some() {
            grid.set(pos, None);
            removed += 1;
        }
    }
    (removed, activations)
}

/// Classify match groups into removals and power creations.
///
/// A cell shared by two groups claims a wrapped creation; runs of 5+ make
/// a colorbomb at the middle cell; runs of 4 make a striped tile at the
/// first cell. Creation target cells are excluded from the removal set.
fn classify(grid: &Grid, groups: &[MatchGroup]) -> (CoordSet, Vec<PowerCreation>) {
    let mut counts = vec![0u8; grid.cols() * grid.rows()];
    for group in groups {
        for cell in &group.cells {
            counts[cell.row * grid.cols() + cell.col] += 1;
        }
    }

    let mut removals = CoordSet::new(grid.cols(), grid.rows());
    let mut creations: Vec<PowerCreation> = Vec::new();
    let mut claimed = CoordSet::new(grid.cols(), grid.rows());

    for group in groups {
        let intersection = group
            .cells
            .iter()
            .copied()
            .find(|c| counts[c.row * grid.cols() + c.col] > 1);
        let target = if let Some(cell) = intersection {
            if claimed.insert(cell) {
                creations.push(PowerCreation {
                    pos: cell,
                    power: PowerKind::Wrapped,
                    orientation: None,
                    value: group.value,
                });
            }
            Some(cell)
        } else if group.len() >= 5 {
            let mid = group.cells[group.len() / 2];
            creations.push(PowerCreation {
                pos: mid,
                power: PowerKind::ColorBomb,
                orientation: None,
                value: group.value,
            });
            Some(mid)
        } else if group.len() == 4 {
            let first = group.cells[0];
            creations.push(PowerCreation {
                pos: first,
                power: PowerKind::Striped,
                orientation: Some(group.orientation),
                value: group.value,
            });
            Some(first)
        } else {
            None
        };

        for &cell in &group.cells {
            if Some(cell) != target && !claimed.contains(cell) {
                removals.insert(cell);
            }
        }
    }

    (removals, creations)
}

/// Per column, compact occupied cells downward leaving holes at the top.
fn apply_gravity(grid: &mut Grid) {
    for col in 0..grid.cols() {
        let mut write = grid.rows();
        for row in (0..grid.rows()).rev() {
            let pos = Pos::new(row, col);
            if let Some(tile) = grid.tile(pos) {
                write -= 1;
                if write != row {
                    grid.set(Pos::new(write, col), Some(tile));
                    grid.set(pos, None);
                }
            }
        }
    }
}

/// Would placing `value` at `pos` complete a 3+ run with settled neighbors
fn completes_run(grid: &Grid, pos: Pos, value: SymbolId) -> bool {
    let count = |dr: isize, dc: isize| {
        let mut n = 0;
        let (mut r, mut c) = (pos.row as isize + dr, pos.col as isize + dc);
        while grid.get(r, c).is_some_and(|t| t.value == value) {
            n += 1;
            r += dr;
            c += dc;
        }
        n
    };
    1 + count(0, -1) + count(0, 1) >= MIN_RUN_LEN || 1 + count(-1, 0) + count(1, 0) >= MIN_RUN_LEN
}

fn has_adjacent_same(grid: &Grid, pos: Pos, value: SymbolId) -> bool {
    let (r, c) = (pos.row as isize, pos.col as isize);
    [(r - 1, c), (r + 1, c), (r, c - 1), (r, c + 1)]
        .into_iter()
        .any(|(rr, cc)| grid.get(rr, cc).is_some_and(|t| t.value == value))
}

/// Fill every hole, column by column bottom-to-top, with luck biasing.
///
/// On a successful luck draw each palette symbol is weighed: completing a
/// 3+ run scores [`LUCK_MATCH_WEIGHT`], gaining an adjacent same-value
/// neighbor scores [`LUCK_NEAR_WEIGHT`]. One of the top-weight candidates
/// is picked uniformly; only run-completing picks count as lucky. With no
/// qualifying candidate (or a failed draw, or `luck` 0) the fill is
/// uniform.
fn refill(grid: &mut Grid, luck: f32, rng: &mut SimpleRng) -> Vec<Pos> {
    let palette = grid.palette_size() as u32;
    let mut lucky = Vec::new();
    for col in 0..grid.cols() {
        for row in (0..grid.rows()).rev() {
            let pos = Pos::new(row, col);
            if grid.tile(pos).is_some() {
                continue;
            }
            let mut picked: Option<(SymbolId, bool)> = None;
            if luck > 0.0 && rng.chance(luck) {
                let mut best_weight = 0u8;
                let mut candidates: ArrayVec<SymbolId, MAX_PALETTE_SIZE> = ArrayVec::new();
                for value in 0..palette as SymbolId {
                    let weight = if completes_run(grid, pos, value) {
                        LUCK_MATCH_WEIGHT
                    } else if has_adjacent_same(grid, pos, value) {
                        LUCK_NEAR_WEIGHT
                    } else {
                        0
                    };
                    if weight > best_weight {
                        best_weight = weight;
                        candidates.clear();
                    }
                    if weight == best_weight && weight > 0 {
                        candidates.push(value);
                    }
                }
                if !candidates.is_empty() {
                    let idx = rng.next_range(candidates.len() as u32) as usize;
                    picked = Some((candidates[idx], best_weight == LUCK_MATCH_WEIGHT));
                }
            }
            let (value, is_lucky) =
                picked.unwrap_or_else(|| (rng.next_range(palette) as SymbolId, false));
            grid.set(pos, Some(Tile::plain(value)));
            if is_lucky {
                lucky.push(pos);
            }
        }
    }
    lucky
}

/// One full resolution pass.
///
/// Terminal only when there is neither a match nor a hole; a hole-only
/// board still gets gravity and refill so disturbed grids settle.
pub fn resolve_once(
    grid: &mut Grid,
    luck: f32,
    rng: &mut SimpleRng,
    phases: &mut Vec<Phase>,
) -> PassOutcome {
    let groups = find_matches(grid);
    if groups.is_empty() && !grid.has_holes() {
        phases.push(Phase::NoMatch {
            board: grid.clone(),
        });
        return PassOutcome {
            done: true,
            removed: 0,
            activations: 0,
            creations: 0,
            matched: false,
        };
    }

    let mut removed = 0;
    let mut activations = 0;
    let mut creation_count = 0;
    let matched = !groups.is_empty();

    if matched {
        let (removals, creations) = classify(grid, &groups);
        creation_count = creations.len();
        phases.push(Phase::MatchFound {
            board: grid.clone(),
            groups,
            creations: creations.clone(),
        });

        let mut consumed = CoordSet::new(grid.cols(), grid.rows());
        let (r, a) = apply_removals_cascading(grid, &removals, &mut consumed, phases);
        removed = r;
        activations = a;

        for creation in &creations {
            // A creation cell emptied by the cascade materializes with a
            // fresh random symbol; a surviving tile keeps its value.
            let value = match grid.tile(creation.pos) {
                Some(existing) => existing.value,
                None => rng.next_range(grid.palette_size() as u32) as SymbolId,
            };
            grid.set(
                creation.pos,
                Some(Tile {
                    value,
                    power: Some(creation.power),
                    orientation: creation.orientation,
                }),
            );
        }
        phases.push(Phase::AfterRemove {
            board: grid.clone(),
            removed,
        });
    }

    apply_gravity(grid);
    phases.push(Phase::AfterGravity {
        board: grid.clone(),
    });

    let lucky = refill(grid, luck, rng);
    phases.push(Phase::AfterRefill {
        board: grid.clone(),
        lucky,
    });

    PassOutcome {
        done: false,
        removed,
        activations,
        creations: creation_count,
        matched,
    }
}

/// Resolve to quiescence, concatenating all pass phases.
pub fn resolve_all(
    grid: &mut Grid,
    luck: f32,
    rng: &mut SimpleRng,
) -> Result<ResolveOutcome, ResolveError> {
    let mut outcome = ResolveOutcome {
        phases: Vec::new(),
        removed: 0,
        activations: 0,
        creations: 0,
        cascades: 0,
    };
    for _ in 0..MAX_CASCADE_PASSES {
        let pass = resolve_once(grid, luck, rng, &mut outcome.phases);
        outcome.removed += pass.removed;
        outcome.activations += pass.activations;
        outcome.creations += pass.creations;
        if pass.matched {
            outcome.cascades += 1;
        }
        if pass.done {
            return Ok(outcome);
        }
    }
    Err(ResolveError::CascadeOverflow {
        passes: MAX_CASCADE_PASSES,
        phases: outcome.phases,
    })
}
