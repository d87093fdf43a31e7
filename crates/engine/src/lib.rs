//! Swap orchestrator: the primary entry point for playing a move
//!
//! `handle_swap_and_resolve` performs the swap, fires any power
//! interaction the swap itself triggers, resolves the board to
//! quiescence, and scores the whole exchange. A runaway cascade degrades
//! to a best-effort outcome instead of failing the move.

pub mod score;

use nebula_match_core::{
    apply_removals_cascading, resolve_all, swap_effect, CoordSet, Effect, Grid, Phase,
    ResolveError, SimpleRng, SwapTrigger,
};
use nebula_match_types::Pos;

pub use score::compute_score;

/// Caller-supplied knobs for one swap
#[derive(Debug, Clone, Copy)]
pub struct SwapOptions {
    /// The caller already applied the swap (for animation) and the
    /// orchestrator must not repeat it
    pub skip_swap: bool,
    /// Luck-biased refill probability in `[0, 1]`; 0 disables biasing
    pub luck: f32,
    /// Reward factor applied to the final score
    pub speed_multiplier: f64,
}

impl Default for SwapOptions {
    fn default() -> Self {
        Self {
            skip_swap: false,
            luck: 0.0,
            speed_multiplier: 1.0,
        }
    }
}

/// Everything a caller needs to animate and score one swap
#[derive(Debug, Clone)]
pub struct SwapOutcome {
    pub phases: Vec<Phase>,
    pub removed_count: usize,
    /// Powers fired plus powers created, fed into scoring
    pub power_activations: usize,
    /// Number of match waves
    pub cascades: usize,
    pub score: u64,
    /// True when the cascade overran its budget and counts were
    /// reconstructed from the partial phase list
    pub degraded: bool,
}

/// Swap two tiles and resolve the board to quiescence.
///
/// The swapped positions are pre-marked as consumed so a swapped power
/// tile never fires twice (once as the combination, once as a cascade
/// hit). On cascade overflow the outcome is reconstructed from whatever
/// phases were produced, flagged `degraded`.
pub fn handle_swap_and_resolve(
    grid: &mut Grid,
    a: Pos,
    b: Pos,
    options: &SwapOptions,
    rng: &mut SimpleRng,
) -> SwapOutcome {
    if !options.skip_swap {
        grid.swap(a, b);
    }

    let mut phases = vec![Phase::AfterSwap {
        board: grid.clone(),
    }];
    let mut removed = 0;
    let mut activations = 0;

    if let Some(blast) = swap_effect(grid, a, b) {
        for (pos, tile) in &blast.conversions {
            grid.set(*pos, Some(*tile));
        }
        let effect = match blast.trigger {
            SwapTrigger::Combo { kind, .. } => Effect::Combo(kind),
            SwapTrigger::Solo { kind, .. } => Effect::Power(kind),
        };
        let origin = match blast.trigger {
            SwapTrigger::Combo { origin, .. } | SwapTrigger::Solo { origin, .. } => origin,
        };
        phases.push(Phase::PowerActivated {
            board: grid.clone(),
            effect,
            origin,
            removals: blast.removals.to_vec(),
        });
        activations += 1;

        let mut consumed = CoordSet::new(grid.cols(), grid.rows());
        consumed.insert(a);
        consumed.insert(b);
        let (r, chained) =
            apply_removals_cascading(grid, &blast.removals, &mut consumed, &mut phases);
        removed += r;
        activations += chained;
    }

    match resolve_all(grid, options.luck, rng) {
        Ok(outcome) => {
            removed += outcome.removed;
            activations += outcome.activations + outcome.creations;
            let cascades = outcome.cascades;
            phases.extend(outcome.phases);
            let score =
                compute_score(removed, activations, cascades, options.speed_multiplier);
            SwapOutcome {
                phases,
                removed_count: removed,
                power_activations: activations,
                cascades,
                score,
                degraded: false,
            }
        }
        Err(ResolveError::CascadeOverflow {
            phases: partial, ..
        }) => {
            phases.extend(partial);
            removed += reconstruct_removed(&phases);
            let cascades = phases
                .iter()
                .filter(|p| matches!(p, Phase::MatchFound { .. }))
                .count();
            let score =
                compute_score(removed, activations, cascades, options.speed_multiplier);
            SwapOutcome {
                phases,
                removed_count: removed,
                power_activations: activations,
                cascades,
                score,
                degraded: true,
            }
        }
    }
}

/// Best-effort removal count from `match-found` phases: unique group
/// cells minus the cells that became power creations.
fn reconstruct_removed(phases: &[Phase]) -> usize {
    let mut total = 0;
    for phase in phases {
        if let Phase::MatchFound {
            groups, creations, ..
        } = phase
        {
            let mut cells: Vec<Pos> = groups.iter().flat_map(|g| g.cells.clone()).collect();
            cells.sort_unstable();
            cells.dedup();
            total += cells.len().saturating_sub(creations.len());
        }
    }
    total
}
