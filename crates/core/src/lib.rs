//! Resolution core: grid model, match detection, power activation, and
//! the cascade resolver
//!
//! Everything in this crate is pure data transformation over a [`Grid`].
//! No I/O, no timing, no presentation state; callers drain the emitted
//! [`Phase`] sequence at their own pace.

pub mod coords;
pub mod grid;
pub mod matcher;
pub mod power;
pub mod resolver;
pub mod rng;

pub use coords::CoordSet;
pub use grid::Grid;
pub use matcher::{find_hint, find_matches, is_valid_swap, MatchGroup};
pub use power::{activation_footprint, swap_effect, SwapBlast, SwapTrigger};
pub use resolver::{
    apply_removals_cascading, resolve_all, resolve_once, Effect, PassOutcome, Phase,
    PowerCreation, ResolveError, ResolveOutcome, MAX_CASCADE_PASSES,
};
pub use rng::SimpleRng;
