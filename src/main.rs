//! Auto-player demo: generates a board, repeatedly plays a hinted swap,
//! and replays each resolution phase in the terminal.
//!
//! Controls: `q` or `Esc` quits. An optional first argument seeds the
//! board; otherwise the system clock is used.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode};

use nebula_match::{
    describe_phase, find_hint, handle_swap_and_resolve, Grid, Phase, SimpleRng, SwapOptions,
    TerminalRenderer, DEFAULT_COLS, DEFAULT_PALETTE_SIZE, DEFAULT_ROWS,
};

const PHASE_DELAY: Duration = Duration::from_millis(250);

fn main() -> Result<()> {
    let seed = match std::env::args().nth(1) {
        Some(arg) => arg.parse()?,
        None => SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs(),
    };

    let mut rng = SimpleRng::new(seed);
    let mut grid = Grid::generate(DEFAULT_COLS, DEFAULT_ROWS, DEFAULT_PALETTE_SIZE, &mut rng);
    let options = SwapOptions {
        luck: 0.3,
        ..Default::default()
    };

    let mut renderer = TerminalRenderer::new()?;
    let mut total_score: u64 = 0;
    let mut moves = 0u32;

    'game: loop {
        let Some((a, b)) = find_hint(&grid) else {
            renderer.draw(
                &grid,
                &[format!("board stuck after {moves} moves, score {total_score}")],
            )?;
            wait_for_quit()?;
            break;
        };

        let outcome = handle_swap_and_resolve(&mut grid, a, b, &options, &mut rng);
        total_score += outcome.score;
        moves += 1;

        for phase in &outcome.phases {
            let board = phase_board(phase);
            renderer.draw(
                board,
                &[
                    format!("move {moves}  score {total_score}  (+{})", outcome.score),
                    describe_phase(phase),
                    "press q to quit".to_string(),
                ],
            )?;
            if quit_requested(PHASE_DELAY)? {
                break 'game;
            }
        }
    }

    renderer.shutdown()?;
    println!("final score: {total_score} over {moves} moves (seed {seed})");
    Ok(())
}

fn phase_board(phase: &Phase) -> &Grid {
    match phase {
        Phase::AfterSwap { board }
        | Phase::MatchFound { board, .. }
        | Phase::PowerActivated { board, .. }
        | Phase::AfterRemove { board, .. }
        | Phase::AfterGravity { board }
        | Phase::AfterRefill { board, .. }
        | Phase::NoMatch { board } => board,
    }
}

/// Sleep for `delay`, returning true if the user asked to quit.
fn quit_requested(delay: Duration) -> Result<bool> {
    if event::poll(delay)? {
        if let Event::Key(key) = event::read()? {
            if matches!(key.code, KeyCode::Char('q') | KeyCode::Esc) {
                return Ok(true);
            }
        }
    }
    Ok(false)
}

fn wait_for_quit() -> Result<()> {
    loop {
        if quit_requested(Duration::from_millis(200))? {
            return Ok(());
        }
    }
}
