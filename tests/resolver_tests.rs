use nebula_match::{
    find_matches, resolve_all, resolve_once, Grid, Orientation, Phase, Pos, PowerKind, SimpleRng,
    Tile,
};

/// Full board with no runs anywhere: consecutive cells differ in both
/// directions under `(2*row + col) % 5`.
fn pattern_grid(rows: usize, cols: usize) -> Grid {
    Grid::from_rows(
        (0..rows)
            .map(|row| {
                (0..cols)
                    .map(|col| Some(Tile::plain(((2 * row + col) % 5) as u8)))
                    .collect()
            })
            .collect(),
        8,
    )
}

fn plant(grid: &mut Grid, cells: &[(usize, usize)], value: u8) {
    for &(row, col) in cells {
        grid.set(Pos::new(row, col), Some(Tile::plain(value)));
    }
}

fn holes(grid: &Grid) -> usize {
    grid.cols() * grid.rows() - grid.occupied_count()
}

#[test]
fn test_quiescence_is_idempotent() {
    let mut grid = pattern_grid(9, 9);
    plant(&mut grid, &[(4, 2), (4, 3), (4, 4)], 7);
    let mut rng = SimpleRng::new(21);
    resolve_all(&mut grid, 0.0, &mut rng).expect("settles");

    assert!(find_matches(&grid).is_empty());
    assert!(!grid.has_holes());

    // A second pass on the settled board is immediately terminal.
    let mut phases = Vec::new();
    let pass = resolve_once(&mut grid, 0.0, &mut rng, &mut phases);
    assert!(pass.done);
    assert_eq!(phases.len(), 1);
    assert_eq!(phases[0].kind(), "nomatch");
}

#[test]
fn test_conservation_under_removal() {
    let mut grid = pattern_grid(9, 9);
    plant(&mut grid, &[(4, 2), (4, 3), (4, 4)], 7);
    let mut rng = SimpleRng::new(9);
    let mut phases = Vec::new();
    let pass = resolve_once(&mut grid, 0.0, &mut rng, &mut phases);

    assert_eq!(pass.removed, 3);
    let gravity_board = phases
        .iter()
        .find_map(|p| match p {
            Phase::AfterGravity { board } => Some(board),
            _ => None,
        })
        .expect("gravity phase present");
    assert_eq!(holes(gravity_board), pass.removed);

    let refill_board = phases
        .iter()
        .find_map(|p| match p {
            Phase::AfterRefill { board, .. } => Some(board),
            _ => None,
        })
        .expect("refill phase present");
    assert_eq!(holes(refill_board), 0);
}

#[test]
fn test_four_run_creates_striped_only() {
    let mut grid = pattern_grid(9, 9);
    plant(&mut grid, &[(4, 2), (4, 3), (4, 4), (4, 5)], 7);
    let mut rng = SimpleRng::new(3);
    let mut phases = Vec::new();
    let pass = resolve_once(&mut grid, 0.0, &mut rng, &mut phases);

    assert_eq!(pass.creations, 1);
    assert_eq!(pass.removed, 3);
    let Phase::MatchFound { creations, groups, .. } = &phases[0] else {
        panic!("expected match-found first");
    };
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].cells.len(), 4);
    assert_eq!(creations.len(), 1);
    assert_eq!(creations[0].power, PowerKind::Striped);
    assert_eq!(creations[0].pos, Pos::new(4, 2));
    assert_eq!(creations[0].orientation, Some(Orientation::Horizontal));

    // The created tile is present in the post-removal snapshot.
    let Some(Phase::AfterRemove { board, .. }) = phases
        .iter()
        .find(|p| matches!(p, Phase::AfterRemove { .. }))
    else {
        panic!("expected after-remove phase");
    };
    let created = board.tile(Pos::new(4, 2)).expect("striped tile placed");
    assert_eq!(created.power, Some(PowerKind::Striped));
}

#[test]
fn test_cross_intersection_creates_wrapped() {
    let mut grid = pattern_grid(9, 9);
    // Horizontal 3 at row 4 and vertical 3 at col 2, sharing (4,2).
    plant(&mut grid, &[(4, 2), (4, 3), (4, 4), (5, 2), (6, 2)], 7);
    let mut rng = SimpleRng::new(17);
    let mut phases = Vec::new();
    let pass = resolve_once(&mut grid, 0.0, &mut rng, &mut phases);

    assert_eq!(pass.creations, 1);
    assert_eq!(pass.removed, 4);
    let Phase::MatchFound { creations, groups, .. } = &phases[0] else {
        panic!("expected match-found first");
    };
    assert_eq!(groups.len(), 2);
    assert_eq!(creations.len(), 1);
    assert_eq!(creations[0].power, PowerKind::Wrapped);
    assert_eq!(creations[0].pos, Pos::new(4, 2));
}

#[test]
fn test_five_run_creates_colorbomb_at_middle() {
    let mut grid = pattern_grid(9, 9);
    plant(&mut grid, &[(4, 2), (4, 3), (4, 4), (4, 5), (4, 6)], 7);
    let mut rng = SimpleRng::new(29);
    let mut phases = Vec::new();
    let pass = resolve_once(&mut grid, 0.0, &mut rng, &mut phases);

    assert_eq!(pass.creations, 1);
    assert_eq!(pass.removed, 4);
    let Phase::MatchFound { creations, .. } = &phases[0] else {
        panic!("expected match-found first");
    };
    assert_eq!(creations[0].power, PowerKind::ColorBomb);
    assert_eq!(creations[0].pos, Pos::new(4, 4));
}

#[test]
fn test_resolve_all_with_luck_still_settles() {
    let mut grid = pattern_grid(9, 9);
    plant(&mut grid, &[(4, 2), (4, 3), (4, 4)], 7);
    let mut rng = SimpleRng::new(1234);
    let outcome = resolve_all(&mut grid, 0.5, &mut rng).expect("settles");
    assert!(!grid.has_holes());
    assert!(find_matches(&grid).is_empty());
    assert!(outcome.cascades >= 1);
    assert_eq!(outcome.phases.last().unwrap().kind(), "nomatch");
}
