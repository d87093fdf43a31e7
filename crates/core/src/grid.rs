//! Grid model: rectangular board storage and access
//!
//! Cells are stored in a flat row-major `Vec` indexed `row * cols + col`.
//! Out-of-bounds reads return `None` (same shape as an empty cell), which
//! keeps neighborhood scans free of explicit boundary branches.

use serde::{Deserialize, Serialize};

use nebula_match_types::{Cell, Pos, SymbolId, Tile, FILL_RETRY_LIMIT, MIN_RUN_LEN};

use crate::rng::SimpleRng;

/// The board: a rectangle of cells plus its symbol palette size
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    cols: usize,
    rows: usize,
    palette_size: u8,
    cells: Vec<Cell>,
}

impl Grid {
    /// An all-empty grid
    pub fn empty(cols: usize, rows: usize, palette_size: u8) -> Self {
        Self {
            cols,
            rows,
            palette_size,
            cells: vec![None; cols * rows],
        }
    }

    /// Generate a full grid with no pre-existing matches.
    ///
    /// Each cell draws a uniform symbol, retrying up to [`FILL_RETRY_LIMIT`]
    /// times when the draw would complete a horizontal or vertical run with
    /// the already-placed cells above and to the left. After the retry
    /// budget the last draw is accepted as-is, so generation always
    /// terminates even on tiny palettes.
    pub fn generate(cols: usize, rows: usize, palette_size: u8, rng: &mut SimpleRng) -> Self {
        let mut grid = Self::empty(cols, rows, palette_size);
        for row in 0..rows {
            for col in 0..cols {
                let mut value = rng.next_range(palette_size as u32) as SymbolId;
                for _ in 0..FILL_RETRY_LIMIT {
                    if !grid.would_complete_run(row, col, value) {
                        break;
                    }
                    value = rng.next_range(palette_size as u32) as SymbolId;
                }
                grid.cells[row * cols + col] = Some(Tile::plain(value));
            }
        }
        grid
    }

    /// Build a grid from explicit rows of cells. Panics if row widths differ.
    pub fn from_rows(rows: Vec<Vec<Cell>>, palette_size: u8) -> Self {
        let row_count = rows.len();
        let cols = rows.first().map_or(0, |r| r.len());
        let mut cells = Vec::with_capacity(row_count * cols);
        for row in rows {
            assert_eq!(row.len(), cols, "ragged rows");
            cells.extend(row);
        }
        Self {
            cols,
            rows: row_count,
            palette_size,
            cells,
        }
    }

    fn would_complete_run(&self, row: usize, col: usize, value: SymbolId) -> bool {
        let same = |r: isize, c: isize| {
            self.get(r, c)
                .is_some_and(|t| t.value == value)
        };
        let (r, c) = (row as isize, col as isize);
        // Only cells above and to the left exist during generation.
        let need = (MIN_RUN_LEN - 1) as isize;
        (1..=need).all(|d| same(r, c - d)) || (1..=need).all(|d| same(r - d, c))
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn palette_size(&self) -> u8 {
        self.palette_size
    }

    pub fn in_bounds(&self, pos: Pos) -> bool {
        pos.row < self.rows && pos.col < self.cols
    }

    /// Read a cell by signed coordinates. Out of bounds reads as `None`.
    pub fn get(&self, row: isize, col: isize) -> Cell {
        if row < 0 || col < 0 || row as usize >= self.rows || col as usize >= self.cols {
            return None;
        }
        self.cells[row as usize * self.cols + col as usize]
    }

    /// Read a cell at an in-bounds position
    pub fn tile(&self, pos: Pos) -> Cell {
        self.get(pos.row as isize, pos.col as isize)
    }

    /// Write a cell. Panics on out-of-bounds positions.
    pub fn set(&mut self, pos: Pos, cell: Cell) {
        assert!(self.in_bounds(pos), "set out of bounds: {pos:?}");
        self.cells[pos.row * self.cols + pos.col] = cell;
    }

    /// Exchange the contents of two cells
    pub fn swap(&mut self, a: Pos, b: Pos) {
        let ia = a.row * self.cols + a.col;
        let ib = b.row * self.cols + b.col;
        self.cells.swap(ia, ib);
    }

    /// Whether any cell is currently empty
    pub fn has_holes(&self) -> bool {
        self.cells.iter().any(|c| c.is_none())
    }

    /// All positions in row-major order
    pub fn positions(&self) -> impl Iterator<Item = Pos> + '_ {
        let cols = self.cols;
        (0..self.rows).flat_map(move |row| (0..cols).map(move |col| Pos::new(row, col)))
    }

    /// Count of occupied cells
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }
}
