//! Coordinate set: a flat bitset over board positions
//!
//! Removal footprints and already-activated bookkeeping need cheap
//! membership tests and deduplicated inserts. Indexing `row * cols + col`
//! into a bit vector avoids per-position allocation entirely.

use nebula_match_types::Pos;

/// A set of board positions for a fixed grid shape
#[derive(Debug, Clone)]
pub struct CoordSet {
    cols: usize,
    rows: usize,
    bits: Vec<u64>,
    len: usize,
}

impl CoordSet {
    pub fn new(cols: usize, rows: usize) -> Self {
        let words = (cols * rows + 63) / 64;
        Self {
            cols,
            rows,
            bits: vec![0; words],
            len: 0,
        }
    }

    fn index(&self, pos: Pos) -> Option<usize> {
        if pos.row < self.rows && pos.col < self.cols {
            Some(pos.row * self.cols + pos.col)
        } else {
            None
        }
    }

    /// Insert a position; returns true if it was newly added.
    /// Out-of-bounds positions are ignored.
    pub fn insert(&mut self, pos: Pos) -> bool {
        let Some(idx) = self.index(pos) else {
            return false;
        };
        let (word, bit) = (idx / 64, idx % 64);
        let mask = 1u64 << bit;
        if self.bits[word] & mask != 0 {
            return false;
        }
        self.bits[word] |= mask;
        self.len += 1;
        true
    }

    pub fn contains(&self, pos: Pos) -> bool {
        match self.index(pos) {
            Some(idx) => self.bits[idx / 64] & (1u64 << (idx % 64)) != 0,
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Iterate members in row-major order
    pub fn iter(&self) -> impl Iterator<Item = Pos> + '_ {
        let cols = self.cols;
        (0..self.cols * self.rows)
            .filter(move |&idx| self.bits[idx / 64] & (1u64 << (idx % 64)) != 0)
            .map(move |idx| Pos::new(idx / cols, idx % cols))
    }

    pub fn to_vec(&self) -> Vec<Pos> {
        self.iter().collect()
    }
}
