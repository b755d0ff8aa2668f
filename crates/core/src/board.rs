//! Board module - manages the synaptic cleft grid
//!
//! The board is a 10x20 grid where each cell is empty or holds a [`Block`].
//! Uses a flat array for better cache locality and zero-allocation.
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..19 (top to bottom).
//! Pieces may hang above the board (y < 0) while spawning; those sub-cells are
//! never checked against occupancy and never written.

use arrayvec::ArrayVec;

use crate::rng::SimpleRng;
use crate::shapes::Shape;
use crate::types::{Block, Cell, ClearedRows, BOARD_HEIGHT, BOARD_WIDTH, REUPTAKE_SCAN_ROWS};

/// Total number of cells on the board
const BOARD_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

const W: usize = BOARD_WIDTH as usize;
const H: usize = BOARD_HEIGHT as usize;

/// The game board - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * W + (x as usize))
    }

    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// True if `shape` anchored at `(x, y)` leaves the board sideways, reaches
    /// the floor, or overlaps a block. Sub-cells above the top edge only count
    /// against the side walls.
    pub fn check_collision(&self, x: i8, y: i8, shape: &Shape) -> bool {
        shape.cells().any(|(dx, dy)| {
            let nx = x + dx;
            let ny = y + dy;
            if nx < 0 || nx >= BOARD_WIDTH as i8 || ny >= BOARD_HEIGHT as i8 {
                return true;
            }
            ny >= 0 && self.is_occupied(nx, ny)
        })
    }

    /// Write every filled sub-cell of `shape` that lies on the board.
    pub fn lock_shape(&mut self, x: i8, y: i8, shape: &Shape, block: Block) {
        for (dx, dy) in shape.cells() {
            let nx = x + dx;
            let ny = y + dy;
            if ny < 0 {
                continue;
            }
            let written = self.set(nx, ny, Some(block));
            debug_assert!(written, "locked sub-cell ({}, {}) is off the board", nx, ny);
        }
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= H {
            return false;
        }
        let start = y * W;
        self.cells[start..start + W].iter().all(|cell| cell.is_some())
    }

    fn is_row_empty(&self, y: usize) -> bool {
        let start = y * W;
        self.cells[start..start + W].iter().all(|cell| cell.is_none())
    }

    /// Remove every full row, shift the rows above down, and refill the top
    /// with empty rows. Returns the original row indices, bottom to top.
    ///
    /// Uses a two-pointer compaction with zero allocation.
    pub fn clear_lines(&mut self) -> ClearedRows {
        let mut cleared = ClearedRows::new();
        let mut write_y = H;

        // Scan from bottom to top
        for read_y in (0..H).rev() {
            if self.is_row_full(read_y) {
                cleared.push(read_y as u8);
            } else {
                write_y -= 1;
                if write_y != read_y {
                    let src = read_y * W;
                    self.cells.copy_within(src..src + W, write_y * W);
                }
            }
        }

        // Clear the remaining rows at the top
        self.cells[..write_y * W].fill(None);

        cleared
    }

    /// Topmost row holding at least one block
    pub fn top_occupied_row(&self) -> Option<usize> {
        (0..H).find(|&y| !self.is_row_empty(y))
    }

    /// Fraction of empty cells from the topmost occupied row to the floor.
    /// An empty board has no congestion.
    pub fn congestion(&self) -> f32 {
        let Some(top) = self.top_occupied_row() else {
            return 0.0;
        };
        let span = &self.cells[top * W..];
        let empty = span.iter().filter(|c| c.is_none()).count();
        empty as f32 / span.len() as f32
    }

    /// Leave one damaged block in the lowest of the bottom rows that still has
    /// a gap. Returns where it landed.
    pub fn reuptake_failure(&mut self, rng: &mut SimpleRng) -> Option<(i8, i8)> {
        let lowest = H - REUPTAKE_SCAN_ROWS as usize;
        for y in (lowest..H).rev() {
            let empty: ArrayVec<i8, W> = (0..W as i8)
                .filter(|&x| !self.is_occupied(x, y as i8))
                .collect();
            if let Some(x) = rng.pick(&empty) {
                self.set(x, y as i8, Some(Block::Damaged));
                return Some((x, y as i8));
            }
        }
        None
    }

    /// Clear up to `count` randomly chosen occupied cells.
    pub fn clear_random_cells(&mut self, count: usize, rng: &mut SimpleRng) -> usize {
        let mut filled: ArrayVec<usize, BOARD_SIZE> = self
            .cells
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_some())
            .map(|(i, _)| i)
            .collect();
        rng.shuffle(&mut filled);

        let n = count.min(filled.len());
        for &i in &filled[..n] {
            self.cells[i] = None;
        }
        n
    }

    /// Pick `count` distinct random columns.
    pub fn random_columns(&self, count: usize, rng: &mut SimpleRng) -> ArrayVec<u8, W> {
        let mut cols: ArrayVec<u8, W> = (0..BOARD_WIDTH).collect();
        rng.shuffle(&mut cols);
        cols.truncate(count.min(W));
        cols
    }

    /// Empty every cell in the given columns. Returns blocks removed.
    pub fn clear_columns(&mut self, columns: &[u8]) -> usize {
        let mut removed = 0;
        for &x in columns {
            for y in 0..H {
                if let Some(i) = Self::index(x as i8, y as i8) {
                    if self.cells[i].take().is_some() {
                        removed += 1;
                    }
                }
            }
        }
        removed
    }

    /// Empty a row in place; nothing shifts. Returns blocks removed.
    pub fn empty_row(&mut self, y: usize) -> usize {
        if y >= H {
            return 0;
        }
        let row = &mut self.cells[y * W..(y + 1) * W];
        let removed = row.iter().filter(|c| c.is_some()).count();
        row.fill(None);
        removed
    }

    /// Empty every block matching `pred`. Returns blocks removed.
    pub fn clear_matching(&mut self, pred: impl Fn(Block) -> bool) -> usize {
        let mut removed = 0;
        for cell in self.cells.iter_mut() {
            if matches!(*cell, Some(b) if pred(b)) {
                *cell = None;
                removed += 1;
            }
        }
        removed
    }

    /// Shuffle the blocks of each of the bottom `rows` rows and pack them to
    /// the left edge of their row.
    pub fn reorganize_bottom_rows(&mut self, rows: u8, rng: &mut SimpleRng) {
        let first = H.saturating_sub(rows as usize);
        for y in first..H {
            let row = &mut self.cells[y * W..(y + 1) * W];
            let mut blocks: ArrayVec<Block, W> = row.iter().flatten().copied().collect();
            rng.shuffle(&mut blocks);
            row.fill(None);
            for (cell, block) in row.iter_mut().zip(blocks) {
                *cell = Some(block);
            }
        }
    }

    /// Number of occupied cells with an occupied cell directly below.
    pub fn vertical_pairs(&self) -> u32 {
        let mut pairs = 0;
        for y in 0..H - 1 {
            for x in 0..W {
                if self.cells[y * W + x].is_some() && self.cells[(y + 1) * W + x].is_some() {
                    pairs += 1;
                }
            }
        }
        pairs
    }

    /// Number of occupied cells
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Iterate rows top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks_exact(W)
    }

    /// Create from a 2D vector (fixtures and tests)
    pub fn from_cells(cells_2d: Vec<Vec<Cell>>) -> Self {
        assert_eq!(cells_2d.len(), H);
        assert!(cells_2d.iter().all(|row| row.len() == W));

        let mut flat = [None; BOARD_SIZE];
        for (y, row) in cells_2d.iter().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                flat[y * W + x] = *cell;
            }
        }
        Self { cells: flat }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Neurotransmitter;

    const V: Cell = Some(Block::Vesicle(Neurotransmitter::Dopamine));

    #[test]
    fn test_board_index_calculation() {
        assert_eq!(Board::index(0, 0), Some(0));
        assert_eq!(Board::index(9, 0), Some(9));
        assert_eq!(Board::index(0, 1), Some(10));
        assert_eq!(Board::index(9, 19), Some(199));
        assert_eq!(Board::index(-1, 0), None);
        assert_eq!(Board::index(10, 0), None);
        assert_eq!(Board::index(0, 20), None);
    }

    #[test]
    fn test_clear_lines_two_pointer_keeps_order() {
        let mut board = Board::new();
        for x in 0..10 {
            board.set(x, 19, V);
            board.set(x, 17, V);
        }
        board.set(0, 18, Some(Block::Damaged));
        board.set(4, 16, V);

        let cleared = board.clear_lines();
        assert_eq!(cleared.as_slice(), &[19, 17]);
        assert_eq!(board.get(0, 19), Some(Some(Block::Damaged)));
        assert_eq!(board.get(4, 18), Some(V));
        assert_eq!(board.occupied_count(), 2);
    }

    #[test]
    fn test_reorganize_packs_left() {
        let mut board = Board::new();
        board.set(3, 19, V);
        board.set(7, 19, Some(Block::Damaged));
        board.set(9, 18, V);
        board.set(5, 10, V);

        let mut rng = SimpleRng::new(5);
        board.reorganize_bottom_rows(3, &mut rng);

        assert!(board.is_occupied(0, 19));
        assert!(board.is_occupied(1, 19));
        assert!(!board.is_occupied(2, 19));
        assert!(board.is_occupied(0, 18));
        assert!(!board.is_occupied(9, 18));
        // Outside the reorganized band nothing moves.
        assert!(board.is_occupied(5, 10));
        assert_eq!(board.occupied_count(), 4);
    }

    #[test]
    fn test_random_columns_are_distinct() {
        let board = Board::new();
        let mut rng = SimpleRng::new(77);
        for _ in 0..50 {
            let cols = board.random_columns(2, &mut rng);
            assert_eq!(cols.len(), 2);
            assert_ne!(cols[0], cols[1]);
            assert!(cols.iter().all(|&c| c < BOARD_WIDTH));
        }
    }
}
