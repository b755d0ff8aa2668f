//! Shapes module - vesicle geometry and matrix rotation
//!
//! Each neurotransmitter has a fixed vesicle shape; power-ups are a single cell.
//! Shapes are small filled/empty matrices (at most 4x4) stored inline so a
//! piece stays `Copy` and rotation never allocates.

use serde::{Deserialize, Serialize};

use crate::types::{Neurotransmitter, PieceKind};

/// Largest side of any shape matrix
pub const MAX_SHAPE_DIM: usize = 4;

const X: bool = true;
const O: bool = false;

/// A filled/empty matrix, `rows x cols`, row-major from the top-left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Shape {
    rows: u8,
    cols: u8,
    mask: [[bool; MAX_SHAPE_DIM]; MAX_SHAPE_DIM],
}

impl Shape {
    const fn from_mask(rows: u8, cols: u8, mask: [[bool; MAX_SHAPE_DIM]; MAX_SHAPE_DIM]) -> Self {
        Self { rows, cols, mask }
    }

    /// Build a shape from rows of 0/1 values (for tests and fixtures).
    ///
    /// Panics if the matrix is empty, ragged, or larger than 4x4.
    pub fn from_rows(rows: &[&[u8]]) -> Self {
        assert!(!rows.is_empty() && rows.len() <= MAX_SHAPE_DIM);
        let cols = rows[0].len();
        assert!(cols > 0 && cols <= MAX_SHAPE_DIM);

        let mut mask = [[false; MAX_SHAPE_DIM]; MAX_SHAPE_DIM];
        for (r, row) in rows.iter().enumerate() {
            assert_eq!(row.len(), cols, "ragged shape rows");
            for (c, &v) in row.iter().enumerate() {
                mask[r][c] = v != 0;
            }
        }
        Self {
            rows: rows.len() as u8,
            cols: cols as u8,
            mask,
        }
    }

    pub fn rows(&self) -> u8 {
        self.rows
    }

    pub fn cols(&self) -> u8 {
        self.cols
    }

    /// Offsets `(dx, dy)` of every filled sub-cell.
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        (0..self.rows as usize).flat_map(move |r| {
            (0..self.cols as usize)
                .filter(move |&c| self.mask[r][c])
                .map(move |c| (c as i8, r as i8))
        })
    }

    /// Rotate 90° clockwise: `new[y][x] = old[rows - 1 - x][y]`.
    pub fn rotate_cw(&self) -> Self {
        let rows = self.rows as usize;
        let cols = self.cols as usize;
        let mut mask = [[false; MAX_SHAPE_DIM]; MAX_SHAPE_DIM];
        for (y, out_row) in mask.iter_mut().enumerate().take(cols) {
            for (x, out) in out_row.iter_mut().enumerate().take(rows) {
                *out = self.mask[rows - 1 - x][y];
            }
        }
        Self {
            rows: self.cols,
            cols: self.rows,
            mask,
        }
    }
}

const DOPAMINE: Shape = Shape::from_mask(
    1,
    4,
    [[X, X, X, X], [O, O, O, O], [O, O, O, O], [O, O, O, O]],
);
const SEROTONIN: Shape = Shape::from_mask(
    2,
    3,
    [[X, O, O, O], [X, X, X, O], [O, O, O, O], [O, O, O, O]],
);
const GABA: Shape = Shape::from_mask(
    2,
    3,
    [[O, O, X, O], [X, X, X, O], [O, O, O, O], [O, O, O, O]],
);
const GLUTAMATE: Shape = Shape::from_mask(
    2,
    2,
    [[X, X, O, O], [X, X, O, O], [O, O, O, O], [O, O, O, O]],
);
const ACETYLCHOLINE: Shape = Shape::from_mask(
    2,
    3,
    [[O, X, X, O], [X, X, O, O], [O, O, O, O], [O, O, O, O]],
);
const NOREPINEPHRINE: Shape = Shape::from_mask(
    2,
    3,
    [[O, X, O, O], [X, X, X, O], [O, O, O, O], [O, O, O, O]],
);
const ENDORPHIN: Shape = Shape::from_mask(
    2,
    3,
    [[X, X, O, O], [O, X, X, O], [O, O, O, O], [O, O, O, O]],
);
const POWER_UP: Shape = Shape::from_mask(
    1,
    1,
    [[X, O, O, O], [O, O, O, O], [O, O, O, O], [O, O, O, O]],
);

/// Spawn shape of a neurotransmitter vesicle
pub fn vesicle_shape(nt: Neurotransmitter) -> Shape {
    match nt {
        Neurotransmitter::Dopamine => DOPAMINE,
        Neurotransmitter::Serotonin => SEROTONIN,
        Neurotransmitter::Gaba => GABA,
        Neurotransmitter::Glutamate => GLUTAMATE,
        Neurotransmitter::Acetylcholine => ACETYLCHOLINE,
        Neurotransmitter::Norepinephrine => NOREPINEPHRINE,
        Neurotransmitter::Endorphin => ENDORPHIN,
    }
}

/// Spawn shape for any piece kind
pub fn spawn_shape(kind: PieceKind) -> Shape {
    match kind {
        PieceKind::Vesicle(nt) => vesicle_shape(nt),
        PieceKind::PowerUp(_) => POWER_UP,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_vesicle_has_four_cells() {
        for nt in Neurotransmitter::ALL {
            assert_eq!(vesicle_shape(nt).cells().count(), 4, "{:?}", nt);
        }
    }

    #[test]
    fn test_power_up_is_single_cell() {
        let shape = spawn_shape(PieceKind::PowerUp(crate::types::PowerUpKind::MyelinBooster));
        assert_eq!(shape.rows(), 1);
        assert_eq!(shape.cols(), 1);
        assert_eq!(shape.cells().collect::<Vec<_>>(), vec![(0, 0)]);
    }

    #[test]
    fn test_rotate_swaps_dimensions() {
        let rotated = DOPAMINE.rotate_cw();
        assert_eq!(rotated.rows(), 4);
        assert_eq!(rotated.cols(), 1);
        assert_eq!(
            rotated.cells().collect::<Vec<_>>(),
            vec![(0, 0), (0, 1), (0, 2), (0, 3)]
        );
    }

    #[test]
    fn test_rotate_serotonin_clockwise() {
        // #..      ##
        // ###  ->  #.
        //          #.
        let rotated = SEROTONIN.rotate_cw();
        let expected = Shape::from_rows(&[&[1, 1], &[1, 0], &[1, 0]]);
        assert_eq!(rotated, expected);
    }

    #[test]
    fn test_four_rotations_are_identity() {
        for nt in Neurotransmitter::ALL {
            let shape = vesicle_shape(nt);
            let back = shape.rotate_cw().rotate_cw().rotate_cw().rotate_cw();
            assert_eq!(back, shape, "{:?}", nt);
        }
    }

    #[test]
    fn test_from_rows_matches_const_tables() {
        assert_eq!(Shape::from_rows(&[&[0, 1, 0], &[1, 1, 1]]), NOREPINEPHRINE);
        assert_eq!(Shape::from_rows(&[&[1, 1], &[1, 1]]), GLUTAMATE);
    }
}
