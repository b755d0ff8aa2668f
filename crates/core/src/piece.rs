//! Piece module - the active falling piece
//!
//! Movement and rotation only ever apply when the resulting placement does not
//! collide; a failed attempt leaves the piece untouched.

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::shapes::{spawn_shape, Shape};
use crate::types::{PieceKind, BOARD_WIDTH};

/// Horizontal offsets tried by a rotation: in place, kick right, kick left.
const ROTATION_KICKS: [i8; 3] = [0, 1, -1];

/// Active falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActivePiece {
    pub kind: PieceKind,
    pub shape: Shape,
    pub x: i8,
    pub y: i8,
}

impl ActivePiece {
    /// Create a piece at the spawn anchor
    pub fn new(kind: PieceKind) -> Self {
        Self {
            kind,
            shape: spawn_shape(kind),
            x: spawn_x(),
            y: 0,
        }
    }

    /// Whether the piece overlaps anything at its current placement
    pub fn collides(&self, board: &Board) -> bool {
        board.check_collision(self.x, self.y, &self.shape)
    }

    /// Translate by (dx, dy) if the target placement is free.
    pub fn try_move(&mut self, board: &Board, dx: i8, dy: i8) -> bool {
        if board.check_collision(self.x + dx, self.y + dy, &self.shape) {
            return false;
        }
        self.x += dx;
        self.y += dy;
        true
    }

    /// Rotate clockwise with a one-column wall kick either way.
    ///
    /// Power-ups never rotate. The vertical position is never changed.
    pub fn try_rotate(&mut self, board: &Board) -> bool {
        if self.kind.is_power_up() {
            return false;
        }

        let rotated = self.shape.rotate_cw();
        for kick in ROTATION_KICKS {
            if !board.check_collision(self.x + kick, self.y, &rotated) {
                self.shape = rotated;
                self.x += kick;
                return true;
            }
        }
        false
    }

    /// Move down until blocked. Returns rows travelled.
    pub fn drop_to_floor(&mut self, board: &Board) -> u32 {
        let mut distance = 0;
        while self.try_move(board, 0, 1) {
            distance += 1;
        }
        distance
    }

    /// Row the piece would land on (ghost position)
    pub fn ghost_y(&self, board: &Board) -> i8 {
        let mut ghost = *self;
        ghost.drop_to_floor(board);
        ghost.y
    }

    /// Board cells covered by the piece (may include y < 0)
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        self.shape.cells().map(move |(dx, dy)| (self.x + dx, self.y + dy))
    }
}

/// Spawn column: one left of centre
pub fn spawn_x() -> i8 {
    (BOARD_WIDTH / 2) as i8 - 1
}
