//! Move types and move list.

use std::fmt;
use std::ops::Index;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::square::Square;

/// A move between two squares.
///
/// `direction` is the unit board offset the move travels along (one of the
/// king, knight or pawn step deltas). Check and pin filtering compare it
/// against the pin line, so a double pawn step carries its single-step
/// direction. A castling move goes from the king's square to the king's
/// destination two files away and carries direction `+1` (king side) or
/// `-1` (queen side). Promotions always produce a queen.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Move {
    from: Square,
    to: Square,
    direction: i8,
    castle: bool,
    promotion: bool,
}

impl Move {
    /// Placeholder move (a1a1) used to fill fixed-size buffers
    pub const NULL: Move = Move {
        from: Square::from_index(0),
        to: Square::from_index(0),
        direction: 0,
        castle: false,
        promotion: false,
    };

    /// Create an ordinary move along `direction`
    #[inline]
    #[must_use]
    pub const fn new(from: Square, to: Square, direction: i8) -> Self {
        Move {
            from,
            to,
            direction,
            castle: false,
            promotion: false,
        }
    }

    /// Create a castling move; `to` is the king's destination
    #[inline]
    #[must_use]
    pub const fn castle(from: Square, to: Square, direction: i8) -> Self {
        Move {
            from,
            to,
            direction,
            castle: true,
            promotion: false,
        }
    }

    /// Create a pawn move that lands on the last rank
    #[inline]
    #[must_use]
    pub const fn promotion(from: Square, to: Square, direction: i8) -> Self {
        Move {
            from,
            to,
            direction,
            castle: false,
            promotion: true,
        }
    }

    #[inline]
    #[must_use]
    pub const fn from(self) -> Square {
        self.from
    }

    #[inline]
    #[must_use]
    pub const fn to(self) -> Square {
        self.to
    }

    #[inline]
    #[must_use]
    pub const fn direction(self) -> i8 {
        self.direction
    }

    #[inline]
    #[must_use]
    pub const fn is_castle(self) -> bool {
        self.castle
    }

    /// Returns true if this is king-side castling (O-O)
    #[inline]
    #[must_use]
    pub const fn is_castle_kingside(self) -> bool {
        self.castle && self.direction > 0
    }

    #[inline]
    #[must_use]
    pub const fn is_promotion(self) -> bool {
        self.promotion
    }

    /// Squares the castling rook travels between, as (from, to)
    #[must_use]
    pub(crate) fn castle_rook_squares(self) -> Option<(Square, Square)> {
        if !self.castle {
            return None;
        }
        let king = self.from.index();
        let (rook_from, rook_to) = if self.direction > 0 {
            (king + 3, king + 1)
        } else {
            (king - 4, king - 1)
        };
        Some((Square::from_index(rook_from), Square::from_index(rook_to)))
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({}{} d{}", self.from, self.to, self.direction)?;
        if self.promotion {
            write!(f, " =Q")?;
        }
        if self.castle {
            write!(f, " castle")?;
        }
        write!(f, ")")
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if self.promotion {
            write!(f, "q")?;
        }
        Ok(())
    }
}

pub(crate) const MAX_MOVES: usize = 256;

/// List of moves with fixed-size backing array.
#[derive(Clone, Debug)]
pub struct MoveList {
    moves: [Move; MAX_MOVES],
    len: usize,
}

impl MoveList {
    pub(crate) fn new() -> Self {
        MoveList {
            moves: [Move::NULL; MAX_MOVES],
            len: 0,
        }
    }

    pub(crate) fn push(&mut self, mv: Move) {
        self.moves[self.len] = mv;
        self.len += 1;
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Move] {
        &self.moves[..self.len]
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Move> {
        self.as_slice().iter()
    }

    #[must_use]
    pub fn contains(&self, mv: Move) -> bool {
        self.as_slice().contains(&mv)
    }

    #[must_use]
    pub fn first(&self) -> Option<Move> {
        self.as_slice().first().copied()
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl Default for MoveList {
    fn default() -> Self {
        MoveList::new()
    }
}

/// Owning iterator over moves in a `MoveList`
pub struct MoveListIntoIter {
    list: MoveList,
    idx: usize,
}

impl Iterator for MoveListIntoIter {
    type Item = Move;

    fn next(&mut self) -> Option<Self::Item> {
        if self.idx < self.list.len {
            let mv = self.list.moves[self.idx];
            self.idx += 1;
            Some(mv)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.list.len - self.idx;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for MoveListIntoIter {}

impl IntoIterator for MoveList {
    type Item = Move;
    type IntoIter = MoveListIntoIter;

    fn into_iter(self) -> Self::IntoIter {
        MoveListIntoIter { list: self, idx: 0 }
    }
}

impl Index<usize> for MoveList {
    type Output = Move;

    fn index(&self, idx: usize) -> &Self::Output {
        assert!(
            idx < self.len,
            "MoveList index {} out of bounds (len {})",
            idx,
            self.len
        );
        &self.moves[idx]
    }
}

/// A scored move for move ordering.
#[derive(Clone, Copy, Debug)]
pub struct ScoredMove {
    pub mv: Move,
    pub score: i32,
}

/// Fixed-size list of scored moves to avoid heap allocation.
#[derive(Clone, Debug)]
pub struct ScoredMoveList {
    moves: [ScoredMove; MAX_MOVES],
    len: usize,
}

impl ScoredMoveList {
    #[must_use]
    pub fn new() -> Self {
        ScoredMoveList {
            moves: [ScoredMove {
                mv: Move::NULL,
                score: 0,
            }; MAX_MOVES],
            len: 0,
        }
    }

    #[inline]
    pub fn push(&mut self, mv: Move, score: i32) {
        self.moves[self.len] = ScoredMove { mv, score };
        self.len += 1;
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[must_use]
    pub fn as_slice(&self) -> &[ScoredMove] {
        &self.moves[..self.len]
    }

    /// Sort moves by score in descending order. The sort is stable, so
    /// equal scores keep generation order.
    pub fn sort_by_score_desc(&mut self) {
        self.moves[..self.len].sort_by(|a, b| b.score.cmp(&a.score));
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ScoredMove> {
        self.as_slice().iter()
    }
}

impl Default for ScoredMoveList {
    fn default() -> Self {
        ScoredMoveList::new()
    }
}
