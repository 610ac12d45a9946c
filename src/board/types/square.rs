//! Square type and board geometry.

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::board::error::SquareError;

/// A square on the board, indexed 0-63 rank-major (a1 = 0, h1 = 7, a8 = 56).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Square(u8);

impl Square {
    /// Create a square from rank and file, both 0-7.
    #[must_use]
    pub const fn new(rank: usize, file: usize) -> Option<Self> {
        if rank < 8 && file < 8 {
            Some(Square((rank * 8 + file) as u8))
        } else {
            None
        }
    }

    /// Create a square from its index. Indices are masked into 0-63.
    #[inline]
    #[must_use]
    pub const fn from_index(idx: usize) -> Self {
        Square((idx & 63) as u8)
    }

    /// Iterate over all 64 squares in index order.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..64u8).map(Square)
    }

    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Rank 0-7, where 0 is rank "1".
    #[inline]
    #[must_use]
    pub const fn rank(self) -> usize {
        (self.0 / 8) as usize
    }

    /// File 0-7, where 0 is file "a".
    #[inline]
    #[must_use]
    pub const fn file(self) -> usize {
        (self.0 % 8) as usize
    }

    /// Mirror the square across the horizontal center line (a1 <-> a8).
    #[inline]
    #[must_use]
    pub const fn flip_vertical(self) -> Self {
        Square(self.0 ^ 56)
    }

    /// Step `offset` index units away from this square.
    ///
    /// The step is rejected if it leaves the board or if the rank or file
    /// changes by more than `limit`, which catches wraparound between the
    /// a- and h-files.
    #[inline]
    #[must_use]
    pub fn offset(self, offset: i8, limit: usize) -> Option<Self> {
        let target = self.0 as i16 + offset as i16;
        if !(0..64).contains(&target) {
            return None;
        }
        let target = Square(target as u8);
        if self.distance(target) > limit {
            return None;
        }
        Some(target)
    }

    /// Chebyshev (king-move) distance.
    #[inline]
    #[must_use]
    pub fn distance(self, other: Square) -> usize {
        self.rank()
            .abs_diff(other.rank())
            .max(self.file().abs_diff(other.file()))
    }

    /// Manhattan (rook-move) distance.
    #[inline]
    #[must_use]
    pub fn manhattan_distance(self, other: Square) -> usize {
        self.rank().abs_diff(other.rank()) + self.file().abs_diff(other.file())
    }

    /// Manhattan distance to the nearest of the four center squares.
    #[inline]
    #[must_use]
    pub fn center_manhattan_distance(self) -> usize {
        let file_dist = if self.file() < 4 { 3 - self.file() } else { self.file() - 4 };
        let rank_dist = if self.rank() < 4 { 3 - self.rank() } else { self.rank() - 4 };
        file_dist + rank_dist
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", (self.file() as u8 + b'a') as char, self.rank() + 1)
    }
}

impl TryFrom<(usize, usize)> for Square {
    type Error = SquareError;

    fn try_from((rank, file): (usize, usize)) -> Result<Self, Self::Error> {
        if rank >= 8 {
            return Err(SquareError::RankOutOfBounds { rank });
        }
        if file >= 8 {
            return Err(SquareError::FileOutOfBounds { file });
        }
        Ok(Square((rank * 8 + file) as u8))
    }
}

impl FromStr for Square {
    type Err = SquareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || SquareError::InvalidNotation {
            notation: s.to_string(),
        };
        let mut chars = s.chars();
        let (Some(file), Some(rank), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(invalid());
        };
        if !('a'..='h').contains(&file) || !('1'..='8').contains(&rank) {
            return Err(invalid());
        }
        Square::new(rank as usize - '1' as usize, file as usize - 'a' as usize).ok_or_else(invalid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        s.parse().unwrap()
    }

    #[test]
    fn test_index_layout() {
        assert_eq!(sq("a1").index(), 0);
        assert_eq!(sq("h1").index(), 7);
        assert_eq!(sq("a8").index(), 56);
        assert_eq!(sq("e4").rank(), 3);
        assert_eq!(sq("e4").file(), 4);
        assert_eq!(sq("e4").to_string(), "e4");
    }

    #[test]
    fn test_offset_rejects_wraparound() {
        // h1 + 1 would land on a2
        assert_eq!(sq("h1").offset(1, 1), None);
        assert_eq!(sq("a2").offset(-1, 1), None);
        // knight from g1 to the a-file wraps
        assert_eq!(sq("g1").offset(10, 2), None);
        assert_eq!(sq("g1").offset(15, 2), Some(sq("f3")));
        assert_eq!(sq("a8").offset(8, 1), None);
    }

    #[test]
    fn test_center_manhattan_distance() {
        assert_eq!(sq("d4").center_manhattan_distance(), 0);
        assert_eq!(sq("e5").center_manhattan_distance(), 0);
        assert_eq!(sq("a1").center_manhattan_distance(), 6);
        assert_eq!(sq("h8").center_manhattan_distance(), 6);
    }

    #[test]
    fn test_flip_vertical() {
        assert_eq!(sq("a1").flip_vertical(), sq("a8"));
        assert_eq!(sq("e2").flip_vertical(), sq("e7"));
    }

    #[test]
    fn test_parse_errors() {
        assert!("i1".parse::<Square>().is_err());
        assert!("a9".parse::<Square>().is_err());
        assert!("a".parse::<Square>().is_err());
        assert!("a1b".parse::<Square>().is_err());
        assert_eq!(
            Square::try_from((8, 0)),
            Err(SquareError::RankOutOfBounds { rank: 8 })
        );
    }
}
