//! Error types for board operations.

use std::fmt;

use super::Color;

/// Error type for position-string parsing failures
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FenError {
    /// Position string must have between 2 and 6 whitespace-separated fields
    WrongFieldCount { found: usize },
    /// Invalid piece character in the placement field
    InvalidPiece { char: char },
    /// Placement field must describe exactly 8 ranks
    InvalidRankCount { found: usize },
    /// A rank does not describe exactly 8 files
    BadRankLength { rank: usize, files: usize },
    /// Invalid side to move (must be 'w' or 'b')
    InvalidSideToMove { found: String },
    /// Invalid castling character
    InvalidCastling { char: char },
    /// Move counter is not a non-negative integer
    InvalidCounter { found: String },
    /// Each side needs exactly one king
    KingCount { color: Color, found: usize },
}

impl fmt::Display for FenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FenError::WrongFieldCount { found } => {
                write!(f, "Position must have 2 to 6 fields, found {found}")
            }
            FenError::InvalidPiece { char } => {
                write!(f, "Invalid piece character '{char}' in position")
            }
            FenError::InvalidRankCount { found } => {
                write!(f, "Position must describe 8 ranks, found {found}")
            }
            FenError::BadRankLength { rank, files } => {
                write!(f, "Rank {rank} describes {files} files, expected 8")
            }
            FenError::InvalidSideToMove { found } => {
                write!(f, "Invalid side to move '{found}', expected 'w' or 'b'")
            }
            FenError::InvalidCastling { char } => {
                write!(f, "Invalid castling character '{char}' in position")
            }
            FenError::InvalidCounter { found } => {
                write!(f, "Invalid move counter '{found}'")
            }
            FenError::KingCount { color, found } => {
                write!(f, "{color} must have exactly one king, found {found}")
            }
        }
    }
}

impl std::error::Error for FenError {}

/// Error type for coordinate move parsing failures
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveParseError {
    /// Move string has invalid length (must be 4-5 characters)
    InvalidLength { len: usize },
    /// Invalid square notation in move
    InvalidSquare { notation: String },
    /// Only queen promotion ('q') is playable
    InvalidPromotion { char: char },
    /// Move is not legal in the current position
    IllegalMove { notation: String },
}

impl fmt::Display for MoveParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveParseError::InvalidLength { len } => {
                write!(f, "Move must be 4-5 characters, found {len}")
            }
            MoveParseError::InvalidSquare { notation } => {
                write!(f, "Invalid square notation in '{notation}'")
            }
            MoveParseError::InvalidPromotion { char } => {
                write!(f, "Unsupported promotion piece '{char}'")
            }
            MoveParseError::IllegalMove { notation } => {
                write!(f, "Illegal move '{notation}'")
            }
        }
    }
}

impl std::error::Error for MoveParseError {}

/// Error type for square parsing failures
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SquareError {
    /// Rank out of bounds (must be 0-7)
    RankOutOfBounds { rank: usize },
    /// File out of bounds (must be 0-7)
    FileOutOfBounds { file: usize },
    /// Invalid algebraic notation
    InvalidNotation { notation: String },
}

impl fmt::Display for SquareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SquareError::RankOutOfBounds { rank } => {
                write!(f, "Rank {rank} out of bounds (must be 0-7)")
            }
            SquareError::FileOutOfBounds { file } => {
                write!(f, "File {file} out of bounds (must be 0-7)")
            }
            SquareError::InvalidNotation { notation } => {
                write!(f, "Invalid square notation '{notation}'")
            }
        }
    }
}

impl std::error::Error for SquareError {}

/// Error type for algebraic notation parsing failures
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SanError {
    /// Empty move string
    Empty,
    /// Invalid piece character
    InvalidPiece { char: char },
    /// Invalid square in the move
    InvalidSquare { notation: String },
    /// Only queen promotion is playable
    InvalidPromotion { char: char },
    /// Ambiguous move (multiple pieces can reach the target)
    AmbiguousMove { san: String },
    /// No matching legal move found
    NoMatchingMove { san: String },
}

impl fmt::Display for SanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SanError::Empty => write!(f, "Empty move string"),
            SanError::InvalidPiece { char } => {
                write!(f, "Invalid piece character '{char}' in move")
            }
            SanError::InvalidSquare { notation } => {
                write!(f, "Invalid square in move '{notation}'")
            }
            SanError::InvalidPromotion { char } => {
                write!(f, "Unsupported promotion piece '{char}'")
            }
            SanError::AmbiguousMove { san } => {
                write!(f, "Ambiguous move '{san}'")
            }
            SanError::NoMatchingMove { san } => {
                write!(f, "No legal move matches '{san}'")
            }
        }
    }
}

impl std::error::Error for SanError {}
