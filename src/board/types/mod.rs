//! Core chess types.
//!
//! - `Piece`, `Color` and `PlacedPiece` - pieces and their owners
//! - `Square` - board square (0-63)
//! - `Bitboard` - square sets used for check and block targets
//! - `Move` and `MoveList` - move representation
//! - `CastlingRights` - castling state derived from piece history

mod bitboard;
mod castling;
mod moves;
mod piece;
mod square;

pub use bitboard::Bitboard;
pub use castling::CastlingRights;
pub(crate) use moves::ScoredMoveList;
pub use moves::{Move, MoveList, MoveListIntoIter};
pub use piece::{Color, Piece, PlacedPiece};
pub use square::Square;
