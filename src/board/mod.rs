//! Chess board representation and game logic.
//!
//! The board is a 64-square mailbox. Each square keeps a cache of the
//! pseudo moves a piece standing there could make on an empty board, and
//! only the squares a move touches are regenerated. Legal moves are filtered
//! from that cache using the check and pin state of both kings.
//!
//! # Example
//! ```
//! use mailbox_chess::board::Board;
//!
//! let board = Board::new();
//! assert_eq!(board.legal_moves().len(), 20);
//! ```

mod error;
mod eval;
mod fen;
mod make_unmake;
mod movegen;
mod perft;
mod pst;
mod san;
mod search;
mod state;
mod types;

#[cfg(test)]
mod tests;

pub use error::{FenError, MoveParseError, SanError, SquareError};
pub use search::{
    is_mate_score, SearchConfig, SearchReport, Searcher, DEFAULT_MAX_DEPTH, INFINITY, MATE_SCORE,
};
pub use state::{Board, GameStatus, MoveContext, UnmakeInfo, DRAW_PLY_LIMIT, START_FEN};
pub use types::{
    Bitboard, CastlingRights, Color, Move, MoveList, MoveListIntoIter, Piece, PlacedPiece, Square,
};

pub(crate) use search::order_moves;
pub(crate) use types::ScoredMoveList;
