//! A mailbox chess engine.
//!
//! - [`board`] - position, move generation, evaluation and search
//! - [`book`] - opening book lookup
//! - [`engine`] - move selection under a time budget
//! - [`tt`] - transposition table

pub mod board;
pub mod book;
pub mod engine;
pub mod sync;
pub mod timer;
pub mod tt;
mod zobrist;

pub use board::{Board, Color, GameStatus, Move, MoveContext, Piece, Square};
pub use book::{Book, OpeningBook};
pub use engine::{Engine, EngineConfig};
pub use tt::TranspositionTable;
