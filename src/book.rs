//! Opening book lookup.
//!
//! A book maps position fingerprints to a prepared reply. [`Book`] is built
//! from move sequences in algebraic notation played out from the start
//! position.

use std::collections::HashMap;

use log::trace;

use crate::board::{Board, Move, SanError};

/// Longest prefix of a line that is kept, in plies.
pub const MAX_BOOK_PLIES: usize = 10;

/// Source of prepared moves consulted before searching.
pub trait OpeningBook {
    /// A move to play in `board`, if the book knows the position.
    fn book_move(&self, board: &Board) -> Option<Move>;
}

/// In-memory book keyed by position fingerprint.
#[derive(Clone, Debug, Default)]
pub struct Book {
    entries: HashMap<u64, Move>,
}

impl Book {
    #[must_use]
    pub fn new() -> Self {
        Book::default()
    }

    /// Build a book from several lines, in order.
    ///
    /// # Errors
    ///
    /// Returns the first [`SanError`] encountered.
    pub fn from_lines(lines: &[&[&str]]) -> Result<Self, SanError> {
        let mut book = Book::new();
        for line in lines {
            book.add_line(line)?;
        }
        Ok(book)
    }

    /// Add a line of SAN moves starting from the initial position.
    ///
    /// Only the first [`MAX_BOOK_PLIES`] moves are used. A position already
    /// known from an earlier line keeps its earlier move.
    ///
    /// # Errors
    ///
    /// Returns [`SanError`] if a move does not parse in its position; moves
    /// before it are kept.
    pub fn add_line(&mut self, line: &[&str]) -> Result<(), SanError> {
        let mut board = Board::new();
        for san in line.iter().take(MAX_BOOK_PLIES) {
            let key = board.hash();
            let mv = board.make_move_san(san)?;
            self.entries.entry(key).or_insert(mv);
        }
        Ok(())
    }

    /// Number of positions the book knows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl OpeningBook for Book {
    fn book_move(&self, board: &Board) -> Option<Move> {
        let mv = self.entries.get(&board.hash()).copied()?;
        // A fingerprint collision must never produce an illegal move.
        if board.legal_moves().contains(mv) {
            trace!("book move {mv}");
            Some(mv)
        } else {
            None
        }
    }
}
