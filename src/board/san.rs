//! Standard Algebraic Notation (SAN) support.
//!
//! SAN is the notation used by scoresheets and opening books, for example
//! "e4", "Nf3", "Bxc6+", "O-O" or "e8=Q#".
//!
//! # Examples
//! ```
//! use mailbox_chess::board::Board;
//!
//! let board = Board::new();
//! let mv = board.parse_san("Nf3").unwrap();
//! assert_eq!(board.move_to_san(mv), "Nf3");
//! ```

use super::error::SanError;
use super::{Board, Move, MoveContext, Piece, Square};

/// Components of a non-castling SAN token after the piece letter.
struct SanParts {
    file: Option<usize>,
    rank: Option<usize>,
    dest: Square,
    promotion: Option<Piece>,
}

impl Board {
    /// Format a legal move in Standard Algebraic Notation.
    ///
    /// The check and mate suffixes are computed by playing the move on a
    /// scratch copy of the board.
    #[must_use]
    pub fn move_to_san(&self, mv: Move) -> String {
        let mut san = String::new();

        if mv.is_castle() {
            san.push_str(if mv.is_castle_kingside() { "O-O" } else { "O-O-O" });
        } else if let Some(mover) = self.piece_at(mv.from()) {
            let capture = self.piece_at(mv.to()).is_some();

            if mover.piece == Piece::Pawn {
                if capture {
                    san.push(file_char(mv.from()));
                }
            } else {
                san.push(mover.piece.to_char().to_ascii_uppercase());
                let (needs_file, needs_rank) = self.needs_disambiguation(mv, mover.piece);
                if needs_file {
                    san.push(file_char(mv.from()));
                }
                if needs_rank {
                    san.push(rank_char(mv.from()));
                }
            }

            if capture {
                san.push('x');
            }
            san.push_str(&mv.to().to_string());

            if mv.is_promotion() {
                san.push_str("=Q");
            }
        }

        let mut scratch = self.clone();
        scratch.make_move(mv, MoveContext::Search);
        let mover = self.side_to_move();
        if scratch.is_in_check(mover.opponent()) {
            if scratch.legal_moves().is_empty() {
                san.push('#');
            } else {
                san.push('+');
            }
        }

        san
    }

    /// Which of file and rank are needed to tell `mv` apart from other legal
    /// moves of the same piece type to the same square.
    fn needs_disambiguation(&self, mv: Move, piece: Piece) -> (bool, bool) {
        let rivals: Vec<Square> = self
            .legal_moves()
            .iter()
            .filter(|other| {
                other.to() == mv.to()
                    && other.from() != mv.from()
                    && self.piece_at(other.from()).map(|p| p.piece) == Some(piece)
            })
            .map(|other| other.from())
            .collect();

        if rivals.is_empty() {
            return (false, false);
        }

        let shares_file = rivals.iter().any(|sq| sq.file() == mv.from().file());
        let shares_rank = rivals.iter().any(|sq| sq.rank() == mv.from().rank());

        match (shares_file, shares_rank) {
            (false, _) => (true, false),
            (true, false) => (false, true),
            (true, true) => (true, true),
        }
    }

    /// Parse a move in Standard Algebraic Notation against the legal moves of
    /// the current position.
    ///
    /// Accepts optional capture markers and trailing `+`/`#`/`!`/`?`
    /// annotations. Castling may be written with letter O or digit zero.
    ///
    /// # Errors
    ///
    /// Returns [`SanError`] if the text is malformed, matches no legal move,
    /// or matches more than one.
    pub fn parse_san(&self, text: &str) -> Result<Move, SanError> {
        let san = text.trim().trim_end_matches(['+', '#', '!', '?']);
        if san.is_empty() {
            return Err(SanError::Empty);
        }

        match san {
            "O-O" | "0-0" => return self.find_castle(true, san),
            "O-O-O" | "0-0-0" => return self.find_castle(false, san),
            _ => {}
        }

        let mut chars = san.chars().peekable();
        let piece = match chars.peek() {
            Some(&c) if c.is_ascii_uppercase() => {
                chars.next();
                match Piece::from_char(c) {
                    Some(p) if p != Piece::Pawn => p,
                    _ => return Err(SanError::InvalidPiece { char: c }),
                }
            }
            _ => Piece::Pawn,
        };

        let rest: String = chars.collect();
        let parts = parse_parts(&rest)?;

        let candidates: Vec<Move> = self
            .legal_moves()
            .iter()
            .copied()
            .filter(|mv| {
                mv.to() == parts.dest
                    && !mv.is_castle()
                    && self.piece_at(mv.from()).map(|p| p.piece) == Some(piece)
                    && (parts.promotion.is_none() || mv.is_promotion())
                    && parts.file.map_or(true, |f| mv.from().file() == f)
                    && parts.rank.map_or(true, |r| mv.from().rank() == r)
            })
            .collect();

        match candidates.as_slice() {
            [] => Err(SanError::NoMatchingMove { san: san.to_string() }),
            [only] => Ok(*only),
            _ => Err(SanError::AmbiguousMove { san: san.to_string() }),
        }
    }

    /// Parse a SAN move and play it in game context.
    ///
    /// # Errors
    ///
    /// Returns [`SanError`] if the move cannot be parsed; the board is left
    /// untouched in that case.
    pub fn make_move_san(&mut self, text: &str) -> Result<Move, SanError> {
        let mv = self.parse_san(text)?;
        self.make_move(mv, MoveContext::Game);
        Ok(mv)
    }

    fn find_castle(&self, kingside: bool, san: &str) -> Result<Move, SanError> {
        self.legal_moves()
            .iter()
            .copied()
            .find(|mv| mv.is_castle() && mv.is_castle_kingside() == kingside)
            .ok_or_else(|| SanError::NoMatchingMove { san: san.to_string() })
    }
}

/// Split `[file][rank][x]<dest>[=Q]` into its parts.
fn parse_parts(text: &str) -> Result<SanParts, SanError> {
    let (body, promotion) = match text.split_once('=') {
        Some((body, promo)) => {
            let mut promo_chars = promo.chars();
            let c = promo_chars.next().ok_or(SanError::InvalidPromotion { char: '=' })?;
            if promo_chars.next().is_some() || c.to_ascii_uppercase() != 'Q' {
                return Err(SanError::InvalidPromotion { char: c });
            }
            (body, Some(Piece::Queen))
        }
        None => (text, None),
    };

    let body: Vec<char> = body.chars().filter(|&c| c != 'x').collect();
    if body.len() < 2 {
        return Err(SanError::InvalidSquare { notation: body.iter().collect() });
    }

    let (hint, dest_chars) = body.split_at(body.len() - 2);
    let dest_text: String = dest_chars.iter().collect();
    let dest: Square = dest_text
        .parse()
        .map_err(|_| SanError::InvalidSquare { notation: dest_text.clone() })?;

    let mut file = None;
    let mut rank = None;
    for &c in hint {
        match c {
            'a'..='h' if file.is_none() => file = Some(c as usize - 'a' as usize),
            '1'..='8' if rank.is_none() => rank = Some(c as usize - '1' as usize),
            _ => return Err(SanError::InvalidSquare { notation: body.iter().collect() }),
        }
    }

    Ok(SanParts { file, rank, dest, promotion })
}

fn file_char(sq: Square) -> char {
    (b'a' + sq.file() as u8) as char
}

fn rank_char(sq: Square) -> char {
    (b'1' + sq.rank() as u8) as char
}
