use std::str::FromStr;

use super::error::{FenError, MoveParseError};
use super::{Board, CastlingRights, Color, Move, MoveContext, Piece, PlacedPiece, Square};

impl Board {
    /// Parse a position string.
    ///
    /// Grammar: `<placement> <w|b> [<castling>] [<ignored>] [<ply count>] [<ignored>]`.
    /// Castling defaults to `KQkq` and the ply count to 0. The fourth field
    /// (an en passant square in standard FEN) is accepted and ignored.
    ///
    /// Castling rights are not stored; they are expressed through the
    /// `has_moved` flags of the kings and corner rooks.
    pub fn try_from_fen(fen: &str) -> Result<Self, FenError> {
        let fields: Vec<&str> = fen.split_whitespace().collect();
        if !(2..=6).contains(&fields.len()) {
            return Err(FenError::WrongFieldCount {
                found: fields.len(),
            });
        }

        let mut squares = parse_placement(fields[0])?;

        let side_to_move = match fields[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => {
                return Err(FenError::InvalidSideToMove {
                    found: other.to_string(),
                })
            }
        };

        let rights = parse_castling(fields.get(2).copied().unwrap_or("KQkq"))?;
        let ply_count = match fields.get(4) {
            Some(field) => parse_counter(field)?,
            None => 0,
        };
        if let Some(field) = fields.get(5) {
            parse_counter(field)?;
        }

        let mut king_squares = [Square::from_index(0); 2];
        for color in Color::BOTH {
            let kings: Vec<Square> = Square::all()
                .filter(|sq| {
                    squares[sq.index()]
                        .is_some_and(|p| p.piece == Piece::King && p.color == color)
                })
                .collect();
            if kings.len() != 1 {
                return Err(FenError::KingCount {
                    color,
                    found: kings.len(),
                });
            }
            king_squares[color.index()] = kings[0];
        }

        mark_moved_pieces(&mut squares, rights);
        Ok(Board::assemble(squares, side_to_move, king_squares, ply_count))
    }

    /// Parse a position string.
    ///
    /// # Panics
    /// Panics if the string is invalid. Use `try_from_fen` for fallible parsing.
    #[must_use]
    pub fn from_fen(fen: &str) -> Self {
        Self::try_from_fen(fen).expect("Invalid position string")
    }

    /// Replace this board with the parsed position.
    ///
    /// On error the board is left untouched.
    pub fn load_position(&mut self, fen: &str) -> Result<(), FenError> {
        *self = Board::try_from_fen(fen)?;
        Ok(())
    }

    /// Serialize as `<placement> <side> <castling> - <ply count>`.
    #[must_use]
    pub fn to_fen(&self) -> String {
        let mut rows: Vec<String> = Vec::new();
        for rank in (0..8).rev() {
            let mut row = String::new();
            let mut empty = 0;
            for file in 0..8 {
                let placed = Square::new(rank, file).and_then(|sq| self.piece_at(sq));
                if let Some(placed) = placed {
                    if empty > 0 {
                        row.push_str(&empty.to_string());
                        empty = 0;
                    }
                    row.push(placed.to_fen_char());
                } else {
                    empty += 1;
                }
            }
            if empty > 0 {
                row.push_str(&empty.to_string());
            }
            rows.push(row);
        }

        let active = match self.side_to_move {
            Color::White => "w",
            Color::Black => "b",
        };

        format!(
            "{} {} {} - {}",
            rows.join("/"),
            active,
            self.castling_rights().to_fen_field(),
            self.ply_count
        )
    }

    /// Parse a move in coordinate notation (e.g., "e2e4", "e7e8q").
    ///
    /// A promotion may omit the trailing `q`. Castling is written as the
    /// king's move ("e1g1").
    ///
    /// # Example
    /// ```
    /// use mailbox_chess::board::Board;
    ///
    /// let board = Board::new();
    /// let mv = board.parse_move("e2e4").unwrap();
    /// assert_eq!(mv.to_string(), "e2e4");
    /// ```
    pub fn parse_move(&self, text: &str) -> Result<Move, MoveParseError> {
        if !text.is_ascii() || text.len() < 4 || text.len() > 5 {
            return Err(MoveParseError::InvalidLength { len: text.len() });
        }
        let invalid_square = || MoveParseError::InvalidSquare {
            notation: text.to_string(),
        };
        let from: Square = text[0..2].parse().map_err(|_| invalid_square())?;
        let to: Square = text[2..4].parse().map_err(|_| invalid_square())?;

        if let Some(promo) = text[4..].chars().next() {
            if promo != 'q' {
                return Err(MoveParseError::InvalidPromotion { char: promo });
            }
        }

        self.legal_moves()
            .into_iter()
            .find(|mv| mv.from() == from && mv.to() == to)
            .ok_or_else(|| MoveParseError::IllegalMove {
                notation: text.to_string(),
            })
    }

    /// Parse a coordinate move and play it as a game move.
    ///
    /// # Example
    /// ```
    /// use mailbox_chess::board::Board;
    ///
    /// let mut board = Board::new();
    /// board.make_move_coord("e2e4").unwrap();
    /// board.make_move_coord("e7e5").unwrap();
    /// ```
    pub fn make_move_coord(&mut self, text: &str) -> Result<Move, MoveParseError> {
        let mv = self.parse_move(text)?;
        self.make_move(mv, MoveContext::Game);
        Ok(mv)
    }
}

fn parse_placement(field: &str) -> Result<[Option<PlacedPiece>; 64], FenError> {
    let ranks: Vec<&str> = field.split('/').collect();
    if ranks.len() != 8 {
        return Err(FenError::InvalidRankCount { found: ranks.len() });
    }

    let mut squares = [None; 64];
    for (row, rank_str) in ranks.iter().enumerate() {
        let rank = 7 - row;
        let mut file = 0;
        for c in rank_str.chars() {
            if let Some(run) = c.to_digit(10).filter(|d| (1..=8).contains(d)) {
                file += run as usize;
            } else {
                let piece = Piece::from_char(c).ok_or(FenError::InvalidPiece { char: c })?;
                let color = if c.is_ascii_uppercase() {
                    Color::White
                } else {
                    Color::Black
                };
                if let Some(sq) = Square::new(rank, file) {
                    squares[sq.index()] = Some(PlacedPiece::new(piece, color));
                }
                file += 1;
            }
            if file > 8 {
                return Err(FenError::BadRankLength {
                    rank: rank + 1,
                    files: file,
                });
            }
        }
        if file != 8 {
            return Err(FenError::BadRankLength {
                rank: rank + 1,
                files: file,
            });
        }
    }
    Ok(squares)
}

fn parse_castling(field: &str) -> Result<CastlingRights, FenError> {
    let mut rights = CastlingRights::none();
    for c in field.chars() {
        match c {
            'K' => rights.set(Color::White, true),
            'Q' => rights.set(Color::White, false),
            'k' => rights.set(Color::Black, true),
            'q' => rights.set(Color::Black, false),
            '-' => {}
            _ => return Err(FenError::InvalidCastling { char: c }),
        }
    }
    Ok(rights)
}

fn parse_counter(field: &str) -> Result<u32, FenError> {
    field.parse().map_err(|_| FenError::InvalidCounter {
        found: field.to_string(),
    })
}

/// Derive `has_moved` from square and castling rights: a king is fresh only
/// on its home square with a right to keep, a rook only on the corner its
/// right names, a pawn only on its starting rank.
fn mark_moved_pieces(squares: &mut [Option<PlacedPiece>; 64], rights: CastlingRights) {
    for sq in Square::all() {
        let Some(placed) = squares[sq.index()].as_mut() else {
            continue;
        };
        let color = placed.color;
        let home_rank = sq.rank() == color.back_rank();
        placed.has_moved = match placed.piece {
            Piece::King => {
                let can_castle = rights.has(color, true) || rights.has(color, false);
                !(home_rank && sq.file() == 4 && can_castle)
            }
            Piece::Rook => {
                let corner_right = match sq.file() {
                    7 => rights.has(color, true),
                    0 => rights.has(color, false),
                    _ => false,
                };
                !(home_rank && corner_right)
            }
            Piece::Pawn => sq.rank() != color.pawn_start_rank(),
            _ => false,
        };
    }
}

impl FromStr for Board {
    type Err = FenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Board::try_from_fen(s)
    }
}
