//! Legal move filtering, castling and attack queries.

use super::super::{Board, Color, Move, MoveList, Piece, Square};
use super::{
    is_pawn_push, BISHOP_DIRECTIONS, KING_QUEEN_DIRECTIONS, KNIGHT_DIRECTIONS, ROOK_DIRECTIONS,
};

impl Board {
    /// Legal moves for the side to move.
    #[must_use]
    pub fn legal_moves(&self) -> MoveList {
        self.legal_moves_for(self.side_to_move)
    }

    /// Legal moves that capture, for the side to move.
    #[must_use]
    pub fn legal_captures(&self) -> MoveList {
        let mut captures = MoveList::new();
        for mv in &self.legal_moves() {
            if self.squares[mv.to().index()].is_some() {
                captures.push(*mv);
            }
        }
        captures
    }

    /// Legal moves for `color` regardless of whose turn it is.
    #[must_use]
    pub fn legal_moves_for(&self, color: Color) -> MoveList {
        let mut moves = MoveList::new();
        let check = &self.checks[color.index()];
        let king = self.king_squares[color.index()];
        let double_check = check.double_check();
        let evasions = check.evasion_targets();

        for (from, placed) in self.pieces_of(color) {
            let is_king = placed.piece == Piece::King;
            if double_check && !is_king {
                continue;
            }
            let pin = check.pins[from.index()];

            let mut blocked_direction = 0;
            for &mv in self.movegen.moves_from(from) {
                let dir = mv.direction();
                if dir == blocked_direction {
                    continue;
                }
                let target = self.squares[mv.to().index()];
                if target.is_some() {
                    blocked_direction = dir;
                }

                match placed.piece {
                    Piece::Pawn if is_pawn_push(dir) => {
                        if target.is_some() {
                            continue;
                        }
                    }
                    Piece::Pawn => {
                        if !target.is_some_and(|t| t.color != color) {
                            continue;
                        }
                    }
                    _ => {
                        if target.is_some_and(|t| t.color == color) {
                            continue;
                        }
                    }
                }

                if is_king {
                    if self.is_square_attacked(mv.to(), color.opponent(), Some(king)) {
                        continue;
                    }
                } else {
                    if pin != 0 && dir != pin && dir != -pin {
                        continue;
                    }
                    if check.in_check() && !evasions.contains(mv.to()) {
                        continue;
                    }
                }
                moves.push(mv);
            }

            if is_king && !check.in_check() {
                self.push_castling_moves(from, color, &mut moves);
            }
        }

        moves
    }

    fn push_castling_moves(&self, king: Square, color: Color, moves: &mut MoveList) {
        let Some(placed) = self.squares[king.index()] else {
            return;
        };
        if placed.has_moved {
            return;
        }
        let enemy = color.opponent();

        for (dir, rook_distance) in [(1i8, 3usize), (-1i8, 4usize)] {
            let rook_index = if dir > 0 {
                king.index() + rook_distance
            } else {
                match king.index().checked_sub(rook_distance) {
                    Some(idx) => idx,
                    None => continue,
                }
            };
            let rook_sq = Square::from_index(rook_index);
            if rook_sq.rank() != king.rank() {
                continue;
            }
            let rook_ready = self.squares[rook_index]
                .is_some_and(|r| r.piece == Piece::Rook && r.color == color && !r.has_moved);
            if !rook_ready {
                continue;
            }

            let between_empty = (1..rook_distance).all(|step| {
                let idx = king.index() as isize + dir as isize * step as isize;
                self.squares[idx as usize].is_none()
            });
            if !between_empty {
                continue;
            }

            let path_safe = (0..=2).all(|step| {
                let idx = king.index() as isize + dir as isize * step;
                !self.is_square_attacked(Square::from_index(idx as usize), enemy, None)
            });
            if !path_safe {
                continue;
            }

            let to = Square::from_index((king.index() as isize + 2 * dir as isize) as usize);
            moves.push(Move::castle(king, to, dir));
        }
    }

    /// Returns true if `by` attacks `target`.
    ///
    /// `transparent` is treated as empty, so a king stepping along the line
    /// of a slider still sees the square behind it as attacked.
    #[must_use]
    pub fn is_square_attacked(&self, target: Square, by: Color, transparent: Option<Square>) -> bool {
        let occupant = |sq: Square| {
            if Some(sq) == transparent {
                None
            } else {
                self.squares[sq.index()]
            }
        };
        let is = |sq: Square, pieces: &[Piece]| {
            occupant(sq).is_some_and(|p| p.color == by && pieces.contains(&p.piece))
        };

        for &dir in &KNIGHT_DIRECTIONS {
            if target.offset(dir, 2).is_some_and(|sq| is(sq, &[Piece::Knight])) {
                return true;
            }
        }

        for &dir in &KING_QUEEN_DIRECTIONS {
            if target.offset(dir, 1).is_some_and(|sq| is(sq, &[Piece::King])) {
                return true;
            }
        }

        // pawns of `by` attack diagonally forward, so look backwards from target
        let pawn_sources: [i8; 2] = match by {
            Color::White => [-7, -9],
            Color::Black => [7, 9],
        };
        for dir in pawn_sources {
            if target.offset(dir, 1).is_some_and(|sq| is(sq, &[Piece::Pawn])) {
                return true;
            }
        }

        let rays = [
            (&ROOK_DIRECTIONS, [Piece::Rook, Piece::Queen]),
            (&BISHOP_DIRECTIONS, [Piece::Bishop, Piece::Queen]),
        ];
        for (directions, sliders) in rays {
            for &dir in directions {
                let mut current = target;
                while let Some(next) = current.offset(dir, 1) {
                    if let Some(piece) = occupant(next) {
                        if piece.color == by && sliders.contains(&piece.piece) {
                            return true;
                        }
                        break;
                    }
                    current = next;
                }
            }
        }

        false
    }
}
