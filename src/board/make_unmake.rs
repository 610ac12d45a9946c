use crate::zobrist::ZOBRIST;

use super::state::UnmakeInfo;
use super::{Board, Move, MoveContext, Piece, PlacedPiece, Square};

impl Board {
    /// Fingerprint of the current position, computed from scratch.
    pub(crate) fn calculate_hash(&self) -> u64 {
        let mut hash = 0;
        for sq in Square::all() {
            if let Some(placed) = self.squares[sq.index()] {
                hash ^= ZOBRIST.piece(placed, sq);
            }
        }
        hash ^= ZOBRIST.castling(self.castling_rights());
        hash ^= ZOBRIST.side(self.side_to_move);
        hash
    }

    /// Apply a move.
    ///
    /// `mv` must come from the legal move list of the side to move, and every
    /// call must be paired with `unmake_move` in LIFO order with the same
    /// context. Only `MoveContext::Game` records the position in the
    /// repetition history and refreshes the game status.
    pub fn make_move(&mut self, mv: Move, context: MoveContext) {
        let from = mv.from();
        let to = mv.to();
        let Some(moved) = self.squares[from.index()] else {
            debug_assert!(false, "make_move from empty square {from}");
            return;
        };
        let color = moved.color;

        let captured = self.squares[to.index()].take();
        self.squares[from.index()] = None;
        let landed = if mv.is_promotion() {
            PlacedPiece::new(Piece::Queen, color).moved()
        } else {
            moved.moved()
        };
        self.squares[to.index()] = Some(landed);
        self.movegen.recompute(&self.squares, from, to);

        let mut castled_rook = None;
        if let Some((rook_from, rook_to)) = mv.castle_rook_squares() {
            castled_rook = self.squares[rook_from.index()].take();
            self.squares[rook_to.index()] = castled_rook.map(PlacedPiece::moved);
            self.movegen.recompute(&self.squares, rook_from, rook_to);
        }

        if moved.piece == Piece::King {
            self.king_squares[color.index()] = to;
        }

        let previous_halfmove_clock = self.halfmove_clock;
        if captured.is_some() || moved.piece == Piece::Pawn {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock += 1;
        }
        self.ply_count += 1;
        self.side_to_move = color.opponent();

        let previous_hash = self.hash;
        self.hash = self.calculate_hash();
        let previous_checks = self.checks;
        self.refresh_checks();

        self.undo_stack.push(UnmakeInfo {
            moved,
            captured,
            castled_rook,
            previous_hash,
            previous_halfmove_clock,
            previous_checks,
            previous_status: self.status,
        });

        if context == MoveContext::Game {
            self.history.push(self.hash);
            self.status = self.compute_status();
        }
    }

    /// Take back the most recent `make_move`.
    pub fn unmake_move(&mut self, mv: Move, context: MoveContext) {
        let Some(undo) = self.undo_stack.pop() else {
            debug_assert!(false, "unmake_move without a matching make_move");
            return;
        };
        let from = mv.from();
        let to = mv.to();
        let color = undo.moved.color;

        if context == MoveContext::Game {
            self.history.pop();
        }

        self.squares[from.index()] = Some(undo.moved);
        self.squares[to.index()] = undo.captured;
        self.movegen.recompute(&self.squares, to, from);

        if let Some((rook_from, rook_to)) = mv.castle_rook_squares() {
            self.squares[rook_to.index()] = None;
            self.squares[rook_from.index()] = undo.castled_rook;
            self.movegen.recompute(&self.squares, rook_to, rook_from);
        }

        if undo.moved.piece == Piece::King {
            self.king_squares[color.index()] = from;
        }

        self.side_to_move = color;
        self.ply_count -= 1;
        self.halfmove_clock = undo.previous_halfmove_clock;
        self.hash = undo.previous_hash;
        self.checks = undo.previous_checks;
        self.status = undo.previous_status;
    }
}
