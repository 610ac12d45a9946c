use super::alphabeta::SearchContext;
use super::move_order::order_moves;
use crate::board::MoveContext;

impl SearchContext<'_> {
    /// Capture-only search below the horizon. The static evaluation is a
    /// floor: the side to move may always decline to capture.
    pub(super) fn quiescence(&mut self, mut alpha: i32, beta: i32) -> i32 {
        if self.stop.is_stopped() {
            return 0;
        }
        self.nodes += 1;

        let stand_pat = self.board.evaluate();
        if stand_pat >= beta {
            return beta;
        }
        if stand_pat > alpha {
            alpha = stand_pat;
        }

        let captures = self.board.legal_captures();
        let ordered = order_moves(self.board, &captures);
        for scored in ordered.iter() {
            let mv = scored.mv;
            self.board.make_move(mv, MoveContext::Search);
            let score = -self.quiescence(-beta, -alpha);
            self.board.unmake_move(mv, MoveContext::Search);

            if self.stop.is_stopped() {
                return 0;
            }
            if score >= beta {
                return beta;
            }
            if score > alpha {
                alpha = score;
            }
        }

        alpha
    }
}
