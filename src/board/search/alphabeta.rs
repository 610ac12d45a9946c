use super::constants::MATE_SCORE;
use super::move_order::order_moves;
use crate::board::{Board, Move, MoveContext};
use crate::sync::StopFlag;
use crate::tt::{BoundType, TranspositionTable};

/// State for one iteration of the search.
pub(super) struct SearchContext<'a> {
    pub(super) board: &'a mut Board,
    tt: &'a mut TranspositionTable,
    pub(super) stop: &'a StopFlag,
    use_tt: bool,
    /// Fingerprints of the positions between the root and the current node
    path: Vec<u64>,
    root_move: Option<Move>,
    pub(super) nodes: u64,
    transpositions: u64,
}

impl<'a> SearchContext<'a> {
    pub(super) fn new(
        board: &'a mut Board,
        tt: &'a mut TranspositionTable,
        stop: &'a StopFlag,
        use_tt: bool,
    ) -> Self {
        SearchContext {
            board,
            tt,
            stop,
            use_tt,
            path: Vec::with_capacity(64),
            root_move: None,
            nodes: 0,
            transpositions: 0,
        }
    }

    /// Root move, node count and table hits of this iteration
    pub(super) fn finish(self) -> (Option<Move>, u64, u64) {
        (self.root_move, self.nodes, self.transpositions)
    }

    fn is_repetition(&self, key: u64) -> bool {
        self.path.contains(&key) || self.board.history.contains(&key)
    }

    /// Negamax alpha-beta, fail-hard. Scores are from the side to move's
    /// point of view.
    pub(super) fn search(&mut self, depth: u32, mut alpha: i32, mut beta: i32, ply: u32) -> i32 {
        if self.stop.is_stopped() {
            return 0;
        }
        self.nodes += 1;
        let key = self.board.hash();

        if ply > 0 {
            if self.is_repetition(key) {
                return 0;
            }
            // a mate already found nearer the root beats anything down here
            alpha = alpha.max(-MATE_SCORE + ply as i32);
            beta = beta.min(MATE_SCORE - ply as i32);
            if alpha >= beta {
                return alpha;
            }
        }

        if self.use_tt {
            if let Some(score) = self.tt.lookup(key, depth, alpha, beta, ply) {
                self.transpositions += 1;
                if ply == 0 {
                    self.root_move = self.tt.best_move(key);
                }
                return score;
            }
        }

        if depth == 0 {
            return self.quiescence(alpha, beta);
        }

        let moves = self.board.legal_moves();
        if moves.is_empty() {
            if self.board.is_in_check(self.board.side_to_move()) {
                return -(MATE_SCORE - ply as i32);
            }
            return 0;
        }

        let ordered = order_moves(self.board, &moves);
        let mut bound = BoundType::UpperBound;
        let mut best_move = None;

        for scored in ordered.iter() {
            let mv = scored.mv;
            self.board.make_move(mv, MoveContext::Search);
            self.path.push(key);
            let score = -self.search(depth - 1, -beta, -alpha, ply + 1);
            self.path.pop();
            self.board.unmake_move(mv, MoveContext::Search);

            if self.stop.is_stopped() {
                return 0;
            }

            if score >= beta {
                self.store(key, depth, BoundType::LowerBound, beta, Some(mv), ply);
                return beta;
            }
            if score > alpha {
                alpha = score;
                bound = BoundType::Exact;
                best_move = Some(mv);
                if ply == 0 {
                    self.root_move = Some(mv);
                }
            }
        }

        self.store(key, depth, bound, alpha, best_move, ply);
        alpha
    }

    fn store(&mut self, key: u64, depth: u32, bound: BoundType, score: i32, mv: Option<Move>, ply: u32) {
        if self.use_tt {
            self.tt.store(key, depth, bound, score, mv, ply);
        }
    }
}
