use super::{Board, MoveContext};

impl Board {
    /// Count the leaf nodes of the legal move tree to `depth` plies.
    ///
    /// Moves are played in search context so the game history is left alone.
    pub fn perft(&mut self, depth: u32) -> u64 {
        if depth == 0 {
            return 1;
        }

        let moves = self.legal_moves();
        if depth == 1 {
            return moves.len() as u64;
        }

        let mut nodes = 0;
        for mv in moves {
            self.make_move(mv, MoveContext::Search);
            nodes += self.perft(depth - 1);
            self.unmake_move(mv, MoveContext::Search);
        }

        nodes
    }

    /// Perft split by root move, in coordinate notation.
    pub fn perft_divide(&mut self, depth: u32) -> Vec<(String, u64)> {
        let mut split = Vec::new();
        for mv in self.legal_moves() {
            self.make_move(mv, MoveContext::Search);
            split.push((mv.to_string(), self.perft(depth.saturating_sub(1))));
            self.unmake_move(mv, MoveContext::Search);
        }
        split
    }
}
