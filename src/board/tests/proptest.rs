//! Property-based tests using proptest.

use crate::board::{Board, Color, MoveContext, Piece};
use proptest::prelude::*;

fn move_count_strategy() -> impl Strategy<Value = usize> {
    1..=30usize
}

fn seed_strategy() -> impl Strategy<Value = u64> {
    any::<u64>()
}

/// Play up to `num_moves` random legal moves, returning them in order.
fn random_walk(board: &mut Board, seed: u64, num_moves: usize, context: MoveContext) -> Vec<crate::board::Move> {
    use rand::prelude::*;

    let mut rng = StdRng::seed_from_u64(seed);
    let mut played = Vec::new();
    for _ in 0..num_moves {
        let moves = board.legal_moves();
        if moves.is_empty() {
            break;
        }
        let mv = moves[rng.gen_range(0..moves.len())];
        board.make_move(mv, context);
        played.push(mv);
    }
    played
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// make_move followed by unmake_move restores the board exactly
    #[test]
    fn prop_make_unmake_restores_state(seed in seed_strategy(), num_moves in move_count_strategy()) {
        let mut board = Board::new();
        let initial = board.clone();
        let initial_fen = board.to_fen();

        let mut played = random_walk(&mut board, seed, num_moves, MoveContext::Game);
        while let Some(mv) = played.pop() {
            board.unmake_move(mv, MoveContext::Game);
        }

        prop_assert_eq!(board.to_fen(), initial_fen);
        prop_assert_eq!(board.hash(), initial.hash());
        prop_assert!(board == initial);
    }

    /// The stored fingerprint always equals a full recomputation
    #[test]
    fn prop_hash_consistency(seed in seed_strategy(), num_moves in move_count_strategy()) {
        use rand::{rngs::StdRng, Rng, SeedableRng};

        let mut board = Board::new();
        let mut rng = StdRng::seed_from_u64(seed);
        for _ in 0..num_moves {
            let moves = board.legal_moves();
            if moves.is_empty() {
                break;
            }
            let mv = moves[rng.gen_range(0..moves.len())];
            board.make_move(mv, MoveContext::Search);
            prop_assert_eq!(board.hash(), board.calculate_hash());
        }
    }

    /// Serializing and reloading keeps placement, side and castling rights
    #[test]
    fn prop_fen_roundtrip(seed in seed_strategy(), num_moves in move_count_strategy()) {
        let mut board = Board::new();
        random_walk(&mut board, seed, num_moves, MoveContext::Game);

        let fen = board.to_fen();
        let reloaded = Board::from_fen(&fen);
        prop_assert_eq!(reloaded.to_fen(), fen);
        prop_assert_eq!(reloaded.hash(), board.hash());
        prop_assert_eq!(reloaded.castling_rights(), board.castling_rights());
        prop_assert_eq!(reloaded.legal_moves().len(), board.legal_moves().len());
    }

    /// No generated move leaves the mover's own king attacked
    #[test]
    fn prop_legal_moves_are_legal(seed in seed_strategy(), num_moves in 0..30usize) {
        let mut board = Board::new();
        random_walk(&mut board, seed, num_moves, MoveContext::Search);

        let mover = board.side_to_move();
        for &mv in &board.legal_moves() {
            board.make_move(mv, MoveContext::Search);
            let king = board.king_square(mover);
            prop_assert!(
                !board.is_square_attacked(king, mover.opponent(), None),
                "{} leaves the king en prise", mv
            );
            board.unmake_move(mv, MoveContext::Search);
        }
    }

    /// Evaluation is antisymmetric in the side to move
    #[test]
    fn prop_eval_flips_with_side(seed in seed_strategy(), num_moves in 0..30usize) {
        let mut board = Board::new();
        random_walk(&mut board, seed, num_moves, MoveContext::Search);

        let score = board.evaluate();
        board.side_to_move = board.side_to_move.opponent();
        prop_assert_eq!(board.evaluate(), -score);
    }

    /// Exactly one king per side survives any walk
    #[test]
    fn prop_kings_survive(seed in seed_strategy(), num_moves in move_count_strategy()) {
        let mut board = Board::new();
        random_walk(&mut board, seed, num_moves, MoveContext::Search);

        for color in Color::BOTH {
            let kings = board
                .pieces_of(color)
                .filter(|(_, p)| p.piece == Piece::King)
                .count();
            prop_assert_eq!(kings, 1);
            let at = board.piece_at(board.king_square(color)).map(|p| p.piece);
            prop_assert_eq!(at, Some(Piece::King));
        }
    }
}
