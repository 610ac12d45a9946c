//! Make/unmake move tests.

use crate::board::{Board, MoveContext, Piece, Square};
use rand::prelude::*;

fn sq(name: &str) -> Square {
    name.parse().unwrap()
}

/// Every cached move list matches one generated from scratch.
fn assert_cache_matches_fresh(board: &Board) {
    let fresh = Board::from_fen(&board.to_fen());
    for square in Square::all() {
        assert_eq!(
            board.movegen.moves_from(square),
            fresh.movegen.moves_from(square),
            "cache mismatch on {square}"
        );
    }
}

#[test]
fn test_random_walks_restore_board() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    for _ in 0..20 {
        let mut board = Board::new();
        let original = board.clone();
        let mut played = Vec::new();

        for _ in 0..40 {
            let moves = board.legal_moves();
            if moves.is_empty() {
                break;
            }
            let mv = moves[rng.gen_range(0..moves.len())];
            board.make_move(mv, MoveContext::Search);
            played.push(mv);
        }

        while let Some(mv) = played.pop() {
            board.unmake_move(mv, MoveContext::Search);
        }
        assert_eq!(board, original);
        assert!(board.undo_stack.is_empty());
    }
}

#[test]
fn test_cache_tracks_moves() {
    let mut rng = StdRng::seed_from_u64(42);
    let mut board = Board::new();
    for _ in 0..60 {
        let moves = board.legal_moves();
        if moves.is_empty() {
            break;
        }
        let mv = moves[rng.gen_range(0..moves.len())];
        board.make_move(mv, MoveContext::Game);
        assert_cache_matches_fresh(&board);
    }
}

#[test]
fn test_moved_flags_are_restored() {
    let mut board = Board::new();
    let mv = board.parse_move("e2e4").unwrap();
    board.make_move(mv, MoveContext::Game);
    assert!(board.piece_at(sq("e4")).unwrap().has_moved);
    board.unmake_move(mv, MoveContext::Game);

    let pawn = board.piece_at(sq("e2")).unwrap();
    assert!(!pawn.has_moved);
    // The double step is available again.
    assert!(board.parse_move("e2e4").is_ok());
}

#[test]
fn test_rook_move_revokes_castling() {
    let mut board = Board::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0");
    board.make_move_coord("h1h2").unwrap();
    board.make_move_coord("a8a7").unwrap();
    board.make_move_coord("h2h1").unwrap();
    board.make_move_coord("a7a8").unwrap();
    assert_eq!(board.castling_rights().to_fen_field(), "Qk");
    assert!(board.parse_move("e1g1").is_err());
    assert!(board.parse_move("e1c1").is_ok());
}

#[test]
fn test_captured_rook_revokes_castling() {
    let mut board = Board::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0");
    let mv = board.parse_move("a1a8").unwrap();
    board.make_move(mv, MoveContext::Game);
    assert_eq!(board.castling_rights().to_fen_field(), "Kk");
    board.unmake_move(mv, MoveContext::Game);
    assert_eq!(board.castling_rights().to_fen_field(), "KQkq");
}

#[test]
fn test_black_promotion() {
    let mut board = Board::from_fen("4k3/8/8/8/8/8/p7/4K3 b - - 0");
    let mv = board.parse_move("a2a1").unwrap();
    assert!(mv.is_promotion());
    board.make_move(mv, MoveContext::Game);
    let placed = board.piece_at(sq("a1")).unwrap();
    assert_eq!(placed.piece, Piece::Queen);
    assert!(board.is_in_check(crate::board::Color::White));
}

#[test]
fn test_king_squares_follow_king() {
    let mut board = Board::new();
    for coord in ["e2e4", "e7e5", "e1e2", "e8e7"] {
        board.make_move_coord(coord).unwrap();
    }
    assert_eq!(board.king_square(crate::board::Color::White), sq("e2"));
    assert_eq!(board.king_square(crate::board::Color::Black), sq("e7"));
    assert!(board.castling_rights().is_empty());
}
