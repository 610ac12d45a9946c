//! Search tests to verify the engine finds correct moves in various positions.

use std::time::Duration;

use mailbox_chess::board::{Board, GameStatus, MoveContext, SearchConfig, Searcher};
use mailbox_chess::{Book, Engine, EngineConfig};

fn engine(depth: u32) -> Engine {
    Engine::new(
        EngineConfig::default()
            .with_max_depth(depth)
            .with_move_time(Duration::from_secs(60)),
    )
}

/// Test that the engine finds a simple mate in 1
#[test]
fn finds_mate_in_one_back_rank() {
    let mut board = Board::from_fen("6k1/5ppp/8/8/8/8/8/4Q2K w - - 0 1");
    let best = engine(4).choose_move(&mut board).expect("should find a move");
    assert_eq!(best.to_string(), "e1e8", "Should find Qe8# (back rank mate)");
}

/// Test that the engine finds the scholar's mate
#[test]
fn finds_mate_in_one_queen() {
    let mut board =
        Board::from_fen("r1bqkb1r/pppp1ppp/2n2n2/4p2Q/2B1P3/8/PPPP1PPP/RNB1K1NR w KQkq - 0 4");
    let best = engine(4).choose_move(&mut board).expect("should find a move");
    assert_eq!(best.to_string(), "h5f7", "Should find Qxf7#");
    assert_eq!(board.move_to_san(best), "Qxf7#");
}

/// Test that the engine avoids giving away material
#[test]
fn avoids_hanging_queen() {
    let mut board =
        Board::from_fen("r1bqkbnr/pppppppp/2n5/8/4P3/5Q2/PPPP1PPP/RNB1KBNR w KQkq - 0 3");
    let best = engine(3).choose_move(&mut board).expect("should find a move");
    assert_ne!(best.to_string(), "f3c6", "Should not hang the queen on c6");
}

/// Test that the engine takes a free piece
#[test]
fn captures_free_rook() {
    let mut board = Board::from_fen("4k3/8/8/8/8/2r5/8/2R1K3 w - - 0");
    let best = engine(3).choose_move(&mut board).expect("should find a move");
    assert_eq!(best.to_string(), "c1c3");
}

/// Test iterative deepening produces legal moves at every depth
#[test]
fn iterative_deepening_consistency() {
    let mut board = Board::new();
    let mut searcher = Searcher::new(SearchConfig::default());

    let best2 = searcher.start_search(&mut board, 2).expect("depth 2 move");
    assert_eq!(searcher.report().depth, 2);
    let best4 = searcher.start_search(&mut board, 4).expect("depth 4 move");
    assert_eq!(searcher.report().depth, 4);

    let moves = board.legal_moves();
    assert!(moves.contains(best2));
    assert!(moves.contains(best4));
}

/// Test that search returns None for a checkmated side
#[test]
fn no_move_in_checkmate() {
    let mut board =
        Board::from_fen("rnb1kbnr/pppp1ppp/4p3/8/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 0 1");
    assert!(board.is_checkmate(), "Position should be checkmate");
    assert!(engine(4).choose_move(&mut board).is_none());
}

/// Test draw by repetition through the public move API
#[test]
fn handles_draw_by_repetition() {
    let mut board = Board::new();
    for _ in 0..2 {
        for san in ["Nf3", "Nf6", "Ng1", "Ng8"] {
            board.make_move_san(san).unwrap();
        }
    }
    assert_eq!(board.status(), GameStatus::ThreefoldRepetition);
}

/// Test evaluation of the start position
#[test]
fn evaluation_symmetry() {
    assert_eq!(Board::new().evaluate(), 0);
}

/// Test that positions with material advantage evaluate correctly
#[test]
fn evaluation_material_advantage() {
    let white_up = Board::from_fen("rnb1kbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1");
    let black_up = Board::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNB1KBNR w KQkq - 0 1");
    assert!(white_up.evaluate() > 800, "eval: {}", white_up.evaluate());
    assert!(black_up.evaluate() < -800, "eval: {}", black_up.evaluate());
}

/// Test that a timed search answers within a reasonable time
#[test]
fn timed_search_returns_promptly() {
    use std::time::Instant;

    let mut board = Board::new();
    let mut engine = Engine::new(
        EngineConfig::default().with_move_time(Duration::from_millis(200)),
    );

    let start = Instant::now();
    let best = engine.choose_move(&mut board).expect("should find a move");
    assert!(start.elapsed() < Duration::from_secs(10), "took {:?}", start.elapsed());
    assert!(board.legal_moves().contains(best));
    assert!(engine.last_report().aborted);
}

/// Test that stalemate is correctly identified
#[test]
fn identifies_stalemate() {
    let board = Board::from_fen("k7/8/1QK5/8/8/8/8/8 b - - 0 1");
    assert!(board.is_stalemate(), "Position should be stalemate");
    assert!(!board.is_checkmate(), "Position should not be checkmate");
}

/// Test a short game played by the engine against itself
#[test]
fn self_play_stays_consistent() {
    let book = Book::from_lines(&[&["e4", "e5"]]).unwrap();
    let mut engine = engine(2).with_book(book);
    let mut board = Board::new();

    for _ in 0..12 {
        if board.status().is_over() {
            break;
        }
        let mv = engine.choose_move(&mut board).expect("game not over");
        assert!(board.legal_moves().contains(mv));
        board.make_move(mv, MoveContext::Game);
    }

    let reloaded = Board::from_fen(&board.to_fen());
    assert_eq!(reloaded.hash(), board.hash());
}
