//! Move ordering for search.

use super::super::{Board, Move, MoveList, Piece, ScoredMoveList};

/// Heuristic priority of a move: most valuable victim, least valuable
/// attacker for captures, plus a queen's worth for promotions. Quiet moves
/// score 0.
pub(crate) fn move_score(board: &Board, mv: Move) -> i32 {
    let mut score = 0;
    if let Some(victim) = board.piece_at(mv.to()) {
        let attacker = board.piece_at(mv.from()).map_or(0, |p| p.piece.value());
        score += 10 * victim.piece.value() - attacker;
    }
    if mv.is_promotion() {
        score += Piece::Queen.value();
    }
    score
}

/// Score and sort moves best first; ties keep generation order.
pub(crate) fn order_moves(board: &Board, moves: &MoveList) -> ScoredMoveList {
    let mut ordered = ScoredMoveList::new();
    for &mv in moves {
        ordered.push(mv, move_score(board, mv));
    }
    ordered.sort_by_score_desc();
    ordered
}
