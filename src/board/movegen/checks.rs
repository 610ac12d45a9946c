//! Check and pin detection from the cached move lists.

use super::super::state::CheckState;
use super::super::{Bitboard, Board, Color, Piece, Square};
use super::{is_pawn_push, piece_directions};

impl Board {
    /// Analyse every enemy line that reaches `color`'s king.
    ///
    /// A cached attacker move landing on the king square names a line. The
    /// squares strictly between attacker and king decide what it is: none
    /// occupied gives a check, exactly one occupied by a friendly piece pins
    /// that piece to the line, anything else is harmless.
    pub(crate) fn analyze_checks(&self, color: Color) -> CheckState {
        let king = self.king_squares[color.index()];
        let mut state = CheckState::CLEAR;

        for (from, attacker) in self.pieces_of(color.opponent()) {
            let hits_king = self
                .movegen
                .moves_from(from)
                .iter()
                .find(|mv| mv.to() == king);
            let Some(line) = hits_king else {
                continue;
            };
            let dir = line.direction();
            if attacker.piece == Piece::Pawn && is_pawn_push(dir) {
                continue;
            }

            let (_, limit) = piece_directions(attacker.piece, attacker.color);
            let mut between = Bitboard::EMPTY;
            let mut blocker: Option<Square> = None;
            let mut blocker_count = 0;
            let mut current = from;
            while let Some(next) = current.offset(dir, limit) {
                if next == king {
                    break;
                }
                between.insert(next);
                if self.squares[next.index()].is_some() {
                    blocker_count += 1;
                    blocker = Some(next);
                }
                current = next;
            }

            match (blocker_count, blocker) {
                (0, _) => {
                    state.checkers.insert(from);
                    state.blocks |= between;
                }
                (1, Some(pinned)) => {
                    let is_friendly = self.squares[pinned.index()]
                        .is_some_and(|p| p.color == color);
                    if is_friendly {
                        state.pins[pinned.index()] = dir;
                    }
                }
                _ => {}
            }
        }

        state
    }
}

#[cfg(test)]
mod tests {
    use crate::board::{Board, Color, Square};

    fn sq(s: &str) -> Square {
        s.parse().unwrap()
    }

    #[test]
    fn test_start_position_has_no_checks() {
        let board = Board::new();
        for color in Color::BOTH {
            let state = board.analyze_checks(color);
            assert!(!state.in_check());
            assert!(state.pins.iter().all(|&p| p == 0));
        }
    }

    #[test]
    fn test_slider_check_records_block_squares() {
        let board = Board::from_fen("4k3/8/8/8/8/8/8/r3K3 w - - 0");
        let state = board.analyze_checks(Color::White);
        assert!(state.in_check());
        assert!(state.checkers.contains(sq("a1")));
        for s in ["b1", "c1", "d1"] {
            assert!(state.blocks.contains(sq(s)), "{s} should block");
        }
        assert_eq!(state.blocks.popcount(), 3);
    }

    #[test]
    fn test_pin_is_recorded_with_direction() {
        let board = Board::from_fen("4k3/4r3/8/8/8/8/4N3/4K3 w - - 0");
        let state = board.analyze_checks(Color::White);
        assert!(!state.in_check());
        assert_eq!(state.pins[sq("e2").index()].abs(), 8);
    }

    #[test]
    fn test_two_blockers_neither_check_nor_pin() {
        let board = Board::from_fen("4k3/4r3/8/8/4P3/8/4N3/4K3 w - - 0");
        let state = board.analyze_checks(Color::White);
        assert!(!state.in_check());
        assert!(state.pins.iter().all(|&p| p == 0));
    }

    #[test]
    fn test_enemy_blocker_is_not_a_pin() {
        let board = Board::from_fen("4k3/4r3/8/8/8/8/4n3/4K3 w - - 0");
        let state = board.analyze_checks(Color::White);
        assert!(state.pins.iter().all(|&p| p == 0));
        // the knight itself gives no check from e2
        assert!(!state.in_check());
    }

    #[test]
    fn test_pawn_push_line_is_not_check() {
        let board = Board::from_fen("4k3/8/8/8/8/8/4p3/4K3 w - - 0");
        assert!(!board.analyze_checks(Color::White).in_check());
        let board = Board::from_fen("4k3/8/8/8/8/8/3p4/4K3 w - - 0");
        assert!(board.analyze_checks(Color::White).in_check());
    }

    #[test]
    fn test_double_check() {
        // rook on the file and knight on f3 both attack e1
        let board = Board::from_fen("4k3/4r3/8/8/8/5n2/8/4K3 w - - 0");
        let state = board.analyze_checks(Color::White);
        assert!(state.double_check());
        assert_eq!(state.checkers.popcount(), 2);
    }
}
