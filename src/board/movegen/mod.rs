//! Move generation.
//!
//! Every occupied square owns a cached list of pseudo-legal moves computed
//! from the piece alone, ignoring every other piece on the board. Sliding
//! moves run to the board edge and are emitted nearest-first per direction,
//! and an unmoved pawn always lists its double step.
//!
//! Blocking is applied by the legal filter instead: it cuts each ray at the
//! first occupied square and drops pawn pushes onto or through a piece. Since
//! no cached list depends on the contents of other squares, a move only
//! invalidates the lists of the squares it vacated and occupied.

mod checks;
mod legal;

use super::{Color, Move, Piece, PlacedPiece, Square};

pub(crate) const KING_QUEEN_DIRECTIONS: [i8; 8] = [7, 8, 9, -1, 1, -9, -8, -7];
pub(crate) const BISHOP_DIRECTIONS: [i8; 4] = [7, 9, -7, -9];
pub(crate) const ROOK_DIRECTIONS: [i8; 4] = [8, 1, -8, -1];
pub(crate) const KNIGHT_DIRECTIONS: [i8; 8] = [15, 17, 6, 10, -15, -17, -6, -10];
const WHITE_PAWN_DIRECTIONS: [i8; 3] = [8, 7, 9];
const BLACK_PAWN_DIRECTIONS: [i8; 3] = [-8, -7, -9];

// Longest pseudo-legal list: a queen in the center
const MAX_SQUARE_MOVES: usize = 28;

/// Step directions and the largest rank/file change one step may cause.
pub(crate) fn piece_directions(piece: Piece, color: Color) -> (&'static [i8], usize) {
    match piece {
        Piece::King | Piece::Queen => (&KING_QUEEN_DIRECTIONS, 1),
        Piece::Bishop => (&BISHOP_DIRECTIONS, 1),
        Piece::Rook => (&ROOK_DIRECTIONS, 1),
        Piece::Knight => (&KNIGHT_DIRECTIONS, 2),
        Piece::Pawn => match color {
            Color::White => (&WHITE_PAWN_DIRECTIONS, 1),
            Color::Black => (&BLACK_PAWN_DIRECTIONS, 1),
        },
    }
}

/// True for a pawn step straight ahead; those never capture.
#[inline]
pub(crate) fn is_pawn_push(direction: i8) -> bool {
    direction == 8 || direction == -8
}

/// Per-square cache of pseudo-legal moves.
#[derive(Clone, Debug)]
pub(crate) struct MoveGenerator {
    moves: [Vec<Move>; 64],
}

impl MoveGenerator {
    pub(crate) fn new() -> Self {
        MoveGenerator {
            moves: std::array::from_fn(|_| Vec::with_capacity(MAX_SQUARE_MOVES)),
        }
    }

    /// Rebuild every square's list.
    pub(crate) fn precompute(&mut self, squares: &[Option<PlacedPiece>; 64]) {
        for sq in Square::all() {
            self.refresh(squares, sq);
        }
    }

    /// Regenerate the lists of the two squares a move touched; every other
    /// list is independent of them.
    pub(crate) fn recompute(
        &mut self,
        squares: &[Option<PlacedPiece>; 64],
        vacated: Square,
        occupied: Square,
    ) {
        self.refresh(squares, vacated);
        self.refresh(squares, occupied);
    }

    #[inline]
    pub(crate) fn moves_from(&self, sq: Square) -> &[Move] {
        &self.moves[sq.index()]
    }

    fn refresh(&mut self, squares: &[Option<PlacedPiece>; 64], sq: Square) {
        let list = &mut self.moves[sq.index()];
        list.clear();
        if let Some(placed) = squares[sq.index()] {
            generate_pseudo_moves(sq, placed, list);
        }
    }
}

fn generate_pseudo_moves(from: Square, placed: PlacedPiece, out: &mut Vec<Move>) {
    let (directions, limit) = piece_directions(placed.piece, placed.color);
    match placed.piece {
        Piece::Pawn => generate_pawn_moves(from, placed, directions, out),
        piece if piece.is_slider() => {
            for &dir in directions {
                let mut current = from;
                while let Some(to) = current.offset(dir, limit) {
                    out.push(Move::new(from, to, dir));
                    current = to;
                }
            }
        }
        _ => {
            for &dir in directions {
                if let Some(to) = from.offset(dir, limit) {
                    out.push(Move::new(from, to, dir));
                }
            }
        }
    }
}

fn generate_pawn_moves(from: Square, placed: PlacedPiece, directions: &[i8], out: &mut Vec<Move>) {
    let promotion_rank = placed.color.pawn_promotion_rank();
    let make = |to: Square, dir: i8| {
        if to.rank() == promotion_rank {
            Move::promotion(from, to, dir)
        } else {
            Move::new(from, to, dir)
        }
    };

    for &dir in directions {
        let Some(to) = from.offset(dir, 1) else {
            continue;
        };
        out.push(make(to, dir));
        if is_pawn_push(dir) && !placed.has_moved {
            if let Some(double) = to.offset(dir, 1) {
                out.push(make(double, dir));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        s.parse().unwrap()
    }

    fn pseudo(placed: PlacedPiece, at: &str) -> Vec<Move> {
        let mut out = Vec::new();
        generate_pseudo_moves(sq(at), placed, &mut out);
        out
    }

    #[test]
    fn test_queen_in_corner_sees_full_rays() {
        let moves = pseudo(PlacedPiece::new(Piece::Queen, Color::White), "a1");
        assert_eq!(moves.len(), 21);
    }

    #[test]
    fn test_central_queen_hits_capacity() {
        let moves = pseudo(PlacedPiece::new(Piece::Queen, Color::Black), "d4");
        assert_eq!(moves.len(), 27);
    }

    #[test]
    fn test_knight_on_edge_does_not_wrap() {
        let moves = pseudo(PlacedPiece::new(Piece::Knight, Color::White), "h1");
        let targets: Vec<String> = moves.iter().map(|m| m.to().to_string()).collect();
        assert_eq!(targets.len(), 2);
        assert!(targets.contains(&"g3".to_string()));
        assert!(targets.contains(&"f2".to_string()));
    }

    #[test]
    fn test_rays_are_nearest_first() {
        let moves = pseudo(PlacedPiece::new(Piece::Rook, Color::White), "a1");
        let north: Vec<Move> = moves.into_iter().filter(|m| m.direction() == 8).collect();
        assert_eq!(north.first().map(|m| m.to()), Some(sq("a2")));
        assert_eq!(north.last().map(|m| m.to()), Some(sq("a8")));
    }

    #[test]
    fn test_pawn_moves() {
        let fresh = pseudo(PlacedPiece::new(Piece::Pawn, Color::White), "e2");
        assert_eq!(fresh.len(), 4);
        let moved = pseudo(PlacedPiece::new(Piece::Pawn, Color::White).moved(), "e3");
        assert_eq!(moved.len(), 3);
        let edge = pseudo(PlacedPiece::new(Piece::Pawn, Color::Black).moved(), "a5");
        assert_eq!(edge.len(), 2);
        let promoting = pseudo(PlacedPiece::new(Piece::Pawn, Color::White).moved(), "b7");
        assert!(promoting.iter().all(|m| m.is_promotion()));
    }

    #[test]
    fn test_cache_ignores_blockers_until_legal_filter() {
        let board = crate::board::Board::from_fen("4k3/8/8/8/8/p7/P7/R3K3 w - - 0");
        let cached_rook: Vec<Square> = board.movegen.moves_from(sq("a1")).iter().map(|m| m.to()).collect();
        assert!(cached_rook.contains(&sq("a8")));
        let cached_pawn: Vec<Square> = board.movegen.moves_from(sq("a2")).iter().map(|m| m.to()).collect();
        assert!(cached_pawn.contains(&sq("a3")));
        assert!(cached_pawn.contains(&sq("a4")));

        let legal = board.legal_moves();
        let from_a1: Vec<String> = legal
            .iter()
            .filter(|m| m.from() == sq("a1"))
            .map(|m| m.to().to_string())
            .collect();
        assert_eq!(from_a1, ["b1", "c1", "d1"]);
        assert!(legal.iter().all(|m| m.from() != sq("a2")));
    }
}
