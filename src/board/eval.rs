//! Static evaluation: material, piece-square tables and a mop-up term that
//! drives a lone king to the edge in won endgames.

use super::pst;
use super::{Board, Color, Piece, PlacedPiece, Square};

/// Non-pawn material at which the endgame weight starts to rise
/// (two rooks, a bishop and a knight).
const ENDGAME_MATERIAL_START: i32 =
    2 * Piece::Rook.value() + Piece::Bishop.value() + Piece::Knight.value();

// Kings are never more than 14 files plus ranks apart
const MAX_KING_DISTANCE: i32 = 14;

struct SideTally {
    material: i32,
    pawn_material: i32,
    positional: i32,
    king_table: i32,
    king: Square,
}

/// Weight in [0, 1] that grows as `material_without_pawns` shrinks.
pub(crate) fn endgame_weight(material_without_pawns: i32) -> f32 {
    let ratio = material_without_pawns as f32 / ENDGAME_MATERIAL_START as f32;
    1.0 - ratio.min(1.0)
}

#[inline]
fn table_index(sq: Square, color: Color) -> usize {
    match color {
        Color::White => sq.flip_vertical().index(),
        Color::Black => sq.index(),
    }
}

fn square_bonus(placed: PlacedPiece, sq: Square) -> i32 {
    let idx = table_index(sq, placed.color);
    match placed.piece {
        Piece::Pawn => pst::PAWNS[idx],
        Piece::Knight => pst::KNIGHTS[idx],
        Piece::Bishop => pst::BISHOPS[idx],
        Piece::Rook => pst::ROOKS[idx],
        Piece::Queen => pst::QUEENS[idx],
        Piece::King => pst::KING_MIDDLEGAME[idx],
    }
}

/// Bonus for pushing the enemy king away from the center and walking our
/// own king towards it, once we are more than two pawns up.
fn king_endgame_bonus(
    own_king: Square,
    own_material: i32,
    enemy_king: Square,
    enemy_material: i32,
    enemy_endgame_weight: f32,
) -> i32 {
    if own_material <= enemy_material + 2 * Piece::Pawn.value() || enemy_endgame_weight <= 0.0 {
        return 0;
    }
    let edge_push = enemy_king.center_manhattan_distance() as i32 * 10;
    let approach = (MAX_KING_DISTANCE - own_king.manhattan_distance(enemy_king) as i32) * 4;
    ((edge_push + approach) as f32 * enemy_endgame_weight) as i32
}

impl Board {
    fn tally(&self, color: Color) -> SideTally {
        let mut tally = SideTally {
            material: 0,
            pawn_material: 0,
            positional: 0,
            king_table: 0,
            king: self.king_squares[color.index()],
        };
        for (sq, placed) in self.pieces_of(color) {
            let bonus = square_bonus(placed, sq);
            match placed.piece {
                Piece::King => tally.king_table += bonus,
                Piece::Pawn => {
                    tally.pawn_material += Piece::Pawn.value();
                    tally.positional += bonus;
                }
                _ => tally.positional += bonus,
            }
            tally.material += placed.piece.value();
        }
        tally
    }

    /// Static score in centipawns from the side to move's point of view.
    #[must_use]
    pub fn evaluate(&self) -> i32 {
        let white = self.tally(Color::White);
        let black = self.tally(Color::Black);

        let white_weight = endgame_weight(white.material - white.pawn_material);
        let black_weight = endgame_weight(black.material - black.pawn_material);

        let side_score = |own: &SideTally, enemy: &SideTally, enemy_weight: f32| {
            let mut score = own.material + own.positional;
            score += king_endgame_bonus(own.king, own.material, enemy.king, enemy.material, enemy_weight);
            // the king's middlegame table fades out as the enemy's army shrinks
            score += (own.king_table as f32 * (1.0 - enemy_weight)) as i32;
            score
        };

        let white_eval = side_score(&white, &black, black_weight);
        let black_eval = side_score(&black, &white, white_weight);
        (white_eval - black_eval) * self.side_to_move.sign()
    }
}
