//! Zobrist hashing for chess positions.
//!
//! One pseudo-random key per (piece, color, square), one per castling right
//! and one for black to move. The keys come from a fixed seed so fingerprints
//! are reproducible across runs.

use once_cell::sync::Lazy;
use rand::prelude::*;

use crate::board::{CastlingRights, Color, PlacedPiece, Square};

const ZOBRIST_SEED: u64 = 1234567890;

pub(crate) struct ZobristKeys {
    // piece_keys[piece][color][square]
    piece_keys: [[[u64; 64]; 2]; 6],
    // K, Q, k, q
    castling_keys: [u64; 4],
    black_to_move_key: u64,
}

impl ZobristKeys {
    fn new() -> Self {
        let mut rng = StdRng::seed_from_u64(ZOBRIST_SEED);
        let mut piece_keys = [[[0; 64]; 2]; 6];
        let mut castling_keys = [0; 4];

        for piece in &mut piece_keys {
            for color in piece.iter_mut() {
                for key in color.iter_mut() {
                    *key = rng.gen();
                }
            }
        }

        for key in &mut castling_keys {
            *key = rng.gen();
        }

        ZobristKeys {
            piece_keys,
            castling_keys,
            black_to_move_key: rng.gen(),
        }
    }

    #[inline]
    pub(crate) fn piece(&self, placed: PlacedPiece, sq: Square) -> u64 {
        self.piece_keys[placed.piece.index()][placed.color.index()][sq.index()]
    }

    #[inline]
    pub(crate) fn castling(&self, rights: CastlingRights) -> u64 {
        rights
            .indices()
            .fold(0, |acc, i| acc ^ self.castling_keys[i])
    }

    #[inline]
    pub(crate) fn side(&self, side_to_move: Color) -> u64 {
        match side_to_move {
            Color::White => 0,
            Color::Black => self.black_to_move_key,
        }
    }
}

// Built once on first use, read-only afterwards
pub(crate) static ZOBRIST: Lazy<ZobristKeys> = Lazy::new(ZobristKeys::new);
