//! Search constants.

/// Score of a side that is checkmated at the root; mates found deeper are
/// reported as `MATE_SCORE - ply`.
pub const MATE_SCORE: i32 = 100_000;

/// Initial search window bound, beyond any reachable score.
pub const INFINITY: i32 = 9_999_999;

/// Scores within this many plies of `MATE_SCORE` encode a forced mate
const MATE_WINDOW: i32 = 1000;

/// Default iterative deepening limit
pub const DEFAULT_MAX_DEPTH: u32 = 30;

/// Returns true if `score` encodes a forced mate for either side.
#[inline]
#[must_use]
pub fn is_mate_score(score: i32) -> bool {
    score.abs() + MATE_WINDOW > MATE_SCORE
}
