//! Transposition table for caching search results.
//!
//! A fixed number of slots indexed by `fingerprint % capacity`. Every store
//! overwrites its slot, so unrelated positions that share an index evict
//! each other.

use crate::board::{is_mate_score, Move};

/// Default number of slots.
pub const DEFAULT_TT_CAPACITY: usize = 64_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BoundType {
    Exact,      // Score is the exact value
    LowerBound, // Score is at least this value (failed high - score >= beta)
    UpperBound, // Score is at most this value (failed low - score <= alpha)
}

/// One stored search result.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TTEntry {
    pub key: u64,
    pub depth: u32,
    pub bound_type: BoundType,
    /// Score with mate distances measured from this node, not the root
    pub score: i32,
    pub best_move: Option<Move>,
}

pub struct TranspositionTable {
    slots: Vec<Option<TTEntry>>,
}

/// Mate scores count plies from the root; stored entries count from the
/// node so they stay valid when the position recurs at another ply.
fn score_to_tt(score: i32, ply: u32) -> i32 {
    if !is_mate_score(score) {
        score
    } else if score > 0 {
        score + ply as i32
    } else {
        score - ply as i32
    }
}

fn score_from_tt(score: i32, ply: u32) -> i32 {
    if !is_mate_score(score) {
        score
    } else if score > 0 {
        score - ply as i32
    } else {
        score + ply as i32
    }
}

impl TranspositionTable {
    /// Create a table with `capacity` slots (at least one).
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        TranspositionTable {
            slots: vec![None; capacity.max(1)],
        }
    }

    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    fn index(&self, key: u64) -> usize {
        (key % self.slots.len() as u64) as usize
    }

    /// Entry stored for exactly this fingerprint, if any.
    #[must_use]
    pub fn probe(&self, key: u64) -> Option<&TTEntry> {
        self.slots[self.index(key)]
            .as_ref()
            .filter(|entry| entry.key == key)
    }

    /// Score usable at a node searched to `depth` with window
    /// `(alpha, beta)`, or `None` when the entry is missing, too shallow or
    /// its bound says nothing about this window.
    #[must_use]
    pub fn lookup(&self, key: u64, depth: u32, alpha: i32, beta: i32, ply: u32) -> Option<i32> {
        let entry = self.probe(key)?;
        if entry.depth < depth {
            return None;
        }
        let score = score_from_tt(entry.score, ply);
        let usable = match entry.bound_type {
            BoundType::Exact => true,
            BoundType::LowerBound => score >= beta,
            BoundType::UpperBound => score <= alpha,
        };
        usable.then_some(score)
    }

    /// Best move recorded for this fingerprint.
    #[must_use]
    pub fn best_move(&self, key: u64) -> Option<Move> {
        self.probe(key).and_then(|entry| entry.best_move)
    }

    /// Write an entry, replacing whatever occupied the slot.
    pub fn store(
        &mut self,
        key: u64,
        depth: u32,
        bound_type: BoundType,
        score: i32,
        best_move: Option<Move>,
        ply: u32,
    ) {
        let idx = self.index(key);
        self.slots[idx] = Some(TTEntry {
            key,
            depth,
            bound_type,
            score: score_to_tt(score, ply),
            best_move,
        });
    }

    /// Number of occupied slots.
    #[cfg(test)]
    fn filled(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn clear(&mut self) {
        self.slots.iter_mut().for_each(|slot| *slot = None);
    }
}

impl Default for TranspositionTable {
    fn default() -> Self {
        TranspositionTable::new(DEFAULT_TT_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Board, MATE_SCORE};

    #[test]
    fn test_store_and_probe() {
        let mut tt = TranspositionTable::new(1024);
        let board = Board::new();
        let mv = board.legal_moves().first();
        tt.store(board.hash(), 4, BoundType::Exact, 37, mv, 0);

        let entry = tt.probe(board.hash()).unwrap();
        assert_eq!(entry.depth, 4);
        assert_eq!(entry.score, 37);
        assert_eq!(tt.best_move(board.hash()), mv);
    }

    #[test]
    fn test_no_false_positives() {
        let mut tt = TranspositionTable::new(16);
        tt.store(5, 3, BoundType::Exact, 10, None, 0);
        // same slot, different key
        assert!(tt.probe(21).is_none());
        assert!(tt.lookup(21, 1, -100, 100, 0).is_none());
    }

    #[test]
    fn test_collision_overwrites() {
        let mut tt = TranspositionTable::new(16);
        tt.store(5, 9, BoundType::Exact, 10, None, 0);
        tt.store(21, 1, BoundType::Exact, 20, None, 0);
        assert!(tt.probe(5).is_none());
        assert_eq!(tt.probe(21).map(|e| e.score), Some(20));
    }

    #[test]
    fn test_lookup_respects_depth() {
        let mut tt = TranspositionTable::new(64);
        tt.store(7, 3, BoundType::Exact, 50, None, 0);
        assert_eq!(tt.lookup(7, 3, -100, 100, 0), Some(50));
        assert_eq!(tt.lookup(7, 2, -100, 100, 0), Some(50));
        assert_eq!(tt.lookup(7, 4, -100, 100, 0), None);
    }

    #[test]
    fn test_lookup_respects_bounds() {
        let mut tt = TranspositionTable::new(64);
        tt.store(1, 2, BoundType::LowerBound, 80, None, 0);
        assert_eq!(tt.lookup(1, 2, 0, 70, 0), Some(80));
        assert_eq!(tt.lookup(1, 2, 0, 90, 0), None);

        tt.store(2, 2, BoundType::UpperBound, -30, None, 0);
        assert_eq!(tt.lookup(2, 2, -20, 50, 0), Some(-30));
        assert_eq!(tt.lookup(2, 2, -40, 50, 0), None);
    }

    #[test]
    fn test_mate_scores_are_ply_adjusted() {
        let mut tt = TranspositionTable::new(64);
        // mate found 5 plies from the root, stored at ply 2
        tt.store(3, 4, BoundType::Exact, MATE_SCORE - 5, None, 2);
        // reached again at ply 4 the mate is 2 plies further from the root
        assert_eq!(tt.lookup(3, 1, -MATE_SCORE, MATE_SCORE, 4), Some(MATE_SCORE - 7));
        tt.store(4, 4, BoundType::Exact, -(MATE_SCORE - 5), None, 2);
        assert_eq!(tt.lookup(4, 1, -MATE_SCORE, MATE_SCORE, 2), Some(-(MATE_SCORE - 5)));
    }

    #[test]
    fn test_clear() {
        let mut tt = TranspositionTable::new(64);
        tt.store(1, 1, BoundType::Exact, 0, None, 0);
        tt.store(2, 1, BoundType::Exact, 0, None, 0);
        assert_eq!(tt.filled(), 2);
        tt.clear();
        assert_eq!(tt.filled(), 0);
        assert!(tt.probe(1).is_none());
    }
}
