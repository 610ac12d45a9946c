//! Move selection for a game in progress.
//!
//! The engine asks its opening book first and otherwise runs a timed,
//! iteratively deepened search.

use std::time::Duration;

use log::{debug, trace};

use crate::board::{order_moves, Board, Move, SearchConfig, SearchReport, Searcher, DEFAULT_MAX_DEPTH};
use crate::book::OpeningBook;
use crate::sync::StopFlag;
use crate::timer::DeadlineTimer;

/// Default thinking time per move.
pub const DEFAULT_MOVE_TIME: Duration = Duration::from_millis(1500);

/// Engine limits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EngineConfig {
    pub max_depth: u32,
    /// Wall-clock budget per move; zero disables the timer
    pub move_time: Duration,
    pub search: SearchConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            max_depth: DEFAULT_MAX_DEPTH,
            move_time: DEFAULT_MOVE_TIME,
            search: SearchConfig::default(),
        }
    }
}

impl EngineConfig {
    #[must_use]
    pub fn with_max_depth(mut self, depth: u32) -> Self {
        self.max_depth = depth.max(1);
        self
    }

    #[must_use]
    pub fn with_move_time(mut self, move_time: Duration) -> Self {
        self.move_time = move_time;
        self
    }

    #[must_use]
    pub fn with_tt_capacity(mut self, slots: usize) -> Self {
        self.search.tt_capacity = slots.max(1);
        self
    }

    #[must_use]
    pub fn with_transposition_table(mut self, enabled: bool) -> Self {
        self.search.use_transposition_table = enabled;
        self
    }
}

/// Chooses moves for the side to move.
pub struct Engine {
    config: EngineConfig,
    searcher: Searcher,
    book: Option<Box<dyn OpeningBook + Send>>,
    stop: StopFlag,
}

impl Engine {
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        Engine {
            config,
            searcher: Searcher::new(config.search),
            book: None,
            stop: StopFlag::new(),
        }
    }

    /// Consult `book` before searching.
    #[must_use]
    pub fn with_book(mut self, book: impl OpeningBook + Send + 'static) -> Self {
        self.book = Some(Box::new(book));
        self
    }

    #[must_use]
    pub fn config(&self) -> EngineConfig {
        self.config
    }

    /// Summary of the last search; stale after a book move.
    #[must_use]
    pub fn last_report(&self) -> SearchReport {
        self.searcher.report()
    }

    /// Handle that aborts the move currently being chosen.
    #[must_use]
    pub fn stop_flag(&self) -> StopFlag {
        self.stop.clone()
    }

    /// Pick a move for the side to move, or `None` if it has no legal move.
    ///
    /// A search cut short before finishing its first iteration still returns
    /// the best ordered legal move.
    pub fn choose_move(&mut self, board: &mut Board) -> Option<Move> {
        if let Some(book) = &self.book {
            if let Some(mv) = book.book_move(board) {
                trace!("playing book move {mv}");
                return Some(mv);
            }
        }

        let legal = board.legal_moves();
        if legal.is_empty() {
            trace!("no legal moves: {:?}", board.status());
            return None;
        }

        // A fresh flag per move so a late timer cannot stop a later search.
        self.stop = StopFlag::new();
        let timer = DeadlineTimer::start(self.config.move_time, self.stop.clone());
        let best = self
            .searcher
            .start_search_with_stop(board, self.config.max_depth, self.stop.clone());
        if let Some(timer) = timer {
            timer.cancel();
        }

        best.or_else(|| {
            debug!("search produced no move; falling back to move ordering");
            order_moves(board, &legal).iter().next().map(|scored| scored.mv)
        })
    }
}

impl Default for Engine {
    fn default() -> Self {
        Engine::new(EngineConfig::default())
    }
}
