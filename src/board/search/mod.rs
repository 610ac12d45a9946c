//! Iterative deepening negamax search.
//!
//! - Fail-hard alpha-beta with mate distance pruning
//! - Quiescence search over captures at the horizon
//! - MVV-LVA move ordering
//! - Transposition table cutoffs, cleared before every search
//! - Cooperative cancellation through a shared stop flag

mod alphabeta;
mod constants;
mod move_order;
mod quiescence;

use log::{debug, info};

use crate::sync::StopFlag;
use crate::tt::{TranspositionTable, DEFAULT_TT_CAPACITY};

use super::{Board, Move};
use alphabeta::SearchContext;
pub use constants::{is_mate_score, DEFAULT_MAX_DEPTH, INFINITY, MATE_SCORE};
pub(crate) use move_order::order_moves;

/// Search settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchConfig {
    /// Number of transposition table slots
    pub tt_capacity: usize,
    /// Consult and fill the transposition table
    pub use_transposition_table: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            tt_capacity: DEFAULT_TT_CAPACITY,
            use_transposition_table: true,
        }
    }
}

/// Outcome of the deepest completed iteration of the last search.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchReport {
    pub depth: u32,
    pub score: i32,
    pub best_move: Option<Move>,
    /// Nodes visited over all iterations, quiescence included
    pub nodes: u64,
    /// Transposition table hits over all iterations
    pub transpositions: u64,
    pub aborted: bool,
}

/// Owns the transposition table and stop flag used across searches.
pub struct Searcher {
    tt: TranspositionTable,
    stop: StopFlag,
    config: SearchConfig,
    report: SearchReport,
}

impl Searcher {
    #[must_use]
    pub fn new(config: SearchConfig) -> Self {
        Searcher {
            tt: TranspositionTable::new(config.tt_capacity),
            stop: StopFlag::new(),
            config,
            report: SearchReport::default(),
        }
    }

    #[must_use]
    pub fn config(&self) -> SearchConfig {
        self.config
    }

    /// Summary of the most recent search
    #[must_use]
    pub fn report(&self) -> SearchReport {
        self.report
    }

    /// A handle to the stop flag; setting it from any thread aborts the
    /// running search.
    #[must_use]
    pub fn stop_flag(&self) -> StopFlag {
        self.stop.clone()
    }

    /// Ask the running search to stop.
    pub fn abort(&self) {
        self.stop.stop();
    }

    /// Search `board` to at most `target_depth` plies and return the best
    /// move of the deepest completed iteration, or `None` when the side to
    /// move has no legal move.
    ///
    /// Clears the stop flag first; use `start_search_with_stop` when a timer
    /// already watches a flag.
    pub fn start_search(&mut self, board: &mut Board, target_depth: u32) -> Option<Move> {
        self.stop.reset();
        self.run(board, target_depth)
    }

    /// Like `start_search`, but installs `stop` as the abort signal without
    /// clearing it.
    pub fn start_search_with_stop(
        &mut self,
        board: &mut Board,
        target_depth: u32,
        stop: StopFlag,
    ) -> Option<Move> {
        self.stop = stop;
        self.run(board, target_depth)
    }

    fn run(&mut self, board: &mut Board, target_depth: u32) -> Option<Move> {
        self.tt.clear();
        self.report = SearchReport::default();

        for depth in 1..=target_depth.max(1) {
            let mut ctx = SearchContext::new(
                board,
                &mut self.tt,
                &self.stop,
                self.config.use_transposition_table,
            );
            let score = ctx.search(depth, -INFINITY, INFINITY, 0);
            let (root_move, nodes, transpositions) = ctx.finish();
            self.report.nodes += nodes;
            self.report.transpositions += transpositions;

            if self.stop.is_stopped() {
                self.report.aborted = true;
                debug!("search aborted during depth {depth}");
                break;
            }

            self.report.depth = depth;
            self.report.score = score;
            self.report.best_move = root_move;
            debug!(
                "depth {depth} score {score} best {} nodes {}",
                root_move.map_or_else(|| "none".to_string(), |mv| mv.to_string()),
                self.report.nodes
            );

            if root_move.is_none() {
                break;
            }
            if is_mate_score(score) && depth > 2 {
                break;
            }
        }

        info!(
            "search finished: depth {} score {} positions {} transpositions {}",
            self.report.depth, self.report.score, self.report.nodes, self.report.transpositions
        );
        self.report.best_move
    }
}

impl Default for Searcher {
    fn default() -> Self {
        Searcher::new(SearchConfig::default())
    }
}
