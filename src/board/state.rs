use super::movegen::MoveGenerator;
use super::{Bitboard, CastlingRights, Color, Piece, PlacedPiece, Square};

/// Whether a move belongs to the real game or to a hypothetical search line.
///
/// Game moves extend the repetition history and refresh the game status.
/// Search moves skip that bookkeeping; the board geometry, check state and
/// fingerprint are maintained identically in both contexts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveContext {
    Game,
    Search,
}

/// Plies without a capture or pawn move after which the game is drawn.
pub const DRAW_PLY_LIMIT: u32 = 50;

/// Terminal state of the game as seen after the last game move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Ongoing,
    Checkmate { winner: Color },
    Stalemate,
    /// [`DRAW_PLY_LIMIT`] reversible plies in a row
    FiftyPlyRule,
    ThreefoldRepetition,
}

impl GameStatus {
    #[must_use]
    pub fn is_over(self) -> bool {
        self != GameStatus::Ongoing
    }
}

/// Check and pin analysis for one king.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct CheckState {
    /// Squares of pieces giving check; capturing one resolves a single check
    pub(crate) checkers: Bitboard,
    /// Empty squares between a sliding checker and the king
    pub(crate) blocks: Bitboard,
    /// Pin direction per square, 0 when the piece there is free to move
    pub(crate) pins: [i8; 64],
}

impl CheckState {
    pub(crate) const CLEAR: CheckState = CheckState {
        checkers: Bitboard::EMPTY,
        blocks: Bitboard::EMPTY,
        pins: [0; 64],
    };

    #[inline]
    pub(crate) fn in_check(&self) -> bool {
        !self.checkers.is_empty()
    }

    #[inline]
    pub(crate) fn double_check(&self) -> bool {
        self.checkers.popcount() >= 2
    }

    /// Destinations that resolve a single check
    #[inline]
    pub(crate) fn evasion_targets(&self) -> Bitboard {
        self.checkers | self.blocks
    }
}

/// State needed to take back one move.
#[derive(Clone, Debug)]
pub struct UnmakeInfo {
    pub(crate) moved: PlacedPiece,
    pub(crate) captured: Option<PlacedPiece>,
    pub(crate) castled_rook: Option<PlacedPiece>,
    pub(crate) previous_hash: u64,
    pub(crate) previous_halfmove_clock: u32,
    pub(crate) previous_checks: [CheckState; 2],
    pub(crate) previous_status: GameStatus,
}

/// A mailbox chess position with cached per-square move lists.
///
/// The board is mutated in place by `make_move`/`unmake_move`; search never
/// clones it.
#[derive(Clone, Debug)]
pub struct Board {
    pub(crate) squares: [Option<PlacedPiece>; 64],
    pub(crate) side_to_move: Color,
    pub(crate) king_squares: [Square; 2],
    pub(crate) checks: [CheckState; 2],
    /// Plies played in total
    pub(crate) ply_count: u32,
    /// Plies since the last capture or pawn move
    pub(crate) halfmove_clock: u32,
    /// Fingerprints of every game position, the current one last
    pub(crate) history: Vec<u64>,
    pub(crate) undo_stack: Vec<UnmakeInfo>,
    pub(crate) hash: u64,
    pub(crate) movegen: MoveGenerator,
    pub(crate) status: GameStatus,
}

pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0";

impl Board {
    /// The standard starting position.
    #[must_use]
    pub fn new() -> Self {
        let back_rank = [
            Piece::Rook,
            Piece::Knight,
            Piece::Bishop,
            Piece::Queen,
            Piece::King,
            Piece::Bishop,
            Piece::Knight,
            Piece::Rook,
        ];
        let mut squares = [None; 64];
        for (file, &piece) in back_rank.iter().enumerate() {
            squares[file] = Some(PlacedPiece::new(piece, Color::White));
            squares[8 + file] = Some(PlacedPiece::new(Piece::Pawn, Color::White));
            squares[48 + file] = Some(PlacedPiece::new(Piece::Pawn, Color::Black));
            squares[56 + file] = Some(PlacedPiece::new(piece, Color::Black));
        }
        let kings = [Square::from_index(4), Square::from_index(60)];
        Board::assemble(squares, Color::White, kings, 0)
    }

    /// Build a board around a validated placement: caches, checks,
    /// fingerprint and status are all derived here.
    pub(crate) fn assemble(
        squares: [Option<PlacedPiece>; 64],
        side_to_move: Color,
        king_squares: [Square; 2],
        ply_count: u32,
    ) -> Self {
        let mut board = Board {
            squares,
            side_to_move,
            king_squares,
            checks: [CheckState::CLEAR; 2],
            ply_count,
            halfmove_clock: 0,
            history: Vec::new(),
            undo_stack: Vec::new(),
            hash: 0,
            movegen: MoveGenerator::new(),
            status: GameStatus::Ongoing,
        };
        board.movegen.precompute(&board.squares);
        board.refresh_checks();
        board.hash = board.calculate_hash();
        board.history.push(board.hash);
        board.status = board.compute_status();
        board
    }

    #[inline]
    #[must_use]
    pub fn piece_at(&self, sq: Square) -> Option<PlacedPiece> {
        self.squares[sq.index()]
    }

    #[inline]
    #[must_use]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    #[inline]
    #[must_use]
    pub fn king_square(&self, color: Color) -> Square {
        self.king_squares[color.index()]
    }

    /// Current 64-bit position fingerprint
    #[inline]
    #[must_use]
    pub fn hash(&self) -> u64 {
        self.hash
    }

    #[must_use]
    pub fn ply_count(&self) -> u32 {
        self.ply_count
    }

    #[must_use]
    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    #[must_use]
    pub fn is_in_check(&self, color: Color) -> bool {
        self.checks[color.index()].in_check()
    }

    #[must_use]
    pub fn is_double_check(&self, color: Color) -> bool {
        self.checks[color.index()].double_check()
    }

    #[must_use]
    pub fn is_checkmate(&self) -> bool {
        matches!(self.status, GameStatus::Checkmate { .. })
    }

    #[must_use]
    pub fn is_stalemate(&self) -> bool {
        self.status == GameStatus::Stalemate
    }

    /// True if the current position already occurred earlier in the game
    #[must_use]
    pub fn is_repeat_position(&self) -> bool {
        self.repetition_count(self.hash) > 1
    }

    /// Number of times `hash` appears in the game history
    pub(crate) fn repetition_count(&self, hash: u64) -> usize {
        self.history.iter().filter(|&&h| h == hash).count()
    }

    /// Castling rights derived from the king and corner rook history.
    #[must_use]
    pub fn castling_rights(&self) -> CastlingRights {
        let mut rights = CastlingRights::none();
        for color in Color::BOTH {
            let rank = color.back_rank();
            let unmoved = |file: usize, piece: Piece| {
                Square::new(rank, file)
                    .and_then(|sq| self.piece_at(sq))
                    .is_some_and(|p| p.piece == piece && p.color == color && !p.has_moved)
            };
            if !unmoved(4, Piece::King) {
                continue;
            }
            if unmoved(7, Piece::Rook) {
                rights.set(color, true);
            }
            if unmoved(0, Piece::Rook) {
                rights.set(color, false);
            }
        }
        rights
    }

    /// Iterate over occupied squares of one color
    pub(crate) fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Square, PlacedPiece)> + '_ {
        Square::all().filter_map(move |sq| {
            self.squares[sq.index()]
                .filter(|p| p.color == color)
                .map(|p| (sq, p))
        })
    }

    /// Refresh check and pin state for both kings.
    pub(crate) fn refresh_checks(&mut self) {
        for color in Color::BOTH {
            self.checks[color.index()] = self.analyze_checks(color);
        }
    }

    /// Terminal state of the side to move
    pub(crate) fn compute_status(&self) -> GameStatus {
        let side = self.side_to_move;
        if self.legal_moves().is_empty() {
            if self.is_in_check(side) {
                return GameStatus::Checkmate {
                    winner: side.opponent(),
                };
            }
            return GameStatus::Stalemate;
        }
        if self.halfmove_clock >= DRAW_PLY_LIMIT {
            return GameStatus::FiftyPlyRule;
        }
        if self.repetition_count(self.hash) >= 3 {
            return GameStatus::ThreefoldRepetition;
        }
        GameStatus::Ongoing
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for Board {
    /// Positions compare equal when every observable field matches; the
    /// cached move lists and undo stack are derived state.
    fn eq(&self, other: &Self) -> bool {
        self.squares == other.squares
            && self.side_to_move == other.side_to_move
            && self.king_squares == other.king_squares
            && self.checks == other.checks
            && self.ply_count == other.ply_count
            && self.halfmove_clock == other.halfmove_clock
            && self.hash == other.hash
            && self.history == other.history
            && self.status == other.status
    }
}

impl Eq for Board {}
