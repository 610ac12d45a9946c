use std::io::{self, BufRead, Write};
use std::time::Duration;

use log::{info, warn};

use mailbox_chess::board::{Board, Square};
use mailbox_chess::{Book, Engine, EngineConfig, GameStatus};

const BOOK_LINES: &[&[&str]] = &[
    &["e4", "e5", "Nf3", "Nc6", "Bb5", "a6", "Ba4", "Nf6", "O-O", "Be7"],
    &["e4", "c5", "Nf3", "d6", "d4", "cxd4", "Nxd4", "Nf6", "Nc3", "a6"],
    &["d4", "d5", "c4", "e6", "Nc3", "Nf6", "Bg5", "Be7", "e3", "O-O"],
    &["d4", "Nf6", "c4", "g6", "Nc3", "Bg7", "e4", "d6", "Nf3", "O-O"],
];

fn parse_args(args: &[String]) -> (EngineConfig, Option<String>) {
    let mut config = EngineConfig::default();
    let mut position = Vec::new();
    let mut i = 0;
    while i < args.len() {
        let value = args.get(i + 1);
        match args[i].as_str() {
            "--depth" => {
                match value.and_then(|v| v.parse::<u32>().ok()) {
                    Some(depth) => config = config.with_max_depth(depth),
                    None => warn!("--depth needs a number; using {}", config.max_depth),
                }
                i += 2;
            }
            "--movetime" => {
                match value.and_then(|v| v.parse::<u64>().ok()) {
                    Some(ms) => config = config.with_move_time(Duration::from_millis(ms)),
                    None => warn!("--movetime needs milliseconds; using {:?}", config.move_time),
                }
                i += 2;
            }
            "--tt" => {
                match value.and_then(|v| v.parse::<usize>().ok()) {
                    Some(slots) => config = config.with_tt_capacity(slots),
                    None => warn!("--tt needs a slot count; using {}", config.search.tt_capacity),
                }
                i += 2;
            }
            other => {
                position.push(other.to_string());
                i += 1;
            }
        }
    }
    let position = (!position.is_empty()).then(|| position.join(" "));
    (config, position)
}

fn render(board: &Board) -> String {
    let mut out = String::new();
    for rank in (0..8).rev() {
        out.push_str(&format!("{} ", rank + 1));
        for file in 0..8 {
            let c = Square::new(rank, file)
                .and_then(|sq| board.piece_at(sq))
                .map_or('.', |p| p.to_fen_char());
            out.push(c);
            out.push(' ');
        }
        out.push('\n');
    }
    out.push_str("  a b c d e f g h\n");
    out.push_str(&board.to_fen());
    out
}

fn report_status(board: &Board) {
    match board.status() {
        GameStatus::Ongoing => {}
        GameStatus::Checkmate { winner } => println!("checkmate, {winner} wins"),
        GameStatus::Stalemate => println!("stalemate"),
        GameStatus::FiftyPlyRule => println!("draw by 50-ply rule"),
        GameStatus::ThreefoldRepetition => println!("draw by threefold repetition"),
    }
}

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let (config, position) = parse_args(&args);

    let mut board = match position.as_deref().map(Board::try_from_fen) {
        Some(Ok(board)) => board,
        Some(Err(err)) => {
            eprintln!("invalid position: {err}; using the start position");
            Board::new()
        }
        None => Board::new(),
    };

    let mut engine = Engine::new(config);
    match Book::from_lines(BOOK_LINES) {
        Ok(book) => engine = engine.with_book(book),
        Err(err) => warn!("opening book disabled: {err}"),
    }
    info!(
        "engine ready: depth {} movetime {:?} tt {}",
        config.max_depth, config.move_time, config.search.tt_capacity
    );

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    for line in stdin.lock().lines() {
        let Ok(line) = line else { break };
        let line = line.trim();
        let (command, rest) = line.split_once(' ').unwrap_or((line, ""));
        let rest = rest.trim();

        match command {
            "" => continue,
            "quit" => break,
            "position" => {
                let text = if rest == "startpos" || rest.is_empty() {
                    mailbox_chess::board::START_FEN
                } else {
                    rest
                };
                if let Err(err) = board.load_position(text) {
                    println!("error: {err}");
                }
            }
            "move" => {
                let played = board
                    .make_move_san(rest)
                    .map_err(|err| err.to_string())
                    .or_else(|san_err| board.make_move_coord(rest).map_err(|_| san_err));
                match played {
                    Ok(_) => report_status(&board),
                    Err(err) => println!("error: {err}"),
                }
            }
            "go" => match engine.choose_move(&mut board) {
                Some(mv) => {
                    let san = board.move_to_san(mv);
                    board.make_move(mv, mailbox_chess::MoveContext::Game);
                    let report = engine.last_report();
                    println!("bestmove {san} ({mv}) depth {} score {}", report.depth, report.score);
                    report_status(&board);
                }
                None => report_status(&board),
            },
            "eval" => println!("{}", board.evaluate()),
            "moves" => {
                let list: Vec<String> = board
                    .legal_moves()
                    .iter()
                    .map(|&mv| board.move_to_san(mv))
                    .collect();
                println!("{}", list.join(" "));
            }
            "perft" => match rest.parse::<u32>() {
                Ok(depth) => println!("{}", board.perft(depth)),
                Err(_) => println!("error: perft needs a depth"),
            },
            "show" => println!("{}", render(&board)),
            other => println!("unknown command: {other}"),
        }
        let _ = stdout.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_flags() {
        let (config, position) = parse_args(&strings(&["--depth", "4", "--movetime", "250", "--tt", "1024"]));
        assert_eq!(config.max_depth, 4);
        assert_eq!(config.move_time, Duration::from_millis(250));
        assert_eq!(config.search.tt_capacity, 1024);
        assert!(position.is_none());
    }

    #[test]
    fn test_bad_flag_keeps_default() {
        let (config, _) = parse_args(&strings(&["--depth", "deep"]));
        assert_eq!(config.max_depth, EngineConfig::default().max_depth);
    }

    #[test]
    fn test_position_argument() {
        let (_, position) = parse_args(&strings(&["8/8/8/8/8/8/8/K1k5", "w", "--depth", "2"]));
        assert_eq!(position.as_deref(), Some("8/8/8/8/8/8/8/K1k5 w"));
    }

    #[test]
    fn test_book_lines_parse() {
        let book = Book::from_lines(BOOK_LINES).unwrap();
        assert!(!book.is_empty());
    }
}
