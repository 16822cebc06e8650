use std::io::{self, BufRead, Write};

use clap::Parser;
use tracing_subscriber::EnvFilter;

use plum_rules::errors::ChessResult;
use plum_rules::game::chess_game::Game;
use plum_rules::game::snapshot::MoveRecord;
use plum_rules::move_generation::legal_move_generator::legal_moves;
use plum_rules::utils::algebraic::square_to_algebraic;
use plum_rules::utils::long_algebraic::{move_to_long_algebraic, parse_long_algebraic};
use plum_rules::utils::pgn::write_pgn;
use plum_rules::utils::render_game_state::render_game_state;

/// Line-oriented console for playing and inspecting a game.
#[derive(Debug, Parser)]
#[command(name = "plum_rules", version)]
struct Args {
    /// Starting position in FEN (defaults to the standard start).
    #[arg(long)]
    fen: Option<String>,
}

const HELP: &str = "commands: board | fen | moves [square] | move <e2e4|SAN> | undo | \
load <fen> | reset | snapshot | pgn | help | quit";

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let mut game = match args.fen.as_deref() {
        Some(fen) => match Game::from_fen(fen) {
            Ok(game) => game,
            Err(err) => {
                eprintln!("{err}");
                std::process::exit(2);
            }
        },
        None => Game::new(),
    };

    println!("{}", render_game_state(game.state()));
    println!("{HELP}");

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    for line in stdin.lock().lines() {
        let Ok(line) = line else { break };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line == "quit" || line == "exit" {
            break;
        }

        match run_command(&mut game, line) {
            Ok(output) => println!("{output}"),
            Err(err) => println!("error: {err}"),
        }
        stdout.flush().ok();
    }
}

fn run_command(game: &mut Game, line: &str) -> ChessResult<String> {
    let (command, rest) = line.split_once(' ').unwrap_or((line, ""));
    let rest = rest.trim();

    match command {
        "board" => Ok(render_game_state(game.state())),
        "fen" => Ok(game.fen()),
        "moves" if rest.is_empty() => Ok(legal_moves(game.state(), None)
            .iter()
            .map(move_to_long_algebraic)
            .collect::<Vec<_>>()
            .join(" ")),
        "moves" => Ok(game.legal_destinations(rest).join(" ")),
        "move" => {
            let record = play_text(game, rest)?;
            let mut out = format!("{} -> {}", record.san, record.fen);
            if game.is_game_over() {
                out.push_str(&format!("\ngame over: {:?} ({})", game.status(), game.result()));
            }
            Ok(out)
        }
        "undo" => game.undo().map(|_| game.fen()),
        "load" => game.load_fen(rest).map(|_| render_game_state(game.state())),
        "reset" => {
            game.reset();
            Ok(render_game_state(game.state()))
        }
        "snapshot" => Ok(serde_json::to_string_pretty(&game.snapshot())
            .unwrap_or_else(|err| format!("snapshot serialization failed: {err}"))),
        "pgn" => Ok(write_pgn(game, game.result())),
        _ => Ok(HELP.to_owned()),
    }
}

/// Coordinate notation when it parses as such, SAN otherwise.
fn play_text(game: &mut Game, text: &str) -> ChessResult<MoveRecord> {
    match parse_long_algebraic(text) {
        Ok((from, to, promotion)) => game.try_move(
            &square_to_algebraic(from),
            &square_to_algebraic(to),
            promotion,
        ),
        Err(_) => game.play_san(text),
    }
}
