use clap::Parser;
use rand::prelude::IndexedRandom;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;
use tracing_subscriber::EnvFilter;

use plum_rules::game::chess_game::Game;
use plum_rules::move_generation::legal_move_generator::legal_moves;
use plum_rules::utils::pgn::write_pgn;

/// Play seeded random games and print each one as PGN.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 1)]
    seed: u64,

    #[arg(short, long, default_value_t = 1)]
    games: usize,

    /// Stop a game after this many plies even if it is still running.
    #[arg(short, long, default_value_t = 300)]
    max_plies: usize,

    /// Starting position in FEN.
    #[arg(long)]
    fen: Option<String>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let mut rng = StdRng::seed_from_u64(args.seed);

    for index in 0..args.games {
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

        for _ in 0..args.max_plies {
            if game.is_game_over() {
                break;
            }
            let moves = legal_moves(game.state(), None);
            let Some(mv) = moves.choose(&mut rng) else {
                break;
            };
            if let Err(err) = game.play_move(mv) {
                eprintln!("generated move was rejected: {err}");
                std::process::exit(1);
            }
        }

        info!(
            game = index + 1,
            plies = game.moves().len(),
            status = ?game.status(),
            "playout finished"
        );
        println!("{}", write_pgn(&game, game.result()));
    }
}
