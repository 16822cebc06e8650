use std::sync::Arc;
use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use plum_rules::game_state::chess_rules::STARTING_POSITION_FEN;
use plum_rules::game_state::game_state::GameState;
use plum_rules::move_generation::legal_move_generator::{legal_moves, LegalMoveGenerator};
use plum_rules::move_generation::move_generator::MoveGenerator;
use plum_rules::move_generation::perft::{perft, perft_multi_threaded};
use plum_rules::utils::san::move_to_san;

struct BenchCase {
    name: &'static str,
    fen: &'static str,
    expected_nodes: &'static [u64],
}

const CASES: &[BenchCase] = &[
    BenchCase {
        name: "startpos",
        fen: STARTING_POSITION_FEN,
        expected_nodes: &[20, 400, 8902],
    },
    BenchCase {
        name: "kiwipete",
        fen: "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        expected_nodes: &[48, 2039],
    },
    BenchCase {
        name: "rook_endgame",
        fen: "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
        expected_nodes: &[14, 191, 2812],
    },
    BenchCase {
        name: "promotions",
        fen: "r2q1rk1/pP1p2pp/Q4n2/bbp1p3/Np6/1B3NBn/pPPP1PPP/R3K2R b KQ - 0 1",
        expected_nodes: &[6, 264, 9467],
    },
    BenchCase {
        name: "discovered_checks",
        fen: "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8",
        expected_nodes: &[44, 1486],
    },
];

fn bench_perft(c: &mut Criterion) {
    let mut group = c.benchmark_group("perft");
    group.warm_up_time(Duration::from_secs(1));
    group.measurement_time(Duration::from_secs(4));
    group.sample_size(20);

    for case in CASES {
        let game = GameState::from_fen(case.fen).expect("benchmark FEN should parse");

        for (depth_idx, expected_nodes) in case.expected_nodes.iter().enumerate() {
            let depth = (depth_idx + 1) as u8;

            // Correctness guard before timing anything.
            let warmup = perft(&LegalMoveGenerator, &game, depth);
            assert_eq!(
                warmup.nodes as u64, *expected_nodes,
                "node mismatch for {} depth {}",
                case.name, depth
            );

            group.throughput(Throughput::Elements(*expected_nodes));
            group.bench_with_input(
                BenchmarkId::new(case.name, depth),
                &depth,
                |b, &depth| b.iter(|| perft(&LegalMoveGenerator, black_box(&game), depth).nodes),
            );
        }
    }

    group.finish();
}

fn bench_perft_threads(c: &mut Criterion) {
    let mut group = c.benchmark_group("perft_threads");
    group.sample_size(10);

    let game = GameState::new_game();
    let generator: Arc<dyn MoveGenerator> = Arc::new(LegalMoveGenerator);
    group.bench_function("startpos_d3", |b| {
        b.iter(|| perft_multi_threaded(generator.clone(), black_box(&game), 3).nodes)
    });

    group.finish();
}

fn bench_san(c: &mut Criterion) {
    let game = GameState::from_fen(CASES[1].fen).expect("benchmark FEN should parse");
    let moves = legal_moves(&game, None);
    c.bench_function("san_all_kiwipete_moves", |b| {
        b.iter(|| {
            moves
                .iter()
                .map(|mv| move_to_san(black_box(&game), mv).len())
                .sum::<usize>()
        })
    });
}

criterion_group!(perft_benches, bench_perft, bench_perft_threads, bench_san);
criterion_main!(perft_benches);
