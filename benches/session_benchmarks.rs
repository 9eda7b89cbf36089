use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::hint::black_box;
use ColorSokoban::console_interface::parse_level;
use ColorSokoban::core::{Direction, LevelSession};

const PUZZLES: &[(&str, &str)] = &[
    ("corridor", r#"
#########
#@ $  . #
#########
"#),
    ("two_colors", r#"
#######
#@    #
# R B #
# r b #
#######
"#),
    ("crowded", r#"
       ####
########  ##
#          ###
# @$$ ##   ..#
# $$   ##  ..#
#         ####
###########
"#),
];

const MOVES: usize = 1000;

fn scripted_moves() -> Vec<Direction> {
    // A fixed wander that bumps walls, steps and pushes.
    let pattern = [
        Direction::Right, Direction::Right, Direction::Down, Direction::Left,
        Direction::Up, Direction::Right, Direction::Down, Direction::Down,
        Direction::Left, Direction::Up, Direction::Up, Direction::Left,
    ];
    pattern.iter().copied().cycle().take(MOVES).collect()
}

pub fn bench_submit_move(c: &mut Criterion) {
    let mut group = c.benchmark_group("submit_move");
    group.throughput(Throughput::Elements(MOVES as u64));
    let moves = scripted_moves();

    for &(puzzle_name, puzzle) in PUZZLES {
        group.bench_with_input(
            BenchmarkId::new("scripted", puzzle_name),
            &puzzle,
            |b, &puzzle| {
                b.iter_with_setup(
                    || LevelSession::new(parse_level(puzzle).unwrap()),
                    |mut session| {
                        for &direction in &moves {
                            let report = session.submit_move(direction);
                            if report.completed {
                                session.reset();
                            }
                            black_box(report);
                        }
                    },
                )
            },
        );
    }
    group.finish();
}

pub fn bench_rescan(c: &mut Criterion) {
    let (_, puzzle) = PUZZLES[2];
    let session = LevelSession::new(parse_level(puzzle).unwrap());
    c.bench_function("completion_by_rescan", |b| {
        b.iter(|| black_box(session.is_complete_by_rescan()))
    });
}

criterion_group!(benches, bench_submit_move, bench_rescan);
criterion_main!(benches);
