use criterion::{black_box, criterion_group, criterion_main, Criterion};
use stackfall::{Board, Command, Coordinate, EventBus, GameConfig, GameEngine, GameState, Piece, PieceKind, SimpleRng};

fn bench_step(c: &mut Criterion) {
    let mut engine = GameEngine::new(GameConfig::default(), EventBus::new(), 12345).unwrap();
    engine.apply(Command::Start);

    c.bench_function("gravity_step", |b| {
        b.iter(|| {
            engine.step();
            if engine.state() != GameState::Playing {
                engine.end_game();
                engine.apply(Command::Start);
            }
        })
    });
}

fn bench_rotate_transform(c: &mut Criterion) {
    let config = GameConfig::default();
    let mut rng = SimpleRng::new(12345);
    let piece = Piece::new(PieceKind::T, &config, &mut rng);

    c.bench_function("rotate_transform", |b| {
        b.iter(|| black_box(&piece).rotate_transform())
    });
}

fn bench_line_clear(c: &mut Criterion) {
    c.bench_function("clear_4_rows", |b| {
        b.iter(|| {
            let mut board = Board::new(20, 10);
            // Fill bottom 4 rows.
            let cells: Vec<Coordinate> = (16..20)
                .flat_map(|y| (0..10).map(move |x| Coordinate::new(x, y)))
                .collect();
            board.mark_cells(&cells);
            for y in board.complete_rows() {
                board.remove_row(y);
            }
            black_box(&board);
        })
    });
}

fn bench_input_storm(c: &mut Criterion) {
    let mut engine = GameEngine::new(GameConfig::default(), EventBus::new(), 12345).unwrap();
    engine.apply(Command::Start);
    engine.step();

    c.bench_function("move_and_rotate", |b| {
        b.iter(|| {
            engine.apply(Command::MoveLeft);
            engine.apply(Command::Rotate);
            engine.apply(Command::MoveRight);
        })
    });
}

criterion_group!(
    benches,
    bench_step,
    bench_rotate_transform,
    bench_line_clear,
    bench_input_storm
);
criterion_main!(benches);
