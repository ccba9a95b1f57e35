use criterion::{black_box, criterion_group, criterion_main, Criterion};
use blockfall::bot::{find_best_move, AttractBot};
use blockfall::core::{Board, GameState, Piece};
use blockfall::term::{encode_diff_into, Effects, FrameBuffer, GameView, Viewport};
use blockfall::types::{GameAction, PieceKind};

fn bench_tick(c: &mut Criterion) {
    let mut state = GameState::with_seed(12345);
    state.start();

    c.bench_function("game_tick_16ms", |b| {
        b.iter(|| {
            if state.game_over() {
                state.restart();
            }
            state.tick(black_box(16));
        })
    });
}

fn bench_line_clear(c: &mut Criterion) {
    c.bench_function("clear_4_lines", |b| {
        b.iter(|| {
            let mut board = Board::new(10, 20);
            // Fill bottom 4 rows
            for y in 16..20 {
                for x in 0..10 {
                    board.set(x, y, Some(PieceKind::I));
                }
            }
            board.clear_full_rows();
        })
    });
}

fn bench_resolve_cascade(c: &mut Criterion) {
    // Loose cells over a nearly full floor: several sweeps, then a clear.
    let mut board = Board::new(10, 20);
    for x in 0..9 {
        board.set(x, 19, Some(PieceKind::J));
    }
    for y in 0..6 {
        board.set(9, y, Some(PieceKind::S));
        board.set(y, 8, Some(PieceKind::T));
    }

    c.bench_function("resolve_cascade", |b| {
        b.iter(|| {
            let mut scratch = board.clone();
            black_box(scratch.resolve());
        })
    });
}

fn bench_best_move(c: &mut Criterion) {
    let mut board = Board::new(10, 20);
    for x in [0, 1, 2, 3, 5, 6, 8] {
        board.set(x, 19, Some(PieceKind::Z));
        board.set(x, 18, Some(PieceKind::Z));
    }
    let piece = Piece::spawn(PieceKind::T, 10);

    c.bench_function("find_best_move", |b| {
        b.iter(|| black_box(find_best_move(black_box(&board), &piece)))
    });
}

fn bench_attract_step(c: &mut Criterion) {
    let mut bot = AttractBot::new(40, 24, 7);

    c.bench_function("attract_step_40x24", |b| {
        b.iter(|| black_box(bot.step()))
    });
}

fn bench_try_move(c: &mut Criterion) {
    let mut state = GameState::with_seed(12345);
    state.start();

    c.bench_function("try_move", |b| {
        b.iter(|| {
            state.apply_action(GameAction::MoveRight);
            state.apply_action(GameAction::MoveLeft);
        })
    });
}

fn bench_try_rotate(c: &mut Criterion) {
    let mut state = GameState::with_seed(12345);
    state.start();

    c.bench_function("try_rotate", |b| {
        b.iter(|| {
            state.apply_action(GameAction::RotateCw);
        })
    });
}

fn bench_render_diff(c: &mut Criterion) {
    let mut state = GameState::with_seed(12345);
    state.start();
    let view = GameView::new();
    let effects = Effects::new();
    let viewport = Viewport::new(80, 24);
    let before = view.render(&state, &effects, viewport);
    state.apply_action(GameAction::HardDrop);
    let mut after = FrameBuffer::new(0, 0);
    let mut out = Vec::with_capacity(16 * 1024);

    c.bench_function("render_and_diff_80x24", |b| {
        b.iter(|| {
            view.render_into(&state, &effects, viewport, &mut after);
            out.clear();
            let _ = encode_diff_into(&before, &after, &mut out);
            black_box(out.len());
        })
    });
}

criterion_group!(
    benches,
    bench_tick,
    bench_line_clear,
    bench_resolve_cascade,
    bench_best_move,
    bench_attract_step,
    bench_try_move,
    bench_try_rotate,
    bench_render_diff
);
criterion_main!(benches);
