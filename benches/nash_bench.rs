//! Benchmarks for the Nash equilibrium quiz.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use matrix_game_quiz::games::nash::{self, find_equilibria, interpret};
use matrix_game_quiz::question::{rng_from_seed, Difficulty, GenerateOptions};

fn solve_benchmark(c: &mut Criterion) {
    let mut rng = rng_from_seed(Some(42));
    let options = GenerateOptions::default().with_rows(4).with_cols(4);
    let game = nash::generate(Difficulty::Hard, &options, &mut rng).unwrap();

    c.bench_function("nash_solve_4x4", |b| b.iter(|| find_equilibria(black_box(&game.instance))));
}

fn interpret_benchmark(c: &mut Criterion) {
    let rows: Vec<String> = ["U", "M", "D"].iter().map(|s| s.to_string()).collect();
    let cols: Vec<String> = ["L", "C", "R"].iter().map(|s| s.to_string()).collect();
    let answer = "I think there are two equilibria, at (U, L) and (D, R), none elsewhere.";

    c.bench_function("nash_interpret", |b| {
        b.iter(|| interpret(black_box(answer), &rows, &cols))
    });
}

fn generate_benchmark(c: &mut Criterion) {
    c.bench_function("nash_generate_hard", |b| {
        let mut rng = rng_from_seed(Some(42));
        b.iter(|| nash::generate(Difficulty::Hard, &GenerateOptions::default(), &mut rng).unwrap())
    });
}

criterion_group!(benches, solve_benchmark, interpret_benchmark, generate_benchmark);
criterion_main!(benches);
