//! Criterion benchmarks for the timetable GA.
//!
//! Compares the fitness evaluator alone and full runs under each execution
//! strategy on a fixed-seed synthetic school.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use u_timetable::ga::distributed::spawn_local_workers;
use u_timetable::ga::{GaConfig, GaProblem, GeneticAlgorithm};
use u_timetable::random::create_rng;
use u_timetable::timetable::{DomainData, TimetableProblem};

// ===========================================================================
// Fixtures
// ===========================================================================

fn school(courses: u32, groups: u32) -> TimetableProblem {
    let domain = DomainData::uniform(courses, courses + 2, groups / 2 + 1, groups, 8, 16);
    TimetableProblem::new(domain).expect("valid benchmark domain")
}

fn config() -> GaConfig {
    GaConfig::quick()
        .with_population_size(40, 80)
        .with_max_generations(20)
        .with_seed(42)
}

// ===========================================================================
// Benchmarks
// ===========================================================================

fn bench_fitness(c: &mut Criterion) {
    let mut group = c.benchmark_group("fitness");

    for &(courses, groups) in &[(6, 7), (12, 14), (24, 20)] {
        let problem = school(courses, groups);
        let mut rng = create_rng(Some(42));
        let chromosome = problem.create_individual(&mut rng);
        group.bench_with_input(
            BenchmarkId::new("genes", problem.encoding_length()),
            &(problem, chromosome),
            |b, (p, ch)| b.iter(|| black_box(p.evaluate(black_box(ch)))),
        );
    }
    group.finish();
}

fn bench_strategies(c: &mut Criterion) {
    let mut group = c.benchmark_group("strategies");
    group.sample_size(10);

    let problem = school(12, 14);

    group.bench_function("sequential", |b| {
        b.iter(|| {
            let mut ga = GeneticAlgorithm::sequential(problem.clone(), config());
            black_box(ga.start().expect("run"))
        })
    });

    for &threads in &[2, 4] {
        group.bench_with_input(
            BenchmarkId::new("task_parallel", threads),
            &threads,
            |b, &t| {
                b.iter(|| {
                    let mut ga = GeneticAlgorithm::task_parallel(problem.clone(), config(), Some(t))
                        .expect("pool");
                    black_box(ga.start().expect("run"))
                })
            },
        );
    }

    for &workers in &[1, 3] {
        group.bench_with_input(
            BenchmarkId::new("distributed", workers),
            &workers,
            |b, &w| {
                b.iter(|| {
                    let (links, handles) = spawn_local_workers(&problem, w).expect("workers");
                    let mut ga = GeneticAlgorithm::distributed(problem.clone(), config(), links);
                    let result = ga.start().expect("run");
                    for h in handles {
                        h.join().expect("worker thread").expect("worker loop");
                    }
                    black_box(result)
                })
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_fitness, bench_strategies);
criterion_main!(benches);
