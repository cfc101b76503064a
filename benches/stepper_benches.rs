use RustedStepper::numerical::comparison::compare_methods;
use RustedStepper::numerical::fixed_step::FixedStepMethod;
use RustedStepper::numerical::grid::GridSpec;
use RustedStepper::numerical::reference_problems::ReferenceProblem;
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use strum::IntoEnumIterator;

fn bench_steppers(c: &mut Criterion) {
    let f = |x: f64, y: f64| -> f64 { 3.0 * x * y + x * y * y };
    let mut group = c.benchmark_group("fixed-step methods");
    for method in FixedStepMethod::iter() {
        for n in [50usize, 500, 5000] {
            group.bench_with_input(BenchmarkId::new(method.to_string(), n), &n, |b, &n| {
                b.iter(|| method.integrate(&f, black_box(0.0), black_box(3.0), 0.2 / n as f64, n))
            });
        }
    }
    group.finish();
}

fn bench_comparison(c: &mut Criterion) {
    let problem = ReferenceProblem::Bernoulli.setup_default(GridSpec::StepSize(0.1));
    c.bench_function("Bernoulli comparison h = 0.1", |b| {
        b.iter(|| compare_methods(black_box(&problem)))
    });
}

criterion_group!(benches, bench_steppers, bench_comparison);
criterion_main!(benches);
