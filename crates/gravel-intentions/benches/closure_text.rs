use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};

use gravel_intentions::{closure_text, convert_all, Document};
use gravel_syntax::{lambdas, parse};

fn lambda_fixture(statements: usize) -> String {
    let mut out = String::from("def run = (int a, String b /* label */) -> {\n");
    for i in 0..statements {
        out.push_str(&format!("  def v{i} = a + {i} // step\n"));
    }
    out.push_str("  return b\n}\n");
    out
}

fn script_fixture(pairs: usize) -> String {
    let mut out = String::new();
    for i in 0..pairs {
        out.push_str(&format!("def f{i} = (x, y) -> x * y + {i}\n"));
        out.push_str(&format!("xs.each(v -> println(v{i}))\n"));
    }
    out
}

fn bench_closure_text(c: &mut Criterion) {
    let mut group = c.benchmark_group("closure_text");
    group.measurement_time(Duration::from_secs(2));
    group.warm_up_time(Duration::from_secs(1));
    group.sample_size(20);

    let text = lambda_fixture(200);
    let root = parse(&text).syntax();
    let lambda = lambdas(&root).next().expect("fixture has a lambda");
    group.bench_function("block_body_200_statements", |b| {
        b.iter(|| black_box(closure_text(black_box(&lambda))))
    });

    let script = script_fixture(50);
    group.bench_function("convert_all_100_lambdas", |b| {
        b.iter_batched(
            || Document::new(script.clone()),
            |mut doc| black_box(convert_all(&mut doc)),
            BatchSize::SmallInput,
        )
    });

    group.finish();
}

criterion_group!(benches, bench_closure_text);
criterion_main!(benches);
