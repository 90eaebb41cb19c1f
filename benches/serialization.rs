use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use termpose::{
    combine_trans, ensure_tag, float_trans, int_trans, parse, print, string_trans,
    tagged_sequence, Trans,
};

#[derive(Clone)]
struct Product {
    name: String,
    cost: f64,
    stock: i64,
    description: String,
}

fn products() -> impl Trans<Vec<Product>> {
    tagged_sequence(
        "products",
        combine_trans(
            |(name, cost, stock, description)| Product {
                name,
                cost,
                stock,
                description,
            },
            |p: &Product| (p.name.clone(), p.cost, p.stock, p.description.clone()),
            (
                string_trans(),
                ensure_tag("cost", float_trans()),
                ensure_tag("stock", int_trans()),
                ensure_tag("description", string_trans()),
            ),
        ),
    )
}

fn catalogue(size: usize) -> Vec<Product> {
    (0..size)
        .map(|i| Product {
            name: format!("item-{}", i),
            cost: i as f64 * 1.25,
            stock: (i * 7 % 100) as i64,
            description: format!("item number {}\nsecond line of text", i),
        })
        .collect()
}

fn benchmark_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");
    let schema = products();
    for size in [10, 100, 1000] {
        let text = print(&schema.termify(&catalogue(size)));
        group.bench_with_input(BenchmarkId::from_parameter(size), &text, |b, text| {
            b.iter(|| parse(black_box(text)).unwrap())
        });
    }
    group.finish();
}

fn benchmark_print(c: &mut Criterion) {
    let mut group = c.benchmark_group("print");
    let schema = products();
    for size in [10, 100, 1000] {
        let term = schema.termify(&catalogue(size));
        group.bench_with_input(BenchmarkId::from_parameter(size), &term, |b, term| {
            b.iter(|| print(black_box(term)))
        });
    }
    group.finish();
}

fn benchmark_check(c: &mut Criterion) {
    let mut group = c.benchmark_group("check");
    let schema = products();
    for size in [10, 100, 1000] {
        let term = schema.termify(&catalogue(size));
        group.bench_with_input(BenchmarkId::from_parameter(size), &term, |b, term| {
            b.iter(|| schema.check(black_box(term)).unwrap())
        });
    }
    group.finish();
}

fn benchmark_termify(c: &mut Criterion) {
    let schema = products();
    let items = catalogue(100);
    c.bench_function("termify_100", |b| {
        b.iter(|| schema.termify(black_box(&items)))
    });
}

criterion_group!(
    benches,
    benchmark_parse,
    benchmark_print,
    benchmark_check,
    benchmark_termify
);
criterion_main!(benches);
