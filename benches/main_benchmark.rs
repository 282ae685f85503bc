use core::f64::consts::PI;
use integrands::{integrand1, integrand2, quad, quad_integrand1, QuadOptions};

fn test_integrand1() {
    for i in 1..1000 {
        black_box(integrand1(i as f64 / 100.));
    }
}

fn test_integrand2() {
    for i in 1..1000 {
        black_box(integrand2(i as f64 / 100., 1.5, 2.5));
    }
}

fn test_quad_integrand1() {
    let opts = QuadOptions::default();
    black_box(quad_integrand1(PI, 2. * PI, &opts).ok());
}

fn test_quad_oscillatory() {
    let opts = QuadOptions {
        limit: 200,
        ..QuadOptions::default()
    };
    black_box(quad(|x| integrand2(x, 30., 1.), 1., 10., &opts).ok());
}

use criterion::{black_box, criterion_group, criterion_main, Criterion};

pub fn criterion_benchmark(c: &mut Criterion) {
    c.bench_function("test_integrand1", |b| b.iter(test_integrand1));
    c.bench_function("test_integrand2", |b| b.iter(test_integrand2));
    c.bench_function("test_quad_integrand1", |b| b.iter(test_quad_integrand1));
    c.bench_function("test_quad_oscillatory", |b| {
        b.iter(test_quad_oscillatory)
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
