use criterion::{black_box, criterion_group, criterion_main, Criterion};
use keyshard::field::Field;
use keyshard::polynomial::Polynomial;
use keyshard::sss::{recover, split, Scheme};

const KEY: &str = "5KhyfSnsmQ6PSkx81Bw6vWqgdiJune4v1fxytuT6RJBu33TxQWN";

fn bench_split(c: &mut Criterion) {
    c.bench_function("split", |b| {
        let scheme = Scheme::new().unwrap();
        let threshold = 5;
        let shares = 10;
        b.iter(|| scheme.split(black_box(shares), black_box(threshold), black_box(KEY), ""))
    });
}

fn bench_recover(c: &mut Criterion) {
    c.bench_function("recover", |b| {
        let scheme = Scheme::new().unwrap();
        let shares = split(10, 5, KEY, "password").unwrap();
        b.iter(|| scheme.recover(black_box(&shares[..5]), "password"))
    });
}

fn bench_recover_with_setup(c: &mut Criterion) {
    c.bench_function("recover_with_field_setup", |b| {
        let shares = split(10, 5, KEY, "").unwrap();
        b.iter(|| recover(black_box(&shares[..5]), ""))
    });
}

fn bench_lagrange_basis(c: &mut Criterion) {
    c.bench_function("lagrange_basis", |b| {
        let field = Field::new(59).unwrap();
        let points: Vec<_> = (1..=20).map(|x| field.element(x).unwrap()).collect();
        b.iter(|| Polynomial::lagrange_basis(black_box(&points)))
    });
}

criterion_group!(
    benches,
    bench_split,
    bench_recover,
    bench_recover_with_setup,
    bench_lagrange_basis
);
criterion_main!(benches);
