//! URL 规范化性能基准测试

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use jumpto::utils::{check_safety, is_valid_alias, normalize_url, suggest_alias};
use std::hint::black_box;

// ============== normalize_url 基准测试 ==============

fn bench_normalize_url(c: &mut Criterion) {
    let mut group = c.benchmark_group("url_normalizer/normalize_url");

    group.bench_function("bare_domain", |b| {
        b.iter(|| {
            assert!(normalize_url(black_box("github.com")).is_ok());
        });
    });

    group.bench_function("with_scheme_and_query", |b| {
        b.iter(|| {
            assert!(normalize_url(black_box("https://docs.rs/tokio/latest/tokio/?search=spawn")).is_ok());
        });
    });

    group.bench_function("invalid", |b| {
        b.iter(|| {
            assert!(normalize_url(black_box("https://")).is_err());
        });
    });

    // 不同路径长度
    for length in [10, 100, 1000] {
        let url = format!("notion.so/{}", "a".repeat(length));
        group.bench_with_input(BenchmarkId::new("path_length", length), &url, |b, url| {
            b.iter(|| normalize_url(black_box(url)));
        });
    }

    group.finish();
}

// ============== 别名与安全检查 ==============

fn bench_alias_and_safety(c: &mut Criterion) {
    let mut group = c.benchmark_group("url_normalizer/alias");

    group.bench_function("valid_alias", |b| {
        b.iter(|| {
            assert!(is_valid_alias(black_box("my-shortcut-42")));
        });
    });

    group.bench_function("invalid_alias", |b| {
        b.iter(|| {
            assert!(!is_valid_alias(black_box("not valid!")));
        });
    });

    group.bench_function("suggest_alias", |b| {
        b.iter(|| suggest_alias(black_box("https://www.github.com/rust-lang/rust")));
    });

    group.bench_function("check_safety_safe", |b| {
        b.iter(|| {
            assert!(check_safety(black_box("github.com")).safe);
        });
    });

    group.bench_function("check_safety_denylisted", |b| {
        b.iter(|| {
            assert!(!check_safety(black_box("localhost:3000")).safe);
        });
    });

    group.finish();
}

criterion_group!(benches, bench_normalize_url, bench_alias_and_safety);
criterion_main!(benches);
