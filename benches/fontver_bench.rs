use criterion::{black_box, criterion_group, criterion_main, Criterion};
use fontver::prelude::*;

fn metadata_version_inputs() -> Vec<&'static str> {
    vec![
        "2.3.4",
        "2.3.4-beta",
        "2.003;xyz",
        "13.0d3e20",
        "Version 2.003",
        "Version 2.000;GOOG;noto-source:20170915:90ef993387c0",
        "Version 001.003;Core 1.0.01;otf.5.02.2298;42.06W",
        "OTF 1.022;PS 001.001;Core 1.0.31;makeotf.lib1.4.1585",
    ]
}

fn pattern_inputs() -> Vec<&'static str> {
    vec!["*", "latest", "2.3", ">=2.3", "<=2", ">1.0.0"]
}

fn parse_strict(inputs: &[&str]) {
    for input in inputs {
        let res = Version::parse(input);
        assert!(res.is_ok());
    }
}

fn parse_patterns(inputs: &[&str]) {
    for input in inputs {
        let res = VersionPattern::parse(input);
        assert!(res.is_ok());
    }
}

fn index_versions() -> Vec<Version> {
    [
        "2.0.0", "2.3.4-beta", "2.3.4", "2.3.5", "1.0.0+deadbeef", "3.1.0", "0.9.0", "2.4.0",
    ]
    .iter()
    .map(|s| Version::parse(s).unwrap())
    .collect()
}

fn sort_and_match(versions: &[Version], patterns: &[VersionPattern]) {
    let mut versions = versions.to_vec();
    sort_descending(&mut versions);
    for pattern in patterns {
        black_box(pattern.find(&versions));
    }
}

fn criterion_benchmark(c: &mut Criterion) {
    let version_inputs = metadata_version_inputs();
    c.bench_function("parse_strict", |b| {
        b.iter(|| parse_strict(black_box(&version_inputs)))
    });

    let pattern_strs = pattern_inputs();
    c.bench_function("parse_patterns", |b| {
        b.iter(|| parse_patterns(black_box(&pattern_strs)))
    });

    let versions = index_versions();
    let patterns: Vec<VersionPattern> = pattern_strs
        .iter()
        .map(|s| VersionPattern::parse(s).unwrap())
        .collect();
    c.bench_function("sort_and_match", |b| {
        b.iter(|| sort_and_match(black_box(&versions), black_box(&patterns)))
    });

    let a = Version::parse("2.3.4-beta").unwrap();
    let b_ = Version::parse("2.3.4").unwrap();
    c.bench_function("compare", |b| b.iter(|| black_box(&a).compare(black_box(&b_))));
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
