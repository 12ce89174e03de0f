//! Performance benchmarks for dirmap

use chrono::{Local, TimeZone};
use criterion::{Criterion, black_box, criterion_group, criterion_main};
use dirmap::patterns::{PatternKey, PatternRegistry};
use dirmap::test_utils::TestProject;
use dirmap::{DecisionSet, ExclusionFilter, MarkdownReport, ReportConfig, Scanner, SelfExclusion};

fn project_of(dirs: usize, files_per_dir: usize) -> TestProject {
    let project = TestProject::new();
    project.populate(dirs, files_per_dir);
    project
}

fn exclude_node_modules() -> DecisionSet {
    let mut decisions = DecisionSet::new();
    decisions.exclude(PatternKey::directory("node_modules"));
    decisions
}

fn bench_scan(c: &mut Criterion) {
    let mut group = c.benchmark_group("scan");

    for (label, dirs, files) in [("small_10x10", 10, 10), ("medium_50x20", 50, 20)] {
        let project = project_of(dirs, files);
        let scanner = Scanner::new(ExclusionFilter::new(
            &exclude_node_modules(),
            SelfExclusion::for_root(project.path()),
        ));
        group.bench_function(label, |b| b.iter(|| scanner.scan(black_box(project.path()))));
    }

    group.finish();
}

fn bench_detect(c: &mut Criterion) {
    let project = project_of(50, 20);
    let registry = PatternRegistry::builtin();
    let own = SelfExclusion::for_root(project.path());

    c.bench_function("detect_patterns_50x20", |b| {
        b.iter(|| dirmap::detect_patterns(black_box(project.path()), &registry, &own))
    });
}

fn bench_render(c: &mut Criterion) {
    let project = project_of(50, 20);
    let scanner = Scanner::new(ExclusionFilter::new(
        &DecisionSet::new(),
        SelfExclusion::for_root(project.path()),
    ));
    let result = scanner.scan(project.path()).unwrap();
    let generated_at = Local.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
    let report = MarkdownReport::new(ReportConfig::new(generated_at));

    c.bench_function("render_markdown_50x20", |b| {
        b.iter(|| report.render(black_box(&result)))
    });
}

criterion_group!(benches, bench_scan, bench_detect, bench_render);
criterion_main!(benches);
