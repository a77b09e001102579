use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use treeignore::{MemoryTree, Pattern, PatternOrigin, RuleSet, TreeWalker};

const RULES: &[&str] = &[
    "*.log",
    "build/",
    "/todo.md",
    "**/node_modules/**",
    "*.[^tj]s",
    "{*.tmp,*.bak}",
    "secrets.yaml",
    "docs/**/*.pdf",
];

fn compile_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("compile");

    for raw in RULES {
        group.bench_with_input(BenchmarkId::new("pattern", raw), raw, |b, raw| {
            b.iter(|| Pattern::compile(black_box(raw), PatternOrigin::FileRule))
        });
    }

    group.bench_function("rule_set", |b| {
        b.iter(|| RuleSet::new("proj", black_box(RULES.iter().copied()), &[]))
    });

    group.finish();
}

fn matching_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("matching");

    let rules = RuleSet::new("proj", RULES.iter().copied(), &[]);
    let paths = generate_paths(1000);
    group.throughput(Throughput::Elements(paths.len() as u64));

    group.bench_function("excluding_pattern", |b| {
        b.iter(|| {
            paths
                .iter()
                .filter(|path| rules.excluding_pattern(black_box(path)).is_some())
                .count()
        })
    });

    group.finish();
}

fn walk_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("walk");

    // Test different tree sizes
    let sizes = vec![100, 1000, 10000];

    for size in sizes {
        group.throughput(Throughput::Elements(size as u64));

        let mut tree = MemoryTree::new("/proj").file("/proj/.gitignore", RULES.join("\n"));
        for path in generate_paths(size) {
            tree = tree.file(format!("/proj/{}", path), "");
        }

        group.bench_with_input(BenchmarkId::new("memory_tree", size), &tree, |b, tree| {
            b.iter(|| TreeWalker::new(tree, "/proj").walk())
        });
    }

    group.finish();
}

fn generate_paths(count: usize) -> Vec<String> {
    const DIRS: &[&str] = &["src", "src/core", "build", "docs/api", "lib/node_modules/x"];
    const NAMES: &[&str] = &["main.rs", "app.log", "index.ts", "util.cs", "notes.tmp", "guide.pdf"];

    (0..count)
        .map(|i| {
            let dir = DIRS[i % DIRS.len()];
            let name = NAMES[(i / DIRS.len()) % NAMES.len()];
            format!("{}/{}-{}", dir, i, name)
        })
        .collect()
}

criterion_group!(benches, compile_benchmark, matching_benchmark, walk_benchmark);
criterion_main!(benches);
