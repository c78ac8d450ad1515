use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use prefix_tree::{RemovalPolicy, StringTrie, TrieOptions};
use rand::distributions::Alphanumeric;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_keys(count: usize, seed: u64) -> Vec<String> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut keys: Vec<String> = (0..count)
        .map(|_| {
            let len = rng.gen_range(3..16);
            (&mut rng)
                .sample_iter(&Alphanumeric)
                .take(len)
                .map(char::from)
                .collect()
        })
        .collect();
    keys.sort();
    keys.dedup();
    keys
}

fn build(keys: &[String], options: TrieOptions) -> StringTrie<usize> {
    let mut trie = StringTrie::with_options(options);
    for (i, key) in keys.iter().enumerate() {
        trie.add(key.clone(), i).unwrap();
    }
    trie
}

fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert");
    for &size in &[1_000usize, 10_000] {
        let keys = random_keys(size, 1);
        group.bench_with_input(BenchmarkId::from_parameter(size), &keys, |b, keys| {
            b.iter(|| build(black_box(keys), TrieOptions::default()))
        });
    }
    group.finish();
}

fn bench_lookup(c: &mut Criterion) {
    let keys = random_keys(10_000, 2);
    let trie = build(&keys, TrieOptions::default());

    c.bench_function("contains_key/10000", |b| {
        b.iter(|| keys.iter().filter(|key| trie.contains_key(key.as_str())).count())
    });
}

fn bench_find_keys(c: &mut Criterion) {
    let keys = random_keys(10_000, 3);
    let trie = build(&keys, TrieOptions::default());

    let mut group = c.benchmark_group("find_keys");
    for prefix in &["", "a", "ab"] {
        group.bench_with_input(BenchmarkId::from_parameter(format!("{:?}", prefix)), prefix, |b, prefix| {
            b.iter(|| trie.find_keys(black_box(*prefix)))
        });
    }
    group.finish();
}

fn bench_remove(c: &mut Criterion) {
    let keys = random_keys(10_000, 4);

    let mut group = c.benchmark_group("remove_all");
    for &policy in &[RemovalPolicy::Lazy, RemovalPolicy::Prune] {
        let options = TrieOptions::default().removal(policy);
        group.bench_function(format!("{:?}", policy), |b| {
            b.iter_with_setup(
                || build(&keys, options),
                |mut trie| {
                    for key in &keys {
                        trie.remove(key.as_str());
                    }
                    trie
                },
            )
        });
    }
    group.finish();
}

fn bench_equality(c: &mut Criterion) {
    let keys = random_keys(10_000, 5);
    let left = build(&keys, TrieOptions::default());
    let right = build(&keys, TrieOptions::default());

    c.bench_function("eq/10000", |b| b.iter(|| black_box(&left) == black_box(&right)));
}

criterion_group!(benches, bench_insert, bench_lookup, bench_find_keys, bench_remove, bench_equality);
criterion_main!(benches);
