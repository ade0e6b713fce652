#![cfg(feature = "parallel")]

use mcm_backtrack::corpus::write_corpus;
use mcm_backtrack::generator::{generate, GeneratorConfig};
use mcm_backtrack::{Runner, SolverBuilder};
use proptest::prelude::*;

/// Drop the timing column, which legitimately differs between runs.
fn without_times(results: &[u8]) -> Vec<(String, String, String)> {
    String::from_utf8(results.to_vec())
        .unwrap()
        .lines()
        .map(|l| {
            let parts: Vec<_> = l.splitn(4, ' ').collect();
            (parts[0].into(), parts[2].into(), parts[3].into())
        })
        .collect()
}

fn run(corpus: &[u8], parallel: bool) -> (mcm_backtrack::RunSummary, Vec<u8>) {
    let config = SolverBuilder::new()
        .with_max_n(8)
        .with_parallel(parallel)
        .build()
        .unwrap();
    let mut out = Vec::new();
    let summary = Runner::new(config).run(corpus, &mut out).unwrap();
    (summary, out)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn parallel_matches_serial(seed in any::<u64>(), per_n in 1usize..4) {
        let instances = generate(&GeneratorConfig {
            min_n: 1,
            max_n: 7,
            per_n,
            max_dim: 25,
            seed: Some(seed),
        })
        .unwrap();
        let mut corpus = Vec::new();
        write_corpus(&mut corpus, &instances).unwrap();

        let (serial_summary, serial) = run(&corpus, false);
        let (parallel_summary, parallel) = run(&corpus, true);
        prop_assert_eq!(serial_summary, parallel_summary);
        prop_assert_eq!(without_times(&serial), without_times(&parallel));
    }
}

#[test]
fn parallel_keeps_results_before_fatal_error() {
    let corpus = b"3\n2\n1 2 3\n3\n0 1 2 3\n2\n4 x 5\n";
    let config = SolverBuilder::new().with_parallel(true).build().unwrap();
    let mut out = Vec::new();
    let err = Runner::new(config)
        .run(&corpus[..], &mut out)
        .unwrap_err();
    assert!(err.is_fatal());
    let lines = without_times(&out);
    assert_eq!(lines, vec![("2".into(), "6".into(), "(M1 M2)".into())]);
}
