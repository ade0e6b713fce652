use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::PathBuf;

use mcm_backtrack::corpus::write_corpus;
use mcm_backtrack::error::{CorpusError, InstanceError};
use mcm_backtrack::generator::{generate, GeneratorConfig};
use mcm_backtrack::summary::summarize;
use mcm_backtrack::{Error, Runner, SolverBuilder, SolverConfig};

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("mcm_backtrack_{name}_{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn generate_solve_summarize_round_trip() {
    let dir = scratch_dir("pipeline");
    let corpus_path = dir.join("instances.txt");
    let results_path = dir.join("results_backtracking.txt");

    let config = GeneratorConfig {
        min_n: 1,
        max_n: 6,
        per_n: 2,
        max_dim: 20,
        seed: Some(2025),
    };
    let instances = generate(&config).unwrap();
    write_corpus(BufWriter::new(File::create(&corpus_path).unwrap()), &instances).unwrap();

    let summary = Runner::new(SolverConfig::default())
        .run(
            BufReader::new(File::open(&corpus_path).unwrap()),
            BufWriter::new(File::create(&results_path).unwrap()),
        )
        .unwrap();
    assert_eq!(summary.declared, 12);
    assert_eq!(summary.solved, 12);
    assert_eq!(summary.skipped, 0);

    let text = fs::read_to_string(&results_path).unwrap();
    let lines: Vec<_> = text.lines().collect();
    assert_eq!(lines.len(), 12);
    for (line, inst) in lines.iter().zip(&instances) {
        let parts: Vec<_> = line.splitn(4, ' ').collect();
        assert_eq!(parts[0].parse::<usize>().unwrap(), inst.len());
        // six fractional digits on the time column
        assert_eq!(parts[1].split('.').nth(1).map(str::len), Some(6));
        assert!(parts[2].parse::<i64>().unwrap() >= 0);
        assert!(parts[3].contains(&format!("M{}", inst.len())));
    }

    let timings = summarize(
        "results_backtracking",
        BufReader::new(File::open(&results_path).unwrap()),
    )
    .unwrap();
    let ns: Vec<_> = timings.rows.iter().map(|r| r.n).collect();
    assert_eq!(ns, vec![1, 2, 3, 4, 5, 6]);
    assert!(timings.rows.iter().all(|r| r.samples == 2));

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn invalid_instances_are_skipped_not_fatal() {
    let corpus = "4\n3\n10 20 30 5\n2\n1 0 1\n5\n1 1 1 1 1 1\n1\n6 7\n";
    let config = SolverBuilder::new().with_max_n(4).build().unwrap();
    let mut out = Vec::new();
    let summary = Runner::new(config).run(corpus.as_bytes(), &mut out).unwrap();
    assert_eq!((summary.solved, summary.skipped), (2, 2));
    let text = String::from_utf8(out).unwrap();
    let costs: Vec<_> = text
        .lines()
        .map(|l| l.split(' ').nth(2).unwrap().to_string())
        .collect();
    assert_eq!(costs, vec!["4000", "0"]);
}

#[test]
fn truncated_corpus_aborts_the_run() {
    let corpus = "3\n1\n2 3\n";
    let mut out = Vec::new();
    let err = Runner::new(SolverConfig::default())
        .run(corpus.as_bytes(), &mut out)
        .unwrap_err();
    assert!(matches!(
        err,
        Error::Corpus(CorpusError::UnexpectedEof {
            expected: "chain length",
            ..
        })
    ));
    assert_eq!(String::from_utf8(out).unwrap().lines().count(), 1);
}

#[test]
fn local_errors_name_the_instance() {
    let err = Error::Instance {
        index: 2,
        source: InstanceError::ChainTooLong { n: 150, max: 100 },
    };
    assert_eq!(
        err.to_string(),
        "instance 2: chain of 150 factors exceeds the configured maximum of 100"
    );
}
