use std::collections::HashMap;
use std::io::Write;
use std::sync::Arc;

use tempfile::TempDir;

use mr_wordcount::{Config, Coordinator, FsSource, PipelineError};

fn write_files(dir: &TempDir, docs: &[(&str, &str)]) -> Vec<String> {
    docs.iter()
        .map(|(name, contents)| {
            let path = dir.path().join(name);
            let mut file = std::fs::File::create(&path).unwrap();
            write!(file, "{}", contents).unwrap();
            path.display().to_string()
        })
        .collect()
}

#[tokio::test]
async fn counts_words_across_real_files() {
    let dir = TempDir::new().unwrap();
    let files = write_files(&dir, &[("a.txt", "the cat"), ("b.txt", "the dog the")]);

    let coordinator = Coordinator::new(Arc::new(FsSource), Config::with_reduce_workers(2));
    let totals = coordinator.run(files).await.unwrap();

    let expected: HashMap<String, u64> = [("the", 3), ("cat", 1), ("dog", 1)]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();
    assert_eq!(totals, expected);
}

#[tokio::test]
async fn missing_file_fails_the_run_with_the_task_named() {
    let dir = TempDir::new().unwrap();
    let mut files = write_files(&dir, &[("a.txt", "the cat")]);
    let missing = dir.path().join("missing.txt").display().to_string();
    files.push(missing.clone());

    let coordinator = Coordinator::new(Arc::new(FsSource), Config::default());
    let err = coordinator.run(files).await.unwrap_err();

    match err {
        PipelineError::MapStage(failures) => {
            assert_eq!(failures.len(), 1);
            assert_eq!(failures[0].input, missing);
            assert_eq!(failures[0].source.kind(), std::io::ErrorKind::NotFound);
        }
        other => panic!("expected map stage failure, got {other}"),
    }
}

#[tokio::test]
async fn large_fanout_totals_match_the_input() {
    let dir = TempDir::new().unwrap();
    let docs: Vec<(String, String)> = (0..24)
        .map(|i| (format!("doc-{i}.txt"), "alpha beta alpha".to_string()))
        .collect();
    let borrowed: Vec<(&str, &str)> = docs
        .iter()
        .map(|(n, c)| (n.as_str(), c.as_str()))
        .collect();
    let files = write_files(&dir, &borrowed);

    let config = Config {
        reduce_workers: 3,
        map_workers: Some(4),
        ..Config::default()
    };
    let coordinator = Coordinator::new(Arc::new(FsSource), config);
    let totals = coordinator.run(files).await.unwrap();

    assert_eq!(totals["alpha"], 48);
    assert_eq!(totals["beta"], 24);
    assert_eq!(totals.len(), 2);
}
