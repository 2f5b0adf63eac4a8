use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use mr_wordcount::config::{DEFAULT_REDUCE_WORKERS, DEFAULT_STAGE_TIMEOUT};
use mr_wordcount::{Config, Coordinator, FsSource};

#[derive(Parser)]
#[command(about = "Count words across files with a two-stage worker pipeline")]
struct Args {
    /// Files to count words in
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Reduce-stage concurrency limit
    #[arg(long, default_value_t = DEFAULT_REDUCE_WORKERS)]
    reduce_workers: usize,

    /// Cap on map-stage concurrency (defaults to one worker per file)
    #[arg(long)]
    map_workers: Option<usize>,

    /// How long to wait for a stage to finish before failing the run
    #[arg(long, default_value_t = DEFAULT_STAGE_TIMEOUT.as_secs())]
    stage_timeout_secs: u64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let config = Config {
        reduce_workers: args.reduce_workers,
        map_workers: args.map_workers,
        stage_timeout: Duration::from_secs(args.stage_timeout_secs),
    };

    let coordinator = Coordinator::new(Arc::new(FsSource), config);
    let totals = coordinator
        .run(args.files.iter().map(|path| path.display().to_string()))
        .await?;

    let mut rows: Vec<_> = totals.into_iter().collect();
    rows.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    for (word, count) in rows {
        println!("{} {}", word, count);
    }

    Ok(())
}
