//! CLI for predicting cascade growth from early retweets

use std::path::PathBuf;
use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use cascade_growth::core::{ExperimentConfig, Outcome, full_sizes, run_for_k};
use cascade_growth::utils::{load_json, parse_dataset, save_json, timing::Timer};

#[derive(Parser)]
#[command(name = "cascade-growth")]
#[command(about = "Predict cascade growth using early retweets", long_about = None)]
struct Cli {
    /// Path to the input dataset file
    #[arg(short, long)]
    input: PathBuf,

    /// Values of k (prefix lengths) to evaluate
    #[arg(short, long, num_args = 1..)]
    ks: Option<Vec<usize>>,

    /// Fraction of cascades used as the test set
    #[arg(long)]
    test_size: Option<f64>,

    /// Random seed for the train/test split and the random forest
    #[arg(long)]
    random_state: Option<u64>,

    /// JSON experiment configuration; flags override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write all outcomes as JSON to this path
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn experiment_config(&self) -> anyhow::Result<ExperimentConfig> {
        let mut config = match &self.config {
            Some(path) => load_json(path)
                .with_context(|| format!("reading config {}", path.display()))?,
            None => ExperimentConfig::default(),
        };

        if let Some(ks) = &self.ks {
            config.ks = ks.clone();
        }
        if let Some(test_size) = self.test_size {
            config.test_size = test_size;
        }
        if let Some(seed) = self.random_state {
            config.random_state = seed;
        }

        config.validate()?;
        Ok(config)
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = cli.experiment_config()?;

    let mut cascades = {
        let _timer = Timer::new("parse");
        parse_dataset(&cli.input)
            .with_context(|| format!("reading dataset {}", cli.input.display()))?
    };
    if cascades.is_empty() {
        println!("No cascades were parsed. Please check the input file.");
        return Ok(());
    }

    let sizes = full_sizes(&cascades);
    let mut outcomes = Vec::with_capacity(config.ks.len());
    for &k in &config.ks {
        let _timer = Timer::new(&format!("k={}", k));
        let outcome = run_for_k(&mut cascades, &sizes, k, &config)?;
        println!("{}", outcome);
        outcomes.push(outcome);
    }

    if let Some(path) = &cli.output {
        save_json(&outcomes, path)
            .with_context(|| format!("writing report {}", path.display()))?;
        info!(path = %path.display(), "wrote report");
    }

    let reported = outcomes.iter().filter(|o| matches!(o, Outcome::Report(_))).count();
    info!(reported, skipped = outcomes.len() - reported, "done");
    Ok(())
}
