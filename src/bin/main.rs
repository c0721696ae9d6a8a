//! Phishing detector command line interface
//!
//! Trains a TF-IDF + multinomial Naive Bayes model on a labeled CSV and
//! prints held-out accuracy and a classification report.

use clap::Parser;
use env_logger::Env;
use log::{error, info};
use phishing_detector::api::PhishingDetector;
use phishing_detector::core::{DetectorConfig, DetectorError, Result};
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "phishing-detector")]
#[command(about = "Detect phishing messages with TF-IDF and Naive Bayes")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = "phishing-detector contributors")]
struct Cli {
    /// Labeled CSV file with text and label columns
    data: PathBuf,

    /// Name of the column holding the message text
    #[arg(long, default_value = "text")]
    text_column: String,

    /// Name of the column holding the class label
    #[arg(long, default_value = "label")]
    label_column: String,

    /// Fraction of rows held out for evaluation
    #[arg(short, long, default_value = "0.2")]
    test_size: f64,

    /// Seed for the train/test shuffle
    #[arg(short, long, default_value = "42")]
    seed: u64,

    /// Naive Bayes additive smoothing
    #[arg(short, long, default_value = "1.0")]
    alpha: f64,

    /// Print the evaluation as JSON instead of text
    #[arg(long)]
    json: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Enable debug output
    #[arg(short, long)]
    debug: bool,
}

impl Cli {
    fn config(&self) -> DetectorConfig {
        DetectorConfig {
            text_column: self.text_column.clone(),
            label_column: self.label_column.clone(),
            test_size: self.test_size,
            random_state: self.seed,
            alpha: self.alpha,
            ..DetectorConfig::default()
        }
    }
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.debug {
        "debug"
    } else if cli.verbose {
        "info"
    } else {
        "warn"
    };

    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    if let Err(e) = run(&cli) {
        error!("Error: {e}");
        process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    info!("Data file: {:?}", cli.data);
    info!(
        "Parameters: test_size={}, seed={}, alpha={}",
        cli.test_size, cli.seed, cli.alpha
    );

    if cli.json {
        let mut detector = PhishingDetector::with_config(cli.config()).quiet();
        let evaluation = detector.run(&cli.data)?;
        let json = serde_json::to_string_pretty(&evaluation)
            .map_err(|e| DetectorError::SerializationError(e.to_string()))?;
        println!("{json}");
    } else {
        let mut detector = PhishingDetector::with_config(cli.config());
        detector.run(&cli.data)?;
    }

    Ok(())
}
