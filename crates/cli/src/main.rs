use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use data_loader::RatingIndex;
use pipeline::EvaluationPipeline;
use predictor::Predictor;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

mod output;

/// Predictions are written to the working directory
const PREDICTIONS_FILE: &str = "predictions.txt";

/// cf-predict - user-based collaborative filtering evaluator
#[derive(Parser)]
#[command(name = "cf-predict")]
#[command(about = "Predict test ratings from training ratings and report RMSE/MAE", long_about = None)]
struct Cli {
    /// Training ratings file (itemId,userId,rating per line)
    #[arg(long)]
    train: PathBuf,

    /// Test ratings file, same format as the training file
    #[arg(long)]
    test: PathBuf,
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    info!("Training file: {}, test file: {}", cli.train.display(), cli.test.display());

    // Load both files; a malformed row anywhere aborts the run
    let start = Instant::now();
    let (training, test) = RatingIndex::load_train_test(&cli.train, &cli.test)
        .context("Failed to load rating files")?;
    let means = training
        .compute_user_means()
        .context("Failed to compute user means")?;
    eprintln!(
        "{} Loaded {} training and {} test ratings in {:?}",
        "✓".green(),
        training.len(),
        test.len(),
        start.elapsed()
    );

    let predictor = Predictor::new(Arc::new(training), Arc::new(means));
    let evaluation = EvaluationPipeline::new(predictor)
        .run(&test)
        .context("Prediction pass failed")?;

    // Output only after the full pass succeeded
    let output_path = Path::new(PREDICTIONS_FILE);
    output::write_predictions(output_path, &evaluation.predictions)?;
    eprintln!(
        "{} Wrote {} predictions to {}",
        "✓".green(),
        evaluation.predictions.len(),
        output_path.display()
    );
    if evaluation.report.skipped > 0 {
        eprintln!(
            "{} {} test ratings skipped (user not in training)",
            "!".yellow(),
            evaluation.report.skipped
        );
    }

    println!("{}", output::format_summary(&evaluation.report));
    Ok(())
}
