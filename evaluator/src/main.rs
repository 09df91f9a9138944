use anyhow::Result;
use clap::{Parser, Subcommand};
use evalcore::corpus::load_corpus;
use evalcore::persist::{export_frequency_matrix_csv, save_matrix, MatrixPaths};
use evalcore::{Analyzer, FrequencyMatrix};
use evaluator::{run, ConfigOverrides, EvaluationConfig};
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "evaluator")]
#[command(about = "Run first story detection and score clusterings against ground truth", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a term frequency matrix snapshot from a JSON/JSONL corpus
    Vectorize {
        /// Input path (file or directory)
        #[arg(long)]
        input: PathBuf,
        /// Output snapshot directory
        #[arg(long)]
        output: PathBuf,
        /// Also write the matrix as CSV to this path
        #[arg(long)]
        csv: Option<PathBuf>,
        /// Reduce terms to their English stem
        #[arg(long, default_value_t = false)]
        stem: bool,
    },
    /// Cluster the corpus with FSD and score it and any extra clusterings
    Evaluate {
        /// JSON config file; flags below override its values
        #[arg(long)]
        config: Option<PathBuf>,
        #[command(flatten)]
        overrides: ConfigOverrides,
    },
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Vectorize { input, output, csv, stem } => vectorize(&input, &output, csv, stem),
        Commands::Evaluate { config, overrides } => {
            let mut cfg = match config {
                Some(path) => EvaluationConfig::from_file(&path)?,
                None => EvaluationConfig::default(),
            };
            cfg.apply_overrides(overrides);

            let report = run(&cfg)?;
            for algo in &report.algorithms {
                println!("{} algorithm :\nAccuracy : {:.6}\nClusters : {}", algo.name, algo.accuracy, algo.clusters);
            }
            Ok(())
        }
    }
}

fn vectorize(input: &Path, output: &Path, csv: Option<PathBuf>, stem: bool) -> Result<()> {
    let docs = load_corpus(input)?;
    let analyzer = Analyzer::new(stem);
    let matrix = FrequencyMatrix::from_documents(&docs, &analyzer)?;
    save_matrix(&MatrixPaths::new(output), &matrix, analyzer)?;
    if let Some(csv) = csv {
        export_frequency_matrix_csv(&csv, &matrix)?;
    }
    tracing::info!(output = %output.display(), "snapshot complete");
    Ok(())
}
