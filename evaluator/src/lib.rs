use anyhow::{Context, Result};
use evalcore::corpus::load_corpus;
use evalcore::link::{Linker, OverlapLinker, SimilarityLinker};
use evalcore::persist::{
    export_clustering, export_frequency_matrix_csv, export_seeds, import_clustering, import_themes,
    load_matrix, now_rfc3339, MatrixPaths,
};
use evalcore::{score, Analyzer, Clustering, FrequencyMatrix, ScoreReport, StreamingClusterer, ThemeVectors};
use serde::Serialize;
use std::fs;
use std::path::Path;

pub mod config;

pub use config::{CandidateSource, ConfigOverrides, EvaluationConfig, LinkingStrategy};

pub const FSD_ALGORITHM: &str = "fsd";
pub const FSD_CLUSTERING_FILE: &str = "fsdClustering";
pub const FSD_SEEDS_FILE: &str = "fsdSeeds";
pub const FREQUENCY_MATRIX_FILE: &str = "frequencyMatrix.csv";
pub const REPORT_FILE: &str = "report.json";

#[derive(Debug, Serialize)]
pub struct AlgorithmReport {
    pub name: String,
    pub accuracy: f64,
    pub clusters: usize,
    pub scores: ScoreReport,
}

#[derive(Debug, Serialize)]
pub struct EvaluationReport {
    pub created_at: String,
    pub threshold: f64,
    pub linking: LinkingStrategy,
    pub documents: usize,
    pub truth_clusters: usize,
    pub algorithms: Vec<AlgorithmReport>,
}

impl EvaluationReport {
    pub fn algorithm(&self, name: &str) -> Option<&AlgorithmReport> {
        self.algorithms.iter().find(|a| a.name == name)
    }
}

/// Build the frequency matrix from a snapshot if configured, else from the corpus.
///
/// Returns the analyzer the matrix terms came from. For a snapshot that is the
/// analyzer recorded when it was saved, whatever `config.stem` says.
pub fn load_frequency_matrix(config: &EvaluationConfig) -> Result<(FrequencyMatrix, Analyzer)> {
    match &config.snapshot {
        Some(dir) => {
            let (matrix, analyzer) = load_matrix(&MatrixPaths::new(dir))?;
            if analyzer.stem != config.stem {
                tracing::warn!(
                    snapshot_stem = analyzer.stem,
                    config_stem = config.stem,
                    "stemming setting differs from the snapshot; using the snapshot's"
                );
            }
            Ok((matrix, analyzer))
        }
        None => {
            let analyzer = Analyzer::new(config.stem);
            let docs = load_corpus(&config.corpus)?;
            Ok((FrequencyMatrix::from_documents(&docs, &analyzer)?, analyzer))
        }
    }
}

/// Run FSD over the corpus and score it, plus every extra candidate, against the ground truth.
pub fn run(config: &EvaluationConfig) -> Result<EvaluationReport> {
    config.validate()?;
    let clusterer = StreamingClusterer::new(config.threshold)?;
    let output = config.output.as_path();
    fs::create_dir_all(output).with_context(|| format!("creating {}", output.display()))?;

    let (matrix, analyzer) = load_frequency_matrix(config)?;
    if config.export_matrix {
        export_frequency_matrix_csv(&output.join(FREQUENCY_MATRIX_FILE), &matrix)?;
    }

    let real = import_clustering(&config.truth)?;
    tracing::info!(clusters = real.len(), documents = real.document_count(), "loaded ground truth");

    let fsd = clusterer.cluster(matrix.order(), matrix.vectors(), matrix.vocabulary())?;
    export_clustering(&output.join(FSD_CLUSTERING_FILE), &fsd.clustering)?;
    export_seeds(&output.join(FSD_SEEDS_FILE), &fsd.seeds)?;

    let mut algorithms: Vec<(String, Clustering)> = vec![(FSD_ALGORITHM.to_string(), fsd.clustering)];
    for candidate in &config.candidates {
        algorithms.push((candidate.name.clone(), import_clustering(&candidate.path)?));
    }

    let themes = match (config.linking, &config.themes) {
        (LinkingStrategy::Similarity, Some(path)) => {
            Some(ThemeVectors::from_themes(&import_themes(path)?, &analyzer))
        }
        _ => None,
    };
    let linker: Box<dyn Linker + '_> = match (config.linking, &themes) {
        (LinkingStrategy::Overlap, _) => Box::new(OverlapLinker),
        (LinkingStrategy::Similarity, Some(themes)) => Box::new(SimilarityLinker::new(
            &themes.vocabulary,
            matrix.vectors(),
            themes.vectors.clone(),
        )),
        (LinkingStrategy::Similarity, None) => Box::new(SimilarityLinker::from_real_clustering(
            matrix.vocabulary(),
            matrix.vectors(),
            &real,
        )),
    };

    let mut reports = Vec::with_capacity(algorithms.len());
    for (name, clustering) in algorithms {
        let links = linker.link(&real, &clustering)?;
        let scores = score(&real, &clustering, &links)?;
        tracing::info!(algorithm = %name, accuracy = scores.accuracy, clusters = clustering.len(), "evaluated");
        reports.push(AlgorithmReport { name, accuracy: scores.accuracy, clusters: clustering.len(), scores });
    }

    let report = EvaluationReport {
        created_at: now_rfc3339(),
        threshold: config.threshold,
        linking: config.linking,
        documents: matrix.len(),
        truth_clusters: real.len(),
        algorithms: reports,
    };
    write_report(&output.join(REPORT_FILE), &report)?;
    Ok(report)
}

pub fn write_report(path: &Path, report: &EvaluationReport) -> Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
    tracing::info!(path = %path.display(), "wrote evaluation report");
    Ok(())
}
