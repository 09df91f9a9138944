use anyhow::{bail, Context, Result};
use clap::{Args, ValueEnum};
use evalcore::{Error, DEFAULT_THRESHOLD};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LinkingStrategy {
    /// Shared documents with the ground truth
    #[default]
    Overlap,
    /// Cosine similarity of summed cluster vectors
    Similarity,
}

/// A clustering produced elsewhere (e.g. k-means) to score alongside FSD.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateSource {
    pub name: String,
    pub path: PathBuf,
}

impl std::str::FromStr for CandidateSource {
    type Err = String;

    /// `name=path`
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.split_once('=') {
            Some((name, path)) if !name.is_empty() && !path.is_empty() => {
                Ok(Self { name: name.to_string(), path: PathBuf::from(path) })
            }
            _ => Err(format!("expected NAME=PATH, got {s:?}")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluationConfig {
    /// JSON / JSONL corpus file or directory
    pub corpus: PathBuf,
    /// Matrix snapshot directory; used instead of `corpus` when set
    pub snapshot: Option<PathBuf>,
    /// Ground-truth clustering
    pub truth: PathBuf,
    /// Ground-truth cluster themes, for similarity linking
    pub themes: Option<PathBuf>,
    pub candidates: Vec<CandidateSource>,
    pub threshold: f64,
    pub linking: LinkingStrategy,
    pub stem: bool,
    pub output: PathBuf,
    pub export_matrix: bool,
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            corpus: PathBuf::from("resources/tweets.jsonl"),
            snapshot: None,
            truth: PathBuf::from("resources/tweetsClustered"),
            themes: None,
            candidates: Vec::new(),
            threshold: DEFAULT_THRESHOLD,
            linking: LinkingStrategy::default(),
            stem: false,
            output: PathBuf::from("results"),
            export_matrix: true,
        }
    }
}

/// Command-line values layered over a config file or the defaults.
#[derive(Debug, Clone, Default, Args)]
pub struct ConfigOverrides {
    /// Corpus file or directory
    #[arg(long)]
    pub corpus: Option<PathBuf>,
    /// Matrix snapshot directory, used instead of --corpus
    #[arg(long)]
    pub snapshot: Option<PathBuf>,
    /// Ground-truth clustering (`<clusterId> <documentId>` lines)
    #[arg(long)]
    pub truth: Option<PathBuf>,
    /// Ground-truth themes (`<clusterId>#<theme>` lines)
    #[arg(long)]
    pub themes: Option<PathBuf>,
    /// Extra clustering to score, as NAME=PATH; repeatable
    #[arg(long = "candidate")]
    pub candidates: Vec<CandidateSource>,
    /// Cosine similarity needed to join a cluster
    #[arg(long)]
    pub threshold: Option<f64>,
    #[arg(long, value_enum)]
    pub linking: Option<LinkingStrategy>,
    #[arg(long)]
    pub stem: bool,
    /// Output directory for clusterings, seeds, matrix and report
    #[arg(long)]
    pub output: Option<PathBuf>,
    /// Skip the CSV export of the frequency matrix
    #[arg(long)]
    pub no_matrix_export: bool,
}

impl EvaluationConfig {
    /// Apply command-line overrides. Set values replace the configured ones,
    /// candidates are appended, and the two switches can only turn their
    /// feature on (`stem`) or off (`export_matrix`).
    pub fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        let ConfigOverrides {
            corpus,
            snapshot,
            truth,
            themes,
            candidates,
            threshold,
            linking,
            stem,
            output,
            no_matrix_export,
        } = overrides;
        if let Some(corpus) = corpus {
            self.corpus = corpus;
        }
        if snapshot.is_some() {
            self.snapshot = snapshot;
        }
        if let Some(truth) = truth {
            self.truth = truth;
        }
        if themes.is_some() {
            self.themes = themes;
        }
        self.candidates.extend(candidates);
        if let Some(threshold) = threshold {
            self.threshold = threshold;
        }
        if let Some(linking) = linking {
            self.linking = linking;
        }
        if let Some(output) = output {
            self.output = output;
        }
        self.stem |= stem;
        self.export_matrix &= !no_matrix_export;
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config = serde_json::from_str(&text)
            .with_context(|| format!("parsing config {}", path.display()))?;
        Ok(config)
    }

    /// Every input file the run will read.
    pub fn inputs(&self) -> Vec<&Path> {
        let mut inputs = vec![self.snapshot.as_deref().unwrap_or(&self.corpus), self.truth.as_path()];
        if self.linking == LinkingStrategy::Similarity {
            inputs.extend(self.themes.as_deref());
        }
        inputs.extend(self.candidates.iter().map(|c| c.path.as_path()));
        inputs
    }

    /// Fails on the first missing input, before any work is done.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.threshold) {
            bail!("threshold must be within [0, 1], got {}", self.threshold);
        }
        for input in self.inputs() {
            if !input.exists() {
                return Err(Error::MissingInput(input.to_path_buf()).into());
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_candidate_sources() {
        let c: CandidateSource = "kmeans=results/kmeansClustering".parse().unwrap();
        assert_eq!(c.name, "kmeans");
        assert_eq!(c.path, PathBuf::from("results/kmeansClustering"));
        assert!("kmeans".parse::<CandidateSource>().is_err());
        assert!("=path".parse::<CandidateSource>().is_err());
    }

    #[test]
    fn partial_config_keeps_defaults() {
        let config: EvaluationConfig =
            serde_json::from_str(r#"{ "threshold": 0.25, "linking": "similarity" }"#).unwrap();
        assert_eq!(config.threshold, 0.25);
        assert_eq!(config.linking, LinkingStrategy::Similarity);
        assert_eq!(config.truth, PathBuf::from("resources/tweetsClustered"));
    }

    #[test]
    fn overrides_layer_over_file_values() {
        let mut config: EvaluationConfig = serde_json::from_str(
            r#"{
                "snapshot": "snap",
                "truth": "truth",
                "candidates": [{ "name": "kmeans", "path": "kmeans" }],
                "threshold": 0.3,
                "stem": true
            }"#,
        )
        .unwrap();
        config.apply_overrides(ConfigOverrides {
            truth: Some(PathBuf::from("other-truth")),
            candidates: vec!["lda=lda".parse().unwrap()],
            linking: Some(LinkingStrategy::Similarity),
            no_matrix_export: true,
            ..Default::default()
        });

        assert_eq!(config.truth, PathBuf::from("other-truth"));
        assert_eq!(config.snapshot, Some(PathBuf::from("snap")));
        let names: Vec<&str> = config.candidates.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["kmeans", "lda"]);
        assert_eq!(config.threshold, 0.3);
        assert_eq!(config.linking, LinkingStrategy::Similarity);
        // An absent --stem flag does not turn stemming off
        assert!(config.stem);
        assert!(!config.export_matrix);
    }

    #[test]
    fn empty_overrides_change_nothing() {
        let mut config = EvaluationConfig::default();
        config.apply_overrides(ConfigOverrides::default());
        assert_eq!(config.corpus, EvaluationConfig::default().corpus);
        assert!(config.snapshot.is_none());
        assert!(!config.stem);
        assert!(config.export_matrix);
        assert_eq!(config.threshold, DEFAULT_THRESHOLD);
    }

    #[test]
    fn themes_only_required_for_similarity_linking() {
        let mut config = EvaluationConfig { themes: Some(PathBuf::from("themes")), ..Default::default() };
        assert_eq!(config.inputs().len(), 2);
        config.linking = LinkingStrategy::Similarity;
        assert_eq!(config.inputs().len(), 3);
    }
}
