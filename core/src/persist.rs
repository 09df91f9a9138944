//! File formats: clusterings, seeds, themes, the frequency matrix CSV export
//! and the binary matrix snapshot.

use crate::{Analyzer, ClusterId, ClusterSeeds, Clustering, Error, FrequencyMatrix, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::{create_dir_all, File};
use std::io::{BufRead, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use time::format_description::well_known::Rfc3339;

pub const SNAPSHOT_VERSION: u32 = 2;

#[derive(Debug, Serialize, Deserialize)]
pub struct MetaFile {
    pub num_docs: usize,
    pub num_terms: usize,
    pub created_at: String,
    pub version: u32,
    /// Analyzer the matrix terms were produced with.
    pub analyzer: Analyzer,
}

/// Current UTC time as RFC 3339, empty if it cannot be formatted.
pub fn now_rfc3339() -> String {
    time::OffsetDateTime::now_utc().format(&Rfc3339).unwrap_or_default()
}

pub struct MatrixPaths {
    pub root: PathBuf,
}

impl MatrixPaths {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self { root: root.as_ref().to_path_buf() }
    }
    fn matrix(&self) -> PathBuf { self.root.join("matrix.bin") }
    fn meta(&self) -> PathBuf { self.root.join("meta.json") }
}

fn open(path: &Path) -> Result<File> {
    if !path.exists() {
        return Err(Error::MissingInput(path.to_path_buf()));
    }
    Ok(File::open(path)?)
}

pub fn save_matrix(paths: &MatrixPaths, matrix: &FrequencyMatrix, analyzer: Analyzer) -> Result<()> {
    create_dir_all(&paths.root)?;
    let mut f = File::create(paths.matrix())?;
    let bytes = bincode::serialize(matrix)?;
    f.write_all(&bytes)?;
    let meta = MetaFile {
        num_docs: matrix.len(),
        num_terms: matrix.vocabulary().len(),
        created_at: now_rfc3339(),
        version: SNAPSHOT_VERSION,
        analyzer,
    };
    save_meta(paths, &meta)
}

/// Load a snapshot together with the analyzer its terms were built with.
pub fn load_matrix(paths: &MatrixPaths) -> Result<(FrequencyMatrix, Analyzer)> {
    let meta = load_meta(paths)?;
    if meta.version != SNAPSHOT_VERSION {
        return Err(Error::UnsupportedSnapshot { found: meta.version, expected: SNAPSHOT_VERSION });
    }
    let mut f = open(&paths.matrix())?;
    let mut buf = Vec::new();
    f.read_to_end(&mut buf)?;
    let matrix: FrequencyMatrix = bincode::deserialize(&buf)?;
    tracing::info!(
        num_docs = matrix.len(),
        stem = meta.analyzer.stem,
        created_at = %meta.created_at,
        "loaded matrix snapshot"
    );
    Ok((matrix, meta.analyzer))
}

pub fn save_meta(paths: &MatrixPaths, meta: &MetaFile) -> Result<()> {
    create_dir_all(&paths.root)?;
    let mut f = File::create(paths.meta())?;
    let json = serde_json::to_string_pretty(meta)?;
    f.write_all(json.as_bytes())?;
    Ok(())
}

pub fn load_meta(paths: &MatrixPaths) -> Result<MetaFile> {
    let mut f = open(&paths.meta())?;
    let mut buf = String::new();
    f.read_to_string(&mut buf)?;
    Ok(serde_json::from_str(&buf)?)
}

/// Write the matrix as CSV: an `"id"` column then one column per vocabulary term,
/// every field quoted.
pub fn write_frequency_matrix_csv<W: Write>(writer: W, matrix: &FrequencyMatrix) -> Result<()> {
    let mut w = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Always)
        .from_writer(writer);
    let mut header = Vec::with_capacity(matrix.vocabulary().len() + 1);
    header.push("id");
    header.extend(matrix.vocabulary().iter().map(String::as_str));
    w.write_record(&header)?;

    for id in matrix.order() {
        let vector = matrix.get(id).ok_or_else(|| Error::UnknownDocument(id.clone()))?;
        let mut row = Vec::with_capacity(header.len());
        row.push(id.clone());
        for term in matrix.vocabulary() {
            row.push(vector.get(term).copied().unwrap_or(0).to_string());
        }
        w.write_record(&row)?;
    }
    w.flush()?;
    Ok(())
}

pub fn export_frequency_matrix_csv(path: &Path, matrix: &FrequencyMatrix) -> Result<()> {
    write_frequency_matrix_csv(File::create(path)?, matrix)?;
    tracing::info!(path = %path.display(), "exported frequency matrix");
    Ok(())
}

/// One `<clusterId> <documentId>` line per membership, clusters in id order.
pub fn write_clustering<W: Write>(mut writer: W, clustering: &Clustering) -> Result<()> {
    for (cluster_id, members) in clustering.iter() {
        for doc in members {
            writeln!(writer, "{cluster_id} {doc}")?;
        }
    }
    writer.flush()?;
    Ok(())
}

pub fn export_clustering(path: &Path, clustering: &Clustering) -> Result<()> {
    write_clustering(BufWriter::new(File::create(path)?), clustering)?;
    tracing::info!(path = %path.display(), clusters = clustering.len(), "exported clustering");
    Ok(())
}

/// One `<clusterId> <documentId>` line per cluster.
pub fn export_seeds(path: &Path, seeds: &ClusterSeeds) -> Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    for (cluster_id, doc) in seeds {
        writeln!(w, "{cluster_id} {doc}")?;
    }
    w.flush()?;
    tracing::info!(path = %path.display(), seeds = seeds.len(), "exported seeds");
    Ok(())
}

fn parse_error(source: &str, line_number: usize, line: &str, reason: &'static str) -> Error {
    Error::Parse { path: source.to_string(), line_number, line: line.to_string(), reason }
}

fn parse_cluster_id(source: &str, line_number: usize, line: &str, field: &str) -> Result<ClusterId> {
    match field.parse::<ClusterId>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(parse_error(source, line_number, line, "cluster id is not a positive integer")),
    }
}

/// Parse `<clusterId> <documentId>` lines. Blank lines are skipped; anything
/// else malformed fails the whole read. `source` names the input in errors.
pub fn read_clustering<R: BufRead>(reader: R, source: &str) -> Result<Clustering> {
    let mut clustering = Clustering::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let line_number = idx + 1;
        if line.trim().is_empty() { continue; }
        let fields: Vec<&str> = line.split(' ').collect();
        let [cluster_field, doc] = fields.as_slice() else {
            return Err(parse_error(source, line_number, &line, "expected `<clusterId> <documentId>`"));
        };
        if doc.is_empty() {
            return Err(parse_error(source, line_number, &line, "empty document id"));
        }
        let cluster_id = parse_cluster_id(source, line_number, &line, cluster_field)?;
        clustering
            .assign(cluster_id, *doc)
            .map_err(|_| parse_error(source, line_number, &line, "document already assigned to a cluster"))?;
    }
    Ok(clustering)
}

pub fn import_clustering(path: &Path) -> Result<Clustering> {
    let clustering = read_clustering(BufReader::new(open(path)?), &path.display().to_string())?;
    tracing::info!(
        path = %path.display(),
        clusters = clustering.len(),
        documents = clustering.document_count(),
        "imported clustering"
    );
    Ok(clustering)
}

/// Parse `<clusterId>#<themeText>` lines. Only the first `#` separates.
pub fn read_themes<R: BufRead>(reader: R, source: &str) -> Result<BTreeMap<ClusterId, String>> {
    let mut themes = BTreeMap::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let line_number = idx + 1;
        if line.trim().is_empty() { continue; }
        let Some((cluster_field, text)) = line.split_once('#') else {
            return Err(parse_error(source, line_number, &line, "expected `<clusterId>#<themeText>`"));
        };
        let cluster_id = parse_cluster_id(source, line_number, &line, cluster_field)?;
        themes.insert(cluster_id, text.to_string());
    }
    Ok(themes)
}

pub fn import_themes(path: &Path) -> Result<BTreeMap<ClusterId, String>> {
    let themes = read_themes(BufReader::new(open(path)?), &path.display().to_string())?;
    tracing::info!(path = %path.display(), themes = themes.len(), "imported cluster themes");
    Ok(themes)
}
