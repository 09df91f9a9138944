use crate::corpus::CorpusDoc;
use crate::tokenizer::Analyzer;
use crate::{ClusterId, DocumentId, Error, Result, TermVector, Vocabulary};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Term vectors of a corpus, in corpus order, with their shared vocabulary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FrequencyMatrix {
    order: Vec<DocumentId>,
    vectors: HashMap<DocumentId, TermVector>,
    vocabulary: Vocabulary,
}

impl FrequencyMatrix {
    pub fn new() -> Self { Self::default() }

    pub fn from_documents(docs: &[CorpusDoc], analyzer: &Analyzer) -> Result<Self> {
        let mut matrix = Self::new();
        for doc in docs {
            matrix.insert(doc.id.clone(), analyzer.term_vector(&doc.text))?;
        }
        let empty = matrix.vectors.values().filter(|v| v.is_empty()).count();
        tracing::info!(
            num_docs = matrix.len(),
            num_terms = matrix.vocabulary.len(),
            empty,
            "built frequency matrix"
        );
        Ok(matrix)
    }

    /// Append a document; its terms join the vocabulary.
    pub fn insert(&mut self, id: DocumentId, vector: TermVector) -> Result<()> {
        if self.vectors.contains_key(&id) {
            return Err(Error::DuplicateDocument(id));
        }
        self.vocabulary.extend(vector.keys().cloned());
        self.order.push(id.clone());
        self.vectors.insert(id, vector);
        Ok(())
    }

    /// Document ids in insertion order.
    pub fn order(&self) -> &[DocumentId] { &self.order }

    pub fn vectors(&self) -> &HashMap<DocumentId, TermVector> { &self.vectors }

    pub fn vocabulary(&self) -> &Vocabulary { &self.vocabulary }

    pub fn get(&self, id: &str) -> Option<&TermVector> { self.vectors.get(id) }

    pub fn len(&self) -> usize { self.order.len() }

    pub fn is_empty(&self) -> bool { self.order.is_empty() }
}

/// Term vectors of ground-truth cluster themes, over their own vocabulary.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ThemeVectors {
    pub vectors: BTreeMap<ClusterId, TermVector>,
    pub vocabulary: Vocabulary,
}

impl ThemeVectors {
    pub fn from_themes(themes: &BTreeMap<ClusterId, String>, analyzer: &Analyzer) -> Self {
        let mut out = Self::default();
        for (cluster_id, text) in themes {
            let vector = analyzer.term_vector(text);
            out.vocabulary.extend(vector.keys().cloned());
            out.vectors.insert(*cluster_id, vector);
        }
        tracing::info!(themes = out.vectors.len(), num_terms = out.vocabulary.len(), "built theme vectors");
        out
    }
}
