use crate::TermVector;
use lazy_static::lazy_static;
use regex::Regex;
use rust_stemmers::{Algorithm, Stemmer};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use unicode_normalization::UnicodeNormalization;

lazy_static! {
    static ref RE: Regex = Regex::new(r"(?u)[\p{L}\p{N}][\p{L}\p{N}_']*").expect("valid regex");
    static ref STEMMER: Stemmer = Stemmer::create(Algorithm::English);
    static ref STOPWORDS: HashSet<&'static str> = {
        let words: &[&str] = &[
            "a","an","and","are","as","at","be","but","by","for","if","in","into","is","it",
            "no","not","of","on","or","such","that","the","their","then","there","these",
            "they","this","to","was","will","with"
        ];
        words.iter().copied().collect()
    };
}

fn is_stopword(token: &str) -> bool { STOPWORDS.contains(token) }

/// Split text into (term, position) after NFKC normalization, lowercasing and stopword removal.
/// Positions count every matched word, stopwords included.
pub fn tokenize(text: &str) -> Vec<(String, usize)> {
    let normalized = text.nfkc().collect::<String>().to_lowercase();
    let mut tokens = Vec::new();
    for (pos, mat) in RE.find_iter(&normalized).enumerate() {
        let token = mat.as_str();
        if is_stopword(token) { continue; }
        tokens.push((token.to_string(), pos));
    }
    tokens
}

/// Turns raw text into term vectors.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Analyzer {
    /// Reduce terms to their English Snowball stem.
    pub stem: bool,
}

impl Analyzer {
    pub fn new(stem: bool) -> Self { Self { stem } }

    pub fn terms(&self, text: &str) -> Vec<String> {
        tokenize(text)
            .into_iter()
            .map(|(term, _pos)| if self.stem { STEMMER.stem(&term).into_owned() } else { term })
            .collect()
    }

    pub fn term_vector(&self, text: &str) -> TermVector {
        let mut tf = TermVector::new();
        for term in self.terms(text) {
            *tf.entry(term).or_insert(0) += 1;
        }
        tf
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_tokenize() {
        let t = tokenize("Earthquake hits the coast, earthquake!");
        let words: Vec<&str> = t.iter().map(|(w, _)| w.as_str()).collect();
        assert_eq!(words, vec!["earthquake", "hits", "coast", "earthquake"]);
        assert_eq!(t[2].1, 3);
    }

    #[test]
    fn counts_repeated_terms() {
        let tf = Analyzer::default().term_vector("Goal goal GOAL for Spain");
        assert_eq!(tf.get("goal"), Some(&3));
        assert_eq!(tf.get("spain"), Some(&1));
        assert!(!tf.contains_key("for"));
    }
}
