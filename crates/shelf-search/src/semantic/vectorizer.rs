//! TF-IDF vectorization over a document corpus.
//!
//! The vocabulary keeps the most frequent uni- and bi-grams across the
//! corpus after normalization, capped at `max_features`. Term weights are
//! standard TF-IDF with smoothed, log-scaled inverse document frequency, so
//! a term present in every document still carries a small positive weight
//! and no division by zero can occur.

use std::collections::{BTreeSet, HashMap};

use shelf_core::model::Document;
use tracing::{debug, warn};

use crate::normalize::{is_index_token, normalize};

/// Default vocabulary cap, matching the search config default.
pub const DEFAULT_MAX_FEATURES: usize = 1000;

/// Builds [`FittedIndex`] values from a corpus snapshot.
#[derive(Debug, Clone)]
pub struct TfidfVectorizer {
    max_features: usize,
}

/// A fitted vocabulary and weight matrix, coupled to its corpus snapshot.
///
/// Row `i` of the matrix corresponds to `corpus()[i]`; the two are always
/// length-consistent. A `FittedIndex` is immutable once built — refitting
/// produces a new value.
#[derive(Debug, Clone)]
pub struct FittedIndex {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f32>,
    matrix: Vec<Vec<f32>>,
    corpus: Vec<Document>,
}

impl TfidfVectorizer {
    #[must_use]
    pub const fn new(max_features: usize) -> Self {
        Self { max_features }
    }

    /// Fit a vocabulary and weight matrix over `documents`.
    ///
    /// Documents without indexable text are skipped with a warning; they do
    /// not abort the fit. Returns `None` when nothing survives — an empty
    /// corpus is a state, not an error — and callers must treat `None` as
    /// "not fitted".
    ///
    /// Fitting is deterministic: the same corpus always yields the same
    /// vocabulary, idf table, and matrix.
    #[must_use]
    pub fn fit(&self, documents: &[Document]) -> Option<FittedIndex> {
        let mut corpus = Vec::with_capacity(documents.len());
        let mut doc_tokens = Vec::with_capacity(documents.len());

        for document in documents {
            if !document.has_index_text() {
                warn!(
                    id = document.id,
                    "skipping document without title or content text"
                );
                continue;
            }
            doc_tokens.push(ngram_tokens(&document.index_text()));
            corpus.push(document.clone());
        }

        if corpus.is_empty() {
            debug!("no documents survived preprocessing; index stays unfitted");
            return None;
        }

        let vocabulary = build_vocabulary(&doc_tokens, self.max_features);
        if vocabulary.is_empty() {
            debug!("empty vocabulary after normalization; index stays unfitted");
            return None;
        }

        let idf = build_idf(&doc_tokens, &vocabulary);

        let matrix = doc_tokens
            .iter()
            .map(|tokens| weigh(tokens, &vocabulary, &idf))
            .collect();

        Some(FittedIndex {
            vocabulary,
            idf,
            matrix,
            corpus,
        })
    }
}

impl Default for TfidfVectorizer {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_FEATURES)
    }
}

impl FittedIndex {
    /// Vectorize a query with the fitted vocabulary and idf table.
    ///
    /// Terms outside the vocabulary contribute nothing; a query sharing no
    /// terms with the corpus yields the zero vector.
    #[must_use]
    pub fn vectorize_query(&self, text: &str) -> Vec<f32> {
        weigh(&ngram_tokens(text), &self.vocabulary, &self.idf)
    }

    /// The corpus snapshot this index was fitted against.
    #[must_use]
    pub fn corpus(&self) -> &[Document] {
        &self.corpus
    }

    /// TF-IDF rows, one per corpus document.
    #[must_use]
    pub fn matrix(&self) -> &[Vec<f32>] {
        &self.matrix
    }

    /// Number of vocabulary terms (matrix columns).
    #[must_use]
    pub fn vocabulary_len(&self) -> usize {
        self.vocabulary.len()
    }
}

/// Uni- and bi-grams of the normalized text, with the stopword filter
/// applied a second time (harmless redundancy after [`normalize`]).
fn ngram_tokens(text: &str) -> Vec<String> {
    let normalized = normalize(text);
    let unigrams: Vec<&str> = normalized
        .split_whitespace()
        .filter(|token| is_index_token(token))
        .collect();

    let mut grams: Vec<String> = unigrams.iter().map(|&t| t.to_owned()).collect();
    grams.extend(unigrams.windows(2).map(|pair| pair.join(" ")));
    grams
}

/// Top `max_features` terms by corpus frequency, ties broken
/// lexicographically; column indices assigned in that order.
fn build_vocabulary(doc_tokens: &[Vec<String>], max_features: usize) -> HashMap<String, usize> {
    let mut corpus_freq: HashMap<&str, u64> = HashMap::new();
    for tokens in doc_tokens {
        for token in tokens {
            *corpus_freq.entry(token).or_insert(0) += 1;
        }
    }

    let mut ranked: Vec<(&str, u64)> = corpus_freq.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked.truncate(max_features);

    ranked
        .into_iter()
        .enumerate()
        .map(|(column, (term, _))| (term.to_owned(), column))
        .collect()
}

/// Smoothed log idf per vocabulary column:
/// `ln((1 + docs) / (1 + df)) + 1`.
fn build_idf(doc_tokens: &[Vec<String>], vocabulary: &HashMap<String, usize>) -> Vec<f32> {
    let mut doc_freq = vec![0_u64; vocabulary.len()];
    for tokens in doc_tokens {
        let distinct: BTreeSet<&str> = tokens.iter().map(String::as_str).collect();
        for term in distinct {
            if let Some(&column) = vocabulary.get(term) {
                doc_freq[column] += 1;
            }
        }
    }

    let docs = doc_tokens.len() as f32;
    doc_freq
        .into_iter()
        .map(|df| ((1.0 + docs) / (1.0 + df as f32)).ln() + 1.0)
        .collect()
}

/// Term-frequency counts over the vocabulary, weighted by idf.
fn weigh(tokens: &[String], vocabulary: &HashMap<String, usize>, idf: &[f32]) -> Vec<f32> {
    let mut vector = vec![0.0_f32; vocabulary.len()];
    for token in tokens {
        if let Some(&column) = vocabulary.get(token.as_str()) {
            vector[column] += 1.0;
        }
    }
    for (column, weight) in vector.iter_mut().enumerate() {
        *weight *= idf[column];
    }
    vector
}
