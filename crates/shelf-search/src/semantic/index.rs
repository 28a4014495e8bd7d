//! Shared semantic index with an explicit fitted/unfitted state machine.
//!
//! The index is a read-mostly resource: concurrent queries take the shared
//! lock, (re)fitting takes the exclusive lock and swaps the whole fitted
//! value in one assignment. There is no partially-fitted state — readers
//! observe either the previous snapshot or the new one.

use std::sync::RwLock;

use anyhow::Result;
use shelf_core::config::SearchConfig;
use shelf_core::model::Document;
use thiserror::Error;
use tracing::{debug, info, warn};

use super::search::rank_rows;
use super::vectorizer::{FittedIndex, TfidfVectorizer};
use crate::fusion::ScoredResult;
use crate::normalize::normalize;

/// Contract violations on the semantic index API.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum IndexError {
    #[error("top_k must be at least 1")]
    InvalidTopK,
}

enum IndexState {
    Unfitted,
    Fitted(FittedIndex),
}

/// TF-IDF semantic index guarding its state behind a read-write lock.
pub struct SemanticIndex {
    vectorizer: TfidfVectorizer,
    similarity_floor: f32,
    state: RwLock<IndexState>,
}

impl SemanticIndex {
    /// Build an unfitted index from the search configuration.
    #[must_use]
    pub fn new(config: &SearchConfig) -> Self {
        Self {
            vectorizer: TfidfVectorizer::new(config.max_features),
            similarity_floor: config.similarity_floor as f32,
            state: RwLock::new(IndexState::Unfitted),
        }
    }

    /// Whether a fitted vocabulary and matrix are currently installed.
    #[must_use]
    pub fn is_fitted(&self) -> bool {
        match self.state.read() {
            Ok(guard) => matches!(*guard, IndexState::Fitted(_)),
            Err(_) => false,
        }
    }

    /// Fit (or refit) the index from a corpus snapshot.
    ///
    /// Replaces vocabulary, matrix, and snapshot atomically. An empty or
    /// fully malformed corpus leaves the index unfitted; that is a state,
    /// not an error. Returns the number of documents indexed.
    pub fn fit_documents(&self, documents: &[Document]) -> usize {
        let fitted = self.vectorizer.fit(documents);

        let Ok(mut guard) = self.state.write() else {
            warn!("semantic index lock poisoned; dropping refit");
            return 0;
        };

        match fitted {
            Some(index) => {
                let count = index.corpus().len();
                info!(documents = count, "semantic index fitted");
                *guard = IndexState::Fitted(index);
                count
            }
            None => {
                info!("no indexable documents; semantic index unfitted");
                *guard = IndexState::Unfitted;
                0
            }
        }
    }

    /// Semantic search over the fitted corpus snapshot.
    ///
    /// If the index is unfitted it is lazily fitted from `corpus` first;
    /// when fitting still fails the result is empty, not an error. An empty
    /// query — or one that normalizes to nothing — yields an empty result
    /// regardless of the corpus.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::InvalidTopK`] when `top_k` is zero; all other
    /// internal failures degrade to an empty result set.
    pub fn search(
        &self,
        query: &str,
        corpus: &[Document],
        top_k: usize,
    ) -> Result<Vec<ScoredResult>> {
        if top_k == 0 {
            return Err(IndexError::InvalidTopK.into());
        }

        if !self.is_fitted() {
            debug!("semantic index not fitted; fitting from supplied corpus");
            self.fit_documents(corpus);
        }

        if query.trim().is_empty() {
            return Ok(Vec::new());
        }

        let processed = normalize(query);
        if processed.is_empty() {
            debug!("query normalized to nothing; returning empty results");
            return Ok(Vec::new());
        }

        let Ok(guard) = self.state.read() else {
            warn!("semantic index lock poisoned; returning empty results");
            return Ok(Vec::new());
        };

        let IndexState::Fitted(ref index) = *guard else {
            return Ok(Vec::new());
        };

        let query_vector = index.vectorize_query(&processed);
        let hits = rank_rows(index, &query_vector, top_k, self.similarity_floor);

        Ok(hits
            .into_iter()
            .map(|hit| ScoredResult {
                document: index.corpus()[hit.row].clone(),
                relevance: None,
                similarity_score: Some(hit.score),
            })
            .collect())
    }
}

impl Default for SemanticIndex {
    fn default() -> Self {
        Self::new(&SearchConfig::default())
    }
}
