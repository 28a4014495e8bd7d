//! Hybrid search orchestration across the lexical and semantic layers.
//!
//! The orchestrator intentionally degrades gracefully:
//! - lexical search always runs, and its failure surfaces (primary path)
//! - semantic search runs only for a non-empty query, and any failure in
//!   that layer falls back to lexical-only results with a warning

use anyhow::{Result, bail};
use serde::Serialize;
use shelf_core::db::query::DocumentFilter;
use shelf_core::db::repository::DocumentRepository;
use shelf_core::model::Document;
use tracing::{debug, warn};

use super::{ScoredResult, fuse};
use crate::semantic::SemanticIndex;

/// One fused search hit, flattened for serialization.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchRecord {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub document_type: String,
    pub category: Option<String>,
    pub sub_category: Option<String>,
    pub department: Option<String>,
    pub keywords: String,
    pub document_url: Option<String>,
    pub search_priority: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relevance: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub similarity_score: Option<f32>,
}

/// Envelope returned to the request handler.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResponse {
    pub success: bool,
    pub results: Vec<SearchRecord>,
    pub count: usize,
}

/// Run hybrid search and fuse both result sets into one ranked list.
///
/// Lexical search always runs against the repository; semantic search runs
/// only when an index is provided and `query` is non-empty, over the
/// repository's full corpus (the index lazily fits itself from that corpus
/// when cold). Structured filters bind the lexical path only.
///
/// # Errors
///
/// Returns an error when `top_k` is zero or the lexical repository query
/// fails. Semantic-layer failures degrade to lexical-only results.
pub fn hybrid_search(
    repo: &dyn DocumentRepository,
    index: Option<&SemanticIndex>,
    query: Option<&str>,
    filter: &DocumentFilter,
    top_k: usize,
) -> Result<SearchResponse> {
    if top_k == 0 {
        bail!("top_k must be at least 1");
    }

    let lexical_hits = repo.search_documents(query, filter)?;
    debug!(count = lexical_hits.len(), "lexical search complete");

    let lexical: Vec<ScoredResult> = lexical_hits
        .into_iter()
        .map(|hit| ScoredResult {
            document: hit.document,
            relevance: Some(hit.relevance),
            similarity_score: None,
        })
        .collect();

    let semantic = match (index, query.map(str::trim).filter(|q| !q.is_empty())) {
        (Some(index), Some(q)) => semantic_layer(repo, index, q, top_k),
        _ => Vec::new(),
    };
    debug!(count = semantic.len(), "semantic search complete");

    let fused = fuse(lexical, semantic);
    let results: Vec<SearchRecord> = fused.into_iter().map(to_record).collect();
    let count = results.len();

    Ok(SearchResponse {
        success: true,
        results,
        count,
    })
}

/// Explicit (re)fit entry point, expected to run once at process start.
///
/// # Errors
///
/// Returns an error if the corpus cannot be read from the repository.
pub fn fit_from_repository(index: &SemanticIndex, repo: &dyn DocumentRepository) -> Result<usize> {
    let corpus = repo.all_documents()?;
    Ok(index.fit_documents(&corpus))
}

fn semantic_layer(
    repo: &dyn DocumentRepository,
    index: &SemanticIndex,
    query: &str,
    top_k: usize,
) -> Vec<ScoredResult> {
    let corpus = match repo.all_documents() {
        Ok(corpus) => corpus,
        Err(e) => {
            warn!("corpus unavailable, falling back to lexical-only results: {e}");
            return Vec::new();
        }
    };

    match index.search(query, &corpus, top_k) {
        Ok(results) => results,
        Err(e) => {
            warn!("semantic layer unavailable, falling back to lexical-only results: {e}");
            Vec::new()
        }
    }
}

fn to_record(result: ScoredResult) -> SearchRecord {
    let ScoredResult {
        document:
            Document {
                id,
                title,
                content,
                document_type,
                category,
                sub_category,
                department,
                keywords,
                document_url,
                search_priority,
                ..
            },
        relevance,
        similarity_score,
    } = result;

    SearchRecord {
        id,
        title,
        content,
        document_type,
        category,
        sub_category,
        department,
        keywords,
        document_url,
        search_priority,
        relevance,
        similarity_score,
    }
}
