//! Graceful-degradation tests: every semantic-layer failure falls back to
//! lexical-only results, and only lexical (primary-path) failures surface.

use anyhow::{Result, anyhow};
use shelf_core::db::query::DocumentFilter;
use shelf_core::db::repository::{DocumentRepository, SqliteRepository};
use shelf_core::db::search::LexicalHit;
use shelf_core::model::{Document, NewDocument};
use shelf_search::fusion::hybrid::{fit_from_repository, hybrid_search};
use shelf_search::semantic::SemanticIndex;

/// Repository whose corpus read fails while lexical search still works —
/// models a half-broken backend.
struct CorpusFailsRepo {
    inner: SqliteRepository,
}

impl DocumentRepository for CorpusFailsRepo {
    fn all_documents(&self) -> Result<Vec<Document>> {
        Err(anyhow!("simulated corpus read failure"))
    }

    fn search_documents(
        &self,
        query: Option<&str>,
        filter: &DocumentFilter,
    ) -> Result<Vec<LexicalHit>> {
        self.inner.search_documents(query, filter)
    }

    fn document_by_id(&self, id: i64) -> Result<Option<Document>> {
        self.inner.document_by_id(id)
    }
}

/// Repository that fails outright.
struct BrokenRepo;

impl DocumentRepository for BrokenRepo {
    fn all_documents(&self) -> Result<Vec<Document>> {
        Err(anyhow!("simulated repository failure"))
    }

    fn search_documents(
        &self,
        _query: Option<&str>,
        _filter: &DocumentFilter,
    ) -> Result<Vec<LexicalHit>> {
        Err(anyhow!("simulated repository failure"))
    }

    fn document_by_id(&self, _id: i64) -> Result<Option<Document>> {
        Err(anyhow!("simulated repository failure"))
    }
}

fn seeded_repo() -> SqliteRepository {
    let repo = SqliteRepository::open_in_memory().expect("open in-memory repository");
    repo.insert(&NewDocument {
        title: "Scholarship Portal Guide".into(),
        content: "How to apply for the merit scholarship".into(),
        document_type: "Guide".into(),
        category: None,
        sub_category: None,
        department: None,
        status: "Active".into(),
        jurisdiction: None,
        keywords: "scholarship".into(),
        document_url: None,
        search_priority: 1,
        full_text_content: None,
    })
    .expect("insert");
    repo
}

#[test]
fn empty_corpus_leaves_index_unfitted_and_search_empty() {
    let repo = SqliteRepository::open_in_memory().expect("open in-memory repository");
    let index = SemanticIndex::default();

    let fitted = fit_from_repository(&index, &repo).expect("fit over empty corpus");
    assert_eq!(fitted, 0);
    assert!(!index.is_fitted());

    let response = hybrid_search(
        &repo,
        Some(&index),
        Some("anything"),
        &DocumentFilter::default(),
        5,
    )
    .expect("search over empty corpus");
    assert!(response.success);
    assert_eq!(response.count, 0);
    assert!(response.results.is_empty());
}

#[test]
fn corpus_failure_degrades_to_lexical_only() {
    let repo = CorpusFailsRepo {
        inner: seeded_repo(),
    };
    let index = SemanticIndex::default();

    let response = hybrid_search(
        &repo,
        Some(&index),
        Some("scholarship"),
        &DocumentFilter::default(),
        5,
    )
    .expect("lexical path must survive");

    assert_eq!(response.count, 1);
    assert!(response.results[0].similarity_score.is_none());
    assert!(response.results[0].relevance.is_some());
}

#[test]
fn lexical_failure_surfaces_as_an_error() {
    let index = SemanticIndex::default();

    let result = hybrid_search(
        &BrokenRepo,
        Some(&index),
        Some("scholarship"),
        &DocumentFilter::default(),
        5,
    );
    assert!(result.is_err(), "primary-path failure must propagate");
}

#[test]
fn unfitted_index_with_cold_corpus_returns_empty_semantics() {
    let index = SemanticIndex::default();
    let results = index.search("scholarship", &[], 5).expect("search");
    assert!(results.is_empty());
    assert!(!index.is_fitted());
}

#[test]
fn whitespace_query_never_matches_everything() {
    let repo = seeded_repo();
    let index = SemanticIndex::default();
    fit_from_repository(&index, &repo).expect("fit");

    let corpus = repo.all_documents().expect("corpus");
    for query in ["", " ", "\t\n", "of the and"] {
        let results = index.search(query, &corpus, 5).expect("search");
        assert!(
            results.is_empty(),
            "query {query:?} should yield no semantic results"
        );
    }
}

#[test]
fn malformed_documents_are_skipped_not_fatal() {
    let blank = Document {
        id: 99,
        title: String::new(),
        content: String::new(),
        document_type: "Policy".into(),
        category: None,
        sub_category: None,
        department: None,
        status: "Active".into(),
        jurisdiction: None,
        keywords: "orphan".into(),
        document_url: None,
        search_priority: 1,
        full_text_content: None,
        created_at_us: 0,
    };
    let mut corpus = vec![blank];
    corpus.extend(seeded_repo().all_documents().expect("corpus"));

    let index = SemanticIndex::default();
    assert_eq!(index.fit_documents(&corpus), 1);

    let results = index.search("scholarship", &corpus, 5).expect("search");
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].document.title, "Scholarship Portal Guide");
}
