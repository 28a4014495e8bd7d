//! Integration tests for hybrid search quality over a small gold corpus.

use shelf_core::db::query::DocumentFilter;
use shelf_core::db::repository::{DocumentRepository, SqliteRepository};
use shelf_core::model::NewDocument;
use shelf_search::fusion::hybrid::{fit_from_repository, hybrid_search};
use shelf_search::semantic::SemanticIndex;

fn new_doc(title: &str, content: &str, keywords: &str, priority: i64) -> NewDocument {
    NewDocument {
        title: title.into(),
        content: content.into(),
        document_type: "Policy".into(),
        category: Some("Higher Education".into()),
        sub_category: None,
        department: Some("Ministry of Education".into()),
        status: "Active".into(),
        jurisdiction: Some("National".into()),
        keywords: keywords.into(),
        document_url: None,
        search_priority: priority,
        full_text_content: None,
    }
}

/// The three-document corpus from the ranking scenarios: one title match,
/// one content match, one keyword match.
fn gold_repo() -> SqliteRepository {
    let repo = SqliteRepository::open_in_memory().expect("open in-memory repository");
    repo.insert(&new_doc(
        "National Education Policy 2020",
        "Comprehensive framework for school and higher education reform",
        "NEP, education",
        1,
    ))
    .expect("insert doc A");
    repo.insert(&new_doc(
        "Annual Department Report",
        "This year the scholarship scheme reached twice as many students",
        "report",
        1,
    ))
    .expect("insert doc B");
    repo.insert(&new_doc(
        "Commission Notification",
        "Updates to governance norms for universities",
        "UGC,regulation",
        1,
    ))
    .expect("insert doc C");
    repo
}

#[test]
fn scholarship_query_matches_only_the_content_document() {
    let repo = gold_repo();

    let hits = repo
        .search_documents(Some("scholarship"), &DocumentFilter::default())
        .expect("lexical search");

    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].document.title, "Annual Department Report");
    // Content match: base weight 2 × search_priority 1.
    assert_eq!(hits[0].relevance, 2);
}

#[test]
fn scholarship_relevance_scales_with_priority() {
    let repo = SqliteRepository::open_in_memory().expect("open");
    repo.insert(&new_doc(
        "Annual Department Report",
        "The scholarship scheme was expanded",
        "",
        4,
    ))
    .expect("insert");

    let hits = repo
        .search_documents(Some("scholarship"), &DocumentFilter::default())
        .expect("lexical search");
    assert_eq!(hits[0].relevance, 8);
}

#[test]
fn ugc_regulation_query_ranks_the_keyword_document_first() {
    let repo = gold_repo();
    let index = SemanticIndex::default();
    fit_from_repository(&index, &repo).expect("fit");

    let corpus = repo.all_documents().expect("corpus");
    let results = index
        .search("UGC regulation", &corpus, 5)
        .expect("semantic search");

    assert!(!results.is_empty());
    assert_eq!(results[0].document.title, "Commission Notification");
}

#[test]
fn title_match_ranks_strictly_above_content_match() {
    let repo = SqliteRepository::open_in_memory().expect("open");
    let title_match = repo
        .insert(&new_doc("Scholarship Portal", "How to apply online", "", 1))
        .expect("insert");
    let content_match = repo
        .insert(&new_doc(
            "Application Guide",
            "Covers the scholarship workflow end to end",
            "",
            1,
        ))
        .expect("insert");

    let hits = repo
        .search_documents(Some("scholarship"), &DocumentFilter::default())
        .expect("lexical search");

    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0].document.id, title_match);
    assert_eq!(hits[1].document.id, content_match);
    assert!(hits[0].relevance > hits[1].relevance);
}

#[test]
fn fitting_twice_yields_identical_similarity_scores() {
    let repo = gold_repo();
    let index = SemanticIndex::default();
    let corpus = repo.all_documents().expect("corpus");

    index.fit_documents(&corpus);
    let first: Vec<(i64, f32)> = index
        .search("education policy reform", &corpus, 5)
        .expect("search")
        .into_iter()
        .filter_map(|r| r.similarity_score.map(|s| (r.document.id, s)))
        .collect();

    index.fit_documents(&corpus);
    let second: Vec<(i64, f32)> = index
        .search("education policy reform", &corpus, 5)
        .expect("search")
        .into_iter()
        .filter_map(|r| r.similarity_score.map(|s| (r.document.id, s)))
        .collect();

    assert_eq!(first, second);
    assert!(!first.is_empty());
}

#[test]
fn similarity_scores_are_bounded_for_every_query() {
    let repo = gold_repo();
    let index = SemanticIndex::default();
    let corpus = repo.all_documents().expect("corpus");

    for query in [
        "education",
        "scholarship scheme students",
        "UGC regulation universities",
        "national policy framework",
    ] {
        for result in index.search(query, &corpus, 5).expect("search") {
            let score = result.similarity_score.expect("semantic score");
            assert!(
                (0.0..=1.0).contains(&score),
                "score {score} out of bounds for query '{query}'"
            );
        }
    }
}

#[test]
fn hybrid_results_contain_each_document_once() {
    let repo = gold_repo();
    let index = SemanticIndex::default();

    let response = hybrid_search(
        &repo,
        Some(&index),
        Some("education"),
        &DocumentFilter::default(),
        5,
    )
    .expect("hybrid search");

    let mut ids: Vec<i64> = response.results.iter().map(|r| r.id).collect();
    let before = ids.len();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), before, "fused output contains a duplicate id");
    assert_eq!(response.count, before);
}

#[test]
fn duplicate_across_paths_keeps_the_semantic_score() {
    let repo = gold_repo();
    let index = SemanticIndex::default();

    // "scholarship scheme" matches document B lexically (content substring)
    // and semantically (shared terms), so both paths emit the same id.
    let response = hybrid_search(
        &repo,
        Some(&index),
        Some("scholarship scheme"),
        &DocumentFilter::default(),
        5,
    )
    .expect("hybrid search");

    let matches: Vec<_> = response
        .results
        .iter()
        .filter(|r| r.title == "Annual Department Report")
        .collect();
    assert_eq!(matches.len(), 1);
    let score = matches[0].similarity_score.expect("semantic score kept");
    assert!(score > 0.001);
}

#[test]
fn filters_constrain_the_lexical_path() {
    let repo = gold_repo();
    let index = SemanticIndex::default();

    let filter = DocumentFilter {
        document_type: Some("Circular".into()),
        ..Default::default()
    };
    let response = hybrid_search(&repo, Some(&index), None, &filter, 5).expect("hybrid search");
    assert_eq!(response.count, 0);
}
