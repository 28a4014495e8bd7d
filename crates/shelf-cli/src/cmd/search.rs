//! `shelf search` — hybrid search over the document repository.
//!
//! Lexical substring ranking always runs; the TF-IDF semantic layer runs
//! unless disabled by config or `--lexical`, and is fitted from the full
//! corpus before the query executes.

use clap::Args;
use std::io::Write;
use std::path::Path;

use shelf_core::config::load_project_config;
use shelf_core::db::query::DocumentFilter;
use shelf_search::fusion::hybrid::{SearchResponse, fit_from_repository, hybrid_search};
use shelf_search::semantic::SemanticIndex;
use tracing::{debug, warn};

use crate::output::{OutputMode, render};

#[derive(Args, Debug)]
#[command(
    about = "Search documents with hybrid lexical + semantic ranking",
    long_about = "Search documents using hybrid ranking: field-weighted substring relevance \
                  fused with TF-IDF cosine similarity. Omit the query to browse by filters.",
    after_help = "EXAMPLES:\n    # Hybrid search\n    shelf search \"scholarship scheme\"\n\n\
                  # Filtered search\n    shelf search scholarship --doc-type Policy --category \"Higher Education\"\n\n\
                  # Lexical-only ranking\n    shelf search scholarship --lexical\n\n\
                  # Machine-readable output\n    shelf search scholarship --json"
)]
pub struct SearchArgs {
    /// Search query; omit to browse by filters alone.
    pub query: Option<String>,

    /// Filter by document type (exact match).
    #[arg(long = "doc-type")]
    pub document_type: Option<String>,

    /// Filter by category (exact match).
    #[arg(long)]
    pub category: Option<String>,

    /// Filter by department (exact match).
    #[arg(long)]
    pub department: Option<String>,

    /// Semantic results to keep (defaults to the configured top_k).
    #[arg(short = 'n', long)]
    pub top_k: Option<usize>,

    /// Skip the semantic layer; rank by substring relevance only.
    #[arg(long)]
    pub lexical: bool,
}

/// Execute `shelf search [query]`.
///
/// # Errors
///
/// Returns an error if the repository is missing or the lexical query
/// fails; semantic-layer failures degrade to lexical-only results.
pub fn run_search(
    args: &SearchArgs,
    output: OutputMode,
    project_root: &Path,
) -> anyhow::Result<()> {
    let repo = super::open_existing_repository(project_root, output)?;
    let cfg = load_project_config(project_root).unwrap_or_default();

    let filter = DocumentFilter {
        document_type: args.document_type.clone(),
        category: args.category.clone(),
        department: args.department.clone(),
        ..Default::default()
    };
    let top_k = args.top_k.unwrap_or(cfg.search.top_k);

    let index = (cfg.search.semantic && !args.lexical).then(|| SemanticIndex::new(&cfg.search));
    if let Some(ref index) = index {
        match fit_from_repository(index, &repo) {
            Ok(count) => debug!(documents = count, "semantic index fitted"),
            Err(e) => warn!("semantic index unavailable, continuing lexical-only: {e}"),
        }
    }

    let query = args
        .query
        .as_deref()
        .map(str::trim)
        .filter(|q| !q.is_empty());

    let response = hybrid_search(&repo, index.as_ref(), query, &filter, top_k)?;

    render(output, &response, |resp, w| render_search_human(resp, w))
}

/// Render search results in human-readable format.
fn render_search_human(response: &SearchResponse, w: &mut dyn Write) -> std::io::Result<()> {
    if response.results.is_empty() {
        writeln!(w, "No documents found")?;
        return Ok(());
    }

    writeln!(w, "{} document(s):", response.count)?;
    writeln!(w, "{:-<90}", "")?;
    writeln!(w, "{:>6}  {:>10}  {:>8}  TITLE", "ID", "SIMILARITY", "REL")?;
    writeln!(w, "{:-<90}", "")?;

    for record in &response.results {
        let similarity = record
            .similarity_score
            .map_or_else(|| "-".to_string(), |score| format!("{score:.4}"));
        let relevance = record
            .relevance
            .map_or_else(|| "-".to_string(), |rel| rel.to_string());
        writeln!(
            w,
            "{:>6}  {:>10}  {:>8}  {}",
            record.id, similarity, relevance, record.title
        )?;
    }

    Ok(())
}
