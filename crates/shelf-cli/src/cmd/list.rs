//! `shelf list` — browse documents with filters.

use clap::Args;
use serde::Serialize;
use std::io::Write;
use std::path::Path;

use shelf_core::db::query::{self, DocumentFilter};
use shelf_core::model::Document;

use crate::output::{OutputMode, render};

#[derive(Args, Debug)]
#[command(about = "List documents, boosted first, then most recent")]
pub struct ListArgs {
    /// Filter by document type (exact match).
    #[arg(long = "doc-type")]
    pub document_type: Option<String>,

    /// Filter by category (exact match).
    #[arg(long)]
    pub category: Option<String>,

    /// Filter by department (exact match).
    #[arg(long)]
    pub department: Option<String>,

    /// Maximum documents to show.
    #[arg(short = 'n', long, default_value = "50")]
    pub limit: u32,

    /// Offset for pagination.
    #[arg(long)]
    pub offset: Option<u32>,
}

#[derive(Debug, Serialize)]
struct ListOutput {
    count: usize,
    documents: Vec<Document>,
}

/// Execute `shelf list`.
///
/// # Errors
///
/// Returns an error if the repository is missing or the query fails.
pub fn run_list(args: &ListArgs, output: OutputMode, project_root: &Path) -> anyhow::Result<()> {
    let repo = super::open_existing_repository(project_root, output)?;

    let filter = DocumentFilter {
        document_type: args.document_type.clone(),
        category: args.category.clone(),
        department: args.department.clone(),
        limit: Some(args.limit),
        offset: args.offset,
    };

    let documents = query::list_documents(repo.connection(), &filter)?;
    let result = ListOutput {
        count: documents.len(),
        documents,
    };

    render(output, &result, |out, w| {
        if out.documents.is_empty() {
            return writeln!(w, "No documents found");
        }
        writeln!(w, "{:>6}  {:<12}  {:>4}  TITLE", "ID", "TYPE", "PRI")?;
        for doc in &out.documents {
            writeln!(
                w,
                "{:>6}  {:<12}  {:>4}  {}",
                doc.id, doc.document_type, doc.search_priority, doc.title
            )?;
        }
        Ok(())
    })
}
