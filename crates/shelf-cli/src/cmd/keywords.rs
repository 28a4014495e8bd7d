//! `shelf keywords` — precise keyword lookup through the keyword side table.
//!
//! Unlike `shelf search`, this matches whole keywords exactly (as derived
//! from each document's comma-separated keyword list) and ranks by how many
//! of the requested keywords a document carries.

use clap::Args;
use serde::Serialize;
use std::io::Write;
use std::path::Path;

use shelf_core::db::query;
use shelf_core::model::Document;

use crate::output::{OutputMode, render};

#[derive(Args, Debug)]
#[command(
    about = "Find documents by exact keyword match",
    after_help = "EXAMPLES:\n    # Documents tagged with either keyword, best-tagged first\n    shelf keywords \"UGC,regulation\""
)]
pub struct KeywordsArgs {
    /// Comma-separated keyword list.
    pub keywords: String,
}

#[derive(Debug, Serialize)]
struct KeywordRow {
    keyword_matches: i64,
    #[serde(flatten)]
    document: Document,
}

#[derive(Debug, Serialize)]
struct KeywordsOutput {
    count: usize,
    results: Vec<KeywordRow>,
}

/// Execute `shelf keywords <list>`.
///
/// # Errors
///
/// Returns an error if the repository is missing or the query fails.
pub fn run_keywords(
    args: &KeywordsArgs,
    output: OutputMode,
    project_root: &Path,
) -> anyhow::Result<()> {
    let repo = super::open_existing_repository(project_root, output)?;

    let hits = query::keyword_search(repo.connection(), &args.keywords)?;
    let results: Vec<KeywordRow> = hits
        .into_iter()
        .map(|hit| KeywordRow {
            keyword_matches: hit.keyword_matches,
            document: hit.document,
        })
        .collect();

    let result = KeywordsOutput {
        count: results.len(),
        results,
    };

    render(output, &result, |out, w| {
        if out.results.is_empty() {
            return writeln!(w, "No documents found");
        }
        writeln!(w, "{:>6}  {:>7}  TITLE", "ID", "MATCHES")?;
        for row in &out.results {
            writeln!(
                w,
                "{:>6}  {:>7}  {}",
                row.document.id, row.keyword_matches, row.document.title
            )?;
        }
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct Wrapper {
        #[command(flatten)]
        args: KeywordsArgs,
    }

    #[test]
    fn keywords_args_parses_list() {
        let w = Wrapper::parse_from(["test", "UGC,regulation"]);
        assert_eq!(w.args.keywords, "UGC,regulation");
    }
}
