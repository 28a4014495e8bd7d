//! `shelf import` — bulk-load documents from a JSON file.
//!
//! The file holds a JSON array of document records. Entries that fail to
//! parse, or that carry neither title nor content text, are skipped with a
//! warning — one bad record never aborts the import.

use clap::Args;
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;
use shelf_core::model::NewDocument;
use tracing::warn;

use crate::output::{OutputMode, render};

#[derive(Args, Debug)]
#[command(
    about = "Import documents from a JSON file",
    after_help = "EXAMPLES:\n    # Import a document dump\n    shelf import documents.json\n\n    # Machine-readable output\n    shelf import documents.json --json"
)]
pub struct ImportArgs {
    /// Path to a JSON array of document records.
    pub file: PathBuf,
}

#[derive(Debug, Serialize)]
struct ImportOutput {
    imported: usize,
    skipped: usize,
}

/// Execute `shelf import <file>`.
///
/// # Errors
///
/// Returns an error if the repository is missing, the file cannot be read,
/// or its top level is not a JSON array.
pub fn run_import(
    args: &ImportArgs,
    output: OutputMode,
    project_root: &Path,
) -> anyhow::Result<()> {
    let repo = super::open_existing_repository(project_root, output)?;

    let content = std::fs::read_to_string(&args.file)
        .with_context(|| format!("read import file {}", args.file.display()))?;
    let entries: Vec<serde_json::Value> = serde_json::from_str(&content)
        .with_context(|| format!("parse {} as a JSON array", args.file.display()))?;

    let mut imported = 0_usize;
    let mut skipped = 0_usize;

    for (position, entry) in entries.into_iter().enumerate() {
        let document: NewDocument = match serde_json::from_value(entry) {
            Ok(document) => document,
            Err(e) => {
                warn!(position, "skipping unparseable document record: {e}");
                skipped += 1;
                continue;
            }
        };

        if document.title.trim().is_empty() && document.content.trim().is_empty() {
            warn!(position, "skipping document without title or content text");
            skipped += 1;
            continue;
        }

        repo.insert(&document)
            .with_context(|| format!("insert document at position {position}"))?;
        imported += 1;
    }

    let result = ImportOutput { imported, skipped };
    render(output, &result, |out, w| {
        writeln!(w, "Imported {} document(s), skipped {}", out.imported, out.skipped)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cmd::init::{InitArgs, run_init};
    use crate::cmd::repository_path;
    use shelf_core::db::repository::{DocumentRepository, SqliteRepository};

    fn init_project() -> tempfile::TempDir {
        let dir = tempfile::tempdir().expect("tempdir");
        run_init(&InitArgs {}, OutputMode::Text, dir.path()).expect("init");
        dir
    }

    #[test]
    fn import_inserts_valid_records_and_skips_bad_ones() {
        let dir = init_project();
        let file = dir.path().join("documents.json");
        std::fs::write(
            &file,
            r#"[
                {"title": "NEP 2020", "content": "Education policy", "document_type": "Policy"},
                {"title": "", "content": "", "document_type": "Policy"},
                {"unexpected": true},
                {"title": "UGC Rules", "content": "Regulations", "document_type": "Regulation",
                 "keywords": "UGC,regulation", "search_priority": 2}
            ]"#,
        )
        .expect("write import file");

        run_import(
            &ImportArgs { file },
            OutputMode::Text,
            dir.path(),
        )
        .expect("import");

        let repo = SqliteRepository::open(&repository_path(dir.path())).expect("open");
        let docs = repo.all_documents().expect("all");
        assert_eq!(docs.len(), 2);
    }

    #[test]
    fn import_rejects_non_array_top_level() {
        let dir = init_project();
        let file = dir.path().join("documents.json");
        std::fs::write(&file, r#"{"title": "not an array"}"#).expect("write");

        let result = run_import(&ImportArgs { file }, OutputMode::Text, dir.path());
        assert!(result.is_err());
    }
}
