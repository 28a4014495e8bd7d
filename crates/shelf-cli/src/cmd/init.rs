//! `shelf init` — create the document repository.

use clap::Args;
use serde::Serialize;
use std::io::Write;
use std::path::Path;

use crate::output::{OutputMode, render};
use shelf_core::db::repository::SqliteRepository;

#[derive(Args, Debug)]
#[command(about = "Create the document repository in the current directory")]
pub struct InitArgs {}

#[derive(Debug, Serialize)]
struct InitOutput {
    path: String,
    created: bool,
}

/// Execute `shelf init`.
///
/// # Errors
///
/// Returns an error if the repository cannot be created or migrated.
pub fn run_init(_args: &InitArgs, output: OutputMode, project_root: &Path) -> anyhow::Result<()> {
    let path = super::repository_path(project_root);
    let created = !path.exists();

    // Opening creates and migrates; reopening an existing repository only
    // applies pending migrations.
    let _repo = SqliteRepository::open(&path)?;

    let result = InitOutput {
        path: path.display().to_string(),
        created,
    };

    render(output, &result, |out, w| {
        if out.created {
            writeln!(w, "Initialized document repository at {}", out.path)
        } else {
            writeln!(w, "Repository already exists at {}", out.path)
        }
    })
}
