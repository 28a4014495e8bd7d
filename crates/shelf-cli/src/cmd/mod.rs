//! Command handlers for the `shelf` binary.

pub mod catalog;
pub mod import;
pub mod init;
pub mod keywords;
pub mod list;
pub mod search;
pub mod show;

use anyhow::Result;
use shelf_core::db::repository::SqliteRepository;
use shelf_core::error::ErrorCode;
use std::path::{Path, PathBuf};

use crate::output::{CliError, OutputMode, render_error};

/// Location of the repository database under a project root.
pub fn repository_path(project_root: &Path) -> PathBuf {
    project_root.join(".shelf/documents.sqlite3")
}

/// Open the repository, rendering a structured error when it is missing.
///
/// # Errors
///
/// Returns an error if the repository does not exist or cannot be opened.
pub fn open_existing_repository(
    project_root: &Path,
    output: OutputMode,
) -> Result<SqliteRepository> {
    let path = repository_path(project_root);
    if !path.exists() {
        render_error(
            output,
            &CliError::with_details(
                ErrorCode::NotInitialized.message(),
                ErrorCode::NotInitialized
                    .hint()
                    .unwrap_or("initialize the repository first"),
                ErrorCode::NotInitialized.code(),
            ),
        )?;
        anyhow::bail!("repository not initialized at {}", path.display());
    }

    SqliteRepository::open(&path)
}
