//! `shelf show` — show one document by ID.

use clap::Args;
use std::io::Write;
use std::path::Path;

use shelf_core::db::repository::DocumentRepository;
use shelf_core::error::ErrorCode;
use shelf_core::model::Document;

use crate::output::{CliError, OutputMode, render, render_error};

#[derive(Args, Debug)]
#[command(about = "Show full details for a single document")]
pub struct ShowArgs {
    /// Document identifier.
    pub id: i64,
}

/// Execute `shelf show <id>`.
///
/// # Errors
///
/// Returns an error if the repository is missing, the query fails, or the
/// document does not exist.
pub fn run_show(args: &ShowArgs, output: OutputMode, project_root: &Path) -> anyhow::Result<()> {
    let repo = super::open_existing_repository(project_root, output)?;

    let Some(document) = repo.document_by_id(args.id)? else {
        render_error(
            output,
            &CliError::with_details(
                format!("document {} not found", args.id),
                "use `shelf list` to browse available documents",
                ErrorCode::DocumentNotFound.code(),
            ),
        )?;
        anyhow::bail!("document {} not found", args.id);
    };

    render(output, &document, |doc, w| render_document_human(doc, w))
}

fn render_document_human(doc: &Document, w: &mut dyn Write) -> std::io::Result<()> {
    writeln!(w, "{}", doc.title)?;
    writeln!(w, "{:-<72}", "")?;
    writeln!(w, "{:<12} {}", "id:", doc.id)?;
    writeln!(w, "{:<12} {}", "type:", doc.document_type)?;
    if let Some(ref category) = doc.category {
        writeln!(w, "{:<12} {}", "category:", category)?;
    }
    if let Some(ref sub_category) = doc.sub_category {
        writeln!(w, "{:<12} {}", "subcategory:", sub_category)?;
    }
    if let Some(ref department) = doc.department {
        writeln!(w, "{:<12} {}", "department:", department)?;
    }
    writeln!(w, "{:<12} {}", "status:", doc.status)?;
    if !doc.keywords.is_empty() {
        writeln!(w, "{:<12} {}", "keywords:", doc.keywords)?;
    }
    if let Some(ref url) = doc.document_url {
        writeln!(w, "{:<12} {}", "url:", url)?;
    }
    writeln!(w, "{:<12} {}", "priority:", doc.search_priority)?;
    writeln!(w)?;
    writeln!(w, "{}", doc.content)?;
    Ok(())
}
