//! `shelf catalog` — list the distinct values used by filterable columns.

use clap::{Args, ValueEnum};
use serde::Serialize;
use std::io::Write;
use std::path::Path;

use shelf_core::db::query;

use crate::output::{OutputMode, render};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CatalogKind {
    /// Distinct document types.
    Types,
    /// Distinct categories.
    Categories,
    /// Distinct sub-categories.
    Subcategories,
    /// Distinct departments.
    Departments,
}

#[derive(Args, Debug)]
#[command(
    about = "List distinct filter values",
    after_help = "EXAMPLES:\n    # Values accepted by --doc-type\n    shelf catalog types\n\n    # Values accepted by --category\n    shelf catalog categories --json"
)]
pub struct CatalogArgs {
    /// Which filter column to list.
    #[arg(value_enum)]
    pub kind: CatalogKind,
}

#[derive(Debug, Serialize)]
struct CatalogOutput {
    values: Vec<String>,
}

/// Execute `shelf catalog <kind>`.
///
/// # Errors
///
/// Returns an error if the repository is missing or the query fails.
pub fn run_catalog(
    args: &CatalogArgs,
    output: OutputMode,
    project_root: &Path,
) -> anyhow::Result<()> {
    let repo = super::open_existing_repository(project_root, output)?;
    let conn = repo.connection();

    let values = match args.kind {
        CatalogKind::Types => query::list_document_types(conn)?,
        CatalogKind::Categories => query::list_categories(conn)?,
        CatalogKind::Subcategories => query::list_sub_categories(conn)?,
        CatalogKind::Departments => query::list_departments(conn)?,
    };

    let result = CatalogOutput { values };
    render(output, &result, |out, w| {
        for value in &out.values {
            writeln!(w, "{value}")?;
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
        args: CatalogArgs,
    }

    #[test]
    fn catalog_kind_parses_all_variants() {
        for (input, expected) in [
            ("types", CatalogKind::Types),
            ("categories", CatalogKind::Categories),
            ("subcategories", CatalogKind::Subcategories),
            ("departments", CatalogKind::Departments),
        ] {
            let w = Wrapper::parse_from(["test", input]);
            assert_eq!(w.args.kind, expected);
        }
    }
}
