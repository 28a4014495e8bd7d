//! Field-weighted lexical search over the `documents` table.
//!
//! A query matches when it appears as a case-insensitive substring of the
//! title, content, keywords, or denormalized full text. Relevance is a
//! tie-break ladder, not a sum: the first field that matches sets the base
//! weight, which is then multiplied by the document's static
//! `search_priority` boost.
//!
//! # Field Weights
//!
//! | Field             | Weight | Rationale                                |
//! |-------------------|--------|------------------------------------------|
//! | title             | 5      | Most specific, short, high signal        |
//! | keywords          | 3      | Curated terms, moderate signal           |
//! | content           | 2      | Body text, broad signal                  |
//! | full_text_content | 1      | Denormalized catch-all, lowest signal    |
//!
//! Without a query the same entry point degrades to a filter browse ordered
//! by `id` descending (most-recent-first), with no relevance scoring.

use anyhow::{Context, Result};
use rusqlite::{Connection, params_from_iter};

use super::query::{DocumentFilter, row_to_document};
use crate::model::Document;

/// Base relevance weights, highest-precedence first.
pub const WEIGHT_TITLE: i64 = 5;
pub const WEIGHT_KEYWORDS: i64 = 3;
pub const WEIGHT_CONTENT: i64 = 2;
pub const WEIGHT_FULL_TEXT: i64 = 1;

/// A lexical search hit with its computed relevance.
#[derive(Debug, Clone, PartialEq)]
pub struct LexicalHit {
    pub document: Document,
    /// `base_weight * search_priority`; 0 in the filter-browse branch.
    pub relevance: i64,
}

/// Search documents by substring relevance, or browse by filters alone.
///
/// With a query, results are ordered by relevance descending, then
/// `search_priority` descending, then `id` descending. Without a query,
/// all documents matching the filters are returned ordered by `id`
/// descending and carry relevance 0.
///
/// Filters are exact-match AND conditions in both branches. An empty result
/// set is not an error.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn search_ranked(
    conn: &Connection,
    query: Option<&str>,
    filter: &DocumentFilter,
) -> Result<Vec<LexicalHit>> {
    let query = query.map(str::trim).filter(|q| !q.is_empty());

    match query {
        Some(q) => ranked_substring_search(conn, q, filter),
        None => filter_browse(conn, filter),
    }
}

fn ranked_substring_search(
    conn: &Connection,
    query: &str,
    filter: &DocumentFilter,
) -> Result<Vec<LexicalHit>> {
    let mut param_values: Vec<Box<dyn rusqlite::types::ToSql>> = Vec::new();
    param_values.push(Box::new(like_pattern(query)));

    let mut conditions = vec![
        "(lower(d.title) LIKE ?1 ESCAPE '\\' \
          OR lower(d.content) LIKE ?1 ESCAPE '\\' \
          OR lower(d.keywords) LIKE ?1 ESCAPE '\\' \
          OR lower(COALESCE(d.full_text_content, '')) LIKE ?1 ESCAPE '\\')"
            .to_string(),
    ];
    push_filter_conditions(filter, &mut conditions, &mut param_values);

    let sql = format!(
        "SELECT d.id, d.title, d.content, d.document_type, d.category, \
                d.sub_category, d.department, d.status, d.jurisdiction, d.keywords, \
                d.document_url, d.search_priority, d.full_text_content, d.created_at_us, \
                (CASE \
                 WHEN lower(d.title) LIKE ?1 ESCAPE '\\' THEN {WEIGHT_TITLE} \
                 WHEN lower(d.keywords) LIKE ?1 ESCAPE '\\' THEN {WEIGHT_KEYWORDS} \
                 WHEN lower(d.content) LIKE ?1 ESCAPE '\\' THEN {WEIGHT_CONTENT} \
                 ELSE {WEIGHT_FULL_TEXT} \
                 END) * d.search_priority AS relevance \
         FROM documents d \
         WHERE {} \
         ORDER BY relevance DESC, d.search_priority DESC, d.id DESC",
        conditions.join(" AND ")
    );

    let mut stmt = conn
        .prepare(&sql)
        .context("prepare ranked lexical search query")?;

    let params_ref: Vec<&dyn rusqlite::types::ToSql> =
        param_values.iter().map(AsRef::as_ref).collect();

    let rows = stmt
        .query_map(params_from_iter(params_ref), |row| {
            Ok(LexicalHit {
                document: row_to_document(row)?,
                relevance: row.get(14)?,
            })
        })
        .with_context(|| format!("execute ranked lexical search for '{query}'"))?;

    let mut hits = Vec::new();
    for row in rows {
        hits.push(row.context("read lexical search hit")?);
    }
    Ok(hits)
}

fn filter_browse(conn: &Connection, filter: &DocumentFilter) -> Result<Vec<LexicalHit>> {
    let mut conditions: Vec<String> = Vec::new();
    let mut param_values: Vec<Box<dyn rusqlite::types::ToSql>> = Vec::new();
    push_filter_conditions(filter, &mut conditions, &mut param_values);

    let where_clause = if conditions.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", conditions.join(" AND "))
    };

    let sql = format!(
        "SELECT d.id, d.title, d.content, d.document_type, d.category, \
                d.sub_category, d.department, d.status, d.jurisdiction, d.keywords, \
                d.document_url, d.search_priority, d.full_text_content, d.created_at_us \
         FROM documents d{where_clause} \
         ORDER BY d.id DESC"
    );

    let mut stmt = conn.prepare(&sql).context("prepare filter browse query")?;

    let params_ref: Vec<&dyn rusqlite::types::ToSql> =
        param_values.iter().map(AsRef::as_ref).collect();

    let rows = stmt
        .query_map(params_from_iter(params_ref), |row| {
            Ok(LexicalHit {
                document: row_to_document(row)?,
                relevance: 0,
            })
        })
        .context("execute filter browse query")?;

    let mut hits = Vec::new();
    for row in rows {
        hits.push(row.context("read filter browse row")?);
    }
    Ok(hits)
}

fn push_filter_conditions(
    filter: &DocumentFilter,
    conditions: &mut Vec<String>,
    param_values: &mut Vec<Box<dyn rusqlite::types::ToSql>>,
) {
    if let Some(ref document_type) = filter.document_type {
        param_values.push(Box::new(document_type.clone()));
        conditions.push(format!("d.document_type = ?{}", param_values.len()));
    }

    if let Some(ref category) = filter.category {
        param_values.push(Box::new(category.clone()));
        conditions.push(format!("d.category = ?{}", param_values.len()));
    }

    if let Some(ref department) = filter.department {
        param_values.push(Box::new(department.clone()));
        conditions.push(format!("d.department = ?{}", param_values.len()));
    }
}

/// Build the `%query%` pattern: lowercased, with LIKE metacharacters escaped
/// so the query is matched as a literal substring.
fn like_pattern(query: &str) -> String {
    let lowered = query.to_lowercase();
    let mut escaped = String::with_capacity(lowered.len() + 2);
    escaped.push('%');
    for ch in lowered.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped.push('%');
    escaped
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
