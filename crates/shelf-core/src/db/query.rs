//! Typed SQLite query helpers for the document repository.
//!
//! Provides composable query functions for the common access patterns:
//! get by ID, list/filter documents, insert, exact keyword lookup, and the
//! catalog listings used to populate filter dropdowns.
//!
//! All functions take a shared `&Connection` reference and return
//! `anyhow::Result<T>` with typed structs (never raw rows).

use anyhow::{Context, Result};
use rusqlite::{Connection, params, params_from_iter};

use crate::model::{Document, NewDocument};

/// Column list shared by every document-returning query, in
/// [`row_to_document`] order.
const DOCUMENT_COLUMNS: &str = "d.id, d.title, d.content, d.document_type, d.category, \
     d.sub_category, d.department, d.status, d.jurisdiction, d.keywords, \
     d.document_url, d.search_priority, d.full_text_content, d.created_at_us";

/// A document matched through the keyword side table.
#[derive(Debug, Clone, PartialEq)]
pub struct KeywordHit {
    pub document: Document,
    /// How many of the requested keywords matched.
    pub keyword_matches: i64,
}

/// Filter criteria for document listings and lexical search.
///
/// All fields are optional. When multiple fields are set, they are combined
/// with AND semantics.
#[derive(Debug, Clone, Default)]
pub struct DocumentFilter {
    /// Filter by document type (exact match).
    pub document_type: Option<String>,
    /// Filter by category (exact match).
    pub category: Option<String>,
    /// Filter by department (exact match).
    pub department: Option<String>,
    /// Maximum number of results.
    pub limit: Option<u32>,
    /// Offset for pagination.
    pub offset: Option<u32>,
}

impl DocumentFilter {
    /// Append this filter's exact-match conditions and parameters.
    fn push_conditions(
        &self,
        conditions: &mut Vec<String>,
        param_values: &mut Vec<Box<dyn rusqlite::types::ToSql>>,
    ) {
        if let Some(ref document_type) = self.document_type {
            param_values.push(Box::new(document_type.clone()));
            conditions.push(format!("d.document_type = ?{}", param_values.len()));
        }

        if let Some(ref category) = self.category {
            param_values.push(Box::new(category.clone()));
            conditions.push(format!("d.category = ?{}", param_values.len()));
        }

        if let Some(ref department) = self.department {
            param_values.push(Box::new(department.clone()));
            conditions.push(format!("d.department = ?{}", param_values.len()));
        }
    }

    fn limit_clause(&self) -> String {
        match (self.limit, self.offset) {
            (Some(limit), Some(offset)) => format!(" LIMIT {limit} OFFSET {offset}"),
            (Some(limit), None) => format!(" LIMIT {limit}"),
            (None, Some(offset)) => format!(" LIMIT -1 OFFSET {offset}"),
            (None, None) => String::new(),
        }
    }
}

/// Fetch a single document by exact `id`.
///
/// Returns `None` if the document does not exist.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn get_document(conn: &Connection, id: i64) -> Result<Option<Document>> {
    let sql = format!("SELECT {DOCUMENT_COLUMNS} FROM documents d WHERE d.id = ?1");

    let mut stmt = conn.prepare(&sql).context("prepare get_document query")?;

    let result = stmt.query_row(params![id], row_to_document);

    match result {
        Ok(document) => Ok(Some(document)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e).context(format!("get_document for id {id}")),
    }
}

/// List documents matching the given filter criteria.
///
/// Browse ordering: `search_priority` descending, then `id` descending
/// (boosted documents first, then most-recent-first).
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_documents(conn: &Connection, filter: &DocumentFilter) -> Result<Vec<Document>> {
    let mut conditions: Vec<String> = Vec::new();
    let mut param_values: Vec<Box<dyn rusqlite::types::ToSql>> = Vec::new();
    filter.push_conditions(&mut conditions, &mut param_values);

    let where_clause = if conditions.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", conditions.join(" AND "))
    };
    let limit_clause = filter.limit_clause();

    let sql = format!(
        "SELECT {DOCUMENT_COLUMNS} FROM documents d{where_clause} \
         ORDER BY d.search_priority DESC, d.id DESC{limit_clause}"
    );

    let mut stmt = conn
        .prepare(&sql)
        .with_context(|| format!("prepare list_documents query: {sql}"))?;

    let params_ref: Vec<&dyn rusqlite::types::ToSql> =
        param_values.iter().map(AsRef::as_ref).collect();

    let rows = stmt
        .query_map(params_from_iter(params_ref), row_to_document)
        .context("execute list_documents query")?;

    let mut documents = Vec::new();
    for row in rows {
        documents.push(row.context("read list_documents row")?);
    }
    Ok(documents)
}

/// Count documents matching the given filter criteria.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn count_documents(conn: &Connection, filter: &DocumentFilter) -> Result<u64> {
    let mut conditions: Vec<String> = Vec::new();
    let mut param_values: Vec<Box<dyn rusqlite::types::ToSql>> = Vec::new();
    filter.push_conditions(&mut conditions, &mut param_values);

    let where_clause = if conditions.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", conditions.join(" AND "))
    };

    let sql = format!("SELECT COUNT(*) FROM documents d{where_clause}");

    let mut stmt = conn
        .prepare(&sql)
        .with_context(|| format!("prepare count_documents: {sql}"))?;

    let params_ref: Vec<&dyn rusqlite::types::ToSql> =
        param_values.iter().map(AsRef::as_ref).collect();

    let count: i64 = stmt
        .query_row(params_from_iter(params_ref), |row| row.get(0))
        .context("execute count_documents")?;

    Ok(u64::try_from(count).unwrap_or(0))
}

/// Insert a document and populate its keyword side table rows.
///
/// Returns the repository-assigned document ID.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_document(conn: &Connection, document: &NewDocument) -> Result<i64> {
    let now_us = chrono::Utc::now().timestamp_micros();
    conn.execute(
        "INSERT INTO documents (
            title, content, document_type, category, sub_category, department,
            status, jurisdiction, keywords, document_url, search_priority,
            full_text_content, created_at_us
         ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
        params![
            document.title,
            document.content,
            document.document_type,
            document.category,
            document.sub_category,
            document.department,
            document.status,
            document.jurisdiction,
            document.keywords,
            document.document_url,
            document.search_priority,
            document.full_text_content,
            now_us,
        ],
    )
    .with_context(|| format!("insert document '{}'", document.title))?;

    let id = conn.last_insert_rowid();

    for keyword in document.keyword_set() {
        conn.execute(
            "INSERT OR IGNORE INTO document_keywords (document_id, keyword) VALUES (?1, ?2)",
            params![id, keyword],
        )
        .with_context(|| format!("insert keyword '{keyword}' for document {id}"))?;
    }

    Ok(id)
}

/// Exact keyword lookup through the `document_keywords` side table.
///
/// `keywords` is a comma-separated list; documents are ranked by how many of
/// the requested keywords they carry, then by `search_priority`, then by `id`
/// descending.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn keyword_search(conn: &Connection, keywords: &str) -> Result<Vec<KeywordHit>> {
    let keyword_list: Vec<String> = keywords
        .split(',')
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(ToOwned::to_owned)
        .collect();

    if keyword_list.is_empty() {
        return Ok(Vec::new());
    }

    let placeholders = (1..=keyword_list.len())
        .map(|i| format!("?{i}"))
        .collect::<Vec<_>>()
        .join(",");

    let sql = format!(
        "SELECT {DOCUMENT_COLUMNS}, COUNT(dk.keyword) AS keyword_matches \
         FROM documents d \
         INNER JOIN document_keywords dk ON dk.document_id = d.id \
         WHERE dk.keyword IN ({placeholders}) \
         GROUP BY d.id \
         ORDER BY keyword_matches DESC, d.search_priority DESC, d.id DESC"
    );

    let mut stmt = conn.prepare(&sql).context("prepare keyword_search")?;
    let rows = stmt
        .query_map(params_from_iter(keyword_list.iter()), |row| {
            Ok(KeywordHit {
                document: row_to_document(row)?,
                keyword_matches: row.get(14)?,
            })
        })
        .context("execute keyword_search")?;

    let mut hits = Vec::new();
    for row in rows {
        hits.push(row.context("read keyword_search row")?);
    }
    Ok(hits)
}

/// All distinct non-null document types, sorted.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_document_types(conn: &Connection) -> Result<Vec<String>> {
    distinct_column(conn, "document_type")
}

/// All distinct non-null categories, sorted.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_categories(conn: &Connection) -> Result<Vec<String>> {
    distinct_column(conn, "category")
}

/// All distinct non-null sub-categories, sorted.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_sub_categories(conn: &Connection) -> Result<Vec<String>> {
    distinct_column(conn, "sub_category")
}

/// All distinct non-null departments, sorted.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_departments(conn: &Connection) -> Result<Vec<String>> {
    distinct_column(conn, "department")
}

fn distinct_column(conn: &Connection, column: &str) -> Result<Vec<String>> {
    let sql = format!(
        "SELECT DISTINCT {column} FROM documents \
         WHERE {column} IS NOT NULL AND {column} <> '' \
         ORDER BY {column}"
    );
    let mut stmt = conn
        .prepare(&sql)
        .context("prepare distinct column query")?;
    let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

    let mut values = Vec::new();
    for row in rows {
        values.push(row.context("read distinct column row")?);
    }
    Ok(values)
}

/// Map a result row onto [`Document`]; columns follow [`DOCUMENT_COLUMNS`].
pub(crate) fn row_to_document(row: &rusqlite::Row<'_>) -> rusqlite::Result<Document> {
    Ok(Document {
        id: row.get(0)?,
        title: row.get(1)?,
        content: row.get(2)?,
        document_type: row.get(3)?,
        category: row.get(4)?,
        sub_category: row.get(5)?,
        department: row.get(6)?,
        status: row.get(7)?,
        jurisdiction: row.get(8)?,
        keywords: row.get(9)?,
        document_url: row.get(10)?,
        search_priority: row.get(11)?,
        full_text_content: row.get(12)?,
        created_at_us: row.get(13)?,
    })
}
