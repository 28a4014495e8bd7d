//! The document repository seam.
//!
//! The retrieval core talks to storage only through [`DocumentRepository`];
//! it never branches on backend type. [`SqliteRepository`] is the shipped
//! implementation — a PostgreSQL backend would be a second impl of the same
//! trait behind the same seam.

use anyhow::Result;
use rusqlite::Connection;
use std::path::Path;

use super::query::{self, DocumentFilter};
use super::search::{self, LexicalHit};
use crate::model::{Document, NewDocument};

/// Read access to the document corpus and its lexical search path.
pub trait DocumentRepository {
    /// The full corpus, boosted documents first, then most-recent-first.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend query fails.
    fn all_documents(&self) -> Result<Vec<Document>>;

    /// Field-weighted lexical search (or filter browse when `query` is
    /// `None`), per the relevance contract in [`search::search_ranked`].
    ///
    /// # Errors
    ///
    /// Returns an error if the backend query fails.
    fn search_documents(
        &self,
        query: Option<&str>,
        filter: &DocumentFilter,
    ) -> Result<Vec<LexicalHit>>;

    /// Fetch one document by identifier; `None` when absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend query fails.
    fn document_by_id(&self, id: i64) -> Result<Option<Document>>;
}

/// SQLite-backed repository.
pub struct SqliteRepository {
    conn: Connection,
}

impl SqliteRepository {
    /// Open (or create) the repository at `path` and migrate it.
    ///
    /// # Errors
    ///
    /// Returns an error if opening or migrating the database fails.
    pub fn open(path: &Path) -> Result<Self> {
        let conn = super::open_repository(path)?;
        Ok(Self { conn })
    }

    /// In-memory repository, used by tests and ephemeral tooling.
    ///
    /// # Errors
    ///
    /// Returns an error if opening or migrating the database fails.
    pub fn open_in_memory() -> Result<Self> {
        let mut conn = Connection::open_in_memory()?;
        conn.pragma_update(None, "foreign_keys", "ON")?;
        super::migrations::migrate(&mut conn)?;
        Ok(Self { conn })
    }

    /// Insert a document (and its keyword rows); returns the assigned ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn insert(&self, document: &NewDocument) -> Result<i64> {
        query::insert_document(&self.conn, document)
    }

    /// Borrow the underlying connection for ad hoc typed queries.
    #[must_use]
    pub const fn connection(&self) -> &Connection {
        &self.conn
    }
}

impl DocumentRepository for SqliteRepository {
    fn all_documents(&self) -> Result<Vec<Document>> {
        query::list_documents(&self.conn, &DocumentFilter::default())
    }

    fn search_documents(
        &self,
        query: Option<&str>,
        filter: &DocumentFilter,
    ) -> Result<Vec<LexicalHit>> {
        search::search_ranked(&self.conn, query, filter)
    }

    fn document_by_id(&self, id: i64) -> Result<Option<Document>> {
        query::get_document(&self.conn, id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_doc(title: &str) -> NewDocument {
        NewDocument {
            title: title.into(),
            content: format!("{title} content"),
            document_type: "Policy".into(),
            category: None,
            sub_category: None,
            department: None,
            status: "Active".into(),
            jurisdiction: None,
            keywords: String::new(),
            document_url: None,
            search_priority: 1,
            full_text_content: None,
        }
    }

    #[test]
    fn repository_roundtrip_through_trait() {
        let repo = SqliteRepository::open_in_memory().expect("open");
        let id = repo.insert(&new_doc("Scholarship Scheme")).expect("insert");

        let repo: &dyn DocumentRepository = &repo;
        let all = repo.all_documents().expect("all");
        assert_eq!(all.len(), 1);

        let doc = repo.document_by_id(id).expect("get").expect("found");
        assert_eq!(doc.title, "Scholarship Scheme");

        let hits = repo
            .search_documents(Some("scholarship"), &DocumentFilter::default())
            .expect("search");
        assert_eq!(hits.len(), 1);
    }

    #[test]
    fn open_creates_parent_directories() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested/deeper/documents.sqlite3");
        let repo = SqliteRepository::open(&path).expect("open");
        assert!(repo.all_documents().expect("all").is_empty());
        assert!(path.exists());
    }
}
