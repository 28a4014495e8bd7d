//! Canonical SQLite schema for the document repository.
//!
//! The schema is normalized for queryability:
//! - `documents` holds one row per document with all ranked-search columns
//! - `document_keywords` models the derived keyword set for exact keyword
//!   lookups, populated from the comma-separated `keywords` column on insert
//! - `repository_meta` tracks the applied schema version

/// Migration v1: documents, keyword side table, and repository metadata.
pub const MIGRATION_V1_SQL: &str = r"
CREATE TABLE IF NOT EXISTS documents (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    content TEXT NOT NULL,
    document_type TEXT NOT NULL,
    category TEXT,
    sub_category TEXT,
    department TEXT,
    status TEXT NOT NULL DEFAULT 'Active',
    jurisdiction TEXT,
    keywords TEXT NOT NULL DEFAULT '',
    document_url TEXT,
    search_priority INTEGER NOT NULL DEFAULT 1 CHECK (search_priority > 0),
    full_text_content TEXT,
    created_at_us INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS document_keywords (
    document_id INTEGER NOT NULL REFERENCES documents(id) ON DELETE CASCADE,
    keyword TEXT NOT NULL CHECK (length(trim(keyword)) > 0),
    PRIMARY KEY (document_id, keyword)
);

CREATE TABLE IF NOT EXISTS repository_meta (
    id INTEGER PRIMARY KEY CHECK (id = 1),
    schema_version INTEGER NOT NULL
);

INSERT OR IGNORE INTO repository_meta (id, schema_version) VALUES (1, 1);
";

/// Migration v2: read-path indexes for filters and keyword lookups.
pub const MIGRATION_V2_SQL: &str = r"
CREATE INDEX IF NOT EXISTS idx_documents_type
    ON documents(document_type);

CREATE INDEX IF NOT EXISTS idx_documents_category
    ON documents(category);

CREATE INDEX IF NOT EXISTS idx_documents_department
    ON documents(department);

CREATE INDEX IF NOT EXISTS idx_documents_priority
    ON documents(search_priority DESC, id DESC);

CREATE INDEX IF NOT EXISTS idx_document_keywords_keyword
    ON document_keywords(keyword, document_id);

UPDATE repository_meta
SET schema_version = 2
WHERE id = 1;
";

/// Indexes expected by the filter/browse/keyword query paths.
pub const REQUIRED_INDEXES: &[&str] = &[
    "idx_documents_type",
    "idx_documents_category",
    "idx_documents_department",
    "idx_documents_priority",
    "idx_document_keywords_keyword",
];
