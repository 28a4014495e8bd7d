use std::fmt;

/// Machine-readable error codes for agent-friendly decision making.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    NotInitialized,
    ConfigParseError,
    RepositoryFailure,
    DocumentNotFound,
    MalformedDocument,
    IndexNotFitted,
    InvalidTopK,
    CorruptRepository,
    InternalUnexpected,
}

impl ErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::NotInitialized => "E1001",
            Self::ConfigParseError => "E1002",
            Self::RepositoryFailure => "E2001",
            Self::DocumentNotFound => "E2002",
            Self::MalformedDocument => "E2003",
            Self::IndexNotFitted => "E3001",
            Self::InvalidTopK => "E3002",
            Self::CorruptRepository => "E5001",
            Self::InternalUnexpected => "E9001",
        }
    }

    /// Short human-facing summary for logs and terminal output.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::NotInitialized => "Repository not initialized",
            Self::ConfigParseError => "Config file parse error",
            Self::RepositoryFailure => "Document repository query failed",
            Self::DocumentNotFound => "Document not found",
            Self::MalformedDocument => "Document missing required text fields",
            Self::IndexNotFitted => "Vector index not fitted",
            Self::InvalidTopK => "Invalid top-k value",
            Self::CorruptRepository => "Corrupt SQLite repository",
            Self::InternalUnexpected => "Internal unexpected error",
        }
    }

    /// Optional remediation hint that can be surfaced to operators and agents.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::NotInitialized => Some("Run `shelf init` to create the document repository."),
            Self::ConfigParseError => Some("Fix syntax in .shelf/config.toml and retry."),
            Self::RepositoryFailure => Some("Check the repository file and retry."),
            Self::DocumentNotFound => None,
            Self::MalformedDocument => {
                Some("Give the document a non-empty title or content before importing.")
            }
            Self::IndexNotFitted => {
                Some("Fit the index with the current corpus before semantic queries.")
            }
            Self::InvalidTopK => Some("Use a top-k value of 1 or greater."),
            Self::CorruptRepository => Some("Run `shelf init` to recreate the repository."),
            Self::InternalUnexpected => Some("Retry once. If persistent, report a bug with logs."),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
