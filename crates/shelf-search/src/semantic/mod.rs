//! TF-IDF vector index and cosine-similarity semantic search.

pub mod index;
pub mod search;
pub mod vectorizer;

pub use index::{IndexError, SemanticIndex};
pub use vectorizer::{FittedIndex, TfidfVectorizer};
