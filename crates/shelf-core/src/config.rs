use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectConfig {
    #[serde(default)]
    pub search: SearchConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Run the TF-IDF semantic layer alongside lexical search.
    #[serde(default = "default_true")]
    pub semantic: bool,
    /// Vocabulary cap for the TF-IDF index (most frequent uni/bi-grams).
    #[serde(default = "default_max_features")]
    pub max_features: usize,
    /// Number of semantic results to keep per query.
    #[serde(default = "default_top_k")]
    pub top_k: usize,
    /// Cosine similarity floor; hits at or below this are discarded as noise.
    #[serde(default = "default_similarity_floor")]
    pub similarity_floor: f64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            semantic: default_true(),
            max_features: default_max_features(),
            top_k: default_top_k(),
            similarity_floor: default_similarity_floor(),
        }
    }
}

pub fn load_project_config(project_root: &Path) -> Result<ProjectConfig> {
    let path = project_root.join(".shelf/config.toml");
    if !path.exists() {
        return Ok(ProjectConfig::default());
    }

    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    toml::from_str::<ProjectConfig>(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))
}

const fn default_true() -> bool {
    true
}

const fn default_max_features() -> usize {
    1000
}

const fn default_top_k() -> usize {
    5
}

const fn default_similarity_floor() -> f64 {
    0.001
}
