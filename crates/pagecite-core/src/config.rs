//! Configuration handling for pagecite.json

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{
    CARD_EXCERPT_CHARS, CITATION_EXCERPT_CHARS, DEFAULT_LLM_MODEL, DEFAULT_SEARCH_RESULTS,
    DEFAULT_SEARCH_SERVICE, MAX_SEARCH_RESULTS, PageCiteError, Result,
};

/// Configuration stored in pagecite.json
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Fully qualified name of the hosted search service
    #[serde(default = "default_search_service")]
    pub search_service: String,

    /// Number of results requested when none is given
    #[serde(default = "default_search_results")]
    pub default_search_results: usize,

    /// Upper bound on results per request
    #[serde(default = "default_max_search_results")]
    pub max_search_results: usize,

    /// Completion model used for answer synthesis
    #[serde(default = "default_llm_model")]
    pub llm_model: String,

    /// Excerpt length for result cards (chars)
    #[serde(default = "default_card_excerpt_chars")]
    pub card_excerpt_chars: usize,

    /// Excerpt length for prompt source citations (chars)
    #[serde(default = "default_citation_excerpt_chars")]
    pub citation_excerpt_chars: usize,
}

fn default_search_service() -> String {
    DEFAULT_SEARCH_SERVICE.to_string()
}

fn default_search_results() -> usize {
    DEFAULT_SEARCH_RESULTS
}

fn default_max_search_results() -> usize {
    MAX_SEARCH_RESULTS
}

fn default_llm_model() -> String {
    DEFAULT_LLM_MODEL.to_string()
}

fn default_card_excerpt_chars() -> usize {
    CARD_EXCERPT_CHARS
}

fn default_citation_excerpt_chars() -> usize {
    CITATION_EXCERPT_CHARS
}

impl Default for Config {
    fn default() -> Self {
        Self {
            search_service: default_search_service(),
            default_search_results: default_search_results(),
            max_search_results: default_max_search_results(),
            llm_model: default_llm_model(),
            card_excerpt_chars: default_card_excerpt_chars(),
            citation_excerpt_chars: default_citation_excerpt_chars(),
        }
    }
}

impl Config {
    /// Load config from a JSON file, falling back to defaults if it is absent.
    pub fn load(path: &Path) -> Result<Self> {
        let config: Self = if path.exists() {
            let content = std::fs::read_to_string(path)?;
            serde_json::from_str(&content)?
        } else {
            tracing::debug!("No config at {}, using defaults", path.display());
            Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Save config as pretty JSON.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Check that the result limits are usable.
    pub fn validate(&self) -> Result<()> {
        if self.max_search_results == 0 {
            return Err(PageCiteError::Config(
                "max_search_results must be at least 1".to_string(),
            ));
        }
        if self.default_search_results == 0 {
            return Err(PageCiteError::Config(
                "default_search_results must be at least 1".to_string(),
            ));
        }
        if self.default_search_results > self.max_search_results {
            return Err(PageCiteError::Config(format!(
                "default_search_results ({}) exceeds max_search_results ({})",
                self.default_search_results, self.max_search_results
            )));
        }
        Ok(())
    }
}
