use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Runtime configuration for rule loading and document rendering.
///
/// Every field has a default, so a TOML file only needs to name the values
/// it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwapConfig {
    /// Key under which synthesized rules are cached.
    pub cache_key: String,
    /// Given names dropped from both name corpora before building the
    /// name rule (surnames and titles that double as first names).
    pub name_exclusions: Vec<String>,
    /// Consult each rule's successor-tag condition. Off by default: the
    /// condition is carried on rules but not enforced.
    pub enforce_successor_tags: bool,
    /// Line prefix of the first line to process (inclusive).
    pub start_marker: Option<String>,
    /// Line prefix of the line that ends processing (exclusive).
    pub end_marker: Option<String>,
    /// Character sequence rewritten before tokenizing.
    pub dash_sequence: String,
    pub dash_replacement: String,
    /// Joins tied candidates inside one substitution.
    pub candidate_separator: String,
    /// Largest edit distance the rule synthesizer accepts for a pairing.
    pub max_candidate_distance: usize,
    /// Paragraph worker threads; 0 uses the rayon default.
    pub worker_threads: usize,
}

impl Default for SwapConfig {
    fn default() -> Self {
        Self {
            cache_key: "wordnet-rules".to_string(),
            name_exclusions: ["Sherlock", "King", "Von", "Prince"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            enforce_successor_tags: false,
            start_marker: None,
            end_marker: None,
            dash_sequence: "--".to_string(),
            dash_replacement: " \u{2013} ".to_string(),
            candidate_separator: "|".to_string(),
            max_candidate_distance: 4,
            worker_threads: 0,
        }
    }
}

impl SwapConfig {
    /// Load configuration from a TOML file.
    pub fn load_toml<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Save configuration to a TOML file.
    pub fn save_toml<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        std::fs::write(path, self.to_toml_string()?)?;
        Ok(())
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| crate::error::GsError::Internal(e.to_string()))
    }
}
