//! Swap result types: the structured output of the swap engine.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use gs_core::Fragment;

// ---------------------------------------------------------------------------
// SwapStats
// ---------------------------------------------------------------------------

/// Aggregate counts for one rendering run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapStats {
    pub paragraphs: usize,
    pub sentences: usize,
    /// Tokens emitted, punctuation included.
    pub tokens: usize,
    pub substitutions: usize,
}

impl SwapStats {
    /// Counts for one transformed paragraph.
    pub fn of_paragraph(sentences: &[Vec<Fragment>]) -> Self {
        Self {
            paragraphs: 1,
            sentences: sentences.len(),
            tokens: sentences.iter().map(Vec::len).sum(),
            substitutions: sentences
                .iter()
                .flatten()
                .filter(|f| f.is_substitution())
                .count(),
        }
    }

    pub fn merge(&mut self, other: &SwapStats) {
        self.paragraphs += other.paragraphs;
        self.sentences += other.sentences;
        self.tokens += other.tokens;
        self.substitutions += other.substitutions;
    }
}

// ---------------------------------------------------------------------------
// SwapResult
// ---------------------------------------------------------------------------

/// The top-level output of a single document run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwapResult {
    /// Unique identifier for this run (UUIDv4).
    pub run_id: Uuid,
    /// Wall-clock duration of the run in milliseconds.
    pub elapsed_ms: u64,
    pub stats: SwapStats,
    /// Per-paragraph, per-sentence fragments in document order.
    pub paragraphs: Vec<Vec<Vec<Fragment>>>,
    /// The rendered HTML document.
    pub html: String,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
