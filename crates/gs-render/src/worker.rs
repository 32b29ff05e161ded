//! Parallel document engine using rayon.
//!
//! [`SwapEngine`] is the primary entry point. It selects the configured
//! line range of a document, splits it into paragraphs, transforms the
//! paragraphs in parallel, and assembles a [`SwapResult`] with the
//! rendered HTML.

use std::time::Instant;

use rayon::prelude::*;
use tracing::{debug, info};
use uuid::Uuid;

use gs_core::{Fragment, GsError, Result, SwapConfig};
use gs_rules::{static_rules, BiMapping, NameSet, Rule};

use crate::reassemble::reassemble;
use crate::result::{SwapResult, SwapStats};
use crate::tokenize::{HeuristicTagger, Tagger};
use crate::transform::swap_paragraph;

pub const HTML_HEADER: &str = r#"
<!DOCTYPE html>
<html class="hide-deletions">
    <head>
        <meta charset="utf-8">
        <style>
            .hide-deletions del {
                display: none;
            }
        </style>
    </head>
    <body>
"#;

pub const HTML_FOOTER: &str = r#"
    </body>
</html>
"#;

// ---------------------------------------------------------------------------
// Line selection
// ---------------------------------------------------------------------------

/// Right-trimmed lines from the first line starting with `start`
/// (inclusive) up to the first line starting with `end` (exclusive).
pub fn lines_between<'a>(text: &'a str, start: &str, end: &str) -> Result<Vec<&'a str>> {
    select_lines(text, Some(start), Some(end))
}

/// [`lines_between`] with optional markers: no start marker selects from
/// the first line, no end marker selects to the last.
pub fn select_lines<'a>(
    text: &'a str,
    start: Option<&str>,
    end: Option<&str>,
) -> Result<Vec<&'a str>> {
    let mut lines: Vec<&str> = Vec::new();
    let mut found_end = end.is_none();
    for line in text.lines().map(str::trim_end) {
        if end.is_some_and(|e| line.starts_with(e)) {
            found_end = true;
            break;
        }
        lines.push(line);
    }

    let skip = match start {
        Some(s) => lines
            .iter()
            .position(|line| line.starts_with(s))
            .ok_or_else(|| GsError::MarkerNotFound { marker: s.to_string() })?,
        None => 0,
    };

    if !found_end {
        return Err(GsError::MarkerNotFound {
            marker: end.unwrap_or_default().to_string(),
        });
    }

    Ok(lines.split_off(skip))
}

/// Paragraphs are separated by one blank line.
pub fn split_paragraphs(text: &str) -> Vec<&str> {
    text.split("\n\n").collect()
}

pub fn render_html<S: AsRef<str>>(paragraphs: &[S]) -> String {
    let mut html = String::from(HTML_HEADER);
    for paragraph in paragraphs {
        html.push_str("<p>");
        html.push_str(paragraph.as_ref());
        html.push_str("</p>\n\n");
    }
    html.push_str(HTML_FOOTER);
    html
}

// ---------------------------------------------------------------------------
// SwapEngine
// ---------------------------------------------------------------------------

/// Deterministic, parallel document engine.
pub struct SwapEngine<T: Tagger = HeuristicTagger> {
    mapping: BiMapping,
    tagger: T,
    config: SwapConfig,
}

impl<T: Tagger> SwapEngine<T> {
    pub fn new(mapping: BiMapping, tagger: T, config: SwapConfig) -> Self {
        Self { mapping, tagger, config }
    }

    /// Build the mapping from `rules`, honoring the configured successor
    /// tag enforcement.
    pub fn from_rules(rules: Vec<Rule>, tagger: T, config: SwapConfig) -> Self {
        info!(rules = rules.len(), "building mapping");
        let mapping = BiMapping::new(rules).with_successor_tags(config.enforce_successor_tags);
        Self::new(mapping, tagger, config)
    }

    /// Built-in rules (ending with the name rule) followed by synthesized
    /// rules.
    pub fn from_sources(
        names: NameSet,
        synthesized: Vec<Rule>,
        tagger: T,
        config: SwapConfig,
    ) -> Self {
        let mut rules = static_rules(names);
        rules.extend(synthesized);
        Self::from_rules(rules, tagger, config)
    }

    pub fn mapping(&self) -> &BiMapping {
        &self.mapping
    }

    pub fn tagger(&self) -> &T {
        &self.tagger
    }

    pub fn config(&self) -> &SwapConfig {
        &self.config
    }

    pub fn swap_paragraph(&self, paragraph: &str) -> Vec<Vec<Fragment>> {
        swap_paragraph(&self.mapping, &self.tagger, paragraph, &self.config)
    }

    /// Transform and reassemble one paragraph.
    pub fn render_paragraph(&self, paragraph: &str) -> String {
        reassemble(&self.swap_paragraph(paragraph), &self.tagger)
    }

    /// Transform a whole document.
    ///
    /// # Steps
    /// 1. Select the lines between the configured markers.
    /// 2. Split the selection into paragraphs.
    /// 3. Transform paragraphs in parallel with rayon `par_iter`.
    /// 4. Restore document order, reassemble, and wrap in HTML.
    /// 5. Compute stats and record elapsed wall-clock time.
    pub fn swap_document(&self, text: &str) -> Result<SwapResult> {
        let start = Instant::now();

        // Step 1: select.
        let lines = select_lines(
            text,
            self.config.start_marker.as_deref(),
            self.config.end_marker.as_deref(),
        )?;
        let selected = lines.join("\n");
        info!(chars = selected.chars().count(), "selected text");

        // Step 2: paragraphs.
        let paragraphs = split_paragraphs(&selected);
        info!(paragraphs = paragraphs.len(), "transforming paragraphs");

        // Step 3: transform in parallel.
        let transformed = if self.config.worker_threads > 0 {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(self.config.worker_threads)
                .build()
                .map_err(|e| GsError::Internal(e.to_string()))?;
            pool.install(|| self.transform_all(&paragraphs))
        } else {
            self.transform_all(&paragraphs)
        };

        // Step 4: render.
        let rendered: Vec<String> = transformed
            .iter()
            .map(|p| reassemble(p, &self.tagger))
            .collect();
        let html = render_html(&rendered);

        // Step 5: stats.
        let mut stats = SwapStats::default();
        for paragraph in &transformed {
            stats.merge(&SwapStats::of_paragraph(paragraph));
        }
        let elapsed_ms = start.elapsed().as_millis() as u64;
        debug!(
            sentences = stats.sentences,
            tokens = stats.tokens,
            substitutions = stats.substitutions,
            elapsed_ms,
            "document transformed"
        );

        Ok(SwapResult {
            run_id: Uuid::new_v4(),
            elapsed_ms,
            stats,
            paragraphs: transformed,
            html,
        })
    }

    /// Transform paragraphs in parallel, returned in input order.
    fn transform_all(&self, paragraphs: &[&str]) -> Vec<Vec<Vec<Fragment>>> {
        let mut indexed: Vec<(usize, Vec<Vec<Fragment>>)> = paragraphs
            .par_iter()
            .enumerate()
            .map(|(idx, paragraph)| (idx, self.swap_paragraph(paragraph)))
            .collect();

        indexed.sort_by_key(|(i, _)| *i);
        indexed.into_iter().map(|(_, p)| p).collect()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use gs_core::db::{create_pool, SqliteRuleCache};
    use gs_core::NOMINAL_TAGS;
    use gs_synth::{generate_rules, MemoryGraph};

    const DOC: &str = "\
Project preamble

ADVENTURE I.
She smiled. Her hat was red.

She laughed--then left.
ADVENTURE II.
Her sister stayed.
";

    fn example_rules() -> Vec<Rule> {
        vec![
            Rule::exact("she", "he"),
            Rule::exact("her", "his").followed_by(NOMINAL_TAGS),
            Rule::exact("smiled", "smiled"),
        ]
    }

    fn engine(config: SwapConfig) -> SwapEngine {
        SwapEngine::from_rules(example_rules(), HeuristicTagger::new(), config)
    }

    fn marked_config() -> SwapConfig {
        SwapConfig {
            start_marker: Some("ADVENTURE I.".to_string()),
            end_marker: Some("ADVENTURE II.".to_string()),
            ..SwapConfig::default()
        }
    }

    #[test]
    fn example_paragraph() {
        let engine = engine(SwapConfig::default());
        assert_eq!(
            engine.render_paragraph("She smiled. Her hat was red."),
            "<del>She</del><ins>He</ins> smiled. <del>Her</del><ins>His</ins> hat was red."
        );
    }

    #[test]
    fn en_dash_and_curly_quotes_stay_spaced() {
        let engine = engine(SwapConfig::default());
        assert_eq!(
            engine.render_paragraph("She laughed--then left."),
            "<del>She</del><ins>He</ins> laughed \u{2013} then left."
        );
        assert_eq!(
            engine.render_paragraph("They said \u{201C}she left\u{201D} quietly."),
            "They said \u{201C} <del>she</del><ins>he</ins> left \u{201D} quietly."
        );
    }

    #[test]
    fn lines_between_markers() {
        let lines = lines_between(DOC, "ADVENTURE I.", "ADVENTURE II.").unwrap();
        assert_eq!(
            lines,
            vec![
                "ADVENTURE I.",
                "She smiled. Her hat was red.",
                "",
                "She laughed--then left.",
            ]
        );
    }

    #[test]
    fn missing_start_marker() {
        let err = lines_between(DOC, "ADVENTURE IX.", "ADVENTURE II.").unwrap_err();
        assert!(matches!(err, GsError::MarkerNotFound { ref marker } if marker == "ADVENTURE IX."));
    }

    #[test]
    fn missing_end_marker() {
        let err = lines_between(DOC, "ADVENTURE I.", "THE END").unwrap_err();
        assert!(matches!(err, GsError::MarkerNotFound { ref marker } if marker == "THE END"));
    }

    #[test]
    fn no_markers_selects_everything() {
        let lines = select_lines("a  \nb", None, None).unwrap();
        assert_eq!(lines, vec!["a", "b"]);
    }

    #[test]
    fn document_rendering() {
        let result = engine(marked_config()).swap_document(DOC).unwrap();

        assert_eq!(result.stats.paragraphs, 2);
        assert_eq!(result.stats.substitutions, 3);
        assert!(result.html.starts_with(HTML_HEADER));
        assert!(result.html.ends_with(HTML_FOOTER));
        assert!(result.html.contains(
            "<p>ADVENTURE I. <del>She</del><ins>He</ins> smiled. \
             <del>Her</del><ins>His</ins> hat was red.</p>\n\n"
        ));
        assert!(result
            .html
            .contains("<p><del>She</del><ins>He</ins> laughed \u{2013} then left.</p>\n\n"));
        assert!(!result.html.contains("sister"));
        assert_ne!(result.run_id, Uuid::nil());
    }

    #[test]
    fn parallel_output_keeps_document_order() {
        let text: String = (0..40)
            .map(|i| format!("She saw {i} birds."))
            .collect::<Vec<_>>()
            .join("\n\n");
        let config = SwapConfig {
            worker_threads: 4,
            ..SwapConfig::default()
        };
        let result = engine(config).swap_document(&text).unwrap();

        assert_eq!(result.stats.paragraphs, 40);
        assert_eq!(result.stats.substitutions, 40);
        for (i, paragraph) in result.paragraphs.iter().enumerate() {
            assert!(paragraph[0].contains(&Fragment::word(i.to_string())));
        }
    }

    #[test]
    fn missing_marker_fails_the_run() {
        let config = SwapConfig {
            start_marker: Some("PREFACE".to_string()),
            ..SwapConfig::default()
        };
        assert!(matches!(
            engine(config).swap_document(DOC),
            Err(GsError::MarkerNotFound { .. })
        ));
    }

    #[test]
    fn html_wraps_each_paragraph() {
        let html = render_html(&["one", "two"]);
        assert_eq!(html, format!("{HTML_HEADER}<p>one</p>\n\n<p>two</p>\n\n{HTML_FOOTER}"));
    }

    #[test]
    fn full_pipeline_with_cached_synthesized_rules() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("rules.db");
        let store = SqliteRuleCache::new(create_pool(db_path.to_str().unwrap()).unwrap());
        let config = SwapConfig::default();

        let max_distance = config.max_candidate_distance;
        let synthesized = generate_rules(&store, &config.cache_key, max_distance, || {
            MemoryGraph::from_json_str(
                r#"{"senses": [
                    {"id": "actor.n.01", "pos": "noun", "category": "noun.person",
                     "definition": "a theatrical performer", "lemmas": ["actor", "histrion"]},
                    {"id": "actress.n.01", "pos": "noun", "category": "noun.person",
                     "definition": "a female actor", "lemmas": ["actress"],
                     "hypernyms": ["actor.n.01"]}
                ]}"#,
            )
        })
        .unwrap();

        let names = NameSet::from_corpora(
            &["Irene".to_string(), "Mary".to_string()],
            &["Godfrey".to_string(), "John".to_string()],
            &config.name_exclusions,
        );
        let tagger = HeuristicTagger::new().with_proper_nouns(["Irene", "Mary", "Godfrey", "John"]);
        let engine = SwapEngine::from_sources(names, synthesized, tagger, config);

        assert_eq!(
            engine.render_paragraph("Irene met the actresses and her sister."),
            "<del>Irene</del><ins>Godfrey</ins> met the <del>actresses</del><ins>actors</ins> \
             and <del>her</del><ins>his</ins> <del>sister</del><ins>brother</ins>."
        );
    }
}
