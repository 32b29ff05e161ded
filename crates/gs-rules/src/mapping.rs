//! Ordered rule lookup.
//!
//! A [`Mapping`] tries its rules in priority order (authored rules, then
//! their title-case variants, then their upper-case variants) and returns
//! the first replacement. A [`BiMapping`] runs a mapping in both directions,
//! since a token may only match the reverse reading of a rule.

use std::collections::BTreeSet;

use tracing::debug;

use gs_core::{Inflector, PosTag, TaggedWord};

use crate::rule::{CaseTransform, Rule};

/// Replacements that a rule may produce but that are never real words.
pub const SKIPPED_REPLACEMENTS: &[&str] = &["hress"];

// ---------------------------------------------------------------------------
// Mapping
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Mapping {
    rules: Vec<Rule>,
    enforce_successor_tags: bool,
}

impl Mapping {
    /// Expand `rules` with their case variants. Earlier rules take
    /// precedence.
    pub fn new(rules: Vec<Rule>) -> Self {
        let mut expanded = rules.clone();
        for transform in CaseTransform::EXPANSIONS {
            expanded.extend(rules.iter().filter_map(|r| r.with_case(transform)));
        }
        Self {
            rules: expanded,
            enforce_successor_tags: false,
        }
    }

    /// Make each rule's successor-tag condition binding.
    pub fn with_successor_tags(mut self, enforce: bool) -> Self {
        self.enforce_successor_tags = enforce;
        self
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Map one token. The result is empty when no rule applies and a
    /// single replacement (carrying the token's original tag) otherwise.
    ///
    /// A plural noun is singularized before matching and the replacement is
    /// pluralized again afterwards.
    pub fn map(
        &self,
        word: &TaggedWord,
        successor: Option<&TaggedWord>,
        inflector: &dyn Inflector,
    ) -> BTreeSet<TaggedWord> {
        let plural = word.tag.is_plural_noun();
        let (text, tag) = if plural {
            (inflector.singularize(&word.text), PosTag::NN)
        } else {
            (word.text.clone(), word.tag.clone())
        };
        let successor_tag = successor.map(|s| &s.tag);

        for rule in &self.rules {
            if !rule.is_eligible(&tag) {
                continue;
            }
            if self.enforce_successor_tags && !rule.accepts_successor(successor_tag) {
                continue;
            }
            let Some(replacement) = rule.apply(&text) else {
                continue;
            };
            if SKIPPED_REPLACEMENTS.contains(&replacement.as_str()) {
                continue;
            }

            let replacement = if plural {
                inflector.pluralize(&replacement)
            } else {
                replacement
            };
            return BTreeSet::from([TaggedWord::new(replacement, word.tag.clone())]);
        }

        BTreeSet::new()
    }
}

// ---------------------------------------------------------------------------
// BiMapping
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct BiMapping {
    forward: Mapping,
    reverse: Mapping,
}

impl BiMapping {
    pub fn new(rules: Vec<Rule>) -> Self {
        let flipped: Vec<Rule> = rules.iter().map(Rule::flip).collect();
        let bimap = Self {
            forward: Mapping::new(rules),
            reverse: Mapping::new(flipped),
        };
        debug!(
            forward = bimap.forward.rules.len(),
            reverse = bimap.reverse.rules.len(),
            "built bidirectional mapping"
        );
        bimap
    }

    pub fn with_successor_tags(self, enforce: bool) -> Self {
        Self {
            forward: self.forward.with_successor_tags(enforce),
            reverse: self.reverse.with_successor_tags(enforce),
        }
    }

    pub fn forward(&self) -> &Mapping {
        &self.forward
    }

    pub fn reverse(&self) -> &Mapping {
        &self.reverse
    }

    /// Union of both directions. An empty set means "leave the token
    /// alone"; it is never filled in with the token itself.
    pub fn map(
        &self,
        word: &TaggedWord,
        successor: Option<&TaggedWord>,
        inflector: &dyn Inflector,
    ) -> BTreeSet<TaggedWord> {
        let mut candidates = self.forward.map(word, successor, inflector);
        candidates.extend(self.reverse.map(word, successor, inflector));
        candidates
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
