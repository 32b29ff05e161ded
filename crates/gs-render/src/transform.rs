//! Paragraph transformation.
//!
//! A paragraph is split into sentences, each sentence is tagged, and every
//! token is looked up in the mapping together with the token that follows
//! it. Tokens with a replacement become [`Fragment::Substitution`]s; all
//! others pass through as [`Fragment::Word`]s.

use std::collections::BTreeSet;

use gs_core::{Fragment, SwapConfig, TaggedWord};
use gs_rules::BiMapping;

use crate::tokenize::Tagger;

/// Transform one paragraph into per-sentence fragment lists.
pub fn swap_paragraph<T: Tagger>(
    mapping: &BiMapping,
    tagger: &T,
    paragraph: &str,
    config: &SwapConfig,
) -> Vec<Vec<Fragment>> {
    let text = if config.dash_sequence.is_empty() {
        paragraph.to_string()
    } else {
        paragraph.replace(&config.dash_sequence, &config.dash_replacement)
    };

    tagger
        .sentences(&text)
        .iter()
        .map(|sentence| {
            swap_sentence(mapping, tagger, &tagger.tag(sentence), &config.candidate_separator)
        })
        .collect()
}

/// Map each tagged token, pairing it with its successor (the last token has
/// none).
pub fn swap_sentence<T: Tagger>(
    mapping: &BiMapping,
    tagger: &T,
    words: &[TaggedWord],
    separator: &str,
) -> Vec<Fragment> {
    words
        .iter()
        .enumerate()
        .map(|(i, word)| {
            let candidates = mapping.map(word, words.get(i + 1), tagger);
            let texts: BTreeSet<&str> = candidates.iter().map(|c| c.text.as_str()).collect();

            let unchanged =
                texts.is_empty() || (texts.len() == 1 && texts.contains(word.text.as_str()));
            if unchanged {
                Fragment::word(word.text.as_str())
            } else {
                let label: Vec<&str> = texts.into_iter().collect();
                Fragment::substitution(word.text.as_str(), label.join(separator))
            }
        })
        .collect()
}
