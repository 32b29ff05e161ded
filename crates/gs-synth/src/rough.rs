//! Mine feminine/neutral word pairs from a lexical graph.
//!
//! A feminine person noun ("sculptress: a woman sculptor") usually has a
//! hypernym whose lemma appears in its definition ("sculptor"). The
//! hypernym and its other hyponyms are scored against each feminine lemma
//! by edit distance and the closest group is kept.
//!
//! Example:
//!   sculptress -> {sculpturer (3), sculptor (4), carver (8)}
//!   keeps {sculpturer}

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::distance::{edit_distance, is_title};
use crate::graph::{LexicalGraph, Sense, SensePos};

pub const FEMININE_MARKERS: &[&str] = &["woman", "girl", "female"];
pub const PERSON_CATEGORY: &str = "noun.person";
pub const DEFAULT_MAX_DISTANCE: usize = 4;

/// One feminine lemma and its closest ungendered/masculine counterparts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SynthesizedEntry {
    pub feminine: String,
    pub candidates: BTreeSet<String>,
}

fn is_feminine_person(sense: &Sense) -> bool {
    sense.pos == SensePos::Noun
        && sense.category == PERSON_CATEGORY
        && FEMININE_MARKERS.iter().any(|m| sense.definition.contains(m))
}

fn is_candidate(feminine: &str, other: &str, distance: usize) -> bool {
    if feminine == other {
        return false;
    }
    let close = feminine.starts_with(other)
        || distance < feminine.chars().count().min(other.chars().count());
    close && is_title(feminine) == is_title(other)
}

/// Scored candidates per feminine lemma, accumulated over every feminine
/// sense and every one of its hypernyms.
fn score_candidates<G: LexicalGraph + ?Sized>(graph: &G) -> BTreeMap<String, Vec<(usize, String)>> {
    let mut scored: BTreeMap<String, Vec<(usize, String)>> = BTreeMap::new();

    for femme in graph.senses().filter(|s| is_feminine_person(s)) {
        let femme_lemmas = femme.single_word_lemmas();

        for hyper in graph.hypernyms(femme) {
            let hyper_lemmas = hyper.single_word_lemmas();

            // spokeswoman -> spokesperson, whose other hyponym is spokesman
            let mut others: Vec<&str> = hyper_lemmas.clone();
            for sibling in graph.hyponyms(hyper) {
                if sibling.id != femme.id {
                    others.extend(sibling.single_word_lemmas());
                }
            }

            if femme_lemmas.is_empty() || others.is_empty() {
                continue;
            }
            if !hyper_lemmas.iter().any(|l| femme.definition.contains(l)) {
                continue;
            }

            for &feminine in &femme_lemmas {
                let entry = scored.entry(feminine.to_string()).or_default();
                for &other in &others {
                    let distance = edit_distance(feminine, other);
                    if is_candidate(feminine, other, distance) {
                        entry.push((distance, other.to_string()));
                    }
                }
            }
        }
    }

    scored
}

/// Every feminine lemma with its minimal-distance candidates, ordered by
/// lemma. Lemmas whose best candidate is further than `max_distance` are
/// dropped.
pub fn rough_mapping<G: LexicalGraph + ?Sized>(
    graph: &G,
    max_distance: usize,
) -> impl Iterator<Item = SynthesizedEntry> {
    let scored = score_candidates(graph);
    debug!(lemmas = scored.len(), "scored feminine lemmas");

    scored.into_iter().filter_map(move |(feminine, mut candidates)| {
        candidates.sort();
        let best = candidates.first()?.0;
        if best > max_distance {
            return None;
        }
        let candidates = candidates
            .into_iter()
            .take_while(|(d, _)| *d == best)
            .map(|(_, lemma)| lemma)
            .collect();
        Some(SynthesizedEntry { feminine, candidates })
    })
}
