//! Lexical knowledge graph access.
//!
//! The synthesizer only needs a few things from a WordNet-style database:
//! every sense, each sense's category, definition and lemma names, and the
//! direct hypernym/hyponym links. [`LexicalGraph`] is that surface;
//! [`MemoryGraph`] is an in-memory implementation loaded from a JSON export.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use gs_core::Result;

// ---------------------------------------------------------------------------
// Sense
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SensePos {
    Noun,
    Verb,
    Adjective,
    Adverb,
}

/// One word sense (synset).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sense {
    /// Stable identifier, e.g. `actress.n.01`.
    pub id: String,
    pub pos: SensePos,
    /// Lexicographer category, e.g. `noun.person`.
    pub category: String,
    pub definition: String,
    /// Lemma names; multi-word lemmas use `_` between words.
    pub lemmas: Vec<String>,
    #[serde(default)]
    pub hypernyms: Vec<String>,
    #[serde(default)]
    pub hyponyms: Vec<String>,
}

impl Sense {
    /// Lemma names without `_`.
    pub fn single_word_lemmas(&self) -> Vec<&str> {
        self.lemmas
            .iter()
            .map(String::as_str)
            .filter(|l| !l.contains('_'))
            .collect()
    }
}

// ---------------------------------------------------------------------------
// LexicalGraph trait
// ---------------------------------------------------------------------------

pub trait LexicalGraph {
    /// Every sense, in a stable order.
    fn senses(&self) -> Box<dyn Iterator<Item = &Sense> + '_>;

    fn sense(&self, id: &str) -> Option<&Sense>;

    fn hypernyms(&self, sense: &Sense) -> Vec<&Sense> {
        sense.hypernyms.iter().filter_map(|id| self.sense(id)).collect()
    }

    fn hyponyms(&self, sense: &Sense) -> Vec<&Sense> {
        sense.hyponyms.iter().filter_map(|id| self.sense(id)).collect()
    }
}

// ---------------------------------------------------------------------------
// MemoryGraph
// ---------------------------------------------------------------------------

#[derive(Serialize, Deserialize)]
struct GraphFile {
    senses: Vec<Sense>,
}

/// Senses held in a map keyed by id.
///
/// Hypernym and hyponym links are made mutually consistent on
/// construction: a sense naming `h` as hypernym is listed among `h`'s
/// hyponyms and vice versa.
#[derive(Debug, Clone, Default)]
pub struct MemoryGraph {
    senses: BTreeMap<String, Sense>,
}

impl MemoryGraph {
    pub fn new(senses: Vec<Sense>) -> Self {
        let mut map: BTreeMap<String, Sense> =
            senses.into_iter().map(|s| (s.id.clone(), s)).collect();

        let mut hyponyms: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
        let mut hypernyms: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
        for sense in map.values() {
            for h in &sense.hypernyms {
                hyponyms.entry(h.clone()).or_default().insert(sense.id.clone());
                hypernyms.entry(sense.id.clone()).or_default().insert(h.clone());
            }
            for h in &sense.hyponyms {
                hypernyms.entry(h.clone()).or_default().insert(sense.id.clone());
                hyponyms.entry(sense.id.clone()).or_default().insert(h.clone());
            }
        }
        for (id, sense) in map.iter_mut() {
            sense.hypernyms = hypernyms.remove(id).unwrap_or_default().into_iter().collect();
            sense.hyponyms = hyponyms.remove(id).unwrap_or_default().into_iter().collect();
        }

        Self { senses: map }
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        let file: GraphFile = serde_json::from_str(content)?;
        Ok(Self::new(file.senses))
    }

    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!(path = %path.display(), "loading lexical graph");
        let content = std::fs::read_to_string(path)?;
        let graph = Self::from_json_str(&content)?;
        info!(senses = graph.len(), "lexical graph loaded");
        Ok(graph)
    }

    pub fn len(&self) -> usize {
        self.senses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.senses.is_empty()
    }
}

impl LexicalGraph for MemoryGraph {
    fn senses(&self) -> Box<dyn Iterator<Item = &Sense> + '_> {
        Box::new(self.senses.values())
    }

    fn sense(&self, id: &str) -> Option<&Sense> {
        self.senses.get(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sense(id: &str, lemmas: &[&str], hypernyms: &[&str]) -> Sense {
        Sense {
            id: id.to_string(),
            pos: SensePos::Noun,
            category: "noun.person".to_string(),
            definition: String::new(),
            lemmas: lemmas.iter().map(|s| s.to_string()).collect(),
            hypernyms: hypernyms.iter().map(|s| s.to_string()).collect(),
            hyponyms: vec![],
        }
    }

    #[test]
    fn hyponyms_are_derived_from_hypernyms() {
        let graph = MemoryGraph::new(vec![
            sense("actor.n.01", &["actor"], &[]),
            sense("actress.n.01", &["actress"], &["actor.n.01"]),
            sense("ham.n.01", &["ham"], &["actor.n.01"]),
        ]);
        let actor = graph.sense("actor.n.01").unwrap();
        let kids: Vec<&str> = graph.hyponyms(actor).iter().map(|s| s.id.as_str()).collect();
        assert_eq!(kids, vec!["actress.n.01", "ham.n.01"]);
    }

    #[test]
    fn dangling_links_are_skipped() {
        let graph = MemoryGraph::new(vec![sense("a.n.01", &["a"], &["missing.n.01"])]);
        let a = graph.sense("a.n.01").unwrap();
        assert!(graph.hypernyms(a).is_empty());
    }

    #[test]
    fn single_word_lemmas_drop_compounds() {
        let s = sense("x.n.01", &["statue_maker", "sculptor"], &[]);
        assert_eq!(s.single_word_lemmas(), vec!["sculptor"]);
    }

    #[test]
    fn json_loading() {
        let json = r#"{"senses": [
            {"id": "god.n.01", "pos": "noun", "category": "noun.person",
             "definition": "a deity", "lemmas": ["god"]},
            {"id": "goddess.n.01", "pos": "noun", "category": "noun.person",
             "definition": "a female deity", "lemmas": ["goddess"],
             "hypernyms": ["god.n.01"]}
        ]}"#;
        let graph = MemoryGraph::from_json_str(json).unwrap();
        assert_eq!(graph.len(), 2);
        let god = graph.sense("god.n.01").unwrap();
        assert_eq!(god.hyponyms, vec!["goddess.n.01".to_string()]);
    }

    #[test]
    fn json_file_missing_is_io_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = MemoryGraph::load_json(dir.path().join("wordnet.json")).unwrap_err();
        assert!(err.is_not_found());
    }
}
