//! Cached rule synthesis.
//!
//! Walking the lexical graph is slow, so synthesized pairs are stored in a
//! [`RuleCacheStore`] under a fixed key. The graph is only loaded when that
//! key is missing.

use tracing::info;

use gs_core::db::RuleCacheStore;
use gs_core::{Result, RulePair};
use gs_rules::Rule;

use crate::graph::LexicalGraph;
use crate::rough::rough_mapping;

/// One pair per (feminine lemma, candidate), in synthesizer order.
pub fn synthesize_pairs<G: LexicalGraph + ?Sized>(graph: &G, max_distance: usize) -> Vec<RulePair> {
    rough_mapping(graph, max_distance)
        .flat_map(|entry| {
            let feminine = entry.feminine;
            entry
                .candidates
                .into_iter()
                .map(move |candidate| RulePair::new(feminine.clone(), candidate))
        })
        .collect()
}

pub fn pairs_to_rules(pairs: Vec<RulePair>) -> Vec<Rule> {
    pairs.into_iter().map(|p| Rule::exact(p.xx, p.xy)).collect()
}

/// Load the rules stored under `key`, or synthesize them from the graph
/// produced by `graph_loader` and store them.
///
/// Only a missing key triggers synthesis; any other store error is
/// returned as is.
pub fn generate_rules<G, F>(
    store: &dyn RuleCacheStore,
    key: &str,
    max_distance: usize,
    graph_loader: F,
) -> Result<Vec<Rule>>
where
    G: LexicalGraph,
    F: FnOnce() -> Result<G>,
{
    match store.load(key) {
        Ok(pairs) => {
            info!(key, rules = pairs.len(), "loaded cached rules");
            Ok(pairs_to_rules(pairs))
        }
        Err(e) if e.is_not_found() => {
            info!(key, "generating rules from lexical graph");
            let graph = graph_loader()?;
            let pairs = synthesize_pairs(&graph, max_distance);

            info!(key, rules = pairs.len(), "caching rules");
            store.save(key, &pairs)?;

            Ok(pairs_to_rules(pairs))
        }
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use gs_core::db::{create_memory_pool, JsonFileRuleCache, SqliteRuleCache};
    use gs_core::GsError;

    use crate::graph::MemoryGraph;
    use crate::rough::tests::fixture_graph;
    use crate::rough::DEFAULT_MAX_DISTANCE;

    const KEY: &str = "wordnet-rules";

    struct BrokenStore;

    impl RuleCacheStore for BrokenStore {
        fn load(&self, _key: &str) -> Result<Vec<RulePair>> {
            Err(GsError::Schema("unsupported schema version 9.9.9".into()))
        }

        fn save(&self, _key: &str, _pairs: &[RulePair]) -> Result<()> {
            Err(GsError::Internal("read-only".into()))
        }
    }

    fn xx_xy(rules: &[Rule]) -> Vec<(String, String)> {
        rules
            .iter()
            .map(|r| {
                let p = r.pattern().unwrap();
                (p.xx.clone(), p.xy.clone())
            })
            .collect()
    }

    #[test]
    fn pairs_follow_synthesizer_order() {
        let pairs = synthesize_pairs(&fixture_graph(), DEFAULT_MAX_DISTANCE);
        let xx: Vec<&str> = pairs.iter().map(|p| p.xx.as_str()).collect();
        assert_eq!(xx, vec!["actress", "czarina", "goddess", "sculptress", "tsarina"]);
    }

    #[test]
    fn tied_candidates_become_separate_rules() {
        let graph = MemoryGraph::from_json_str(
            r#"{"senses": [
                {"id": "host.n.01", "pos": "noun", "category": "noun.person",
                 "definition": "a person who receives guests", "lemmas": ["host", "hoster"]},
                {"id": "hosts.n.01", "pos": "noun", "category": "noun.person",
                 "definition": "hosts collectively", "lemmas": ["hosts"],
                 "hypernyms": ["host.n.01"]},
                {"id": "hostess.n.01", "pos": "noun", "category": "noun.person",
                 "definition": "a woman host", "lemmas": ["hostess"],
                 "hypernyms": ["host.n.01"]}
            ]}"#,
        )
        .unwrap();
        let pairs = synthesize_pairs(&graph, DEFAULT_MAX_DISTANCE);
        assert_eq!(
            pairs,
            vec![RulePair::new("hostess", "hoster"), RulePair::new("hostess", "hosts")]
        );
    }

    #[test]
    fn missing_cache_is_generated_then_reused() {
        let store = SqliteRuleCache::new(create_memory_pool().unwrap());
        let loads = AtomicUsize::new(0);

        let first = generate_rules(&store, KEY, DEFAULT_MAX_DISTANCE, || {
            loads.fetch_add(1, Ordering::SeqCst);
            Ok(fixture_graph())
        })
        .unwrap();
        assert_eq!(loads.load(Ordering::SeqCst), 1);

        let second = generate_rules(&store, KEY, DEFAULT_MAX_DISTANCE, || -> Result<MemoryGraph> {
            panic!("graph must not be loaded when the cache exists")
        })
        .unwrap();

        assert_eq!(xx_xy(&first), xx_xy(&second));
        assert!(xx_xy(&first).contains(&("sculptress".to_string(), "sculpturer".to_string())));
    }

    #[test]
    fn json_cache_works_the_same() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileRuleCache::new(dir.path());

        generate_rules(&store, KEY, DEFAULT_MAX_DISTANCE, || Ok(fixture_graph())).unwrap();
        assert!(store.path_for(KEY).exists());

        let cached = generate_rules(&store, KEY, DEFAULT_MAX_DISTANCE, || -> Result<MemoryGraph> {
            panic!("graph must not be loaded when the cache exists")
        })
        .unwrap();
        assert_eq!(cached.len(), 5);
    }

    #[test]
    fn other_store_errors_propagate() {
        let loader = || -> Result<MemoryGraph> {
            panic!("graph must not be loaded on a store failure")
        };
        let err = generate_rules(&BrokenStore, KEY, DEFAULT_MAX_DISTANCE, loader).unwrap_err();
        assert!(matches!(err, GsError::Schema(_)));
    }

    #[test]
    fn loader_failure_propagates_and_nothing_is_saved() {
        let store = SqliteRuleCache::new(create_memory_pool().unwrap());
        let err = generate_rules(&store, KEY, DEFAULT_MAX_DISTANCE, || -> Result<MemoryGraph> {
            Err(GsError::NotFound("wordnet.json".into()))
        })
        .unwrap_err();
        assert!(err.is_not_found());
        assert!(store.load(KEY).unwrap_err().is_not_found());
    }

    #[test]
    fn cached_rules_are_exact_rules() {
        let rules = pairs_to_rules(vec![RulePair::new("heiress", "heir")]);
        assert_eq!(rules, vec![Rule::exact("heiress", "heir")]);
    }
}
