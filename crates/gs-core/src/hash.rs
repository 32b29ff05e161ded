use sha2::{Digest, Sha256};

use crate::word::RulePair;

/// Order-independent fingerprint of a cached rule list.
///
/// The pairs are sorted before hashing, so two caches holding the same rules
/// in a different order share a fingerprint.
pub fn compute_rules_fingerprint(pairs: &[RulePair]) -> String {
    let mut sorted: Vec<&RulePair> = pairs.iter().collect();
    sorted.sort();
    let mut hasher = Sha256::new();
    for pair in sorted {
        hasher.update(pair.xx.as_bytes());
        hasher.update([0x1f]);
        hasher.update(pair.xy.as_bytes());
        hasher.update([0x1e]);
    }
    format!("{:x}", hasher.finalize())
}
