//! Given-name substitution.
//!
//! A [`NameSet`] holds two disjoint sorted lists: names that appear only in
//! the feminine corpus (`xxs`) and names that appear only in the masculine
//! corpus (`xys`). A name at rank `i` of `xxs` is paired with the name at the
//! same relative rank of `xys`, i.e. `xys[i * |xys| / |xxs|]`. When both
//! lists have the same length this is a plain index-for-index pairing.

use std::collections::BTreeSet;
use std::path::Path;

use gs_core::Result;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameSet {
    xxs: Vec<String>,
    xys: Vec<String>,
}

impl NameSet {
    /// Build from two name lists. Both are sorted and de-duplicated here,
    /// which is what the binary-search lookup relies on; names present in
    /// both lists are dropped from both.
    pub fn new(xxs: Vec<String>, xys: Vec<String>) -> Self {
        Self::from_corpora(&xxs, &xys, &[])
    }

    /// `xxs = female - male - exclude`, `xys = male - female - exclude`.
    pub fn from_corpora(female: &[String], male: &[String], exclude: &[String]) -> Self {
        let female_set: BTreeSet<&str> = female.iter().map(String::as_str).collect();
        let male_set: BTreeSet<&str> = male.iter().map(String::as_str).collect();
        let excluded: BTreeSet<&str> = exclude.iter().map(String::as_str).collect();

        let xxs = female_set
            .iter()
            .filter(|n| !male_set.contains(*n) && !excluded.contains(*n))
            .map(|n| n.to_string())
            .collect();
        let xys = male_set
            .iter()
            .filter(|n| !female_set.contains(*n) && !excluded.contains(*n))
            .map(|n| n.to_string())
            .collect();

        Self { xxs, xys }
    }

    pub fn xxs(&self) -> &[String] {
        &self.xxs
    }

    pub fn xys(&self) -> &[String] {
        &self.xys
    }

    /// Rank of `name` in `xxs`.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.xxs.binary_search_by(|n| n.as_str().cmp(name)).ok()
    }

    /// A name only matches when it has a counterpart, so an empty `xys`
    /// disables the rule.
    pub fn contains(&self, name: &str) -> bool {
        !self.xys.is_empty() && self.position(name).is_some()
    }

    /// The name at the same relative rank in `xys`. `flip` inverts this only
    /// when both lists have the same length.
    pub fn counterpart(&self, name: &str) -> Option<&str> {
        let i = self.position(name)?;
        if self.xys.is_empty() {
            return None;
        }
        let j = i * self.xys.len() / self.xxs.len();
        self.xys.get(j).map(String::as_str)
    }

    pub fn flip(&self) -> NameSet {
        NameSet {
            xxs: self.xys.clone(),
            xys: self.xxs.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// NameCorpus
// ---------------------------------------------------------------------------

/// Flat name-list files: one name per line, blank lines and `#` comments
/// ignored.
pub struct NameCorpus;

impl NameCorpus {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
        let content = std::fs::read_to_string(path)?;
        Ok(Self::parse(&content))
    }

    pub fn parse(content: &str) -> Vec<String> {
        content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(str::to_string)
            .collect()
    }
}
