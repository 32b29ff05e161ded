//! Match/replace rules.
//!
//! A [`Rule`] is a closed set of variants sharing one interface:
//! - `Exact`: the whole token equals `xx`; replaced by `xy`.
//! - `Prefix`: the token starts with `xx`; the prefix is swapped for `xy`.
//! - `Suffix`: the token ends with `xx`; the suffix is swapped for `xy`.
//! - `Names`: the token is a feminine-only given name; replaced by a
//!   masculine-only one.
//!
//! Example:
//!   `Prefix(queen, king)` turns "queenly" into "kingly".

use std::collections::BTreeSet;

use gs_core::{PosTag, PROPER_NOUN_TAGS, WORD_CLASS_TAGS};

use crate::names::NameSet;

// ---------------------------------------------------------------------------
// CaseTransform
// ---------------------------------------------------------------------------

/// Mechanical case variants a rule is expanded into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaseTransform {
    Title,
    Upper,
}

impl CaseTransform {
    /// Variants added after the authored rules, in priority order.
    pub const EXPANSIONS: [CaseTransform; 2] = [CaseTransform::Title, CaseTransform::Upper];

    pub fn apply(&self, s: &str) -> String {
        match self {
            CaseTransform::Title => title_case(s),
            CaseTransform::Upper => s.to_uppercase(),
        }
    }
}

/// Upper-case the first letter of every alphabetic run and lower-case the
/// rest ("mrs" -> "Mrs", "o'neil" -> "O'Neil").
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_word = false;
    for ch in s.chars() {
        if ch.is_alphabetic() {
            if in_word {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(ch);
            in_word = false;
        }
    }
    out
}

// ---------------------------------------------------------------------------
// Pattern
// ---------------------------------------------------------------------------

/// Source/target pair shared by the string-pattern rule variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    pub xx: String,
    pub xy: String,
    /// Successor tags the rule is conditioned on. `None` means any successor.
    pub if_followed_by: Option<BTreeSet<PosTag>>,
}

impl Pattern {
    pub fn new(xx: impl Into<String>, xy: impl Into<String>) -> Self {
        Self {
            xx: xx.into(),
            xy: xy.into(),
            if_followed_by: None,
        }
    }

    fn flipped(&self) -> Self {
        Self {
            xx: self.xy.clone(),
            xy: self.xx.clone(),
            if_followed_by: self.if_followed_by.clone(),
        }
    }

    fn cased(&self, transform: CaseTransform) -> Self {
        Self {
            xx: transform.apply(&self.xx),
            xy: transform.apply(&self.xy),
            if_followed_by: self.if_followed_by.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Rule
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rule {
    Exact(Pattern),
    Prefix(Pattern),
    Suffix(Pattern),
    Names(NameSet),
}

impl Rule {
    pub fn exact(xx: impl Into<String>, xy: impl Into<String>) -> Self {
        Rule::Exact(Pattern::new(xx, xy))
    }

    pub fn prefix(xx: impl Into<String>, xy: impl Into<String>) -> Self {
        Rule::Prefix(Pattern::new(xx, xy))
    }

    pub fn suffix(xx: impl Into<String>, xy: impl Into<String>) -> Self {
        Rule::Suffix(Pattern::new(xx, xy))
    }

    /// Condition the rule on the tag of the following token. No-op for
    /// name rules.
    pub fn followed_by(mut self, tags: &[PosTag]) -> Self {
        if let Some(p) = self.pattern_mut() {
            p.if_followed_by = Some(tags.iter().cloned().collect());
        }
        self
    }

    pub fn pattern(&self) -> Option<&Pattern> {
        match self {
            Rule::Exact(p) | Rule::Prefix(p) | Rule::Suffix(p) => Some(p),
            Rule::Names(_) => None,
        }
    }

    fn pattern_mut(&mut self) -> Option<&mut Pattern> {
        match self {
            Rule::Exact(p) | Rule::Prefix(p) | Rule::Suffix(p) => Some(p),
            Rule::Names(_) => None,
        }
    }

    pub fn if_followed_by(&self) -> Option<&BTreeSet<PosTag>> {
        self.pattern().and_then(|p| p.if_followed_by.as_ref())
    }

    /// Tags a token must carry for this rule to be considered at all.
    pub fn eligible_tags(&self) -> &'static [PosTag] {
        match self {
            Rule::Names(_) => PROPER_NOUN_TAGS,
            _ => WORD_CLASS_TAGS,
        }
    }

    pub fn is_eligible(&self, tag: &PosTag) -> bool {
        self.eligible_tags().contains(tag)
    }

    /// `true` when the successor condition is absent or satisfied. A missing
    /// successor (end of sentence) only satisfies an absent condition.
    pub fn accepts_successor(&self, successor: Option<&PosTag>) -> bool {
        match (self.if_followed_by(), successor) {
            (None, _) => true,
            (Some(tags), Some(tag)) => tags.contains(tag),
            (Some(_), None) => false,
        }
    }

    pub fn matches(&self, token: &str) -> bool {
        match self {
            Rule::Exact(p) => token == p.xx,
            Rule::Prefix(p) => token.starts_with(p.xx.as_str()),
            Rule::Suffix(p) => token.ends_with(p.xx.as_str()),
            Rule::Names(names) => names.contains(token),
        }
    }

    /// The replacement for `token`, or `None` when the rule does not match.
    pub fn apply(&self, token: &str) -> Option<String> {
        match self {
            Rule::Exact(p) => (token == p.xx).then(|| p.xy.clone()),
            Rule::Prefix(p) => token
                .strip_prefix(p.xx.as_str())
                .map(|rest| format!("{}{}", p.xy, rest)),
            Rule::Suffix(p) => token
                .strip_suffix(p.xx.as_str())
                .map(|stem| format!("{}{}", stem, p.xy)),
            Rule::Names(names) => names.counterpart(token).map(str::to_string),
        }
    }

    /// The same rule read in the opposite direction.
    pub fn flip(&self) -> Rule {
        match self {
            Rule::Exact(p) => Rule::Exact(p.flipped()),
            Rule::Prefix(p) => Rule::Prefix(p.flipped()),
            Rule::Suffix(p) => Rule::Suffix(p.flipped()),
            Rule::Names(names) => Rule::Names(names.flip()),
        }
    }

    /// The rule with `transform` applied to both patterns. Name rules have
    /// no case variants.
    pub fn with_case(&self, transform: CaseTransform) -> Option<Rule> {
        match self {
            Rule::Exact(p) => Some(Rule::Exact(p.cased(transform))),
            Rule::Prefix(p) => Some(Rule::Prefix(p.cased(transform))),
            Rule::Suffix(p) => Some(Rule::Suffix(p.cased(transform))),
            Rule::Names(_) => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_matches_whole_token_only() {
        let r = Rule::exact("she", "he");
        assert!(r.matches("she"));
        assert!(!r.matches("shed"));
        assert_eq!(r.apply("she").as_deref(), Some("he"));
        assert_eq!(r.apply("shed"), None);
    }

    #[test]
    fn prefix_keeps_remainder() {
        let r = Rule::prefix("queen", "king");
        assert!(r.matches("queenly"));
        assert_eq!(r.apply("queenly").as_deref(), Some("kingly"));
        assert_eq!(r.apply("queen").as_deref(), Some("king"));
        assert_eq!(r.apply("quern"), None);
    }

    #[test]
    fn suffix_keeps_stem() {
        let r = Rule::suffix("woman", "man");
        assert_eq!(r.apply("chairwoman").as_deref(), Some("chairman"));
        assert_eq!(r.apply("woman").as_deref(), Some("man"));
        assert!(!r.matches("womanly"));
    }

    #[test]
    fn flip_round_trips_for_pattern_rules() {
        for rule in [
            Rule::exact("actress", "actor"),
            Rule::prefix("queen", "king"),
            Rule::suffix("woman", "man"),
        ] {
            let token = match &rule {
                Rule::Exact(p) => p.xx.clone(),
                Rule::Prefix(p) => format!("{}ship", p.xx),
                Rule::Suffix(p) => format!("sales{}", p.xx),
                Rule::Names(_) => unreachable!(),
            };
            let swapped = rule.apply(&token).unwrap();
            let back = rule.flip().apply(&swapped).unwrap();
            assert_eq!(back, token, "round trip through {rule:?}");
        }
    }

    #[test]
    fn flip_preserves_condition() {
        let r = Rule::exact("her", "his").followed_by(&[PosTag::NN]);
        let f = r.flip();
        assert_eq!(f.pattern().unwrap().xx, "his");
        assert_eq!(f.pattern().unwrap().xy, "her");
        assert_eq!(f.if_followed_by(), r.if_followed_by());
    }

    #[test]
    fn case_variants() {
        let r = Rule::exact("she", "he");
        let title = r.with_case(CaseTransform::Title).unwrap();
        let upper = r.with_case(CaseTransform::Upper).unwrap();
        assert_eq!(title.apply("She").as_deref(), Some("He"));
        assert_eq!(upper.apply("SHE").as_deref(), Some("HE"));
    }

    #[test]
    fn name_rules_have_no_case_variants() {
        let r = Rule::Names(NameSet::new(vec!["Mary".into()], vec!["John".into()]));
        assert_eq!(r.with_case(CaseTransform::Title), None);
        assert_eq!(r.with_case(CaseTransform::Upper), None);
    }

    #[test]
    fn eligible_tags_by_variant() {
        let word = Rule::exact("girl", "boy");
        let names = Rule::Names(NameSet::new(vec!["Mary".into()], vec!["John".into()]));
        assert!(word.is_eligible(&PosTag::NN));
        assert!(word.is_eligible(&PosTag::PrpPossessive));
        assert!(!word.is_eligible(&PosTag::NNP));
        assert!(names.is_eligible(&PosTag::NNP));
        assert!(!names.is_eligible(&PosTag::NN));
    }

    #[test]
    fn successor_condition() {
        let plain = Rule::exact("her", "him");
        let cond = Rule::exact("her", "his").followed_by(&[PosTag::NN, PosTag::JJ]);
        assert!(plain.accepts_successor(None));
        assert!(cond.accepts_successor(Some(&PosTag::NN)));
        assert!(!cond.accepts_successor(Some(&PosTag::VBD)));
        assert!(!cond.accepts_successor(None));
    }

    #[test]
    fn followed_by_ignored_for_names() {
        let r = Rule::Names(NameSet::new(vec!["Mary".into()], vec!["John".into()]))
            .followed_by(&[PosTag::NN]);
        assert!(r.if_followed_by().is_none());
    }

    #[test]
    fn title_case_semantics() {
        assert_eq!(title_case("mrs"), "Mrs");
        assert_eq!(title_case("COUNTESS"), "Countess");
        assert_eq!(title_case("o'neil"), "O'Neil");
        assert_eq!(title_case(""), "");
    }
}
