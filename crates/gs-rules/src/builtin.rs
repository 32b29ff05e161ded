//! Hand-authored rules.
//!
//! These cover the closed-class words (pronouns, titles) and the handful of
//! nouns the lexical synthesizer misses. Order matters: an earlier rule
//! shadows any later rule that matches the same token.

use gs_core::NOMINAL_TAGS;

use crate::names::NameSet;
use crate::rule::Rule;

pub fn static_rules(names: NameSet) -> Vec<Rule> {
    vec![
        Rule::exact("madam", "sir"),
        Rule::exact("Mrs", "Mr"),
        Rule::exact("Miss", "Mister"),
        Rule::exact("she", "he"),
        Rule::exact("her", "his").followed_by(NOMINAL_TAGS),
        Rule::exact("her", "him"),
        Rule::exact("hers", "his"),
        Rule::exact("herself", "himself"),
        Rule::exact("woman", "man"),
        Rule::exact("female", "male"),
        // Suffix(daughter, son) would turn "person" into "perdaughter".
        Rule::exact("daughter", "son"),
        Rule::exact("girl", "boy"),
        Rule::prefix("queen", "king"),
        // Not produced by the synthesizer.
        Rule::exact("Countess", "Count"),
        Rule::exact("Princess", "Prince"),
        Rule::exact("gentlewoman", "gentleman"),
        Rule::exact("sister", "brother"),
        Rule::Names(names),
    ]
}
