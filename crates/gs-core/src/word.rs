use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// PosTag
// ---------------------------------------------------------------------------

/// Penn Treebank part-of-speech tag.
///
/// Tags the rule engine never inspects still round-trip through
/// [`PosTag::Other`], so a tagger is free to emit its full tag set.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PosTag {
    /// Coordinating conjunction.
    CC,
    /// Cardinal number.
    CD,
    DT,
    IN,
    JJ,
    JJR,
    JJS,
    MD,
    /// Singular or mass noun.
    NN,
    /// Plural noun.
    NNS,
    /// Singular proper noun.
    NNP,
    NNPS,
    /// Personal pronoun (`she`, `her`).
    PRP,
    /// Possessive pronoun (`her`, `his`), written `PRP$`.
    PrpPossessive,
    RB,
    TO,
    VB,
    VBD,
    VBG,
    VBN,
    VBP,
    VBZ,
    WP,
    /// Any punctuation token.
    Punct,
    Other(String),
}

/// Tags eligible for pronoun and common-noun rules.
pub const WORD_CLASS_TAGS: &[PosTag] =
    &[PosTag::PRP, PosTag::PrpPossessive, PosTag::NN, PosTag::NNS];

/// Tags eligible for given-name rules.
pub const PROPER_NOUN_TAGS: &[PosTag] = &[PosTag::NNP];

/// Successor tags that make `her` a possessive determiner rather than an
/// object pronoun.
pub const NOMINAL_TAGS: &[PosTag] = &[
    PosTag::NN,
    PosTag::NNS,
    PosTag::NNP,
    PosTag::JJ,
    PosTag::JJR,
    PosTag::JJS,
];

impl PosTag {
    pub fn as_str(&self) -> &str {
        match self {
            PosTag::CC => "CC",
            PosTag::CD => "CD",
            PosTag::DT => "DT",
            PosTag::IN => "IN",
            PosTag::JJ => "JJ",
            PosTag::JJR => "JJR",
            PosTag::JJS => "JJS",
            PosTag::MD => "MD",
            PosTag::NN => "NN",
            PosTag::NNS => "NNS",
            PosTag::NNP => "NNP",
            PosTag::NNPS => "NNPS",
            PosTag::PRP => "PRP",
            PosTag::PrpPossessive => "PRP$",
            PosTag::RB => "RB",
            PosTag::TO => "TO",
            PosTag::VB => "VB",
            PosTag::VBD => "VBD",
            PosTag::VBG => "VBG",
            PosTag::VBN => "VBN",
            PosTag::VBP => "VBP",
            PosTag::VBZ => "VBZ",
            PosTag::WP => "WP",
            PosTag::Punct => "PUNCT",
            PosTag::Other(s) => s.as_str(),
        }
    }

    pub fn parse(s: &str) -> Self {
        match s {
            "CC" => PosTag::CC,
            "CD" => PosTag::CD,
            "DT" => PosTag::DT,
            "IN" => PosTag::IN,
            "JJ" => PosTag::JJ,
            "JJR" => PosTag::JJR,
            "JJS" => PosTag::JJS,
            "MD" => PosTag::MD,
            "NN" => PosTag::NN,
            "NNS" => PosTag::NNS,
            "NNP" => PosTag::NNP,
            "NNPS" => PosTag::NNPS,
            "PRP" => PosTag::PRP,
            "PRP$" => PosTag::PrpPossessive,
            "RB" => PosTag::RB,
            "TO" => PosTag::TO,
            "VB" => PosTag::VB,
            "VBD" => PosTag::VBD,
            "VBG" => PosTag::VBG,
            "VBN" => PosTag::VBN,
            "VBP" => PosTag::VBP,
            "VBZ" => PosTag::VBZ,
            "WP" => PosTag::WP,
            "PUNCT" => PosTag::Punct,
            other => PosTag::Other(other.to_string()),
        }
    }

    pub fn is_plural_noun(&self) -> bool {
        *self == PosTag::NNS
    }
}

impl From<String> for PosTag {
    fn from(s: String) -> Self {
        PosTag::parse(&s)
    }
}

impl From<PosTag> for String {
    fn from(tag: PosTag) -> Self {
        tag.as_str().to_string()
    }
}

impl fmt::Display for PosTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// TaggedWord
// ---------------------------------------------------------------------------

/// A token's surface text paired with its part-of-speech tag.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TaggedWord {
    pub text: String,
    pub tag: PosTag,
}

impl TaggedWord {
    pub fn new(text: impl Into<String>, tag: PosTag) -> Self {
        Self { text: text.into(), tag }
    }
}

// ---------------------------------------------------------------------------
// Substitution / Fragment
// ---------------------------------------------------------------------------

/// A token that the mapping changed: the original text and the label of its
/// replacement candidates (several tied candidates are joined by a separator).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Substitution {
    pub original: String,
    pub replacement: String,
}

/// One emitted token of a transformed sentence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Fragment {
    Word { text: String },
    Substitution(Substitution),
}

impl Fragment {
    pub fn word(text: impl Into<String>) -> Self {
        Fragment::Word { text: text.into() }
    }

    pub fn substitution(original: impl Into<String>, replacement: impl Into<String>) -> Self {
        Fragment::Substitution(Substitution {
            original: original.into(),
            replacement: replacement.into(),
        })
    }

    pub fn is_substitution(&self) -> bool {
        matches!(self, Fragment::Substitution(_))
    }
}

// ---------------------------------------------------------------------------
// RulePair
// ---------------------------------------------------------------------------

/// Flat exact-match rule `xx -> xy` as persisted in the rule cache.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RulePair {
    pub xx: String,
    pub xy: String,
}

impl RulePair {
    pub fn new(xx: impl Into<String>, xy: impl Into<String>) -> Self {
        Self { xx: xx.into(), xy: xy.into() }
    }
}
