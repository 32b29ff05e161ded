//! Sentence splitting and part-of-speech tagging.
//!
//! [`Tagger`] is the seam between the transformer and whatever tagging
//! model is available. [`HeuristicTagger`] is a dependency-free tagger
//! good enough for narrative English prose:
//! - Sentences end after `.`, `!` or `?` (plus closing quotes or brackets)
//!   followed by whitespace, except after common abbreviations.
//! - Words keep internal apostrophes and hyphens; every other punctuation
//!   character is its own token.
//! - Closed-class words come from a lexicon; `her` is possessive when the
//!   next token is an open-class word.
//! - Capitalized words that do not start a sentence are proper nouns.
//! - Otherwise suffixes decide (`-ing`, `-ed`, `-ly`, plurals).
//!
//! Example:
//!   "Her hat was red." →
//!   [Her/PRP$][hat/NN][was/VBD][red/NN][./PUNCT]

use std::collections::HashMap;

use gs_core::{EnglishInflector, Inflector, PosTag, TaggedWord};

// ---------------------------------------------------------------------------
// Tagger trait
// ---------------------------------------------------------------------------

pub trait Tagger: Inflector + Send + Sync {
    /// Split running text into sentences, in order.
    fn sentences(&self, text: &str) -> Vec<String>;

    /// Tokenize and tag one sentence.
    fn tag(&self, sentence: &str) -> Vec<TaggedWord>;

    /// Whether `token` attaches to the previous token when text is
    /// reassembled.
    fn is_punctuation(&self, token: &str) -> bool {
        is_punctuation_token(token)
    }
}

/// A token is punctuation when it starts with an ASCII punctuation
/// character. The en-dash and curly quotes are spaced like words.
pub fn is_punctuation_token(token: &str) -> bool {
    token.chars().next().is_some_and(|c| c.is_ascii_punctuation())
}

/// Tokens tagged `PUNCT`: the first character is neither a word character
/// nor whitespace.
fn is_symbol_token(token: &str) -> bool {
    match token.chars().next() {
        Some(c) => !(c.is_alphanumeric() || c == '_' || c.is_whitespace()),
        None => false,
    }
}

// ---------------------------------------------------------------------------
// Lexicon
// ---------------------------------------------------------------------------

const CLOSED_CLASS: &[(&str, PosTag)] = &[
    ("i", PosTag::PRP),
    ("me", PosTag::PRP),
    ("you", PosTag::PRP),
    ("he", PosTag::PRP),
    ("him", PosTag::PRP),
    ("she", PosTag::PRP),
    ("it", PosTag::PRP),
    ("we", PosTag::PRP),
    ("us", PosTag::PRP),
    ("they", PosTag::PRP),
    ("them", PosTag::PRP),
    ("myself", PosTag::PRP),
    ("yourself", PosTag::PRP),
    ("himself", PosTag::PRP),
    ("herself", PosTag::PRP),
    ("itself", PosTag::PRP),
    ("ourselves", PosTag::PRP),
    ("themselves", PosTag::PRP),
    ("mine", PosTag::PRP),
    ("yours", PosTag::PRP),
    ("hers", PosTag::PRP),
    ("ours", PosTag::PRP),
    ("theirs", PosTag::PRP),
    ("my", PosTag::PrpPossessive),
    ("your", PosTag::PrpPossessive),
    ("his", PosTag::PrpPossessive),
    ("its", PosTag::PrpPossessive),
    ("our", PosTag::PrpPossessive),
    ("their", PosTag::PrpPossessive),
    ("the", PosTag::DT),
    ("a", PosTag::DT),
    ("an", PosTag::DT),
    ("this", PosTag::DT),
    ("that", PosTag::DT),
    ("these", PosTag::DT),
    ("those", PosTag::DT),
    ("each", PosTag::DT),
    ("every", PosTag::DT),
    ("some", PosTag::DT),
    ("any", PosTag::DT),
    ("no", PosTag::DT),
    ("all", PosTag::DT),
    ("another", PosTag::DT),
    ("of", PosTag::IN),
    ("in", PosTag::IN),
    ("on", PosTag::IN),
    ("at", PosTag::IN),
    ("by", PosTag::IN),
    ("for", PosTag::IN),
    ("with", PosTag::IN),
    ("from", PosTag::IN),
    ("about", PosTag::IN),
    ("into", PosTag::IN),
    ("upon", PosTag::IN),
    ("over", PosTag::IN),
    ("under", PosTag::IN),
    ("after", PosTag::IN),
    ("before", PosTag::IN),
    ("through", PosTag::IN),
    ("than", PosTag::IN),
    ("as", PosTag::IN),
    ("if", PosTag::IN),
    ("because", PosTag::IN),
    ("while", PosTag::IN),
    ("though", PosTag::IN),
    ("until", PosTag::IN),
    ("to", PosTag::TO),
    ("and", PosTag::CC),
    ("or", PosTag::CC),
    ("but", PosTag::CC),
    ("nor", PosTag::CC),
    ("can", PosTag::MD),
    ("could", PosTag::MD),
    ("will", PosTag::MD),
    ("would", PosTag::MD),
    ("shall", PosTag::MD),
    ("should", PosTag::MD),
    ("may", PosTag::MD),
    ("might", PosTag::MD),
    ("must", PosTag::MD),
    ("be", PosTag::VB),
    ("is", PosTag::VBZ),
    ("has", PosTag::VBZ),
    ("does", PosTag::VBZ),
    ("says", PosTag::VBZ),
    ("am", PosTag::VBP),
    ("are", PosTag::VBP),
    ("have", PosTag::VBP),
    ("do", PosTag::VBP),
    ("was", PosTag::VBD),
    ("were", PosTag::VBD),
    ("had", PosTag::VBD),
    ("did", PosTag::VBD),
    ("said", PosTag::VBD),
    ("went", PosTag::VBD),
    ("came", PosTag::VBD),
    ("saw", PosTag::VBD),
    ("made", PosTag::VBD),
    ("knew", PosTag::VBD),
    ("thought", PosTag::VBD),
    ("took", PosTag::VBD),
    ("found", PosTag::VBD),
    ("told", PosTag::VBD),
    ("gave", PosTag::VBD),
    ("felt", PosTag::VBD),
    ("been", PosTag::VBN),
    ("being", PosTag::VBG),
    ("not", PosTag::RB),
    ("very", PosTag::RB),
    ("never", PosTag::RB),
    ("always", PosTag::RB),
    ("also", PosTag::RB),
    ("then", PosTag::RB),
    ("there", PosTag::RB),
    ("here", PosTag::RB),
    ("now", PosTag::RB),
    ("just", PosTag::RB),
    ("only", PosTag::RB),
    ("too", PosTag::RB),
    ("quite", PosTag::RB),
    ("so", PosTag::RB),
    ("who", PosTag::WP),
    ("whom", PosTag::WP),
    ("what", PosTag::WP),
    // Honorifics are common nouns even when capitalized mid-sentence.
    ("mrs", PosTag::NN),
    ("mr", PosTag::NN),
    ("miss", PosTag::NN),
    ("mister", PosTag::NN),
    ("madam", PosTag::NN),
    ("sir", PosTag::NN),
    ("lady", PosTag::NN),
    ("lord", PosTag::NN),
    ("queen", PosTag::NN),
    ("king", PosTag::NN),
    ("princess", PosTag::NN),
    ("prince", PosTag::NN),
    ("countess", PosTag::NN),
    ("count", PosTag::NN),
];

/// Lower-case words after which a `.` does not end a sentence.
const ABBREVIATIONS: &[&str] = &["mr", "mrs", "ms", "dr", "st", "mt", "messrs"];

const CLOSING: &[char] = &['"', '\'', ')', ']', '\u{2019}', '\u{201D}'];

// ---------------------------------------------------------------------------
// HeuristicTagger
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct HeuristicTagger {
    lexicon: HashMap<String, PosTag>,
    inflector: EnglishInflector,
}

impl Default for HeuristicTagger {
    fn default() -> Self {
        Self::new()
    }
}

impl HeuristicTagger {
    pub fn new() -> Self {
        let lexicon = CLOSED_CLASS
            .iter()
            .map(|(w, t)| (w.to_string(), t.clone()))
            .collect();
        Self {
            lexicon,
            inflector: EnglishInflector,
        }
    }

    /// Fix the tag of `word`. Entries are matched case-sensitively first,
    /// then by their lower-case form.
    pub fn with_lexicon(mut self, word: impl Into<String>, tag: PosTag) -> Self {
        self.lexicon.insert(word.into(), tag);
        self
    }

    /// Tag every name as a proper noun, including at the start of a
    /// sentence.
    pub fn with_proper_nouns<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for name in names {
            self.lexicon.insert(name.into(), PosTag::NNP);
        }
        self
    }

    fn lookup(&self, word: &str) -> Option<&PosTag> {
        self.lexicon
            .get(word)
            .or_else(|| self.lexicon.get(&word.to_lowercase()))
    }

    fn tag_open_class(&self, word: &str, sentence_initial: bool) -> PosTag {
        if is_number(word) {
            return PosTag::CD;
        }
        let starts_upper = word.chars().next().is_some_and(char::is_uppercase);
        if starts_upper && !sentence_initial {
            return PosTag::NNP;
        }

        let lower = word.to_lowercase();
        let len = lower.chars().count();
        if len > 4 && lower.ends_with("ing") {
            PosTag::VBG
        } else if len > 3 && lower.ends_with("ed") {
            PosTag::VBD
        } else if len > 3 && lower.ends_with("ly") {
            PosTag::RB
        } else if self.inflector.singularize(&lower) != lower {
            PosTag::NNS
        } else {
            PosTag::NN
        }
    }
}

impl Inflector for HeuristicTagger {
    fn singularize(&self, word: &str) -> String {
        self.inflector.singularize(word)
    }

    fn pluralize(&self, word: &str) -> String {
        self.inflector.pluralize(word)
    }
}

impl Tagger for HeuristicTagger {
    fn sentences(&self, text: &str) -> Vec<String> {
        let chars: Vec<char> = text.chars().collect();
        let mut sentences = Vec::new();
        let mut start = 0;
        let mut i = 0;

        while i < chars.len() {
            if !matches!(chars[i], '.' | '!' | '?') {
                i += 1;
                continue;
            }
            let terminal = i;
            let mut end = i + 1;
            while end < chars.len()
                && (matches!(chars[end], '.' | '!' | '?') || CLOSING.contains(&chars[end]))
            {
                end += 1;
            }
            let at_boundary = end == chars.len() || chars[end].is_whitespace();
            let abbreviated =
                chars[terminal] == '.' && follows_abbreviation(&chars[start..terminal]);
            if at_boundary && !abbreviated {
                push_trimmed(&mut sentences, &chars[start..end]);
                start = end;
            }
            i = end;
        }
        push_trimmed(&mut sentences, &chars[start..]);

        sentences
    }

    fn tag(&self, sentence: &str) -> Vec<TaggedWord> {
        let tokens = split_tokens(sentence);
        let mut tagged: Vec<TaggedWord> = Vec::with_capacity(tokens.len());
        let mut sentence_initial = true;

        for (idx, token) in tokens.iter().enumerate() {
            if is_symbol_token(token) {
                tagged.push(TaggedWord::new(token.as_str(), PosTag::Punct));
                if is_opening(token) {
                    sentence_initial = true;
                }
                continue;
            }

            let tag = match self.lookup(token) {
                Some(tag) => tag.clone(),
                None if token.eq_ignore_ascii_case("her") => {
                    self.her_tag(tokens.get(idx + 1).map(String::as_str))
                }
                None => self.tag_open_class(token, sentence_initial),
            };
            tagged.push(TaggedWord::new(token.as_str(), tag));
            sentence_initial = false;
        }

        tagged
    }
}

impl HeuristicTagger {
    /// `her` before an open-class word is a determiner ("her hat"),
    /// anywhere else an object pronoun ("gave her the book").
    fn her_tag(&self, next: Option<&str>) -> PosTag {
        match next {
            Some(word) if !is_symbol_token(word) => match self.lookup(word) {
                None => PosTag::PrpPossessive,
                Some(tag) if matches!(tag, PosTag::NN | PosTag::NNS | PosTag::NNP | PosTag::JJ) => {
                    PosTag::PrpPossessive
                }
                Some(_) => PosTag::PRP,
            },
            _ => PosTag::PRP,
        }
    }
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn push_trimmed(out: &mut Vec<String>, chars: &[char]) {
    let s: String = chars.iter().collect();
    let trimmed = s.trim();
    if !trimmed.is_empty() {
        out.push(trimmed.to_string());
    }
}

fn follows_abbreviation(before: &[char]) -> bool {
    let word: String = before
        .iter()
        .rev()
        .take_while(|c| c.is_alphabetic())
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();
    ABBREVIATIONS.contains(&word.to_lowercase().as_str())
}

fn is_opening(token: &str) -> bool {
    matches!(token, "\"" | "(" | "[" | "\u{201C}" | "\u{2018}")
}

fn is_number(word: &str) -> bool {
    word.chars().any(|c| c.is_ascii_digit())
        && word.chars().all(|c| c.is_ascii_digit() || c == ',' || c == '.')
}

/// Split a sentence into word and punctuation tokens, dropping whitespace.
fn split_tokens(sentence: &str) -> Vec<String> {
    let chars: Vec<char> = sentence.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let ch = chars[i];
        if ch.is_whitespace() {
            i += 1;
            continue;
        }

        if !is_word_char(ch) {
            tokens.push(ch.to_string());
            i += 1;
            continue;
        }

        let start = i;
        while i < chars.len() {
            if is_word_char(chars[i]) {
                i += 1;
            } else if is_joiner(chars[i])
                && i + 1 < chars.len()
                && is_word_char(chars[i + 1])
            {
                i += 2;
            } else if matches!(chars[i], ',' | '.')
                && chars[i - 1].is_ascii_digit()
                && i + 1 < chars.len()
                && chars[i + 1].is_ascii_digit()
            {
                i += 2;
            } else {
                break;
            }
        }
        tokens.push(chars[start..i].iter().collect());
    }

    tokens
}

fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}

/// Characters kept inside a word when letters follow them.
fn is_joiner(ch: char) -> bool {
    matches!(ch, '\'' | '-' | '\u{2019}')
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
