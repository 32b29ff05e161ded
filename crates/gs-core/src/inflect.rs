//! Singular/plural inflection for English nouns.
//!
//! The rule engine never inflects in place: it asks an [`Inflector`] for the
//! singular form before matching and for the plural form of the winning
//! replacement afterwards.

/// Pure singular/plural conversion supplied by the tagging collaborator.
pub trait Inflector {
    fn singularize(&self, word: &str) -> String;
    fn pluralize(&self, word: &str) -> String;
}

/// Suffix-rule English inflector with a small irregular table.
///
/// Letter case of the input is carried over to the output (`WOMEN` ->
/// `WOMAN`, `Actresses` -> `Actress`).
#[derive(Debug, Clone, Copy, Default)]
pub struct EnglishInflector;

/// `(singular, plural)` pairs that no suffix rule gets right.
const IRREGULAR: &[(&str, &str)] = &[
    ("child", "children"),
    ("person", "people"),
    ("foot", "feet"),
    ("tooth", "teeth"),
    ("goose", "geese"),
    ("mouse", "mice"),
    ("wife", "wives"),
    ("life", "lives"),
    ("knife", "knives"),
    ("wolf", "wolves"),
    ("half", "halves"),
    ("ox", "oxen"),
];

/// Words ending in `o` whose plural takes `-es` (`hero` -> `heroes`).
const O_ES: &[&str] = &[
    "hero", "negro", "potato", "tomato", "echo", "veto", "torpedo", "embargo", "volcano",
];

const UNINFLECTED: &[&str] = &["sheep", "deer", "fish", "series", "species", "news"];

/// Words ending in `man` that do not pluralize to `men`.
const MAN_EXCEPTIONS: &[&str] = &[
    "human", "german", "shaman", "talisman", "caiman", "ottoman", "roman",
];

/// Words ending in `men` that are not plurals of `-man`.
const MEN_EXCEPTIONS: &[&str] = &["omen", "amen", "specimen", "abdomen", "stamen", "regimen"];

impl Inflector for EnglishInflector {
    fn singularize(&self, word: &str) -> String {
        with_case_of(word, singular_lower(&word.to_lowercase()))
    }

    fn pluralize(&self, word: &str) -> String {
        with_case_of(word, plural_lower(&word.to_lowercase()))
    }
}

fn singular_lower(w: &str) -> String {
    if w.is_empty() || UNINFLECTED.contains(&w) {
        return w.to_string();
    }
    if let Some((singular, _)) = IRREGULAR.iter().find(|(_, plural)| *plural == w) {
        return singular.to_string();
    }
    if let Some(stem) = w.strip_suffix("men") {
        if !MEN_EXCEPTIONS.contains(&w) {
            return format!("{stem}man");
        }
    }
    if let Some(stem) = w.strip_suffix("ies") {
        if stem.chars().count() > 1 {
            return format!("{stem}y");
        }
    }
    if let Some(stem) = w.strip_suffix("es") {
        if O_ES.contains(&stem) {
            return stem.to_string();
        }
    }
    for suffix in ["sses", "shes", "ches", "xes", "zzes"] {
        if w.ends_with(suffix) {
            return w[..w.len() - 2].to_string();
        }
    }
    if w.ends_with("ss") || w.ends_with("us") || w.ends_with("is") {
        return w.to_string();
    }
    match w.strip_suffix('s') {
        Some(stem) if !stem.is_empty() => stem.to_string(),
        _ => w.to_string(),
    }
}

fn plural_lower(w: &str) -> String {
    if w.is_empty() || UNINFLECTED.contains(&w) {
        return w.to_string();
    }
    if let Some((_, plural)) = IRREGULAR.iter().find(|(singular, _)| *singular == w) {
        return plural.to_string();
    }
    if let Some(stem) = w.strip_suffix("man") {
        if !MAN_EXCEPTIONS.contains(&w) {
            return format!("{stem}men");
        }
    }
    if let Some(stem) = w.strip_suffix('y') {
        let before = stem.chars().last();
        if matches!(before, Some(c) if !"aeiou".contains(c)) {
            return format!("{stem}ies");
        }
    }
    if O_ES.contains(&w) {
        return format!("{w}es");
    }
    for suffix in ["s", "sh", "ch", "x", "z"] {
        if w.ends_with(suffix) {
            return format!("{w}es");
        }
    }
    format!("{w}s")
}

/// Re-apply the letter case of `template` to the lower-case `lower`.
fn with_case_of(template: &str, lower: String) -> String {
    let mut cased = template.chars().filter(|c| c.is_alphabetic());
    let Some(first) = cased.next() else {
        return lower;
    };
    let rest_upper = cased.clone().count() > 0 && cased.all(|c| c.is_uppercase());
    if first.is_uppercase() && rest_upper {
        return lower.to_uppercase();
    }
    if first.is_uppercase() {
        let mut chars = lower.chars();
        return match chars.next() {
            Some(c) => c.to_uppercase().chain(chars).collect(),
            None => lower,
        };
    }
    lower
}
