//! Display names for collections and fields
//!
//! Turns path keys such as `blog_posts` or `createdAt` into UI labels and
//! plural collection names, and derives identifiers for generated sources.

use convert_case::{Case, Casing};
use regex::Regex;
use std::sync::LazyLock;

/// Separators replaced with spaces when humanizing a key
static SEPARATOR_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[-_]").unwrap());

/// A word: one word character followed by anything up to the next whitespace
static WORD_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\w\S*").unwrap());

/// Irregular singular → plural pairs
const IRREGULAR: &[(&str, &str)] = &[
    ("person", "people"),
    ("man", "men"),
    ("woman", "women"),
    ("child", "children"),
    ("mouse", "mice"),
    ("goose", "geese"),
    ("foot", "feet"),
    ("tooth", "teeth"),
    ("ox", "oxen"),
    ("die", "dice"),
    ("leaf", "leaves"),
    ("loaf", "loaves"),
    ("calf", "calves"),
    ("half", "halves"),
    ("wolf", "wolves"),
    ("shelf", "shelves"),
    ("thief", "thieves"),
    ("life", "lives"),
    ("knife", "knives"),
    ("wife", "wives"),
    ("criterion", "criteria"),
    ("phenomenon", "phenomena"),
    ("datum", "data"),
    ("medium", "media"),
    ("curriculum", "curricula"),
    ("cactus", "cacti"),
    ("alumnus", "alumni"),
    ("fungus", "fungi"),
    ("radius", "radii"),
    ("syllabus", "syllabi"),
    ("genus", "genera"),
    ("index", "indices"),
    ("matrix", "matrices"),
    ("vertex", "vertices"),
    ("appendix", "appendices"),
    ("quiz", "quizzes"),
];

/// Words with no distinct plural form
const UNCOUNTABLE: &[&str] = &[
    "data",
    "information",
    "equipment",
    "feedback",
    "metadata",
    "news",
    "series",
    "species",
    "sheep",
    "fish",
    "deer",
    "moose",
    "rice",
    "money",
    "music",
    "software",
    "hardware",
    "staff",
    "traffic",
    "weather",
    "media",
    "police",
    "content",
    "analytics",
];

/// Consonant + `o` words that take `-oes`
const O_ES: &[&str] = &[
    "hero", "potato", "tomato", "echo", "veto", "torpedo", "volcano", "embargo",
];

/// Turn a path key into a display label.
///
/// Keys containing `-` or `_`, or no space at all, get separators replaced by
/// spaces and every word capitalized. Keys that already read like a phrase are
/// only trimmed.
pub fn humanize(key: &str) -> String {
    if key.contains('-') || key.contains('_') || !key.contains(' ') {
        let spaced = SEPARATOR_REGEX.replace_all(key, " ");
        WORD_REGEX
            .replace_all(&spaced, |caps: &regex::Captures<'_>| capitalize(&caps[0]))
            .trim()
            .to_string()
    } else {
        key.trim().to_string()
    }
}

/// Pluralize the last word of a display name, keeping its capitalization
pub fn pluralize(name: &str) -> String {
    let trimmed = name.trim_end();
    let split = trimmed
        .char_indices()
        .rev()
        .find(|(_, c)| c.is_whitespace())
        .map_or(0, |(i, c)| i + c.len_utf8());
    let (head, word) = trimmed.split_at(split);
    if word.is_empty() {
        return name.to_string();
    }

    let plural = plural_of(&word.to_lowercase());
    format!("{head}{}", restore_case(word, &plural))
}

/// JavaScript-style camelCase identifier for a collection
pub fn variable_name(collection_id: &str) -> String {
    let ident: String = collection_id
        .to_case(Case::Camel)
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || *c == '$')
        .collect();

    match ident.chars().next() {
        None => "collection".to_string(),
        Some(first) if first.is_ascii_digit() => format!("_{ident}"),
        Some(_) => ident,
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn plural_of(word: &str) -> String {
    if UNCOUNTABLE.contains(&word) {
        return word.to_string();
    }
    if let Some((_, plural)) = IRREGULAR.iter().find(|(singular, _)| *singular == word) {
        return (*plural).to_string();
    }
    if is_plural(word) {
        return word.to_string();
    }

    let ends_with_consonant_and = |suffix: char| {
        let mut rev = word.chars().rev();
        rev.next() == Some(suffix) && rev.next().is_some_and(|c| !is_vowel(c))
    };

    if let Some(stem) = word.strip_suffix("is") {
        format!("{stem}es")
    } else if ends_with_consonant_and('y') {
        format!("{}ies", &word[..word.len() - 1])
    } else if ["s", "x", "z", "ch", "sh"].iter().any(|s| word.ends_with(s)) {
        format!("{word}es")
    } else if O_ES.contains(&word) {
        format!("{word}es")
    } else {
        format!("{word}s")
    }
}

/// Already-plural words are left alone
fn is_plural(word: &str) -> bool {
    if IRREGULAR.iter().any(|(_, plural)| *plural == word) {
        return true;
    }
    word.len() > 2
        && word.ends_with('s')
        && !word.ends_with("ss")
        && !word.ends_with("us")
        && !word.ends_with("is")
}

fn is_vowel(c: char) -> bool {
    matches!(c, 'a' | 'e' | 'i' | 'o' | 'u')
}

fn restore_case(original: &str, plural: &str) -> String {
    let letters: Vec<char> = original.chars().filter(|c| c.is_alphabetic()).collect();
    if letters.len() > 1 && letters.iter().all(|c| c.is_uppercase()) {
        plural.to_uppercase()
    } else if original.chars().next().is_some_and(char::is_uppercase) {
        capitalize(plural)
    } else {
        plural.to_string()
    }
}
