//! Canonical keys shared by the catalog feed and the event log.
//!
//! Both feeds spell the same player and market differently ("Rec Yds" vs
//! "Receiving Yds", "T.J. Harden" vs "TJ Harden"). Everything here is a pure
//! function of its input and idempotent: normalizing a normalized value is a
//! no-op.

use std::collections::HashMap;

/// Characters dropped from entity names before comparison.
const STRIPPED_NAME_CHARS: &[char] = &['.', ',', '\'', '"', '\u{2019}'];

const DEFAULT_SYNONYMS: &[(&str, &str)] = &[
    ("Pass Yds", "Passing Yards"),
    ("Passing Yds", "Passing Yards"),
    ("Rec Yds", "Receiving Yards"),
    ("Receiving Yds", "Receiving Yards"),
    ("Rush Yds", "Rushing Yards"),
    ("Rushing Yds", "Rushing Yards"),
    ("Pass Comp", "Pass Completions"),
    ("Rec", "Receptions"),
    ("INT", "Interceptions"),
    ("Pass TDs", "Passing Touchdowns"),
    ("Kicking Pts", "Kicking Points"),
];

/// Lowercase, strip punctuation, and collapse whitespace runs.
#[must_use]
pub fn normalize_entity_name(name: &str) -> String {
    let stripped: String = name
        .to_lowercase()
        .chars()
        .filter(|c| !STRIPPED_NAME_CHARS.contains(c))
        .collect();
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn fold(label: &str) -> String {
    label
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Prop-type synonym table: label -> canonical label.
///
/// Lookup is case-insensitive on the trimmed label. Unmapped labels pass
/// through unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropTypeSynonyms {
    table: HashMap<String, String>,
}

impl PropTypeSynonyms {
    pub fn new<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let table = entries
            .into_iter()
            .map(|(label, canonical)| (fold(label.as_ref()), canonical.into()))
            .collect();
        Self { table }
    }

    /// Canonical spelling of a prop-type label.
    #[must_use]
    pub fn canonical(&self, label: &str) -> String {
        let label = label.trim();
        self.table
            .get(&fold(label))
            .cloned()
            .unwrap_or_else(|| label.to_string())
    }

    /// Labels whose canonical value is itself remapped to something else.
    ///
    /// A table with conflicts is not idempotent and is rejected by config
    /// validation.
    #[must_use]
    pub fn conflicts(&self) -> Vec<String> {
        let mut conflicts: Vec<String> = self
            .table
            .iter()
            .filter(|(_, canonical)| {
                self.table
                    .get(&fold(canonical))
                    .is_some_and(|next| fold(next) != fold(canonical))
            })
            .map(|(label, _)| label.clone())
            .collect();
        conflicts.sort();
        conflicts
    }
}

impl Default for PropTypeSynonyms {
    fn default() -> Self {
        Self::new(DEFAULT_SYNONYMS.iter().copied())
    }
}

/// Comparable (entity, prop type) key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PropKey {
    pub entity: String,
    pub prop_type: String,
}

/// Produces [`PropKey`]s for both feeds using one synonym table.
#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    synonyms: PropTypeSynonyms,
}

impl Normalizer {
    pub fn new(synonyms: PropTypeSynonyms) -> Self {
        Self { synonyms }
    }

    #[must_use]
    pub fn entity_name(&self, name: &str) -> String {
        normalize_entity_name(name)
    }

    #[must_use]
    pub fn prop_type(&self, label: &str) -> String {
        self.synonyms.canonical(label)
    }

    /// Key used for equality comparison across feeds.
    ///
    /// Only the synonym lookup ignores case; an unmapped prop type is
    /// compared exactly as written.
    #[must_use]
    pub fn key(&self, entity_name: &str, prop_type: &str) -> PropKey {
        PropKey {
            entity: self.entity_name(entity_name),
            prop_type: self.prop_type(prop_type),
        }
    }
}
