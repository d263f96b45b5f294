// SPDX-License-Identifier: PMPL-1.0-or-later

//! Core data model: per-locale display names and the sets that hold them.

use crate::title::title_case;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::btree_map;
use std::collections::BTreeMap;

/// English and native display names of one locale.
///
/// The native name is title-cased on construction, so every entry that
/// reaches a [`LanguageSet`] (from a source or from a data file) is already
/// in display form.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(from = "EntryShape")]
pub struct LanguageEntry {
    english: Option<String>,
    native: Option<String>,
}

impl LanguageEntry {
    pub fn new(english: Option<String>, native: Option<String>) -> Self {
        Self {
            english,
            native: native.map(|name| {
                if name.is_empty() {
                    name
                } else {
                    title_case(&name)
                }
            }),
        }
    }

    /// Shorthand for an entry where both names are known.
    pub fn named(english: &str, native: &str) -> Self {
        Self::new(Some(english.to_string()), Some(native.to_string()))
    }

    pub fn english(&self) -> Option<&str> {
        self.english.as_deref()
    }

    pub fn native(&self) -> Option<&str> {
        self.native.as_deref()
    }

    /// True when neither name carries any text.
    pub fn is_blank(&self) -> bool {
        self.english().map_or(true, str::is_empty) && self.native().map_or(true, str::is_empty)
    }
}

// Written as `[english, native]`, the only shape this tool produces.
impl Serialize for LanguageEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        (&self.english, &self.native).serialize(serializer)
    }
}

/// Shapes accepted when reading a data file. Older files stored each entry
/// as `{"english": ..., "native": ...}`; those are migrated to the pair shape
/// on the next save.
#[derive(Deserialize)]
#[serde(untagged)]
enum EntryShape {
    Pair(Option<String>, Option<String>),
    Record {
        #[serde(default)]
        english: Option<String>,
        #[serde(default)]
        native: Option<String>,
    },
}

impl From<EntryShape> for LanguageEntry {
    fn from(shape: EntryShape) -> Self {
        match shape {
            EntryShape::Pair(english, native) => LanguageEntry::new(english, native),
            EntryShape::Record { english, native } => LanguageEntry::new(english, native),
        }
    }
}

/// Locale code to display names, always ordered by code.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LanguageSet {
    entries: BTreeMap<String, LanguageEntry>,
}

impl LanguageSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, code: impl Into<String>, entry: LanguageEntry) -> Option<LanguageEntry> {
        self.entries.insert(code.into(), entry)
    }

    pub fn get(&self, code: &str) -> Option<&LanguageEntry> {
        self.entries.get(code)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Overwrite-by-key merge: every entry of `other` replaces the entry with
    /// the same code, codes only present here are kept.
    pub fn merge(&mut self, other: LanguageSet) {
        self.entries.extend(other.entries);
    }
}

impl FromIterator<(String, LanguageEntry)> for LanguageSet {
    fn from_iter<I: IntoIterator<Item = (String, LanguageEntry)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for LanguageSet {
    type Item = (String, LanguageEntry);
    type IntoIter = btree_map::IntoIter<String, LanguageEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a LanguageSet {
    type Item = (&'a String, &'a LanguageEntry);
    type IntoIter = btree_map::Iter<'a, String, LanguageEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(entries: &[(&str, &str, &str)]) -> LanguageSet {
        entries
            .iter()
            .map(|(code, english, native)| (code.to_string(), LanguageEntry::named(english, native)))
            .collect()
    }

    #[test]
    fn native_name_is_title_cased() {
        let entry = LanguageEntry::named("French", "français");
        assert_eq!(entry.native(), Some("Français"));
        assert_eq!(entry.english(), Some("French"));
    }

    #[test]
    fn english_name_is_kept_verbatim() {
        let entry = LanguageEntry::named("chinese (traditional)", "中文");
        assert_eq!(entry.english(), Some("chinese (traditional)"));
    }

    #[test]
    fn blank_entries() {
        assert!(LanguageEntry::new(None, None).is_blank());
        assert!(LanguageEntry::new(Some(String::new()), None).is_blank());
        assert!(!LanguageEntry::new(None, Some("Deutsch".into())).is_blank());
    }

    #[test]
    fn merge_overwrites_by_key() {
        let mut base = set(&[("en", "English", "english"), ("de", "German", "deutsch")]);
        base.merge(set(&[("en", "English", "English"), ("fr", "French", "français")]));

        assert_eq!(base.len(), 3);
        assert_eq!(base.get("en").and_then(LanguageEntry::native), Some("English"));
        assert_eq!(base.get("de").and_then(LanguageEntry::native), Some("Deutsch"));
        assert_eq!(base.get("fr").and_then(LanguageEntry::native), Some("Français"));
    }

    #[test]
    fn merge_replaces_whole_entry() {
        let mut base = set(&[("pt", "Portuguese", "português")]);
        let mut update = LanguageSet::new();
        update.insert("pt", LanguageEntry::new(None, Some("Português".into())));
        base.merge(update);

        let pt = base.get("pt").unwrap();
        assert_eq!(pt.english(), None);
        assert_eq!(pt.native(), Some("Português"));
    }

    #[test]
    fn codes_are_sorted() {
        let languages = set(&[("pt_BR", "a", "b"), ("en", "c", "d"), ("de", "e", "f")]);
        let codes: Vec<&str> = languages.codes().collect();
        assert_eq!(codes, vec!["de", "en", "pt_BR"]);
    }

    #[test]
    fn reads_pair_and_record_shapes() {
        let json = r#"{"en": ["English", "english"], "fr": {"english": "French", "native": "français"}, "xx": [null, null]}"#;
        let languages: LanguageSet = serde_json::from_str(json).unwrap();

        assert_eq!(languages.get("en"), Some(&LanguageEntry::named("English", "English")));
        assert_eq!(languages.get("fr"), Some(&LanguageEntry::named("French", "Français")));
        assert_eq!(languages.get("xx"), Some(&LanguageEntry::new(None, None)));
    }

    #[test]
    fn record_shape_fields_are_optional() {
        let languages: LanguageSet = serde_json::from_str(r#"{"eo": {"native": "esperanto"}}"#).unwrap();
        assert_eq!(
            languages.get("eo"),
            Some(&LanguageEntry::new(None, Some("Esperanto".into())))
        );
    }

    #[test]
    fn writes_pair_shape() {
        let languages = set(&[("fr", "French", "français")]);
        let json = serde_json::to_string(&languages).unwrap();
        assert_eq!(json, r#"{"fr":["French","Français"]}"#);
    }

    #[test]
    fn rejects_wrong_shapes() {
        assert!(serde_json::from_str::<LanguageSet>(r#"{"en": "English"}"#).is_err());
        assert!(serde_json::from_str::<LanguageSet>(r#"["en"]"#).is_err());
    }
}
