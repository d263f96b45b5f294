// SPDX-License-Identifier: PMPL-1.0-or-later

//! The project's own translation catalogs as a locale source.
//!
//! Every `messages_<code>.po` file in the data directory is a shipped
//! translation. Its header names the language in English
//! (`Language-Name`) and in the language itself (`Language-Native-Name`).
//! Both fields are required: a catalog without them is a packaging error.

use super::po::read_catalog_header;
use super::{DisplayNames, LocaleSource, SourceError, SourceKind};
use anyhow::Result;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

const CATALOG_PREFIX: &str = "messages";
const CATALOG_EXTENSION: &str = "po";

pub const ENGLISH_NAME_FIELD: &str = "Language-Name";
pub const NATIVE_NAME_FIELD: &str = "Language-Native-Name";

#[derive(Debug, Clone)]
pub struct TranslationCatalogs {
    data_dir: PathBuf,
}

impl TranslationCatalogs {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            data_dir: data_dir.to_path_buf(),
        }
    }

    pub fn catalog_path(&self, code: &str) -> PathBuf {
        self.data_dir
            .join(format!("{}_{}.{}", CATALOG_PREFIX, code, CATALOG_EXTENSION))
    }

    /// Shipped translation codes plus the bare language of every regional
    /// one, so `pt_BR` also yields `pt`. Suitable as a filter for
    /// [`super::languages`].
    pub fn translation_codes(&self) -> BTreeSet<String> {
        let mut codes = BTreeSet::new();
        for code in self.available_locales() {
            if let Some((language, _)) = code.split_once('_') {
                codes.insert(language.to_string());
            }
            codes.insert(code);
        }
        codes
    }
}

/// Locale code of a catalog file name, `messages_pt_BR.po` -> `pt_BR`.
fn catalog_code(file_name: &str) -> Option<&str> {
    let stem = file_name.strip_suffix(CATALOG_EXTENSION)?.strip_suffix('.')?;
    let (prefix, code) = stem.split_once('_')?;
    if prefix == CATALOG_PREFIX && !code.is_empty() {
        Some(code)
    } else {
        None
    }
}

impl LocaleSource for TranslationCatalogs {
    fn kind(&self) -> SourceKind {
        SourceKind::Catalogs
    }

    fn probe(&self) -> Result<(), SourceError> {
        if self.data_dir.is_dir() {
            Ok(())
        } else {
            Err(SourceError::Unavailable {
                source: SourceKind::Catalogs,
                reason: format!("data directory {} not found", self.data_dir.display()),
            })
        }
    }

    fn available_locales(&self) -> BTreeSet<String> {
        let Ok(entries) = fs::read_dir(&self.data_dir) else {
            return BTreeSet::new();
        };

        entries
            .flatten()
            .filter(|entry| entry.path().is_file())
            .filter_map(|entry| {
                let name = entry.file_name();
                catalog_code(name.to_str()?).map(str::to_string)
            })
            .collect()
    }

    fn display_names(&self, code: &str) -> Result<DisplayNames> {
        let path = self.catalog_path(code);
        let header = read_catalog_header(&path)?.ok_or_else(|| SourceError::MissingMetadata {
            path: path.clone(),
            field: ENGLISH_NAME_FIELD,
        })?;

        let field = |name: &'static str| {
            header
                .get(name)
                .map(str::to_string)
                .ok_or_else(|| SourceError::MissingMetadata {
                    path: path.clone(),
                    field: name,
                })
        };

        Ok(DisplayNames::new(
            Some(field(ENGLISH_NAME_FIELD)?),
            Some(field(NATIVE_NAME_FIELD)?),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_catalog(dir: &Path, code: &str, english: &str, native: &str) {
        let body = format!(
            "msgid \"\"\nmsgstr \"\"\n\"Language-Name: {}\\n\"\n\"Language-Native-Name: {}\\n\"\n",
            english, native
        );
        fs::write(dir.join(format!("messages_{}.po", code)), body).unwrap();
    }

    #[test]
    fn catalog_codes_from_file_names() {
        assert_eq!(catalog_code("messages_fr.po"), Some("fr"));
        assert_eq!(catalog_code("messages_pt_BR.po"), Some("pt_BR"));
        assert_eq!(catalog_code("messages_.po"), None);
        assert_eq!(catalog_code("messages_fr.pot"), None);
        assert_eq!(catalog_code("strings_fr.po"), None);
        assert_eq!(catalog_code("messages.po"), None);
    }

    #[test]
    fn lists_only_catalog_files() {
        let dir = TempDir::new().unwrap();
        write_catalog(dir.path(), "de", "German", "Deutsch");
        write_catalog(dir.path(), "pt_BR", "Portuguese (Brazil)", "português do brasil");
        fs::write(dir.path().join("languages.dat"), "{}\n").unwrap();
        fs::create_dir(dir.path().join("messages_xx.po")).unwrap();

        let source = TranslationCatalogs::new(dir.path());
        let codes: Vec<String> = source.available_locales().into_iter().collect();
        assert_eq!(codes, vec!["de".to_string(), "pt_BR".to_string()]);
    }

    #[test]
    fn translation_codes_include_bare_languages() {
        let dir = TempDir::new().unwrap();
        write_catalog(dir.path(), "pt_BR", "Portuguese (Brazil)", "português do brasil");
        write_catalog(dir.path(), "en_US", "English (US)", "English (US)");

        let codes: Vec<String> = TranslationCatalogs::new(dir.path())
            .translation_codes()
            .into_iter()
            .collect();
        assert_eq!(codes, vec!["en", "en_US", "pt", "pt_BR"]);
    }

    #[test]
    fn reads_header_names() {
        let dir = TempDir::new().unwrap();
        write_catalog(dir.path(), "fr", "French", "français");

        let names = TranslationCatalogs::new(dir.path()).display_names("fr").unwrap();
        assert_eq!(names.english.as_deref(), Some("French"));
        assert_eq!(names.native.as_deref(), Some("français"));
    }

    #[test]
    fn missing_native_field_is_an_error() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("messages_it.po"),
            "msgid \"\"\nmsgstr \"Language-Name: Italian\\n\"\n",
        )
        .unwrap();

        let err = TranslationCatalogs::new(dir.path()).display_names("it").unwrap_err();
        match err.downcast_ref::<SourceError>() {
            Some(SourceError::MissingMetadata { field, .. }) => assert_eq!(*field, NATIVE_NAME_FIELD),
            other => panic!("expected missing metadata, got {:?}", other),
        }
    }

    #[test]
    fn missing_data_dir_is_unavailable() {
        let source = TranslationCatalogs::new(Path::new("/nonexistent/language-names/data"));
        assert!(source.probe().is_err());
        assert!(source.available_locales().is_empty());
    }
}
