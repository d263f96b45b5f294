// SPDX-License-Identifier: PMPL-1.0-or-later

//! Merge & persist driver.
//!
//! Builds the languages data in three layers, each overwriting the codes it
//! shares with the layers below:
//!
//! 1. the first available locale registry (in configured seed order),
//! 2. the previously saved `languages.dat`,
//! 3. the project's translation catalogs.
//!
//! The result replaces `languages.dat`.

use crate::config::Config;
use crate::sources::{self, LocaleSource, SourceKind, SourceRegistry};
use crate::storage;
use crate::types::LanguageSet;
use anyhow::{Context, Result};
use colored::*;
use std::io;
use std::path::PathBuf;

/// What a merge run did, layer by layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeSummary {
    /// Registry that seeded the data, if any was available.
    pub seed: Option<SourceKind>,
    pub seeded: usize,
    /// Entries read back from the existing data file.
    pub persisted: usize,
    /// Entries taken from the translation catalogs.
    pub translations: usize,
    /// Entries written to `path`.
    pub saved: usize,
    pub path: PathBuf,
}

/// Merged languages data, before it is written out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collected {
    pub languages: LanguageSet,
    pub seed: Option<SourceKind>,
    pub seeded: usize,
    pub persisted: usize,
    pub translations: usize,
}

/// Languages from the first registry whose backing data is present.
///
/// Unavailable registries are skipped with a warning. Returns an empty set
/// when none is available.
pub fn seed_from_registries<'a>(
    registries: impl IntoIterator<Item = &'a dyn LocaleSource>,
) -> Result<(Option<SourceKind>, LanguageSet)> {
    for source in registries {
        match source.probe() {
            Ok(()) => {
                let languages = sources::languages(source, None)
                    .with_context(|| format!("reading locale source '{}'", source.kind()))?;
                return Ok((Some(source.kind()), languages));
            }
            Err(reason) => {
                eprintln!("{} {}, skipping", "warning:".yellow().bold(), reason);
            }
        }
    }
    Ok((None, LanguageSet::new()))
}

/// Previously saved languages data. A missing file is empty; a file that
/// cannot be read is reported and treated as empty.
fn load_persisted(config: &Config) -> Result<LanguageSet> {
    let path = config.data_file();
    match storage::load_languages(&path) {
        Ok(Some(languages)) => Ok(languages),
        Ok(None) => Ok(LanguageSet::new()),
        Err(err) if err.downcast_ref::<io::Error>().is_some() => {
            eprintln!(
                "{} ignoring unreadable languages data: {:#}",
                "warning:".yellow().bold(),
                err
            );
            Ok(LanguageSet::new())
        }
        Err(err) => Err(err),
    }
}

/// Run the three merge layers without writing anything.
pub fn collect(config: &Config, registry: &SourceRegistry) -> Result<Collected> {
    let (seed, mut languages) = seed_from_registries(registry.registries())?;
    let seeded = languages.len();

    let persisted = load_persisted(config)?;
    let persisted_count = persisted.len();
    languages.merge(persisted);

    let catalogs = registry.catalogs();
    catalogs.probe()?;
    let translations = sources::languages(catalogs, None).context("reading translation catalogs")?;
    let translation_count = translations.len();
    languages.merge(translations);

    Ok(Collected {
        languages,
        seed,
        seeded,
        persisted: persisted_count,
        translations: translation_count,
    })
}

/// Merge all layers and replace the data file with the result.
pub fn run(config: &Config, registry: &SourceRegistry) -> Result<MergeSummary> {
    let collected = collect(config, registry)?;
    let path = config.data_file();

    storage::save_languages(&collected.languages, &path)
        .context("Could not save languages data file")?;

    Ok(MergeSummary {
        seed: collected.seed,
        seeded: collected.seeded,
        persisted: collected.persisted,
        translations: collected.translations,
        saved: collected.languages.len(),
        path,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::{DisplayNames, Iso639Table, SourceError};
    use std::collections::BTreeSet;

    struct Missing;

    impl LocaleSource for Missing {
        fn kind(&self) -> SourceKind {
            SourceKind::System
        }

        fn probe(&self) -> Result<(), SourceError> {
            Err(SourceError::Unavailable {
                source: SourceKind::System,
                reason: "not installed".to_string(),
            })
        }

        fn available_locales(&self) -> BTreeSet<String> {
            BTreeSet::new()
        }

        fn display_names(&self, _code: &str) -> Result<DisplayNames> {
            Ok(DisplayNames::default())
        }
    }

    #[test]
    fn first_available_registry_wins() {
        let missing = Missing;
        let table = Iso639Table;
        let (seed, languages) =
            seed_from_registries([&missing as &dyn LocaleSource, &table as &dyn LocaleSource]).unwrap();

        assert_eq!(seed, Some(SourceKind::Iso639));
        assert_eq!(
            languages.get("de").and_then(|entry| entry.native()),
            Some("Deutsch")
        );
    }

    #[test]
    fn no_available_registry_seeds_nothing() {
        let missing = Missing;
        let (seed, languages) = seed_from_registries([&missing as &dyn LocaleSource]).unwrap();
        assert_eq!(seed, None);
        assert!(languages.is_empty());
    }
}
