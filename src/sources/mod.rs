// SPDX-License-Identifier: PMPL-1.0-or-later

//! Locale information sources.
//!
//! Each source answers two questions: which locale codes do you know, and
//! what are the English and native display names of a given code. Three
//! sources ship with the tool:
//!
//! | Identifier | Type                    | Backing data                          |
//! |------------|-------------------------|---------------------------------------|
//! | `system`   | [`SystemLocales`]       | glibc locale definitions on this host |
//! | `iso639`   | [`Iso639Table`]         | ISO 639-1 table compiled into the tool|
//! | `catalogs` | [`TranslationCatalogs`] | `messages_<code>.po` in the data dir  |
//!
//! `system` and `iso639` are registries used to seed the languages data.
//! `catalogs` describes the languages the project actually ships and is
//! always merged last.

mod catalogs;
mod iso639;
pub mod po;
mod system;

pub use catalogs::TranslationCatalogs;
pub use iso639::Iso639Table;
pub use system::SystemLocales;

use crate::config::Config;
use crate::types::{LanguageEntry, LanguageSet};
use anyhow::Result;
use std::collections::BTreeSet;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SourceKind {
    System,
    Iso639,
    Catalogs,
}

impl SourceKind {
    pub fn as_str(self) -> &'static str {
        match self {
            SourceKind::System => "system",
            SourceKind::Iso639 => "iso639",
            SourceKind::Catalogs => "catalogs",
        }
    }

    /// All sources in priority order. The last one is by definition the
    /// project's translation catalogs.
    pub fn all() -> &'static [SourceKind] {
        &[SourceKind::System, SourceKind::Iso639, SourceKind::Catalogs]
    }

    /// Registry sources in default seeding order.
    pub fn registries() -> &'static [SourceKind] {
        &[SourceKind::System, SourceKind::Iso639]
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SourceKind {
    type Err = SourceError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "system" => Ok(SourceKind::System),
            "iso639" => Ok(SourceKind::Iso639),
            "catalogs" => Ok(SourceKind::Catalogs),
            _ => Err(SourceError::UnknownSource(value.to_string())),
        }
    }
}

/// Failures a caller has to tell apart from plain I/O errors.
#[derive(Debug)]
pub enum SourceError {
    /// The source's backing data is not present on this host.
    Unavailable { source: SourceKind, reason: String },
    /// A translation catalog lacks a metadata field the tool depends on.
    MissingMetadata { path: PathBuf, field: &'static str },
    UnknownSource(String),
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceError::Unavailable { source, reason } => {
                write!(f, "source '{}' is unavailable: {}", source, reason)
            }
            SourceError::MissingMetadata { path, field } => {
                write!(f, "{} has no '{}' header field", path.display(), field)
            }
            SourceError::UnknownSource(name) => {
                let names: Vec<&str> = SourceKind::all().iter().map(|kind| kind.as_str()).collect();
                write!(
                    f,
                    "{} is not a valid source. Available sources are: {}",
                    name,
                    names.join(", ")
                )
            }
        }
    }
}

impl std::error::Error for SourceError {}

/// Display names of one locale as reported by a source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisplayNames {
    pub english: Option<String>,
    pub native: Option<String>,
}

impl DisplayNames {
    pub fn new(english: Option<String>, native: Option<String>) -> Self {
        Self {
            english: english.filter(|name| !name.is_empty()),
            native: native.filter(|name| !name.is_empty()),
        }
    }
}

pub trait LocaleSource {
    fn kind(&self) -> SourceKind;

    /// Check that the source's backing data is present.
    fn probe(&self) -> Result<(), SourceError>;

    /// Every locale code the source knows about. Empty when the source is
    /// unavailable.
    fn available_locales(&self) -> BTreeSet<String>;

    fn display_names(&self, code: &str) -> Result<DisplayNames>;
}

/// Build a [`LanguageSet`] from one source.
///
/// With a `filter`, only codes that are both requested and available are
/// queried; requested codes the source does not know are ignored. Codes for
/// which the source has neither name are left out.
pub fn languages(source: &dyn LocaleSource, filter: Option<&[&str]>) -> Result<LanguageSet> {
    let mut codes = source.available_locales();
    if let Some(wanted) = filter {
        codes.retain(|code| wanted.contains(&code.as_str()));
    }

    let mut output = LanguageSet::new();
    for code in codes {
        let names = source.display_names(&code)?;
        let entry = LanguageEntry::new(names.english, names.native);
        if entry.is_blank() {
            continue;
        }
        output.insert(code, entry);
    }
    Ok(output)
}

/// Sources in merge order: registries first, translation catalogs last.
pub struct SourceRegistry {
    registries: Vec<Box<dyn LocaleSource>>,
    catalogs: Box<dyn LocaleSource>,
}

impl SourceRegistry {
    pub fn new(registries: Vec<Box<dyn LocaleSource>>, catalogs: Box<dyn LocaleSource>) -> Self {
        Self {
            registries,
            catalogs,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        let registries = config
            .seed_order
            .iter()
            .filter_map(|kind| registry_source(*kind, config))
            .collect();
        let catalogs = Box::new(TranslationCatalogs::new(&config.data_dir));
        Self::new(registries, catalogs)
    }

    pub fn registries(&self) -> impl Iterator<Item = &dyn LocaleSource> {
        self.registries.iter().map(|source| source.as_ref())
    }

    pub fn catalogs(&self) -> &dyn LocaleSource {
        self.catalogs.as_ref()
    }
}

fn registry_source(kind: SourceKind, config: &Config) -> Option<Box<dyn LocaleSource>> {
    match kind {
        SourceKind::System => Some(Box::new(SystemLocales::new(&config.locale_defs_dir))),
        SourceKind::Iso639 => Some(Box::new(Iso639Table)),
        SourceKind::Catalogs => None,
    }
}
