// SPDX-License-Identifier: PMPL-1.0-or-later

//! System locale database: the glibc locale definition sources.
//!
//! Each file under `/usr/share/i18n/locales` named after a locale (`fr_FR`,
//! `ast_ES`) describes it in POSIX localedef syntax. Two sections carry the
//! names we want:
//!
//! ```text
//! LC_IDENTIFICATION
//! language   "French"
//! territory  "France"
//! END LC_IDENTIFICATION
//!
//! LC_ADDRESS
//! country_name "France"
//! lang_name    "français"
//! END LC_ADDRESS
//! ```
//!
//! Older definitions spell strings as `<U0066><U0072>...` and many sections
//! are just `copy "other_locale"`, both of which are resolved here.

use super::{DisplayNames, LocaleSource, SourceError, SourceKind};
use anyhow::{Context, Result};
use regex::{Captures, Regex};
use std::cell::{OnceCell, RefCell};
use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::sync::OnceLock;

const IDENTIFICATION: &str = "LC_IDENTIFICATION";
const ADDRESS: &str = "LC_ADDRESS";

/// How many `copy` hops to follow before giving up on a field.
const MAX_COPY_DEPTH: usize = 4;

fn locale_file_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^([a-z]{2,3})(?:_([A-Z]{2}))?$").expect("valid locale file pattern"))
}

fn ucs_symbol_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"<U([0-9A-Fa-f]{4,8})>").expect("valid UCS symbol pattern"))
}

/// Locale definitions under one directory. The directory is scanned once
/// and every definition file is parsed at most once per instance.
#[derive(Debug, Clone)]
pub struct SystemLocales {
    dir: PathBuf,
    files: OnceCell<BTreeSet<String>>,
    definitions: RefCell<HashMap<String, Option<Rc<LocaleDefinition>>>>,
}

impl SystemLocales {
    pub fn new(dir: &Path) -> Self {
        Self {
            dir: dir.to_path_buf(),
            files: OnceCell::new(),
            definitions: RefCell::new(HashMap::new()),
        }
    }

    fn definition_files(&self) -> &BTreeSet<String> {
        self.files.get_or_init(|| {
            let Ok(entries) = fs::read_dir(&self.dir) else {
                return BTreeSet::new();
            };

            entries
                .flatten()
                .filter(|entry| entry.path().is_file())
                .filter_map(|entry| entry.file_name().to_str().map(str::to_string))
                .filter(|name| locale_file_pattern().is_match(name))
                .collect()
        })
    }

    /// Definition file describing `code`. Bare language codes fall back to
    /// the first regional definition of that language.
    fn definition_for(&self, code: &str) -> Option<String> {
        let files = self.definition_files();
        if files.contains(code) {
            return Some(code.to_string());
        }
        if code.contains('_') {
            return None;
        }
        let prefix = format!("{}_", code);
        files.iter().find(|name| name.starts_with(&prefix)).cloned()
    }

    /// Parsed definition file `name`, or `None` when there is no such file.
    fn definition(&self, name: &str) -> Result<Option<Rc<LocaleDefinition>>> {
        if let Some(cached) = self.definitions.borrow().get(name) {
            return Ok(cached.clone());
        }

        let path = self.dir.join(name);
        let definition = if path.is_file() {
            let bytes = fs::read(&path).with_context(|| format!("reading {}", path.display()))?;
            Some(Rc::new(LocaleDefinition::parse(&String::from_utf8_lossy(&bytes))))
        } else {
            None
        };
        self.definitions
            .borrow_mut()
            .insert(name.to_string(), definition.clone());
        Ok(definition)
    }

    /// Look up `key` in `section`, following `copy` directives.
    fn field(&self, name: &str, section: &str, key: &str, depth: usize) -> Result<Option<String>> {
        let Some(definition) = self.definition(name)? else {
            return Ok(None);
        };
        let Some(fields) = definition.sections.get(section) else {
            return Ok(None);
        };
        if let Some(value) = fields.values.get(key) {
            return Ok(Some(value.clone()));
        }
        if depth >= MAX_COPY_DEPTH {
            return Ok(None);
        }
        for copied in &fields.copies {
            if let Some(value) = self.field(copied, section, key, depth + 1)? {
                return Ok(Some(value));
            }
        }
        Ok(None)
    }
}

impl LocaleSource for SystemLocales {
    fn kind(&self) -> SourceKind {
        SourceKind::System
    }

    fn probe(&self) -> Result<(), SourceError> {
        if self.dir.is_dir() {
            Ok(())
        } else {
            Err(SourceError::Unavailable {
                source: SourceKind::System,
                reason: format!("no locale definitions at {}", self.dir.display()),
            })
        }
    }

    fn available_locales(&self) -> BTreeSet<String> {
        let mut codes = BTreeSet::new();
        for name in self.definition_files() {
            if let Some((language, _)) = name.split_once('_') {
                codes.insert(language.to_string());
            }
            codes.insert(name.clone());
        }
        codes
    }

    fn display_names(&self, code: &str) -> Result<DisplayNames> {
        let Some(file) = self.definition_for(code) else {
            return Ok(DisplayNames::default());
        };

        let language = self.field(&file, IDENTIFICATION, "language", 0)?;
        let lang_name = self.field(&file, ADDRESS, "lang_name", 0)?;

        if !code.contains('_') {
            return Ok(DisplayNames::new(language, lang_name));
        }

        let territory = self.field(&file, IDENTIFICATION, "territory", 0)?;
        let country_name = self.field(&file, ADDRESS, "country_name", 0)?;

        Ok(DisplayNames::new(
            with_region(language, territory),
            with_region(lang_name, country_name),
        ))
    }
}

fn with_region(name: Option<String>, region: Option<String>) -> Option<String> {
    match (name, region) {
        (Some(name), Some(region)) if !name.is_empty() && !region.is_empty() => {
            Some(format!("{} ({})", name, region))
        }
        (name, _) => name,
    }
}

#[derive(Debug, Default)]
struct SectionFields {
    values: HashMap<String, String>,
    copies: Vec<String>,
}

/// The string-valued keywords of a localedef source, per section.
#[derive(Debug, Default)]
struct LocaleDefinition {
    sections: HashMap<String, SectionFields>,
}

impl LocaleDefinition {
    fn parse(text: &str) -> Self {
        let mut definition = LocaleDefinition::default();
        let mut comment_char = '#';
        let mut escape_char = '\\';
        let mut section: Option<String> = None;
        let mut pending = String::new();

        for raw in text.lines() {
            let trimmed = raw.trim();

            if section.is_none() && pending.is_empty() {
                if let Some(ch) = directive_char(trimmed, "comment_char") {
                    comment_char = ch;
                    continue;
                }
                if let Some(ch) = directive_char(trimmed, "escape_char") {
                    escape_char = ch;
                    continue;
                }
            }

            if pending.is_empty() && trimmed.starts_with(comment_char) {
                continue;
            }

            // A trailing escape character continues the line.
            if let Some(head) = trimmed.strip_suffix(escape_char) {
                pending.push_str(head);
                continue;
            }
            pending.push_str(trimmed);
            let line = std::mem::take(&mut pending);
            if line.is_empty() {
                continue;
            }

            let (keyword, rest) = match line.split_once(char::is_whitespace) {
                Some((keyword, rest)) => (keyword, rest.trim()),
                None => (line.as_str(), ""),
            };

            let Some(current) = section.clone() else {
                if keyword.starts_with("LC_") {
                    section = Some(keyword.to_string());
                }
                continue;
            };

            match keyword {
                "END" => section = None,
                "copy" => {
                    if let Some(target) = quoted(rest, escape_char) {
                        definition.sections.entry(current).or_default().copies.push(target);
                    }
                }
                key => {
                    if let Some(value) = quoted(rest, escape_char) {
                        definition
                            .sections
                            .entry(current)
                            .or_default()
                            .values
                            .entry(key.to_string())
                            .or_insert(value);
                    }
                }
            }
        }

        definition
    }
}

fn directive_char(line: &str, directive: &str) -> Option<char> {
    let rest = line.strip_prefix(directive)?;
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    rest.trim().chars().next()
}

/// First double-quoted string of a value, with escapes and `<Uxxxx>` symbols
/// resolved.
fn quoted(value: &str, escape_char: char) -> Option<String> {
    let inner = value.strip_prefix('"')?;
    let mut out = String::new();
    let mut chars = inner.chars();
    loop {
        match chars.next()? {
            '"' => break,
            ch if ch == escape_char => out.push(chars.next()?),
            ch => out.push(ch),
        }
    }

    let decoded = ucs_symbol_pattern().replace_all(&out, |caps: &Captures| {
        u32::from_str_radix(&caps[1], 16)
            .ok()
            .and_then(char::from_u32)
            .map(String::from)
            .unwrap_or_else(|| caps[0].to_string())
    });
    Some(decoded.into_owned())
}
