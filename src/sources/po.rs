// SPDX-License-Identifier: PMPL-1.0-or-later

//! Minimal gettext `.po` header reader.
//!
//! Only the header entry (`msgid ""`) is read. Its `msgstr` holds
//! `Name: value` lines such as `Language-Name: French`, which is all the
//! catalogs source needs.

use anyhow::{Context, Result};
use encoding_rs::{Encoding, WINDOWS_1252};
use std::fs;
use std::path::Path;

/// Metadata fields of a catalog header, in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogHeader {
    fields: Vec<(String, String)>,
}

impl CatalogHeader {
    /// Value of the first field named `name`. Field names compare
    /// case-insensitively, as gettext tools do.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Character set declared by `Content-Type: text/plain; charset=...`.
    pub fn charset(&self) -> Option<&str> {
        let content_type = self.get("Content-Type")?;
        content_type
            .split(';')
            .filter_map(|part| part.trim().strip_prefix("charset="))
            .map(str::trim)
            .find(|charset| !charset.is_empty())
    }
}

/// Read and decode the header of the catalog at `path`.
///
/// Returns `Ok(None)` when the file has no header entry.
pub fn read_catalog_header(path: &Path) -> Result<Option<CatalogHeader>> {
    let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let text = decode_catalog(&bytes);
    Ok(parse_header(&text))
}

/// Decode catalog bytes: UTF-8 when valid, otherwise the charset declared in
/// the header, otherwise Windows-1252.
pub fn decode_catalog(bytes: &[u8]) -> String {
    if let Ok(text) = std::str::from_utf8(bytes) {
        return text.strip_prefix('\u{feff}').unwrap_or(text).to_string();
    }

    // Header field names are ASCII, so a Windows-1252 pass is enough to find
    // the declared charset.
    let (fallback, _, _) = WINDOWS_1252.decode(bytes);
    let declared = parse_header(&fallback)
        .and_then(|header| header.charset().map(str::to_string))
        .and_then(|label| Encoding::for_label(label.as_bytes()));

    match declared {
        Some(encoding) if encoding != WINDOWS_1252 => encoding.decode(bytes).0.into_owned(),
        _ => fallback.into_owned(),
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Field {
    None,
    Msgid,
    Msgstr,
}

/// Parse the header entry out of catalog text.
pub fn parse_header(text: &str) -> Option<CatalogHeader> {
    let mut msgid = String::new();
    let mut msgstr = String::new();
    let mut current = Field::None;
    let mut seen_msgid = false;

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            if current == Field::Msgstr {
                break;
            }
            continue;
        }

        if let Some(rest) = keyword_value(line, "msgid") {
            if seen_msgid {
                break;
            }
            seen_msgid = true;
            current = Field::Msgid;
            msgid.push_str(&unquote(rest)?);
        } else if let Some(rest) = keyword_value(line, "msgstr") {
            current = Field::Msgstr;
            msgstr.push_str(&unquote(rest)?);
        } else if line.starts_with('"') {
            match current {
                Field::Msgid => msgid.push_str(&unquote(line)?),
                Field::Msgstr => msgstr.push_str(&unquote(line)?),
                Field::None => return None,
            }
        } else if seen_msgid {
            // msgctxt, msgid_plural, msgstr[n]: not a header entry.
            return None;
        }
    }

    if !seen_msgid || !msgid.is_empty() {
        return None;
    }

    let fields = msgstr
        .lines()
        .filter_map(|line| {
            let (key, value) = line.split_once(':')?;
            let key = key.trim();
            if key.is_empty() {
                return None;
            }
            Some((key.to_string(), value.trim().to_string()))
        })
        .collect();

    Some(CatalogHeader { fields })
}

fn keyword_value<'a>(line: &'a str, keyword: &str) -> Option<&'a str> {
    let rest = line.strip_prefix(keyword)?;
    if rest.starts_with(|ch: char| ch.is_whitespace()) {
        Some(rest.trim_start())
    } else {
        None
    }
}

/// Strip the quotes from a PO string literal and resolve its escapes.
fn unquote(literal: &str) -> Option<String> {
    let inner = literal.trim().strip_prefix('"')?.strip_suffix('"')?;
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();

    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }

    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRENCH: &str = r#"# French translation.
# Copyright (C) 2012
#, fuzzy
msgid ""
msgstr ""
"Project-Id-Version: 1.0\n"
"Language-Name: French\n"
"Language-Native-Name: français\n"
"Content-Type: text/plain; charset=UTF-8\n"

#: code/screens/main_menu.py:42
msgid "New Game"
msgstr "Nouvelle partie"
"#;

    #[test]
    fn reads_header_fields() {
        let header = parse_header(FRENCH).unwrap();
        assert_eq!(header.get("Language-Name"), Some("French"));
        assert_eq!(header.get("language-native-name"), Some("français"));
        assert_eq!(header.charset(), Some("UTF-8"));
        assert_eq!(header.get("Project-Id-Version"), Some("1.0"));
    }

    #[test]
    fn stops_at_first_entry() {
        let header = parse_header(FRENCH).unwrap();
        assert_eq!(header.get("New Game"), None);
    }

    #[test]
    fn header_on_msgstr_line() {
        let text = "msgid \"\"\nmsgstr \"Language-Name: German\\nLanguage-Native-Name: Deutsch\\n\"\n";
        let header = parse_header(text).unwrap();
        assert_eq!(header.get("Language-Name"), Some("German"));
        assert_eq!(header.get("Language-Native-Name"), Some("Deutsch"));
    }

    #[test]
    fn escaped_quotes_are_resolved() {
        let text = "msgid \"\"\nmsgstr \"\"\n\"Language-Name: \\\"Klingon\\\"\\n\"\n";
        let header = parse_header(text).unwrap();
        assert_eq!(header.get("Language-Name"), Some("\"Klingon\""));
    }

    #[test]
    fn catalog_without_header() {
        let text = "msgid \"Quit\"\nmsgstr \"Quitter\"\n";
        assert_eq!(parse_header(text), None);
        assert_eq!(parse_header(""), None);
    }

    #[test]
    fn decodes_declared_charset() {
        let mut bytes = b"msgid \"\"\nmsgstr \"\"\n\"Content-Type: text/plain; charset=ISO-8859-15\\n\"\n\"Language-Native-Name: Fran".to_vec();
        bytes.push(0xE7); // c cedilla
        bytes.extend_from_slice(b"ais\\n\"\n");

        let header = parse_header(&decode_catalog(&bytes)).unwrap();
        assert_eq!(header.get("Language-Native-Name"), Some("Français"));
    }

    #[test]
    fn utf8_bom_is_dropped() {
        let text = "\u{feff}msgid \"\"\nmsgstr \"Language-Name: Dutch\\n\"\n";
        let header = parse_header(&decode_catalog(text.as_bytes())).unwrap();
        assert_eq!(header.get("Language-Name"), Some("Dutch"));
    }
}
