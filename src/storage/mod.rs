// SPDX-License-Identifier: PMPL-1.0-or-later

//! Reading and writing the `languages.dat` data file.
//!
//! The file is JSON in a fixed layout so that saving unchanged data
//! reproduces the file byte for byte:
//!
//! ```text
//! {
//! "en": [
//! "English",
//! "English"
//! ],
//! "fr": [
//! "French",
//! "Français"
//! ]
//! }
//! ```
//!
//! One token per line with no indentation, `": "` between key and value,
//! keys sorted, non-ASCII characters escaped, and a trailing newline.

mod ascii;

pub use ascii::AsciiFormatter;

use crate::types::LanguageSet;
use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// Serialize a languages set in the data file layout.
pub fn to_data_string(languages: &LanguageSet) -> Result<String> {
    let mut buffer = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, AsciiFormatter::new());
    languages
        .serialize(&mut serializer)
        .context("serializing languages data")?;
    buffer.push(b'\n');
    // The formatter only ever emits ASCII.
    String::from_utf8(buffer).context("languages data is not valid UTF-8")
}

/// Parse data file contents. Both entry shapes are accepted.
pub fn from_data_str(text: &str) -> Result<LanguageSet> {
    serde_json::from_str(text).context("parsing languages data")
}

/// Load the data file at `path`.
///
/// Returns `Ok(None)` when the file does not exist. Other read failures and
/// malformed contents are errors.
pub fn load_languages(path: &Path) -> Result<Option<LanguageSet>> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(err) => {
            return Err(err).with_context(|| format!("reading {}", path.display()));
        }
    };

    let text = String::from_utf8(bytes)
        .with_context(|| format!("{} is not valid UTF-8", path.display()))?;
    from_data_str(&text)
        .with_context(|| format!("loading {}", path.display()))
        .map(Some)
}

/// Replace the data file at `path` with `languages`.
///
/// The data is written to a temporary file next to `path` and renamed over
/// it, so the previous file survives any failure.
pub fn save_languages(languages: &LanguageSet, path: &Path) -> Result<()> {
    let contents = to_data_string(languages)?;
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut staged = NamedTempFile::new_in(dir)
        .with_context(|| format!("creating temporary file in {}", dir.display()))?;
    if let Some(previous) = fs::metadata(path).ok().filter(|meta| meta.is_file()) {
        // Keep the permissions of the file being replaced.
        staged
            .as_file()
            .set_permissions(previous.permissions())
            .with_context(|| format!("copying permissions of {}", path.display()))?;
    }
    staged
        .write_all(contents.as_bytes())
        .and_then(|()| staged.flush())
        .with_context(|| format!("writing {}", staged.path().display()))?;
    staged
        .persist(path)
        .map_err(|err| err.error)
        .with_context(|| format!("replacing {}", path.display()))?;
    Ok(())
}
