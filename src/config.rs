// SPDX-License-Identifier: PMPL-1.0-or-later

//! Run configuration.
//!
//! Everything the driver needs to know about the host layout is carried in a
//! [`Config`] value. The binary builds it from the environment; tests build
//! it directly.

use crate::sources::SourceKind;
use anyhow::{bail, Context, Result};
use std::env;
use std::path::PathBuf;

pub const DATA_DIR_ENV: &str = "LANGUAGE_NAMES_DATA_DIR";
pub const LOCALE_DEFS_ENV: &str = "LANGUAGE_NAMES_LOCALE_DEFS";
pub const SEED_ORDER_ENV: &str = "LANGUAGE_NAMES_SEED_ORDER";

pub const DATA_FILE_NAME: &str = "languages.dat";
pub const DEFAULT_DATA_DIR: &str = "data";
pub const DEFAULT_LOCALE_DEFS_DIR: &str = "/usr/share/i18n/locales";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Directory holding `languages.dat` and the `messages_<code>.po` catalogs.
    pub data_dir: PathBuf,
    /// glibc locale definition sources, read by the `system` source.
    pub locale_defs_dir: PathBuf,
    /// Registry sources tried, in order, to seed the merge.
    pub seed_order: Vec<SourceKind>,
}

impl Config {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            locale_defs_dir: PathBuf::from(DEFAULT_LOCALE_DEFS_DIR),
            seed_order: SourceKind::registries().to_vec(),
        }
    }

    pub fn with_locale_defs(mut self, dir: impl Into<PathBuf>) -> Self {
        self.locale_defs_dir = dir.into();
        self
    }

    pub fn with_seed_order(mut self, order: Vec<SourceKind>) -> Self {
        self.seed_order = order;
        self
    }

    pub fn from_env() -> Result<Self> {
        let data_dir = env_path(DATA_DIR_ENV).unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));
        let mut config = Config::new(data_dir);

        if let Some(dir) = env_path(LOCALE_DEFS_ENV) {
            config.locale_defs_dir = dir;
        }

        if let Ok(value) = env::var(SEED_ORDER_ENV) {
            config.seed_order =
                parse_seed_order(&value).with_context(|| format!("reading {}", SEED_ORDER_ENV))?;
        }

        Ok(config)
    }

    pub fn data_file(&self) -> PathBuf {
        self.data_dir.join(DATA_FILE_NAME)
    }
}

fn env_path(key: &str) -> Option<PathBuf> {
    env::var_os(key)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

/// Parse a comma-separated list of registry source identifiers.
///
/// The translation catalogs always merge last, so they cannot be listed here.
pub fn parse_seed_order(value: &str) -> Result<Vec<SourceKind>> {
    let mut order = Vec::new();
    for name in value.split(',').map(str::trim).filter(|name| !name.is_empty()) {
        let kind: SourceKind = name.parse()?;
        if kind == SourceKind::Catalogs {
            bail!("'{}' is always merged last and cannot seed the languages data", kind);
        }
        if order.contains(&kind) {
            bail!("source '{}' listed more than once", kind);
        }
        order.push(kind);
    }
    Ok(order)
}
