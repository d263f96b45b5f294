// SPDX-License-Identifier: PMPL-1.0-or-later

//! language-names — collect the display names of a project's languages.
//!
//! Language pickers want to show every language in English and in its own
//! script. This crate gathers those names from the host's locale database
//! (or a built-in ISO 639 table), merges them with the names already saved
//! in `languages.dat`, lets the project's translation catalogs have the last
//! word, and writes the result back.
//!
//! MODULES:
//! 1. **sources**: locale registries and translation catalogs behind one
//!    [`sources::LocaleSource`] trait.
//! 2. **merge**: layers the sources and the saved data, then persists.
//! 3. **storage**: the `languages.dat` JSON layout.

pub mod config;
pub mod merge;
pub mod sources;
pub mod storage;
pub mod title;
pub mod types;
