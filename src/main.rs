// SPDX-License-Identifier: PMPL-1.0-or-later

//! language-names: read language display names from several locale sources
//! and save them to the project's `languages.dat`.

use anyhow::Result;
use clap::Parser;
use colored::*;
use language_names::config::Config;
use language_names::merge::{self, MergeSummary};
use language_names::sources::SourceRegistry;
use std::io::{self, IsTerminal};
use std::process::ExitCode;

const LONG_ABOUT: &str = "\
Reads language names, in English and in each language's own script, from the \
first available locale source (the system's glibc locale definitions, then a \
built-in ISO 639 table). Merges them with the existing languages.dat and with \
the Language-Name / Language-Native-Name headers of the project's \
messages_<code>.po catalogs, which take precedence, then rewrites languages.dat.";

#[derive(Parser)]
#[command(name = "language-names")]
#[command(version)]
#[command(about = "Read language names from several sources and save them to languages.dat")]
#[command(long_about = LONG_ABOUT)]
#[command(after_help = concat!(
    "Environment:\n",
    "  LANGUAGE_NAMES_DATA_DIR      directory with languages.dat and the .po catalogs [default: data]\n",
    "  LANGUAGE_NAMES_LOCALE_DEFS   glibc locale definitions [default: /usr/share/i18n/locales]\n",
    "  LANGUAGE_NAMES_SEED_ORDER    registries to try, in order [default: system,iso639]",
))]
struct Cli {}

fn run() -> Result<MergeSummary> {
    let config = Config::from_env()?;
    let registry = SourceRegistry::from_config(&config);
    merge::run(&config, &registry)
}

fn main() -> ExitCode {
    let _cli = Cli::parse();
    if !io::stdout().is_terminal() || !io::stderr().is_terminal() {
        colored::control::set_override(false);
    }

    match run() {
        Ok(summary) => {
            println!(
                "{} languages saved to {}",
                summary.saved.to_string().bold(),
                summary.path.display()
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{} {:#}", "error:".red().bold(), err);
            ExitCode::FAILURE
        }
    }
}
