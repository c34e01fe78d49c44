// Dotlanth
// Copyright (C) 2025 Synerthink

// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.

// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.

//! Command-line interface

pub mod compare;
pub mod input;
pub mod rules;

use anyhow::Result;
use apicompat_core::ApiCompatError;
use clap::{Parser, Subcommand};

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILURE: i32 = 1;
pub const EXIT_MISSING_FILE: i32 = 3;

#[derive(Parser, Debug)]
#[command(name = "apicompat")]
#[command(about = "Check an implementation API surface against its contract")]
#[command(version)]
pub struct Cli {
    /// Log progress to stderr (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compare two symbol documents and report incompatible differences
    Compare(compare::CompareArgs),
    /// List the built-in rules
    Rules,
}

/// Run a parsed command line and return the process exit code
pub fn run(cli: Cli) -> Result<i32> {
    match cli.command {
        Commands::Compare(args) => compare::run_compare(&args),
        Commands::Rules => {
            rules::list_rules(&mut std::io::stdout().lock())?;
            Ok(EXIT_SUCCESS)
        }
    }
}

/// Exit code for a run that failed before producing a report
pub fn exit_code_for_error(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<ApiCompatError>() {
        Some(core) if core.is_missing_file() => EXIT_MISSING_FILE,
        _ => EXIT_FAILURE,
    }
}
