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

//! Symbol document loading
//!
//! A symbol document is the JSON form of either one assembly or an array of
//! assemblies, as produced by a metadata loader.

use crate::error::CliError;
use apicompat_core::AssemblySymbol;
use apicompat_core::error::read_text_file;
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

#[derive(Deserialize)]
#[serde(untagged)]
enum SymbolDocument {
    Many(Vec<AssemblySymbol>),
    One(Box<AssemblySymbol>),
}

pub fn load_assemblies(path: &Path) -> anyhow::Result<Vec<AssemblySymbol>> {
    let text = read_text_file(path)?;
    let document: SymbolDocument = serde_json::from_str(&text).map_err(|source| CliError::InvalidInput { path: path.to_path_buf(), source })?;
    let assemblies = match document {
        SymbolDocument::Many(assemblies) => assemblies,
        SymbolDocument::One(assembly) => vec![*assembly],
    };
    debug!("Loaded {} assemblies from {}", assemblies.len(), path.display());
    Ok(assemblies)
}
