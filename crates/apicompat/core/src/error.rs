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

//! Error types for the compatibility engine

use std::path::PathBuf;
use thiserror::Error;

/// Failures that abort a comparison before or while it runs
///
/// Compatibility differences are not errors; they are reported through
/// [`crate::diff::Difference`].
#[derive(Debug, Error)]
pub enum ApiCompatError {
    #[error("Input file not found: {}", .0.display())]
    MissingFile(PathBuf),

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid remap entry at line {line}: {text}")]
    InvalidRemapLine { line: usize, text: String },

    #[error("Invalid baseline entry at line {line}: {text}")]
    InvalidBaselineLine { line: usize, text: String },

    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Report output failed: {0}")]
    Output(#[source] std::io::Error),
}

impl ApiCompatError {
    /// Missing input files get their own process exit code
    pub fn is_missing_file(&self) -> bool {
        matches!(self, ApiCompatError::MissingFile(_))
    }
}

pub type Result<T> = std::result::Result<T, ApiCompatError>;

/// Read a whole text file, mapping absence to [`ApiCompatError::MissingFile`]
pub fn read_text_file(path: &std::path::Path) -> Result<String> {
    if !path.exists() {
        return Err(ApiCompatError::MissingFile(path.to_path_buf()));
    }
    std::fs::read_to_string(path).map_err(|source| ApiCompatError::Io { path: path.to_path_buf(), source })
}
