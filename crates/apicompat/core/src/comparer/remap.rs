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

//! Namespace/type name remapping
//!
//! A remap file lists `old-token,new-token` pairs, one per line. Blank lines
//! and lines starting with `#` or `//` are comments.

use crate::error::{ApiCompatError, Result, read_text_file};
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemapEntry {
    pub from: String,
    pub to: String,
}

/// Ordered list of token replacements applied to comparison keys
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemapTable {
    entries: Vec<RemapEntry>,
}

impl RemapTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.entries.push(RemapEntry { from: from.into(), to: to.into() });
        self
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = read_text_file(path)?;
        let table = Self::parse(&text)?;
        debug!("Loaded {} remap entries from {}", table.entries.len(), path.display());
        Ok(table)
    }

    pub fn parse(text: &str) -> Result<Self> {
        let mut entries = Vec::new();
        for (idx, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with("//") {
                continue;
            }
            let tokens: Vec<&str> = line.split(',').map(str::trim).collect();
            match tokens.as_slice() {
                [from, to] if !from.is_empty() && !to.is_empty() => entries.push(RemapEntry {
                    from: from.to_string(),
                    to: to.to_string(),
                }),
                _ => {
                    return Err(ApiCompatError::InvalidRemapLine {
                        line: idx + 1,
                        text: raw.to_string(),
                    });
                }
            }
        }
        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[RemapEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Apply every entry, in file order, to each type-name token of `text`
    pub fn apply(&self, text: &str) -> String {
        let mut current = text.to_string();
        for entry in &self.entries {
            current = replace_tokens(&current, &entry.from, &entry.to);
        }
        current
    }
}

fn is_identifier_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// A match may not continue an identifier, a dotted name, a nested type
/// segment or an arity suffix on its left.
fn is_start_boundary(prev: Option<char>) -> bool {
    match prev {
        None => true,
        Some(c) => !(is_identifier_char(c) || c == '.' || c == '+' || c == '`'),
    }
}

/// Only a partial identifier counts as a collision on the right; dotted
/// continuations, nested segments and arity suffixes are fine.
fn is_end_boundary(next: Option<char>) -> bool {
    next.is_none_or(|c| !is_identifier_char(c))
}

fn replace_tokens(text: &str, from: &str, to: &str) -> String {
    if from.is_empty() {
        return text.to_string();
    }
    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;
    for (pos, matched) in text.match_indices(from) {
        if pos < cursor {
            continue;
        }
        let prev = text[..pos].chars().next_back();
        let next = text[pos + matched.len()..].chars().next();
        if is_start_boundary(prev) && is_end_boundary(next) {
            out.push_str(&text[cursor..pos]);
            out.push_str(to);
            cursor = pos + matched.len();
        }
    }
    out.push_str(&text[cursor..]);
    out
}
