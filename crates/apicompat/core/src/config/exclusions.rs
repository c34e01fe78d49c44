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

//! Attribute exclusion list
//!
//! One DocId per line (`T:System.Diagnostics.DebuggerDisplayAttribute`).
//! Blank lines and lines starting with `#` or `//` are ignored. Bare type
//! names without the `T:` prefix are accepted and normalized.

use crate::error::{Result, read_text_file};
use crate::symbols::AttributeSymbol;
use std::collections::BTreeSet;
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeExclusions {
    doc_ids: BTreeSet<String>,
}

impl AttributeExclusions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_doc_id(mut self, doc_id: impl Into<String>) -> Self {
        self.doc_ids.insert(normalize(&doc_id.into()));
        self
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = read_text_file(path)?;
        let exclusions = Self::parse(&text);
        debug!("Loaded {} attribute exclusions from {}", exclusions.len(), path.display());
        Ok(exclusions)
    }

    pub fn parse(text: &str) -> Self {
        let doc_ids = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#') && !line.starts_with("//"))
            .map(normalize)
            .collect();
        Self { doc_ids }
    }

    pub fn len(&self) -> usize {
        self.doc_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.doc_ids.is_empty()
    }

    pub fn is_excluded(&self, attribute: &AttributeSymbol) -> bool {
        self.doc_ids.contains(&attribute.doc_id())
    }

    pub fn is_type_excluded(&self, type_name: &str) -> bool {
        self.doc_ids.contains(&format!("T:{}", type_name))
    }
}

fn normalize(entry: &str) -> String {
    let entry = entry.trim();
    if entry.starts_with("T:") {
        entry.to_string()
    } else {
        format!("T:{}", entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_and_lookup() {
        let exclusions = AttributeExclusions::parse("# comment\nT:System.FlagsAttribute\n\nSystem.ObsoleteAttribute\n");
        assert_eq!(exclusions.len(), 2);
        assert!(exclusions.is_excluded(&AttributeSymbol::new("System.FlagsAttribute")));
        assert!(exclusions.is_type_excluded("System.ObsoleteAttribute"));
        assert!(!exclusions.is_excluded(&AttributeSymbol::new("System.SerializableAttribute")));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "T:System.CLSCompliantAttribute").unwrap();
        let exclusions = AttributeExclusions::load(file.path()).unwrap();
        assert!(exclusions.is_type_excluded("System.CLSCompliantAttribute"));
    }

    #[test]
    fn test_missing_file() {
        assert!(AttributeExclusions::load(Path::new("/missing/exclusions.txt")).unwrap_err().is_missing_file());
    }
}
