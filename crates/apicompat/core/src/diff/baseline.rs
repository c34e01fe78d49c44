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

//! Baseline files
//!
//! A baseline lists previously accepted differences, one per line:
//!
//! ```text
//! # Assembly: System.Runtime
//! MembersMustExist:Member 'N.Foo.M()' does not exist in the implementation but it does exist in the contract.
//! TypesMustExist - Type 'N.Bar' does not exist in the implementation but it does exist in the contract.
//! ```
//!
//! The rule id is the leading run of identifier characters, followed by `:`
//! or ` - ` and the message text. Lines starting with `#` or `//` are
//! comments; `# Assembly:` comments group the lines below them.

use super::Difference;
use crate::error::{ApiCompatError, Result, read_text_file};
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

const ASSEMBLY_HEADER: &str = "# Assembly:";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaselineEntry {
    /// `RuleId:Message`, matched against [`Difference::baseline_key`]
    pub key: String,
    /// Line as written in the file, reported verbatim when unused
    pub line: String,
    /// 1-based
    pub line_number: usize,
    /// Nearest preceding `# Assembly:` group
    pub assembly: Option<String>,
    used: bool,
}

impl BaselineEntry {
    pub fn is_used(&self) -> bool {
        self.used
    }
}

#[derive(Debug, Clone, Default)]
pub struct Baseline {
    entries: Vec<BaselineEntry>,
    by_key: HashMap<String, Vec<usize>>,
}

impl Baseline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = read_text_file(path)?;
        let baseline = Self::parse(&text)?;
        debug!("Loaded {} baseline entries from {}", baseline.len(), path.display());
        Ok(baseline)
    }

    pub fn parse(text: &str) -> Result<Self> {
        let mut baseline = Self::new();
        let mut assembly = None;
        for (index, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() {
                continue;
            }
            if let Some(name) = line.strip_prefix(ASSEMBLY_HEADER) {
                assembly = Some(name.trim().to_string());
                continue;
            }
            if line.starts_with('#') || line.starts_with("//") {
                continue;
            }
            let key = parse_key(line).ok_or_else(|| ApiCompatError::InvalidBaselineLine {
                line: index + 1,
                text: line.to_string(),
            })?;
            baseline.push(BaselineEntry {
                key,
                line: raw.to_string(),
                line_number: index + 1,
                assembly: assembly.clone(),
                used: false,
            });
        }
        Ok(baseline)
    }

    fn push(&mut self, entry: BaselineEntry) {
        self.by_key.entry(entry.key.clone()).or_default().push(self.entries.len());
        self.entries.push(entry);
    }

    pub fn with_difference(mut self, difference: &Difference) -> Self {
        let line = difference.baseline_key();
        self.push(BaselineEntry {
            key: line.clone(),
            line,
            line_number: self.entries.len() + 1,
            assembly: None,
            used: false,
        });
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[BaselineEntry] {
        &self.entries
    }

    pub fn contains(&self, difference: &Difference) -> bool {
        self.by_key.contains_key(&difference.baseline_key())
    }

    /// Marks matching entries used; returns whether the difference is suppressed
    pub fn suppress(&mut self, difference: &Difference) -> bool {
        let Some(indices) = self.by_key.get(&difference.baseline_key()) else {
            return false;
        };
        for &index in indices {
            self.entries[index].used = true;
        }
        true
    }

    /// Entries no difference matched, in file order
    pub fn unused(&self) -> Vec<&BaselineEntry> {
        self.entries.iter().filter(|e| !e.used).collect()
    }

    /// Render differences as baseline text, grouped by assembly. Informational
    /// differences are included so a regenerated baseline silences them too.
    pub fn render<'d, I>(groups: I) -> String
    where
        I: IntoIterator<Item = (&'d str, &'d [Difference])>,
    {
        let mut out = String::new();
        for (assembly, differences) in groups {
            let mut lines: Vec<String> = differences.iter().map(Difference::baseline_key).collect();
            if lines.is_empty() {
                continue;
            }
            lines.dedup();
            out.push_str(&format!("{} {}\n", ASSEMBLY_HEADER, assembly));
            for line in lines {
                out.push_str(&line);
                out.push('\n');
            }
        }
        out
    }
}

/// `Id:Message` or `Id - Message` into the `Id:Message` key
fn parse_key(line: &str) -> Option<String> {
    let id_len = line.find(|c: char| !(c.is_ascii_alphanumeric() || c == '_')).unwrap_or(line.len());
    if id_len == 0 {
        return None;
    }
    let (id, rest) = line.split_at(id_len);
    let message = rest.strip_prefix(':').or_else(|| rest.strip_prefix(" - "))?;
    Some(format!("{}:{}", id, message))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diff(id: &str, message: &str) -> Difference {
        Difference::incompatible(id, message)
    }

    #[test]
    fn test_parse_both_separators() {
        let baseline = Baseline::parse("# Assembly: Lib\nA:first message\n\n// note\nB - second: with colon\n").unwrap();
        assert_eq!(baseline.len(), 2);
        assert_eq!(baseline.entries()[0].key, "A:first message");
        assert_eq!(baseline.entries()[1].key, "B:second: with colon");
        assert_eq!(baseline.entries()[1].assembly.as_deref(), Some("Lib"));
        assert_eq!(baseline.entries()[1].line_number, 5);
    }

    #[test]
    fn test_invalid_line() {
        let err = Baseline::parse("A:ok\n: no id\n").unwrap_err();
        assert!(matches!(err, ApiCompatError::InvalidBaselineLine { line: 2, .. }));
        assert!(Baseline::parse("NoSeparator").is_err());
    }

    #[test]
    fn test_suppress_marks_used() {
        let mut baseline = Baseline::parse("A:x\nA:x\nB:y\n").unwrap();
        assert!(baseline.suppress(&diff("A", "x")));
        assert!(!baseline.suppress(&diff("C", "z")));
        let unused: Vec<&str> = baseline.unused().iter().map(|e| e.line.as_str()).collect();
        assert_eq!(unused, vec!["B:y"]);
    }

    #[test]
    fn test_unused_lines_are_verbatim() {
        let baseline = Baseline::parse("  B - stale entry  \n\tC:tabbed\n").unwrap();
        assert_eq!(baseline.unused()[0].line, "  B - stale entry  ");
        assert_eq!(baseline.unused()[0].key, "B:stale entry");
        assert_eq!(baseline.unused()[1].line, "\tC:tabbed");
    }

    #[test]
    fn test_render_round_trip() {
        let differences = vec![diff("A", "x"), Difference::informational("I", "info"), diff("B", "y")];
        let text = Baseline::render([("Lib", differences.as_slice())]);
        assert_eq!(text, "# Assembly: Lib\nA:x\nI:info\nB:y\n");
        let mut baseline = Baseline::parse(&text).unwrap();
        assert!(differences.iter().all(|d| baseline.suppress(d)));
        assert!(baseline.unused().is_empty());
    }

    #[test]
    fn test_load_missing() {
        assert!(Baseline::load(Path::new("/no/such/baseline.txt")).unwrap_err().is_missing_file());
    }
}
