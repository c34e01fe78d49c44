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

//! Comparison report and its text/JSON renderings

use super::{Baseline, Difference};
use crate::config::ReportGrouping;
use crate::error::{ApiCompatError, Result};
use serde::Serialize;
use std::io::Write;

/// Process exit code when unsuppressed incompatible differences remain
pub const INCOMPATIBLE_EXIT_CODE: i32 = 2;

const STALE_HEADER: &str = "Invalid/Unused baseline differences:";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

/// Differences of one assembly pair, in traversal order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AssemblyReport {
    pub name: String,
    /// Differences that passed the baseline
    pub differences: Vec<Difference>,
    /// Differences a baseline entry accepted
    pub suppressed: Vec<Difference>,
}

impl AssemblyReport {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), ..Self::default() }
    }

    pub fn incompatible_count(&self) -> usize {
        self.differences.iter().filter(|d| d.is_incompatible).count()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonReport {
    pub contract: String,
    pub implementation: String,
    pub assemblies: Vec<AssemblyReport>,
    /// Set when the baseline was validated
    pub baseline_validated: bool,
    /// Unused baseline lines, verbatim
    pub stale_baseline_entries: Vec<String>,
    #[serde(skip)]
    pub grouping: ReportGrouping,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    #[serde(flatten)]
    report: &'a ComparisonReport,
    total_issues: usize,
}

impl ComparisonReport {
    pub fn new(contract: impl Into<String>, implementation: impl Into<String>) -> Self {
        Self {
            contract: contract.into(),
            implementation: implementation.into(),
            assemblies: Vec::new(),
            baseline_validated: false,
            stale_baseline_entries: Vec::new(),
            grouping: ReportGrouping::default(),
        }
    }

    /// Every unsuppressed difference, assembly by assembly
    pub fn differences(&self) -> impl Iterator<Item = &Difference> {
        self.assemblies.iter().flat_map(|a| a.differences.iter())
    }

    pub fn suppressed_count(&self) -> usize {
        self.assemblies.iter().map(|a| a.suppressed.len()).sum()
    }

    /// Unsuppressed incompatible differences plus stale baseline entries
    pub fn total_issues(&self) -> usize {
        self.assemblies.iter().map(AssemblyReport::incompatible_count).sum::<usize>() + self.stale_baseline_entries.len()
    }

    pub fn is_compatible(&self) -> bool {
        self.total_issues() == 0
    }

    pub fn exit_code(&self) -> i32 {
        if self.is_compatible() { 0 } else { INCOMPATIBLE_EXIT_CODE }
    }

    /// Baseline text accepting every difference of this run, including the
    /// ones an input baseline already suppressed
    pub fn to_baseline(&self) -> String {
        let merged: Vec<(String, Vec<Difference>)> = self
            .assemblies
            .iter()
            .map(|a| {
                let mut all = a.suppressed.clone();
                all.extend(a.differences.iter().cloned());
                (a.name.clone(), all)
            })
            .collect();
        Baseline::render(merged.iter().map(|(name, diffs)| (name.as_str(), diffs.as_slice())))
    }

    pub fn write(&self, format: ReportFormat, out: &mut dyn Write) -> Result<()> {
        match format {
            ReportFormat::Text => self.write_text(out),
            ReportFormat::Json => self.write_json(out),
        }
    }

    pub fn write_text(&self, out: &mut dyn Write) -> Result<()> {
        for assembly in &self.assemblies {
            if assembly.differences.is_empty() {
                continue;
            }
            if self.grouping == ReportGrouping::ByAssembly {
                writeln!(out, "Compat issues with assembly {}:", assembly.name).map_err(ApiCompatError::Output)?;
            }
            for difference in &assembly.differences {
                if difference.is_incompatible {
                    writeln!(out, "{}", difference).map_err(ApiCompatError::Output)?;
                } else {
                    writeln!(out, "(info) {}", difference).map_err(ApiCompatError::Output)?;
                }
            }
        }
        if self.baseline_validated && !self.stale_baseline_entries.is_empty() {
            writeln!(out, "{}", STALE_HEADER).map_err(ApiCompatError::Output)?;
            for line in &self.stale_baseline_entries {
                writeln!(out, "{}", line).map_err(ApiCompatError::Output)?;
            }
        }
        writeln!(out, "Total Issues: {}", self.total_issues()).map_err(ApiCompatError::Output)?;
        Ok(())
    }

    pub fn write_json(&self, out: &mut dyn Write) -> Result<()> {
        let json = JsonReport { report: self, total_issues: self.total_issues() };
        serde_json::to_writer_pretty(&mut *out, &json)?;
        writeln!(out).map_err(ApiCompatError::Output)?;
        Ok(())
    }

    pub fn to_text(&self) -> Result<String> {
        let mut buffer = Vec::new();
        self.write_text(&mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ComparisonReport {
        let mut report = ComparisonReport::new("contract", "implementation");
        let mut lib = AssemblyReport::new("Lib");
        lib.differences.push(Difference::incompatible("MembersMustExist", "Member 'N.Foo.M()' is gone."));
        lib.differences.push(Difference::informational("AttributeDifference", "Attribute added."));
        lib.suppressed.push(Difference::incompatible("TypesMustExist", "Type 'N.Old' is gone."));
        report.assemblies.push(lib);
        report.assemblies.push(AssemblyReport::new("Clean"));
        report
    }

    #[test]
    fn test_total_issues_ignores_informational() {
        let report = sample();
        assert_eq!(report.total_issues(), 1);
        assert_eq!(report.suppressed_count(), 1);
        assert_eq!(report.exit_code(), INCOMPATIBLE_EXIT_CODE);
        assert_eq!(ComparisonReport::new("a", "b").exit_code(), 0);
    }

    #[test]
    fn test_text_grouped() {
        let text = sample().to_text().unwrap();
        assert_eq!(
            text,
            "Compat issues with assembly Lib:\n\
             MembersMustExist - Member 'N.Foo.M()' is gone.\n\
             (info) AttributeDifference - Attribute added.\n\
             Total Issues: 1\n"
        );
    }

    #[test]
    fn test_text_flat_with_stale_entries() {
        let mut report = sample();
        report.grouping = ReportGrouping::Flat;
        report.baseline_validated = true;
        report.stale_baseline_entries.push("Old:entry".to_string());
        let text = report.to_text().unwrap();
        assert!(!text.contains("Compat issues with assembly"));
        assert!(text.contains("Invalid/Unused baseline differences:\nOld:entry\n"));
        assert!(text.ends_with("Total Issues: 2\n"));
    }

    #[test]
    fn test_json_includes_total() {
        let mut buffer = Vec::new();
        sample().write_json(&mut buffer).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(value["total_issues"], 1);
        assert_eq!(value["assemblies"][0]["name"], "Lib");
        assert!(value.get("grouping").is_none());
    }

    #[test]
    fn test_to_baseline_includes_suppressed() {
        let baseline = sample().to_baseline();
        assert_eq!(
            baseline,
            "# Assembly: Lib\nTypesMustExist:Type 'N.Old' is gone.\nMembersMustExist:Member 'N.Foo.M()' is gone.\nAttributeDifference:Attribute added.\n"
        );
    }
}
