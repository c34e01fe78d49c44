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

//! Configuration for a comparison run

pub mod exclusions;

pub use exclusions::AttributeExclusions;

use crate::comparer::RemapTable;
use crate::diff::Baseline;
use crate::filter::FilterSettings;
use std::collections::BTreeSet;

pub const DEFAULT_CONTRACT_NAME: &str = "contract";
pub const DEFAULT_IMPLEMENTATION_NAME: &str = "implementation";

/// Switches read by the rule registry
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleSettings {
    /// Run rules marked optional (parameter names)
    pub include_optional_rules: bool,
    /// Rule ids that never run
    pub disabled_rules: BTreeSet<String>,
}

impl RuleSettings {
    pub fn is_disabled(&self, rule_id: &str) -> bool {
        self.disabled_rules.contains(rule_id)
    }
}

/// How the report lays out differences
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportGrouping {
    /// One header block per assembly pair
    #[default]
    ByAssembly,
    Flat,
}

/// Everything a comparison run needs besides the two symbol sets
#[derive(Debug, Clone)]
pub struct ComparisonConfig {
    pub contract_name: String,
    pub implementation_name: String,
    pub filter: FilterSettings,
    pub remap: RemapTable,
    pub attribute_exclusions: AttributeExclusions,
    pub rules: RuleSettings,
    pub baseline: Option<Baseline>,
    pub validate_baseline: bool,
    pub grouping: ReportGrouping,
    /// Evaluate independent assembly pairs on the rayon pool
    pub parallel: bool,
}

impl ComparisonConfig {
    pub fn new() -> Self {
        Self {
            contract_name: DEFAULT_CONTRACT_NAME.to_string(),
            implementation_name: DEFAULT_IMPLEMENTATION_NAME.to_string(),
            filter: FilterSettings::default(),
            remap: RemapTable::default(),
            attribute_exclusions: AttributeExclusions::default(),
            rules: RuleSettings::default(),
            baseline: None,
            validate_baseline: false,
            grouping: ReportGrouping::default(),
            parallel: false,
        }
    }

    pub fn with_operand_names(mut self, contract: impl Into<String>, implementation: impl Into<String>) -> Self {
        self.contract_name = contract.into();
        self.implementation_name = implementation.into();
        self
    }

    pub fn with_filter(mut self, filter: FilterSettings) -> Self {
        self.filter = filter;
        self
    }

    pub fn with_remap(mut self, remap: RemapTable) -> Self {
        self.remap = remap;
        self
    }

    pub fn with_attribute_exclusions(mut self, exclusions: AttributeExclusions) -> Self {
        self.attribute_exclusions = exclusions;
        self
    }

    pub fn with_optional_rules(mut self, enable: bool) -> Self {
        self.rules.include_optional_rules = enable;
        self
    }

    pub fn with_disabled_rule(mut self, rule_id: impl Into<String>) -> Self {
        self.rules.disabled_rules.insert(rule_id.into());
        self
    }

    pub fn with_baseline(mut self, baseline: Baseline) -> Self {
        self.baseline = Some(baseline);
        self
    }

    pub fn with_validate_baseline(mut self, validate: bool) -> Self {
        self.validate_baseline = validate;
        self
    }

    pub fn with_grouping(mut self, grouping: ReportGrouping) -> Self {
        self.grouping = grouping;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}

impl Default for ComparisonConfig {
    fn default() -> Self {
        Self::new()
    }
}
