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

//! Comparison entry point

use crate::comparer::SymbolComparer;
use crate::config::ComparisonConfig;
use crate::diff::{ComparisonReport, DifferenceWriter};
use crate::mapping::ApiMapper;
use crate::rules::{RuleContext, RuleRegistry};
use crate::symbols::AssemblySymbol;
use tracing::{debug, info};

/// Compares a contract assembly set against an implementation assembly set
pub struct ApiCompatEngine {
    config: ComparisonConfig,
    registry: RuleRegistry,
}

impl ApiCompatEngine {
    pub fn new(config: ComparisonConfig) -> Self {
        Self::with_registry(config, RuleRegistry::default())
    }

    pub fn with_registry(config: ComparisonConfig, registry: RuleRegistry) -> Self {
        Self { config, registry }
    }

    pub fn config(&self) -> &ComparisonConfig {
        &self.config
    }

    pub fn registry(&self) -> &RuleRegistry {
        &self.registry
    }

    /// Map both sides, run every rule and apply the baseline
    pub fn compare(&self, contract: &[AssemblySymbol], implementation: &[AssemblySymbol]) -> ComparisonReport {
        info!(
            "Comparing {} {} assemblies against {} {} assemblies",
            contract.len(),
            self.config.contract_name,
            implementation.len(),
            self.config.implementation_name
        );
        let filter = self.config.filter.build();
        let comparer = SymbolComparer::with_remap(self.config.remap.clone());
        let mut tree = ApiMapper::new(&comparer, filter.as_ref()).map(contract, implementation);
        debug!("Mapping tree has {} nodes", tree.nodes().len());

        let ctx = RuleContext::new(&comparer, contract, implementation, &self.config.attribute_exclusions, &self.config.rules)
            .with_operand_names(self.config.contract_name.clone(), self.config.implementation_name.clone());
        let mut writer = DifferenceWriter::new(&self.registry)
            .with_baseline(self.config.baseline.clone())
            .with_validate_baseline(self.config.validate_baseline)
            .with_grouping(self.config.grouping)
            .with_parallel(self.config.parallel);
        let report = writer.write(&ctx, &mut tree);
        info!("Comparison finished with {} issues", report.total_issues());
        report
    }
}
