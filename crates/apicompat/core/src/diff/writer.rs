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

//! Difference writer
//!
//! Drives the rule registry over a mapping tree and turns the emitted
//! differences into a [`ComparisonReport`]:
//!
//! ```text
//! Init -> Traversing -> Emit -> Drain -> Done
//! ```
//!
//! Traversal is depth-first with every rule run at a node before its
//! children. Assembly pairs are independent, so traversal may run on the
//! rayon pool; the baseline is only touched in the drain phase, which walks
//! assemblies in tree order on the calling thread.

use super::{AssemblyReport, Baseline, ComparisonReport, Difference, Differences};
use crate::config::ReportGrouping;
use crate::mapping::{MappingNode, MappingTree};
use crate::rules::{RuleContext, RuleRegistry};
use rayon::prelude::*;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriterState {
    Init,
    Traversing,
    Emit,
    Drain,
    Done,
}

pub struct DifferenceWriter<'r> {
    registry: &'r RuleRegistry,
    baseline: Option<Baseline>,
    validate_baseline: bool,
    grouping: ReportGrouping,
    parallel: bool,
    state: WriterState,
}

impl<'r> DifferenceWriter<'r> {
    pub fn new(registry: &'r RuleRegistry) -> Self {
        Self {
            registry,
            baseline: None,
            validate_baseline: false,
            grouping: ReportGrouping::default(),
            parallel: false,
            state: WriterState::Init,
        }
    }

    pub fn with_baseline(mut self, baseline: Option<Baseline>) -> Self {
        self.baseline = baseline;
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

    pub fn state(&self) -> WriterState {
        self.state
    }

    /// Baseline with its used markers, once the drain phase has run
    pub fn baseline(&self) -> Option<&Baseline> {
        self.baseline.as_ref()
    }

    /// Evaluate every node of `tree` and collect the report
    pub fn write(&mut self, ctx: &RuleContext<'_>, tree: &mut MappingTree<'_>) -> ComparisonReport {
        self.state = WriterState::Traversing;
        let registry = self.registry;
        if self.parallel {
            debug!("Evaluating {} assembly pairs in parallel", tree.assemblies.len());
            tree.assemblies.par_iter_mut().for_each(|node| visit(registry, ctx, node));
        } else {
            for node in &mut tree.assemblies {
                visit(registry, ctx, node);
            }
        }

        self.state = WriterState::Emit;
        let emitted: Vec<(String, Vec<Difference>)> = tree.assemblies.iter().map(|node| (node.key.clone(), collect(node))).collect();

        self.state = WriterState::Drain;
        let mut report = ComparisonReport::new(ctx.contract.clone(), ctx.implementation.clone());
        report.grouping = self.grouping;
        for (name, differences) in emitted {
            let mut assembly = AssemblyReport::new(name);
            for difference in differences {
                let suppressed = self.baseline.as_mut().is_some_and(|b| b.suppress(&difference));
                if suppressed {
                    assembly.suppressed.push(difference);
                } else {
                    assembly.differences.push(difference);
                }
            }
            info!(
                "Assembly {}: {} differences, {} incompatible, {} suppressed",
                assembly.name,
                assembly.differences.len(),
                assembly.incompatible_count(),
                assembly.suppressed.len()
            );
            report.assemblies.push(assembly);
        }

        if self.validate_baseline {
            report.baseline_validated = true;
            if let Some(baseline) = &self.baseline {
                report.stale_baseline_entries = baseline.unused().into_iter().map(|e| e.line.clone()).collect();
            }
        }

        self.state = WriterState::Done;
        report
    }
}

fn visit(registry: &RuleRegistry, ctx: &RuleContext<'_>, node: &mut MappingNode<'_>) {
    let mut out = Differences::new();
    let result = registry.evaluate(ctx, &node.element, &mut out);
    node.difference_type = node.difference_type.merge(result);
    if !out.is_empty() {
        debug!("{} {}: {} differences", node.element.kind_name(), node.key, out.len());
    }
    node.differences = out.into_vec();
    for child in &mut node.children {
        visit(registry, ctx, child);
    }
}

fn collect(node: &MappingNode<'_>) -> Vec<Difference> {
    node.descendants().into_iter().flat_map(|n| n.differences.iter().cloned()).collect()
}
