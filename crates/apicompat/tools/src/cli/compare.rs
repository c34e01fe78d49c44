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

//! `compare` command

use super::input::load_assemblies;
use crate::error::CliError;
use anyhow::{Context, Result};
use apicompat_core::comparer::RemapTable;
use apicompat_core::config::{AttributeExclusions, ReportGrouping};
use apicompat_core::filter::FilterSettings;
use apicompat_core::rules::RuleRegistry;
use apicompat_core::{ApiCompatEngine, Baseline, ComparisonConfig, ComparisonReport, ReportFormat};
use clap::{Args, ValueEnum};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

impl From<OutputFormat> for ReportFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Text => ReportFormat::Text,
            OutputFormat::Json => ReportFormat::Json,
        }
    }
}

/// Arguments for the compare command
#[derive(Args, Debug, Clone)]
pub struct CompareArgs {
    /// Symbol document of the contract (reference) assemblies
    #[arg(short, long, value_name = "FILE")]
    pub contract: PathBuf,

    /// Symbol document of the implementation assemblies
    #[arg(short, long, value_name = "FILE")]
    pub implementation: PathBuf,

    /// Baseline of accepted differences
    #[arg(long, value_name = "FILE")]
    pub baseline: Option<PathBuf>,

    /// Report baseline entries no difference matched
    #[arg(long)]
    pub validate_baseline: bool,

    /// Write a baseline accepting every incompatible difference of this run
    #[arg(long, value_name = "FILE")]
    pub generate_baseline: Option<PathBuf>,

    /// Name remapping file (`old,new` per line)
    #[arg(long, value_name = "FILE")]
    pub remap_file: Option<PathBuf>,

    /// Attribute types (DocIds) to ignore when diffing attributes
    #[arg(long, value_name = "FILE")]
    pub exclude_attributes: Option<PathBuf>,

    /// Compare internal members of assemblies with friend assemblies
    #[arg(long)]
    pub include_internals: bool,

    /// Skip elements marked `EditorBrowsable(Never)`
    #[arg(long)]
    pub exclude_non_browsable: bool,

    /// Compare the MDIL public surface
    #[arg(long)]
    pub mdil: bool,

    /// Skip compiler-generated elements
    #[arg(long)]
    pub exclude_compiler_generated: bool,

    /// Contract name used in messages
    #[arg(long, default_value = apicompat_core::config::DEFAULT_CONTRACT_NAME)]
    pub left_operand: String,

    /// Implementation name used in messages
    #[arg(long, default_value = apicompat_core::config::DEFAULT_IMPLEMENTATION_NAME)]
    pub right_operand: String,

    /// List differences without per-assembly headers
    #[arg(long)]
    pub flat: bool,

    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Report file; stdout when omitted
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Evaluate assembly pairs in parallel
    #[arg(long)]
    pub parallel: bool,

    /// Also run optional rules
    #[arg(long)]
    pub optional_rules: bool,

    /// Rule id to skip; may be repeated
    #[arg(long = "disable-rule", value_name = "RULE")]
    pub disabled_rules: Vec<String>,
}

impl CompareArgs {
    /// Load auxiliary files and build the run configuration
    pub fn to_config(&self) -> Result<ComparisonConfig> {
        if self.validate_baseline && self.baseline.is_none() {
            return Err(CliError::ConflictingOptions("--validate-baseline requires --baseline".to_string()).into());
        }

        let filter = FilterSettings {
            include_internals: self.include_internals,
            exclude_non_browsable: self.exclude_non_browsable,
            mdil: self.mdil,
            exclude_compiler_generated: self.exclude_compiler_generated,
        };
        let mut config = ComparisonConfig::new()
            .with_operand_names(self.left_operand.clone(), self.right_operand.clone())
            .with_filter(filter)
            .with_optional_rules(self.optional_rules)
            .with_validate_baseline(self.validate_baseline)
            .with_grouping(if self.flat { ReportGrouping::Flat } else { ReportGrouping::ByAssembly })
            .with_parallel(self.parallel);

        if let Some(path) = &self.remap_file {
            config = config.with_remap(RemapTable::load(path)?);
        }
        if let Some(path) = &self.exclude_attributes {
            config = config.with_attribute_exclusions(AttributeExclusions::load(path)?);
        }
        if let Some(path) = &self.baseline {
            config = config.with_baseline(Baseline::load(path)?);
        }

        let known = RuleRegistry::default().rule_ids();
        for rule in &self.disabled_rules {
            if !known.contains(&rule.as_str()) {
                warn!("Unknown rule id {} passed to --disable-rule", rule);
            }
            config = config.with_disabled_rule(rule.clone());
        }
        Ok(config)
    }
}

/// Execute the compare command and return the process exit code
pub fn run_compare(args: &CompareArgs) -> Result<i32> {
    let config = args.to_config()?;
    let contract = load_assemblies(&args.contract)?;
    let implementation = load_assemblies(&args.implementation)?;

    let engine = ApiCompatEngine::new(config);
    let report = engine.compare(&contract, &implementation);

    write_report(&report, args)?;
    if let Some(path) = &args.generate_baseline {
        std::fs::write(path, report.to_baseline()).with_context(|| format!("Failed to write baseline {}", path.display()))?;
        info!("Baseline written to {}", path.display());
    }
    Ok(report.exit_code())
}

fn write_report(report: &ComparisonReport, args: &CompareArgs) -> Result<()> {
    match &args.output {
        Some(path) => {
            let file = File::create(path).with_context(|| format!("Failed to create report {}", path.display()))?;
            let mut writer = BufWriter::new(file);
            report.write(args.format.into(), &mut writer)?;
            writer.flush()?;
        }
        None => {
            let stdout = io::stdout();
            let mut lock = stdout.lock();
            report.write(args.format.into(), &mut lock)?;
        }
    }
    Ok(())
}
