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

//! Difference rules
//!
//! Each rule inspects one mapping node at a time and may append classified
//! [`Difference`](crate::diff::Difference)s. Rules are independent of each
//! other and are dispatched on the [`ElementPair`] tag of the node:
//!
//! - assembly pairs: identity, existence, attributes
//! - type pairs: existence, classification, inheritance, abstract/sealed,
//!   visibility, enums, attributes
//! - member pairs: existence and promotion, interface members, virtual and
//!   abstract changes, visibility, enum values, return ref-ness, attributes
//! - parameter pairs: modifiers, names, attributes
//!
//! Every rule returns [`DifferenceType::Unknown`] when the sides it needs are
//! absent; structural rules (`*MustExist`) own the one-sided cases.

pub mod abstraction;
pub mod attributes;
pub mod base_types;
pub mod classification;
pub mod context;
pub mod enums;
pub mod existence;
pub mod identity;
pub mod interfaces;
pub mod parameters;
pub mod visibility;

pub use context::{RuleContext, member_name, parameter_name};

use crate::diff::{DifferenceType, Differences};
use crate::mapping::{ElementPair, Pair};
use crate::symbols::{AssemblySymbol, MemberSymbol, ParameterSymbol, TypeSymbol};

/// Where a type pair sits in the tree
#[derive(Debug, Clone, Copy)]
pub struct TypeScope<'a> {
    pub assemblies: Pair<&'a AssemblySymbol>,
    /// `None` for top-level types
    pub declaring: Option<Pair<&'a TypeSymbol>>,
}

/// Where a parameter pair sits in the tree
#[derive(Debug, Clone, Copy)]
pub struct ParameterScope<'a> {
    pub declaring: Pair<&'a TypeSymbol>,
    pub members: Pair<&'a MemberSymbol>,
    pub position: usize,
}

pub trait DifferenceRule: Send + Sync {
    /// Stable id; appears in reports and baselines
    fn id(&self) -> &'static str;

    /// Optional rules only run when enabled in [`crate::config::RuleSettings`]
    fn is_optional(&self) -> bool {
        false
    }

    fn diff_assembly(&self, _ctx: &RuleContext<'_>, _assemblies: Pair<&AssemblySymbol>, _out: &mut Differences) -> DifferenceType {
        DifferenceType::Unknown
    }

    fn diff_type(&self, _ctx: &RuleContext<'_>, _scope: TypeScope<'_>, _types: Pair<&TypeSymbol>, _out: &mut Differences) -> DifferenceType {
        DifferenceType::Unknown
    }

    fn diff_member(&self, _ctx: &RuleContext<'_>, _declaring: Pair<&TypeSymbol>, _members: Pair<&MemberSymbol>, _out: &mut Differences) -> DifferenceType {
        DifferenceType::Unknown
    }

    fn diff_parameter(&self, _ctx: &RuleContext<'_>, _scope: ParameterScope<'_>, _parameters: Pair<&ParameterSymbol>, _out: &mut Differences) -> DifferenceType {
        DifferenceType::Unknown
    }
}

/// Explicit, ordered list of the rules a run evaluates
pub struct RuleRegistry {
    rules: Vec<Box<dyn DifferenceRule>>,
}

impl RuleRegistry {
    /// Empty registry
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    pub fn add_rule(&mut self, rule: Box<dyn DifferenceRule>) {
        self.rules.push(rule);
    }

    pub fn with_rule(mut self, rule: Box<dyn DifferenceRule>) -> Self {
        self.add_rule(rule);
        self
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn rule_ids(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.id()).collect()
    }

    /// `(id, optional)` for every registered rule
    pub fn describe(&self) -> Vec<(&'static str, bool)> {
        self.rules.iter().map(|r| (r.id(), r.is_optional())).collect()
    }

    fn is_active(&self, rule: &dyn DifferenceRule, ctx: &RuleContext<'_>) -> bool {
        !ctx.settings.is_disabled(rule.id()) && (!rule.is_optional() || ctx.settings.include_optional_rules)
    }

    /// Run every active rule on one node and fold the results
    pub fn evaluate(&self, ctx: &RuleContext<'_>, element: &ElementPair<'_>, out: &mut Differences) -> DifferenceType {
        let mut result = DifferenceType::Unknown;
        for rule in &self.rules {
            if !self.is_active(rule.as_ref(), ctx) {
                continue;
            }
            let outcome = match *element {
                ElementPair::Assembly(assemblies) => rule.diff_assembly(ctx, assemblies, out),
                ElementPair::Namespace { .. } => DifferenceType::Unknown,
                ElementPair::Type { assemblies, declaring, types } => rule.diff_type(ctx, TypeScope { assemblies, declaring }, types, out),
                ElementPair::Member { declaring, members } => rule.diff_member(ctx, declaring, members, out),
                ElementPair::Parameter { declaring, members, position, parameters } => {
                    rule.diff_parameter(ctx, ParameterScope { declaring, members, position }, parameters, out)
                }
            };
            result = result.merge(outcome);
        }
        result
    }
}

impl Default for RuleRegistry {
    /// Every built-in rule, in reporting order
    fn default() -> Self {
        Self::new()
            .with_rule(Box::new(existence::MatchingAssemblyDoesNotExist))
            .with_rule(Box::new(identity::AssemblyIdentityMustMatch))
            .with_rule(Box::new(existence::TypesMustExist))
            .with_rule(Box::new(classification::TypeCannotChangeClassification))
            .with_rule(Box::new(existence::MembersMustExist))
            .with_rule(Box::new(interfaces::InterfacesShouldHaveSameMembers))
            .with_rule(Box::new(abstraction::CannotMakeAbstract))
            .with_rule(Box::new(abstraction::CannotAddAbstractMembers))
            .with_rule(Box::new(abstraction::CannotSealType))
            .with_rule(Box::new(abstraction::CannotMakeMemberNonVirtual))
            .with_rule(Box::new(visibility::CannotMakeMoreRestrictive))
            .with_rule(Box::new(visibility::CannotMakeMoreVisible))
            .with_rule(Box::new(base_types::CannotRemoveBaseTypeOrInterface))
            .with_rule(Box::new(attributes::AttributeDifference))
            .with_rule(Box::new(enums::EnumTypesMustMatch))
            .with_rule(Box::new(enums::EnumValuesMustMatch))
            .with_rule(Box::new(parameters::ParameterModifiersCannotChange))
            .with_rule(Box::new(parameters::ParameterNamesCannotChange))
    }
}
