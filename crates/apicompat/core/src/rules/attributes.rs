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

//! Custom attribute differences
//!
//! Attributes are paired by their canonical key first (type plus rendered
//! arguments); what remains is paired by attribute type, which yields the
//! "changed arguments" case. Unpaired contract attributes were removed,
//! unpaired implementation attributes were added. Additions are informational.

use super::{DifferenceRule, ParameterScope, RuleContext, TypeScope, member_name, parameter_name};
use crate::diff::{DifferenceType, Differences};
use crate::mapping::Pair;
use crate::symbols::{AssemblySymbol, AttributeSymbol, MemberSymbol, ParameterSymbol, TypeSymbol};

pub struct AttributeDifference;

impl AttributeDifference {
    fn diff_attributes(&self, ctx: &RuleContext<'_>, target: &str, left: &[AttributeSymbol], right: &[AttributeSymbol], out: &mut Differences) -> DifferenceType {
        let left: Vec<&AttributeSymbol> = left.iter().filter(|a| !ctx.attribute_exclusions.is_excluded(a)).collect();
        let right: Vec<&AttributeSymbol> = right.iter().filter(|a| !ctx.attribute_exclusions.is_excluded(a)).collect();
        let mut used = vec![false; right.len()];
        let mut unmatched = Vec::new();

        for attribute in &left {
            let key = ctx.comparer.attribute_key(attribute);
            match (0..right.len()).find(|&i| !used[i] && ctx.comparer.attribute_key(right[i]) == key) {
                Some(i) => used[i] = true,
                None => unmatched.push(*attribute),
            }
        }

        let mut result = DifferenceType::Unknown;
        for attribute in unmatched {
            let type_key = ctx.comparer.type_reference_key(&attribute.type_name);
            let same_type = (0..right.len()).find(|&i| !used[i] && ctx.comparer.type_reference_key(&right[i].type_name) == type_key);
            match same_type {
                Some(i) => {
                    used[i] = true;
                    out.add_incompatible(
                        self.id(),
                        format!(
                            "Attribute '{}' on {} changed from '{}' in the {} to '{}' in the {}.",
                            attribute.type_name,
                            target,
                            attribute.key(),
                            ctx.contract,
                            right[i].key(),
                            ctx.implementation
                        ),
                    );
                }
                None => {
                    out.add_incompatible(
                        self.id(),
                        format!(
                            "Attribute '{}' exists on {} in the {} but not the {}.",
                            attribute.type_name, target, ctx.contract, ctx.implementation
                        ),
                    );
                }
            }
            result = DifferenceType::Changed;
        }

        for (attribute, _) in right.iter().zip(&used).filter(|(_, used)| !**used) {
            out.add_informational(
                self.id(),
                format!(
                    "Attribute '{}' exists on {} in the {} but not the {}.",
                    attribute.type_name, target, ctx.implementation, ctx.contract
                ),
            );
            result = DifferenceType::Changed;
        }
        result
    }
}

impl DifferenceRule for AttributeDifference {
    fn id(&self) -> &'static str {
        "AttributeDifference"
    }

    fn diff_assembly(&self, ctx: &RuleContext<'_>, assemblies: Pair<&AssemblySymbol>, out: &mut Differences) -> DifferenceType {
        let Some((left, right)) = assemblies.both() else {
            return DifferenceType::Unknown;
        };
        self.diff_attributes(ctx, &format!("assembly '{}'", left.name), &left.attributes, &right.attributes, out)
    }

    fn diff_type(&self, ctx: &RuleContext<'_>, _scope: TypeScope<'_>, types: Pair<&TypeSymbol>, out: &mut Differences) -> DifferenceType {
        let Some((left, right)) = types.both() else {
            return DifferenceType::Unknown;
        };
        self.diff_attributes(ctx, &format!("'{}'", left.full_name()), &left.attributes, &right.attributes, out)
    }

    fn diff_member(&self, ctx: &RuleContext<'_>, declaring: Pair<&TypeSymbol>, members: Pair<&MemberSymbol>, out: &mut Differences) -> DifferenceType {
        let (Some((left, right)), Some(left_type)) = (members.both(), declaring.left) else {
            return DifferenceType::Unknown;
        };
        self.diff_attributes(ctx, &format!("'{}'", member_name(left_type, left)), &left.attributes, &right.attributes, out)
    }

    fn diff_parameter(&self, ctx: &RuleContext<'_>, scope: ParameterScope<'_>, parameters: Pair<&ParameterSymbol>, out: &mut Differences) -> DifferenceType {
        let (Some((left, right)), Some(left_type), Some(left_member)) = (parameters.both(), scope.declaring.left, scope.members.left) else {
            return DifferenceType::Unknown;
        };
        self.diff_attributes(ctx, &parameter_name(left_type, left_member, left), &left.attributes, &right.attributes, out)
    }
}
