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

use super::{DifferenceRule, RuleContext, TypeScope};
use crate::diff::{DifferenceType, Differences};
use crate::mapping::Pair;
use crate::symbols::{TypeKind, TypeSymbol};
use std::collections::HashSet;

/// The contract's visible base chain must survive, in order, inside the
/// implementation's chain; its visible interfaces must all still be implemented.
pub struct CannotRemoveBaseTypeOrInterface;

impl CannotRemoveBaseTypeOrInterface {
    /// First contract base that breaks the ordered-subsequence relation
    pub fn first_missing_base<'s>(left_chain: &'s [String], right_chain: &[String]) -> Option<&'s String> {
        let mut remaining = right_chain.iter();
        left_chain.iter().find(|base| !remaining.any(|candidate| candidate == *base))
    }

    fn diff_base_chain(&self, ctx: &RuleContext<'_>, left: &TypeSymbol, right: &TypeSymbol, out: &mut Differences) -> bool {
        let left_chain: Vec<String> = ctx
            .left_types
            .base_chain(left)
            .into_iter()
            .filter(|name| ctx.left_types.is_visible_outside_assembly(name))
            .map(|name| ctx.comparer.type_reference_key(&name))
            .collect();
        let right_chain: Vec<String> = ctx.right_types.base_chain(right).iter().map(|name| ctx.comparer.type_reference_key(name)).collect();
        let Some(missing) = Self::first_missing_base(&left_chain, &right_chain) else {
            return false;
        };
        out.add_incompatible(
            self.id(),
            format!(
                "Type '{}' does not inherit from base type '{}' in the {} but it does in the {}.",
                left.full_name(),
                missing,
                ctx.implementation,
                ctx.contract
            ),
        );
        true
    }

    fn diff_interfaces(&self, ctx: &RuleContext<'_>, left: &TypeSymbol, right: &TypeSymbol, out: &mut Differences) -> bool {
        let implemented: HashSet<String> = right.interfaces.iter().map(|name| ctx.comparer.type_reference_key(name)).collect();
        let mut changed = false;
        for interface in &left.interfaces {
            if !ctx.left_types.is_visible_outside_assembly(interface) {
                continue;
            }
            if implemented.contains(&ctx.comparer.type_reference_key(interface)) {
                continue;
            }
            out.add_incompatible(
                self.id(),
                format!(
                    "Type '{}' does not implement interface '{}' in the {} but it does in the {}.",
                    left.full_name(),
                    interface,
                    ctx.implementation,
                    ctx.contract
                ),
            );
            changed = true;
        }
        changed
    }
}

impl DifferenceRule for CannotRemoveBaseTypeOrInterface {
    fn id(&self) -> &'static str {
        "CannotRemoveBaseTypeOrInterface"
    }

    fn diff_type(&self, ctx: &RuleContext<'_>, _scope: TypeScope<'_>, types: Pair<&TypeSymbol>, out: &mut Differences) -> DifferenceType {
        let Some((left, right)) = types.both() else {
            return DifferenceType::Unknown;
        };
        // a kind change is its own difference
        if left.kind != right.kind {
            return DifferenceType::Unknown;
        }
        let mut changed = false;
        if left.kind == TypeKind::Class {
            changed |= self.diff_base_chain(ctx, left, right, out);
        }
        changed |= self.diff_interfaces(ctx, left, right, out);
        if changed { DifferenceType::Changed } else { DifferenceType::Unknown }
    }
}
