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

//! Structural rules that own the one-sided cases

use super::{DifferenceRule, RuleContext, TypeScope, member_name};
use crate::diff::{DifferenceType, Differences};
use crate::mapping::Pair;
use crate::symbols::{AssemblySymbol, MemberSymbol, TypeSymbol};

pub struct MatchingAssemblyDoesNotExist;

impl DifferenceRule for MatchingAssemblyDoesNotExist {
    fn id(&self) -> &'static str {
        "MatchingAssemblyDoesNotExist"
    }

    fn diff_assembly(&self, ctx: &RuleContext<'_>, assemblies: Pair<&AssemblySymbol>, out: &mut Differences) -> DifferenceType {
        let Some(left) = assemblies.left_only() else {
            return DifferenceType::Unknown;
        };
        out.add_incompatible(
            self.id(),
            format!("Assembly '{}' does not exist in the {} but it does exist in the {}.", left.name, ctx.implementation, ctx.contract),
        );
        DifferenceType::Removed
    }
}

pub struct TypesMustExist;

impl DifferenceRule for TypesMustExist {
    fn id(&self) -> &'static str {
        "TypesMustExist"
    }

    fn diff_type(&self, ctx: &RuleContext<'_>, scope: TypeScope<'_>, types: Pair<&TypeSymbol>, out: &mut Differences) -> DifferenceType {
        let Some(left) = types.left_only() else {
            return DifferenceType::Unknown;
        };
        // a missing container is reported once, at the container
        if scope.assemblies.right.is_none() || scope.declaring.is_some_and(|d| d.right.is_none()) {
            return DifferenceType::Unknown;
        }
        out.add_incompatible(
            self.id(),
            format!("Type '{}' does not exist in the {} but it does exist in the {}.", left.full_name(), ctx.implementation, ctx.contract),
        );
        DifferenceType::Removed
    }
}

/// Outcome of looking for a contract member on the implementation side
#[derive(Debug, Clone, Copy)]
pub enum MemberLookup<'a> {
    Found,
    NotFound,
    /// Same signature, different return type; carries the type that declares it
    ReturnTypeChanged(&'a TypeSymbol, &'a MemberSymbol),
}

pub struct MembersMustExist;

impl MembersMustExist {
    /// Search the implementation type and then its base chain
    ///
    /// Constructors only ever match on the type itself, and explicit interface
    /// implementations are never promoted.
    pub fn find_member<'a>(ctx: &RuleContext<'a>, contract_type: &TypeSymbol, declaring: &'a TypeSymbol, member: &MemberSymbol) -> MemberLookup<'a> {
        let mut changed = Self::search(ctx, contract_type, declaring, member);
        if matches!(changed, MemberLookup::Found) {
            return changed;
        }
        if member.is_constructor() || member.is_explicit_interface_implementation() {
            return changed;
        }
        for base in ctx.right_types.base_types(declaring) {
            match Self::search(ctx, contract_type, base, member) {
                MemberLookup::Found => return MemberLookup::Found,
                hit @ MemberLookup::ReturnTypeChanged(..) if matches!(changed, MemberLookup::NotFound) => changed = hit,
                _ => {}
            }
        }
        changed
    }

    fn search<'a>(ctx: &RuleContext<'a>, contract_type: &TypeSymbol, ty: &'a TypeSymbol, member: &MemberSymbol) -> MemberLookup<'a> {
        let key = ctx.comparer.member_key(contract_type, member);
        let mut result = MemberLookup::NotFound;
        for candidate in &ty.members {
            if candidate.kind != member.kind || candidate.is_static != member.is_static {
                continue;
            }
            if candidate.visibility.rank() < member.visibility.rank() {
                continue;
            }
            if ctx.comparer.member_key(ty, candidate) == key {
                return MemberLookup::Found;
            }
            if matches!(result, MemberLookup::NotFound) && ctx.comparer.signatures_match((contract_type, member), (ty, candidate)) {
                result = MemberLookup::ReturnTypeChanged(ty, candidate);
            }
        }
        result
    }
}

impl DifferenceRule for MembersMustExist {
    fn id(&self) -> &'static str {
        "MembersMustExist"
    }

    fn diff_member(&self, ctx: &RuleContext<'_>, declaring: Pair<&TypeSymbol>, members: Pair<&MemberSymbol>, out: &mut Differences) -> DifferenceType {
        let Some(member) = members.left_only() else {
            return DifferenceType::Unknown;
        };
        let (Some(left_type), Some(right_type)) = (declaring.left, declaring.right) else {
            return DifferenceType::Unknown;
        };
        if left_type.is_interface() {
            return DifferenceType::Unknown;
        }
        match Self::find_member(ctx, left_type, right_type, member) {
            MemberLookup::Found => DifferenceType::Unknown,
            MemberLookup::NotFound => {
                out.add_incompatible(
                    self.id(),
                    format!(
                        "Member '{}' does not exist in the {} but it does exist in the {}.",
                        member_name(left_type, member),
                        ctx.implementation,
                        ctx.contract
                    ),
                );
                DifferenceType::Removed
            }
            MemberLookup::ReturnTypeChanged(owner, found) => {
                out.add_incompatible(
                    self.id(),
                    format!(
                        "Member '{}' returning '{}' does not exist in the {}; found '{}' returning '{}' instead.",
                        member_name(left_type, member),
                        member.return_type,
                        ctx.implementation,
                        member_name(owner, found),
                        found.return_type
                    ),
                );
                DifferenceType::Removed
            }
        }
    }
}
