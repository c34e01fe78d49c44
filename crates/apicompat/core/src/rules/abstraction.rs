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

//! Inheritance contract rules: abstract, sealed and virtual changes

use super::{DifferenceRule, RuleContext, TypeScope, member_name};
use crate::diff::{DifferenceType, Differences};
use crate::mapping::Pair;
use crate::symbols::{MemberSymbol, TypeKind, TypeSymbol};

pub struct CannotMakeAbstract;

impl DifferenceRule for CannotMakeAbstract {
    fn id(&self) -> &'static str {
        "CannotMakeAbstract"
    }

    fn diff_type(&self, ctx: &RuleContext<'_>, _scope: TypeScope<'_>, types: Pair<&TypeSymbol>, out: &mut Differences) -> DifferenceType {
        let Some((left, right)) = types.both() else {
            return DifferenceType::Unknown;
        };
        if left.kind != TypeKind::Class || left.is_abstract || !right.is_abstract {
            return DifferenceType::Unknown;
        }
        out.add_incompatible(
            self.id(),
            format!("Type '{}' is abstract in the {} but is not abstract in the {}.", right.full_name(), ctx.implementation, ctx.contract),
        );
        DifferenceType::Changed
    }

    fn diff_member(&self, ctx: &RuleContext<'_>, declaring: Pair<&TypeSymbol>, members: Pair<&MemberSymbol>, out: &mut Differences) -> DifferenceType {
        let Some((left, right)) = members.both() else {
            return DifferenceType::Unknown;
        };
        let Some((left_type, _)) = declaring.both() else {
            return DifferenceType::Unknown;
        };
        if left_type.is_interface() || left.is_abstract || !right.is_abstract {
            return DifferenceType::Unknown;
        }
        out.add_incompatible(
            self.id(),
            format!("Member '{}' is abstract in the {} but is not abstract in the {}.", member_name(left_type, left), ctx.implementation, ctx.contract),
        );
        DifferenceType::Changed
    }
}

/// A new abstract member on a class that could already be derived from
pub struct CannotAddAbstractMembers;

impl DifferenceRule for CannotAddAbstractMembers {
    fn id(&self) -> &'static str {
        "CannotAddAbstractMembers"
    }

    fn diff_member(&self, ctx: &RuleContext<'_>, declaring: Pair<&TypeSymbol>, members: Pair<&MemberSymbol>, out: &mut Differences) -> DifferenceType {
        let Some(member) = members.right_only() else {
            return DifferenceType::Unknown;
        };
        let Some((left_type, right_type)) = declaring.both() else {
            return DifferenceType::Unknown;
        };
        if !member.is_abstract || right_type.kind != TypeKind::Class || left_type.is_effectively_sealed() {
            return DifferenceType::Unknown;
        }
        out.add_incompatible(
            self.id(),
            format!("Member '{}' is abstract in the {} but is missing in the {}.", member_name(right_type, member), ctx.implementation, ctx.contract),
        );
        DifferenceType::Added
    }
}

pub struct CannotSealType;

impl DifferenceRule for CannotSealType {
    fn id(&self) -> &'static str {
        "CannotSealType"
    }

    fn diff_type(&self, ctx: &RuleContext<'_>, _scope: TypeScope<'_>, types: Pair<&TypeSymbol>, out: &mut Differences) -> DifferenceType {
        let Some((left, right)) = types.both() else {
            return DifferenceType::Unknown;
        };
        if left.kind != TypeKind::Class || left.is_effectively_sealed() || !right.is_effectively_sealed() {
            return DifferenceType::Unknown;
        }
        let how = if right.is_sealed { "sealed" } else { "effectively sealed (it has no visible constructor)" };
        out.add_incompatible(
            self.id(),
            format!("Type '{}' is {} in the {} but not sealed in the {}.", right.full_name(), how, ctx.implementation, ctx.contract),
        );
        DifferenceType::Changed
    }
}

pub struct CannotMakeMemberNonVirtual;

impl DifferenceRule for CannotMakeMemberNonVirtual {
    fn id(&self) -> &'static str {
        "CannotMakeMemberNonVirtual"
    }

    fn diff_member(&self, ctx: &RuleContext<'_>, declaring: Pair<&TypeSymbol>, members: Pair<&MemberSymbol>, out: &mut Differences) -> DifferenceType {
        let Some((left, right)) = members.both() else {
            return DifferenceType::Unknown;
        };
        let Some((left_type, _)) = declaring.both() else {
            return DifferenceType::Unknown;
        };
        // nothing outside the assembly could override in these cases
        if left_type.is_interface() || left_type.is_effectively_sealed() {
            return DifferenceType::Unknown;
        }
        if !left.is_overridable() || right.is_overridable() {
            return DifferenceType::Unknown;
        }
        out.add_incompatible(
            self.id(),
            format!("Member '{}' is non-virtual in the {} but is virtual in the {}.", member_name(left_type, left), ctx.implementation, ctx.contract),
        );
        DifferenceType::Changed
    }
}
