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

use super::{DifferenceRule, RuleContext, member_name};
use crate::diff::{DifferenceType, Differences};
use crate::mapping::Pair;
use crate::symbols::{MemberSymbol, TypeSymbol};

/// Any one-sided interface member breaks implementers or callers; there is no
/// base type to promote into.
pub struct InterfacesShouldHaveSameMembers;

impl DifferenceRule for InterfacesShouldHaveSameMembers {
    fn id(&self) -> &'static str {
        "InterfacesShouldHaveSameMembers"
    }

    fn diff_member(&self, ctx: &RuleContext<'_>, declaring: Pair<&TypeSymbol>, members: Pair<&MemberSymbol>, out: &mut Differences) -> DifferenceType {
        let Some((left_type, right_type)) = declaring.both() else {
            return DifferenceType::Unknown;
        };
        if !left_type.is_interface() || !right_type.is_interface() {
            return DifferenceType::Unknown;
        }
        if let Some(member) = members.left_only() {
            out.add_incompatible(
                self.id(),
                format!(
                    "Interface member '{}' does not exist in the {} but it does exist in the {}.",
                    member_name(left_type, member),
                    ctx.implementation,
                    ctx.contract
                ),
            );
            return DifferenceType::Removed;
        }
        if let Some(member) = members.right_only() {
            out.add_incompatible(
                self.id(),
                format!(
                    "Interface member '{}' is present in the {} but not in the {}.",
                    member_name(right_type, member),
                    ctx.implementation,
                    ctx.contract
                ),
            );
            return DifferenceType::Added;
        }
        DifferenceType::Unknown
    }
}
