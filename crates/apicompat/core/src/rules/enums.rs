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

use super::{DifferenceRule, RuleContext, TypeScope, member_name};
use crate::diff::{DifferenceType, Differences};
use crate::mapping::Pair;
use crate::symbols::{MemberKind, MemberSymbol, TypeSymbol};

pub struct EnumTypesMustMatch;

impl DifferenceRule for EnumTypesMustMatch {
    fn id(&self) -> &'static str {
        "EnumTypesMustMatch"
    }

    fn diff_type(&self, ctx: &RuleContext<'_>, _scope: TypeScope<'_>, types: Pair<&TypeSymbol>, out: &mut Differences) -> DifferenceType {
        let Some((left, right)) = types.both() else {
            return DifferenceType::Unknown;
        };
        if !left.is_enum() || !right.is_enum() {
            return DifferenceType::Unknown;
        }
        let (Some(left_underlying), Some(right_underlying)) = (&left.enum_underlying_type, &right.enum_underlying_type) else {
            return DifferenceType::Unknown;
        };
        if ctx.comparer.type_references_equal(left_underlying, right_underlying) {
            return DifferenceType::Unknown;
        }
        out.add_incompatible(
            self.id(),
            format!(
                "Underlying type of enum '{}' is '{}' in the {} but '{}' in the {}.",
                left.full_name(),
                right_underlying,
                ctx.implementation,
                left_underlying,
                ctx.contract
            ),
        );
        DifferenceType::Changed
    }
}

pub struct EnumValuesMustMatch;

impl EnumValuesMustMatch {
    /// Compare numerically when both sides parse, textually otherwise
    pub fn values_equal(left: &str, right: &str) -> bool {
        match (parse_value(left), parse_value(right)) {
            (Some(l), Some(r)) => l == r,
            _ => left.trim() == right.trim(),
        }
    }
}

fn parse_value(text: &str) -> Option<i128> {
    let text = text.trim();
    match text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        Some(hex) => i128::from_str_radix(hex, 16).ok(),
        None => text.parse().ok(),
    }
}

impl DifferenceRule for EnumValuesMustMatch {
    fn id(&self) -> &'static str {
        "EnumValuesMustMatch"
    }

    fn diff_member(&self, ctx: &RuleContext<'_>, declaring: Pair<&TypeSymbol>, members: Pair<&MemberSymbol>, out: &mut Differences) -> DifferenceType {
        let Some((left, right)) = members.both() else {
            return DifferenceType::Unknown;
        };
        let Some((left_type, right_type)) = declaring.both() else {
            return DifferenceType::Unknown;
        };
        if !left_type.is_enum() || !right_type.is_enum() || left.kind != MemberKind::Field {
            return DifferenceType::Unknown;
        }
        let (Some(left_value), Some(right_value)) = (&left.constant_value, &right.constant_value) else {
            return DifferenceType::Unknown;
        };
        if Self::values_equal(left_value, right_value) {
            return DifferenceType::Unknown;
        }
        out.add_incompatible(
            self.id(),
            format!(
                "Value of enum member '{}' is '{}' in the {} but '{}' in the {}.",
                member_name(left_type, left),
                right_value,
                ctx.implementation,
                left_value,
                ctx.contract
            ),
        );
        DifferenceType::Changed
    }
}
