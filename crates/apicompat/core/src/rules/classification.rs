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
use crate::symbols::TypeSymbol;

pub struct TypeCannotChangeClassification;

impl DifferenceRule for TypeCannotChangeClassification {
    fn id(&self) -> &'static str {
        "TypeCannotChangeClassification"
    }

    fn diff_type(&self, ctx: &RuleContext<'_>, _scope: TypeScope<'_>, types: Pair<&TypeSymbol>, out: &mut Differences) -> DifferenceType {
        let Some((left, right)) = types.both() else {
            return DifferenceType::Unknown;
        };
        if left.kind == right.kind {
            return DifferenceType::Unknown;
        }
        out.add_incompatible(
            self.id(),
            format!("Type '{}' is a {} in the {} but a {} in the {}.", left.full_name(), right.kind, ctx.implementation, left.kind, ctx.contract),
        );
        DifferenceType::Changed
    }
}
