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

use super::{DifferenceRule, RuleContext};
use crate::diff::{DifferenceType, Differences};
use crate::mapping::Pair;
use crate::symbols::AssemblySymbol;

/// Culture and strong-name token must match; the version may only grow
pub struct AssemblyIdentityMustMatch;

impl DifferenceRule for AssemblyIdentityMustMatch {
    fn id(&self) -> &'static str {
        "AssemblyIdentityMustMatch"
    }

    fn diff_assembly(&self, ctx: &RuleContext<'_>, assemblies: Pair<&AssemblySymbol>, out: &mut Differences) -> DifferenceType {
        let Some((left, right)) = assemblies.both() else {
            return DifferenceType::Unknown;
        };
        let mut result = DifferenceType::Unknown;
        if !left.culture.eq_ignore_ascii_case(&right.culture) {
            out.add_incompatible(
                self.id(),
                format!(
                    "Culture of assembly '{}' is '{}' in the {} but '{}' in the {}.",
                    left.name, right.culture, ctx.implementation, left.culture, ctx.contract
                ),
            );
            result = DifferenceType::Changed;
        }
        // an unsigned contract accepts any token
        if !left.public_key_token.is_empty() && !left.public_key_token.eq_ignore_ascii_case(&right.public_key_token) {
            out.add_incompatible(
                self.id(),
                format!(
                    "Public key token of assembly '{}' is '{}' in the {} but '{}' in the {}.",
                    left.name, right.public_key_token, ctx.implementation, left.public_key_token, ctx.contract
                ),
            );
            result = DifferenceType::Changed;
        }
        if right.version_parts() < left.version_parts() {
            out.add_incompatible(
                self.id(),
                format!(
                    "Version of assembly '{}' is '{}' in the {}, lower than '{}' in the {}.",
                    left.name, right.version, ctx.implementation, left.version, ctx.contract
                ),
            );
            result = DifferenceType::Changed;
        }
        result
    }
}
