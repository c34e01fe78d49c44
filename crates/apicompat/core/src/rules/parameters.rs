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

//! Signature detail rules: return ref-ness and parameter modifiers and names
//!
//! `ref`, `out` and `in` parameters share one comparison key, so a change
//! between them lands on a matched parameter pair and is reported here.

use super::{DifferenceRule, ParameterScope, RuleContext, member_name, parameter_name};
use crate::diff::{DifferenceType, Differences};
use crate::mapping::Pair;
use crate::symbols::{MemberKind, MemberSymbol, ParameterSymbol, TypeSymbol};

pub struct ParameterModifiersCannotChange;

impl DifferenceRule for ParameterModifiersCannotChange {
    fn id(&self) -> &'static str {
        "ParameterModifiersCannotChange"
    }

    fn diff_member(&self, ctx: &RuleContext<'_>, declaring: Pair<&TypeSymbol>, members: Pair<&MemberSymbol>, out: &mut Differences) -> DifferenceType {
        let (Some((left, right)), Some(left_type)) = (members.both(), declaring.left) else {
            return DifferenceType::Unknown;
        };
        if !matches!(left.kind, MemberKind::Method | MemberKind::Property) || left.return_ref == right.return_ref {
            return DifferenceType::Unknown;
        }
        out.add_incompatible(
            self.id(),
            format!(
                "Return value of '{}' is '{}' in the {} but '{}' in the {}.",
                member_name(left_type, left),
                right.return_ref,
                ctx.implementation,
                left.return_ref,
                ctx.contract
            ),
        );
        DifferenceType::Changed
    }

    fn diff_parameter(&self, ctx: &RuleContext<'_>, scope: ParameterScope<'_>, parameters: Pair<&ParameterSymbol>, out: &mut Differences) -> DifferenceType {
        let (Some((left, right)), Some(left_type), Some(left_member)) = (parameters.both(), scope.declaring.left, scope.members.left) else {
            return DifferenceType::Unknown;
        };
        if left.modifier == right.modifier {
            return DifferenceType::Unknown;
        }
        out.add_incompatible(
            self.id(),
            format!(
                "Modifier of {} is '{}' in the {} but '{}' in the {}.",
                parameter_name(left_type, left_member, left),
                right.modifier,
                ctx.implementation,
                left.modifier,
                ctx.contract
            ),
        );
        DifferenceType::Changed
    }
}

/// Renames break named arguments; off unless optional rules are enabled
pub struct ParameterNamesCannotChange;

impl DifferenceRule for ParameterNamesCannotChange {
    fn id(&self) -> &'static str {
        "ParameterNamesCannotChange"
    }

    fn is_optional(&self) -> bool {
        true
    }

    fn diff_parameter(&self, ctx: &RuleContext<'_>, scope: ParameterScope<'_>, parameters: Pair<&ParameterSymbol>, out: &mut Differences) -> DifferenceType {
        let (Some((left, right)), Some(left_type), Some(left_member)) = (parameters.both(), scope.declaring.left, scope.members.left) else {
            return DifferenceType::Unknown;
        };
        if left.name == right.name {
            return DifferenceType::Unknown;
        }
        out.add_incompatible(
            self.id(),
            format!(
                "Parameter name at position {} of '{}' is '{}' in the {} but '{}' in the {}.",
                scope.position,
                member_name(left_type, left_member),
                right.name,
                ctx.implementation,
                left.name,
                ctx.contract
            ),
        );
        DifferenceType::Changed
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;
    use crate::symbols::member::VOID;
    use crate::symbols::{ParameterModifier, ReturnRef};

    fn method_with(parameter: ParameterSymbol) -> MemberSymbol {
        MemberSymbol::method("M", VOID).with_parameter(parameter)
    }

    fn run_parameter(rule: &dyn DifferenceRule, fixture: &Fixture) -> Differences {
        let left_type = fixture.left_type("N.T");
        let right_type = fixture.right_type("N.T");
        let scope = ParameterScope {
            declaring: Pair::new(Some(left_type), Some(right_type)),
            members: Pair::new(Some(&left_type.members[0]), Some(&right_type.members[0])),
            position: 0,
        };
        let parameters = Pair::new(Some(&left_type.members[0].parameters[0]), Some(&right_type.members[0].parameters[0]));
        let mut out = Differences::new();
        rule.diff_parameter(&fixture.context(), scope, parameters, &mut out);
        out
    }

    #[test]
    fn test_modifier_change() {
        let fixture = Fixture::new(
            single(TypeSymbol::class("N", "T").with_member(method_with(ParameterSymbol::new("x", "System.Int32").with_modifier(ParameterModifier::Ref)))),
            single(TypeSymbol::class("N", "T").with_member(method_with(ParameterSymbol::new("x", "System.Int32").with_modifier(ParameterModifier::Out)))),
        );
        let out = run_parameter(&ParameterModifiersCannotChange, &fixture);
        assert_eq!(
            out.iter().next().unwrap().message,
            "Modifier of parameter 'x' of 'N.T.M(ref System.Int32)' is 'out' in the implementation but 'ref' in the contract."
        );
    }

    #[test]
    fn test_renamed_parameter() {
        let fixture = Fixture::new(
            single(TypeSymbol::class("N", "T").with_member(method_with(ParameterSymbol::new("count", "System.Int32")))),
            single(TypeSymbol::class("N", "T").with_member(method_with(ParameterSymbol::new("length", "System.Int32")))),
        );
        let out = run_parameter(&ParameterNamesCannotChange, &fixture);
        assert_eq!(out.len(), 1);
        assert!(ParameterNamesCannotChange.is_optional());
        assert!(run_parameter(&ParameterModifiersCannotChange, &fixture).is_empty());
    }

    #[test]
    fn test_return_ref_change() {
        let fixture = Fixture::new(
            single(TypeSymbol::class("N", "T").with_member(MemberSymbol::method("Get", "System.Int32").with_return_ref(ReturnRef::Ref))),
            single(TypeSymbol::class("N", "T").with_member(MemberSymbol::method("Get", "System.Int32").with_return_ref(ReturnRef::RefReadonly))),
        );
        let declaring = Pair::new(Some(fixture.left_type("N.T")), Some(fixture.right_type("N.T")));
        let members = Pair::new(Some(&fixture.left_type("N.T").members[0]), Some(&fixture.right_type("N.T").members[0]));
        let mut out = Differences::new();
        assert_eq!(ParameterModifiersCannotChange.diff_member(&fixture.context(), declaring, members, &mut out), DifferenceType::Changed);
        assert!(out.iter().next().unwrap().message.contains("'ref readonly' in the implementation but 'ref'"));
    }
}
