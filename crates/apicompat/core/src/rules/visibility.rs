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

//! Visibility rules
//!
//! Ordering: `Private < Assembly < FamilyAndAssembly < Family ~ FamilyOrAssembly < Public`.
//! Narrowing breaks callers. Widening an overridable protected member to
//! public breaks derived types that override it with `protected`.

use super::{DifferenceRule, RuleContext, TypeScope, member_name};
use crate::diff::{DifferenceType, Differences};
use crate::mapping::Pair;
use crate::symbols::{MemberSymbol, TypeSymbol, Visibility};

/// Whether moving from `left` to `right` removes access for some caller
pub fn is_more_restrictive(left: Visibility, right: Visibility) -> bool {
    right.rank() < left.rank()
}

/// Whether an overridable member moved from protected to public
pub fn is_more_visible_override(left: Visibility, right: Visibility) -> bool {
    matches!(left, Visibility::Family | Visibility::FamilyOrAssembly) && right == Visibility::Public
}

pub struct CannotMakeMoreRestrictive;

impl DifferenceRule for CannotMakeMoreRestrictive {
    fn id(&self) -> &'static str {
        "CannotMakeMoreRestrictive"
    }

    fn diff_type(&self, ctx: &RuleContext<'_>, _scope: TypeScope<'_>, types: Pair<&TypeSymbol>, out: &mut Differences) -> DifferenceType {
        let Some((left, right)) = types.both() else {
            return DifferenceType::Unknown;
        };
        if !is_more_restrictive(left.visibility, right.visibility) {
            return DifferenceType::Unknown;
        }
        out.add_incompatible(
            self.id(),
            format!(
                "Visibility of type '{}' is reduced from '{}' to '{}' in the {}.",
                left.full_name(),
                left.visibility,
                right.visibility,
                ctx.implementation
            ),
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
        if !is_more_restrictive(left.visibility, right.visibility) {
            return DifferenceType::Unknown;
        }
        out.add_incompatible(
            self.id(),
            format!(
                "Visibility of member '{}' is reduced from '{}' to '{}' in the {}.",
                member_name(left_type, left),
                left.visibility,
                right.visibility,
                ctx.implementation
            ),
        );
        DifferenceType::Changed
    }
}

pub struct CannotMakeMoreVisible;

impl DifferenceRule for CannotMakeMoreVisible {
    fn id(&self) -> &'static str {
        "CannotMakeMoreVisible"
    }

    fn diff_member(&self, ctx: &RuleContext<'_>, declaring: Pair<&TypeSymbol>, members: Pair<&MemberSymbol>, out: &mut Differences) -> DifferenceType {
        let Some((left, right)) = members.both() else {
            return DifferenceType::Unknown;
        };
        let Some((left_type, right_type)) = declaring.both() else {
            return DifferenceType::Unknown;
        };
        if !left.is_overridable() || right_type.is_effectively_sealed() {
            return DifferenceType::Unknown;
        }
        if !is_more_visible_override(left.visibility, right.visibility) {
            return DifferenceType::Unknown;
        }
        out.add_incompatible(
            self.id(),
            format!(
                "Visibility of overridable member '{}' is widened from '{}' to '{}' in the {}.",
                member_name(left_type, left),
                left.visibility,
                right.visibility,
                ctx.implementation
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
    use test_case::test_case;

    #[test_case(Visibility::Public, Visibility::Family => true)]
    #[test_case(Visibility::Public, Visibility::Public => false)]
    #[test_case(Visibility::Family, Visibility::FamilyOrAssembly => false; "family variants are interchangeable")]
    #[test_case(Visibility::FamilyOrAssembly, Visibility::Family => false)]
    #[test_case(Visibility::Family, Visibility::FamilyAndAssembly => true)]
    #[test_case(Visibility::Assembly, Visibility::Private => true)]
    #[test_case(Visibility::Private, Visibility::Public => false)]
    fn test_is_more_restrictive(left: Visibility, right: Visibility) -> bool {
        is_more_restrictive(left, right)
    }

    #[test_case(Visibility::Family, Visibility::Public => true)]
    #[test_case(Visibility::FamilyOrAssembly, Visibility::Public => true)]
    #[test_case(Visibility::Public, Visibility::Public => false)]
    #[test_case(Visibility::Public, Visibility::Family => false; "narrowing is not widening")]
    #[test_case(Visibility::Assembly, Visibility::Public => false)]
    fn test_is_more_visible_override(left: Visibility, right: Visibility) -> bool {
        is_more_visible_override(left, right)
    }

    fn run_members(left: MemberSymbol, right: MemberSymbol) -> Differences {
        let fixture = Fixture::new(single(TypeSymbol::class("N", "C").with_member(left)), single(TypeSymbol::class("N", "C").with_member(right)));
        let declaring = Pair::new(Some(fixture.left_type("N.C")), Some(fixture.right_type("N.C")));
        let members = Pair::new(Some(&fixture.left_type("N.C").members[0]), Some(&fixture.right_type("N.C").members[0]));
        let ctx = fixture.context();
        let mut out = Differences::new();
        CannotMakeMoreRestrictive.diff_member(&ctx, declaring, members, &mut out);
        CannotMakeMoreVisible.diff_member(&ctx, declaring, members, &mut out);
        out
    }

    #[test]
    fn test_narrowed_member() {
        let out = run_members(MemberSymbol::method("M", VOID), MemberSymbol::method("M", VOID).with_visibility(Visibility::Family));
        assert_eq!(out.len(), 1);
        assert_eq!(out.iter().next().unwrap().message, "Visibility of member 'N.C.M()' is reduced from 'public' to 'protected' in the implementation.");
    }

    #[test]
    fn test_widened_overridable_member() {
        let out = run_members(
            MemberSymbol::method("M", VOID).virtual_().with_visibility(Visibility::Family),
            MemberSymbol::method("M", VOID).virtual_(),
        );
        assert_eq!(out.iter().map(|d| d.id.as_str()).collect::<Vec<_>>(), vec!["CannotMakeMoreVisible"]);
    }

    #[test]
    fn test_widened_non_virtual_member_is_fine() {
        let out = run_members(MemberSymbol::method("M", VOID).with_visibility(Visibility::Family), MemberSymbol::method("M", VOID));
        assert!(out.is_empty());
    }

    #[test]
    fn test_public_contract_member_never_widens() {
        for right in [Visibility::Public, Visibility::Family, Visibility::FamilyOrAssembly, Visibility::Assembly, Visibility::Private] {
            let out = run_members(MemberSymbol::method("M", VOID).virtual_(), MemberSymbol::method("M", VOID).virtual_().with_visibility(right));
            assert!(out.iter().all(|d| d.id != "CannotMakeMoreVisible"));
        }
    }

    #[test]
    fn test_narrowed_type() {
        let fixture = Fixture::new(
            single(TypeSymbol::class("N", "Outer+Inner")),
            single(TypeSymbol::class("N", "Outer+Inner").with_visibility(Visibility::FamilyAndAssembly)),
        );
        let types = Pair::new(Some(fixture.left_type("N.Outer+Inner")), Some(fixture.right_type("N.Outer+Inner")));
        let mut out = Differences::new();
        assert_eq!(CannotMakeMoreRestrictive.diff_type(&fixture.context(), top_level(&fixture), types, &mut out), DifferenceType::Changed);
    }
}
