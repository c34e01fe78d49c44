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

use apicompat_core::comparer::SymbolComparer;
use apicompat_core::filter::PublicOnlyFilter;
use apicompat_core::mapping::ApiMapper;
use apicompat_core::rules::base_types::CannotRemoveBaseTypeOrInterface;
use apicompat_core::rules::visibility::is_more_visible_override;
use apicompat_core::symbols::member::VOID;
use apicompat_core::symbols::{ParameterSymbol, Visibility};
use apicompat_core::{ApiCompatEngine, AssemblySymbol, ComparisonConfig, MemberSymbol, TypeSymbol};
use proptest::prelude::*;
use std::collections::BTreeMap;

const PARAMETER_TYPES: [&str; 3] = ["System.Int32", "System.String", "System.Boolean"];

/// Members keyed by signature so every generated type is free of duplicates
fn members_strategy() -> impl Strategy<Value = Vec<MemberSymbol>> {
    prop::collection::btree_map(("[A-D]", prop::collection::vec(0usize..PARAMETER_TYPES.len(), 0..3)), any::<bool>(), 0..5).prop_map(|members| {
        members
            .into_iter()
            .map(|((name, params), public)| {
                let mut member = MemberSymbol::method(name, VOID);
                for (i, ty) in params.into_iter().enumerate() {
                    member = member.with_parameter(ParameterSymbol::new(format!("p{}", i), PARAMETER_TYPES[ty]));
                }
                if public { member } else { member.with_visibility(Visibility::Family) }
            })
            .collect()
    })
}

fn types_strategy() -> impl Strategy<Value = Vec<TypeSymbol>> {
    prop::collection::btree_map("[P-S]", (members_strategy(), any::<bool>()), 0..4).prop_map(|types| {
        types
            .into_iter()
            .map(|(name, (members, sealed))| {
                let mut ty = TypeSymbol::class("N", name);
                ty.members = members;
                if sealed { ty.sealed() } else { ty }
            })
            .collect()
    })
}

fn assemblies_strategy() -> impl Strategy<Value = Vec<AssemblySymbol>> {
    types_strategy().prop_map(|types| {
        let mut asm = AssemblySymbol::new("Lib");
        asm.types = types;
        vec![asm]
    })
}

fn visibility_strategy() -> impl Strategy<Value = Visibility> {
    prop_oneof![
        Just(Visibility::Private),
        Just(Visibility::Assembly),
        Just(Visibility::FamilyAndAssembly),
        Just(Visibility::Family),
        Just(Visibility::FamilyOrAssembly),
        Just(Visibility::Public),
    ]
}

fn chain_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[A-F]", 0..6)
}

fn is_subsequence(needle: &[String], haystack: &[String]) -> bool {
    let mut rest = haystack.iter();
    needle.iter().all(|item| rest.any(|candidate| candidate == item))
}

/// Key path of every node, with which sides are present
fn node_sides(left: &[AssemblySymbol], right: &[AssemblySymbol]) -> BTreeMap<Vec<String>, (bool, bool)> {
    let comparer = SymbolComparer::new();
    let filter = PublicOnlyFilter;
    let tree = ApiMapper::new(&comparer, &filter).map(left, right);
    let mut out = BTreeMap::new();
    let mut stack: Vec<(Vec<String>, _)> = tree.assemblies.iter().map(|n| (vec![n.key.clone()], n)).collect();
    while let Some((path, node)) = stack.pop() {
        for child in &node.children {
            let mut child_path = path.clone();
            child_path.push(child.key.clone());
            stack.push((child_path, child));
        }
        out.insert(path, (node.element.has_left(), node.element.has_right()));
    }
    out
}

proptest! {
    #[test]
    fn prop_self_comparison_is_clean(side in assemblies_strategy()) {
        let report = ApiCompatEngine::new(ComparisonConfig::default()).compare(&side, &side);
        prop_assert_eq!(report.total_issues(), 0);
    }

    #[test]
    fn prop_comparison_is_deterministic(left in assemblies_strategy(), right in assemblies_strategy()) {
        let sequential = ApiCompatEngine::new(ComparisonConfig::default()).compare(&left, &right);
        let again = ApiCompatEngine::new(ComparisonConfig::default()).compare(&left, &right);
        let parallel = ApiCompatEngine::new(ComparisonConfig::new().with_parallel(true)).compare(&left, &right);
        prop_assert_eq!(&sequential, &again);
        prop_assert_eq!(&sequential, &parallel);
    }

    #[test]
    fn prop_mapping_is_symmetric(left in assemblies_strategy(), right in assemblies_strategy()) {
        let forward = node_sides(&left, &right);
        let backward = node_sides(&right, &left);
        prop_assert_eq!(forward.len(), backward.len());
        for (path, (has_left, has_right)) in &forward {
            prop_assert_eq!(backward.get(path), Some(&(*has_right, *has_left)));
        }
    }

    #[test]
    fn prop_differences_are_traceable_to_rules(left in assemblies_strategy(), right in assemblies_strategy()) {
        let engine = ApiCompatEngine::new(ComparisonConfig::default());
        let known = engine.registry().rule_ids();
        let report = engine.compare(&left, &right);
        for difference in report.differences() {
            prop_assert!(known.contains(&difference.id.as_str()));
            prop_assert!(!difference.message.is_empty());
        }
    }

    #[test]
    fn prop_public_member_never_becomes_more_visible(right in visibility_strategy()) {
        prop_assert!(!is_more_visible_override(Visibility::Public, right));

        let left = vec![AssemblySymbol::new("Lib").with_type(TypeSymbol::class("N", "Open").with_member(MemberSymbol::method("Run", VOID).virtual_()))];
        let impl_side = vec![AssemblySymbol::new("Lib").with_type(
            TypeSymbol::class("N", "Open").with_member(MemberSymbol::method("Run", VOID).virtual_().with_visibility(right)),
        )];
        let report = ApiCompatEngine::new(ComparisonConfig::default()).compare(&left, &impl_side);
        prop_assert!(report.differences().all(|d| d.id != "CannotMakeMoreVisible"));
    }

    #[test]
    fn prop_accepted_base_chain_is_subsequence(left in chain_strategy(), right in chain_strategy()) {
        let missing = CannotRemoveBaseTypeOrInterface::first_missing_base(&left, &right);
        prop_assert_eq!(missing.is_none(), is_subsequence(&left, &right));
    }
}
