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

//! Lock-step tree matching

use super::order::declaration_order;
use super::{ElementPair, MappingNode, MappingTree, Pair};
use crate::comparer::{ComparisonKey, SymbolComparer};
use crate::filter::{Symbol, SymbolFilter};
use crate::symbols::{AssemblySymbol, MemberSymbol, TypeSymbol};
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Groups `items` of both sides by key. The first element of a side wins
/// when a key repeats.
fn group_by_key<'a, T, F>(left: &[&'a T], right: &[&'a T], key: F) -> BTreeMap<ComparisonKey, Pair<&'a T>>
where
    F: Fn(&T) -> ComparisonKey,
{
    group_by_side_keys(left, right, &key, &key)
}

/// Like [`group_by_key`], for keys that depend on the side's context
fn group_by_side_keys<'a, T, L, R>(left: &[&'a T], right: &[&'a T], left_key: L, right_key: R) -> BTreeMap<ComparisonKey, Pair<&'a T>>
where
    L: Fn(&T) -> ComparisonKey,
    R: Fn(&T) -> ComparisonKey,
{
    let mut groups: BTreeMap<ComparisonKey, Pair<&'a T>> = BTreeMap::new();
    for item in left {
        let slot = groups.entry(left_key(item)).or_insert(Pair::new(None, None));
        if slot.left.is_none() {
            slot.left = Some(*item);
        }
    }
    for item in right {
        let slot = groups.entry(right_key(item)).or_insert(Pair::new(None, None));
        if slot.right.is_none() {
            slot.right = Some(*item);
        }
    }
    groups
}

/// Builds the mapping tree from two resolved symbol sets
pub struct ApiMapper<'c> {
    comparer: &'c SymbolComparer,
    filter: &'c dyn SymbolFilter,
}

impl<'c> ApiMapper<'c> {
    pub fn new(comparer: &'c SymbolComparer, filter: &'c dyn SymbolFilter) -> Self {
        Self { comparer, filter }
    }

    /// Match assemblies by identity, then recurse into namespaces, types,
    /// members and parameters
    pub fn map<'a>(&self, left: &'a [AssemblySymbol], right: &'a [AssemblySymbol]) -> MappingTree<'a> {
        let left_refs: Vec<&AssemblySymbol> = left.iter().collect();
        let right_refs: Vec<&AssemblySymbol> = right.iter().collect();
        for (side, set) in [("contract", &left_refs), ("implementation", &right_refs)] {
            let mut names: Vec<&str> = set.iter().map(|a| a.name.as_str()).collect();
            names.sort_unstable();
            if names.windows(2).any(|w| w[0] == w[1]) {
                warn!("Duplicate assembly identities in the {} set; only the first is compared", side);
            }
        }

        let assemblies = group_by_key(&left_refs, &right_refs, |a| self.comparer.assembly_key(a))
            .into_iter()
            .map(|(key, pair)| {
                let node = MappingNode::new(key, ElementPair::Assembly(pair));
                let children = self.map_namespaces(pair);
                debug!("Mapped assembly {} with {} namespaces", node.key, children.len());
                node.with_children(children)
            })
            .collect();

        MappingTree { assemblies }
    }

    fn included_types<'a>(&self, owner: Option<&'a AssemblySymbol>, declaring: Option<&'a TypeSymbol>, types: &'a [TypeSymbol]) -> Vec<&'a TypeSymbol> {
        let Some(owner) = owner else {
            return Vec::new();
        };
        types
            .iter()
            .filter(|ty| self.filter.include(owner, Symbol::Type { declaring, ty: *ty }))
            .collect()
    }

    fn map_namespaces<'a>(&self, assemblies: Pair<&'a AssemblySymbol>) -> Vec<MappingNode<'a>> {
        let left = self.included_types(assemblies.left, None, assemblies.left.map(|a| a.types.as_slice()).unwrap_or_default());
        let right = self.included_types(assemblies.right, None, assemblies.right.map(|a| a.types.as_slice()).unwrap_or_default());

        let mut namespaces: BTreeMap<ComparisonKey, (Pair<&'a str>, Vec<&'a TypeSymbol>, Vec<&'a TypeSymbol>)> = BTreeMap::new();
        for ty in left {
            let entry = namespaces
                .entry(self.comparer.namespace_key(&ty.namespace))
                .or_insert((Pair::new(None, None), Vec::new(), Vec::new()));
            entry.0.left.get_or_insert(ty.namespace.as_str());
            entry.1.push(ty);
        }
        for ty in right {
            let entry = namespaces
                .entry(self.comparer.namespace_key(&ty.namespace))
                .or_insert((Pair::new(None, None), Vec::new(), Vec::new()));
            entry.0.right.get_or_insert(ty.namespace.as_str());
            entry.2.push(ty);
        }

        namespaces
            .into_iter()
            .map(|(key, (pair, left_types, right_types))| {
                let element = ElementPair::Namespace { assemblies, namespaces: pair };
                let children = self.map_types(assemblies, None, &left_types, &right_types);
                MappingNode::new(key, element).with_children(children)
            })
            .collect()
    }

    fn map_types<'a>(
        &self,
        assemblies: Pair<&'a AssemblySymbol>,
        declaring: Option<Pair<&'a TypeSymbol>>,
        left: &[&'a TypeSymbol],
        right: &[&'a TypeSymbol],
    ) -> Vec<MappingNode<'a>> {
        group_by_key(left, right, |t| self.comparer.type_key(t))
            .into_iter()
            .map(|(key, types)| {
                let element = ElementPair::Type { assemblies, declaring, types };
                let children = self.map_type_children(assemblies, types);
                MappingNode::new(key, element).with_children(children)
            })
            .collect()
    }

    fn included_members<'a>(&self, owner: Option<&'a AssemblySymbol>, ty: Option<&'a TypeSymbol>) -> Vec<&'a MemberSymbol> {
        match (owner, ty) {
            (Some(owner), Some(declaring)) => declaring
                .members
                .iter()
                .filter(|member| self.filter.include(owner, Symbol::Member { declaring, member: *member }))
                .collect(),
            _ => Vec::new(),
        }
    }

    fn map_type_children<'a>(&self, assemblies: Pair<&'a AssemblySymbol>, types: Pair<&'a TypeSymbol>) -> Vec<MappingNode<'a>> {
        let left_members = self.included_members(assemblies.left, types.left);
        let right_members = self.included_members(assemblies.right, types.right);

        // members only exist on a side whose type exists
        let member_key = |ty: Option<&TypeSymbol>, m: &MemberSymbol| ty.map(|t| self.comparer.member_key(t, m)).unwrap_or_default();
        let mut children: Vec<MappingNode<'a>> = group_by_side_keys(
            &left_members,
            &right_members,
            |m| member_key(types.left, m),
            |m| member_key(types.right, m),
        )
        .into_iter()
        .map(|(key, members)| {
            let element = ElementPair::Member { declaring: types, members };
            let parameters = self.map_parameters(types, members);
            MappingNode::new(key, element).with_children(parameters)
        })
        .collect();

        let left_nested = self.included_types(assemblies.left, types.left, types.left.map(|t| t.nested_types.as_slice()).unwrap_or_default());
        let right_nested = self.included_types(assemblies.right, types.right, types.right.map(|t| t.nested_types.as_slice()).unwrap_or_default());
        children.extend(self.map_types(assemblies, Some(types), &left_nested, &right_nested));

        children.sort_by(declaration_order);
        children
    }

    /// Parameters are paired positionally, and only for matched members:
    /// equal member keys guarantee equal parameter counts.
    fn map_parameters<'a>(&self, declaring: Pair<&'a TypeSymbol>, members: Pair<&'a MemberSymbol>) -> Vec<MappingNode<'a>> {
        let Some((left, right)) = members.both() else {
            return Vec::new();
        };
        left.parameters
            .iter()
            .zip(right.parameters.iter())
            .enumerate()
            .map(|(position, (l, r))| {
                let element = ElementPair::Parameter {
                    declaring,
                    members,
                    position,
                    parameters: Pair::new(Some(l), Some(r)),
                };
                MappingNode::new(format!("#{}", position), element)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::DifferenceType;
    use crate::filter::PublicOnlyFilter;
    use crate::symbols::{ParameterSymbol, Visibility};

    fn foo(members: Vec<MemberSymbol>) -> Vec<AssemblySymbol> {
        let mut ty = TypeSymbol::class("N", "Foo");
        ty.members = members;
        vec![AssemblySymbol::new("Lib").with_type(ty)]
    }

    #[test]
    fn test_identical_trees_map_unchanged() {
        let left = foo(vec![MemberSymbol::method("M", "System.Void")]);
        let right = left.clone();
        let comparer = SymbolComparer::new();
        let mapper = ApiMapper::new(&comparer, &PublicOnlyFilter);
        let tree = mapper.map(&left, &right);
        let node = tree.find(&["Lib", "N", "N.Foo", "M:M()->System.Void"]).unwrap();
        assert_eq!(node.difference_type, DifferenceType::Unchanged);
        assert!(tree.nodes().iter().all(|n| n.difference_type == DifferenceType::Unchanged));
    }

    #[test]
    fn test_one_sided_members() {
        let left = foo(vec![MemberSymbol::method("Old", "System.Void")]);
        let right = foo(vec![MemberSymbol::method("New", "System.Void")]);
        let comparer = SymbolComparer::new();
        let mapper = ApiMapper::new(&comparer, &PublicOnlyFilter);
        let tree = mapper.map(&left, &right);
        let ty = tree.find(&["Lib", "N", "N.Foo"]).unwrap();
        assert_eq!(ty.children.len(), 2);
        assert_eq!(ty.child("M:Old()->System.Void").unwrap().difference_type, DifferenceType::Removed);
        assert_eq!(ty.child("M:New()->System.Void").unwrap().difference_type, DifferenceType::Added);
    }

    #[test]
    fn test_overloads_map_by_signature() {
        let int_overload = MemberSymbol::method("M", "System.Void").with_parameter(ParameterSymbol::new("x", "System.Int32"));
        let string_overload = MemberSymbol::method("M", "System.Void").with_parameter(ParameterSymbol::new("x", "System.String"));
        let left = foo(vec![int_overload.clone(), string_overload]);
        let right = foo(vec![int_overload]);
        let comparer = SymbolComparer::new();
        let mapper = ApiMapper::new(&comparer, &PublicOnlyFilter);
        let tree = mapper.map(&left, &right);
        let ty = tree.find(&["Lib", "N", "N.Foo"]).unwrap();
        let matched = ty.child("M:M(System.Int32)->System.Void").unwrap();
        assert_eq!(matched.difference_type, DifferenceType::Unchanged);
        assert_eq!(matched.children.len(), 1);
        assert_eq!(ty.child("M:M(System.String)->System.Void").unwrap().difference_type, DifferenceType::Removed);
    }

    #[test]
    fn test_filtered_members_are_not_mapped() {
        let left = foo(vec![MemberSymbol::method("Hidden", "System.Void").with_visibility(Visibility::Private)]);
        let right = foo(vec![]);
        let comparer = SymbolComparer::new();
        let mapper = ApiMapper::new(&comparer, &PublicOnlyFilter);
        let tree = mapper.map(&left, &right);
        assert!(tree.find(&["Lib", "N", "N.Foo"]).unwrap().children.is_empty());
    }

    #[test]
    fn test_missing_assembly_is_one_sided() {
        let left = foo(vec![]);
        let right: Vec<AssemblySymbol> = Vec::new();
        let comparer = SymbolComparer::new();
        let mapper = ApiMapper::new(&comparer, &PublicOnlyFilter);
        let tree = mapper.map(&left, &right);
        let asm = tree.assembly("Lib").unwrap();
        assert_eq!(asm.difference_type, DifferenceType::Removed);
        assert_eq!(tree.find(&["Lib", "N", "N.Foo"]).unwrap().difference_type, DifferenceType::Removed);
    }

    #[test]
    fn test_nested_types_mapped_under_declaring_type() {
        let outer = TypeSymbol::class("N", "Outer").with_nested_type(TypeSymbol::class("N", "Outer+Inner"));
        let left = vec![AssemblySymbol::new("Lib").with_type(outer.clone())];
        let right = vec![AssemblySymbol::new("Lib").with_type(outer)];
        let comparer = SymbolComparer::new();
        let mapper = ApiMapper::new(&comparer, &PublicOnlyFilter);
        let tree = mapper.map(&left, &right);
        let inner = tree.find(&["Lib", "N", "N.Outer", "N.Outer+Inner"]).unwrap();
        assert!(matches!(inner.element, ElementPair::Type { declaring: Some(_), .. }));
    }

    #[test]
    fn test_renamed_generic_parameter_maps_unchanged() {
        let put = |name: &str| MemberSymbol::method("Put", "System.Void").with_parameter(ParameterSymbol::new("item", name));
        let left = vec![AssemblySymbol::new("Lib").with_type(TypeSymbol::class("N", "Box").with_generic_parameter("T").with_member(put("T")))];
        let right = vec![AssemblySymbol::new("Lib").with_type(TypeSymbol::class("N", "Box").with_generic_parameter("TItem").with_member(put("TItem")))];
        let comparer = SymbolComparer::new();
        let mapper = ApiMapper::new(&comparer, &PublicOnlyFilter);
        let tree = mapper.map(&left, &right);
        let ty = tree.find(&["Lib", "N", "N.Box`1"]).unwrap();
        assert_eq!(ty.children.len(), 1);
        let node = ty.child("M:Put(`0)->System.Void").unwrap();
        assert_eq!(node.difference_type, DifferenceType::Unchanged);
    }
}
