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

//! Mapping tree
//!
//! The mapper walks the contract (left) and implementation (right) trees in
//! lock-step and produces one [`MappingNode`] per logical API position. A node
//! with both sides present is a matched pair; a node with one side present is
//! an addition or a removal.

pub mod mapper;
pub mod order;

pub use mapper::ApiMapper;

use crate::comparer::ComparisonKey;
use crate::diff::{Difference, DifferenceType};
use crate::symbols::{AssemblySymbol, MemberSymbol, ParameterSymbol, TypeSymbol};

/// Left (contract) and right (implementation) slots of one position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pair<T> {
    pub left: Option<T>,
    pub right: Option<T>,
}

impl<T: Copy> Pair<T> {
    pub fn new(left: Option<T>, right: Option<T>) -> Self {
        Self { left, right }
    }

    pub fn both(&self) -> Option<(T, T)> {
        match (self.left, self.right) {
            (Some(l), Some(r)) => Some((l, r)),
            _ => None,
        }
    }

    pub fn left_only(&self) -> Option<T> {
        match (self.left, self.right) {
            (Some(l), None) => Some(l),
            _ => None,
        }
    }

    pub fn right_only(&self) -> Option<T> {
        match (self.left, self.right) {
            (None, Some(r)) => Some(r),
            _ => None,
        }
    }

    /// Left side if present, otherwise right
    pub fn representative(&self) -> Option<T> {
        self.left.or(self.right)
    }

    pub fn initial_difference(&self) -> DifferenceType {
        match (self.left.is_some(), self.right.is_some()) {
            (true, true) => DifferenceType::Unchanged,
            (true, false) => DifferenceType::Removed,
            (false, true) => DifferenceType::Added,
            (false, false) => DifferenceType::Unknown,
        }
    }
}

/// Tagged element pair a rule is dispatched on
#[derive(Debug, Clone, Copy)]
pub enum ElementPair<'a> {
    Assembly(Pair<&'a AssemblySymbol>),
    Namespace {
        assemblies: Pair<&'a AssemblySymbol>,
        namespaces: Pair<&'a str>,
    },
    Type {
        assemblies: Pair<&'a AssemblySymbol>,
        /// `None` for top-level types
        declaring: Option<Pair<&'a TypeSymbol>>,
        types: Pair<&'a TypeSymbol>,
    },
    Member {
        declaring: Pair<&'a TypeSymbol>,
        members: Pair<&'a MemberSymbol>,
    },
    Parameter {
        declaring: Pair<&'a TypeSymbol>,
        members: Pair<&'a MemberSymbol>,
        position: usize,
        parameters: Pair<&'a ParameterSymbol>,
    },
}

impl ElementPair<'_> {
    pub fn kind_name(&self) -> &'static str {
        match self {
            ElementPair::Assembly(_) => "assembly",
            ElementPair::Namespace { .. } => "namespace",
            ElementPair::Type { .. } => "type",
            ElementPair::Member { .. } => "member",
            ElementPair::Parameter { .. } => "parameter",
        }
    }

    pub fn initial_difference(&self) -> DifferenceType {
        match self {
            ElementPair::Assembly(pair) => pair.initial_difference(),
            ElementPair::Namespace { namespaces, .. } => namespaces.initial_difference(),
            ElementPair::Type { types, .. } => types.initial_difference(),
            ElementPair::Member { members, .. } => members.initial_difference(),
            ElementPair::Parameter { parameters, .. } => parameters.initial_difference(),
        }
    }

    pub fn has_left(&self) -> bool {
        match self {
            ElementPair::Assembly(pair) => pair.left.is_some(),
            ElementPair::Namespace { namespaces, .. } => namespaces.left.is_some(),
            ElementPair::Type { types, .. } => types.left.is_some(),
            ElementPair::Member { members, .. } => members.left.is_some(),
            ElementPair::Parameter { parameters, .. } => parameters.left.is_some(),
        }
    }

    pub fn has_right(&self) -> bool {
        match self {
            ElementPair::Assembly(pair) => pair.right.is_some(),
            ElementPair::Namespace { namespaces, .. } => namespaces.right.is_some(),
            ElementPair::Type { types, .. } => types.right.is_some(),
            ElementPair::Member { members, .. } => members.right.is_some(),
            ElementPair::Parameter { parameters, .. } => parameters.right.is_some(),
        }
    }
}

/// One logical position in the compared hierarchy
#[derive(Debug, Clone)]
pub struct MappingNode<'a> {
    pub key: ComparisonKey,
    pub element: ElementPair<'a>,
    pub difference_type: DifferenceType,
    /// Filled in by the difference writer
    pub differences: Vec<Difference>,
    pub children: Vec<MappingNode<'a>>,
}

impl<'a> MappingNode<'a> {
    pub fn new(key: ComparisonKey, element: ElementPair<'a>) -> Self {
        Self {
            key,
            difference_type: element.initial_difference(),
            element,
            differences: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn with_children(mut self, children: Vec<MappingNode<'a>>) -> Self {
        self.children = children;
        self
    }

    pub fn child(&self, key: &str) -> Option<&MappingNode<'a>> {
        self.children.iter().find(|c| c.key == key)
    }

    /// Pre-order list of this node and all of its descendants
    pub fn descendants(&self) -> Vec<&MappingNode<'a>> {
        let mut out = Vec::new();
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            out.push(node);
            stack.extend(node.children.iter().rev());
        }
        out
    }
}

/// Result of a mapping run: one node per assembly identity
#[derive(Debug, Clone, Default)]
pub struct MappingTree<'a> {
    pub assemblies: Vec<MappingNode<'a>>,
}

impl<'a> MappingTree<'a> {
    pub fn assembly(&self, name: &str) -> Option<&MappingNode<'a>> {
        self.assemblies.iter().find(|a| a.key == name)
    }

    pub fn nodes(&self) -> Vec<&MappingNode<'a>> {
        self.assemblies.iter().flat_map(|a| a.descendants()).collect()
    }

    /// Follow a path of keys from the assembly level down
    pub fn find(&self, path: &[&str]) -> Option<&MappingNode<'a>> {
        let (first, rest) = path.split_first()?;
        let mut node = self.assembly(first)?;
        for key in rest {
            node = node.child(key)?;
        }
        Some(node)
    }
}
