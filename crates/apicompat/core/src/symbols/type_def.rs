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

//! Type definitions

use super::attribute::{AttributeSymbol, has_attribute};
use super::member::MemberSymbol;
use super::{GenericParameter, Visibility};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Classification of a type definition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TypeKind {
    #[default]
    Class,
    Struct,
    Interface,
    Enum,
    Delegate,
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            TypeKind::Class => "class",
            TypeKind::Struct => "struct",
            TypeKind::Interface => "interface",
            TypeKind::Enum => "enum",
            TypeKind::Delegate => "delegate",
        };
        f.write_str(text)
    }
}

/// A type definition
///
/// Nested types carry their declaring chain in `name`, joined by `+`
/// (`Outer+Inner`), and share the namespace of their outermost type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeSymbol {
    #[serde(default)]
    pub namespace: String,
    pub name: String,
    #[serde(default)]
    pub kind: TypeKind,
    #[serde(default)]
    pub visibility: Visibility,
    #[serde(default)]
    pub generic_parameters: Vec<GenericParameter>,
    #[serde(default)]
    pub is_abstract: bool,
    #[serde(default)]
    pub is_sealed: bool,
    /// Full name of the direct base type
    #[serde(default)]
    pub base_type: Option<String>,
    /// Full names of every implemented interface, inherited ones included
    #[serde(default)]
    pub interfaces: Vec<String>,
    #[serde(default)]
    pub enum_underlying_type: Option<String>,
    #[serde(default)]
    pub attributes: Vec<AttributeSymbol>,
    #[serde(default)]
    pub members: Vec<MemberSymbol>,
    #[serde(default)]
    pub nested_types: Vec<TypeSymbol>,
}

impl TypeSymbol {
    pub fn new(kind: TypeKind, namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
            kind,
            visibility: Visibility::Public,
            generic_parameters: Vec::new(),
            is_abstract: false,
            is_sealed: false,
            base_type: None,
            interfaces: Vec::new(),
            enum_underlying_type: None,
            attributes: Vec::new(),
            members: Vec::new(),
            nested_types: Vec::new(),
        }
    }

    pub fn class(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(TypeKind::Class, namespace, name).with_base_type("System.Object")
    }

    pub fn structure(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        let mut ty = Self::new(TypeKind::Struct, namespace, name).with_base_type("System.ValueType");
        ty.is_sealed = true;
        ty
    }

    pub fn interface(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        let mut ty = Self::new(TypeKind::Interface, namespace, name);
        ty.is_abstract = true;
        ty
    }

    pub fn enumeration(namespace: impl Into<String>, name: impl Into<String>, underlying: impl Into<String>) -> Self {
        let mut ty = Self::new(TypeKind::Enum, namespace, name).with_base_type("System.Enum");
        ty.is_sealed = true;
        ty.enum_underlying_type = Some(underlying.into());
        ty
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn with_base_type(mut self, base: impl Into<String>) -> Self {
        self.base_type = Some(base.into());
        self
    }

    pub fn with_interface(mut self, interface: impl Into<String>) -> Self {
        self.interfaces.push(interface.into());
        self
    }

    pub fn with_generic_parameter(mut self, name: impl Into<String>) -> Self {
        self.generic_parameters.push(GenericParameter::new(name));
        self
    }

    pub fn with_member(mut self, member: MemberSymbol) -> Self {
        self.members.push(member);
        self
    }

    pub fn with_nested_type(mut self, nested: TypeSymbol) -> Self {
        self.nested_types.push(nested);
        self
    }

    pub fn with_attribute(mut self, attribute: AttributeSymbol) -> Self {
        self.attributes.push(attribute);
        self
    }

    pub fn abstract_(mut self) -> Self {
        self.is_abstract = true;
        self
    }

    pub fn sealed(mut self) -> Self {
        self.is_sealed = true;
        self
    }

    /// `Namespace.Name`, or just `Name` in the global namespace
    pub fn full_name(&self) -> String {
        if self.namespace.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.namespace, self.name)
        }
    }

    pub fn generic_arity(&self) -> usize {
        self.generic_parameters.len()
    }

    pub fn is_nested(&self) -> bool {
        self.name.contains('+')
    }

    pub fn is_interface(&self) -> bool {
        self.kind == TypeKind::Interface
    }

    pub fn is_enum(&self) -> bool {
        self.kind == TypeKind::Enum
    }

    pub fn has_attribute(&self, type_name: &str) -> bool {
        has_attribute(&self.attributes, type_name)
    }

    /// Static classes are abstract and sealed at the metadata level
    pub fn is_static(&self) -> bool {
        self.is_abstract && self.is_sealed
    }

    /// Can a type outside the assembly derive from this one
    pub fn is_effectively_sealed(&self) -> bool {
        if self.is_sealed || self.kind != TypeKind::Class {
            return self.kind != TypeKind::Interface;
        }
        let has_visible_ctor = self
            .members
            .iter()
            .any(|m| m.is_constructor() && !m.is_static && m.visibility.is_visible_outside_assembly());
        let declares_ctor = self.members.iter().any(|m| m.is_constructor() && !m.is_static);
        declares_ctor && !has_visible_ctor
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbols::MemberSymbol;

    #[test]
    fn test_full_name() {
        assert_eq!(TypeSymbol::class("A.B", "C").full_name(), "A.B.C");
        assert_eq!(TypeSymbol::class("", "C").full_name(), "C");
        assert!(TypeSymbol::class("A", "C+D").is_nested());
    }

    #[test]
    fn test_effectively_sealed_without_visible_ctor() {
        let open = TypeSymbol::class("N", "Open").with_member(MemberSymbol::constructor());
        let closed = TypeSymbol::class("N", "Closed").with_member(MemberSymbol::constructor().with_visibility(Visibility::Assembly));
        assert!(!open.is_effectively_sealed());
        assert!(closed.is_effectively_sealed());
        assert!(TypeSymbol::structure("N", "S").is_effectively_sealed());
        assert!(!TypeSymbol::interface("N", "I").is_effectively_sealed());
    }
}
