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

//! Member and parameter definitions

use super::attribute::{AttributeSymbol, has_attribute};
use super::{GenericParameter, Visibility};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const CONSTRUCTOR_NAME: &str = ".ctor";
pub const STATIC_CONSTRUCTOR_NAME: &str = ".cctor";
pub const VOID: &str = "System.Void";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MemberKind {
    #[default]
    Method,
    Constructor,
    Property,
    Field,
    Event,
}

impl MemberKind {
    /// DocId-style prefix used in comparison keys
    pub fn key_prefix(self) -> char {
        match self {
            MemberKind::Method | MemberKind::Constructor => 'M',
            MemberKind::Property => 'P',
            MemberKind::Field => 'F',
            MemberKind::Event => 'E',
        }
    }
}

impl fmt::Display for MemberKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            MemberKind::Method => "method",
            MemberKind::Constructor => "constructor",
            MemberKind::Property => "property",
            MemberKind::Field => "field",
            MemberKind::Event => "event",
        };
        f.write_str(text)
    }
}

/// How a method returns its value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ReturnRef {
    #[default]
    None,
    Ref,
    RefReadonly,
}

impl fmt::Display for ReturnRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            ReturnRef::None => "by value",
            ReturnRef::Ref => "ref",
            ReturnRef::RefReadonly => "ref readonly",
        };
        f.write_str(text)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ParameterModifier {
    #[default]
    None,
    Ref,
    Out,
    In,
}

impl ParameterModifier {
    /// All by-reference modifiers share one metadata signature (`T&`)
    pub fn is_by_ref(self) -> bool {
        !matches!(self, ParameterModifier::None)
    }
}

impl fmt::Display for ParameterModifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            ParameterModifier::None => "by value",
            ParameterModifier::Ref => "ref",
            ParameterModifier::Out => "out",
            ParameterModifier::In => "in",
        };
        f.write_str(text)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterSymbol {
    pub name: String,
    pub type_name: String,
    #[serde(default)]
    pub modifier: ParameterModifier,
    #[serde(default)]
    pub attributes: Vec<AttributeSymbol>,
}

impl ParameterSymbol {
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            modifier: ParameterModifier::None,
            attributes: Vec::new(),
        }
    }

    pub fn with_modifier(mut self, modifier: ParameterModifier) -> Self {
        self.modifier = modifier;
        self
    }

    pub fn with_attribute(mut self, attribute: AttributeSymbol) -> Self {
        self.attributes.push(attribute);
        self
    }

    /// Signature form of the parameter type
    pub fn signature_type(&self) -> String {
        if self.modifier.is_by_ref() {
            format!("{}&", self.type_name)
        } else {
            self.type_name.clone()
        }
    }
}

/// A method, constructor, property, field or event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberSymbol {
    pub name: String,
    #[serde(default)]
    pub kind: MemberKind,
    #[serde(default)]
    pub visibility: Visibility,
    /// Return type for methods, value type for properties, fields and events
    #[serde(default = "default_return_type")]
    pub return_type: String,
    #[serde(default)]
    pub return_ref: ReturnRef,
    #[serde(default)]
    pub parameters: Vec<ParameterSymbol>,
    #[serde(default)]
    pub generic_parameters: Vec<GenericParameter>,
    #[serde(default)]
    pub is_abstract: bool,
    #[serde(default)]
    pub is_virtual: bool,
    /// `sealed override`, or a non-overridable interface implementation
    #[serde(default)]
    pub is_final: bool,
    #[serde(default)]
    pub is_static: bool,
    /// Interface whose member this explicitly implements
    #[serde(default)]
    pub explicit_interface: Option<String>,
    /// Literal value of constant fields (enum values included)
    #[serde(default)]
    pub constant_value: Option<String>,
    #[serde(default)]
    pub attributes: Vec<AttributeSymbol>,
}

fn default_return_type() -> String {
    VOID.to_string()
}

impl MemberSymbol {
    pub fn new(kind: MemberKind, name: impl Into<String>, return_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind,
            visibility: Visibility::Public,
            return_type: return_type.into(),
            return_ref: ReturnRef::None,
            parameters: Vec::new(),
            generic_parameters: Vec::new(),
            is_abstract: false,
            is_virtual: false,
            is_final: false,
            is_static: false,
            explicit_interface: None,
            constant_value: None,
            attributes: Vec::new(),
        }
    }

    pub fn method(name: impl Into<String>, return_type: impl Into<String>) -> Self {
        Self::new(MemberKind::Method, name, return_type)
    }

    pub fn constructor() -> Self {
        Self::new(MemberKind::Constructor, CONSTRUCTOR_NAME, VOID)
    }

    pub fn property(name: impl Into<String>, property_type: impl Into<String>) -> Self {
        Self::new(MemberKind::Property, name, property_type)
    }

    pub fn field(name: impl Into<String>, field_type: impl Into<String>) -> Self {
        Self::new(MemberKind::Field, name, field_type)
    }

    pub fn event(name: impl Into<String>, handler_type: impl Into<String>) -> Self {
        Self::new(MemberKind::Event, name, handler_type)
    }

    /// Enum value: a public static literal field of the enum type
    pub fn enum_value(enum_type: impl Into<String>, name: impl Into<String>, value: impl Into<String>) -> Self {
        let mut field = Self::field(name, enum_type);
        field.is_static = true;
        field.constant_value = Some(value.into());
        field
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn with_parameter(mut self, parameter: ParameterSymbol) -> Self {
        self.parameters.push(parameter);
        self
    }

    pub fn with_generic_parameter(mut self, name: impl Into<String>) -> Self {
        self.generic_parameters.push(GenericParameter::new(name));
        self
    }

    pub fn with_attribute(mut self, attribute: AttributeSymbol) -> Self {
        self.attributes.push(attribute);
        self
    }

    pub fn with_return_ref(mut self, return_ref: ReturnRef) -> Self {
        self.return_ref = return_ref;
        self
    }

    pub fn with_explicit_interface(mut self, interface: impl Into<String>) -> Self {
        self.explicit_interface = Some(interface.into());
        self
    }

    pub fn abstract_(mut self) -> Self {
        self.is_abstract = true;
        self.is_virtual = true;
        self
    }

    pub fn virtual_(mut self) -> Self {
        self.is_virtual = true;
        self
    }

    pub fn final_(mut self) -> Self {
        self.is_final = true;
        self
    }

    pub fn static_(mut self) -> Self {
        self.is_static = true;
        self
    }

    pub fn is_constructor(&self) -> bool {
        self.kind == MemberKind::Constructor || self.name == CONSTRUCTOR_NAME || self.name == STATIC_CONSTRUCTOR_NAME
    }

    pub fn generic_arity(&self) -> usize {
        self.generic_parameters.len()
    }

    /// Overridable in a derived type: virtual and not sealed
    pub fn is_overridable(&self) -> bool {
        self.is_virtual && !self.is_final
    }

    pub fn is_explicit_interface_implementation(&self) -> bool {
        self.explicit_interface.is_some()
    }

    pub fn has_attribute(&self, type_name: &str) -> bool {
        has_attribute(&self.attributes, type_name)
    }

    /// `Name(T1, T2)` for methods and indexers, plain `Name` otherwise
    pub fn display_signature(&self) -> String {
        let mut out = self.name.clone();
        if self.generic_arity() > 0 {
            let names: Vec<&str> = self.generic_parameters.iter().map(|g| g.name.as_str()).collect();
            out.push('<');
            out.push_str(&names.join(", "));
            out.push('>');
        }
        if matches!(self.kind, MemberKind::Method | MemberKind::Constructor) || !self.parameters.is_empty() {
            let params: Vec<String> = self
                .parameters
                .iter()
                .map(|p| match p.modifier {
                    ParameterModifier::None => p.type_name.clone(),
                    modifier => format!("{} {}", modifier, p.type_name),
                })
                .collect();
            out.push('(');
            out.push_str(&params.join(", "));
            out.push(')');
        }
        out
    }
}
