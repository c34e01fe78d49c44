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

//! Resolved symbol model
//!
//! The comparison engine never reads assembly binaries. A loader hands it two
//! already-resolved symbol trees (contract and implementation) built from the
//! types in this module:
//!
//! - [`AssemblySymbol`] owns its top-level [`TypeSymbol`]s
//! - [`TypeSymbol`] owns its [`MemberSymbol`]s and nested types
//! - [`MemberSymbol`] owns its [`ParameterSymbol`]s
//!
//! Every node carries its custom [`AttributeSymbol`]s. Trees are immutable
//! once handed to the engine. All types derive serde so that loaders written
//! in other tools can exchange trees as JSON documents.

pub mod attribute;
pub mod index;
pub mod member;
pub mod type_def;

pub use attribute::AttributeSymbol;
pub use index::TypeIndex;
pub use member::{MemberKind, MemberSymbol, ParameterModifier, ParameterSymbol, ReturnRef};
pub use type_def::{TypeKind, TypeSymbol};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Declared accessibility of a type or member
///
/// Variants are declared from most to least restrictive. `Family` and
/// `FamilyOrAssembly` share a rank, see [`Visibility::rank`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    Private,
    Assembly,
    FamilyAndAssembly,
    Family,
    FamilyOrAssembly,
    #[default]
    Public,
}

impl Visibility {
    /// Position on the visibility ordering
    /// `Private < Assembly < FamilyAndAssembly < Family ~ FamilyOrAssembly < Public`
    pub fn rank(self) -> u8 {
        match self {
            Visibility::Private => 0,
            Visibility::Assembly => 1,
            Visibility::FamilyAndAssembly => 2,
            Visibility::Family | Visibility::FamilyOrAssembly => 3,
            Visibility::Public => 4,
        }
    }

    /// Whether code outside the declaring assembly can reach the element
    pub fn is_visible_outside_assembly(self) -> bool {
        matches!(self, Visibility::Public | Visibility::Family | Visibility::FamilyOrAssembly)
    }

    /// Whether the element is only reachable through `internals visible to`
    pub fn is_assembly_visible(self) -> bool {
        matches!(self, Visibility::Assembly | Visibility::FamilyAndAssembly)
    }

    /// C#-style keyword used in difference messages
    pub fn keyword(self) -> &'static str {
        match self {
            Visibility::Private => "private",
            Visibility::Assembly => "internal",
            Visibility::FamilyAndAssembly => "private protected",
            Visibility::Family => "protected",
            Visibility::FamilyOrAssembly => "protected internal",
            Visibility::Public => "public",
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Generic parameter declared on a type or method
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenericParameter {
    pub name: String,
    #[serde(default)]
    pub constraints: Vec<String>,
}

impl GenericParameter {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), constraints: Vec::new() }
    }
}

/// Root of one side's symbol tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssemblySymbol {
    pub name: String,
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default)]
    pub culture: String,
    #[serde(default)]
    pub public_key_token: String,
    #[serde(default)]
    pub attributes: Vec<AttributeSymbol>,
    /// Friend assemblies granted access to internal members
    #[serde(default)]
    pub internals_visible_to: Vec<String>,
    #[serde(default)]
    pub types: Vec<TypeSymbol>,
}

fn default_version() -> String {
    "0.0.0.0".to_string()
}

impl AssemblySymbol {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: default_version(),
            culture: String::new(),
            public_key_token: String::new(),
            attributes: Vec::new(),
            internals_visible_to: Vec::new(),
            types: Vec::new(),
        }
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn with_public_key_token(mut self, token: impl Into<String>) -> Self {
        self.public_key_token = token.into();
        self
    }

    pub fn with_type(mut self, ty: TypeSymbol) -> Self {
        self.types.push(ty);
        self
    }

    pub fn with_attribute(mut self, attribute: AttributeSymbol) -> Self {
        self.attributes.push(attribute);
        self
    }

    pub fn with_internals_visible_to(mut self, friend: impl Into<String>) -> Self {
        self.internals_visible_to.push(friend.into());
        self
    }

    /// Parse the dotted version into numeric parts; missing or non-numeric
    /// components count as zero.
    pub fn version_parts(&self) -> [u32; 4] {
        let mut parts = [0u32; 4];
        for (slot, piece) in parts.iter_mut().zip(self.version.split('.')) {
            *slot = piece.trim().parse().unwrap_or(0);
        }
        parts
    }

    /// Depth-first iterator over every type, nested types included
    pub fn all_types(&self) -> Vec<&TypeSymbol> {
        let mut out = Vec::new();
        let mut stack: Vec<&TypeSymbol> = self.types.iter().rev().collect();
        while let Some(ty) = stack.pop() {
            out.push(ty);
            stack.extend(ty.nested_types.iter().rev());
        }
        out
    }
}
