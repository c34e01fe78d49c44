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

//! Custom attribute symbols

use serde::{Deserialize, Serialize};

pub const OBSOLETE_ATTRIBUTE: &str = "System.ObsoleteAttribute";
pub const EDITOR_BROWSABLE_ATTRIBUTE: &str = "System.ComponentModel.EditorBrowsableAttribute";
pub const COMPILER_GENERATED_ATTRIBUTE: &str = "System.Runtime.CompilerServices.CompilerGeneratedAttribute";
/// Simple name of the marker that pulls an element into the MDIL public surface
pub const TREAT_AS_PUBLIC_SURFACE_ATTRIBUTE: &str = "TreatAsPublicSurfaceAttribute";

/// A custom attribute applied to an assembly, type, member or parameter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeSymbol {
    /// Full name of the attribute type
    pub type_name: String,
    /// Constructor and named arguments, already rendered as text
    #[serde(default)]
    pub arguments: Vec<String>,
}

impl AttributeSymbol {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self { type_name: type_name.into(), arguments: Vec::new() }
    }

    pub fn with_argument(mut self, argument: impl Into<String>) -> Self {
        self.arguments.push(argument.into());
        self
    }

    /// DocId of the attribute type, e.g. `T:System.FlagsAttribute`
    pub fn doc_id(&self) -> String {
        format!("T:{}", self.type_name)
    }

    /// Canonical text used to pair and compare attributes
    pub fn key(&self) -> String {
        if self.arguments.is_empty() {
            self.type_name.clone()
        } else {
            format!("{}({})", self.type_name, self.arguments.join(", "))
        }
    }

    /// Type name without namespace
    pub fn simple_name(&self) -> &str {
        self.type_name.rsplit('.').next().unwrap_or(&self.type_name)
    }

    pub fn is(&self, type_name: &str) -> bool {
        self.type_name == type_name
    }

    /// `[EditorBrowsable(EditorBrowsableState.Never)]`, in either its symbolic
    /// or numeric form
    pub fn is_editor_browsable_never(&self) -> bool {
        self.is(EDITOR_BROWSABLE_ATTRIBUTE)
            && self.arguments.iter().any(|arg| {
                let arg = arg.trim();
                arg == "1" || arg.ends_with("Never")
            })
    }
}

pub(crate) fn has_attribute(attributes: &[AttributeSymbol], type_name: &str) -> bool {
    attributes.iter().any(|a| a.is(type_name))
}
