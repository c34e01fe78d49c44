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

//! Comparison keys
//!
//! Two symbols from opposite trees denote the same API element exactly when
//! their keys are equal. Keys are pure functions of a symbol's identity
//! (namespace, name, generic arity and, for members, the normalized
//! signature) after the optional [`RemapTable`] has been applied.

pub mod remap;

pub use remap::{RemapEntry, RemapTable};

use crate::symbols::{AssemblySymbol, AttributeSymbol, GenericParameter, MemberSymbol, TypeSymbol};

/// A key produced by [`SymbolComparer`]; also the stable sort/group key
pub type ComparisonKey = String;

#[derive(Debug, Clone, Default)]
pub struct SymbolComparer {
    remap: RemapTable,
}

impl SymbolComparer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_remap(remap: RemapTable) -> Self {
        Self { remap }
    }

    pub fn remap_table(&self) -> &RemapTable {
        &self.remap
    }

    pub fn assembly_key(&self, assembly: &AssemblySymbol) -> ComparisonKey {
        assembly.name.clone()
    }

    pub fn namespace_key(&self, namespace: &str) -> ComparisonKey {
        self.remap.apply(namespace)
    }

    /// `Namespace.Outer+Inner` with a `` `N `` suffix for generic types
    pub fn type_key(&self, ty: &TypeSymbol) -> ComparisonKey {
        let mut key = self.remap.apply(&ty.full_name());
        if ty.generic_arity() > 0 {
            key.push('`');
            key.push_str(&ty.generic_arity().to_string());
        }
        key
    }

    /// Key for a type referenced by name (base types, interfaces, signatures)
    pub fn type_reference_key(&self, reference: &str) -> ComparisonKey {
        self.remap.apply(reference)
    }

    /// `K:Name[``N]([T1,T2])->Return`
    ///
    /// Generic parameters in parameter and return types are positional:
    /// `` `i `` for the declaring type's, ` ``i ` for the member's own, so
    /// renaming a generic parameter keeps the key.
    pub fn member_key(&self, declaring: &TypeSymbol, member: &MemberSymbol) -> ComparisonKey {
        let mut key = String::new();
        key.push(member.kind.key_prefix());
        key.push(':');
        if let Some(interface) = &member.explicit_interface {
            key.push_str(&self.remap.apply(interface));
            key.push('.');
        }
        key.push_str(&member.name);
        if member.generic_arity() > 0 {
            key.push_str("``");
            key.push_str(&member.generic_arity().to_string());
        }
        if !member.parameters.is_empty() || matches!(member.kind.key_prefix(), 'M') {
            key.push('(');
            key.push_str(&self.parameter_list_key(declaring, member));
            key.push(')');
        }
        key.push_str("->");
        key.push_str(&self.signature_type_key(declaring, member, &member.return_type));
        key
    }

    /// Member key without the return type, used to find candidates whose
    /// only difference is the return type
    pub fn member_key_without_return(&self, declaring: &TypeSymbol, member: &MemberSymbol) -> ComparisonKey {
        let key = self.member_key(declaring, member);
        match key.rfind("->") {
            Some(pos) => key[..pos].to_string(),
            None => key,
        }
    }

    pub fn parameter_list_key(&self, declaring: &TypeSymbol, member: &MemberSymbol) -> String {
        member
            .parameters
            .iter()
            .map(|p| self.signature_type_key(declaring, member, &p.signature_type()))
            .collect::<Vec<_>>()
            .join(",")
    }

    fn signature_type_key(&self, declaring: &TypeSymbol, member: &MemberSymbol, type_name: &str) -> String {
        self.remap.apply(&positional_generics(type_name, &declaring.generic_parameters, &member.generic_parameters))
    }

    pub fn attribute_key(&self, attribute: &AttributeSymbol) -> ComparisonKey {
        self.remap.apply(&attribute.key())
    }

    pub fn types_equal(&self, left: &TypeSymbol, right: &TypeSymbol) -> bool {
        self.type_key(left) == self.type_key(right)
    }

    pub fn type_references_equal(&self, left: &str, right: &str) -> bool {
        self.type_reference_key(left) == self.type_reference_key(right)
    }

    /// Same name, generic arity and parameter types; return type ignored
    pub fn signatures_match(&self, left: (&TypeSymbol, &MemberSymbol), right: (&TypeSymbol, &MemberSymbol)) -> bool {
        left.1.kind.key_prefix() == right.1.kind.key_prefix()
            && self.member_key_without_return(left.0, left.1) == self.member_key_without_return(right.0, right.1)
    }
}

fn is_identifier_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Replace unqualified generic parameter names in `type_name` by their
/// DocId position. Method parameters shadow type parameters.
fn positional_generics(type_name: &str, type_params: &[GenericParameter], method_params: &[GenericParameter]) -> String {
    if type_params.is_empty() && method_params.is_empty() {
        return type_name.to_string();
    }
    let mut out = String::with_capacity(type_name.len());
    let mut rest = type_name;
    while let Some(start) = rest.find(is_identifier_char) {
        let (before, tail) = rest.split_at(start);
        out.push_str(before);
        let len = tail.find(|c: char| !is_identifier_char(c)).unwrap_or(tail.len());
        let (token, after) = tail.split_at(len);
        // `N.T` or `Outer+T` names a type, not a parameter
        let qualified = out.ends_with(|c: char| matches!(c, '.' | '+' | '`'));
        let position = if qualified {
            None
        } else if let Some(i) = method_params.iter().position(|g| g.name == token) {
            Some(format!("``{}", i))
        } else {
            type_params.iter().position(|g| g.name == token).map(|i| format!("`{}", i))
        };
        out.push_str(position.as_deref().unwrap_or(token));
        rest = after;
    }
    out.push_str(rest);
    out
}
