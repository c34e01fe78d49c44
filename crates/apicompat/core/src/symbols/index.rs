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

//! Name-based lookup over one side's assembly set

use super::{AssemblySymbol, TypeSymbol};
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Resolves type references (full names) to their definitions
///
/// Definitions are keyed by name and generic arity, so `N.List` and
/// `` N.List`1 `` are distinct. References may carry generic instantiations
/// (`N.List<System.Int32>`) or the arity suffix (`` N.List`1 ``).
#[derive(Debug, Default)]
pub struct TypeIndex<'a> {
    types: HashMap<String, (&'a AssemblySymbol, &'a TypeSymbol)>,
}

impl<'a> TypeIndex<'a> {
    pub fn build(assemblies: &'a [AssemblySymbol]) -> Self {
        let mut types = HashMap::new();
        for assembly in assemblies {
            for ty in assembly.all_types() {
                // first definition wins, the way a loader's unification does
                types.entry(definition_key(&ty.full_name(), ty.generic_arity())).or_insert((assembly, ty));
            }
        }
        debug!("Indexed {} types across {} assemblies", types.len(), assemblies.len());
        Self { types }
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn get(&self, reference: &str) -> Option<&'a TypeSymbol> {
        self.types.get(&reference_key(reference)).map(|(_, ty)| *ty)
    }

    pub fn assembly_of(&self, reference: &str) -> Option<&'a AssemblySymbol> {
        self.types.get(&reference_key(reference)).map(|(asm, _)| *asm)
    }

    /// Base type names from the direct base outwards
    ///
    /// The walk stops after the first base that cannot be resolved; its name
    /// is still part of the chain.
    pub fn base_chain(&self, ty: &TypeSymbol) -> Vec<String> {
        let mut chain = Vec::new();
        let mut seen = HashSet::new();
        let mut next = ty.base_type.clone();
        while let Some(name) = next {
            if !seen.insert(name.clone()) {
                break;
            }
            next = self.get(&name).and_then(|base| base.base_type.clone());
            chain.push(name);
        }
        chain
    }

    /// Resolved base type definitions from the direct base outwards
    pub fn base_types(&self, ty: &TypeSymbol) -> Vec<&'a TypeSymbol> {
        let mut bases = Vec::new();
        for name in self.base_chain(ty) {
            match self.get(&name) {
                Some(base) => bases.push(base),
                None => {
                    debug!("Base type {} of {} is not in the indexed set", name, ty.full_name());
                    break;
                }
            }
        }
        bases
    }

    /// Whether a referenced type is visible outside its assembly; types from
    /// outside the indexed set count as visible.
    pub fn is_visible_outside_assembly(&self, reference: &str) -> bool {
        self.get(reference).is_none_or(|ty| ty.visibility.is_visible_outside_assembly())
    }
}

fn definition_key(name: &str, arity: usize) -> String {
    if arity == 0 || name.contains('`') { name.to_string() } else { format!("{}`{}", name, arity) }
}

/// `N.List<System.Int32>` -> `` N.List`1 ``, `N.Map<K, N.List<V>>` -> `` N.Map`2 ``
pub fn reference_key(reference: &str) -> String {
    let Some(open) = reference.find('<') else {
        return reference.to_string();
    };
    let mut depth = 0usize;
    let mut arity = 1;
    for c in reference[open..].chars() {
        match c {
            '<' => depth += 1,
            '>' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    break;
                }
            }
            ',' if depth == 1 => arity += 1,
            _ => {}
        }
    }
    definition_key(&reference[..open], arity)
}
