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

//! Scope filters
//!
//! A filter decides which types and members take part in the comparison.
//! Exactly one visibility filter is selected from [`FilterSettings`]; the
//! compiler-generated exclusion can be layered on top through
//! [`IntersectionFilter`].

use crate::symbols::attribute::{COMPILER_GENERATED_ATTRIBUTE, TREAT_AS_PUBLIC_SURFACE_ATTRIBUTE};
use crate::symbols::{AssemblySymbol, AttributeSymbol, MemberSymbol, TypeSymbol};
use parking_lot::Mutex;
use std::collections::HashMap;
use tracing::warn;

/// Element handed to a filter, together with its declaring type
#[derive(Debug, Clone, Copy)]
pub enum Symbol<'a> {
    Type { declaring: Option<&'a TypeSymbol>, ty: &'a TypeSymbol },
    Member { declaring: &'a TypeSymbol, member: &'a MemberSymbol },
}

impl<'a> Symbol<'a> {
    pub fn attributes(&self) -> &'a [AttributeSymbol] {
        match self {
            Symbol::Type { ty, .. } => &ty.attributes,
            Symbol::Member { member, .. } => &member.attributes,
        }
    }

    pub fn declaring_type(&self) -> Option<&'a TypeSymbol> {
        match self {
            Symbol::Type { declaring, .. } => *declaring,
            Symbol::Member { declaring, .. } => Some(declaring),
        }
    }
}

pub trait SymbolFilter: Send + Sync {
    /// Whether `symbol`, declared in `owner`, is in scope
    fn include(&self, owner: &AssemblySymbol, symbol: Symbol<'_>) -> bool;

    fn name(&self) -> &'static str;
}

fn visible_outside_assembly(symbol: Symbol<'_>) -> bool {
    match symbol {
        Symbol::Type { ty, .. } => ty.visibility.is_visible_outside_assembly(),
        Symbol::Member { declaring, member } => declaring.is_interface() || member.visibility.is_visible_outside_assembly(),
    }
}

/// Types and members visible outside their assembly
#[derive(Debug, Default, Clone, Copy)]
pub struct PublicOnlyFilter;

impl SymbolFilter for PublicOnlyFilter {
    fn include(&self, _owner: &AssemblySymbol, symbol: Symbol<'_>) -> bool {
        visible_outside_assembly(symbol)
    }

    fn name(&self) -> &'static str {
        "public-only"
    }
}

/// Public surface plus internal elements of assemblies that declare friends
#[derive(Debug, Default, Clone, Copy)]
pub struct PublicAndInternalFilter;

impl SymbolFilter for PublicAndInternalFilter {
    fn include(&self, owner: &AssemblySymbol, symbol: Symbol<'_>) -> bool {
        if visible_outside_assembly(symbol) {
            return true;
        }
        if owner.internals_visible_to.is_empty() {
            return false;
        }
        match symbol {
            Symbol::Type { ty, .. } => ty.visibility.is_assembly_visible(),
            Symbol::Member { member, .. } => member.visibility.is_assembly_visible(),
        }
    }

    fn name(&self) -> &'static str {
        "public-and-internal"
    }
}

/// Public surface minus anything hidden with `[EditorBrowsable(Never)]`
///
/// Exclusion is inherited from declaring types. Type verdicts are memoized
/// because they require attribute inspection of the whole declaring chain.
#[derive(Debug, Default)]
pub struct EditorBrowsableFilter {
    hidden_types: Mutex<HashMap<String, bool>>,
}

impl EditorBrowsableFilter {
    pub fn new() -> Self {
        Self::default()
    }

    fn is_hidden(attributes: &[AttributeSymbol]) -> bool {
        attributes.iter().any(AttributeSymbol::is_editor_browsable_never)
    }

    /// Memoized: is `ty` itself marked never-browsable
    fn type_hidden(&self, owner: &AssemblySymbol, ty: &TypeSymbol) -> bool {
        let key = format!("{}|{}", owner.name, ty.full_name());
        if let Some(hidden) = self.hidden_types.lock().get(&key) {
            return *hidden;
        }
        let hidden = Self::is_hidden(&ty.attributes);
        self.hidden_types.lock().insert(key, hidden);
        hidden
    }

    /// A declaring type that was hidden already hides everything inside it.
    /// Declaring types are always visited before their contents, so the
    /// memo holds their verdict.
    fn ancestor_hidden(&self, owner: &AssemblySymbol, declaring: Option<&TypeSymbol>) -> bool {
        let Some(declaring) = declaring else {
            return false;
        };
        if self.type_hidden(owner, declaring) {
            return true;
        }
        // walk outer segments of a nested name
        let full = declaring.full_name();
        let memo = self.hidden_types.lock();
        let mut prefix = full.as_str();
        while let Some(pos) = prefix.rfind('+') {
            prefix = &prefix[..pos];
            if memo.get(&format!("{}|{}", owner.name, prefix)).copied().unwrap_or(false) {
                return true;
            }
        }
        false
    }
}

impl SymbolFilter for EditorBrowsableFilter {
    fn include(&self, owner: &AssemblySymbol, symbol: Symbol<'_>) -> bool {
        if !visible_outside_assembly(symbol) {
            return false;
        }
        if self.ancestor_hidden(owner, symbol.declaring_type()) {
            return false;
        }
        match symbol {
            Symbol::Type { ty, .. } => !self.type_hidden(owner, ty),
            Symbol::Member { member, .. } => !Self::is_hidden(&member.attributes),
        }
    }

    fn name(&self) -> &'static str {
        "public-editor-browsable"
    }
}

/// Public surface plus elements explicitly marked as public surface
#[derive(Debug, Default, Clone, Copy)]
pub struct MdilPublicSurfaceFilter;

impl SymbolFilter for MdilPublicSurfaceFilter {
    fn include(&self, _owner: &AssemblySymbol, symbol: Symbol<'_>) -> bool {
        visible_outside_assembly(symbol)
            || symbol
                .attributes()
                .iter()
                .any(|a| a.simple_name() == TREAT_AS_PUBLIC_SURFACE_ATTRIBUTE)
    }

    fn name(&self) -> &'static str {
        "mdil-public-surface"
    }
}

/// Drops elements carrying `[CompilerGenerated]`
#[derive(Debug, Default, Clone, Copy)]
pub struct CompilerGeneratedFilter;

impl SymbolFilter for CompilerGeneratedFilter {
    fn include(&self, _owner: &AssemblySymbol, symbol: Symbol<'_>) -> bool {
        !symbol.attributes().iter().any(|a| a.is(COMPILER_GENERATED_ATTRIBUTE))
    }

    fn name(&self) -> &'static str {
        "exclude-compiler-generated"
    }
}

/// Includes a symbol only when every inner filter does
pub struct IntersectionFilter {
    filters: Vec<Box<dyn SymbolFilter>>,
}

impl IntersectionFilter {
    pub fn new(filters: Vec<Box<dyn SymbolFilter>>) -> Self {
        Self { filters }
    }

    pub fn filter_names(&self) -> Vec<&'static str> {
        self.filters.iter().map(|f| f.name()).collect()
    }
}

impl SymbolFilter for IntersectionFilter {
    fn include(&self, owner: &AssemblySymbol, symbol: Symbol<'_>) -> bool {
        self.filters.iter().all(|f| f.include(owner, symbol))
    }

    fn name(&self) -> &'static str {
        "intersection"
    }
}

/// Visibility filter selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterMode {
    PublicOnly,
    PublicAndInternal,
    PublicEditorBrowsableOnly,
    MdilPublicSurface,
}

/// Filter flags as they arrive from configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSettings {
    pub include_internals: bool,
    pub exclude_non_browsable: bool,
    pub mdil: bool,
    pub exclude_compiler_generated: bool,
}

impl FilterSettings {
    /// Resolve the flags to one mode: MDIL > exclude-non-browsable >
    /// include-internals > public-only
    pub fn mode(&self) -> FilterMode {
        let requested = [self.mdil, self.exclude_non_browsable, self.include_internals]
            .iter()
            .filter(|flag| **flag)
            .count();
        let mode = if self.mdil {
            FilterMode::MdilPublicSurface
        } else if self.exclude_non_browsable {
            FilterMode::PublicEditorBrowsableOnly
        } else if self.include_internals {
            FilterMode::PublicAndInternal
        } else {
            FilterMode::PublicOnly
        };
        if requested > 1 {
            warn!("Filter options mdil/exclude-non-browsable/include-internals are mutually exclusive; using {:?}", mode);
        }
        mode
    }

    pub fn build(&self) -> Box<dyn SymbolFilter> {
        let primary: Box<dyn SymbolFilter> = match self.mode() {
            FilterMode::PublicOnly => Box::new(PublicOnlyFilter),
            FilterMode::PublicAndInternal => Box::new(PublicAndInternalFilter),
            FilterMode::PublicEditorBrowsableOnly => Box::new(EditorBrowsableFilter::new()),
            FilterMode::MdilPublicSurface => Box::new(MdilPublicSurfaceFilter),
        };
        if self.exclude_compiler_generated {
            Box::new(IntersectionFilter::new(vec![primary, Box::new(CompilerGeneratedFilter)]))
        } else {
            primary
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbols::Visibility;
    use crate::symbols::attribute::EDITOR_BROWSABLE_ATTRIBUTE;

    fn never() -> AttributeSymbol {
        AttributeSymbol::new(EDITOR_BROWSABLE_ATTRIBUTE).with_argument("EditorBrowsableState.Never")
    }

    #[test]
    fn test_public_only() {
        let owner = AssemblySymbol::new("Lib");
        let ty = TypeSymbol::class("N", "T");
        let internal = MemberSymbol::method("M", "System.Void").with_visibility(Visibility::Assembly);
        let protected = MemberSymbol::method("P", "System.Void").with_visibility(Visibility::Family);
        let filter = PublicOnlyFilter;
        assert!(filter.include(&owner, Symbol::Type { declaring: None, ty: &ty }));
        assert!(!filter.include(&owner, Symbol::Member { declaring: &ty, member: &internal }));
        assert!(filter.include(&owner, Symbol::Member { declaring: &ty, member: &protected }));
    }

    #[test]
    fn test_public_and_internal_requires_friends() {
        let ty = TypeSymbol::class("N", "T");
        let internal = MemberSymbol::method("M", "System.Void").with_visibility(Visibility::Assembly);
        let private = MemberSymbol::method("X", "System.Void").with_visibility(Visibility::Private);
        let filter = PublicAndInternalFilter;
        let plain = AssemblySymbol::new("Lib");
        let friendly = AssemblySymbol::new("Lib").with_internals_visible_to("Lib.Tests");
        assert!(!filter.include(&plain, Symbol::Member { declaring: &ty, member: &internal }));
        assert!(filter.include(&friendly, Symbol::Member { declaring: &ty, member: &internal }));
        assert!(!filter.include(&friendly, Symbol::Member { declaring: &ty, member: &private }));
    }

    #[test]
    fn test_editor_browsable_hides_type_and_contents() {
        let owner = AssemblySymbol::new("Lib");
        let hidden = TypeSymbol::class("N", "Hidden").with_attribute(never());
        let nested = TypeSymbol::class("N", "Hidden+Inner");
        let member = MemberSymbol::method("M", "System.Void");
        let filter = EditorBrowsableFilter::new();
        assert!(!filter.include(&owner, Symbol::Type { declaring: None, ty: &hidden }));
        assert!(!filter.include(&owner, Symbol::Type { declaring: Some(&hidden), ty: &nested }));
        assert!(!filter.include(&owner, Symbol::Member { declaring: &hidden, member: &member }));
        let visible = TypeSymbol::class("N", "Shown");
        let hidden_member = MemberSymbol::method("H", "System.Void").with_attribute(never());
        assert!(filter.include(&owner, Symbol::Member { declaring: &visible, member: &member }));
        assert!(!filter.include(&owner, Symbol::Member { declaring: &visible, member: &hidden_member }));
    }

    #[test]
    fn test_mdil_includes_marked_internal_members() {
        let owner = AssemblySymbol::new("Lib");
        let ty = TypeSymbol::class("N", "T");
        let marked = MemberSymbol::method("M", "System.Void")
            .with_visibility(Visibility::Assembly)
            .with_attribute(AttributeSymbol::new("System.Runtime.CompilerServices.TreatAsPublicSurfaceAttribute"));
        assert!(MdilPublicSurfaceFilter.include(&owner, Symbol::Member { declaring: &ty, member: &marked }));
        assert!(!PublicOnlyFilter.include(&owner, Symbol::Member { declaring: &ty, member: &marked }));
    }

    #[test]
    fn test_mode_priority() {
        let all = FilterSettings { include_internals: true, exclude_non_browsable: true, mdil: true, exclude_compiler_generated: false };
        assert_eq!(all.mode(), FilterMode::MdilPublicSurface);
        let two = FilterSettings { include_internals: true, exclude_non_browsable: true, ..Default::default() };
        assert_eq!(two.mode(), FilterMode::PublicEditorBrowsableOnly);
        assert_eq!(FilterSettings::default().mode(), FilterMode::PublicOnly);
    }

    #[test]
    fn test_compiler_generated_composes() {
        let owner = AssemblySymbol::new("Lib");
        let ty = TypeSymbol::class("N", "T");
        let generated = MemberSymbol::method("<M>b__0", "System.Void").with_attribute(AttributeSymbol::new(COMPILER_GENERATED_ATTRIBUTE));
        let settings = FilterSettings { exclude_compiler_generated: true, ..Default::default() };
        let filter = settings.build();
        assert!(!filter.include(&owner, Symbol::Member { declaring: &ty, member: &generated }));
        assert!(filter.include(&owner, Symbol::Type { declaring: None, ty: &ty }));
    }
}
