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

//! Shared, read-only state threaded into every rule call

use crate::comparer::SymbolComparer;
use crate::config::{AttributeExclusions, DEFAULT_CONTRACT_NAME, DEFAULT_IMPLEMENTATION_NAME, RuleSettings};
use crate::symbols::{AssemblySymbol, MemberSymbol, ParameterSymbol, TypeIndex, TypeSymbol};

pub struct RuleContext<'a> {
    /// Display name of the left operand in messages
    pub contract: String,
    /// Display name of the right operand in messages
    pub implementation: String,
    pub comparer: &'a SymbolComparer,
    pub left_types: TypeIndex<'a>,
    pub right_types: TypeIndex<'a>,
    pub attribute_exclusions: &'a AttributeExclusions,
    pub settings: &'a RuleSettings,
}

impl<'a> RuleContext<'a> {
    pub fn new(
        comparer: &'a SymbolComparer,
        left: &'a [AssemblySymbol],
        right: &'a [AssemblySymbol],
        attribute_exclusions: &'a AttributeExclusions,
        settings: &'a RuleSettings,
    ) -> Self {
        Self {
            contract: DEFAULT_CONTRACT_NAME.to_string(),
            implementation: DEFAULT_IMPLEMENTATION_NAME.to_string(),
            comparer,
            left_types: TypeIndex::build(left),
            right_types: TypeIndex::build(right),
            attribute_exclusions,
            settings,
        }
    }

    pub fn with_operand_names(mut self, contract: impl Into<String>, implementation: impl Into<String>) -> Self {
        self.contract = contract.into();
        self.implementation = implementation.into();
        self
    }
}

/// `Namespace.Type.Member(T1, T2)`
pub fn member_name(declaring: &TypeSymbol, member: &MemberSymbol) -> String {
    format!("{}.{}", declaring.full_name(), member.display_signature())
}

/// `parameter 'name' of 'Namespace.Type.Member(T1)'`
pub fn parameter_name(declaring: &TypeSymbol, member: &MemberSymbol, parameter: &ParameterSymbol) -> String {
    format!("parameter '{}' of '{}'", parameter.name, member_name(declaring, member))
}
