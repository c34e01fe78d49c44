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

//! Declaration order for mapping children
//!
//! Mirrors the way a C# declaration lists a type body: fields, constructors,
//! properties, events, methods, then nested types. Used only to make output
//! deterministic and readable.

use super::{ElementPair, MappingNode};
use crate::symbols::MemberKind;
use std::cmp::Ordering;

fn rank(node: &MappingNode<'_>) -> u8 {
    match node.element {
        ElementPair::Member { members, .. } => match members.representative().map(|m| m.kind) {
            Some(MemberKind::Field) => 0,
            Some(MemberKind::Constructor) => 1,
            Some(MemberKind::Property) => 2,
            Some(MemberKind::Event) => 3,
            Some(MemberKind::Method) | None => 4,
        },
        ElementPair::Type { .. } => 5,
        _ => 6,
    }
}

fn position(node: &MappingNode<'_>) -> usize {
    match node.element {
        ElementPair::Parameter { position, .. } => position,
        _ => 0,
    }
}

fn display_name<'n>(node: &'n MappingNode<'_>) -> &'n str {
    match &node.element {
        ElementPair::Member { members, .. } => members.representative().map_or("", |m| m.name.as_str()),
        ElementPair::Type { types, .. } => types.representative().map_or("", |t| t.name.as_str()),
        _ => node.key.as_str(),
    }
}

pub fn declaration_order(a: &MappingNode<'_>, b: &MappingNode<'_>) -> Ordering {
    rank(a)
        .cmp(&rank(b))
        .then_with(|| position(a).cmp(&position(b)))
        .then_with(|| display_name(a).cmp(display_name(b)))
        .then_with(|| a.key.cmp(&b.key))
}
