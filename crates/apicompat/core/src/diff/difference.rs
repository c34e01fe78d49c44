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

//! Difference records

use serde::{Deserialize, Serialize};
use std::fmt;

/// Classification of one mapping position, and the result type of every rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum DifferenceType {
    Unchanged,
    Added,
    Removed,
    Changed,
    /// The rule had nothing to say about this node
    #[default]
    Unknown,
}

impl DifferenceType {
    /// Fold a rule result into a node's running classification; `Changed`
    /// dominates, `Unknown` never overrides
    pub fn merge(self, other: DifferenceType) -> DifferenceType {
        match (self, other) {
            (DifferenceType::Changed, _) | (_, DifferenceType::Changed) => DifferenceType::Changed,
            (current, DifferenceType::Unknown) => current,
            (DifferenceType::Unknown, next) => next,
            (current, _) => current,
        }
    }
}

/// One classified difference emitted by a rule
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Difference {
    /// Id of the emitting rule
    pub id: String,
    pub message: String,
    pub is_incompatible: bool,
}

impl Difference {
    pub fn incompatible(id: impl Into<String>, message: impl Into<String>) -> Self {
        Self { id: id.into(), message: message.into(), is_incompatible: true }
    }

    pub fn informational(id: impl Into<String>, message: impl Into<String>) -> Self {
        Self { id: id.into(), message: message.into(), is_incompatible: false }
    }

    /// Suppression key matched against baseline entries: `RuleId:Message`
    pub fn baseline_key(&self) -> String {
        format!("{}:{}", self.id, self.message)
    }
}

impl fmt::Display for Difference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.id, self.message)
    }
}

/// Sink rules append their differences to
#[derive(Debug, Default, Clone)]
pub struct Differences {
    items: Vec<Difference>,
}

impl Differences {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, difference: Difference) {
        self.items.push(difference);
    }

    pub fn add_incompatible(&mut self, id: &str, message: impl Into<String>) {
        self.items.push(Difference::incompatible(id, message));
    }

    pub fn add_informational(&mut self, id: &str, message: impl Into<String>) {
        self.items.push(Difference::informational(id, message));
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Difference> {
        self.items.iter()
    }

    pub fn into_vec(self) -> Vec<Difference> {
        self.items
    }
}
