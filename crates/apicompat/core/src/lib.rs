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

//! API Compatibility Core Library
//!
//! This crate compares a contract API surface against an implementation API
//! surface and reports every difference that would break consumers compiled
//! against the contract.
//!
//! A run goes through four stages:
//!
//! 1. [`filter`] decides which symbols take part (public only, friend
//!    assemblies, editor-browsable, MDIL surface)
//! 2. [`mapping`] pairs corresponding symbols by their [`comparer`] keys into
//!    a tree of matched and one-sided nodes
//! 3. [`rules`] inspect every node and emit classified differences
//! 4. [`diff`] applies the baseline and builds the report
//!
//! [`ApiCompatEngine`] wires the stages together from a [`ComparisonConfig`].

pub mod comparer;
pub mod config;
pub mod diff;
pub mod engine;
pub mod error;
pub mod filter;
pub mod mapping;
pub mod rules;
pub mod symbols;

pub use config::ComparisonConfig;
pub use diff::{Baseline, ComparisonReport, Difference, DifferenceType, ReportFormat};
pub use engine::ApiCompatEngine;
pub use error::{ApiCompatError, Result};
pub use symbols::{AssemblySymbol, MemberSymbol, TypeSymbol};
