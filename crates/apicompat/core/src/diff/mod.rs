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

//! Differences, baselines and reports
//!
//! Rules append [`Difference`]s to a [`Differences`] sink. The
//! [`DifferenceWriter`] drives rule evaluation over a mapping tree, passes
//! every emitted difference through the [`Baseline`] and collects the result
//! into a [`ComparisonReport`].

pub mod baseline;
pub mod difference;
pub mod report;
pub mod writer;

pub use baseline::{Baseline, BaselineEntry};
pub use difference::{Difference, DifferenceType, Differences};
pub use report::{AssemblyReport, ComparisonReport, ReportFormat};
pub use writer::{DifferenceWriter, WriterState};
