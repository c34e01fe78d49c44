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

//! `rules` command: list the built-in rules

use anyhow::Result;
use apicompat_core::rules::RuleRegistry;
use std::io::Write;

pub fn list_rules(out: &mut dyn Write) -> Result<()> {
    for (id, optional) in RuleRegistry::default().describe() {
        if optional {
            writeln!(out, "{} (optional)", id)?;
        } else {
            writeln!(out, "{}", id)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_rules() {
        let mut buffer = Vec::new();
        list_rules(&mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert!(text.starts_with("MatchingAssemblyDoesNotExist\n"));
        assert!(text.contains("ParameterNamesCannotChange (optional)\n"));
        assert_eq!(text.lines().count(), 18);
    }
}
