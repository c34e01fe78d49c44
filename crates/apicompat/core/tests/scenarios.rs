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

use apicompat_core::config::ReportGrouping;
use apicompat_core::filter::FilterSettings;
use apicompat_core::symbols::attribute::{EDITOR_BROWSABLE_ATTRIBUTE, OBSOLETE_ATTRIBUTE};
use apicompat_core::symbols::member::VOID;
use apicompat_core::symbols::{AttributeSymbol, ParameterModifier, ParameterSymbol, Visibility};
use apicompat_core::{ApiCompatEngine, AssemblySymbol, Baseline, ComparisonConfig, ComparisonReport, MemberSymbol, TypeSymbol};

fn lib(types: Vec<TypeSymbol>) -> Vec<AssemblySymbol> {
    let mut asm = AssemblySymbol::new("Lib");
    asm.types = types;
    vec![asm]
}

fn compare(left: &[AssemblySymbol], right: &[AssemblySymbol]) -> ComparisonReport {
    ApiCompatEngine::new(ComparisonConfig::default()).compare(left, right)
}

fn ids(report: &ComparisonReport) -> Vec<&str> {
    report.differences().map(|d| d.id.as_str()).collect()
}

#[test]
fn test_round_trip_is_clean() {
    let side = lib(vec![TypeSymbol::class("N", "Foo").with_member(MemberSymbol::method("M", VOID))]);
    let report = compare(&side, &side.clone());
    assert_eq!(report.differences().count(), 0);
    assert_eq!(report.exit_code(), 0);
}

#[test]
fn test_removed_member() {
    let left = lib(vec![TypeSymbol::class("N", "Foo").with_member(MemberSymbol::method("M", VOID))]);
    let right = lib(vec![TypeSymbol::class("N", "Foo")]);
    let report = compare(&left, &right);
    let differences: Vec<_> = report.differences().collect();
    assert_eq!(differences.len(), 1);
    assert!(differences[0].is_incompatible);
    assert_eq!(differences[0].id, "MembersMustExist");
    assert!(differences[0].message.contains("Foo.M"));
    assert_eq!(report.exit_code(), 2);
}

#[test]
fn test_member_promoted_to_base() {
    let left = lib(vec![
        TypeSymbol::class("N", "Base"),
        TypeSymbol::class("N", "Derived").with_base_type("N.Base").with_member(MemberSymbol::method("M", VOID)),
    ]);
    let right = lib(vec![
        TypeSymbol::class("N", "Base").with_member(MemberSymbol::method("M", VOID)),
        TypeSymbol::class("N", "Derived").with_base_type("N.Base"),
    ]);
    let report = compare(&left, &right);
    assert!(report.is_compatible(), "{:?}", ids(&report));
}

#[test]
fn test_attribute_addition_is_compatible() {
    let left = lib(vec![TypeSymbol::class("N", "Foo")]);
    let right = lib(vec![TypeSymbol::class("N", "Foo").with_attribute(AttributeSymbol::new(OBSOLETE_ATTRIBUTE))]);
    let report = compare(&left, &right);
    let differences: Vec<_> = report.differences().collect();
    assert_eq!(differences.len(), 1);
    assert!(!differences[0].is_incompatible);
    assert_eq!(report.total_issues(), 0);
}

#[test]
fn test_attribute_removal_is_incompatible() {
    let left = lib(vec![TypeSymbol::enumeration("N", "Options", "System.Int32").with_attribute(AttributeSymbol::new("System.FlagsAttribute"))]);
    let right = lib(vec![TypeSymbol::enumeration("N", "Options", "System.Int32")]);
    let report = compare(&left, &right);
    let incompatible: Vec<_> = report.differences().filter(|d| d.is_incompatible).collect();
    assert_eq!(incompatible.len(), 1);
    assert_eq!(incompatible[0].id, "AttributeDifference");
}

#[test]
fn test_overloads_map_by_signature() {
    let int = MemberSymbol::method("Write", VOID).with_parameter(ParameterSymbol::new("value", "System.Int32"));
    let text = MemberSymbol::method("Write", VOID).with_parameter(ParameterSymbol::new("value", "System.String"));
    let left = lib(vec![TypeSymbol::class("N", "Writer").with_member(int.clone()).with_member(text)]);
    let right = lib(vec![TypeSymbol::class("N", "Writer").with_member(int)]);
    let report = compare(&left, &right);
    let differences: Vec<_> = report.differences().collect();
    assert_eq!(differences.len(), 1);
    assert!(differences[0].message.contains("Write(System.String)"));
}

#[test]
fn test_modifier_change_on_matched_parameter() {
    let method = |modifier| MemberSymbol::method("TryGet", "System.Boolean").with_parameter(ParameterSymbol::new("value", "System.Int32").with_modifier(modifier));
    let left = lib(vec![TypeSymbol::class("N", "Cache").with_member(method(ParameterModifier::Ref))]);
    let right = lib(vec![TypeSymbol::class("N", "Cache").with_member(method(ParameterModifier::Out))]);
    assert_eq!(ids(&compare(&left, &right)), vec!["ParameterModifiersCannotChange"]);
}

#[test]
fn test_optional_parameter_name_rule() {
    let method = |name: &str| MemberSymbol::method("Resize", VOID).with_parameter(ParameterSymbol::new(name, "System.Int32"));
    let left = lib(vec![TypeSymbol::class("N", "Buffer").with_member(method("size"))]);
    let right = lib(vec![TypeSymbol::class("N", "Buffer").with_member(method("length"))]);
    assert!(compare(&left, &right).is_compatible());

    let config = ComparisonConfig::new().with_optional_rules(true);
    let report = ApiCompatEngine::new(config).compare(&left, &right);
    assert_eq!(ids(&report), vec!["ParameterNamesCannotChange"]);
}

#[test]
fn test_baseline_idempotence() {
    let left = lib(vec![
        TypeSymbol::class("N", "Foo").with_member(MemberSymbol::method("M", VOID)),
        TypeSymbol::class("N", "Bar"),
        TypeSymbol::class("N", "Open"),
    ]);
    let right = lib(vec![
        TypeSymbol::class("N", "Foo").with_attribute(AttributeSymbol::new(OBSOLETE_ATTRIBUTE)),
        TypeSymbol::class("N", "Open").sealed(),
    ]);
    let first = compare(&left, &right);
    assert_eq!(first.total_issues(), 3);
    assert_eq!(first.differences().count(), 4);

    // partial baseline, then regenerate from what the run saw
    let accepted = first.differences().find(|d| d.is_incompatible).unwrap();
    let partial = Baseline::new().with_difference(accepted);
    let second = ApiCompatEngine::new(ComparisonConfig::new().with_baseline(partial)).compare(&left, &right);
    assert_eq!(second.suppressed_count(), 1);
    assert_eq!(second.total_issues(), 2);

    let regenerated = Baseline::parse(&second.to_baseline()).unwrap();
    let config = ComparisonConfig::new().with_baseline(regenerated).with_validate_baseline(true);
    let third = ApiCompatEngine::new(config).compare(&left, &right);
    assert_eq!(third.differences().count(), 0);
    assert_eq!(third.suppressed_count(), 4);
    assert_eq!(third.total_issues(), 0);
    assert_eq!(third.to_text().unwrap(), "Total Issues: 0\n");
}

#[test]
fn test_renamed_generic_parameter_is_compatible() {
    let put = |name: &str| MemberSymbol::method("Put", VOID).with_parameter(ParameterSymbol::new("item", name));
    let take = |name: &str| MemberSymbol::method("Take", name).with_generic_parameter(name);
    let left = lib(vec![TypeSymbol::class("N", "Box").with_generic_parameter("T").with_member(put("T")).with_member(take("TOut"))]);
    let right = lib(vec![TypeSymbol::class("N", "Box").with_generic_parameter("TItem").with_member(put("TItem")).with_member(take("TResult"))]);
    let report = compare(&left, &right);
    assert!(report.differences().next().is_none(), "{:?}", ids(&report));
    assert_eq!(report.exit_code(), 0);
}

#[test]
fn test_interface_member_added_without_abstract_flag() {
    let left = lib(vec![TypeSymbol::interface("N", "IFoo")]);
    let right = lib(vec![TypeSymbol::interface("N", "IFoo").with_member(MemberSymbol::method("New", VOID))]);
    let report = compare(&left, &right);
    assert_eq!(ids(&report), vec!["InterfacesShouldHaveSameMembers"]);
    assert_eq!(report.exit_code(), 2);
}

#[test]
fn test_missing_assembly_reports_once() {
    let left = vec![AssemblySymbol::new("Lib").with_type(TypeSymbol::class("N", "Foo").with_member(MemberSymbol::method("M", VOID)))];
    let report = compare(&left, &[]);
    assert_eq!(ids(&report), vec!["MatchingAssemblyDoesNotExist"]);
}

#[test]
fn test_removed_nested_container_reports_once() {
    let left = lib(vec![TypeSymbol::class("N", "Outer").with_nested_type(TypeSymbol::class("N", "Outer+Inner").with_member(MemberSymbol::method("M", VOID)))]);
    let right = lib(vec![]);
    assert_eq!(ids(&compare(&left, &right)), vec!["TypesMustExist"]);
}

#[test]
fn test_internal_members_need_friend_assembly() {
    let internal = MemberSymbol::method("Helper", VOID).with_visibility(Visibility::Assembly);
    let left = vec![
        AssemblySymbol::new("Lib")
            .with_internals_visible_to("Lib.Tests")
            .with_type(TypeSymbol::class("N", "Foo").with_member(internal)),
    ];
    let right = vec![AssemblySymbol::new("Lib").with_internals_visible_to("Lib.Tests").with_type(TypeSymbol::class("N", "Foo"))];
    assert!(compare(&left, &right).is_compatible());

    let config = ComparisonConfig::new().with_filter(FilterSettings { include_internals: true, ..FilterSettings::default() });
    let report = ApiCompatEngine::new(config).compare(&left, &right);
    assert_eq!(ids(&report), vec!["MembersMustExist"]);
}

#[test]
fn test_non_browsable_members_are_skipped() {
    let hidden = MemberSymbol::method("Legacy", VOID).with_attribute(AttributeSymbol::new(EDITOR_BROWSABLE_ATTRIBUTE).with_argument("EditorBrowsableState.Never"));
    let left = lib(vec![TypeSymbol::class("N", "Foo").with_member(hidden)]);
    let right = lib(vec![TypeSymbol::class("N", "Foo")]);
    assert!(!compare(&left, &right).is_compatible());

    let config = ComparisonConfig::new().with_filter(FilterSettings { exclude_non_browsable: true, ..FilterSettings::default() });
    assert!(ApiCompatEngine::new(config).compare(&left, &right).is_compatible());
}

#[test]
fn test_flat_grouping_text() {
    let left = lib(vec![TypeSymbol::class("N", "Foo")]);
    let config = ComparisonConfig::new().with_grouping(ReportGrouping::Flat);
    let report = ApiCompatEngine::new(config).compare(&left, &lib(vec![]));
    assert_eq!(
        report.to_text().unwrap(),
        "TypesMustExist - Type 'N.Foo' does not exist in the implementation but it does exist in the contract.\nTotal Issues: 1\n"
    );
}

#[test]
fn test_interface_member_added() {
    let left = lib(vec![TypeSymbol::interface("N", "IStore")]);
    let right = lib(vec![TypeSymbol::interface("N", "IStore").with_member(MemberSymbol::method("Flush", VOID).abstract_())]);
    assert_eq!(ids(&compare(&left, &right)), vec!["InterfacesShouldHaveSameMembers"]);
}
