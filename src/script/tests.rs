// envscript: environment script updater
//
// SPDX-FileCopyrightText: 2026 envscript contributors
// SPDX-License-Identifier: GPL-3.0-or-later

use super::index::ScriptIndex;
use super::merge::merge;
use super::types::{MergeOptions, NameValuePair, Terminator, UpdateSet};
use crate::dialect::Dialect;
use crate::error::PatchError;

fn apply(text: &str, dialect: Dialect, updates: &UpdateSet) -> String {
    let index = ScriptIndex::parse(text, dialect);
    merge(&index, updates, &MergeOptions::default())
        .unwrap()
        .render()
}

#[test]
fn test_parse_preserves_terminators() {
    let index = ScriptIndex::parse("a\nb\r\nc\rd", Dialect::Sh);
    let terms: Vec<_> = index.lines().iter().map(|l| l.terminator()).collect();
    assert_eq!(
        terms,
        vec![
            Terminator::Lf,
            Terminator::CrLf,
            Terminator::Cr,
            Terminator::Unterminated
        ]
    );
}

#[test]
fn test_parse_render_is_identity() {
    let texts = [
        "",
        "FOO=1\n",
        "FOO=1\r\nBAR=2\r\n",
        "# comment\n\nFOO=1",
        "mixed\nendings\r\nhere\r",
        "no newline at all",
    ];
    for text in texts {
        let index = ScriptIndex::parse(text, Dialect::Sh);
        assert_eq!(index.render(), text, "render must reproduce {text:?}");
    }
}

#[test]
fn test_parse_annotates_assignments() {
    let index = ScriptIndex::parse("FOO=1\n# BAR=2\nbaz\n", Dialect::Sh);
    let names: Vec<_> = index
        .lines()
        .iter()
        .map(|l| l.assignment().map(|a| a.name.as_str()))
        .collect();
    assert_eq!(names, vec![Some("FOO"), None, None]);
}

#[test]
fn test_prevailing_terminator() {
    let cases = [
        ("", Terminator::Lf),
        ("unterminated", Terminator::Lf),
        ("a\r\nb", Terminator::CrLf),
        ("a\nb\r\n", Terminator::CrLf),
        ("a\r\nb\n", Terminator::Lf),
    ];
    for (text, expected) in cases {
        let index = ScriptIndex::parse(text, Dialect::Sh);
        assert_eq!(index.prevailing_terminator(), expected, "{text:?}");
    }
}

#[test]
fn test_merge_rewrites_in_place_and_appends() {
    let mut updates = UpdateSet::new();
    updates.set("FOO", "9").set("BAZ", "3");

    let result = apply("FOO=1\n# comment\nBAR=2\n", Dialect::Sh, &updates);
    insta::assert_snapshot!(result, @r"
    FOO=9
    # comment
    BAR=2
    BAZ=3
    ");
}

#[test]
fn test_merge_is_idempotent() {
    let mut updates = UpdateSet::new();
    updates.set("FOO", "9").set("NEW", "x").unset("BAR");

    let once = apply("FOO=1\nBAR=2\n# keep\n", Dialect::Sh, &updates);
    let twice = apply(&once, Dialect::Sh, &updates);
    assert_eq!(once, twice);
}

#[test]
fn test_merge_first_occurrence_wins() {
    let mut updates = UpdateSet::new();
    updates.set("FOO", "new");

    let result = apply("FOO=first\nmiddle\nFOO=second\n", Dialect::Sh, &updates);
    assert_eq!(result, "FOO=new\nmiddle\nFOO=second\n");
}

#[test]
fn test_merge_removal() {
    let mut updates = UpdateSet::new();
    updates.unset("FOO");

    let result = apply("FOO=1\nBAR=2\n", Dialect::Sh, &updates);
    assert_eq!(result, "BAR=2\n");
}

#[test]
fn test_merge_removal_of_absent_name_is_noop() {
    let mut updates = UpdateSet::new();
    updates.unset("NOPE");

    let text = "FOO=1\n# c\n";
    assert_eq!(apply(text, Dialect::Sh, &updates), text);
}

#[test]
fn test_merge_removal_keeps_later_duplicates() {
    let mut updates = UpdateSet::new();
    updates.unset("FOO");

    let result = apply("FOO=1\nFOO=2\n", Dialect::Sh, &updates);
    assert_eq!(result, "FOO=2\n");
}

#[test]
fn test_merge_appends_in_update_set_order() {
    let mut updates = UpdateSet::new();
    updates.set("C", "3").set("A", "1").set("B", "2");

    let result = apply("# header\n", Dialect::Sh, &updates);
    insta::assert_snapshot!(result, @r"
    # header
    C=3
    A=1
    B=2
    ");
}

#[test]
fn test_merge_append_terminates_trailing_line() {
    let mut updates = UpdateSet::new();
    updates.set("NEW", "1");

    let result = apply("FOO=1\nlast line", Dialect::Sh, &updates);
    assert_eq!(result, "FOO=1\nlast line\nNEW=1\n");
}

#[test]
fn test_merge_without_appends_keeps_unterminated_line() {
    let mut updates = UpdateSet::new();
    updates.set("FOO", "2");

    let result = apply("FOO=1\nlast line", Dialect::Sh, &updates);
    assert_eq!(result, "FOO=2\nlast line");
}

#[test]
fn test_merge_preserves_crlf_on_rewrite_and_append() {
    let mut updates = UpdateSet::new();
    updates.set("JAVA_HOME", "D:\\jdk17").set("NEW", "1");

    let result = apply(
        "@echo off\r\nset JAVA_HOME=C:\\jdk\r\n",
        Dialect::Batch,
        &updates,
    );
    assert_eq!(
        result,
        "@echo off\r\nset JAVA_HOME=D:\\jdk17\r\nset NEW=1\r\n"
    );
}

#[test]
fn test_merge_rewrite_drops_no_echo_marker() {
    // Observed behavior of the original: a rewritten line loses its @.
    let mut updates = UpdateSet::new();
    updates.set("FOO", "2");

    let result = apply("@set FOO=1\n", Dialect::Batch, &updates);
    assert_eq!(result, "set FOO=2\n");
}

#[test]
fn test_merge_on_empty_index() {
    let mut updates = UpdateSet::new();
    updates.set("FOO", "1");

    let index = ScriptIndex::empty(Dialect::Sh);
    let merged = merge(&index, &updates, &MergeOptions::default()).unwrap();
    assert_eq!(merged.render(), "FOO=1\n");
}

#[test]
fn test_merge_validates_before_producing_output() {
    let mut updates = UpdateSet::new();
    updates.set("wrapper.ok", "1").set("maxheap", "512");

    let index = ScriptIndex::parse("wrapper.ok=0\n", Dialect::WrapperConf);
    let err = merge(&index, &updates, &MergeOptions::default()).unwrap_err();
    assert!(matches!(err, PatchError::Dialect(_)), "got {err}");
}

#[test]
fn test_merge_prune_missing() {
    let mut updates = UpdateSet::new();
    updates.set("KEEP", "new");

    let index = ScriptIndex::parse("KEEP=old\n# comment\nDROP=1\nDROP=2\n", Dialect::Sh);
    let options = MergeOptions::builder().with_prune_missing(true).build();
    let merged = merge(&index, &updates, &options).unwrap();
    insta::assert_snapshot!(merged.render(), @r"
    KEEP=new
    # comment
    ");
}

#[test]
fn test_update_set_reinsert_keeps_position() {
    let mut updates = UpdateSet::new();
    updates.set("A", "1").set("B", "2").set("A", "3");

    let pairs: Vec<_> = updates
        .iter()
        .map(|p| (p.name.as_str(), p.value.as_deref()))
        .collect();
    assert_eq!(pairs, vec![("A", Some("3")), ("B", Some("2"))]);
    assert_eq!(updates.len(), 2);
}

#[test]
fn test_update_set_serde_round_trip() {
    let mut updates = UpdateSet::new();
    updates.set("FOO", "1").unset("BAR");

    let json = serde_json::to_string(&updates).unwrap();
    insta::assert_snapshot!(
        json,
        @r#"{"pairs":[{"name":"FOO","value":"1"},{"name":"BAR","value":null}]}"#
    );

    let back: UpdateSet = serde_json::from_str(&json).unwrap();
    assert_eq!(back, updates);
}

#[test]
fn test_update_set_from_iterator() {
    let updates: UpdateSet = [
        NameValuePair::set("A", "1"),
        NameValuePair::unset("B"),
        NameValuePair::set("A", "2"),
    ]
    .into_iter()
    .collect();

    assert_eq!(updates.len(), 2);
    assert_eq!(updates.get("A"), Some(&NameValuePair::set("A", "2")));
    assert_eq!(updates.get("B"), Some(&NameValuePair::unset("B")));
}
