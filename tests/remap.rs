//! End-to-end tests: parse a default table, remap it, render it
//!
//! Tests for the remap pipeline as used by the command line.

mod common;

use common::{binding, find, keys_for, sample_bindings, stroke};
use keyremap::keymap::{
    default_rules, load_rules, parse_keybindings_json, parse_rules_yaml, render, to_json,
    OutputFormat, RuleSet,
};
use keyremap::remap::{remap, RemapError};

// ========================================================================
// Full pipeline
// ========================================================================

#[test]
fn test_sample_remaps_without_error() {
    let output = remap(&sample_bindings(), &default_rules()).unwrap();
    assert_eq!(output.len(), 25);
}

#[test]
fn test_arrow_keys_move_to_home_row() {
    let output = remap(&sample_bindings(), &default_rules())
        .unwrap()
        .into_bindings();

    assert_eq!(keys_for(&output, "cursorLeft"), [stroke("alt+h")]);
    assert_eq!(keys_for(&output, "cursorUp"), [stroke("alt+k")]);
    assert_eq!(keys_for(&output, "cursorRight"), [stroke("alt+l"), stroke("ctrl+oem_7 alt+l")]);
    assert_eq!(keys_for(&output, "cursorDown"), [stroke("alt+j"), stroke("ctrl+oem_7 alt+j")]);
}

#[test]
fn test_untouched_bindings_are_not_emitted() {
    let output = remap(&sample_bindings(), &default_rules())
        .unwrap()
        .into_bindings();

    assert!(find(&output, "workbench.action.files.save").is_none());
    assert!(find(&output, "editor.action.joinLines").is_none());
    // prefixed binding without a rule is dropped
    assert!(find(&output, "editor.action.addCommentLine").is_none());
}

#[test]
fn test_rendered_document_round_trips() {
    let output = remap(&sample_bindings(), &default_rules())
        .unwrap()
        .into_bindings();

    let json = to_json(&output).unwrap();
    let reparsed = parse_keybindings_json(&json, false).unwrap();
    assert_eq!(reparsed, output);
}

#[test]
fn test_yaml_document() {
    let output = remap(&[binding("f5", "workbench.action.debug.start")], &default_rules())
        .unwrap()
        .into_bindings();

    let yaml = render(&output, OutputFormat::Yaml).unwrap();
    assert!(yaml.contains("key: alt+5"));
    assert!(yaml.contains("command: workbench.action.debug.start"));
}

#[test]
fn test_rendering_is_deterministic() {
    let bindings = sample_bindings();
    let rules = default_rules();
    let first = to_json(&remap(&bindings, &rules).unwrap().into_bindings()).unwrap();
    let second = to_json(&remap(&bindings, &rules).unwrap().into_bindings()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_fatal_error_names_binding() {
    let input = vec![binding("alt+pageup ctrl+w", "workbench.action.closeWindow")];
    let err = remap(&input, &default_rules()).unwrap_err();

    let RemapError::LeaderOnSequence { command, key } = &err;
    assert_eq!(command, "workbench.action.closeWindow");
    assert_eq!(*key, stroke("alt+w ctrl+w"));
    assert!(err.to_string().contains("workbench.action.closeWindow"));
}

// ========================================================================
// Custom rule layers
// ========================================================================

fn rules_with(layer: &str) -> RuleSet {
    let mut rules = default_rules();
    rules.apply_layer(parse_rules_yaml(layer).unwrap()).unwrap();
    rules.validate().unwrap();
    rules
}

#[test]
fn test_removed_rule_leaves_key_alone() {
    let rules = rules_with("general:\n  - { from: down }\n");
    let output = remap(&[binding("down", "cursorDown")], &rules).unwrap();
    assert!(output.is_empty());
}

#[test]
fn test_custom_leader_used_for_backfill() {
    let rules = rules_with("leader: \"ctrl+oem_4\"\n");
    let input = vec![binding("alt+j", "cmdA"), binding("down", "cmdB")];
    let output = remap(&input, &rules).unwrap();

    assert_eq!(output.backfill, vec![binding("ctrl+oem_4 alt+j", "cmdB")]);
}

#[test]
fn test_custom_prefix_scopes_prefixed_table() {
    let rules = rules_with("prefix: \"ctrl+m\"\n");
    let input = vec![binding("ctrl+m down", "a"), binding("ctrl+k down", "b")];
    let output = remap(&input, &rules).unwrap();

    assert_eq!(output.prefixed, vec![binding("ctrl+m j", "a")]);
    // ctrl+k is an ordinary chord now, so the general table rewrites it
    assert_eq!(output.general, vec![binding("ctrl+k alt+j", "b")]);
}

#[test]
fn test_load_rules_with_explicit_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rules.yaml");
    std::fs::write(&path, "general:\n  - { from: tab, to: \"ctrl+i\" }\n").unwrap();

    let rules = load_rules(Some(&path)).unwrap();
    let output = remap(&[binding("tab", "tab")], &rules).unwrap();
    assert_eq!(output.general, vec![binding("ctrl+i", "tab")]);
}
