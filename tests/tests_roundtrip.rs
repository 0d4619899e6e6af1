//! Parse → serialize round trips and construction errors
//!
//! Documents whose text never directly follows a closing group come back
//! byte-for-byte; the rest of the file covers code pages and malformed input.

#![allow(clippy::unwrap_used)]

mod helpers;

use helpers::{HELLO_DOCUMENT, preorder};
use rstest::rstest;
use rtftree::encoding_rs;
use rtftree::{DocumentTree, LoadOptions, NodeKind, RtfError, Token, tokenize};
use text_size::TextSize;

// ============================================================================
// Round trips
// ============================================================================

#[rstest]
#[case(HELLO_DOCUMENT)]
#[case(r"{\rtf1 Hello}")]
#[case(r"{}")]
#[case(r"{\rtf1{\*\generator Writer;}\pard\qc Centered\par}")]
#[case(r"{\rtf1 caf\'e9 \{braces\} and \\ backslash}")]
#[case(r"{\rtf1\li-720\fi360 Indented\line next}")]
#[case(r"{\rtf1{\b{\i deep}}\~x}")]
fn test_parse_then_render_is_identity(#[case] input: &str) {
    let tree = DocumentTree::parse(input).unwrap();
    assert_eq!(tree.to_rtf().unwrap(), input);
}

#[test]
fn test_render_is_stable_after_reparse() {
    let first = DocumentTree::parse(HELLO_DOCUMENT).unwrap();
    let rendered = first.to_rtf().unwrap();
    let second = DocumentTree::parse(&rendered).unwrap();
    assert_eq!(second.to_rtf().unwrap(), rendered);
    assert_eq!(first.to_string(), second.to_string());
}

#[test]
fn test_line_breaks_are_dropped() {
    let tree = DocumentTree::parse("{\\rtf1\r\n\\b bold\n}").unwrap();
    assert_eq!(tree.to_rtf().unwrap(), r"{\rtf1\b bold}");
}

#[test]
fn test_escaped_newline_becomes_par() {
    let tree = DocumentTree::parse("{a\\\nb}").unwrap();
    assert_eq!(tree.to_rtf().unwrap(), r"{a\par b}");
}

#[test]
fn test_text_after_group_gains_space() {
    let tree = DocumentTree::parse(r"{{\b x}y}").unwrap();
    assert_eq!(tree.to_rtf().unwrap(), r"{{\b x} y}");
}

#[test]
fn test_edit_then_render() {
    let tree = DocumentTree::parse(HELLO_DOCUMENT).unwrap();
    let main = tree.main_group().unwrap();
    let bold_on = main.select_single_child_node(("b", 0)).unwrap();
    main.remove_child(&bold_on).unwrap();
    let bold = main.select_single_child_node("b").unwrap();
    bold.set_key("i");
    assert!(tree.to_rtf().unwrap().ends_with(r"Hello \i world !\par}"));
}

// ============================================================================
// Structure of parsed documents
// ============================================================================

#[test]
fn test_parsed_structure() {
    let tree = DocumentTree::parse(r"{\rtf1{\fonttbl{\f0 Arial;}}Hi}").unwrap();
    assert_eq!(tree.root().child_count(), 1);
    assert_eq!(
        tree.to_string(),
        "Root\n  Group\n    Keyword: rtf 1\n    Group\n      Keyword: fonttbl\n      Group\n        Keyword: f 0\n        Text: Arial;\n    Text: Hi\n"
    );
}

#[test]
fn test_from_tokens_matches_parse() {
    let tokens = tokenize(HELLO_DOCUMENT).unwrap();
    let from_tokens = DocumentTree::from_tokens(tokens, &LoadOptions::default()).unwrap();
    let parsed = DocumentTree::parse(HELLO_DOCUMENT).unwrap();
    assert_eq!(from_tokens.to_string(), parsed.to_string());
}

#[test]
fn test_hand_built_token_stream() {
    let tokens = vec![
        Token::group_start(),
        Token::keyword("rtf", Some(1)),
        Token::control("*", None),
        Token::text("x"),
        Token::group_end(),
    ];
    let tree = DocumentTree::from_tokens(tokens, &LoadOptions::default()).unwrap();
    assert_eq!(tree.to_rtf().unwrap(), r"{\rtf1\*x}");
}

#[test]
fn test_every_parsed_node_is_linked() {
    let tree = DocumentTree::parse(HELLO_DOCUMENT).unwrap();
    let nodes = preorder(&tree.root());
    assert!(nodes.iter().all(|n| n.tree().is_some_and(|t| t.ptr_eq(&tree))));
    assert!(nodes.iter().all(|n| n.kind() != NodeKind::Root));
}

// ============================================================================
// Code pages and special characters
// ============================================================================

#[rstest]
#[case(r"{\rtf1\ansi\ansicpg1251 x}", "windows-1251")]
#[case(r"{\rtf1\ansi\ansicpg932 x}", "Shift_JIS")]
#[case(r"{\rtf1\ansi x}", "windows-1252")]
#[case(r"{\rtf1\ansi\ansicpg4242 x}", "windows-1252")]
fn test_ansicpg_selects_encoding(#[case] input: &str, #[case] expected: &str) {
    let tree = DocumentTree::parse(input).unwrap();
    assert_eq!(tree.encoding().name(), expected);
}

#[test]
fn test_fixed_encoding_wins() {
    let options = LoadOptions::new().with_encoding(encoding_rs::UTF_8);
    let tree = DocumentTree::parse_with(r"{\rtf1\ansicpg1251 x}", &options).unwrap();
    assert_eq!(tree.encoding(), encoding_rs::UTF_8);
}

#[test]
fn test_hex_escapes_stay_controls_by_default() {
    let tree = DocumentTree::parse(r"{caf\'e9}").unwrap();
    let main = tree.main_group().unwrap();
    assert_eq!(main.child_count(), 2);
    let escape = main.last_child().unwrap();
    assert_eq!(escape.kind(), NodeKind::Control);
    assert_eq!(escape.param(), Some(0xe9));
}

#[rstest]
#[case(r"{caf\'e9 au lait}", "café au lait")]
#[case(r"{\rtf1\ansicpg1251 \'c6\'e8\'e2}", "Жив")]
fn test_merged_special_characters_round_trip(#[case] input: &str, #[case] text: &str) {
    let options = LoadOptions::new().merge_special_characters(true);
    let tree = DocumentTree::parse_with(input, &options).unwrap();
    let main = tree.main_group().unwrap();
    let merged = main.last_child().unwrap();
    assert_eq!(merged.kind(), NodeKind::Text);
    assert_eq!(&*merged.key(), text);
    assert_eq!(tree.to_rtf().unwrap(), input);
}

#[test]
fn test_double_byte_escapes_merge() {
    let options = LoadOptions::new().merge_special_characters(true);
    let tree = DocumentTree::parse_with(r"{\rtf1\ansicpg932 \'93\'fa}", &options).unwrap();
    let main = tree.main_group().unwrap();
    assert_eq!(&*main.last_child().unwrap().key(), "日");
}

#[test]
fn test_malformed_byte_run_is_not_merged() {
    let options = LoadOptions::new().merge_special_characters(true);
    let input = r"{\rtf1\ansicpg932\'93}";
    let tree = DocumentTree::parse_with(input, &options).unwrap();
    let main = tree.main_group().unwrap();
    let escape = main.last_child().unwrap();
    assert_eq!(escape.kind(), NodeKind::Control);
    assert_eq!(escape.param(), Some(0x93));
    assert!(main.select_nodes(NodeKind::Text).is_empty());
    assert_eq!(tree.to_rtf().unwrap(), input);
}

#[rstest]
#[case(r"{a\'5cb\'7dc}", r"{a\\b\}c}")]
#[case(r"{\'7bx\'7d}", r"{\{x\}}")]
#[case(r"{caf\'e9\'5c}", r"{caf\'e9\\}")]
fn test_merged_symbols_stay_escaped(#[case] input: &str, #[case] expected: &str) {
    let options = LoadOptions::new().merge_special_characters(true);
    let tree = DocumentTree::parse_with(input, &options).unwrap();
    let rendered = tree.to_rtf().unwrap();
    assert_eq!(rendered, expected);

    let reparsed = DocumentTree::parse_with(&rendered, &options).unwrap();
    assert_eq!(reparsed.to_string(), tree.to_string());
    assert_eq!(reparsed.to_rtf().unwrap(), rendered);
}

// ============================================================================
// Malformed input
// ============================================================================

#[test]
fn test_extra_close_brace() {
    assert_eq!(
        DocumentTree::parse("{a}}").unwrap_err(),
        RtfError::UnbalancedGroup {
            offset: TextSize::new(3)
        }
    );
}

#[rstest]
#[case(r"{\'zz}", 1)]
#[case("{abc\\", 4)]
#[case(r"{\fs99999999999 x}", 1)]
fn test_lex_errors_surface(#[case] input: &str, #[case] offset: u32) {
    match DocumentTree::parse(input) {
        Err(RtfError::Lex { offset: at, .. }) => assert_eq!(at, TextSize::new(offset)),
        other => panic!("expected lex error, got {other:?}"),
    }
}

#[test]
fn test_unclosed_group_is_closed_on_render() {
    let tree = DocumentTree::parse(r"{\rtf1{\b x").unwrap();
    assert_eq!(tree.to_rtf().unwrap(), r"{\rtf1{\b x}}");
}

#[test]
fn test_content_outside_top_level_group_is_kept() {
    let tree = DocumentTree::parse(r"{a}{b}").unwrap();
    assert_eq!(tree.root().child_count(), 2);
    assert_eq!(tree.to_rtf().unwrap(), "{a}{b}");
}
