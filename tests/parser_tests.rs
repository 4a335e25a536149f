// tests/parser_tests.rs

use miette::Diagnostic;
use sexp_stream::{parse_bytes, parse_str, ParseError, Sexp};

fn atom(text: &str) -> Sexp {
    Sexp::Atom(text.to_string())
}

#[test]
fn test_parse_bare_atom() {
    assert_eq!(parse_str("add"), Ok(atom("add")));
    assert_eq!(parse_str("+"), Ok(atom("+")));
    assert_eq!(parse_str("123abc"), Ok(atom("123abc")));
}

#[test]
fn test_parse_unicode_atom() {
    // Only ASCII whitespace and parentheses terminate an atom.
    assert_eq!(parse_str("λ→x"), Ok(atom("λ→x")));
}

#[test]
fn test_whitespace_around_atom_is_insignificant() {
    assert_eq!(parse_str(" add"), parse_str("add"));
    assert_eq!(parse_str("add "), parse_str("add"));
    assert_eq!(parse_str("\t\n add \n"), Ok(atom("add")));
}

#[test]
fn test_parse_empty_list() {
    assert_eq!(parse_str("()"), Ok(Sexp::List(vec![])));
    assert_eq!(parse_str("( )"), Ok(Sexp::List(vec![])));
    assert_eq!(parse_str("(\n)"), Ok(Sexp::List(vec![])));
}

#[test]
fn test_parse_nested_list() {
    assert_eq!(
        parse_str("(add (add2))"),
        Ok(Sexp::List(vec![
            atom("add"),
            Sexp::List(vec![atom("add2")]),
        ]))
    );
}

#[test]
fn test_adjacent_lists_without_separator() {
    assert_eq!(
        parse_str("(add(add2 foo))"),
        Ok(Sexp::List(vec![
            atom("add"),
            Sexp::List(vec![atom("add2"), atom("foo")]),
        ]))
    );
}

#[test]
fn test_list_items_keep_source_order() {
    let items = parse_str("(a b c a)").unwrap().into_list().unwrap();
    assert_eq!(items, vec![atom("a"), atom("b"), atom("c"), atom("a")]);
}

#[test]
fn test_end_of_input_errors() {
    for input in ["", "  ", "(", "(add", "(add foo"] {
        let err = parse_str(input).unwrap_err();
        assert!(
            matches!(err, ParseError::UnexpectedEndOfInput { .. }),
            "input {input:?} gave {err:?}"
        );
    }
}

#[test]
fn test_unexpected_character_errors() {
    for input in [")", "add)", "(add foo) add"] {
        let err = parse_str(input).unwrap_err();
        assert!(
            matches!(err, ParseError::UnexpectedChar { .. }),
            "input {input:?} gave {err:?}"
        );
    }
}

#[test]
fn test_stray_closing_paren_reports_position() {
    let err = parse_str(")").unwrap_err();
    assert_eq!(err.line(), 1);
    assert_eq!(err.column(), 1);
    assert!(err.message().contains("expected atom"));
}

#[test]
fn test_trailing_input_reports_position() {
    let err = parse_str("(add foo) add").unwrap_err();
    assert_eq!(err.line(), 1);
    assert_eq!(err.column(), 11);
    assert!(err.message().contains("expected end of input"));
}

#[test]
fn test_unclosed_list_reports_line_of_eof() {
    let err = parse_str("(add\nfoo").unwrap_err();
    assert!(matches!(err, ParseError::UnexpectedEndOfInput { .. }));
    assert_eq!(err.line(), 2);
    assert_eq!(err.column(), 4);
    assert!(err.message().contains("')'"));
}

#[test]
fn test_error_display_matches_message() {
    let err = parse_str("").unwrap_err();
    assert_eq!(err.to_string(), err.message());
    assert!(err.message().contains("line 1, column 1"));
}

#[test]
fn test_error_diagnostic_codes() {
    let eof = parse_str("(").unwrap_err();
    assert_eq!(
        eof.code().map(|c| c.to_string()),
        Some("sexp_stream::parse::unexpected_eof".to_string())
    );
    let stray = parse_str(")").unwrap_err();
    assert_eq!(
        stray.code().map(|c| c.to_string()),
        Some("sexp_stream::parse::unexpected_char".to_string())
    );
}

#[test]
fn test_byte_entry_point_agrees_with_str() {
    for input in ["add", "()", "(add (add2))", "", ")", "(add foo"] {
        assert_eq!(
            parse_bytes(input.as_bytes()),
            parse_str(input),
            "disagreement on {input:?}"
        );
    }
}

#[test]
fn test_parse_is_deterministic() {
    let input = "(add (add2 foo) bar)";
    assert_eq!(parse_str(input), parse_str(input));
}

#[test]
fn test_sexp_from_str_trait() {
    let parsed: Sexp = "(a b)".parse().unwrap();
    assert_eq!(parsed, Sexp::List(vec![atom("a"), atom("b")]));
    assert!("(".parse::<Sexp>().is_err());
}

#[test]
fn test_sexp_accessors() {
    let tree = parse_str("(head tail)").unwrap();
    assert!(tree.is_list());
    assert_eq!(tree.as_list().map(<[Sexp]>::len), Some(2));
    let items = tree.into_list().unwrap();
    assert!(items[0].is_atom());
    assert_eq!(items[0].as_atom(), Some("head"));
    assert_eq!(items[0].as_list(), None);
}

#[test]
fn test_sexp_serde_round_trip() {
    let tree = parse_str("(add (add2 foo))").unwrap();
    let json = serde_json::to_string(&tree).unwrap();
    let back: Sexp = serde_json::from_str(&json).unwrap();
    assert_eq!(tree, back);
}

#[test]
fn test_malformed_utf8_does_not_panic() {
    // Invalid bytes inside an atom decode lossily rather than crashing.
    let result = parse_bytes(&[b'(', 0xFF, b')']);
    let items = result.unwrap().into_list().unwrap();
    assert_eq!(items, vec![atom("\u{FFFD}")]);
}
