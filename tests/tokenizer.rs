// Copyright 2026 The viewml Project Developers. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use pretty_assertions::assert_eq;

use viewml::tokenizer::{AttrKind, Token, Tokenizer, TokenizerOpts};
use viewml::{Error, ErrorCode};

fn tokenize(source: &str) -> Result<Vec<Token>, Error> {
    Tokenizer::new(source, TokenizerOpts::default()).run()
}

fn tokens(source: &str) -> Vec<Token> {
    tokenize(source).expect("should tokenize")
}

fn error_code(source: &str) -> ErrorCode {
    match tokenize(source) {
        Err(Error::Parse(e)) => e.code,
        other => panic!("expected a tokenizer error, got {other:?}"),
    }
}

#[test]
fn simple_element() {
    let tokens = tokens("<div>hello</div>");
    assert_eq!(tokens.len(), 4);
    match &tokens[0] {
        Token::StartTag {
            name,
            is_component,
            is_self_closing,
            attrs,
            ..
        } => {
            assert_eq!(&**name, "div");
            assert!(!is_component);
            assert!(!is_self_closing);
            assert!(attrs.is_empty());
        }
        other => panic!("expected a start tag, got {other:?}"),
    }
    match &tokens[1] {
        Token::Text { data, .. } => assert_eq!(&**data, "hello"),
        other => panic!("expected text, got {other:?}"),
    }
    match &tokens[2] {
        Token::EndTag { name, .. } => assert_eq!(&**name, "div"),
        other => panic!("expected an end tag, got {other:?}"),
    }
    assert!(matches!(tokens[3], Token::EndOfFile { .. }));
}

#[test]
fn self_closing_component() {
    let tokens = tokens("<Li/>");
    match &tokens[0] {
        Token::StartTag {
            name,
            is_component,
            is_self_closing,
            ..
        } => {
            assert_eq!(&**name, "Li");
            assert!(is_component);
            assert!(is_self_closing);
        }
        other => panic!("expected a start tag, got {other:?}"),
    }
}

#[test]
fn tag_name_case_folding() {
    // The first code point keeps its case and decides component-ness;
    // every later upper-alpha code point is folded down.
    let tokens = tokens("<DIv>x</DIv>");
    match &tokens[0] {
        Token::StartTag {
            name, is_component, ..
        } => {
            assert_eq!(&**name, "Div");
            assert!(is_component);
        }
        other => panic!("expected a start tag, got {other:?}"),
    }
    match &tokens[2] {
        Token::EndTag { name, .. } => assert_eq!(&**name, "Div"),
        other => panic!("expected an end tag, got {other:?}"),
    }
}

#[test]
fn attribute_names_are_lowercased() {
    let tokens = tokens(r#"<div CLASS="x">"#);
    match &tokens[0] {
        Token::StartTag { attrs, .. } => {
            assert_eq!(&*attrs[0].name, "class");
            assert_eq!(&*attrs[0].value, "x");
        }
        other => panic!("expected a start tag, got {other:?}"),
    }
}

#[test]
fn attribute_value_styles() {
    let tokens = tokens(r#"<div a="1" b='2' c=3>"#);
    match &tokens[0] {
        Token::StartTag { attrs, .. } => {
            assert_eq!(attrs.len(), 3);
            for (attr, (name, value)) in attrs.iter().zip([("a", "1"), ("b", "2"), ("c", "3")]) {
                assert_eq!(attr.kind, AttrKind::Normal);
                assert_eq!(&*attr.name, name);
                assert_eq!(&*attr.value, value);
                assert!(attr.value_position.is_some());
            }
        }
        other => panic!("expected a start tag, got {other:?}"),
    }
}

#[test]
fn attribute_kind_classification() {
    let tokens = tokens("<ul each={cF} key={kF} if={f} on:click={h} class:dark={d} arg >");
    match &tokens[0] {
        Token::StartTag { attrs, .. } => {
            let kinds: Vec<(String, AttrKind)> = attrs
                .iter()
                .map(|a| (a.name.to_string(), a.kind))
                .collect();
            assert_eq!(
                kinds,
                vec![
                    ("each".to_string(), AttrKind::Keyword),
                    ("key".to_string(), AttrKind::Keyword),
                    ("if".to_string(), AttrKind::Keyword),
                    ("on:click".to_string(), AttrKind::Event),
                    ("class:dark".to_string(), AttrKind::Dynamic),
                    ("arg".to_string(), AttrKind::Argument),
                ]
            );
        }
        other => panic!("expected a start tag, got {other:?}"),
    }
}

#[test]
fn keyword_classification_peeks_a_prefix() {
    // Classification peeks on entry to the attribute name; a name that
    // merely starts like a keyword is still marked as one.
    let tokens = tokens("<div iffy={x}>");
    match &tokens[0] {
        Token::StartTag { attrs, .. } => {
            assert_eq!(&*attrs[0].name, "iffy");
            assert_eq!(attrs[0].kind, AttrKind::Keyword);
        }
        other => panic!("expected a start tag, got {other:?}"),
    }
}

#[test]
fn event_wins_over_keyword_and_survives_colons() {
    let tokens = tokens("<div on:if={x}>");
    match &tokens[0] {
        Token::StartTag { attrs, .. } => {
            assert_eq!(&*attrs[0].name, "on:if");
            assert_eq!(attrs[0].kind, AttrKind::Event);
        }
        other => panic!("expected a start tag, got {other:?}"),
    }
}

#[test]
fn name_only_attribute_without_whitespace_stays_normal() {
    // `count` runs straight into `/`, so the whitespace demotion never
    // fires; it stays a Normal attribute with an empty value.
    let tokens = tokens("<Button count/>");
    match &tokens[0] {
        Token::StartTag { attrs, .. } => {
            assert_eq!(&*attrs[0].name, "count");
            assert_eq!(attrs[0].kind, AttrKind::Normal);
            assert_eq!(&*attrs[0].value, "");
            assert_eq!(attrs[0].value_position, None);
        }
        other => panic!("expected a start tag, got {other:?}"),
    }
}

#[test]
fn name_only_attribute_with_whitespace_becomes_argument() {
    let tokens = tokens("<Button count />");
    match &tokens[0] {
        Token::StartTag { attrs, .. } => {
            assert_eq!(attrs[0].kind, AttrKind::Argument);
            assert_eq!(attrs[0].value_position, None);
        }
        other => panic!("expected a start tag, got {other:?}"),
    }
}

#[test]
fn demotion_is_undone_when_an_equals_sign_follows() {
    let tokens = tokens(r#"<div class = "x">"#);
    match &tokens[0] {
        Token::StartTag { attrs, .. } => {
            assert_eq!(&*attrs[0].name, "class");
            assert_eq!(attrs[0].kind, AttrKind::Normal);
            assert_eq!(&*attrs[0].value, "x");
        }
        other => panic!("expected a start tag, got {other:?}"),
    }
}

#[test]
fn code_capture_excludes_outer_braces_and_balances_inner_ones() {
    let tokens = tokens(r#"<div>{ f(map[string]int{"a": 1}) }</div>"#);
    match &tokens[1] {
        Token::Code { data, .. } => {
            assert_eq!(&**data, r#" f(map[string]int{"a": 1}) "#);
        }
        other => panic!("expected code, got {other:?}"),
    }
}

#[test]
fn attribute_value_code_capture() {
    let tokens = tokens("<ul each={ func() { return items } }>");
    match &tokens[0] {
        Token::StartTag { attrs, .. } => {
            assert_eq!(attrs[0].kind, AttrKind::Keyword);
            assert_eq!(&*attrs[0].value, " func() { return items } ");
        }
        other => panic!("expected a start tag, got {other:?}"),
    }
}

#[test]
fn interior_whitespace_is_kept_before_code() {
    let tokens = tokens("<div>Value: {count.Get()}</div>");
    match &tokens[1] {
        Token::Text { data, .. } => assert_eq!(&**data, "Value: "),
        other => panic!("expected text, got {other:?}"),
    }
    match &tokens[2] {
        Token::Code { data, .. } => assert_eq!(&**data, "count.Get()"),
        other => panic!("expected code, got {other:?}"),
    }
}

#[test]
fn trailing_whitespace_is_dropped_before_markup() {
    let tokens = tokens("<div>  hello  </div>");
    match &tokens[1] {
        Token::Text { data, .. } => assert_eq!(&**data, "hello"),
        other => panic!("expected text, got {other:?}"),
    }
}

#[test]
fn comment_token() {
    let tokens = tokens("<div><!-- note --></div>");
    match &tokens[1] {
        Token::Comment { data, .. } => assert_eq!(&**data, " note "),
        other => panic!("expected a comment, got {other:?}"),
    }
}

#[test]
fn positions_on_one_line() {
    let tokens = tokens("<div>hello</div>");
    let start = tokens[0].position();
    assert_eq!(
        (start.start_line, start.start_column, start.end_line, start.end_column),
        (1, 1, 1, 5)
    );
    let text = tokens[1].position();
    assert_eq!(
        (text.start_line, text.start_column, text.end_line, text.end_column),
        (1, 6, 1, 10)
    );
    let end = tokens[2].position();
    assert_eq!(
        (end.start_line, end.start_column, end.end_line, end.end_column),
        (1, 11, 1, 16)
    );
}

#[test]
fn positions_across_lines() {
    let tokens = tokens("<div>\n  hi\n</div>");
    let text = tokens[1].position();
    assert_eq!(
        (text.start_line, text.start_column, text.end_line, text.end_column),
        (2, 3, 2, 4)
    );
    let end = tokens[2].position();
    assert_eq!(
        (end.start_line, end.start_column, end.end_line, end.end_column),
        (3, 1, 3, 6)
    );
}

#[test]
fn token_positions_cover_their_source_spans() {
    let source = "<div>hello</div>";
    let tokens = tokens(source);
    let chars: Vec<char> = source.chars().collect();
    let spans: Vec<String> = tokens[..3]
        .iter()
        .map(|t| {
            let p = t.position();
            chars[(p.start_column - 1) as usize..p.end_column as usize]
                .iter()
                .collect()
        })
        .collect();
    assert_eq!(spans, vec!["<div>", "hello", "</div>"]);
}

#[test]
fn the_token_stream_ends_with_end_of_file() {
    for source in ["<div></div>", "<input/>", "<div>x</div>", "<div>{c}</div>"] {
        let tokens = tokens(source);
        assert!(
            matches!(tokens.last(), Some(Token::EndOfFile { .. })),
            "no trailing EOF for {source:?}"
        );
    }
}

#[test]
fn custom_keyword_set() {
    let opts = TokenizerOpts {
        keyword_attribute_names: vec!["when".to_string()],
        ..Default::default()
    };
    let tokens = Tokenizer::new("<div when={c} if={c}>", opts)
        .run()
        .expect("should tokenize");
    match &tokens[0] {
        Token::StartTag { attrs, .. } => {
            assert_eq!(attrs[0].kind, AttrKind::Keyword);
            assert_eq!(attrs[1].kind, AttrKind::Normal);
        }
        other => panic!("expected a start tag, got {other:?}"),
    }
}

#[test]
fn tag_errors() {
    assert_eq!(error_code("<>"), ErrorCode::InvalidFirstCharacterOfTagName);
    assert_eq!(error_code("<?xml>"), ErrorCode::UnexpectedQuestionMarkInsteadOfTagName);
    assert_eq!(error_code("<"), ErrorCode::EofBeforeTagName);
    assert_eq!(error_code("</"), ErrorCode::EofBeforeTagName);
    assert_eq!(error_code("</>"), ErrorCode::MissingEndTagName);
    assert_eq!(error_code("<div"), ErrorCode::EofInTag);
    assert_eq!(error_code("<div a"), ErrorCode::EofInTag);
    assert_eq!(error_code("<div/ >"), ErrorCode::UnexpectedSolidusInTag);
}

#[test]
fn attribute_errors() {
    assert_eq!(
        error_code("<div =x>"),
        ErrorCode::UnexpectedEqualsSignBeforeAttributeName
    );
    assert_eq!(
        error_code(r#"<div a"b>"#),
        ErrorCode::UnexpectedCharacterInAttributeName
    );
    assert_eq!(error_code("<div a=>"), ErrorCode::MissingAttributeValue);
    assert_eq!(
        error_code("<div a=b\"c>"),
        ErrorCode::UnexpectedCharacterInUnquotedAttributeValue
    );
    assert_eq!(
        error_code(r#"<div a="1"b>"#),
        ErrorCode::MissingWhitespaceBetweenAttributes
    );
    assert_eq!(
        error_code("<div a={f}b>"),
        ErrorCode::MissingWhitespaceBetweenAttributes
    );
}

#[test]
fn code_errors() {
    assert_eq!(error_code("<div>{x"), ErrorCode::EofInCode);
    assert_eq!(error_code("<div {"), ErrorCode::EofInCode);
    assert_eq!(error_code("<div>{ f({}) "), ErrorCode::EofInCode);
}

#[test]
fn comment_errors() {
    assert_eq!(error_code("<!x>"), ErrorCode::IncorrectlyOpenedComment);
    assert_eq!(error_code("<!-->"), ErrorCode::AbruptClosingOfEmptyComment);
    assert_eq!(error_code("<!--->"), ErrorCode::AbruptClosingOfEmptyComment);
    assert_eq!(error_code("<!--"), ErrorCode::EofInComment);
    assert_eq!(error_code("<!-- a"), ErrorCode::EofInComment);
    assert_eq!(error_code("<!-- a <!-- b -->"), ErrorCode::NestedComment);
    assert_eq!(error_code("<!--x--!>"), ErrorCode::IncorrectlyClosedComment);
}
