// Copyright 2026 The viewml Project Developers. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The error taxonomy. Every error is fatal: translation stops at the
//! first one and no partial output is produced.

use std::fmt;

use crate::tokenizer::states::State;
use crate::Name;

/// Tokenizer error codes, named after the HTML specification's parse
/// errors where one exists.
#[derive(PartialEq, Eq, Copy, Clone, Hash, Debug)]
pub enum ErrorCode {
    UnexpectedQuestionMarkInsteadOfTagName,
    EofBeforeTagName,
    InvalidFirstCharacterOfTagName,
    MissingEndTagName,
    EofInTag,
    UnexpectedEqualsSignBeforeAttributeName,
    UnexpectedCharacterInAttributeName,
    MissingAttributeValue,
    UnexpectedCharacterInUnquotedAttributeValue,
    MissingWhitespaceBetweenAttributes,
    UnexpectedSolidusInTag,
    IncorrectlyOpenedComment,
    AbruptClosingOfEmptyComment,
    EofInComment,
    NestedComment,
    IncorrectlyClosedComment,
    EofInCode,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::UnexpectedQuestionMarkInsteadOfTagName => {
                "unexpected-question-mark-instead-of-tag-name"
            }
            ErrorCode::EofBeforeTagName => "eof-before-tag-name",
            ErrorCode::InvalidFirstCharacterOfTagName => "invalid-first-character-of-tag-name",
            ErrorCode::MissingEndTagName => "missing-end-tag-name",
            ErrorCode::EofInTag => "eof-in-tag",
            ErrorCode::UnexpectedEqualsSignBeforeAttributeName => {
                "unexpected-equals-sign-before-attribute-name"
            }
            ErrorCode::UnexpectedCharacterInAttributeName => {
                "unexpected-character-in-attribute-name"
            }
            ErrorCode::MissingAttributeValue => "missing-attribute-value",
            ErrorCode::UnexpectedCharacterInUnquotedAttributeValue => {
                "unexpected-character-in-unquoted-attribute-value"
            }
            ErrorCode::MissingWhitespaceBetweenAttributes => {
                "missing-whitespace-between-attributes"
            }
            ErrorCode::UnexpectedSolidusInTag => "unexpected-solidus-in-tag",
            ErrorCode::IncorrectlyOpenedComment => "incorrectly-opened-comment",
            ErrorCode::AbruptClosingOfEmptyComment => "abrupt-closing-of-empty-comment",
            ErrorCode::EofInComment => "eof-in-comment",
            ErrorCode::NestedComment => "nested-comment",
            ErrorCode::IncorrectlyClosedComment => "incorrectly-closed-comment",
            ErrorCode::EofInCode => "eof-in-code",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fatal tokenizer error: the state it occurred in and, where it adds
/// information, the offending code point.
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct ParseError {
    pub state: State,
    pub code: ErrorCode,
    pub found: Option<char>,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "error in {:?}: {}", self.state, self.code)?;
        if let Some(c) = self.found {
            write!(f, " {c:?}")?;
        }
        Ok(())
    }
}

/// Any failure of the translation pipeline.
#[derive(PartialEq, Eq, Clone, Debug)]
pub enum Error {
    /// The tokenizer hit a fatal state transition.
    Parse(ParseError),
    /// No start tag before the end of input.
    NoRoot,
    /// An end tag tried to close an element of a different name.
    MismatchedEndTag { expected: Name, found: Name },
    /// The token stream ran out with an element still open.
    EofInElement { name: Name },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Parse(e) => e.fmt(f),
            Error::NoRoot => f.write_str("must be an HTML element or a Component"),
            Error::MismatchedEndTag { expected, found } => {
                write!(f, "mismatched-end-tag: expected </{expected}>, found </{found}>")
            }
            Error::EofInElement { name } => {
                write!(f, "error in element <{name}>: eof-in-element")
            }
        }
    }
}

impl std::error::Error for Error {}

impl From<ParseError> for Error {
    fn from(e: ParseError) -> Error {
        Error::Parse(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::states;

    #[test]
    fn parse_error_display() {
        let err = Error::Parse(ParseError {
            state: states::TagName,
            code: ErrorCode::EofInTag,
            found: None,
        });
        assert_eq!(err.to_string(), "error in TagName: eof-in-tag");
    }

    #[test]
    fn parse_error_display_with_code_point() {
        let err = Error::Parse(ParseError {
            state: states::AttributeName,
            code: ErrorCode::UnexpectedCharacterInAttributeName,
            found: Some('"'),
        });
        assert_eq!(
            err.to_string(),
            "error in AttributeName: unexpected-character-in-attribute-name '\"'"
        );
    }

    #[test]
    fn builder_error_display() {
        assert_eq!(
            Error::NoRoot.to_string(),
            "must be an HTML element or a Component"
        );
    }
}
