// Copyright 2026 The viewml Project Developers. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use tendril::StrTendril;

use crate::Name;

/// Source span of a token, 1-indexed, counted in code points.
#[derive(PartialEq, Eq, Copy, Clone, Debug, Default)]
pub struct Position {
    pub start_line: u32,
    pub start_column: u32,
    pub end_line: u32,
    pub end_column: u32,
}

/// The kinds a tag attribute can take, decided during lexing.
#[derive(PartialEq, Eq, Copy, Clone, Hash, Debug)]
pub enum AttrKind {
    /// Plain `name="value"`.
    Normal,
    /// Name-only; carries a component's positional argument name.
    Argument,
    /// `on:event={…}`.
    Event,
    /// `name:value={…}`, any other name containing a colon.
    Dynamic,
    /// One of the configured keyword names (`if`, `each`, `key`).
    Keyword,
}

/// A single attribute on a start tag.
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct Attribute {
    pub kind: AttrKind,
    pub name: Name,
    pub value: StrTendril,
    /// Line and column of the first name code point.
    pub name_position: (u32, u32),
    /// Line and column where the value began; `None` for name-only
    /// attributes.
    pub value_position: Option<(u32, u32)>,
}

/// A token produced by the tokenizer. One variant per kind; fields only
/// where meaningful.
#[derive(PartialEq, Eq, Clone, Debug)]
pub enum Token {
    StartTag {
        name: Name,
        /// True iff the first code point of the name was upper-alpha.
        is_component: bool,
        is_self_closing: bool,
        attrs: Vec<Attribute>,
        position: Position,
    },
    EndTag {
        name: Name,
        position: Position,
    },
    Comment {
        data: StrTendril,
        position: Position,
    },
    Text {
        data: StrTendril,
        position: Position,
    },
    /// A brace-delimited code fragment in data position, outermost
    /// braces excluded.
    Code {
        data: StrTendril,
        position: Position,
    },
    EndOfFile {
        position: Position,
    },
}

impl Token {
    pub fn position(&self) -> Position {
        match self {
            Token::StartTag { position, .. }
            | Token::EndTag { position, .. }
            | Token::Comment { position, .. }
            | Token::Text { position, .. }
            | Token::Code { position, .. }
            | Token::EndOfFile { position } => *position,
        }
    }
}
