// Copyright 2026 The viewml Project Developers. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The template tokenizer.
//!
//! An explicit state machine following the HTML tokenization algorithm
//! for tags, attributes and comments, extended with states that carve
//! brace-delimited code fragments out of data and attribute-value
//! position. Unlike an HTML tokenizer it is strict: every transition
//! the HTML spec flags as a parse error is fatal here.

pub use self::input::InputStream;
pub use self::interface::{AttrKind, Attribute, Position, Token};

use self::states::{AttrValueCode, TextCode};
use self::states::{DoubleQuoted, SingleQuoted, Unquoted};

use crate::error::{Error, ErrorCode, ParseError};
use crate::util::str::{is_name_start, is_space, is_upper_alpha, push_lowercase};
use crate::Name;

use log::{debug, trace};
use std::collections::BTreeMap;
use std::mem;
use tendril::StrTendril;

mod input;
mod interface;
pub mod states;

/// The attribute names lexed as keyword attributes unless overridden.
pub static DEFAULT_KEYWORD_ATTRIBUTE_NAMES: phf::Set<&'static str> = phf::phf_set! {
    "if",
    "each",
    "key",
};

/// Tokenizer options, with an impl for `Default`.
#[derive(Clone)]
pub struct TokenizerOpts {
    /// Attribute names classified as keyword attributes. Default:
    /// `if`, `each`, `key`.
    pub keyword_attribute_names: Vec<String>,

    /// Keep a record of how long we spent in each state?  Printed when
    /// tokenization ends.  Default: false
    pub profile: bool,
}

impl Default for TokenizerOpts {
    fn default() -> TokenizerOpts {
        TokenizerOpts {
            keyword_attribute_names: DEFAULT_KEYWORD_ATTRIBUTE_NAMES
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
            profile: false,
        }
    }
}

#[derive(PartialEq, Eq, Copy, Clone, Hash, Debug)]
enum TagKind {
    StartTag,
    EndTag,
}

/// The template tokenizer.
pub struct Tokenizer {
    /// Options controlling the behavior of the tokenizer.
    opts: TokenizerOpts,

    /// The abstract machine state.
    state: states::State,

    input: InputStream,

    /// Tokens emitted so far; handed over wholesale when done.
    tokens: Vec<Token>,

    /// Current tag kind.
    current_tag_kind: TagKind,

    /// Current tag name.
    current_tag_name: StrTendril,

    /// Did the current tag name open with an upper-alpha code point?
    current_tag_is_component: bool,

    /// Current tag is self-closing?
    current_tag_self_closing: bool,

    /// Current tag attributes.
    current_tag_attrs: Vec<Attribute>,

    /// Current attribute kind, name and value.
    current_attr_kind: AttrKind,
    current_attr_name: StrTendril,
    current_attr_value: StrTendril,
    current_attr_name_position: (u32, u32),
    current_attr_value_position: Option<(u32, u32)>,

    /// Kind the current attribute had before a whitespace demotion to
    /// Argument; restored if an `=` turns up after all.
    current_attr_demoted_from: Option<AttrKind>,

    /// Current comment, text and code buffers.
    current_comment: StrTendril,
    current_text: StrTendril,
    current_code: StrTendril,

    /// Whitespace seen inside text, held back until we know whether the
    /// run continues.
    pending_space: StrTendril,

    /// Start position of the token being built.
    token_start: (u32, u32),

    /// Brace nesting depth inside a code capture.
    code_indent: u32,

    /// Record of how many ns we spent in each state, if profiling is
    /// enabled.
    state_profile: BTreeMap<states::State, u64>,
}

// Shorthand for common state machine behaviors.
macro_rules! shorthand (
    ( $me:ident : create_tag $kind:ident   ) => ( $me.create_tag(TagKind::$kind)                       );
    ( $me:ident : push_tag $c:expr         ) => ( $me.current_tag_name.push_char($c)                   );
    ( $me:ident : push_tag_lower $c:expr   ) => ( push_lowercase(&mut $me.current_tag_name, $c)        );
    ( $me:ident : set_component            ) => ( $me.current_tag_is_component = true                  );
    ( $me:ident : set_self_closing         ) => ( $me.current_tag_self_closing = true                  );
    ( $me:ident : create_attr $c:expr      ) => ( $me.create_attribute($c)                             );
    ( $me:ident : create_code_attr         ) => ( $me.create_code_attribute()                          );
    ( $me:ident : push_name $c:expr        ) => ( push_lowercase(&mut $me.current_attr_name, $c)       );
    ( $me:ident : push_value $c:expr       ) => ( $me.current_attr_value.push_char($c)                 );
    ( $me:ident : mark_value               ) => ( $me.mark_attr_value()                                );
    ( $me:ident : demote_attr              ) => ( $me.demote_attribute()                               );
    ( $me:ident : restore_attr             ) => ( $me.restore_attribute()                              );
    ( $me:ident : create_text              ) => ( $me.create_text()                                    );
    ( $me:ident : push_text $c:expr        ) => ( $me.current_text.push_char($c)                       );
    ( $me:ident : push_space $c:expr       ) => ( $me.pending_space.push_char($c)                      );
    ( $me:ident : flush_space              ) => ( $me.flush_pending_space()                            );
    ( $me:ident : drop_space               ) => ( $me.pending_space.clear()                            );
    ( $me:ident : emit_text                ) => ( $me.emit_current_text()                              );
    ( $me:ident : create_code              ) => ( $me.create_code()                                    );
    ( $me:ident : reset_code               ) => ( $me.code_indent = 0                                  );
    ( $me:ident : push_code $k:ident $c:expr ) => ( $me.append_code($k, $c)                            );
    ( $me:ident : bump_code                ) => ( $me.code_indent += 1                                 );
    ( $me:ident : unbump_code              ) => ( $me.code_indent -= 1                                 );
    ( $me:ident : emit_code                ) => ( $me.emit_current_code()                              );
    ( $me:ident : push_comment $c:expr     ) => ( $me.current_comment.push_char($c)                    );
    ( $me:ident : append_comment $s:expr   ) => ( $me.current_comment.push_slice($s)                   );
    ( $me:ident : emit_comment             ) => ( $me.emit_current_comment()                           );
    ( $me:ident : emit_eof                 ) => ( $me.emit_eof()                                       );
);

// A little DSL for sequencing shorthand actions.
macro_rules! go (
    // A pattern like $($cmd:tt)* ; $($rest:tt)* causes parse ambiguity.
    // We have to tell the parser how much lookahead we need.

    ( $me:ident : $a:tt                   ; $($rest:tt)* ) => ({ shorthand!($me: $a);          go!($me: $($rest)*); });
    ( $me:ident : $a:tt $b:tt             ; $($rest:tt)* ) => ({ shorthand!($me: $a $b);       go!($me: $($rest)*); });
    ( $me:ident : $a:tt $b:tt $c:tt       ; $($rest:tt)* ) => ({ shorthand!($me: $a $b $c);    go!($me: $($rest)*); });

    // These can only come at the end.

    ( $me:ident : to $s:ident           ) => ({ $me.state = states::$s; return Ok(());      });
    ( $me:ident : to $s:ident $k1:expr  ) => ({ $me.state = states::$s($k1); return Ok(()); });

    ( $me:ident : reconsume $s:ident          ) => ({ $me.input.reconsume(); go!($me: to $s);     });
    ( $me:ident : reconsume $s:ident $k1:expr ) => ({ $me.input.reconsume(); go!($me: to $s $k1); });

    ( $me:ident : emit_tag $s:ident ) => ({ $me.emit_current_tag(); go!($me: to $s); });

    ( $me:ident : error $code:ident ) => ({ return Err($me.fatal(ErrorCode::$code)); });
    ( $me:ident : error_char $code:ident $c:expr ) => ({ return Err($me.fatal_char(ErrorCode::$code, $c)); });

    // If nothing else matched, it's a single command
    ( $me:ident : $($cmd:tt)+ ) => ( shorthand!($me: $($cmd)+) );

    // or nothing.
    ( $me:ident : ) => (());
);

impl Tokenizer {
    /// Create a new tokenizer over `source`.
    pub fn new(source: &str, opts: TokenizerOpts) -> Tokenizer {
        Tokenizer {
            opts,
            state: states::Data,
            input: InputStream::new(source),
            tokens: vec![],
            current_tag_kind: TagKind::StartTag,
            current_tag_name: StrTendril::new(),
            current_tag_is_component: false,
            current_tag_self_closing: false,
            current_tag_attrs: vec![],
            current_attr_kind: AttrKind::Normal,
            current_attr_name: StrTendril::new(),
            current_attr_value: StrTendril::new(),
            current_attr_name_position: (0, 0),
            current_attr_value_position: None,
            current_attr_demoted_from: None,
            current_comment: StrTendril::new(),
            current_text: StrTendril::new(),
            current_code: StrTendril::new(),
            pending_space: StrTendril::new(),
            token_start: (0, 0),
            code_indent: 0,
            state_profile: BTreeMap::new(),
        }
    }

    /// Run the state machine to completion and hand over the tokens.
    pub fn run(mut self) -> Result<Vec<Token>, Error> {
        debug!(
            "tokenizing with keyword attributes {:?}",
            self.opts.keyword_attribute_names
        );
        while self.state != states::EndOfFile {
            if self.opts.profile {
                let state = self.state;
                let (result, dt) = time!(self.step());
                *self.state_profile.entry(state).or_insert(0) += dt;
                result?;
            } else {
                self.step()?;
            }
        }
        if self.opts.profile {
            self.dump_profile();
        }
        Ok(self.tokens)
    }

    fn dump_profile(&self) {
        let mut results: Vec<(states::State, u64)> =
            self.state_profile.iter().map(|(s, t)| (*s, *t)).collect();
        results.sort_by(|&(_, x), &(_, y)| y.cmp(&x));

        let total: u64 = results.iter().map(|&(_, t)| t).sum();
        println!("\nTokenizer profile, in nanoseconds");
        println!("\n{total:12}         total in tokenizer");
        for (k, v) in results.into_iter() {
            let pct = 100.0 * (v as f64) / (total as f64);
            println!("{v:12}  {pct:4.1}%  {k:?}");
        }
    }

    /// Line and column of the most recently consumed code point.
    fn pos(&self) -> (u32, u32) {
        (self.input.line(), self.input.column())
    }

    fn fatal(&self, code: ErrorCode) -> Error {
        Error::Parse(ParseError {
            state: self.state,
            code,
            found: None,
        })
    }

    fn fatal_char(&self, code: ErrorCode, c: char) -> Error {
        Error::Parse(ParseError {
            state: self.state,
            code,
            found: Some(c),
        })
    }

    fn emit_token(&mut self, token: Token) {
        debug!("emitting {token:?}");
        self.tokens.push(token);
    }

    fn create_tag(&mut self, kind: TagKind) {
        self.current_tag_kind = kind;
        self.current_tag_name.clear();
        self.current_tag_is_component = false;
        self.current_tag_self_closing = false;
        self.current_tag_attrs.clear();
        self.token_start = self.pos();
    }

    fn emit_current_tag(&mut self) {
        self.finish_attribute();

        let name = Name::from(&*self.current_tag_name);
        self.current_tag_name.clear();

        let (end_line, end_column) = self.pos();
        let (start_line, start_column) = self.token_start;
        let attrs = mem::take(&mut self.current_tag_attrs);

        let token = match self.current_tag_kind {
            TagKind::StartTag => Token::StartTag {
                name,
                is_component: self.current_tag_is_component,
                is_self_closing: self.current_tag_self_closing,
                attrs,
                position: Position {
                    start_line,
                    // cover the `<` consumed before the token existed
                    start_column: start_column - 1,
                    end_line,
                    end_column,
                },
            },
            TagKind::EndTag => {
                if !attrs.is_empty() {
                    debug!("dropping {} attributes on an end tag", attrs.len());
                }
                Token::EndTag {
                    name,
                    position: Position {
                        start_line,
                        // cover the `</`
                        start_column: start_column - 2,
                        end_line,
                        end_column,
                    },
                }
            }
        };
        self.emit_token(token);
    }

    /// Classify a freshly created attribute from its first name code
    /// point (already consumed) and what follows it. Keyword names are
    /// checked first; `on` wins over them.
    fn classify_attribute(&self, c: char) -> AttrKind {
        let mut kind = AttrKind::Normal;
        for keyword in &self.opts.keyword_attribute_names {
            let mut rest = keyword.chars();
            if rest.next() == Some(c) && self.input.looking_at(rest.as_str()) {
                kind = AttrKind::Keyword;
            }
        }
        if c == 'o' && self.input.looking_at("n") {
            kind = AttrKind::Event;
        }
        kind
    }

    fn create_attribute(&mut self, c: char) {
        self.finish_attribute();
        self.current_attr_kind = self.classify_attribute(c);
        self.current_attr_name_position = self.pos();
        self.current_attr_value_position = None;
        self.current_attr_demoted_from = None;
    }

    /// A name-less attribute holding only a code value; what `{` in
    /// before-attribute-name position opens.
    fn create_code_attribute(&mut self) {
        self.finish_attribute();
        self.current_attr_kind = AttrKind::Normal;
        self.current_attr_name_position = self.pos();
        self.current_attr_value_position = Some(self.pos());
        self.current_attr_demoted_from = None;
        self.code_indent = 0;
    }

    fn finish_attribute(&mut self) {
        if self.current_attr_name.is_empty() && self.current_attr_value_position.is_none() {
            return;
        }
        let name = Name::from(&*self.current_attr_name);
        self.current_attr_name.clear();
        self.current_tag_attrs.push(Attribute {
            kind: self.current_attr_kind,
            name,
            value: mem::take(&mut self.current_attr_value),
            name_position: self.current_attr_name_position,
            value_position: self.current_attr_value_position,
        });
        self.current_attr_kind = AttrKind::Normal;
        self.current_attr_value_position = None;
        self.current_attr_demoted_from = None;
    }

    fn mark_attr_value(&mut self) {
        if self.current_attr_value_position.is_none() {
            self.current_attr_value_position = Some(self.pos());
        }
    }

    /// The name ended at whitespace without an `=` so far; a name-only
    /// attribute until proven otherwise.
    fn demote_attribute(&mut self) {
        self.current_attr_demoted_from = Some(self.current_attr_kind);
        self.current_attr_kind = AttrKind::Argument;
    }

    /// An `=` arrived after all; undo the whitespace demotion.
    fn restore_attribute(&mut self) {
        if let Some(kind) = self.current_attr_demoted_from.take() {
            self.current_attr_kind = kind;
        }
    }

    fn create_text(&mut self) {
        self.current_text.clear();
        self.pending_space.clear();
        self.token_start = self.pos();
    }

    fn flush_pending_space(&mut self) {
        let space = mem::take(&mut self.pending_space);
        self.current_text.push_tendril(&space);
    }

    fn emit_current_text(&mut self) {
        let data = mem::take(&mut self.current_text);
        let (start_line, start_column) = self.token_start;

        // End position is recomputed from the data itself.
        let mut end_line = start_line;
        let mut end_column = start_column;
        for c in data.chars() {
            end_column += 1;
            if c == '\n' {
                end_line += 1;
                end_column = 1;
            }
        }
        end_column -= 1;

        self.emit_token(Token::Text {
            data,
            position: Position {
                start_line,
                start_column,
                end_line,
                end_column,
            },
        });
    }

    fn create_code(&mut self) {
        self.current_code.clear();
        self.code_indent = 0;
        self.token_start = self.pos();
    }

    /// Drain one captured code point to wherever this capture belongs.
    fn append_code(&mut self, kind: states::CodeKind, c: char) {
        match kind {
            TextCode => self.current_code.push_char(c),
            AttrValueCode => self.current_attr_value.push_char(c),
        }
    }

    fn emit_current_code(&mut self) {
        let data = mem::take(&mut self.current_code);
        let (start_line, start_column) = self.token_start;
        let (end_line, end_column) = self.pos();
        self.emit_token(Token::Code {
            data,
            position: Position {
                start_line,
                start_column,
                end_line,
                end_column,
            },
        });
    }

    fn emit_current_comment(&mut self) {
        let data = mem::take(&mut self.current_comment);
        let (start_line, start_column) = self.token_start;
        let (end_line, end_column) = self.pos();
        self.emit_token(Token::Comment {
            data,
            position: Position {
                start_line,
                // cover the `<` of `<!--`
                start_column: start_column - 1,
                end_line,
                end_column,
            },
        });
    }

    fn emit_eof(&mut self) {
        let (line, column) = self.pos();
        self.emit_token(Token::EndOfFile {
            position: Position {
                start_line: line,
                start_column: column,
                end_line: line,
                end_column: column,
            },
        });
    }
}

impl Tokenizer {
    /// Run the state machine until the next state transition.
    fn step(&mut self) -> Result<(), Error> {
        trace!("processing in state {:?}", self.state);
        match self.state {
            //§ data-state
            states::Data => loop {
                match self.input.next() {
                    Some(c) if is_space(c) => (),
                    Some('{') => go!(self: create_code; to BeforeCode TextCode),
                    Some('<') => go!(self: to TagOpen),
                    Some(_) => go!(self: create_text; reconsume Text),
                    None => go!(self: emit_eof; to EndOfFile),
                }
            },

            //§ text-state (not in the HTML spec)
            // Whitespace is held back so a trailing run of it can be
            // dropped before markup, but kept before a code fragment.
            states::Text => loop {
                match self.input.next() {
                    Some(c) if is_space(c) => go!(self: push_space c),
                    Some('{') => go!(self: flush_space; emit_text; reconsume Data),
                    Some('<') => go!(self: drop_space; emit_text; reconsume Data),
                    Some(c) => go!(self: flush_space; push_text c),
                    None => go!(self: drop_space; emit_text; emit_eof; to EndOfFile),
                }
            },

            //§ tag-open-state
            states::TagOpen => loop {
                match self.input.next() {
                    Some(c) if is_name_start(c) => go!(self: create_tag StartTag; reconsume TagName),
                    Some('!') => go!(self: to MarkupDeclarationOpen),
                    Some('/') => go!(self: to EndTagOpen),
                    Some('?') => go!(self: error UnexpectedQuestionMarkInsteadOfTagName),
                    None => go!(self: error EofBeforeTagName),
                    Some(c) => go!(self: error_char InvalidFirstCharacterOfTagName c),
                }
            },

            //§ end-tag-open-state
            states::EndTagOpen => loop {
                match self.input.next() {
                    Some(c) if is_name_start(c) => go!(self: create_tag EndTag; reconsume TagName),
                    Some('>') => go!(self: error MissingEndTagName),
                    None => go!(self: error EofBeforeTagName),
                    Some(c) => go!(self: error_char InvalidFirstCharacterOfTagName c),
                }
            },

            //§ tag-name-state
            states::TagName => loop {
                match self.input.next() {
                    Some(c) if is_space(c) => go!(self: to BeforeAttributeName),
                    Some(c) if is_upper_alpha(c) => {
                        // The first code point decides between element
                        // and component and keeps its case; later
                        // upper-alpha code points are folded down.
                        if self.current_tag_name.is_empty() {
                            go!(self: set_component; push_tag c);
                        } else {
                            go!(self: push_tag_lower c);
                        }
                    }
                    Some('/') => go!(self: to SelfClosingStartTag),
                    Some('>') => go!(self: emit_tag Data),
                    None => go!(self: error EofInTag),
                    Some(c) => go!(self: push_tag c),
                }
            },

            //§ before-attribute-name-state
            states::BeforeAttributeName => loop {
                match self.input.next() {
                    Some(c) if is_space(c) => (),
                    Some('/') => go!(self: reconsume AfterAttributeName),
                    Some('>') => go!(self: reconsume AfterAttributeName),
                    Some('{') => go!(self: create_code_attr; to BeforeCode AttrValueCode),
                    Some('=') => go!(self: error UnexpectedEqualsSignBeforeAttributeName),
                    None => go!(self: to AfterAttributeName),
                    Some(c) => go!(self: create_attr c; reconsume AttributeName),
                }
            },

            //§ attribute-name-state
            states::AttributeName => loop {
                match self.input.next() {
                    Some(c) if is_space(c) => go!(self: demote_attr; reconsume AfterAttributeName),
                    Some(c) if is_upper_alpha(c) => go!(self: push_name c),
                    Some('/') => go!(self: reconsume AfterAttributeName),
                    Some('>') => go!(self: reconsume AfterAttributeName),
                    Some('=') => go!(self: to BeforeAttributeValue),
                    Some(c @ ('"' | '\'' | '<')) => {
                        go!(self: error_char UnexpectedCharacterInAttributeName c)
                    }
                    Some(':') => {
                        if self.current_attr_kind != AttrKind::Event {
                            self.current_attr_kind = AttrKind::Dynamic;
                        }
                        go!(self: push_name ':');
                    }
                    None => go!(self: to AfterAttributeName),
                    Some(c) => go!(self: push_name c),
                }
            },

            //§ after-attribute-name-state
            states::AfterAttributeName => loop {
                match self.input.next() {
                    Some(c) if is_space(c) => (),
                    Some('/') => go!(self: to SelfClosingStartTag),
                    Some('=') => go!(self: restore_attr; to BeforeAttributeValue),
                    Some('>') => go!(self: emit_tag Data),
                    None => go!(self: error EofInTag),
                    Some(c) => go!(self: create_attr c; reconsume AttributeName),
                }
            },

            //§ before-attribute-value-state
            states::BeforeAttributeValue => loop {
                match self.input.next() {
                    Some(c) if is_space(c) => (),
                    Some('{') => go!(self: mark_value; reset_code; to BeforeCode AttrValueCode),
                    Some('"') => go!(self: mark_value; to AttributeValue DoubleQuoted),
                    Some('\'') => go!(self: mark_value; to AttributeValue SingleQuoted),
                    Some('>') => go!(self: error MissingAttributeValue),
                    None => go!(self: to AttributeValue Unquoted),
                    Some(_) => go!(self: mark_value; reconsume AttributeValue Unquoted),
                }
            },

            //§ before-code-state (not in the HTML spec)
            // One extra `{` deepens the nesting and is kept; anything
            // else belongs to the capture proper.
            states::BeforeCode(kind) => loop {
                match self.input.next() {
                    Some('{') => go!(self: bump_code; push_code kind '{'; to Code kind),
                    None => go!(self: error EofInCode),
                    Some(_) => go!(self: reconsume Code kind),
                }
            },

            //§ code-state (not in the HTML spec)
            states::Code(kind) => loop {
                match self.input.next() {
                    Some('{') => go!(self: reconsume BeforeCode kind),
                    Some('}') => go!(self: reconsume AfterCode kind),
                    None => go!(self: error EofInCode),
                    Some(c) => go!(self: push_code kind c),
                }
            },

            //§ after-code-state (not in the HTML spec)
            states::AfterCode(kind) => loop {
                match self.input.next() {
                    Some('}') => {
                        if self.code_indent == 0 {
                            if kind == TextCode {
                                go!(self: emit_code; to Data);
                            }
                            go!(self: to AfterAttributeValueQuoted);
                        }
                        go!(self: unbump_code; push_code kind '}'; to Code kind);
                    }
                    _ => unreachable!("after-code is entered only by reconsuming a closing brace"),
                }
            },

            //§ attribute-value-(double-quoted)-state
            states::AttributeValue(DoubleQuoted) => loop {
                match self.input.next() {
                    Some('"') => go!(self: to AfterAttributeValueQuoted),
                    None => go!(self: error EofInTag),
                    Some(c) => go!(self: push_value c),
                }
            },

            //§ attribute-value-(single-quoted)-state
            states::AttributeValue(SingleQuoted) => loop {
                match self.input.next() {
                    Some('\'') => go!(self: to AfterAttributeValueQuoted),
                    None => go!(self: error EofInTag),
                    Some(c) => go!(self: push_value c),
                }
            },

            //§ attribute-value-(unquoted)-state
            states::AttributeValue(Unquoted) => loop {
                match self.input.next() {
                    Some(c) if is_space(c) => go!(self: to BeforeAttributeName),
                    Some('>') => go!(self: emit_tag Data),
                    Some(c @ ('"' | '\'' | '<' | '=' | '`')) => {
                        go!(self: error_char UnexpectedCharacterInUnquotedAttributeValue c)
                    }
                    None => go!(self: error EofInTag),
                    Some(c) => go!(self: push_value c),
                }
            },

            //§ after-attribute-value-(quoted)-state
            states::AfterAttributeValueQuoted => loop {
                match self.input.next() {
                    Some(c) if is_space(c) => go!(self: to BeforeAttributeName),
                    Some('/') => go!(self: to SelfClosingStartTag),
                    Some('>') => go!(self: emit_tag Data),
                    None => go!(self: error EofInTag),
                    Some(_) => go!(self: error MissingWhitespaceBetweenAttributes),
                }
            },

            //§ self-closing-start-tag-state
            states::SelfClosingStartTag => loop {
                match self.input.next() {
                    Some('>') => go!(self: set_self_closing; emit_tag Data),
                    None => go!(self: error EofInTag),
                    Some(_) => go!(self: error UnexpectedSolidusInTag),
                }
            },

            //§ markup-declaration-open-state
            states::MarkupDeclarationOpen => loop {
                // The comment token starts at the already-consumed `<!`.
                let start = self.pos();
                if self.input.eat("--") {
                    self.current_comment.clear();
                    self.token_start = start;
                    go!(self: to CommentStart);
                }
                go!(self: error IncorrectlyOpenedComment);
            },

            //§ comment-start-state
            states::CommentStart => loop {
                match self.input.next() {
                    Some('-') => go!(self: to CommentStartDash),
                    Some('>') => go!(self: error AbruptClosingOfEmptyComment),
                    None => go!(self: error EofInComment),
                    Some(_) => go!(self: reconsume Comment),
                }
            },

            //§ comment-start-dash-state
            states::CommentStartDash => loop {
                match self.input.next() {
                    Some('-') => go!(self: to CommentEnd),
                    Some('>') => go!(self: error AbruptClosingOfEmptyComment),
                    None => go!(self: error EofInComment),
                    Some(_) => go!(self: push_comment '-'; reconsume Comment),
                }
            },

            //§ comment-state
            states::Comment => loop {
                match self.input.next() {
                    Some(c @ '<') => go!(self: push_comment c; to CommentLessThanSign),
                    Some('-') => go!(self: to CommentEndDash),
                    None => go!(self: error EofInComment),
                    Some(c) => go!(self: push_comment c),
                }
            },

            //§ comment-less-than-sign-state
            states::CommentLessThanSign => loop {
                match self.input.next() {
                    Some(c @ '!') => go!(self: push_comment c; to CommentLessThanSignBang),
                    Some(c @ '<') => go!(self: push_comment c),
                    None => go!(self: error EofInComment),
                    Some(_) => go!(self: reconsume Comment),
                }
            },

            //§ comment-less-than-sign-bang-state
            states::CommentLessThanSignBang => loop {
                match self.input.next() {
                    Some('-') => go!(self: to CommentLessThanSignBangDash),
                    None => go!(self: error EofInComment),
                    Some(_) => go!(self: reconsume Comment),
                }
            },

            //§ comment-less-than-sign-bang-dash-state
            states::CommentLessThanSignBangDash => loop {
                match self.input.next() {
                    Some('-') => go!(self: to CommentLessThanSignBangDashDash),
                    None => go!(self: error EofInComment),
                    Some(_) => go!(self: reconsume Comment),
                }
            },

            //§ comment-less-than-sign-bang-dash-dash-state
            states::CommentLessThanSignBangDashDash => loop {
                match self.input.next() {
                    Some('>') => go!(self: reconsume Comment),
                    None => go!(self: error EofInComment),
                    Some(_) => go!(self: error NestedComment),
                }
            },

            //§ comment-end-dash-state
            states::CommentEndDash => loop {
                match self.input.next() {
                    Some('-') => go!(self: to CommentEnd),
                    None => go!(self: error EofInComment),
                    Some(_) => go!(self: push_comment '-'; reconsume Comment),
                }
            },

            //§ comment-end-state
            states::CommentEnd => loop {
                match self.input.next() {
                    Some('>') => go!(self: emit_comment; to Data),
                    Some('!') => go!(self: to CommentEndBang),
                    Some('-') => go!(self: push_comment '-'),
                    None => go!(self: error EofInComment),
                    Some(_) => go!(self: push_comment '-'; reconsume Comment),
                }
            },

            //§ comment-end-bang-state
            states::CommentEndBang => loop {
                match self.input.next() {
                    Some('-') => go!(self: append_comment "--!"; to CommentEndDash),
                    Some('>') => go!(self: error IncorrectlyClosedComment),
                    None => go!(self: error EofInComment),
                    Some(_) => go!(self: append_comment "--!"; reconsume Comment),
                }
            },

            //§ bogus-comment-state
            // Unreachable in practice: the transitions into it are all
            // fatal errors for this dialect. Kept to match the state
            // inventory.
            states::BogusComment => loop {
                match self.input.next() {
                    Some('>') => go!(self: emit_comment; to Data),
                    None => go!(self: emit_comment; emit_eof; to EndOfFile),
                    Some(c) => go!(self: push_comment c),
                }
            },

            //§ END
            states::EndOfFile => {
                unreachable!("the run loop stops before stepping the end-of-file state")
            }
        }
    }
}
