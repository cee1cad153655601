// Copyright 2026 The viewml Project Developers. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! One-shot entry points tying the pipeline together.

use crate::ast::Ast;
use crate::emit;
use crate::error::Error;
use crate::tokenizer::{Tokenizer, TokenizerOpts};

/// Options for the full pipeline, with an impl for `Default`.
#[derive(Clone, Default)]
pub struct ParseOpts {
    /// Tokenizer options.
    pub tokenizer: TokenizerOpts,
}

/// Tokenize `source` and build its view tree with default options.
pub fn parse_view(source: &str) -> Result<Ast, Error> {
    parse_view_with(source, ParseOpts::default())
}

/// Tokenize `source` and build its view tree.
pub fn parse_view_with(source: &str, opts: ParseOpts) -> Result<Ast, Error> {
    let tokens = Tokenizer::new(source, opts.tokenizer).run()?;
    Ast::build(tokens)
}

/// Translate a template into the fluent view expression, with default
/// options. No partial output: any failure in any stage returns the
/// error alone.
pub fn compile_view(source: &str) -> Result<String, Error> {
    compile_view_with(source, ParseOpts::default())
}

/// Translate a template into the fluent view expression.
pub fn compile_view_with(source: &str, opts: ParseOpts) -> Result<String, Error> {
    let ast = parse_view_with(source, opts)?;
    emit::emit(&ast)
}
