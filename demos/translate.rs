// Copyright 2026 The viewml Project Developers. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Reads a template from stdin, writes the translated expression to
//! stdout. Run with `RUST_LOG=viewml=trace` to watch the state
//! machine work.

use std::io::{self, Read};
use std::process;

fn main() {
    env_logger::init();

    let mut source = String::new();
    io::stdin()
        .read_to_string(&mut source)
        .expect("reading stdin");

    match viewml::compile_view(&source) {
        Ok(expr) => println!("{expr}"),
        Err(err) => {
            eprintln!("{err}");
            process::exit(1);
        }
    }
}
