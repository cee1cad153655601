// Copyright 2026 The viewml Project Developers. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

/// Evaluate an expression and pair its result with the elapsed wall
/// time in nanoseconds.
macro_rules! time {
    ($e:expr) => {{
        let start = ::std::time::Instant::now();
        let result = $e;
        (result, start.elapsed().as_nanos() as u64)
    }};
}
