// Copyright 2026 The assurance Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Scheduler options

use std::default::Default;

/// Scheduler options
#[derive(Debug, Clone)]
pub struct Options {
    /// Label used in log lines
    pub name: Option<String>,
    /// Upper bound of tasks executed by a single `run`, `None` for no bound
    pub max_tasks: Option<usize>,
}

impl Options {
    pub fn new() -> Options {
        Options {
            name: None,
            max_tasks: None,
        }
    }

    pub fn name(&mut self, name: String) -> &mut Options {
        self.name = Some(name);
        self
    }

    pub fn max_tasks(&mut self, max_tasks: usize) -> &mut Options {
        self.max_tasks = Some(max_tasks);
        self
    }
}

impl Default for Options {
    fn default() -> Options {
        Options::new()
    }
}
