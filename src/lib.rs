// The MIT License (MIT)

// Copyright (c) 2026 The assurance Developers

//  Permission is hereby granted, free of charge, to any person obtaining a
//  copy of this software and associated documentation files (the "Software"),
//  to deal in the Software without restriction, including without limitation
//  the rights to use, copy, modify, merge, publish, distribute, sublicense,
//  and/or sell copies of the Software, and to permit persons to whom the
//  Software is furnished to do so, subject to the following conditions:
//
//  The above copyright notice and this permission notice shall be included in
//  all copies or substantial portions of the Software.
//
//  THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS
//  OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
//  FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
//  AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
//  LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING
//  FROM, OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER
//  DEALINGS IN THE SOFTWARE.

//! Single threaded deferred values with chaining and adoption
//!
//! ```
//! use assurance::{Future, Scheduler};
//!
//! let result = Scheduler::new().run(|| {
//!     let fut: Future<u32> = Future::resolve(20);
//!     fut.and_then(|v| Ok(v + 1)).and_then(|v| Ok(v * 2))
//! }).unwrap();
//!
//! assert_eq!(result.peek().unwrap().unwrap(), 42);
//! ```

#[macro_use]
extern crate log;

use std::time::Duration;

pub use future::{Future, FutureState, Promise, Resolution, Thenable};
pub use options::Options;
pub use reason::{CyclicAdoption, Reason};
pub use scheduler::{RunError, Schedule, Scheduler, Task};

pub mod future;
pub mod options;
pub mod reason;
pub mod scheduler;
mod runtime;

/// Submit a task to the current scheduler
#[inline(always)]
pub fn spawn<F>(f: F)
    where F: FnOnce() + 'static
{
    Scheduler::spawn(f)
}

/// Run `f` on the current scheduler once `delay` has passed
#[inline]
pub fn set_timeout<F>(delay: Duration, f: F)
    where F: FnOnce() + 'static
{
    Scheduler::current().set_timeout(delay, f)
}

/// Drain the current scheduler
#[inline]
pub fn run_until_idle() -> Result<usize, RunError> {
    Scheduler::current().run_until_idle()
}
