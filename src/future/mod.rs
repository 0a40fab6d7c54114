// Copyright 2026 The assurance Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Deferred values
//!
//! A `Future` is the reading end of a value that is not known yet, a
//! `Promise` is the writing end. Both are handles onto the same `Core`.
//!
//! Most parts of this module use a certain pattern to describe template
//! parameters:
//!
//! To => The value a Core/Promise/Future settles with
//! U  => The value of the Future derived by `.then()` and friends
//!
//! Rejections are always carried as an opaque `Reason`.

mod cores;
mod future;
mod promise;

pub use self::future::*;
pub use self::promise::*;

use std::rc::Rc;

use reason::Reason;
use scheduler::{Schedule, Scheduler};
use self::cores::Core;

/// Coarse state of a `Future`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FutureState {
    Pending,
    Fulfilled,
    Rejected,
}

/// Something offered to the fulfill path of a `Future`.
///
/// Plain values settle the future, deferred values are adopted: the future
/// waits for them and settles the same way they do.
pub enum Resolution<To> {
    Value(To),
    Future(Future<To>),
    Thenable(Box<dyn Thenable<To>>),
}

impl<To> Resolution<To> {
    /// Adopt any foreign deferred value
    pub fn thenable<Th>(thenable: Th) -> Resolution<To>
        where Th: Thenable<To> + 'static
    {
        Resolution::Thenable(Box::new(thenable))
    }
}

impl<To> From<To> for Resolution<To> {
    #[inline]
    fn from(val: To) -> Resolution<To> {
        Resolution::Value(val)
    }
}

impl<To> From<Future<To>> for Resolution<To> {
    #[inline]
    fn from(fut: Future<To>) -> Resolution<To> {
        Resolution::Future(fut)
    }
}

/// The capability of being adopted by a `Future`.
///
/// `subscribe` must eventually call at most one of the two continuations, at
/// most once. A fulfillment may itself be deferred, it is adopted in turn.
///
/// A `Future` calls `subscribe` from a task on its scheduler. Calling a
/// continuation right away, before `subscribe` returns, is fine at any
/// nesting depth.
pub trait Thenable<To> {
    fn subscribe(self: Box<Self>,
                 on_fulfilled: Box<dyn FnOnce(Resolution<To>)>,
                 on_rejected: Box<dyn FnOnce(Reason)>);
}

/// Create a pending `Future` and the `Promise` that settles it, bound to the
/// current scheduler
pub fn make<To>() -> (Promise<To>, Future<To>)
    where To: Clone + 'static
{
    make_in(Scheduler::current().handle())
}

/// Same as `make`, bound to `scheduler`
pub fn make_in<To>(scheduler: Rc<dyn Schedule>) -> (Promise<To>, Future<To>)
    where To: Clone + 'static
{
    let core = Core::new(scheduler);
    (Promise::from_core(core.clone()), Future::from_core(core))
}
