// Copyright 2026 The assurance Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::fmt;

use reason::Reason;
use super::cores::{Core, CoreRef};
use super::{Future, Resolution};

/// The settling end of a `Future`.
///
/// Only the first settlement counts, every later call is silently ignored.
pub struct Promise<To>(CoreRef<To>);

impl<To> Promise<To> {
    pub(crate) fn from_core(core: CoreRef<To>) -> Promise<To> {
        Promise(core)
    }

    /// Whether the future is still waiting for a settlement
    #[inline]
    pub fn is_pending(&self) -> bool {
        self.0.borrow().is_pending()
    }

    /// The future this promise settles
    pub fn future(&self) -> Future<To> {
        Future::from_core(self.0.clone())
    }
}

impl<To> Promise<To>
    where To: Clone + 'static
{
    /// Fulfill with a plain value
    #[inline]
    pub fn resolve(&self, val: To) {
        Core::resolve(&self.0, Resolution::Value(val))
    }

    /// Fulfill with a value, or adopt it if it is deferred
    #[inline]
    pub fn settle<R>(&self, val: R)
        where R: Into<Resolution<To>>
    {
        Core::resolve(&self.0, val.into())
    }

    #[inline]
    pub fn reject<E>(&self, reason: E)
        where E: Into<Reason>
    {
        Core::reject(&self.0, reason.into())
    }

    pub(crate) fn complete<R>(&self, result: Result<R, Reason>)
        where R: Into<Resolution<To>>
    {
        match result {
            Ok(val) => self.settle(val),
            Err(reason) => self.reject(reason),
        }
    }
}

impl<To> Clone for Promise<To> {
    fn clone(&self) -> Promise<To> {
        Promise(self.0.clone())
    }
}

impl<To> fmt::Debug for Promise<To> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Promise {{ state: {:?} }}", self.0.borrow().state())
    }
}
