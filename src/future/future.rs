// Copyright 2026 The assurance Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::fmt;
use std::rc::Rc;

use reason::Reason;
use scheduler::{Schedule, Scheduler};
use super::cores::{Core, CoreRef};
use super::{make_in, FutureState, Promise, Resolution, Thenable};

/// A value that will be known later.
///
/// Continuations registered with `then`, `and_then` and `catch` always run on
/// a later turn of the scheduler the future is bound to, in registration
/// order. Each of them returns a new `Future` settled by the continuation's
/// result: `Ok` fulfills it (adopting deferred values), `Err` rejects it.
pub struct Future<To>(CoreRef<To>);

impl<To> Future<To> {
    pub(crate) fn from_core(core: CoreRef<To>) -> Future<To> {
        Future(core)
    }

    pub(crate) fn into_core(self) -> CoreRef<To> {
        self.0
    }

    #[inline]
    pub fn state(&self) -> FutureState {
        self.0.borrow().state()
    }

    #[inline]
    pub fn is_pending(&self) -> bool {
        self.0.borrow().is_pending()
    }

    fn scheduler(&self) -> Rc<dyn Schedule> {
        self.0.borrow().scheduler()
    }
}

impl<To> Future<To>
    where To: Clone + 'static
{
    /// Create a future on the current scheduler.
    ///
    /// `executor` runs synchronously, before `new` returns, and may settle the
    /// future through the given promise or stash a clone of it for later. An
    /// `Err` from `executor` rejects the future.
    pub fn new<F>(executor: F) -> Future<To>
        where F: FnOnce(&Promise<To>) -> Result<(), Reason>
    {
        Future::with_scheduler(Scheduler::current().handle(), executor)
    }

    /// Same as `new`, bound to `scheduler`
    pub fn with_scheduler<F>(scheduler: Rc<dyn Schedule>, executor: F) -> Future<To>
        where F: FnOnce(&Promise<To>) -> Result<(), Reason>
    {
        let (promise, future) = make_in(scheduler);

        if let Err(reason) = executor(&promise) {
            debug!("Future: executor failed with {:?}", reason);
            promise.reject(reason);
        }

        future
    }

    /// A future fulfilled with `val`, or adopting it if it is deferred
    pub fn resolve<R>(val: R) -> Future<To>
        where R: Into<Resolution<To>>
    {
        Future::new(move |promise| {
            promise.settle(val);
            Ok(())
        })
    }

    /// A future rejected with `reason`
    pub fn reject<E>(reason: E) -> Future<To>
        where E: Into<Reason>
    {
        Future::new(move |promise| {
            promise.reject(reason);
            Ok(())
        })
    }

    /// Same as `resolve`, bound to `scheduler`
    pub fn resolve_in<R>(scheduler: Rc<dyn Schedule>, val: R) -> Future<To>
        where R: Into<Resolution<To>>
    {
        Future::with_scheduler(scheduler, move |promise| {
            promise.settle(val);
            Ok(())
        })
    }

    /// Same as `reject`, bound to `scheduler`
    pub fn reject_in<E>(scheduler: Rc<dyn Schedule>, reason: E) -> Future<To>
        where E: Into<Reason>
    {
        Future::with_scheduler(scheduler, move |promise| {
            promise.reject(reason);
            Ok(())
        })
    }

    /// The settled outcome, `None` while pending. Never triggers delivery.
    #[inline]
    pub fn peek(&self) -> Option<Result<To, Reason>> {
        self.0.borrow().peek()
    }

    /// Continue with `on_fulfilled` or `on_rejected`, whichever applies
    pub fn then<U, Rf, Rr, F, G>(&self, on_fulfilled: F, on_rejected: G) -> Future<U>
        where U: Clone + 'static,
              Rf: Into<Resolution<U>>,
              Rr: Into<Resolution<U>>,
              F: FnOnce(To) -> Result<Rf, Reason> + 'static,
              G: FnOnce(Reason) -> Result<Rr, Reason> + 'static
    {
        let (promise, future) = make_in(self.scheduler());
        let rejected = promise.clone();

        Core::subscribe(&self.0,
                        Box::new(move |val| promise.complete(on_fulfilled(val))),
                        Box::new(move |reason| rejected.complete(on_rejected(reason))));
        future
    }

    /// Continue with `on_fulfilled`; a rejection passes through unchanged
    pub fn and_then<U, R, F>(&self, on_fulfilled: F) -> Future<U>
        where U: Clone + 'static,
              R: Into<Resolution<U>>,
              F: FnOnce(To) -> Result<R, Reason> + 'static
    {
        let (promise, future) = make_in(self.scheduler());
        let rejected = promise.clone();

        Core::subscribe(&self.0,
                        Box::new(move |val| promise.complete(on_fulfilled(val))),
                        Box::new(move |reason| rejected.reject(reason)));
        future
    }

    /// Continue with `on_rejected`; a fulfillment passes through unchanged.
    ///
    /// `on_rejected` may recover by returning `Ok`.
    pub fn catch<R, G>(&self, on_rejected: G) -> Future<To>
        where R: Into<Resolution<To>>,
              G: FnOnce(Reason) -> Result<R, Reason> + 'static
    {
        let (promise, future) = make_in(self.scheduler());
        let rejected = promise.clone();

        Core::subscribe(&self.0,
                        Box::new(move |val| promise.resolve(val)),
                        Box::new(move |reason| rejected.complete(on_rejected(reason))));
        future
    }
}

impl<To> Thenable<To> for Future<To>
    where To: Clone + 'static
{
    fn subscribe(self: Box<Self>,
                 on_fulfilled: Box<dyn FnOnce(Resolution<To>)>,
                 on_rejected: Box<dyn FnOnce(Reason)>) {
        Core::subscribe(&self.0,
                        Box::new(move |val| on_fulfilled(Resolution::Value(val))),
                        on_rejected)
    }
}

impl<To> Clone for Future<To> {
    fn clone(&self) -> Future<To> {
        Future(self.0.clone())
    }
}

impl<To> fmt::Debug for Future<To> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Future {{ state: {:?} }}", self.state())
    }
}
