// Copyright 2026 The assurance Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::cell::RefCell;
use std::mem;
use std::rc::{Rc, Weak};

use reason::{CyclicAdoption, Reason};
use scheduler::{Schedule, Task};
use super::{FutureState, Resolution};

pub type FulfillCallback<To> = Box<dyn FnOnce(To)>;
pub type RejectCallback = Box<dyn FnOnce(Reason)>;

/// Shared handle onto a `Core`, held by futures, promises and continuations
pub type CoreRef<To> = Rc<RefCell<Core<To>>>;

enum State<To> {
    Pending,
    Fulfilled(To),
    Rejected(Reason),
}

/// Settlement state of one future.
///
/// Every method that hands work to the scheduler releases its borrow of the
/// core first, so a task may freely re-enter any core.
pub struct Core<To> {
    state: State<To>,
    fulfill_callbacks: Vec<FulfillCallback<To>>,
    reject_callbacks: Vec<RejectCallback>,
    scheduler: Rc<dyn Schedule>,
    // Set once anybody subscribed, even if the callbacks already ran
    handled: bool,
    // The future this one currently follows, if any
    adopting: Option<Weak<RefCell<Core<To>>>>,
}

impl<To> Core<To> {
    pub fn new(scheduler: Rc<dyn Schedule>) -> CoreRef<To> {
        Rc::new(RefCell::new(Core {
            state: State::Pending,
            fulfill_callbacks: Vec::new(),
            reject_callbacks: Vec::new(),
            scheduler: scheduler,
            handled: false,
            adopting: None,
        }))
    }

    #[inline]
    pub fn is_pending(&self) -> bool {
        match self.state {
            State::Pending => true,
            _ => false,
        }
    }

    pub fn state(&self) -> FutureState {
        match self.state {
            State::Pending => FutureState::Pending,
            State::Fulfilled(..) => FutureState::Fulfilled,
            State::Rejected(..) => FutureState::Rejected,
        }
    }

    #[inline]
    pub fn scheduler(&self) -> Rc<dyn Schedule> {
        self.scheduler.clone()
    }
}

impl<To: Clone + 'static> Core<To> {
    pub fn peek(&self) -> Option<Result<To, Reason>> {
        match self.state {
            State::Pending => None,
            State::Fulfilled(ref val) => Some(Ok(val.clone())),
            State::Rejected(ref reason) => Some(Err(reason.clone())),
        }
    }

    /// Offer a resolution to the fulfill path.
    ///
    /// Plain values settle the core, anything deferred is adopted.
    pub fn resolve(this: &CoreRef<To>, resolution: Resolution<To>) {
        if !this.borrow().is_pending() {
            trace!("Future: already settled, dropping resolution");
            return;
        }

        match resolution {
            Resolution::Value(val) => Core::fulfill(this, val),
            Resolution::Future(fut) => Core::adopt(this, fut.into_core()),
            Resolution::Thenable(thenable) => {
                debug!("Future: adopting a foreign thenable");

                // Subscribe on a later turn, the thenable may call back right away
                let fulfilled = this.clone();
                let rejected = this.clone();
                let scheduler = this.borrow().scheduler();
                scheduler.schedule(Box::new(move || {
                    thenable.subscribe(Box::new(move |inner| Core::resolve(&fulfilled, inner)),
                                       Box::new(move |reason| Core::reject(&rejected, reason)))
                }));
            }
        }
    }

    pub fn reject(this: &CoreRef<To>, reason: Reason) {
        let (callbacks, scheduler) = {
            let mut core = this.borrow_mut();
            if !core.is_pending() {
                trace!("Future: already settled, dropping rejection {:?}", reason);
                return;
            }

            trace!("Future: rejected with {:?}, {} callbacks",
                   reason,
                   core.reject_callbacks.len());

            core.state = State::Rejected(reason.clone());
            core.adopting = None;
            core.fulfill_callbacks.clear();
            (mem::replace(&mut core.reject_callbacks, Vec::new()), core.scheduler.clone())
        };

        for callback in callbacks {
            let reason = reason.clone();
            scheduler.schedule(Box::new(move || callback(reason)));
        }
    }

    /// Register a pair of continuations, exactly one of which will run.
    ///
    /// They never run before this returns, even if the core is already settled.
    pub fn subscribe(this: &CoreRef<To>,
                     on_fulfilled: FulfillCallback<To>,
                     on_rejected: RejectCallback) {
        let mut guard = this.borrow_mut();
        let core = &mut *guard;
        core.handled = true;

        let task: Task = match core.state {
            State::Pending => {
                core.fulfill_callbacks.push(on_fulfilled);
                core.reject_callbacks.push(on_rejected);
                return;
            }
            State::Fulfilled(ref val) => {
                let val = val.clone();
                Box::new(move || on_fulfilled(val))
            }
            State::Rejected(ref reason) => {
                let reason = reason.clone();
                Box::new(move || on_rejected(reason))
            }
        };

        let scheduler = core.scheduler.clone();
        drop(guard);
        scheduler.schedule(task);
    }

    fn fulfill(this: &CoreRef<To>, val: To) {
        let (callbacks, scheduler) = {
            let mut core = this.borrow_mut();
            if !core.is_pending() {
                return;
            }

            trace!("Future: fulfilled, {} callbacks", core.fulfill_callbacks.len());

            core.state = State::Fulfilled(val.clone());
            core.adopting = None;
            core.reject_callbacks.clear();
            (mem::replace(&mut core.fulfill_callbacks, Vec::new()), core.scheduler.clone())
        };

        for callback in callbacks {
            let val = val.clone();
            scheduler.schedule(Box::new(move || callback(val)));
        }
    }

    fn adopt(this: &CoreRef<To>, other: CoreRef<To>) {
        if Core::follows(&other, this) {
            warn!("Future: cyclic adoption, rejecting");
            Core::reject(this, CyclicAdoption.into());
            return;
        }

        debug!("Future: adopting another future");
        this.borrow_mut().adopting = Some(Rc::downgrade(&other));

        let fulfilled = this.clone();
        let rejected = this.clone();
        Core::subscribe(&other,
                        Box::new(move |val| Core::resolve(&fulfilled, Resolution::Value(val))),
                        Box::new(move |reason| Core::reject(&rejected, reason)));
    }

    /// Whether walking the adoption links from `from` reaches `target`.
    ///
    /// Links are only added by `adopt` after this check, so they never form a
    /// loop and the walk terminates.
    fn follows(from: &CoreRef<To>, target: &CoreRef<To>) -> bool {
        let mut cur = Some(from.clone());

        while let Some(core) = cur {
            if Rc::ptr_eq(&core, target) {
                return true;
            }

            cur = {
                let core = core.borrow();
                if core.is_pending() {
                    core.adopting.as_ref().and_then(Weak::upgrade)
                } else {
                    None
                }
            };
        }

        false
    }
}

impl<To> Drop for Core<To> {
    fn drop(&mut self) {
        if let State::Rejected(ref reason) = self.state {
            if !self.handled {
                warn!("Future rejected with {:?} dropped without a rejection handler", reason);
            }
        }
    }
}
