// The MIT License (MIT)

// Copyright (c) 2026 The assurance Developers

// Permission is hereby granted, free of charge, to any person obtaining a copy of
// this software and associated documentation files (the "Software"), to deal in
// the Software without restriction, including without limitation the rights to
// use, copy, modify, merge, publish, distribute, sublicense, and/or sell copies of
// the Software, and to permit persons to whom the Software is furnished to do so,
// subject to the following conditions:

// The above copyright notice and this permission notice shall be included in all
// copies or substantial portions of the Software.

// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY, FITNESS
// FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR
// COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER
// IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN
// CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! Deferred execution
//!
//! Futures never run continuations on the caller's stack. Every continuation
//! is submitted as a `Task` to a `Schedule` implementation which runs it on a
//! later turn of the same thread.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::error::Error;
use std::fmt;
use std::mem;
use std::ops::Deref;
use std::rc::Rc;
use std::thread;
use std::time::{Duration, Instant};

use options::Options;
use runtime::timer::Timer;

/// A unit of deferred work
pub type Task = Box<dyn FnOnce()>;

/// Something that runs tasks later.
///
/// `schedule` must not run `task` before it returns.
pub trait Schedule {
    fn schedule(&self, task: Task);
}

thread_local!(static CURRENT: RefCell<Option<Scheduler>> = RefCell::new(None));
thread_local!(static THREAD_DEFAULT: Scheduler = Scheduler::new());

// Deadline used when `now + delay` does not fit in an `Instant`
const MAX_DELAY: Duration = Duration::from_secs(60 * 60 * 24 * 365 * 30);

/// Error returned by the `run` family
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunError {
    /// `Options::max_tasks` tasks were executed and work was still left
    TaskLimit { executed: usize, remaining: usize },
}

impl fmt::Display for RunError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            RunError::TaskLimit { executed, remaining } => {
                write!(f,
                       "task limit reached after {} tasks, {} still pending",
                       executed,
                       remaining)
            }
        }
    }
}

impl Error for RunError {}

struct Inner {
    opts: Options,
    ready: RefCell<VecDeque<Task>>,
    timer: RefCell<Timer>,
    // Set once no `Scheduler` handle is left to run the queues
    closed: Cell<bool>,
}

impl Inner {
    fn label(&self) -> &str {
        self.opts.name.as_ref().map(|s| &s[..]).unwrap_or("<unnamed>")
    }

    /// Drop every queued task and refuse new ones.
    ///
    /// Queued tasks own the cores that point back at this queue, so keeping
    /// them would leak both.
    fn close(&self) {
        self.closed.set(true);

        let ready = mem::replace(&mut *self.ready.borrow_mut(), VecDeque::new());
        let timer = mem::replace(&mut *self.timer.borrow_mut(), Timer::new());

        if !ready.is_empty() || timer.len() > 0 {
            debug!("Scheduler({}): closed, dropping {} ready and {} delayed tasks",
                   self.label(),
                   ready.len(),
                   timer.len());
        }

        // Dropped with no borrow held, a task's destructor may schedule again
        drop(ready);
        drop(timer);
    }
}

impl Schedule for Inner {
    fn schedule(&self, task: Task) {
        if self.closed.get() {
            debug!("Scheduler({}): closed, dropping task", self.label());
            return;
        }

        let mut ready = self.ready.borrow_mut();
        ready.push_back(task);
        trace!("Scheduler({}): scheduled, {} ready", self.label(), ready.len());
    }
}

/// Shared by all clones of one `Scheduler`, closes the queues when the last
/// of them is dropped. Futures only hold the `Inner`.
struct Owner(Rc<Inner>);

impl Deref for Owner {
    type Target = Inner;

    fn deref(&self) -> &Inner {
        &self.0
    }
}

impl Drop for Owner {
    fn drop(&mut self) {
        self.0.close();
    }
}

/// Single threaded FIFO task queue with support for delayed tasks.
///
/// Cloning a `Scheduler` yields another handle onto the same queue. Once the
/// last handle is gone, tasks still queued are dropped without running and
/// new ones are discarded.
#[derive(Clone)]
pub struct Scheduler {
    inner: Rc<Owner>,
}

/// Restores the previous current scheduler when dropped
#[must_use]
pub struct Enter {
    prev: Option<Scheduler>,
}

impl Drop for Enter {
    fn drop(&mut self) {
        let prev = self.prev.take();
        CURRENT.with(|cur| *cur.borrow_mut() = prev);
    }
}

impl Scheduler {
    /// Create a scheduler with default options
    pub fn new() -> Scheduler {
        Scheduler::with_options(Options::new())
    }

    /// Create a scheduler with options
    pub fn with_options(opts: Options) -> Scheduler {
        Scheduler {
            inner: Rc::new(Owner(Rc::new(Inner {
                opts: opts,
                ready: RefCell::new(VecDeque::new()),
                timer: RefCell::new(Timer::new()),
                closed: Cell::new(false),
            }))),
        }
    }

    #[inline]
    pub fn options(&self) -> &Options {
        &self.inner.opts
    }

    /// Get the current scheduler of this thread.
    ///
    /// That is the one installed by `run` or `enter`, or a per-thread default.
    pub fn current() -> Scheduler {
        CURRENT.with(|cur| cur.borrow().clone())
               .unwrap_or_else(|| THREAD_DEFAULT.with(|sched| sched.clone()))
    }

    /// Submit a task to the current scheduler
    #[inline]
    pub fn spawn<F>(f: F)
        where F: FnOnce() + 'static
    {
        Scheduler::current().schedule(Box::new(f))
    }

    /// A handle that futures can hold on to
    #[inline]
    pub fn handle(&self) -> Rc<dyn Schedule> {
        self.inner.0.clone()
    }

    /// Make this the current scheduler until the guard is dropped
    pub fn enter(&self) -> Enter {
        let prev = CURRENT.with(|cur| cur.borrow_mut().replace(self.clone()));
        Enter { prev: prev }
    }

    /// Run `f` with this scheduler installed, then drain it
    pub fn run<F, T>(&self, f: F) -> Result<T, RunError>
        where F: FnOnce() -> T
    {
        let _enter = self.enter();
        let ret = f();
        self.run_until_idle()?;
        Ok(ret)
    }

    /// Run tasks until no ready or delayed task is left.
    ///
    /// Sleeps the thread while only delayed tasks remain. Returns the number
    /// of tasks executed.
    pub fn run_until_idle(&self) -> Result<usize, RunError> {
        debug!("Scheduler({}): running, {} pending", self.inner.label(), self.pending());

        let mut executed = 0;

        loop {
            if let Some(max) = self.inner.opts.max_tasks {
                if executed >= max && self.pending() > 0 {
                    let remaining = self.pending();
                    warn!("Scheduler({}): task limit {} reached, {} still pending",
                          self.inner.label(),
                          max,
                          remaining);
                    return Err(RunError::TaskLimit {
                        executed: executed,
                        remaining: remaining,
                    });
                }
            }

            if self.turn() {
                executed += 1;
                continue;
            }

            let next_wakeup = self.inner.timer.borrow().next_wakeup();
            match next_wakeup {
                None => break,
                Some(deadline) => {
                    let now = Instant::now();
                    if deadline > now {
                        trace!("Scheduler({}): sleeping {:?}", self.inner.label(), deadline - now);
                        thread::sleep(deadline - now);
                    }
                }
            }
        }

        debug!("Scheduler({}): idle after {} tasks", self.inner.label(), executed);
        Ok(executed)
    }

    /// Run at most one ready task, returns whether one was run
    pub fn turn(&self) -> bool {
        self.wake_timers(Instant::now());

        let task = self.inner.ready.borrow_mut().pop_front();
        match task {
            Some(task) => {
                task();
                true
            }
            None => false,
        }
    }

    /// Number of ready and delayed tasks
    pub fn pending(&self) -> usize {
        self.inner.ready.borrow().len() + self.inner.timer.borrow().len()
    }

    /// Schedule `f` to run once `delay` has passed.
    ///
    /// Delays too large to represent are clamped to a deadline decades away.
    pub fn set_timeout<F>(&self, delay: Duration, f: F)
        where F: FnOnce() + 'static
    {
        trace!("Scheduler({}): timeout in {:?}", self.inner.label(), delay);

        let now = Instant::now();
        let deadline = now.checked_add(delay).unwrap_or_else(|| now + MAX_DELAY);
        self.inner.timer.borrow_mut().wait_until(Box::new(f), deadline);
    }

    fn wake_timers(&self, now: Instant) {
        let mut timer = self.inner.timer.borrow_mut();
        let mut ready = self.inner.ready.borrow_mut();

        while let Some(task) = timer.try_awake(now) {
            ready.push_back(task);
        }
    }
}

impl Schedule for Scheduler {
    #[inline]
    fn schedule(&self, task: Task) {
        self.inner.schedule(task)
    }
}

impl Default for Scheduler {
    fn default() -> Scheduler {
        Scheduler::new()
    }
}

impl fmt::Debug for Scheduler {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f,
               "Scheduler {{ name: {:?}, pending: {} }}",
               self.inner.opts.name,
               self.pending())
    }
}
