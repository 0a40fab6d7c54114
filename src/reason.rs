// Copyright 2026 The assurance Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Rejection payloads

use std::any::{self, Any};
use std::error::Error;
use std::fmt;
use std::rc::Rc;

/// The reason a `Future` was rejected.
///
/// A `Reason` carries an arbitrary payload. Futures never look inside it, they
/// only hand it down the chain until some handler does. Cloning is cheap, all
/// clones share the same payload.
#[derive(Clone)]
pub struct Reason {
    payload: Rc<dyn Any>,
    type_name: &'static str,
    message: Option<String>,
}

impl Reason {
    /// Wrap an arbitrary payload
    pub fn new<P: Any>(payload: P) -> Reason {
        let message = {
            let any = &payload as &dyn Any;
            if let Some(s) = any.downcast_ref::<&'static str>() {
                Some((*s).to_owned())
            } else if let Some(s) = any.downcast_ref::<String>() {
                Some(s.clone())
            } else {
                None
            }
        };

        Reason {
            payload: Rc::new(payload),
            type_name: any::type_name::<P>(),
            message: message,
        }
    }

    /// Returns `true` if the payload is of type `P`
    #[inline]
    pub fn is<P: Any>(&self) -> bool {
        self.payload.is::<P>()
    }

    /// Borrow the payload as a `P`, if that is what it is
    #[inline]
    pub fn downcast_ref<P: Any>(&self) -> Option<&P> {
        self.payload.downcast_ref::<P>()
    }

    /// Name of the payload's type, as reported by `std::any::type_name`
    #[inline]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Human readable message, available for string and `Error` payloads
    #[inline]
    pub fn message(&self) -> Option<&str> {
        self.message.as_ref().map(|s| &s[..])
    }

    /// Returns `true` if both reasons share the same payload
    #[inline]
    pub fn ptr_eq(&self, other: &Reason) -> bool {
        Rc::ptr_eq(&self.payload, &other.payload)
    }
}

// `Reason` must not implement `Error`, this impl would overlap `impl<T> From<T> for T`.
impl<E: Error + 'static> From<E> for Reason {
    fn from(err: E) -> Reason {
        let message = err.to_string();
        let mut reason = Reason::new(err);
        reason.message = Some(message);
        reason
    }
}

impl fmt::Debug for Reason {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.message {
            Some(ref msg) => write!(f, "Reason({}: {:?})", self.type_name, msg),
            None => write!(f, "Reason({})", self.type_name),
        }
    }
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.message {
            Some(ref msg) => f.write_str(msg),
            None => write!(f, "rejected with {}", self.type_name),
        }
    }
}

/// Rejection payload of a `Future` that was asked to adopt itself,
/// directly or through a chain of other futures.
///
/// The check only follows the most recent adoption of each future. Once a
/// loop closes, the future that closed it is rejected right away and the
/// rejection travels back along the loop, even if one of its members still
/// follows another future that would have settled it later.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CyclicAdoption;

impl fmt::Display for CyclicAdoption {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("future cannot adopt itself")
    }
}

impl Error for CyclicAdoption {}
