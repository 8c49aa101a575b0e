/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */
//! Handling of Objective-C selectors.
//!
//! These are the names used to look up method implementations in Objective-C.
//! The runtime interns them in a process-wide table that only ever grows, so
//! registering the same name twice gives the same selector and comparing two
//! selectors is a pointer comparison.
//!
//! Resources:
//! - Apple's [The Objective-C Programming Language](https://developer.apple.com/library/archive/documentation/Cocoa/Conceptual/ObjectiveC/Chapters/ocSelectors.html)

#[cfg(target_vendor = "apple")]
use super::{ffi, to_bool};
#[cfg(target_vendor = "apple")]
use crate::mem::{str_from_native, NativeStr};

opaque_handle! {
    /// Opaque type used for selectors.
    ///
    /// The name is standard Objective-C (`SEL`). Equality is interning
    /// identity.
    pub struct Sel(*mut objc_selector);
}

// Selectors are interned for the lifetime of the process.
unsafe impl Send for Sel {}
unsafe impl Sync for Sel {}

#[cfg(target_vendor = "apple")]
impl Sel {
    /// Register a method name with the runtime (`sel_registerName`), or get the
    /// existing selector if it's already known.
    pub fn register(name: &str) -> Sel {
        let name = NativeStr::new(name);
        unsafe { ffi::sel_registerName(name.as_ptr()) }
    }

    /// `sel_getUid`, which is the same thing as [Sel::register] these days.
    pub fn uid(name: &str) -> Sel {
        let name = NativeStr::new(name);
        unsafe { ffi::sel_getUid(name.as_ptr()) }
    }

    pub fn name(self) -> String {
        unsafe { str_from_native(ffi::sel_getName(self)) }
    }

    /// Ask the runtime whether two selectors are the same. This agrees with
    /// `==`.
    pub fn is_equal(self, other: Sel) -> bool {
        to_bool(unsafe { ffi::sel_isEqual(self, other) })
    }
}
