/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */
//! Handling of Objective-C instance variables (ivars).
//!
//! Ivars can only be added to a class pair between
//! [Class::allocate_pair](super::Class::allocate_pair) and
//! [Class::register_pair](super::Class::register_pair). After that the layout
//! of the class's instances is fixed.

#[cfg(target_vendor = "apple")]
use super::ffi;
#[cfg(target_vendor = "apple")]
use crate::mem::str_from_native;

opaque_handle! {
    /// Descriptor of an instance variable (or class variable).
    ///
    /// The name is standard Objective-C.
    pub struct Ivar(*mut objc_ivar);
}

unsafe impl Send for Ivar {}
unsafe impl Sync for Ivar {}

#[cfg(target_vendor = "apple")]
impl Ivar {
    pub fn name(self) -> String {
        unsafe { str_from_native(ffi::ivar_getName(self)) }
    }

    /// The `@encode()`-style type string the ivar was declared with, e.g. `i`.
    pub fn type_encoding(self) -> String {
        unsafe { str_from_native(ffi::ivar_getTypeEncoding(self)) }
    }

    /// Byte offset of the ivar within an instance.
    pub fn offset(self) -> isize {
        unsafe { ffi::ivar_getOffset(self) }
    }
}
