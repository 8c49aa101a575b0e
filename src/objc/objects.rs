/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */
//! Handling of Objective-C objects.
//!
//! Note that classes and metaclasses are objects too!
//!
//! Resources:
//! - [Apple's documentation of `id`](https://developer.apple.com/documentation/objectivec/id)
//!   (which for some reason omits that `id` is a pointer type)
//!
//! Objects are never retained or released here: an [Id] is a plain pointer
//! that is only valid for as long as whoever owns the object keeps it alive.

#[cfg(target_vendor = "apple")]
use super::{ffi, Class, Ivar};
#[cfg(target_vendor = "apple")]
use crate::mem::{str_from_native, NativeStr};
#[cfg(target_vendor = "apple")]
use std::ffi::c_void;

opaque_handle! {
    /// Generic pointer to an Objective-C object (including classes or
    /// metaclasses).
    ///
    /// The name is standard Objective-C (`id`). Unlike the other handles this
    /// isn't [Send]: objects can go away at any time.
    pub struct Id(*mut objc_object);
}

/// Null pointer for Objective-C objects.
///
/// The name is standard Objective-C.
#[allow(non_upper_case_globals)]
pub const nil: Id = Id::null();

#[cfg(target_vendor = "apple")]
impl Id {
    /// Copy the first `size` bytes of the object into a new object.
    ///
    /// # Safety
    /// The object must be alive and at least `size` bytes long.
    pub unsafe fn copy(self, size: usize) -> Id {
        ffi::object_copy(self, size)
    }

    /// Free an object without sending it any messages.
    ///
    /// # Safety
    /// The object must not be used afterwards.
    pub unsafe fn dispose(self) {
        ffi::object_dispose(self);
    }

    /// Store a pointer-sized value in the ivar called `name`, returning the
    /// ivar (null if there is none, in which case nothing is written).
    ///
    /// # Safety
    /// The object must be alive and the ivar must be pointer-sized.
    pub unsafe fn set_instance_variable(self, name: &str, value: *mut c_void) -> Ivar {
        let name = NativeStr::new(name);
        ffi::object_setInstanceVariable(self, name.as_ptr(), value)
    }

    /// Read a pointer-sized ivar by name. The ivar is null, and the value
    /// too, if there is no such ivar.
    ///
    /// # Safety
    /// The object must be alive and the ivar must be pointer-sized.
    pub unsafe fn instance_variable(self, name: &str) -> (Ivar, *mut c_void) {
        let name = NativeStr::new(name);
        let mut value = std::ptr::null_mut();
        let ivar = ffi::object_getInstanceVariable(self, name.as_ptr(), &mut value);
        (ivar, value)
    }

    /// The extra bytes requested by [Class::create_instance].
    ///
    /// # Safety
    /// The object must be alive.
    pub unsafe fn indexed_ivars(self) -> *mut c_void {
        ffi::object_getIndexedIvars(self)
    }

    /// Read an object-typed ivar. Faster than [Id::instance_variable] when
    /// the [Ivar] is already known.
    ///
    /// # Safety
    /// The object must be alive and `ivar` must be an object ivar of its
    /// class.
    pub unsafe fn ivar(self, ivar: Ivar) -> Id {
        ffi::object_getIvar(self, ivar)
    }

    /// # Safety
    /// See [Id::ivar].
    pub unsafe fn set_ivar(self, ivar: Ivar, value: Id) {
        ffi::object_setIvar(self, ivar, value)
    }

    /// Name of the object's class. The runtime answers `"nil"` for [nil].
    pub fn class_name(self) -> String {
        unsafe { str_from_native(ffi::object_getClassName(self)) }
    }

    /// Read the all-important `isa`. Null for [nil].
    pub fn class(self) -> Class {
        unsafe { ffi::object_getClass(self) }
    }

    /// Replace the object's class, returning the previous one.
    ///
    /// # Safety
    /// The new class must have a compatible instance layout.
    pub unsafe fn set_class(self, class: Class) -> Class {
        ffi::object_setClass(self, class)
    }

    /// Tear down an object made with [Class::construct_instance] without
    /// freeing its memory, which is returned.
    ///
    /// # Safety
    /// The object must not be used afterwards.
    pub unsafe fn destruct_instance(self) -> *mut c_void {
        ffi::objc_destructInstance(self)
    }
}
