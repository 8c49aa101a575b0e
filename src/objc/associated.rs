/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */
//! Associated objects: values attached to an object at runtime, without an
//! ivar.
//!
//! The runtime keeps the table; nothing is mirrored on our side. Each value is
//! stored under a key, which is compared by address only, and a policy saying
//! how the runtime should hold on to the value.
//!
//! Resources:
//! - [Apple's documentation of `objc_setAssociatedObject`](https://developer.apple.com/documentation/objectivec/1418509-objc_setassociatedobject?language=objc)

use super::Sel;
use std::ffi::c_void;

#[cfg(target_vendor = "apple")]
use super::{ffi, nil, Id};

/// Key of an associated object. Two keys are the same key if and only if
/// they are the same address.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct AssociationKey(*const c_void);

unsafe impl Send for AssociationKey {}
unsafe impl Sync for AssociationKey {}

impl AssociationKey {
    /// Use the address of a static as the key, which is the usual idiom:
    ///
    /// ```ignore
    /// static CACHE_KEY: u8 = 0;
    /// object.set_associated_object(AssociationKey::from_ref(&CACHE_KEY), value, policy);
    /// ```
    pub fn from_ref<T>(value: &'static T) -> AssociationKey {
        AssociationKey((value as *const T).cast())
    }

    pub fn as_ptr(self) -> *const c_void {
        self.0
    }
}

/// Selectors are unique per name, so a selector makes a good key too.
impl From<Sel> for AssociationKey {
    fn from(sel: Sel) -> AssociationKey {
        AssociationKey(sel.as_ptr().cast_const().cast())
    }
}

/// How the runtime holds an associated value (`objc_AssociationPolicy`).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(usize)]
pub enum AssociationPolicy {
    /// Weak reference, not retained.
    Assign = 0,
    RetainNonatomic = 1,
    CopyNonatomic = 3,
    Retain = 0o1401,
    Copy = 0o1403,
}

#[cfg(target_vendor = "apple")]
impl Id {
    /// Associate `value` with this object under `key`, replacing any previous
    /// value. Passing [nil] removes the association.
    ///
    /// # Safety
    /// The object must be alive, and `value` too unless it is [nil].
    pub unsafe fn set_associated_object(
        self,
        key: AssociationKey,
        value: Id,
        policy: AssociationPolicy,
    ) {
        ffi::objc_setAssociatedObject(self, key.as_ptr(), value, policy as usize)
    }

    /// The value associated under `key`, or [nil].
    ///
    /// # Safety
    /// The object must be alive.
    pub unsafe fn associated_object(self, key: AssociationKey) -> Id {
        ffi::objc_getAssociatedObject(self, key.as_ptr())
    }

    /// Remove every association of this object, including ones made by other
    /// code. Meant for returning an object to a pristine state.
    ///
    /// # Safety
    /// The object must be alive.
    pub unsafe fn remove_associated_objects(self) {
        ffi::objc_removeAssociatedObjects(self)
    }

    /// Convenience for removing one association.
    ///
    /// # Safety
    /// The object must be alive.
    pub unsafe fn remove_associated_object(self, key: AssociationKey) {
        self.set_associated_object(key, nil, AssociationPolicy::Assign)
    }
}
