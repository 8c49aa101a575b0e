/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */
//! Bindings for the Objective-C runtime.
//!
//! Apple's [Programming with Objective-C](https://developer.apple.com/library/archive/documentation/Cocoa/Conceptual/ProgrammingWithObjectiveC/Introduction/Introduction.html)
//! is a useful introduction to the language from a user's perspective, and
//! the [Objective-C Runtime Programming Guide](https://developer.apple.com/library/archive/documentation/Cocoa/Conceptual/ObjCRuntimeGuide/Introduction/Introduction.html)
//! covers the C API wrapped here.
//!
//! Nothing here reimplements the runtime. Every entity (class, method,
//! selector, object...) is owned by the system's runtime and is only referred
//! to by an opaque handle, one type per kind of entity, so that e.g. a
//! [Method] can't be passed where a [Class] is expected. Handles are compared
//! by address and are never dereferenced by this crate.
//!
//! Not finding something is a normal outcome in this API, not an error: any
//! lookup that comes up empty returns a null handle (see `is_null` and
//! `non_null` on each handle type), `false`, an empty list or an empty string.
//!
//! The functions that call into the runtime are only available on Apple
//! platforms, where `libobjc` is linked. The handle types and the property
//! attribute grammar are available everywhere.
//!
//! # Threads
//!
//! The runtime's queries can be called from any thread. Adding ivars, methods,
//! protocols or properties to a class or protocol that hasn't been registered
//! yet is not synchronized by this crate: the caller must make sure no other
//! thread is using that class or protocol at the same time.

/// Define a handle type for some kind of runtime entity, along with the
/// opaque native type it points to.
macro_rules! opaque_handle {
    (
        $(#[$meta:meta])*
        pub struct $name:ident(*mut $native:ident);
    ) => {
        /// Opaque native type. Only ever used behind a pointer.
        #[allow(non_camel_case_types)]
        #[repr(C)]
        pub struct $native {
            _private: [u8; 0],
        }

        $(#[$meta])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash)]
        #[repr(transparent)]
        pub struct $name(*mut $native);

        impl $name {
            /// The absent handle.
            pub const fn null() -> Self {
                $name(std::ptr::null_mut())
            }

            /// Wrap a pointer obtained from the runtime some other way.
            pub const fn from_ptr(ptr: *mut $native) -> Self {
                $name(ptr)
            }

            pub fn as_ptr(self) -> *mut $native {
                self.0
            }

            pub fn is_null(self) -> bool {
                self.0.is_null()
            }

            /// `None` for the absent handle, for use with `?` and friends.
            pub fn non_null(self) -> Option<Self> {
                if self.is_null() {
                    None
                } else {
                    Some(self)
                }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::null()
            }
        }

        impl std::fmt::Debug for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                if self.is_null() {
                    write!(f, "{}(null)", stringify!($name))
                } else {
                    write!(f, "{}({:#x})", stringify!($name), self.0 as usize)
                }
            }
        }
    };
}

mod associated;
mod classes;
#[cfg(target_vendor = "apple")]
mod ffi;
#[cfg(target_vendor = "apple")]
mod images;
mod ivars;
mod methods;
mod objects;
mod properties;
mod protocols;
mod selectors;

pub use associated::{AssociationKey, AssociationPolicy};
pub use classes::Class;
#[cfg(target_vendor = "apple")]
pub use images::{class_names_for_image, image_names};
pub use ivars::Ivar;
pub use methods::{Imp, Method, MethodDescription, MethodImplementation};
pub use objects::{nil, Id};
pub use properties::{Property, PropertyAttribute};
pub use protocols::Protocol;
pub use selectors::Sel;

/// The runtime's boolean type.
///
/// The name is standard Objective-C. On 64-bit Arm it is a C `bool`, elsewhere
/// it is a `signed char`.
#[cfg(all(target_vendor = "apple", target_arch = "aarch64"))]
#[allow(clippy::upper_case_acronyms)]
pub type BOOL = bool;
#[cfg(not(all(target_vendor = "apple", target_arch = "aarch64")))]
#[allow(clippy::upper_case_acronyms)]
pub type BOOL = i8;

#[cfg(all(target_vendor = "apple", target_arch = "aarch64"))]
pub const YES: BOOL = true;
#[cfg(all(target_vendor = "apple", target_arch = "aarch64"))]
pub const NO: BOOL = false;
#[cfg(not(all(target_vendor = "apple", target_arch = "aarch64")))]
pub const YES: BOOL = 1;
#[cfg(not(all(target_vendor = "apple", target_arch = "aarch64")))]
pub const NO: BOOL = 0;

#[cfg_attr(not(target_vendor = "apple"), allow(dead_code))]
fn to_bool(value: BOOL) -> bool {
    value != NO
}

#[cfg_attr(not(target_vendor = "apple"), allow(dead_code))]
fn from_bool(value: bool) -> BOOL {
    if value {
        YES
    } else {
        NO
    }
}
