/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */
//! Handling of Objective-C methods.
//!
//! Resources:
//! - [Apple's documentation of `class_addMethod`](https://developer.apple.com/documentation/objectivec/1418901-class_addmethod?language=objc)
//! - [Type Encodings](https://developer.apple.com/library/archive/documentation/Cocoa/Conceptual/ObjCRuntimeGuide/Articles/ocrtTypeEncodings.html)

use super::{Id, Sel};
use crate::mem::{str_from_native, NativeRecord};
use std::ffi::c_char;

#[cfg(target_vendor = "apple")]
use super::ffi;
#[cfg(target_vendor = "apple")]
use crate::mem::{str_from_native_owned, LibcHeap};

opaque_handle! {
    /// A method of a class: a selector, a type encoding and an
    /// implementation.
    ///
    /// The name is standard Objective-C.
    pub struct Method(*mut objc_method);
}

unsafe impl Send for Method {}
unsafe impl Sync for Method {}

/// Pointer to a function implementing a method.
///
/// The name is standard Objective-C (`IMP`). The function must take the
/// receiver ([Id]) and the selector ([Sel]) as its first two arguments; the
/// rest of the signature is described by the type encoding the method was
/// added with. Host functions can be turned into an `Imp` with
/// [MethodImplementation].
#[derive(Copy, Clone, Default)]
#[repr(transparent)]
pub struct Imp(Option<unsafe extern "C" fn()>);

impl Imp {
    /// The absent implementation.
    pub const NULL: Imp = Imp(None);

    pub const fn from_fn(function: unsafe extern "C" fn()) -> Imp {
        Imp(Some(function))
    }

    pub fn is_null(self) -> bool {
        self.0.is_none()
    }

    /// The function pointer, to be transmuted to the method's real signature
    /// before calling it.
    pub fn as_fn(self) -> Option<unsafe extern "C" fn()> {
        self.0
    }

    pub fn addr(self) -> usize {
        self.0.map_or(0, |function| function as usize)
    }
}

impl PartialEq for Imp {
    fn eq(&self, other: &Self) -> bool {
        self.addr() == other.addr()
    }
}
impl Eq for Imp {}
impl std::hash::Hash for Imp {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.addr().hash(state);
    }
}

impl std::fmt::Debug for Imp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_null() {
            write!(f, "Imp(null)")
        } else {
            write!(f, "Imp({:#x})", self.addr())
        }
    }
}

/// Host functions that can implement a method.
///
/// This is implemented for `extern "C"` functions whose first two parameters
/// are the receiver and the selector, with up to six further parameters:
///
/// ```ignore
/// extern "C" fn answer(_this: Id, _cmd: Sel) -> i32 {
///     42
/// }
/// class.add_method(Sel::register("answer"), answer as extern "C" fn(_, _) -> _, "i@:");
/// ```
///
/// # Safety
/// The type encoding given alongside the implementation must describe the
/// function's real signature, otherwise the runtime will call it wrongly.
pub unsafe trait MethodImplementation: Copy {
    fn imp(self) -> Imp;
}

unsafe impl MethodImplementation for Imp {
    fn imp(self) -> Imp {
        self
    }
}

macro_rules! impl_method_implementation {
    ($($param:ident),*) => {
        unsafe impl<R, $($param),*> MethodImplementation for extern "C" fn(Id, Sel $(, $param)*) -> R {
            fn imp(self) -> Imp {
                Imp::from_fn(unsafe { std::mem::transmute::<Self, unsafe extern "C" fn()>(self) })
            }
        }
        unsafe impl<R, $($param),*> MethodImplementation
            for unsafe extern "C" fn(Id, Sel $(, $param)*) -> R
        {
            fn imp(self) -> Imp {
                Imp::from_fn(unsafe { std::mem::transmute::<Self, unsafe extern "C" fn()>(self) })
            }
        }
    };
}

impl_method_implementation!();
impl_method_implementation!(P1);
impl_method_implementation!(P1, P2);
impl_method_implementation!(P1, P2, P3);
impl_method_implementation!(P1, P2, P3, P4);
impl_method_implementation!(P1, P2, P3, P4, P5);
impl_method_implementation!(P1, P2, P3, P4, P5, P6);

/// `struct objc_method_description` from `<objc/runtime.h>`.
#[allow(non_camel_case_types)]
#[derive(Copy, Clone)]
#[repr(C)]
pub(super) struct objc_method_description {
    pub(super) name: Sel,
    pub(super) types: *mut c_char,
}

/// A method as declared by a protocol: its selector and type encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDescription {
    pub name: Sel,
    pub types: String,
}

impl Default for MethodDescription {
    fn default() -> Self {
        MethodDescription {
            name: Sel::null(),
            types: String::new(),
        }
    }
}

unsafe impl NativeRecord for objc_method_description {
    type Host = MethodDescription;

    unsafe fn to_host(&self) -> MethodDescription {
        MethodDescription {
            name: self.name,
            types: str_from_native(self.types),
        }
    }

    fn for_each_nested(&self, f: &mut dyn FnMut(*mut c_char)) {
        // The selector is interned, only the type string could be ours.
        f(self.types);
    }
}

#[cfg(target_vendor = "apple")]
impl Method {
    pub fn name(self) -> Sel {
        unsafe { ffi::method_getName(self) }
    }

    pub fn implementation(self) -> Imp {
        unsafe { ffi::method_getImplementation(self) }
    }

    pub fn type_encoding(self) -> String {
        unsafe { str_from_native(ffi::method_getTypeEncoding(self)) }
    }

    /// Type encoding of the return type alone.
    pub fn return_type(self) -> String {
        unsafe { str_from_native_owned(ffi::method_copyReturnType(self), &LibcHeap) }
    }

    /// Type encoding of one parameter, counting the receiver and selector as
    /// 0 and 1. Empty if there is no such parameter.
    pub fn argument_type(self, index: u32) -> String {
        unsafe { str_from_native_owned(ffi::method_copyArgumentType(self, index), &LibcHeap) }
    }

    /// Number of parameters, including the receiver and selector.
    pub fn number_of_arguments(self) -> u32 {
        unsafe { ffi::method_getNumberOfArguments(self) }
    }

    pub fn description(self) -> MethodDescription {
        let description = unsafe { ffi::method_getDescription(self) };
        if description.is_null() {
            return MethodDescription::default();
        }
        // Points into the method itself, nothing to release.
        unsafe { (*description).to_host() }
    }

    /// Swap in a new implementation, returning the previous one.
    pub fn set_implementation(self, imp: impl MethodImplementation) -> Imp {
        unsafe { ffi::method_setImplementation(self, imp.imp()) }
    }

    pub fn exchange_implementations(self, other: Method) {
        unsafe { ffi::method_exchangeImplementations(self, other) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mem::testing::CountingHeap;
    use crate::mem::{copy_out_records_in, NativeStr, NestedStrings};
    use crate::objc::nil;

    extern "C" fn answer(_this: Id, _cmd: Sel) -> i32 {
        42
    }

    extern "C" fn add(_this: Id, _cmd: Sel, a: i64, b: i64) -> i64 {
        a + b
    }

    #[test]
    fn test_imp_from_host_function() {
        let imp = (answer as extern "C" fn(Id, Sel) -> i32).imp();
        assert!(!imp.is_null());
        assert_eq!(imp.addr(), answer as usize);
        assert_eq!(imp, (answer as extern "C" fn(Id, Sel) -> i32).imp());
        assert_ne!(imp, Imp::NULL);

        let function: extern "C" fn(Id, Sel) -> i32 =
            unsafe { std::mem::transmute(imp.as_fn().unwrap()) };
        assert_eq!(function(nil, Sel::null()), 42);

        let imp = (add as extern "C" fn(Id, Sel, i64, i64) -> i64).imp();
        let function: extern "C" fn(Id, Sel, i64, i64) -> i64 =
            unsafe { std::mem::transmute(imp.as_fn().unwrap()) };
        assert_eq!(function(nil, Sel::null(), 40, 2), 42);
    }

    #[test]
    fn test_null_imp() {
        assert!(Imp::NULL.is_null());
        assert_eq!(Imp::NULL.addr(), 0);
        assert_eq!(Imp::default(), Imp::NULL);
        assert_eq!(format!("{:?}", Imp::NULL), "Imp(null)");
    }

    #[test]
    fn test_method_description_layout() {
        use std::mem::{align_of, size_of};
        assert_eq!(size_of::<objc_method_description>(), 2 * size_of::<*mut u8>());
        assert_eq!(align_of::<objc_method_description>(), align_of::<*mut u8>());
    }

    #[test]
    fn test_method_description_list_with_owned_types() {
        let heap = CountingHeap::default();
        let sel_a = Sel::from_ptr(0x10 as *mut _);
        let sel_b = Sel::from_ptr(0x20 as *mut _);
        let base = heap.alloc_array(&[
            objc_method_description {
                name: sel_a,
                types: NativeStr::new_in("v16@0:8", &heap).into_raw(),
            },
            objc_method_description {
                name: sel_b,
                types: std::ptr::null_mut(),
            },
        ]);

        let descriptions =
            unsafe { copy_out_records_in(base, 2, NestedStrings::Owned, &heap) };
        assert_eq!(
            descriptions,
            vec![
                MethodDescription {
                    name: sel_a,
                    types: "v16@0:8".to_string()
                },
                MethodDescription {
                    name: sel_b,
                    types: String::new()
                },
            ]
        );
        heap.assert_all_released();
    }
}
