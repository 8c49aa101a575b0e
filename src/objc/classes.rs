/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */
//! Handling of Objective-C classes and metaclasses.
//!
//! Note that metaclasses are just a special case of classes.
//!
//! New classes are created in three steps: [Class::allocate_pair] creates the
//! class and its metaclass, ivars, methods, protocols and properties are added
//! to it, and [Class::register_pair] makes it usable. Ivars can only be added
//! before registration. A class pair that is no longer wanted can be destroyed
//! with [Class::dispose_pair], as long as no instances or subclasses exist.
//!
//! Resources:
//! - [[objc explain]: Classes and metaclasses](http://www.sealiesoftware.com/blog/archive/2009/04/14/objc_explain_Classes_and_metaclasses.html), especially [the PDF diagram](http://www.sealiesoftware.com/blog/class%20diagram.pdf)
//! - [Apple's documentation of `objc_allocateClassPair`](https://developer.apple.com/documentation/objectivec/1418559-objc_allocateclasspair?language=objc)

#[cfg(target_vendor = "apple")]
use super::properties::objc_property_attribute_t;
#[cfg(target_vendor = "apple")]
use super::{
    ffi, to_bool, Id, Imp, Ivar, Method, MethodImplementation, Property, PropertyAttribute,
    Protocol, Sel,
};
#[cfg(target_vendor = "apple")]
use crate::mem::{copy_out, str_from_native, NativeRecordArray, NativeStr};
#[cfg(target_vendor = "apple")]
use std::ffi::c_void;
use std::ffi::{CStr, CString};

opaque_handle! {
    /// Generic pointer to an Objective-C class or metaclass.
    ///
    /// The name is standard Objective-C.
    pub struct Class(*mut objc_class);
}

// Classes are never unloaded once registered.
unsafe impl Send for Class {}
unsafe impl Sync for Class {}

/// Ivar layouts are strings of run-length nibbles with no nul bytes in
/// them. An empty layout is passed as null.
#[cfg_attr(not(target_vendor = "apple"), allow(dead_code))]
fn layout_to_native(layout: &[u8]) -> Option<CString> {
    let end = layout
        .iter()
        .position(|&byte| byte == 0)
        .unwrap_or(layout.len());
    if end == 0 {
        None
    } else {
        CString::new(&layout[..end]).ok()
    }
}

#[cfg_attr(not(target_vendor = "apple"), allow(dead_code))]
unsafe fn layout_from_native(layout: *const u8) -> Vec<u8> {
    if layout.is_null() {
        Vec::new()
    } else {
        CStr::from_ptr(layout.cast()).to_bytes().to_vec()
    }
}

#[cfg(target_vendor = "apple")]
impl Class {
    /// Look up a class by name (`objc_getClass`). Null if there is no such
    /// class.
    pub fn get(name: &str) -> Class {
        let name = NativeStr::new(name);
        unsafe { ffi::objc_getClass(name.as_ptr()) }
    }

    /// Like [Class::get], but without calling the class handler for
    /// classes that aren't loaded yet.
    pub fn look_up(name: &str) -> Class {
        let name = NativeStr::new(name);
        unsafe { ffi::objc_lookUpClass(name.as_ptr()) }
    }

    /// Look up the metaclass of the class called `name`.
    pub fn get_meta(name: &str) -> Class {
        let name = NativeStr::new(name);
        unsafe { ffi::objc_getMetaClass(name.as_ptr()) }
    }

    /// All registered classes.
    pub fn list() -> Vec<Class> {
        let mut count = 0;
        unsafe {
            let list = ffi::objc_copyClassList(&mut count);
            copy_out(list, count)
        }
    }

    /// Number of registered classes, without copying them out.
    pub fn count() -> usize {
        let count = unsafe { ffi::objc_getClassList(std::ptr::null_mut(), 0) };
        count.try_into().unwrap_or(0)
    }

    /// Create a new class and its metaclass. Null if a class called `name`
    /// already exists.
    ///
    /// `extra_bytes` is usually 0; it reserves space after the ivars of
    /// the class object itself (indexed ivars of the class).
    ///
    /// Until [Class::register_pair] is called, the new class must only be
    /// mutated from one thread at a time.
    pub fn allocate_pair(superclass: Class, name: &str, extra_bytes: usize) -> Class {
        let native_name = NativeStr::new(name);
        let class =
            unsafe { ffi::objc_allocateClassPair(superclass, native_name.as_ptr(), extra_bytes) };
        log_dbg!(
            "Allocated class pair {:?} for {:?} (superclass {:?})",
            class,
            name,
            superclass
        );
        class
    }

    pub fn register_pair(self) {
        log_dbg!("Registering class pair {:?}", self);
        unsafe { ffi::objc_registerClassPair(self) }
    }

    /// Destroy a class pair created by [Class::allocate_pair]. The class
    /// must not have instances or subclasses.
    pub fn dispose_pair(self) {
        log_dbg!("Disposing of class pair {:?}", self);
        unsafe { ffi::objc_disposeClassPair(self) }
    }

    pub fn name(self) -> String {
        unsafe { str_from_native(ffi::class_getName(self)) }
    }

    /// Null for a root class.
    pub fn superclass(self) -> Class {
        unsafe { ffi::class_getSuperclass(self) }
    }

    pub fn is_metaclass(self) -> bool {
        to_bool(unsafe { ffi::class_isMetaClass(self) })
    }

    /// Size in bytes of instances of this class.
    pub fn instance_size(self) -> usize {
        unsafe { ffi::class_getInstanceSize(self) }
    }

    pub fn instance_variable(self, name: &str) -> Ivar {
        let name = NativeStr::new(name);
        unsafe { ffi::class_getInstanceVariable(self, name.as_ptr()) }
    }

    pub fn class_variable(self, name: &str) -> Ivar {
        let name = NativeStr::new(name);
        unsafe { ffi::class_getClassVariable(self, name.as_ptr()) }
    }

    /// Ivars declared by this class itself, not its superclasses.
    pub fn ivars(self) -> Vec<Ivar> {
        let mut count = 0;
        unsafe {
            let list = ffi::class_copyIvarList(self, &mut count);
            copy_out(list, count)
        }
    }

    /// Layout of the strong references among the ivars. Empty if the class
    /// has none recorded.
    pub fn ivar_layout(self) -> Vec<u8> {
        unsafe { layout_from_native(ffi::class_getIvarLayout(self)) }
    }

    /// The runtime copies the layout; an empty one clears it.
    pub fn set_ivar_layout(self, layout: &[u8]) {
        let layout = layout_to_native(layout);
        let ptr = layout
            .as_ref()
            .map_or(std::ptr::null(), |layout| layout.as_ptr().cast());
        unsafe { ffi::class_setIvarLayout(self, ptr) }
    }

    pub fn weak_ivar_layout(self) -> Vec<u8> {
        unsafe { layout_from_native(ffi::class_getWeakIvarLayout(self)) }
    }

    pub fn set_weak_ivar_layout(self, layout: &[u8]) {
        let layout = layout_to_native(layout);
        let ptr = layout
            .as_ref()
            .map_or(std::ptr::null(), |layout| layout.as_ptr().cast());
        unsafe { ffi::class_setWeakIvarLayout(self, ptr) }
    }

    pub fn property(self, name: &str) -> Property {
        let name = NativeStr::new(name);
        unsafe { ffi::class_getProperty(self, name.as_ptr()) }
    }

    /// Properties declared by this class itself, not its superclasses.
    pub fn properties(self) -> Vec<Property> {
        let mut count = 0;
        unsafe {
            let list = ffi::class_copyPropertyList(self, &mut count);
            copy_out(list, count)
        }
    }

    /// Look up an instance method, searching superclasses too.
    pub fn instance_method(self, sel: Sel) -> Method {
        unsafe { ffi::class_getInstanceMethod(self, sel) }
    }

    /// Look up a class method, searching superclasses too.
    pub fn class_method(self, sel: Sel) -> Method {
        unsafe { ffi::class_getClassMethod(self, sel) }
    }

    /// Instance methods implemented by this class itself. For class
    /// methods, ask the metaclass.
    pub fn methods(self) -> Vec<Method> {
        let mut count = 0;
        unsafe {
            let list = ffi::class_copyMethodList(self, &mut count);
            copy_out(list, count)
        }
    }

    /// The function that would be called for a message with this
    /// selector. If no method matches, this is the runtime's message
    /// forwarding function rather than null.
    pub fn method_implementation(self, sel: Sel) -> Imp {
        unsafe { ffi::class_getMethodImplementation(self, sel) }
    }

    /// [Class::method_implementation] for methods returning structures in
    /// memory.
    #[cfg(target_arch = "x86_64")]
    pub fn method_implementation_stret(self, sel: Sel) -> Imp {
        unsafe { ffi::class_getMethodImplementation_stret(self, sel) }
    }

    pub fn responds_to_selector(self, sel: Sel) -> bool {
        to_bool(unsafe { ffi::class_respondsToSelector(self, sel) })
    }

    pub fn conforms_to(self, protocol: Protocol) -> bool {
        to_bool(unsafe { ffi::class_conformsToProtocol(self, protocol) })
    }

    /// Protocols adopted by this class itself.
    pub fn protocols(self) -> Vec<Protocol> {
        let mut count = 0;
        unsafe {
            let list = ffi::class_copyProtocolList(self, &mut count);
            copy_out(list, count)
        }
    }

    /// Path of the binary image the class was loaded from. Empty for
    /// classes created at runtime.
    pub fn image_name(self) -> String {
        unsafe { str_from_native(ffi::class_getImageName(self)) }
    }

    pub fn version(self) -> i32 {
        unsafe { ffi::class_getVersion(self) }
    }

    pub fn set_version(self, version: i32) {
        unsafe { ffi::class_setVersion(self, version) }
    }

    /// Add an ivar to a class that hasn't been registered yet. False if
    /// the class already has an ivar with that name (which is left as it
    /// is), or if the class is registered.
    ///
    /// `alignment` is the log2 of the required alignment, e.g. 3 for a
    /// pointer on a 64-bit platform.
    pub fn add_ivar(self, name: &str, size: usize, alignment: u8, types: &str) -> bool {
        let name = NativeStr::new(name);
        let types = NativeStr::new(types);
        to_bool(unsafe {
            ffi::class_addIvar(self, name.as_ptr(), size, alignment, types.as_ptr())
        })
    }

    /// Add a method. False if this class already implements `sel` (a
    /// superclass implementation is overridden, though).
    pub fn add_method(self, sel: Sel, imp: impl MethodImplementation, types: &str) -> bool {
        let types = NativeStr::new(types);
        to_bool(unsafe { ffi::class_addMethod(self, sel, imp.imp(), types.as_ptr()) })
    }

    /// Add or replace a method, returning the previous implementation in
    /// this class (null if there was none). `types` is ignored when the
    /// method already exists.
    pub fn replace_method(self, sel: Sel, imp: impl MethodImplementation, types: &str) -> Imp {
        let types = NativeStr::new(types);
        unsafe { ffi::class_replaceMethod(self, sel, imp.imp(), types.as_ptr()) }
    }

    pub fn add_protocol(self, protocol: Protocol) -> bool {
        to_bool(unsafe { ffi::class_addProtocol(self, protocol) })
    }

    /// False if the class already has a property called `name`.
    pub fn add_property(self, name: &str, attributes: &[PropertyAttribute]) -> bool {
        let name = NativeStr::new(name);
        let attributes = NativeRecordArray::<objc_property_attribute_t>::new(attributes);
        to_bool(unsafe {
            ffi::class_addProperty(
                self,
                name.as_ptr(),
                attributes.as_ptr(),
                attributes.count(),
            )
        })
    }

    /// Like [Class::add_property], but replaces the attributes of an
    /// existing property.
    pub fn replace_property(self, name: &str, attributes: &[PropertyAttribute]) {
        let name = NativeStr::new(name);
        let attributes = NativeRecordArray::<objc_property_attribute_t>::new(attributes);
        unsafe {
            ffi::class_replaceProperty(
                self,
                name.as_ptr(),
                attributes.as_ptr(),
                attributes.count(),
            )
        }
    }

    /// Allocate a zeroed instance with `extra_bytes` of indexed ivars
    /// after the declared ones.
    pub fn create_instance(self, extra_bytes: usize) -> Id {
        unsafe { ffi::class_createInstance(self, extra_bytes) }
    }

    /// Turn caller-provided memory into an instance of this class.
    ///
    /// # Safety
    /// `bytes` must be zeroed, suitably aligned and at least
    /// [Class::instance_size] bytes long, and outlive the object.
    pub unsafe fn construct_instance(self, bytes: *mut c_void) -> Id {
        ffi::objc_constructInstance(self, bytes)
    }
}
