/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */
//! Handling of Objective-C protocols.
//!
//! Like classes, protocols can be created at runtime: [Protocol::allocate],
//! then method descriptions, properties and inherited protocols are added, and
//! finally [Protocol::register]. A registered protocol can't be changed.
//!
//! Methods and properties of a protocol are split along two axes: required or
//! optional (`@required`/`@optional`), and instance or class. Most queries
//! take both flags.

#[cfg(target_vendor = "apple")]
use super::properties::objc_property_attribute_t;
#[cfg(target_vendor = "apple")]
use super::{ffi, from_bool, to_bool, MethodDescription, Property, PropertyAttribute, Sel};
#[cfg(target_vendor = "apple")]
use crate::mem::{
    copy_out, copy_out_records, str_from_native, NativeRecord, NativeRecordArray, NativeStr,
    NestedStrings,
};

opaque_handle! {
    /// A protocol, i.e. a named set of method and property declarations.
    ///
    /// The name is standard Objective-C.
    pub struct Protocol(*mut objc_protocol);
}

unsafe impl Send for Protocol {}
unsafe impl Sync for Protocol {}

#[cfg(target_vendor = "apple")]
impl Protocol {
    /// Look up a protocol by name. Null if there is no such protocol.
    pub fn get(name: &str) -> Protocol {
        let name = NativeStr::new(name);
        unsafe { ffi::objc_getProtocol(name.as_ptr()) }
    }

    /// All registered protocols.
    pub fn list() -> Vec<Protocol> {
        let mut count = 0;
        unsafe {
            let list = ffi::objc_copyProtocolList(&mut count);
            copy_out(list, count)
        }
    }

    /// Create a new protocol. Null if a protocol called `name` already exists.
    ///
    /// Until [Protocol::register] is called, the new protocol must only be
    /// mutated from one thread at a time.
    pub fn allocate(name: &str) -> Protocol {
        let native_name = NativeStr::new(name);
        let protocol = unsafe { ffi::objc_allocateProtocol(native_name.as_ptr()) };
        log_dbg!("Allocated protocol {:?} for {:?}", protocol, name);
        protocol
    }

    pub fn register(self) {
        log_dbg!("Registering protocol {:?}", self);
        unsafe { ffi::objc_registerProtocol(self) }
    }

    pub fn add_method_description(self, sel: Sel, types: &str, required: bool, instance: bool) {
        let types = NativeStr::new(types);
        unsafe {
            ffi::protocol_addMethodDescription(
                self,
                sel,
                types.as_ptr(),
                from_bool(required),
                from_bool(instance),
            )
        }
    }

    /// Make this protocol inherit from `other`.
    pub fn add_protocol(self, other: Protocol) {
        unsafe { ffi::protocol_addProtocol(self, other) }
    }

    pub fn add_property(
        self,
        name: &str,
        attributes: &[PropertyAttribute],
        required: bool,
        instance: bool,
    ) {
        let name = NativeStr::new(name);
        let attributes = NativeRecordArray::<objc_property_attribute_t>::new(attributes);
        unsafe {
            ffi::protocol_addProperty(
                self,
                name.as_ptr(),
                attributes.as_ptr(),
                attributes.count(),
                from_bool(required),
                from_bool(instance),
            )
        }
    }

    pub fn name(self) -> String {
        unsafe { str_from_native(ffi::protocol_getName(self)) }
    }

    pub fn is_equal(self, other: Protocol) -> bool {
        to_bool(unsafe { ffi::protocol_isEqual(self, other) })
    }

    /// Methods declared directly by this protocol, not the ones it inherits.
    pub fn method_descriptions(self, required: bool, instance: bool) -> Vec<MethodDescription> {
        let mut count = 0;
        unsafe {
            let list = ffi::protocol_copyMethodDescriptionList(
                self,
                from_bool(required),
                from_bool(instance),
                &mut count,
            );
            // The type strings belong to the protocol.
            copy_out_records(list, count, NestedStrings::Borrowed)
        }
    }

    /// Look up one method, including inherited protocols. The description
    /// has a null selector and empty types if there is no such method.
    pub fn method_description(self, sel: Sel, required: bool, instance: bool) -> MethodDescription {
        unsafe {
            ffi::protocol_getMethodDescription(self, sel, from_bool(required), from_bool(instance))
                .to_host()
        }
    }

    /// Required instance properties declared by this protocol.
    pub fn properties(self) -> Vec<Property> {
        let mut count = 0;
        unsafe {
            let list = ffi::protocol_copyPropertyList(self, &mut count);
            copy_out(list, count)
        }
    }

    pub fn property(self, name: &str, required: bool, instance: bool) -> Property {
        let name = NativeStr::new(name);
        unsafe {
            ffi::protocol_getProperty(
                self,
                name.as_ptr(),
                from_bool(required),
                from_bool(instance),
            )
        }
    }

    /// Protocols this protocol directly inherits from.
    pub fn protocols(self) -> Vec<Protocol> {
        let mut count = 0;
        unsafe {
            let list = ffi::protocol_copyProtocolList(self, &mut count);
            copy_out(list, count)
        }
    }

    /// Whether this protocol is `other` or inherits from it.
    pub fn conforms_to(self, other: Protocol) -> bool {
        to_bool(unsafe { ffi::protocol_conformsToProtocol(self, other) })
    }
}

