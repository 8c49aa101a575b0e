/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */
//! Handling of Objective-C properties.
//!
//! Note that these are not the same as instance variables (ivars), though
//! they're closely related: a property's `V` attribute names its backing ivar.
//!
//! A property is described by a list of attributes, each a name and a value.
//! The runtime also exposes them as one string: each attribute is its name
//! followed by its value, and attributes are separated by commas, e.g.
//! `T@"NSString",C,N,V_title`. Names are a single character; longer names are
//! wrapped in double quotes.
//!
//! Resources:
//! - [Declared Properties](https://developer.apple.com/library/archive/documentation/Cocoa/Conceptual/ObjCRuntimeGuide/Articles/ocrtPropertyIntrospection.html)
//! - `copyPropertyAttributeString` and `iteratePropertyAttributes` in
//!   [objc-runtime.mm](https://opensource.apple.com/source/objc4/objc4-551.1/runtime/objc-runtime.mm.auto.html)

use crate::mem::{str_from_native, BuildNativeRecord, NativeHeap, NativeRecord, NativeStr};
use std::ffi::c_char;

#[cfg(target_vendor = "apple")]
use super::ffi;
#[cfg(target_vendor = "apple")]
use crate::mem::{copy_out_records, str_from_native_owned, LibcHeap, NestedStrings};

opaque_handle! {
    /// A property declared by a class or protocol.
    ///
    /// The name is from Objective-C (`objc_property_t`).
    pub struct Property(*mut objc_property);
}

unsafe impl Send for Property {}
unsafe impl Sync for Property {}

/// One facet of a property, e.g. its type (`T`) or backing ivar (`V`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct PropertyAttribute {
    pub name: String,
    pub value: String,
}

impl PropertyAttribute {
    pub fn new(name: &str, value: &str) -> PropertyAttribute {
        PropertyAttribute {
            name: name.to_string(),
            value: value.to_string(),
        }
    }

    /// Encode a list of attributes the way the runtime does for
    /// `property_getAttributes`.
    pub fn encode_list(attributes: &[PropertyAttribute]) -> String {
        attributes
            .iter()
            .map(|attribute| attribute.to_string())
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Decode an attribute string like the one from `property_getAttributes`.
    ///
    /// This is the inverse of [PropertyAttribute::encode_list]. Empty entries
    /// (as in `",,"`) are skipped.
    pub fn parse_list(encoded: &str) -> Vec<PropertyAttribute> {
        encoded
            .split(',')
            .filter(|attribute| !attribute.is_empty())
            .map(|attribute| {
                let (name, value) = if let Some(quoted) = attribute.strip_prefix('"') {
                    quoted.split_once('"').unwrap_or((quoted, ""))
                } else {
                    let name_len = attribute.chars().next().map_or(0, char::len_utf8);
                    attribute.split_at(name_len)
                };
                PropertyAttribute::new(name, value)
            })
            .collect()
    }
}

impl std::fmt::Display for PropertyAttribute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.name.len() == 1 {
            write!(f, "{}{}", self.name, self.value)
        } else {
            write!(f, "\"{}\"{}", self.name, self.value)
        }
    }
}

/// `objc_property_attribute_t` from `<objc/runtime.h>`.
#[allow(non_camel_case_types)]
#[derive(Copy, Clone)]
#[repr(C)]
pub(super) struct objc_property_attribute_t {
    pub(super) name: *const c_char,
    pub(super) value: *const c_char,
}

unsafe impl NativeRecord for objc_property_attribute_t {
    type Host = PropertyAttribute;

    unsafe fn to_host(&self) -> PropertyAttribute {
        PropertyAttribute {
            name: str_from_native(self.name),
            value: str_from_native(self.value),
        }
    }

    fn for_each_nested(&self, f: &mut dyn FnMut(*mut c_char)) {
        f(self.name.cast_mut());
        f(self.value.cast_mut());
    }
}

impl BuildNativeRecord for objc_property_attribute_t {
    fn from_host_in<H: NativeHeap + ?Sized>(host: &PropertyAttribute, heap: &H) -> Self {
        objc_property_attribute_t {
            name: NativeStr::new_in(&host.name, heap).into_raw(),
            value: NativeStr::new_in(&host.value, heap).into_raw(),
        }
    }
}

#[cfg(target_vendor = "apple")]
impl Property {
    pub fn name(self) -> String {
        unsafe { str_from_native(ffi::property_getName(self)) }
    }

    /// The encoded attribute string, see the module documentation.
    pub fn attributes(self) -> String {
        unsafe { str_from_native(ffi::property_getAttributes(self)) }
    }

    /// Value of the attribute called `name`, or empty if there is none.
    pub fn copy_attribute_value(self, name: &str) -> String {
        let name = NativeStr::new(name);
        unsafe {
            str_from_native_owned(
                ffi::property_copyAttributeValue(self, name.as_ptr()),
                &LibcHeap,
            )
        }
    }

    pub fn attribute_list(self) -> Vec<PropertyAttribute> {
        let mut count = 0;
        unsafe {
            let list = ffi::property_copyAttributeList(self, &mut count);
            // The runtime packs the strings into the same allocation as the
            // records.
            copy_out_records(list, count, NestedStrings::Borrowed)
        }
    }
}
