/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */
//! Raw declarations of the `libobjc` C API.
//!
//! These follow `<objc/runtime.h>`. The handle types are
//! `#[repr(transparent)]` over the corresponding C pointer types, so they can
//! be used directly in the signatures.
//!
//! Functions returning a `*mut` array or string transfer ownership of a
//! `malloc`ed buffer; see [crate::mem] for how those are released.

#![allow(non_snake_case)]

use super::methods::objc_method_description;
use super::properties::objc_property_attribute_t;
use super::{Class, Id, Imp, Ivar, Method, Property, Protocol, Sel, BOOL};
use std::ffi::{c_char, c_int, c_uint, c_void};

#[link(name = "objc", kind = "dylib")]
extern "C" {
    // Selectors
    pub fn sel_getName(sel: Sel) -> *const c_char;
    pub fn sel_registerName(name: *const c_char) -> Sel;
    pub fn sel_getUid(name: *const c_char) -> Sel;
    pub fn sel_isEqual(lhs: Sel, rhs: Sel) -> BOOL;

    // Class lookup and class pairs
    pub fn objc_getClass(name: *const c_char) -> Class;
    pub fn objc_getMetaClass(name: *const c_char) -> Class;
    pub fn objc_lookUpClass(name: *const c_char) -> Class;
    pub fn objc_getClassList(buffer: *mut Class, bufferCount: c_int) -> c_int;
    pub fn objc_copyClassList(outCount: *mut c_uint) -> *mut Class;
    pub fn objc_allocateClassPair(
        superclass: Class,
        name: *const c_char,
        extraBytes: usize,
    ) -> Class;
    pub fn objc_registerClassPair(cls: Class);
    pub fn objc_disposeClassPair(cls: Class);

    // Classes
    pub fn class_getName(cls: Class) -> *const c_char;
    pub fn class_getSuperclass(cls: Class) -> Class;
    pub fn class_isMetaClass(cls: Class) -> BOOL;
    pub fn class_getInstanceSize(cls: Class) -> usize;
    pub fn class_getInstanceVariable(cls: Class, name: *const c_char) -> Ivar;
    pub fn class_getClassVariable(cls: Class, name: *const c_char) -> Ivar;
    pub fn class_addIvar(
        cls: Class,
        name: *const c_char,
        size: usize,
        alignment: u8,
        types: *const c_char,
    ) -> BOOL;
    pub fn class_copyIvarList(cls: Class, outCount: *mut c_uint) -> *mut Ivar;
    pub fn class_getIvarLayout(cls: Class) -> *const u8;
    pub fn class_setIvarLayout(cls: Class, layout: *const u8);
    pub fn class_getWeakIvarLayout(cls: Class) -> *const u8;
    pub fn class_setWeakIvarLayout(cls: Class, layout: *const u8);
    pub fn class_getProperty(cls: Class, name: *const c_char) -> Property;
    pub fn class_copyPropertyList(cls: Class, outCount: *mut c_uint) -> *mut Property;
    pub fn class_addProperty(
        cls: Class,
        name: *const c_char,
        attributes: *const objc_property_attribute_t,
        attributeCount: c_uint,
    ) -> BOOL;
    pub fn class_replaceProperty(
        cls: Class,
        name: *const c_char,
        attributes: *const objc_property_attribute_t,
        attributeCount: c_uint,
    );
    pub fn class_addMethod(cls: Class, name: Sel, imp: Imp, types: *const c_char) -> BOOL;
    pub fn class_getInstanceMethod(cls: Class, name: Sel) -> Method;
    pub fn class_getClassMethod(cls: Class, name: Sel) -> Method;
    pub fn class_copyMethodList(cls: Class, outCount: *mut c_uint) -> *mut Method;
    pub fn class_replaceMethod(cls: Class, name: Sel, imp: Imp, types: *const c_char) -> Imp;
    pub fn class_getMethodImplementation(cls: Class, name: Sel) -> Imp;
    #[cfg(target_arch = "x86_64")]
    pub fn class_getMethodImplementation_stret(cls: Class, name: Sel) -> Imp;
    pub fn class_respondsToSelector(cls: Class, sel: Sel) -> BOOL;
    pub fn class_addProtocol(cls: Class, protocol: Protocol) -> BOOL;
    pub fn class_conformsToProtocol(cls: Class, protocol: Protocol) -> BOOL;
    pub fn class_copyProtocolList(cls: Class, outCount: *mut c_uint) -> *mut Protocol;
    pub fn class_getImageName(cls: Class) -> *const c_char;
    pub fn class_getVersion(cls: Class) -> c_int;
    pub fn class_setVersion(cls: Class, version: c_int);
    pub fn class_createInstance(cls: Class, extraBytes: usize) -> Id;

    // Instance variables
    pub fn ivar_getName(v: Ivar) -> *const c_char;
    pub fn ivar_getTypeEncoding(v: Ivar) -> *const c_char;
    pub fn ivar_getOffset(v: Ivar) -> isize;

    // Methods
    pub fn method_getName(m: Method) -> Sel;
    pub fn method_getImplementation(m: Method) -> Imp;
    pub fn method_getTypeEncoding(m: Method) -> *const c_char;
    pub fn method_copyReturnType(m: Method) -> *mut c_char;
    pub fn method_copyArgumentType(m: Method, index: c_uint) -> *mut c_char;
    pub fn method_getNumberOfArguments(m: Method) -> c_uint;
    pub fn method_getDescription(m: Method) -> *const objc_method_description;
    pub fn method_setImplementation(m: Method, imp: Imp) -> Imp;
    pub fn method_exchangeImplementations(m1: Method, m2: Method);

    // Properties
    pub fn property_getName(property: Property) -> *const c_char;
    pub fn property_getAttributes(property: Property) -> *const c_char;
    pub fn property_copyAttributeValue(
        property: Property,
        attributeName: *const c_char,
    ) -> *mut c_char;
    pub fn property_copyAttributeList(
        property: Property,
        outCount: *mut c_uint,
    ) -> *mut objc_property_attribute_t;

    // Protocols
    pub fn objc_getProtocol(name: *const c_char) -> Protocol;
    pub fn objc_copyProtocolList(outCount: *mut c_uint) -> *mut Protocol;
    pub fn objc_allocateProtocol(name: *const c_char) -> Protocol;
    pub fn objc_registerProtocol(proto: Protocol);
    pub fn protocol_addMethodDescription(
        proto: Protocol,
        name: Sel,
        types: *const c_char,
        isRequiredMethod: BOOL,
        isInstanceMethod: BOOL,
    );
    pub fn protocol_addProtocol(proto: Protocol, addition: Protocol);
    pub fn protocol_addProperty(
        proto: Protocol,
        name: *const c_char,
        attributes: *const objc_property_attribute_t,
        attributeCount: c_uint,
        isRequiredProperty: BOOL,
        isInstanceProperty: BOOL,
    );
    pub fn protocol_getName(proto: Protocol) -> *const c_char;
    pub fn protocol_isEqual(proto: Protocol, other: Protocol) -> BOOL;
    pub fn protocol_copyMethodDescriptionList(
        proto: Protocol,
        isRequiredMethod: BOOL,
        isInstanceMethod: BOOL,
        outCount: *mut c_uint,
    ) -> *mut objc_method_description;
    pub fn protocol_getMethodDescription(
        proto: Protocol,
        aSel: Sel,
        isRequiredMethod: BOOL,
        isInstanceMethod: BOOL,
    ) -> objc_method_description;
    pub fn protocol_copyPropertyList(proto: Protocol, outCount: *mut c_uint) -> *mut Property;
    pub fn protocol_getProperty(
        proto: Protocol,
        name: *const c_char,
        isRequiredProperty: BOOL,
        isInstanceProperty: BOOL,
    ) -> Property;
    pub fn protocol_copyProtocolList(proto: Protocol, outCount: *mut c_uint) -> *mut Protocol;
    pub fn protocol_conformsToProtocol(proto: Protocol, other: Protocol) -> BOOL;

    // Objects
    pub fn object_copy(obj: Id, size: usize) -> Id;
    pub fn object_dispose(obj: Id) -> Id;
    pub fn object_setInstanceVariable(obj: Id, name: *const c_char, value: *mut c_void) -> Ivar;
    pub fn object_getInstanceVariable(
        obj: Id,
        name: *const c_char,
        outValue: *mut *mut c_void,
    ) -> Ivar;
    pub fn object_getIndexedIvars(obj: Id) -> *mut c_void;
    pub fn object_getIvar(obj: Id, ivar: Ivar) -> Id;
    pub fn object_setIvar(obj: Id, ivar: Ivar, value: Id);
    pub fn object_getClassName(obj: Id) -> *const c_char;
    pub fn object_getClass(obj: Id) -> Class;
    pub fn object_setClass(obj: Id, cls: Class) -> Class;
    pub fn objc_constructInstance(cls: Class, bytes: *mut c_void) -> Id;
    pub fn objc_destructInstance(obj: Id) -> *mut c_void;

    // Associated objects
    pub fn objc_setAssociatedObject(object: Id, key: *const c_void, value: Id, policy: usize);
    pub fn objc_getAssociatedObject(object: Id, key: *const c_void) -> Id;
    pub fn objc_removeAssociatedObjects(object: Id);

    // Images
    pub fn objc_copyImageNames(outCount: *mut c_uint) -> *mut *const c_char;
    pub fn objc_copyClassNamesForImage(
        image: *const c_char,
        outCount: *mut c_uint,
    ) -> *mut *const c_char;
}
