/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */
//! Tests against the system's Objective-C runtime.
//!
//! The runtime's class and protocol tables are process-wide and tests run in
//! parallel, so every test creates classes and protocols under its own name.
#![cfg(target_vendor = "apple")]

use objc_bridge::objc::{
    class_names_for_image, image_names, nil, AssociationKey, AssociationPolicy, Class, Id, Imp,
    MethodImplementation, PropertyAttribute, Protocol, Sel,
};
use std::ffi::c_void;
use std::mem::size_of;

fn ns_object() -> Class {
    let class = Class::get("NSObject");
    assert!(!class.is_null());
    class
}

fn attributes(pairs: &[(&str, &str)]) -> Vec<PropertyAttribute> {
    pairs
        .iter()
        .map(|&(name, value)| PropertyAttribute::new(name, value))
        .collect()
}

/// log2 of pointer alignment, as `class_addIvar` wants it.
fn pointer_alignment() -> u8 {
    size_of::<*mut c_void>().trailing_zeros() as u8
}

extern "C" fn return_seven(_this: Id, _cmd: Sel) -> i32 {
    7
}

extern "C" fn return_eleven(_this: Id, _cmd: Sel) -> i32 {
    11
}

extern "C" fn do_nothing(_this: Id, _cmd: Sel) {}

fn imp_seven() -> Imp {
    (return_seven as extern "C" fn(Id, Sel) -> i32).imp()
}

fn imp_eleven() -> Imp {
    (return_eleven as extern "C" fn(Id, Sel) -> i32).imp()
}

fn call_i32(imp: Imp) -> i32 {
    let function: extern "C" fn(Id, Sel) -> i32 =
        unsafe { std::mem::transmute(imp.as_fn().unwrap()) };
    function(nil, Sel::null())
}

#[test]
fn absent_things_are_null() {
    assert!(Class::get("ThereIsNoSuchClassAnywhere").is_null());
    assert!(Class::look_up("ThereIsNoSuchClassAnywhere").is_null());
    assert!(Protocol::get("ThereIsNoSuchProtocolAnywhere").is_null());
    assert!(ns_object().superclass().is_null());
    assert!(ns_object().property("A").is_null());
    assert!(ns_object().instance_variable("noSuchIvar").is_null());
    assert_eq!(nil.class_name(), "nil");
    assert!(nil.class().is_null());
}

#[test]
fn class_basics() {
    let class = ns_object();
    assert_eq!(class.name(), "NSObject");
    assert!(!class.is_metaclass());
    assert!(class.instance_size() > 0);
    assert!(Class::get_meta("NSObject").is_metaclass());
    assert_eq!(Class::look_up("NSObject"), class);
    assert!(class.image_name().contains("libobjc"));

    let classes = Class::list();
    assert!(classes.contains(&class));
    assert!(Class::count() > 0);
}

#[test]
fn selectors_are_interned() {
    let a = Sel::register("bridgeTestSelector:");
    let b = Sel::register("bridgeTestSelector:");
    assert_eq!(a, b);
    assert!(a.is_equal(b));
    assert_eq!(Sel::uid("bridgeTestSelector:"), a);
    assert_eq!(a.name(), "bridgeTestSelector:");
    assert_ne!(a, Sel::register("bridgeOtherSelector"));
}

#[test]
fn class_pair_lifecycle() {
    let class = Class::allocate_pair(ns_object(), "BridgeTestLifecycle", 0);
    assert!(!class.is_null());
    assert_eq!(class.superclass(), ns_object());
    assert!(Class::get("BridgeTestLifecycle").is_null());

    class.register_pair();
    assert_eq!(Class::get("BridgeTestLifecycle"), class);
    assert!(Class::allocate_pair(ns_object(), "BridgeTestLifecycle", 0).is_null());

    let unregistered = Class::allocate_pair(ns_object(), "BridgeTestDisposed", 0);
    assert!(!unregistered.is_null());
    unregistered.dispose_pair();
}

#[test]
fn ivars() {
    let class = Class::allocate_pair(ns_object(), "BridgeTestIvars", 0);
    assert!(class.ivars().is_empty());

    assert!(class.add_ivar("count", 4, 2, "i"));
    assert!(!class.add_ivar("count", 8, 3, "q"));
    assert!(class.add_ivar("other", size_of::<Id>(), pointer_alignment(), "@"));

    let ivar = class.instance_variable("count");
    assert!(!ivar.is_null());
    assert_eq!(ivar.name(), "count");
    assert_eq!(ivar.type_encoding(), "i");
    assert_eq!(ivar.offset(), size_of::<*mut c_void>() as isize);

    let names: Vec<String> = class.ivars().into_iter().map(|ivar| ivar.name()).collect();
    assert_eq!(names, vec!["count", "other"]);
    assert!(class.instance_size() >= size_of::<*mut c_void>() * 2 + 4);

    class.set_ivar_layout(&[0x01, 0x11]);
    assert_eq!(class.ivar_layout(), vec![0x01, 0x11]);
    class.set_weak_ivar_layout(&[]);
    assert!(class.weak_ivar_layout().is_empty());

    class.register_pair();
    assert!(!class.add_ivar("late", 4, 2, "i"));
}

#[test]
fn methods_with_host_implementations() {
    let class = Class::allocate_pair(ns_object(), "BridgeTestMethods", 0);
    assert!(class.methods().is_empty());

    let seven = Sel::register("seven");
    let eleven = Sel::register("eleven");
    assert!(class.add_method(seven, return_seven as extern "C" fn(_, _) -> _, "i@:"));
    assert!(!class.add_method(seven, imp_eleven(), "i@:"));
    assert!(class.add_method(eleven, imp_eleven(), "i@:"));
    class.register_pair();

    assert_eq!(class.methods().len(), 2);
    assert!(class.responds_to_selector(seven));
    assert!(!class.responds_to_selector(Sel::register("bridgeNeverImplemented")));
    assert_eq!(class.method_implementation(seven), imp_seven());
    assert_eq!(call_i32(class.method_implementation(seven)), 7);

    let method = class.instance_method(seven);
    assert!(!method.is_null());
    assert_eq!(method.name(), seven);
    assert_eq!(method.type_encoding(), "i@:");
    assert_eq!(method.return_type(), "i");
    assert_eq!(method.argument_type(0), "@");
    assert_eq!(method.argument_type(1), ":");
    assert_eq!(method.argument_type(2), "");
    assert_eq!(method.number_of_arguments(), 2);
    let description = method.description();
    assert_eq!(description.name, seven);
    assert_eq!(description.types, "i@:");

    let other = class.instance_method(eleven);
    method.exchange_implementations(other);
    assert_eq!(call_i32(method.implementation()), 11);
    assert_eq!(call_i32(other.implementation()), 7);

    assert_eq!(method.set_implementation(imp_seven()), imp_eleven());
    assert_eq!(call_i32(class.method_implementation(seven)), 7);

    assert!(class.class_method(seven).is_null());
}

#[test]
fn replace_method() {
    let class = Class::allocate_pair(ns_object(), "BridgeTestReplaceMethod", 0);
    let sel = Sel::register("replaceMe");
    assert_eq!(class.replace_method(sel, imp_seven(), "i@:"), Imp::NULL);
    assert_eq!(class.replace_method(sel, imp_eleven(), "i@:"), imp_seven());
    assert_eq!(class.method_implementation(sel), imp_eleven());
    class.dispose_pair();
}

#[cfg(target_arch = "x86_64")]
#[test]
fn method_implementation_stret() {
    let class = Class::allocate_pair(ns_object(), "BridgeTestStret", 0);
    let sel = Sel::register("stretMethod");
    let imp = (do_nothing as extern "C" fn(Id, Sel)).imp();
    class.add_method(sel, imp, "v@:");
    assert_eq!(class.method_implementation_stret(sel), imp);
    class.dispose_pair();
}

#[test]
fn class_methods_live_on_the_metaclass() {
    let class = Class::allocate_pair(ns_object(), "BridgeTestClassMethods", 0);
    let meta = Class::get_meta("NSObject");
    assert!(meta.is_metaclass());
    let sel = Sel::register("bridgeClassMethod");
    class.register_pair();
    let own_meta = Class::get_meta("BridgeTestClassMethods");
    assert!(own_meta.add_method(sel, do_nothing as extern "C" fn(_, _), "v@:"));
    assert!(!class.class_method(sel).is_null());
    assert!(class.instance_method(sel).is_null());
}

#[test]
fn class_properties() {
    let class = Class::allocate_pair(ns_object(), "BridgeTestProperties", 0);
    assert!(class.properties().is_empty());

    let char_default = attributes(&[("T", "c"), ("V", "charDefault")]);
    assert!(class.add_property("A", &char_default));
    assert!(!class.add_property("A", &char_default));
    assert!(class.add_property("B", &attributes(&[("T", "i")])));
    assert_eq!(class.properties().len(), 2);

    let property = class.property("A");
    assert!(!property.is_null());
    assert_eq!(property.name(), "A");
    assert_eq!(property.attributes(), "Tc,VcharDefault");
    assert_eq!(property.attribute_list(), char_default);
    assert_eq!(property.copy_attribute_value("V"), "charDefault");
    assert_eq!(property.copy_attribute_value("R"), "");

    class.replace_property("A", &attributes(&[("T", "i"), ("V", "")]));
    assert_eq!(class.property("A").attributes(), "Ti,V");
    assert_eq!(
        PropertyAttribute::parse_list(&class.property("A").attributes()),
        class.property("A").attribute_list()
    );
}

#[test]
fn class_protocols() {
    let class = Class::allocate_pair(ns_object(), "BridgeTestClassProtocols", 0);
    assert!(class.protocols().is_empty());
    let protocol = Protocol::get("NSObject");
    assert!(!protocol.is_null());
    assert!(class.add_protocol(protocol));
    assert!(!class.add_protocol(protocol));
    assert!(class.conforms_to(protocol));
    assert_eq!(class.protocols(), vec![protocol]);
}

#[test]
fn class_version() {
    let class = Class::allocate_pair(ns_object(), "BridgeTestVersion", 0);
    assert_eq!(class.version(), 0);
    class.set_version(3);
    assert_eq!(class.version(), 3);
    class.dispose_pair();
}

#[test]
fn protocol_lifecycle() {
    let protocol = Protocol::allocate("BridgeTestProtocol");
    assert!(!protocol.is_null());
    assert!(Protocol::get("BridgeTestProtocol").is_null());

    let draw = Sel::register("draw");
    let name = Sel::register("name");
    protocol.add_method_description(draw, "v@:", true, true);
    protocol.add_method_description(name, "@@:", false, true);
    protocol.add_protocol(Protocol::get("NSObject"));
    protocol.add_property(
        "CharDefault",
        &attributes(&[("T", "c"), ("V", "charDefault")]),
        true,
        true,
    );
    protocol.add_property("Empty", &[], true, true);
    protocol.register();

    assert_eq!(Protocol::get("BridgeTestProtocol"), protocol);
    assert!(Protocol::list().contains(&protocol));
    assert!(Protocol::allocate("BridgeTestProtocol").is_null());
    assert_eq!(protocol.name(), "BridgeTestProtocol");
    assert!(protocol.is_equal(Protocol::get("BridgeTestProtocol")));

    let required = protocol.method_descriptions(true, true);
    assert_eq!(required.len(), 1);
    assert_eq!(required[0].name, draw);
    assert_eq!(required[0].types, "v@:");
    assert_eq!(protocol.method_descriptions(false, true)[0].name, name);
    assert!(protocol.method_descriptions(true, false).is_empty());

    let description = protocol.method_description(name, false, true);
    assert_eq!(description.name, name);
    assert_eq!(description.types, "@@:");
    assert!(protocol
        .method_description(draw, false, false)
        .name
        .is_null());

    assert_eq!(protocol.protocols(), vec![Protocol::get("NSObject")]);
    assert!(protocol.conforms_to(Protocol::get("NSObject")));
    assert!(!Protocol::get("NSObject").conforms_to(protocol));

    assert_eq!(protocol.properties().len(), 2);
    let property = protocol.property("CharDefault", true, true);
    assert_eq!(property.name(), "CharDefault");
    assert_eq!(property.attributes(), "Tc,VcharDefault");
    assert_eq!(property.copy_attribute_value("T"), "c");
    assert_eq!(protocol.property("Empty", true, true).attributes(), "");
    assert!(protocol.property("CharDefault", false, true).is_null());
}

#[test]
fn empty_attribute_value_round_trips() {
    let protocol = Protocol::allocate("BridgeTestEmptyValueProtocol");
    protocol.add_property("Flag", &attributes(&[("T", "c"), ("V", "")]), true, true);
    protocol.register();

    let property = protocol.property("Flag", true, true);
    assert_eq!(property.attributes(), "Tc,V");
    assert_eq!(property.copy_attribute_value("V"), "");
    assert_eq!(
        property.attribute_list(),
        attributes(&[("T", "c"), ("V", "")])
    );
}

#[test]
fn object_ivars() {
    let class = Class::allocate_pair(ns_object(), "BridgeTestObjectIvars", 0);
    assert!(class.add_ivar("ivar", size_of::<Id>(), pointer_alignment(), "@"));
    class.register_pair();

    let instance = class.create_instance(0);
    let value = ns_object().create_instance(0);
    assert_eq!(instance.class(), class);
    assert_eq!(instance.class_name(), "BridgeTestObjectIvars");

    unsafe {
        let ivar = instance.set_instance_variable("ivar", value.as_ptr().cast());
        assert!(!ivar.is_null());
        assert_eq!(ivar, class.instance_variable("ivar"));
        let (got_ivar, got_value) = instance.instance_variable("ivar");
        assert_eq!(got_ivar, ivar);
        assert_eq!(got_value, value.as_ptr().cast());
        assert_eq!(instance.ivar(ivar), value);

        instance.set_ivar(ivar, nil);
        assert_eq!(instance.ivar(ivar), nil);

        let (missing, missing_value) = instance.instance_variable("noSuchIvar");
        assert!(missing.is_null());
        assert!(missing_value.is_null());
        assert!(instance
            .set_instance_variable("noSuchIvar", value.as_ptr().cast())
            .is_null());

        instance.dispose();
        value.dispose();
    }
}

#[test]
fn object_copy_and_class() {
    let class = Class::allocate_pair(ns_object(), "BridgeTestObjectClass", 0);
    class.register_pair();
    let instance = class.create_instance(16);
    unsafe {
        assert!(!instance.indexed_ivars().is_null());
        let copy = instance.copy(class.instance_size());
        assert_ne!(copy, instance);
        assert_eq!(copy.class(), class);

        assert_eq!(instance.set_class(ns_object()), class);
        assert_eq!(instance.class(), ns_object());
        assert!(nil.set_class(ns_object()).is_null());

        copy.dispose();
        instance.dispose();
    }
}

#[test]
fn construct_and_destruct_instance() {
    let class = Class::allocate_pair(ns_object(), "BridgeTestConstruct", 0);
    class.register_pair();
    let words = class.instance_size().div_ceil(size_of::<usize>());
    let mut storage = vec![0usize; words];
    let bytes: *mut c_void = storage.as_mut_ptr().cast();
    unsafe {
        let instance = class.construct_instance(bytes);
        assert_eq!(instance.as_ptr().cast::<c_void>(), bytes);
        assert_eq!(instance.class(), class);
        assert_eq!(instance.destruct_instance(), bytes);
    }
}

static ASSOCIATION_KEY: u8 = 0;

#[test]
fn associated_objects() {
    let object = ns_object().create_instance(0);
    let value = ns_object().create_instance(0);
    let key = AssociationKey::from_ref(&ASSOCIATION_KEY);
    let sel_key = AssociationKey::from(Sel::register("bridgeAssociation"));
    unsafe {
        assert_eq!(object.associated_object(key), nil);

        object.set_associated_object(key, value, AssociationPolicy::Assign);
        assert_eq!(object.associated_object(key), value);
        assert_eq!(object.associated_object(sel_key), nil);

        object.set_associated_object(sel_key, value, AssociationPolicy::RetainNonatomic);
        assert_eq!(object.associated_object(sel_key), value);

        object.remove_associated_object(key);
        assert_eq!(object.associated_object(key), nil);
        assert_eq!(object.associated_object(sel_key), value);

        object.dispose();
        value.dispose();
    }
}

static OTHER_ASSOCIATION_KEY: u8 = 0;

#[test]
fn remove_all_associated_objects() {
    let object = ns_object().create_instance(0);
    let value = ns_object().create_instance(0);
    let key = AssociationKey::from_ref(&OTHER_ASSOCIATION_KEY);
    let sel_key = AssociationKey::from(Sel::register("bridgeOtherAssociation"));
    unsafe {
        object.set_associated_object(key, value, AssociationPolicy::Assign);
        object.set_associated_object(sel_key, value, AssociationPolicy::RetainNonatomic);
        assert_eq!(object.associated_object(key), value);
        assert_eq!(object.associated_object(sel_key), value);

        object.remove_associated_objects();
        assert_eq!(object.associated_object(key), nil);
        assert_eq!(object.associated_object(sel_key), nil);

        object.dispose();
        value.dispose();
    }
}

#[test]
fn images() {
    let images = image_names();
    assert!(!images.is_empty());
    let image = ns_object().image_name();
    assert!(images.contains(&image));
    assert!(class_names_for_image(&image).contains(&"NSObject".to_string()));
    assert!(class_names_for_image("/no/such/image.dylib").is_empty());
}
