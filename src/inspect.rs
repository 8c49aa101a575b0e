/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */
//! Textual dumps of classes and protocols, for `objc-inspect`.
//!
//! Collecting a dump needs the runtime; printing one doesn't. The output
//! imitates an Objective-C declaration, with type encodings and attribute
//! strings in comments:
//!
//! ```text
//! @interface Counter : NSObject <NSCopying>
//! // instance size 16, version 0
//! {
//!     q _count; // offset 8
//! }
//! @property count; // Tq,N,V_count
//! - count; // q16@0:8
//! + sharedCounter; // @16@0:8
//! @end
//! ```

// Without the runtime, nothing collects dumps.
#![cfg_attr(not(target_vendor = "apple"), allow(dead_code))]

use std::fmt;

#[cfg(target_vendor = "apple")]
use crate::objc::{Class, Method, Property, Protocol};

/// A method as printed: selector name and type encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodInfo {
    pub name: String,
    pub types: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyInfo {
    pub name: String,
    pub attributes: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IvarInfo {
    pub name: String,
    pub type_encoding: String,
    pub offset: isize,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ClassDump {
    pub name: String,
    /// Nearest first.
    pub superclasses: Vec<String>,
    pub protocols: Vec<String>,
    pub image: String,
    pub instance_size: usize,
    pub version: i32,
    pub ivars: Vec<IvarInfo>,
    pub properties: Vec<PropertyInfo>,
    pub instance_methods: Vec<MethodInfo>,
    pub class_methods: Vec<MethodInfo>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProtocolDump {
    pub name: String,
    pub protocols: Vec<String>,
    pub properties: Vec<PropertyInfo>,
    /// One group per combination of required/optional and instance/class,
    /// in declaration order of the flags: `(required, instance, methods)`.
    pub methods: Vec<(bool, bool, Vec<MethodInfo>)>,
}

fn write_protocol_list(f: &mut fmt::Formatter<'_>, protocols: &[String]) -> fmt::Result {
    if !protocols.is_empty() {
        write!(f, " <{}>", protocols.join(", "))?;
    }
    Ok(())
}

fn write_methods(f: &mut fmt::Formatter<'_>, prefix: char, methods: &[MethodInfo]) -> fmt::Result {
    for method in methods {
        writeln!(f, "{} {}; // {}", prefix, method.name, method.types)?;
    }
    Ok(())
}

fn write_properties(f: &mut fmt::Formatter<'_>, properties: &[PropertyInfo]) -> fmt::Result {
    for property in properties {
        writeln!(f, "@property {}; // {}", property.name, property.attributes)?;
    }
    Ok(())
}

impl fmt::Display for ClassDump {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@interface {}", self.name)?;
        for superclass in &self.superclasses {
            write!(f, " : {}", superclass)?;
        }
        write_protocol_list(f, &self.protocols)?;
        writeln!(f)?;
        if !self.image.is_empty() {
            writeln!(f, "// image {}", self.image)?;
        }
        writeln!(
            f,
            "// instance size {}, version {}",
            self.instance_size, self.version
        )?;
        if !self.ivars.is_empty() {
            writeln!(f, "{{")?;
            for ivar in &self.ivars {
                writeln!(
                    f,
                    "    {} {}; // offset {}",
                    ivar.type_encoding, ivar.name, ivar.offset
                )?;
            }
            writeln!(f, "}}")?;
        }
        write_properties(f, &self.properties)?;
        write_methods(f, '-', &self.instance_methods)?;
        write_methods(f, '+', &self.class_methods)?;
        write!(f, "@end")
    }
}

impl fmt::Display for ProtocolDump {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@protocol {}", self.name)?;
        write_protocol_list(f, &self.protocols)?;
        writeln!(f)?;
        write_properties(f, &self.properties)?;
        let mut required_section = true;
        for (required, instance, methods) in &self.methods {
            if methods.is_empty() {
                continue;
            }
            if *required != required_section {
                writeln!(f, "{}", if *required { "@required" } else { "@optional" })?;
                required_section = *required;
            }
            write_methods(f, if *instance { '-' } else { '+' }, methods)?;
        }
        write!(f, "@end")
    }
}

#[cfg(target_vendor = "apple")]
fn method_info(method: Method) -> MethodInfo {
    MethodInfo {
        name: method.name().name(),
        types: method.type_encoding(),
    }
}

#[cfg(target_vendor = "apple")]
fn property_info(property: Property) -> PropertyInfo {
    PropertyInfo {
        name: property.name(),
        attributes: property.attributes(),
    }
}

#[cfg(target_vendor = "apple")]
impl ClassDump {
    /// Ask the runtime about a class. Only what the class itself declares is
    /// listed, apart from the superclass chain.
    pub fn collect(class: Class) -> ClassDump {
        let name = class.name();
        let mut superclasses = Vec::new();
        let mut superclass = class.superclass();
        while let Some(current) = superclass.non_null() {
            superclasses.push(current.name());
            superclass = current.superclass();
        }
        ClassDump {
            superclasses,
            protocols: class.protocols().into_iter().map(Protocol::name).collect(),
            image: class.image_name(),
            instance_size: class.instance_size(),
            version: class.version(),
            ivars: class
                .ivars()
                .into_iter()
                .map(|ivar| IvarInfo {
                    name: ivar.name(),
                    type_encoding: ivar.type_encoding(),
                    offset: ivar.offset(),
                })
                .collect(),
            properties: class.properties().into_iter().map(property_info).collect(),
            instance_methods: class.methods().into_iter().map(method_info).collect(),
            class_methods: Class::get_meta(&name)
                .methods()
                .into_iter()
                .map(method_info)
                .collect(),
            name,
        }
    }
}

#[cfg(target_vendor = "apple")]
impl ProtocolDump {
    pub fn collect(protocol: Protocol) -> ProtocolDump {
        let methods = [(true, true), (true, false), (false, true), (false, false)]
            .into_iter()
            .map(|(required, instance)| {
                let methods = protocol
                    .method_descriptions(required, instance)
                    .into_iter()
                    .map(|description| MethodInfo {
                        name: description.name.name(),
                        types: description.types,
                    })
                    .collect();
                (required, instance, methods)
            })
            .collect();
        ProtocolDump {
            name: protocol.name(),
            protocols: protocol
                .protocols()
                .into_iter()
                .map(Protocol::name)
                .collect(),
            properties: protocol
                .properties()
                .into_iter()
                .map(property_info)
                .collect(),
            methods,
        }
    }
}
