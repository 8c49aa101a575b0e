/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */
//! objc-bridge is a binding to the Objective-C runtime's C API.
//!
//! In various places, the terms "host" and "native" are used to distinguish
//! between this crate's own Rust values and the C data the runtime works
//! with. For example:
//! - A "host string" is a Rust `String`/`&str`, a "native string" is a
//!   nul-terminated buffer on the C heap.
//! - A "native array" is a `(basePointer, count)` pair returned by one of the
//!   runtime's `copy` functions, which must be freed by the caller.
//! - A "host function" is a Rust function, which can be installed as a method
//!   implementation.
//!
//! See [objc] for the runtime API and [mem] for how data crosses the boundary.
//! The crate also provides the `objc-inspect` tool, whose entry point is
//! [main].

// The documentation for this crate is intended to include private items.
#![allow(rustdoc::private_intra_doc_links)]

#[macro_use]
mod log;
mod inspect;
mod licenses;
pub mod mem;
pub mod objc;
mod options;

/// Current version, from `Cargo.toml`.
const VERSION: &str = env!("CARGO_PKG_VERSION");

const USAGE: &str = "\
Usage:
    objc-inspect [OPTIONS]

Prints what the Objective-C runtime of this process knows about its classes,
protocols and loaded images.

Special options:
    --help
        Display this help text.

    --copyright
        Display copyright, authorship and license information.
";

pub fn main<T: Iterator<Item = String>>(mut args: T) -> Result<(), String> {
    echo!("objc-inspect {}", VERSION);
    echo!();

    let _ = args.next(); // skip argv[0]

    let mut options = options::Options::default();
    for arg in args {
        if arg == "--help" {
            echo!("{}", USAGE);
            echo!("{}", options::DOCUMENTATION);
            return Ok(());
        } else if arg == "--copyright" {
            echo!("{}", licenses::get_text());
            return Ok(());
        } else if !options.parse_argument(&arg)? {
            echo!("{}", USAGE);
            echo!("{}", options::DOCUMENTATION);
            return Err(format!("Unexpected argument: {:?}", arg));
        }
    }

    if options.is_empty() {
        return Err(
            "Nothing to print. Use the --help flag to see command-line usage.".to_string(),
        );
    }

    run(&options)
}

#[cfg(not(target_vendor = "apple"))]
fn run(_options: &options::Options) -> Result<(), String> {
    Err("The Objective-C runtime is only available on Apple platforms.".to_string())
}

/// Print what was asked for to stdout, one block per request.
#[cfg(target_vendor = "apple")]
fn run(options: &options::Options) -> Result<(), String> {
    use inspect::{ClassDump, ProtocolDump};
    use objc::{Class, Protocol};

    fn print_sorted(mut names: Vec<String>) {
        names.sort();
        for name in names {
            println!("{}", name);
        }
    }

    if options.list_classes {
        print_sorted(Class::list().into_iter().map(Class::name).collect());
    }
    if options.list_protocols {
        print_sorted(Protocol::list().into_iter().map(Protocol::name).collect());
    }
    if options.list_images {
        print_sorted(objc::image_names());
    }
    for image in &options.images {
        let names = objc::class_names_for_image(image);
        if names.is_empty() {
            log!("Warning: no classes found for image {:?}", image);
        }
        print_sorted(names);
    }
    for name in &options.classes {
        let class = Class::get(name)
            .non_null()
            .ok_or_else(|| format!("No class called {:?} is registered", name))?;
        println!("{}", ClassDump::collect(class));
    }
    for name in &options.protocols {
        let protocol = Protocol::get(name)
            .non_null()
            .ok_or_else(|| format!("No protocol called {:?} is registered", name))?;
        println!("{}", ProtocolDump::collect(protocol));
    }
    Ok(())
}
