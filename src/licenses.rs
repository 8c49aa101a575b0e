/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */
//! Copyright, authorship and license information for `--copyright`.

/// List of Rust crates compiled into the binary, generated by `build.rs`.
const RUST_DEPENDENCIES: &str = include_str!(concat!(env!("OUT_DIR"), "/rust_dependencies.txt"));

pub fn get_text() -> String {
    format!(
        "\
objc-bridge is copyright © {}.

objc-bridge is licensed under the Mozilla Public License, v. 2.0.
You can obtain a copy of this license at https://mozilla.org/MPL/2.0/.

objc-bridge links against the Objective-C runtime library of the operating
system it runs on, which is not distributed with it.

objc-bridge is built with the following Rust crates:
{}",
        env!("CARGO_PKG_AUTHORS").replace(':', ", "),
        RUST_DEPENDENCIES
    )
}
