/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */
//! The entry point for `objc-inspect`. Everything interesting is in the
//! library, see [objc_bridge::main].

fn main() -> Result<(), String> {
    objc_bridge::main(std::env::args())
}
