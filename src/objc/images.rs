/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */
//! Binary images (the executable and its libraries) that the runtime has
//! loaded Objective-C metadata from.

use super::ffi;
use crate::mem::{copy_out, str_from_native, NativeStr};

/// Paths of all loaded images with Objective-C metadata.
pub fn image_names() -> Vec<String> {
    let mut count = 0;
    // Only the array is ours, the names are the runtime's.
    let names = unsafe { copy_out(ffi::objc_copyImageNames(&mut count), count) };
    names
        .into_iter()
        .map(|name| unsafe { str_from_native(name) })
        .collect()
}

/// Names of the classes defined by the image at `image` (a path as returned
/// by [image_names] or [super::Class::image_name]). Empty if no such image is
/// loaded.
pub fn class_names_for_image(image: &str) -> Vec<String> {
    let image = NativeStr::new(image);
    let mut count = 0;
    let names =
        unsafe { copy_out(ffi::objc_copyClassNamesForImage(image.as_ptr(), &mut count), count) };
    names
        .into_iter()
        .map(|name| unsafe { str_from_native(name) })
        .collect()
}
