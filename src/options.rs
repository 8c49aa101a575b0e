/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */
//! Parsing of the options that choose what `objc-inspect` prints.

pub const DOCUMENTATION: &str = "\
Dump options:
    --class=...
        Print everything the runtime knows about the named class: its
        superclass chain, ivars (with type encodings and offsets), properties
        (with attribute strings), instance and class methods (with type
        encodings) and adopted protocols.

        To dump several classes, use several '--class=' arguments.

    --protocol=...
        Print the method descriptions of the named protocol (required and
        optional, instance and class), its properties and the protocols it
        inherits from.

        To dump several protocols, use several '--protocol=' arguments.

Listing options:
    --list-classes
        Print the name of every registered class.

    --list-protocols
        Print the name of every registered protocol.

    --list-images
        Print the path of every loaded image that contains Objective-C
        metadata.

    --image=...
        Print the names of the classes defined by the image at the given path.
        The path must be exactly as printed by --list-images.
";

/// Struct containing all options that select output.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Options {
    pub classes: Vec<String>,
    pub protocols: Vec<String>,
    pub list_classes: bool,
    pub list_protocols: bool,
    pub list_images: bool,
    pub images: Vec<String>,
}

impl Options {
    /// Parse the command-line argument syntax for an option. Returns `Ok(true)`
    /// if the option was valid and has been applied, and `Ok(false)` if the
    /// option was not recognized.
    pub fn parse_argument(&mut self, arg: &str) -> Result<bool, String> {
        fn parse_name(value: &str, what: &str) -> Result<String, String> {
            if value.is_empty() {
                Err(format!("Missing {} name", what))
            } else {
                Ok(value.to_string())
            }
        }

        if let Some(value) = arg.strip_prefix("--class=") {
            self.classes.push(parse_name(value, "class")?);
        } else if let Some(value) = arg.strip_prefix("--protocol=") {
            self.protocols.push(parse_name(value, "protocol")?);
        } else if arg == "--list-classes" {
            self.list_classes = true;
        } else if arg == "--list-protocols" {
            self.list_protocols = true;
        } else if arg == "--list-images" {
            self.list_images = true;
        } else if let Some(value) = arg.strip_prefix("--image=") {
            self.images.push(parse_name(value, "image")?);
        } else {
            return Ok(false);
        };
        Ok(true)
    }

    /// Whether any output was asked for at all.
    pub fn is_empty(&self) -> bool {
        self == &Options::default()
    }
}
