// deck-kit/src/error.rs
//
// Copyright © 2024 The deck-kit Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Various types of errors that `deck-kit` can return.

use std::io;
use thiserror::Error;

/// Reasons why a font file might fail to load.
#[derive(Debug, Error)]
pub enum FontLoadingError {
    /// The data was of a format the parser didn't recognize.
    #[error("unknown format")]
    UnknownFormat,

    /// Attempted to load an invalid index in a TrueType or OpenType font collection.
    ///
    /// For example, if a `.ttc` file has 2 fonts in it, and you ask for the 5th one, you'll get
    /// this error.
    #[error("no such font in the collection")]
    NoSuchFontInCollection,

    /// The font carries no name record the parser can resolve to a family name.
    #[error("no usable family name")]
    NoFamilyName,

    /// Attempted to load a malformed or corrupted font.
    #[error("parse error")]
    Parse,

    /// A disk or similar I/O error occurred while attempting to load the font.
    #[error("I/O error")]
    Io(#[from] io::Error),
}

/// Reasons why a source might fail to look up a font.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Error)]
pub enum SelectionError {
    /// No font matching the given query was found.
    #[error("no font found")]
    NotFound,
    /// The source was inaccessible because of an I/O or similar error.
    #[error("failed to access source")]
    CannotAccessSource,
}

/// Reasons why an XML attribute value cannot cross the element boundary.
#[derive(Clone, PartialEq, Eq, Debug, Error)]
pub enum XmlValueError {
    /// The attribute string form does not parse as the expected type.
    #[error("cannot convert {0:?}")]
    Conversion(String),
    /// The typed value cannot be represented by the simple type.
    #[error("value out of range: {0}")]
    OutOfRange(String),
}

/// Reasons why a shape element might fail to parse.
#[derive(Clone, PartialEq, Eq, Debug, Error)]
pub enum XmlError {
    /// The markup itself is not well formed.
    #[error("malformed XML: {0}")]
    Malformed(String),

    /// The root element is not one of the shape elements.
    #[error("unexpected element `{0}`")]
    UnexpectedElement(String),

    /// A required child element is absent.
    #[error("missing element `{0}`")]
    MissingElement(&'static str),

    /// A required attribute is absent.
    #[error("missing attribute `{0}`")]
    MissingAttribute(&'static str),

    /// An attribute value failed simple-type conversion.
    #[error("invalid value for `{attribute}`: {source}")]
    InvalidAttributeValue {
        /// The attribute whose value was rejected.
        attribute: &'static str,
        /// The underlying conversion failure.
        source: XmlValueError,
    },
}
