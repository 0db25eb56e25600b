// deck-kit/src/properties.rs
//
// Copyright © 2024 The deck-kit Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Properties that specify which face in a family to use: bold and italic.

/// Properties that specify which face in a family to use: bold and italic.
///
/// This object supports a method chaining style for idiomatic initialization; e.g.
///
///     # use deck_kit::properties::Properties;
///     println!("{:?}", Properties::new().bold(true));
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Properties {
    /// Whether the face is a bold cut.
    pub bold: bool,
    /// Whether the face is an italic cut.
    pub italic: bool,
}

impl Properties {
    /// Initializes a property set to its default values: regular weight, upright.
    #[inline]
    pub fn new() -> Properties {
        Properties::default()
    }

    /// Sets the value of the bold property and returns this property set for method chaining.
    #[inline]
    pub fn bold(&mut self, bold: bool) -> &mut Properties {
        self.bold = bold;
        self
    }

    /// Sets the value of the italic property and returns this property set for method chaining.
    #[inline]
    pub fn italic(&mut self, italic: bool) -> &mut Properties {
        self.italic = italic;
        self
    }
}

/// The key a font index is built over: a family name plus the face properties.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FontKey {
    /// The typeface family name, e.g. "Calibri".
    pub family_name: String,
    /// The face within the family.
    pub properties: Properties,
}

impl FontKey {
    /// Creates a key for the given family and face properties.
    #[inline]
    pub fn new<S>(family_name: S, properties: Properties) -> FontKey
    where
        S: Into<String>,
    {
        FontKey {
            family_name: family_name.into(),
            properties,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chained_initialization() {
        let mut properties = Properties::new();
        properties.bold(true).italic(true);
        assert!(properties.bold);
        assert!(properties.italic);
    }

    #[test]
    fn keys_compare_by_family_and_face() {
        let regular = FontKey::new("Calibri", Properties::new());
        let bold = FontKey::new("Calibri", *Properties::new().bold(true));
        assert_ne!(regular, bold);
        assert_eq!(regular, FontKey::new("Calibri".to_string(), Properties::new()));
    }
}
