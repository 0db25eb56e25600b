// deck-kit/src/sources/mem.rs
//
// Copyright © 2024 The deck-kit Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! A source that keeps its font index in memory.

use std::collections::HashMap;

use log::warn;

use crate::error::SelectionError;
use crate::handle::Handle;
use crate::properties::{FontKey, Properties};
use crate::source::Source;

/// A source that keeps its font index in memory.
///
/// Each handle is opened once at construction and indexed under its
/// (family name, bold, italic) key. When two handles share a key, the one supplied later
/// replaces the earlier one.
pub struct MemSource {
    fonts: HashMap<FontKey, Handle>,
}

impl MemSource {
    /// Builds an index over the supplied handles.
    ///
    /// Handles that fail to parse are logged and skipped; they never fail the build.
    pub fn from_fonts<I>(handles: I) -> MemSource
    where
        I: Iterator<Item = Handle>,
    {
        let mut fonts = HashMap::new();
        for handle in handles {
            match handle.load() {
                Ok(font) => {
                    fonts.insert(FontKey::new(font.family_name(), font.properties()), handle);
                }
                Err(err) => warn!("skipping unreadable font: {}", err),
            }
        }
        MemSource { fonts }
    }

    /// The number of faces in the index.
    #[inline]
    pub fn len(&self) -> usize {
        self.fonts.len()
    }

    /// True if the index holds no faces at all.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }

    /// The names of all indexed families, sorted and deduplicated.
    pub fn all_families(&self) -> Result<Vec<String>, SelectionError> {
        let mut families: Vec<String> = self
            .fonts
            .keys()
            .map(|key| key.family_name.clone())
            .collect();
        families.sort();
        families.dedup();
        Ok(families)
    }

    /// Looks up the face with exactly the given family name and properties.
    ///
    /// Matching is case-sensitive, as the catalog key is.
    pub fn select(
        &self,
        family_name: &str,
        properties: &Properties,
    ) -> Result<Handle, SelectionError> {
        self.fonts
            .get(&FontKey::new(family_name, *properties))
            .cloned()
            .ok_or(SelectionError::NotFound)
    }
}

impl Source for MemSource {
    #[inline]
    fn all_families(&self) -> Result<Vec<String>, SelectionError> {
        self.all_families()
    }

    #[inline]
    fn select(
        &self,
        family_name: &str,
        properties: &Properties,
    ) -> Result<Handle, SelectionError> {
        self.select(family_name, properties)
    }
}
