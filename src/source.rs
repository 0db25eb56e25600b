// deck-kit/src/source.rs
//
// Copyright © 2024 The deck-kit Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! A database of installed fonts that can be queried.

use std::path::PathBuf;

use lazy_static::lazy_static;

use crate::error::SelectionError;
use crate::font::Font;
use crate::handle::Handle;
use crate::properties::Properties;

pub use crate::sources::fs::FsSource as SystemSource;

/// A database of installed fonts that can be queried.
pub trait Source {
    /// The names of all families in this source.
    fn all_families(&self) -> Result<Vec<String>, SelectionError>;

    /// Looks up the font with exactly the given family name and face properties.
    fn select(
        &self,
        family_name: &str,
        properties: &Properties,
    ) -> Result<Handle, SelectionError>;

    /// Looks a font up and parses it.
    fn find(&self, family_name: &str, properties: &Properties) -> Result<Font, SelectionError> {
        self.select(family_name, properties)?
            .load()
            .map_err(|_| SelectionError::CannotAccessSource)
    }
}

lazy_static! {
    static ref SYSTEM_SOURCE: SystemSource = SystemSource::new();
}

/// The process-wide system font catalog.
///
/// The installed fonts are scanned once, on first use, and the index is reused for the
/// lifetime of the process.
pub fn system() -> &'static SystemSource {
    &SYSTEM_SOURCE
}

/// Resolves the file path of an installed font by family name and face properties.
///
/// Queries the process-wide catalog built by [`system`].
pub fn find_installed(
    family_name: &str,
    properties: &Properties,
) -> Result<PathBuf, SelectionError> {
    match system().select(family_name, properties)? {
        Handle::Path { path, .. } => Ok(path),
        Handle::Memory { .. } => Err(SelectionError::NotFound),
    }
}
