// deck-kit/src/font.rs
//
// Copyright © 2024 The deck-kit Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! A parsed font face: the family name and face metadata the lookup index keys on.

use std::fs;
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;

use byteorder::{BigEndian, ByteOrder};

use crate::error::FontLoadingError;
use crate::properties::Properties;
use crate::tables::{self, HeadTable, NameTable, TableDirectory};

/// The type of a font file: either a single font or a TrueType/OpenType collection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FileType {
    /// The font file represents a single font (`.ttf`, `.otf`, etc.)
    Single,
    /// The font file represents a collection of fonts (`.ttc`, `.otc`, etc.)
    Collection(u32),
}

/// A single parsed face: family name plus the metadata the catalog keys on.
///
/// Only the `name` and `head` tables are read. A face without a resolvable family name
/// fails to load; a face without a `head` table loads as a regular upright cut.
#[derive(Clone, Debug)]
pub struct Font {
    family_name: String,
    properties: Properties,
    units_per_em: Option<u16>,
}

impl Font {
    /// Parses the face at `font_index` out of `data`.
    ///
    /// Pass 0 for `font_index` unless the data is a collection.
    pub fn from_bytes(data: &[u8], font_index: u32) -> Result<Font, FontLoadingError> {
        let directory = TableDirectory::read(data, font_index)?;

        let name_table = directory
            .table(data, tables::TAG_NAME)
            .ok_or(FontLoadingError::NoFamilyName)?;
        let family_name = NameTable::parse(name_table)?
            .family_name()
            .ok_or(FontLoadingError::NoFamilyName)?
            .to_owned();

        let head = directory
            .table(data, tables::TAG_HEAD)
            .map(HeadTable::parse)
            .transpose()?;

        let mut properties = Properties::new();
        if let Some(head) = head {
            properties.bold(head.is_bold()).italic(head.is_italic());
        }
        Ok(Font {
            family_name,
            properties,
            units_per_em: head.map(|head| head.units_per_em),
        })
    }

    /// Reads and parses the face at `font_index` of the font file at `path`.
    pub fn from_path<P>(path: P, font_index: u32) -> Result<Font, FontLoadingError>
    where
        P: AsRef<Path>,
    {
        let data = fs::read(path)?;
        Font::from_bytes(&data, font_index)
    }

    /// Determines whether `data` is a single font or a collection, without a full parse.
    pub fn analyze_bytes(data: &[u8]) -> Result<FileType, FontLoadingError> {
        if data.len() < 4 {
            return Err(FontLoadingError::UnknownFormat);
        }
        match BigEndian::read_u32(&data[0..4]) {
            tables::TTC_HEADER_TAG => {
                Ok(FileType::Collection(tables::collection_font_count(data)?))
            }
            tables::SFNT_VERSION_TRUETYPE
            | tables::SFNT_VERSION_OPENTYPE
            | tables::SFNT_VERSION_APPLE => Ok(FileType::Single),
            _ => Err(FontLoadingError::UnknownFormat),
        }
    }

    /// Determines whether the stream holds a single font or a collection.
    ///
    /// Reads only the leading header; the stream position is not restored.
    pub fn analyze_stream<R>(stream: &mut R) -> Result<FileType, FontLoadingError>
    where
        R: Read + Seek,
    {
        stream.seek(SeekFrom::Start(0))?;
        let mut header = Vec::with_capacity(12);
        stream.by_ref().take(12).read_to_end(&mut header)?;
        Font::analyze_bytes(&header)
    }

    /// The typeface family name, e.g. "Calibri".
    #[inline]
    pub fn family_name(&self) -> &str {
        &self.family_name
    }

    /// True if the face is a bold cut.
    #[inline]
    pub fn is_bold(&self) -> bool {
        self.properties.bold
    }

    /// True if the face is an italic cut.
    #[inline]
    pub fn is_italic(&self) -> bool {
        self.properties.italic
    }

    /// The face properties as a selection key.
    #[inline]
    pub fn properties(&self) -> Properties {
        self.properties
    }

    /// Design units per em square, when the face carries a `head` table.
    #[inline]
    pub fn units_per_em(&self) -> Option<u16> {
        self.units_per_em
    }
}
