// deck-kit/src/tables.rs
//
// Copyright © 2024 The deck-kit Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Binary reading of the SFNT container and the tables this crate cares about.
//!
//! A font file opens with an offset table (the "table directory") locating each table by
//! four-byte tag. Collections (`ttcf`) add one level of indirection: a header of absolute
//! offsets, one per face, each pointing at an ordinary offset table. Only the `head` and
//! `name` tables are parsed beyond their directory entries.

use std::collections::HashMap;
use std::io::Cursor;

use byteorder::{BigEndian, ByteOrder, ReadBytesExt};

use crate::error::FontLoadingError;

pub(crate) const SFNT_VERSION_TRUETYPE: u32 = 0x0001_0000;
pub(crate) const SFNT_VERSION_OPENTYPE: u32 = 0x4F54_544F; // "OTTO"
pub(crate) const SFNT_VERSION_APPLE: u32 = 0x7472_7565; // "true"
pub(crate) const TTC_HEADER_TAG: u32 = 0x7474_6366; // "ttcf"

pub(crate) const TAG_HEAD: u32 = 0x6865_6164; // "head"
pub(crate) const TAG_NAME: u32 = 0x6E61_6D65; // "name"

const FAMILY_NAME_ID: u16 = 1;

// Caps a hostile table count before the record vector is allocated.
const MAX_TABLE_COUNT: u16 = 4096;

fn is_sfnt_version(version: u32) -> bool {
    matches!(
        version,
        SFNT_VERSION_TRUETYPE | SFNT_VERSION_OPENTYPE | SFNT_VERSION_APPLE
    )
}

/// Resolves the absolute offset of the offset table for face `font_index`.
///
/// For a single font this is the start of the data; for a collection it comes from the
/// `ttcf` header.
pub(crate) fn font_offset(data: &[u8], font_index: u32) -> Result<u32, FontLoadingError> {
    if data.len() < 4 {
        return Err(FontLoadingError::UnknownFormat);
    }
    let tag = BigEndian::read_u32(&data[0..4]);
    if tag != TTC_HEADER_TAG {
        if !is_sfnt_version(tag) {
            return Err(FontLoadingError::UnknownFormat);
        }
        if font_index != 0 {
            return Err(FontLoadingError::NoSuchFontInCollection);
        }
        return Ok(0);
    }

    let font_count = collection_font_count(data)?;
    if font_index >= font_count {
        return Err(FontLoadingError::NoSuchFontInCollection);
    }
    let entry = 12 + 4 * font_index as usize;
    let bytes = data
        .get(entry..entry + 4)
        .ok_or(FontLoadingError::Parse)?;
    Ok(BigEndian::read_u32(bytes))
}

/// The number of faces in a `ttcf` collection.
pub(crate) fn collection_font_count(data: &[u8]) -> Result<u32, FontLoadingError> {
    let bytes = data.get(8..12).ok_or(FontLoadingError::Parse)?;
    Ok(BigEndian::read_u32(bytes))
}

#[derive(Clone, Copy, Debug)]
pub(crate) struct TableRecord {
    pub tag: u32,
    pub offset: u32,
    pub length: u32,
}

/// The offset table of one face: version plus a record per table.
pub(crate) struct TableDirectory {
    records: Vec<TableRecord>,
}

impl TableDirectory {
    pub(crate) fn read(data: &[u8], font_index: u32) -> Result<TableDirectory, FontLoadingError> {
        let start = font_offset(data, font_index)? as usize;
        let mut cursor = Cursor::new(data.get(start..).ok_or(FontLoadingError::Parse)?);

        let version = cursor
            .read_u32::<BigEndian>()
            .map_err(|_| FontLoadingError::Parse)?;
        if !is_sfnt_version(version) {
            return Err(FontLoadingError::UnknownFormat);
        }
        let table_count = cursor
            .read_u16::<BigEndian>()
            .map_err(|_| FontLoadingError::Parse)?;
        if table_count > MAX_TABLE_COUNT {
            return Err(FontLoadingError::Parse);
        }
        // searchRange, entrySelector, rangeShift.
        for _ in 0..3 {
            cursor
                .read_u16::<BigEndian>()
                .map_err(|_| FontLoadingError::Parse)?;
        }

        let mut records = Vec::with_capacity(table_count as usize);
        for _ in 0..table_count {
            let tag = cursor
                .read_u32::<BigEndian>()
                .map_err(|_| FontLoadingError::Parse)?;
            let _checksum = cursor
                .read_u32::<BigEndian>()
                .map_err(|_| FontLoadingError::Parse)?;
            let offset = cursor
                .read_u32::<BigEndian>()
                .map_err(|_| FontLoadingError::Parse)?;
            let length = cursor
                .read_u32::<BigEndian>()
                .map_err(|_| FontLoadingError::Parse)?;
            records.push(TableRecord {
                tag,
                offset,
                length,
            });
        }
        Ok(TableDirectory { records })
    }

    /// The raw bytes of the table with the given tag. Offsets are absolute within `data`.
    pub(crate) fn table<'a>(&self, data: &'a [u8], tag: u32) -> Option<&'a [u8]> {
        let record = self.records.iter().find(|record| record.tag == tag)?;
        let start = record.offset as usize;
        let end = start.checked_add(record.length as usize)?;
        data.get(start..end)
    }
}

bitflags! {
    /// The `macStyle` bitfield of the `head` table.
    pub struct MacStyle: u16 {
        const BOLD = 0x0001;
        const ITALIC = 0x0002;
    }
}

/// The slice of the `head` table this crate reads: global font metadata.
#[derive(Clone, Copy, Debug)]
pub(crate) struct HeadTable {
    pub units_per_em: u16,
    pub mac_style: MacStyle,
}

impl HeadTable {
    pub(crate) fn parse(table: &[u8]) -> Result<HeadTable, FontLoadingError> {
        // unitsPerEm sits at offset 18, macStyle at 44.
        if table.len() < 46 {
            return Err(FontLoadingError::Parse);
        }
        Ok(HeadTable {
            units_per_em: BigEndian::read_u16(&table[18..20]),
            mac_style: MacStyle::from_bits_truncate(BigEndian::read_u16(&table[44..46])),
        })
    }

    pub(crate) fn is_bold(&self) -> bool {
        self.mac_style.contains(MacStyle::BOLD)
    }

    pub(crate) fn is_italic(&self) -> bool {
        self.mac_style.contains(MacStyle::ITALIC)
    }
}

/// The `name` table: naming IDs mapped to decoded strings.
///
/// Keys are (platform id, encoding id, language id, name id). Records on platforms this
/// crate cannot decode, and records whose string extents overrun the table, are skipped.
pub(crate) struct NameTable {
    names: HashMap<(u16, u16, u16, u16), String>,
}

impl NameTable {
    pub(crate) fn parse(table: &[u8]) -> Result<NameTable, FontLoadingError> {
        if table.len() < 6 {
            return Err(FontLoadingError::Parse);
        }
        let count = BigEndian::read_u16(&table[2..4]);
        let string_offset = BigEndian::read_u16(&table[4..6]) as usize;

        let mut names = HashMap::new();
        for index in 0..count as usize {
            let base = 6 + 12 * index;
            let record = match table.get(base..base + 12) {
                Some(record) => record,
                None => break,
            };
            let platform_id = BigEndian::read_u16(&record[0..2]);
            let encoding_id = BigEndian::read_u16(&record[2..4]);
            let language_id = BigEndian::read_u16(&record[4..6]);
            let name_id = BigEndian::read_u16(&record[6..8]);
            let length = BigEndian::read_u16(&record[8..10]) as usize;
            let offset = BigEndian::read_u16(&record[10..12]) as usize;

            let start = string_offset + offset;
            let raw = match start.checked_add(length).and_then(|end| table.get(start..end)) {
                Some(raw) => raw,
                None => continue,
            };
            let decoded = match decode_name(raw, platform_id) {
                Some(decoded) => decoded,
                None => continue,
            };
            names.insert((platform_id, encoding_id, language_id, name_id), decoded);
        }
        Ok(NameTable { names })
    }

    /// The typeface family name, per the usual platform preference order.
    pub(crate) fn family_name(&self) -> Option<&str> {
        const PREFERRED: [(u16, u16, u16); 4] =
            [(3, 1, 0x409), (3, 0, 0x409), (0, 0, 0), (1, 0, 0)];
        for &(platform_id, encoding_id, language_id) in PREFERRED.iter() {
            if let Some(name) =
                self.names
                    .get(&(platform_id, encoding_id, language_id, FAMILY_NAME_ID))
            {
                return Some(name);
            }
        }
        // Any remaining family-name record, Windows first, then Unicode, then Mac.
        self.names
            .iter()
            .filter(|((_, _, _, name_id), _)| *name_id == FAMILY_NAME_ID)
            .min_by_key(|((platform_id, encoding_id, language_id, _), _)| {
                let rank = match platform_id {
                    3 => 0u8,
                    0 => 1,
                    _ => 2,
                };
                (rank, *encoding_id, *language_id)
            })
            .map(|(_, name)| name.as_str())
    }
}

fn decode_name(raw: &[u8], platform_id: u16) -> Option<String> {
    match platform_id {
        // Unicode and Windows strings are UTF-16BE.
        0 | 3 => {
            let (decoded, _) = encoding_rs::UTF_16BE.decode_without_bom_handling(raw);
            Some(decoded.into_owned())
        }
        // Macintosh strings are mac-roman.
        1 => {
            let (decoded, _) = encoding_rs::MACINTOSH.decode_without_bom_handling(raw);
            Some(decoded.into_owned())
        }
        _ => None,
    }
}
