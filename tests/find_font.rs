// deck-kit/tests/find_font.rs
//
// Copyright © 2024 The deck-kit Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! End-to-end font lookup: synthesize font files on disk, scan the directory, and resolve
//! (family, bold, italic) triples back to the files that carry them.

use std::fs;
use std::path::Path;

use deck_kit::error::SelectionError;
use deck_kit::handle::Handle;
use deck_kit::properties::Properties;
use deck_kit::source::Source;
use deck_kit::sources::fs::FsSource;

/// Assembles a minimal single-face TrueType font: offset table, `head`, and a `name`
/// table with one Windows family-name record.
fn font_bytes(family: &str, bold: bool, italic: bool) -> Vec<u8> {
    let mut head = vec![0u8; 54];
    head[12..16].copy_from_slice(&0x5F0F_3CF5u32.to_be_bytes());
    head[18..20].copy_from_slice(&1000u16.to_be_bytes());
    let mac_style = (bold as u16) | ((italic as u16) << 1);
    head[44..46].copy_from_slice(&mac_style.to_be_bytes());

    let encoded: Vec<u8> = family
        .encode_utf16()
        .flat_map(|unit| unit.to_be_bytes())
        .collect();
    let mut name = Vec::new();
    for value in &[0u16, 1, 18, 3, 1, 0x409, 1, encoded.len() as u16, 0] {
        name.extend_from_slice(&value.to_be_bytes());
    }
    name.extend_from_slice(&encoded);

    let mut data = Vec::new();
    data.extend_from_slice(&0x0001_0000u32.to_be_bytes());
    for value in &[2u16, 32, 1, 0] {
        data.extend_from_slice(&value.to_be_bytes());
    }
    let head_offset = 12u32 + 2 * 16;
    let name_offset = head_offset + head.len() as u32;
    for (tag, offset, length) in &[
        (b"head", head_offset, head.len() as u32),
        (b"name", name_offset, name.len() as u32),
    ] {
        data.extend_from_slice(*tag);
        data.extend_from_slice(&0u32.to_be_bytes());
        data.extend_from_slice(&offset.to_be_bytes());
        data.extend_from_slice(&length.to_be_bytes());
    }
    data.extend_from_slice(&head);
    data.extend_from_slice(&name);
    data
}

fn write_font(dir: &Path, file_name: &str, family: &str, bold: bool, italic: bool) {
    fs::write(dir.join(file_name), font_bytes(family, bold, italic)).unwrap();
}

#[test]
fn finds_a_font_file_by_family_and_face() {
    let dir = tempfile::tempdir().unwrap();
    write_font(dir.path(), "foobar.ttf", "Foobar", false, false);
    write_font(dir.path(), "foobarb.ttf", "Foobar", true, false);
    write_font(dir.path(), "barfooi.otf", "Barfoo", false, true);

    let source = FsSource::in_path(dir.path());

    for &(family, bold, italic, file_name) in &[
        ("Foobar", false, false, "foobar.ttf"),
        ("Foobar", true, false, "foobarb.ttf"),
        ("Barfoo", false, true, "barfooi.otf"),
    ] {
        let handle = source
            .select(family, Properties::new().bold(bold).italic(italic))
            .unwrap();
        match handle {
            Handle::Path { ref path, .. } => assert_eq!(path, &dir.path().join(file_name)),
            Handle::Memory { .. } => panic!("expected a path handle"),
        }
    }
}

#[test]
fn missing_faces_are_not_found() {
    let dir = tempfile::tempdir().unwrap();
    write_font(dir.path(), "foobar.ttf", "Foobar", false, false);

    let source = FsSource::in_path(dir.path());
    assert_eq!(
        source
            .select("Foobar", Properties::new().bold(true))
            .err(),
        Some(SelectionError::NotFound)
    );
    assert_eq!(
        source.select("Nonesuch", &Properties::new()).err(),
        Some(SelectionError::NotFound)
    );
}

#[test]
fn scanning_recurses_and_loads_metadata() {
    let dir = tempfile::tempdir().unwrap();
    let nested = dir.path().join("truetype").join("foo");
    fs::create_dir_all(&nested).unwrap();
    write_font(&nested, "deep.ttf", "Deep Family", true, true);

    let source = FsSource::in_path(dir.path());
    assert_eq!(source.all_families().unwrap(), vec!["Deep Family"]);

    let font = source
        .find("Deep Family", Properties::new().bold(true).italic(true))
        .unwrap();
    assert_eq!(font.family_name(), "Deep Family");
    assert!(font.is_bold());
    assert!(font.is_italic());
    assert_eq!(font.units_per_em(), Some(1000));
}
