// deck-kit/src/sources/fs.rs
//
// Copyright © 2024 The deck-kit Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! A source that builds its index from font files found on disk.
//!
//! This source uses the WalkDir abstraction from the `walkdir` crate to locate fonts.

use std::env;
use std::ffi::{OsStr, OsString};
use std::fs::File;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use walkdir::WalkDir;

use crate::error::SelectionError;
use crate::font::{FileType, Font};
use crate::handle::Handle;
use crate::properties::Properties;
use crate::source::Source;
use crate::sources::mem::MemSource;

/// A source that builds its index from font files found on disk.
///
/// This source uses the WalkDir abstraction from the `walkdir` crate to locate fonts.
pub struct FsSource {
    mem_source: MemSource,
}

impl Default for FsSource {
    fn default() -> Self {
        Self::new()
    }
}

impl FsSource {
    /// Scans the typical font directories of the running platform and indexes the fonts
    /// found within.
    ///
    /// Directories are scanned in the order [`font_directories`] lists them, so a face
    /// installed in more than one place resolves to the last directory that carries it.
    /// This makes a best effort to locate installed fonts; fonts stored in unusual
    /// locations will not be picked up.
    pub fn new() -> FsSource {
        let mut fonts = vec![];
        for font_directory in font_directories() {
            fonts.extend(Self::discover_fonts(&font_directory));
        }
        FsSource {
            mem_source: MemSource::from_fonts(fonts.into_iter()),
        }
    }

    /// Indexes all fonts found under `path`.
    pub fn in_path<P>(path: P) -> FsSource
    where
        P: AsRef<Path>,
    {
        let fonts = Self::discover_fonts(path.as_ref());
        FsSource {
            mem_source: MemSource::from_fonts(fonts.into_iter()),
        }
    }

    fn discover_fonts(path: &Path) -> Vec<Handle> {
        let mut fonts = vec![];
        for directory_entry in WalkDir::new(path).into_iter() {
            let directory_entry = match directory_entry {
                Ok(directory_entry) => directory_entry,
                Err(_) => continue,
            };
            if !directory_entry.file_type().is_file() {
                continue;
            }
            let path = directory_entry.path();
            if !has_font_extension(path) {
                continue;
            }
            let mut file = match File::open(path) {
                Ok(file) => file,
                Err(err) => {
                    warn!("skipping unreadable font file {:?}: {}", path, err);
                    continue;
                }
            };
            match Font::analyze_stream(&mut file) {
                Err(err) => debug!("skipping non-font file {:?}: {}", path, err),
                Ok(FileType::Single) => fonts.push(Handle::from_path(path.to_owned(), 0)),
                Ok(FileType::Collection(font_count)) => {
                    for font_index in 0..font_count {
                        fonts.push(Handle::from_path(path.to_owned(), font_index))
                    }
                }
            }
        }
        fonts
    }

    /// The number of faces in the index.
    #[inline]
    pub fn len(&self) -> usize {
        self.mem_source.len()
    }

    /// True if the scan found no fonts at all.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.mem_source.is_empty()
    }

    /// The names of all indexed families, sorted and deduplicated.
    pub fn all_families(&self) -> Result<Vec<String>, SelectionError> {
        self.mem_source.all_families()
    }

    /// Looks up the font file with exactly the given family name and properties.
    pub fn select(
        &self,
        family_name: &str,
        properties: &Properties,
    ) -> Result<Handle, SelectionError> {
        self.mem_source.select(family_name, properties)
    }
}

impl Source for FsSource {
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

fn has_font_extension(path: &Path) -> bool {
    path.extension()
        .and_then(OsStr::to_str)
        .map_or(false, |extension| {
            matches!(
                extension.to_ascii_lowercase().as_str(),
                "ttf" | "otf" | "ttc" | "otc"
            )
        })
}

/// The typical font directories of the running platform, in scan order.
pub fn font_directories() -> Vec<PathBuf> {
    if cfg!(target_os = "macos") {
        macos_font_directories(dirs_next::home_dir())
    } else if cfg!(target_family = "windows") {
        windows_font_directories(env::var_os("WINDIR"))
    } else if cfg!(target_os = "android") {
        vec![PathBuf::from("/system/fonts")]
    } else {
        unix_font_directories(dirs_next::home_dir(), dirs_next::data_dir())
    }
}

fn macos_font_directories(home: Option<PathBuf>) -> Vec<PathBuf> {
    let mut directories = vec![
        PathBuf::from("/Library/Fonts"),
        PathBuf::from("/Network/Library/Fonts"),
        PathBuf::from("/System/Library/Fonts"),
    ];
    if let Some(home) = home {
        directories.push(home.join("Library").join("Fonts"));
        directories.push(home.join(".fonts"));
    }
    directories
}

fn windows_font_directories(windir: Option<OsString>) -> Vec<PathBuf> {
    let windir = windir.map_or_else(|| PathBuf::from("C:\\Windows"), PathBuf::from);
    vec![windir.join("Fonts")]
}

fn unix_font_directories(home: Option<PathBuf>, data_dir: Option<PathBuf>) -> Vec<PathBuf> {
    let mut directories = vec![
        PathBuf::from("/usr/share/fonts"),
        PathBuf::from("/usr/local/share/fonts"),
    ];
    if let Some(home) = home {
        directories.push(home.join(".fonts")); // ~/.fonts is deprecated
    }
    if let Some(mut data_dir) = data_dir {
        data_dir.push("fonts");
        directories.push(data_dir);
    }
    directories
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::{build_collection, build_font};
    use std::fs;

    #[test]
    fn scans_a_directory_tree() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("foobar.ttf"), build_font("Foobar", false, false)).unwrap();
        fs::write(dir.path().join("foobarb.ttf"), build_font("Foobar", true, false)).unwrap();
        let nested = dir.path().join("nested");
        fs::create_dir(&nested).unwrap();
        fs::write(nested.join("barfooi.otf"), build_font("Barfoo", false, true)).unwrap();
        fs::write(dir.path().join("notes.txt"), b"not a font").unwrap();

        let source = FsSource::in_path(dir.path());
        assert_eq!(source.len(), 3);
        assert_eq!(source.all_families().unwrap(), vec!["Barfoo", "Foobar"]);

        let handle = source
            .select("Barfoo", Properties::new().italic(true))
            .unwrap();
        match handle {
            Handle::Path { ref path, font_index } => {
                assert_eq!(path, &nested.join("barfooi.otf"));
                assert_eq!(font_index, 0);
            }
            Handle::Memory { .. } => panic!("expected a path handle"),
        }
    }

    #[test]
    fn indexes_every_face_of_a_collection() {
        let dir = tempfile::tempdir().unwrap();
        let collection = build_collection(&[("Foobar", false, false), ("Foobar", true, false)]);
        fs::write(dir.path().join("foobar.ttc"), collection).unwrap();

        let source = FsSource::in_path(dir.path());
        assert_eq!(source.len(), 2);
        match source
            .select("Foobar", Properties::new().bold(true))
            .unwrap()
        {
            Handle::Path { font_index, .. } => assert_eq!(font_index, 1),
            Handle::Memory { .. } => panic!("expected a path handle"),
        }
    }

    #[test]
    fn extension_filter_skips_other_files() {
        let dir = tempfile::tempdir().unwrap();
        // Valid font bytes under an extension the catalog does not consider.
        fs::write(dir.path().join("foobar.dat"), build_font("Foobar", false, false)).unwrap();
        fs::write(dir.path().join("broken.ttf"), b"ttf by name only").unwrap();

        let source = FsSource::in_path(dir.path());
        assert!(source.is_empty());
    }

    #[test]
    fn macos_directory_list() {
        let directories = macos_font_directories(Some(PathBuf::from("/Users/fbar")));
        assert_eq!(
            directories,
            vec![
                PathBuf::from("/Library/Fonts"),
                PathBuf::from("/Network/Library/Fonts"),
                PathBuf::from("/System/Library/Fonts"),
                PathBuf::from("/Users/fbar/Library/Fonts"),
                PathBuf::from("/Users/fbar/.fonts"),
            ]
        );
        assert_eq!(macos_font_directories(None).len(), 3);
    }

    #[test]
    fn windows_directory_list() {
        assert_eq!(
            windows_font_directories(Some(OsString::from("D:\\Win"))),
            vec![PathBuf::from("D:\\Win").join("Fonts")]
        );
        assert_eq!(
            windows_font_directories(None),
            vec![PathBuf::from("C:\\Windows").join("Fonts")]
        );
    }

    #[test]
    fn unix_directory_list() {
        let directories = unix_font_directories(
            Some(PathBuf::from("/home/fbar")),
            Some(PathBuf::from("/home/fbar/.local/share")),
        );
        assert_eq!(
            directories,
            vec![
                PathBuf::from("/usr/share/fonts"),
                PathBuf::from("/usr/local/share/fonts"),
                PathBuf::from("/home/fbar/.fonts"),
                PathBuf::from("/home/fbar/.local/share/fonts"),
            ]
        );
    }
}
