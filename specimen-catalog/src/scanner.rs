//! Font directory scanning for catalog generation.
//!
//! Walks font directories, parses every face's `name` table with swash and
//! turns it into a [`FileRecord`].

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use swash::{FontDataRef, FontRef, StringId};
use walkdir::WalkDir;

use crate::document::FileRecord;

/// Directory levels below each root that are still walked.
const MAX_DEPTH: usize = 8;

/// Collect every font file below `dirs`, in walk order, without repeats.
pub fn collect_font_files<P: AsRef<Path>>(dirs: &[P]) -> Vec<PathBuf> {
    let mut seen = HashSet::new();
    let mut files = Vec::new();
    for dir in dirs {
        // Files inside a directory at MAX_DEPTH sit one level deeper.
        let walker = WalkDir::new(dir.as_ref())
            .follow_links(true)
            .max_depth(MAX_DEPTH + 1)
            .sort_by_file_name();
        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    log::debug!("Skipping unreadable font directory entry: {}", e);
                    continue;
                }
            };
            if !entry.file_type().is_file() || !has_font_extension(entry.path()) {
                continue;
            }
            let path = entry.into_path();
            if seen.insert(path.clone()) {
                files.push(path);
            }
        }
    }
    files
}

fn has_font_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| {
            matches!(
                ext.to_ascii_lowercase().as_str(),
                "ttf" | "otf" | "ttc" | "otc"
            )
        })
}

/// Scan every font below `dirs` into file records.
pub fn scan_dirs<P: AsRef<Path>>(dirs: &[P]) -> Vec<FileRecord> {
    let files = collect_font_files(dirs);
    log::info!("Scanning {} font files", files.len());

    let mut records = Vec::new();
    for path in &files {
        match fs::read(path) {
            Ok(data) => {
                let found = scan_data(&data, &path.to_string_lossy());
                if found.is_empty() {
                    log::debug!("No font faces in {:?}", path);
                }
                records.extend(found);
            }
            Err(e) => log::debug!("Skipping unreadable font {:?}: {}", path, e),
        }
    }
    records
}

/// One record per face in `data`; empty when `data` is not a font.
pub fn scan_data(data: &[u8], path: &str) -> Vec<FileRecord> {
    let Some(font_data) = FontDataRef::new(data) else {
        return Vec::new();
    };
    font_data
        .fonts()
        .enumerate()
        .map(|(index, font)| read_names(font, path, index as u32))
        .collect()
}

fn read_names(font: FontRef<'_>, path: &str, index: u32) -> FileRecord {
    let mut record = FileRecord {
        path: path.to_owned(),
        index,
        ..Default::default()
    };

    for string in font.localized_strings() {
        let list = match string.id() {
            StringId::Family => &mut record.family,
            StringId::SubFamily => &mut record.style,
            StringId::Full => &mut record.full,
            StringId::PostScript => &mut record.postscript,
            StringId::TypographicFamily => &mut record.prefer_family,
            StringId::TypographicSubFamily => &mut record.prefer_style,
            _ => continue,
        };
        if !string.is_decodable() {
            continue;
        }
        let text: String = string.chars().filter(|&c| c != '\0').collect();
        if !text.is_empty() && !list.contains(&text) {
            list.push(text);
        }
    }
    record
}
