//! Catalog generation from scanned faces.
//!
//! Produces the same document shape the lookup side consumes: link names,
//! fontsets and the precomputed hash buckets for both.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

use crate::document::{BucketEntry, CatalogDocument, FileRecord, FontsetRecord, LinkRecord};
use crate::error::CatalogError;
use crate::hash::hash_name;

/// Accumulates faces and emits a [`CatalogDocument`].
#[derive(Debug, Default)]
pub struct CatalogBuilder {
    files: Vec<FileRecord>,
}

impl CatalogBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one face.
    pub fn add_file(&mut self, record: FileRecord) -> &mut Self {
        self.files.push(record);
        self
    }

    /// Append several faces in order.
    pub fn extend(&mut self, records: impl IntoIterator<Item = FileRecord>) -> &mut Self {
        self.files.extend(records);
        self
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    /// Compute links, fontsets and hash buckets.
    pub fn build(self) -> CatalogDocument {
        let mut links = OrderedIndex::default();
        for (i, file) in self.files.iter().enumerate() {
            for name in link_names(file) {
                links.push(&name, i as u32);
            }
        }

        let mut fontsets = OrderedIndex::default();
        for (i, file) in self.files.iter().enumerate() {
            let families = if file.prefer_family.is_empty() {
                &file.family
            } else {
                &file.prefer_family
            };
            for family in families {
                fontsets.push(family, i as u32);
            }
        }

        let links: Vec<LinkRecord> = links
            .into_entries()
            .map(|(name, inst)| LinkRecord { name, inst })
            .collect();
        // A family of one face is reachable by name already.
        let fontsets: Vec<FontsetRecord> = fontsets
            .into_entries()
            .filter(|(_, inst)| inst.len() != 1)
            .map(|(name, inst)| FontsetRecord { name, inst })
            .collect();

        let link_hash = bucketize(links.iter().map(|l| l.name.as_str()));
        let fontset_hash = bucketize(fontsets.iter().map(|f| f.name.as_str()));

        log::info!(
            "Built catalog: {} files, {} links, {} fontsets",
            self.files.len(),
            links.len(),
            fontsets.len()
        );

        CatalogDocument {
            file_count: Some(self.files.len()),
            link_count: Some(links.len()),
            files: self.files,
            links,
            fontsets,
            link_hash,
            fontset_hash,
        }
    }
}

/// Write `document` as compact JSON, replacing `path` atomically.
pub fn write_document(document: &CatalogDocument, path: &Path) -> Result<(), CatalogError> {
    let io_err = |source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_err)?;
    }

    let json = document.to_json_string()?;
    let temp_path = path.with_extension("json.tmp");
    fs::write(&temp_path, json).map_err(io_err)?;
    fs::rename(&temp_path, path).map_err(io_err)?;

    log::info!("Wrote font catalog to {:?}", path);
    Ok(())
}

/// Names under which a face can be requested exactly.
fn link_names(file: &FileRecord) -> Vec<String> {
    let mut names: Vec<String> = file
        .postscript
        .iter()
        .chain(&file.full)
        .cloned()
        .collect();

    let preferred = join_names(&file.prefer_family, &file.prefer_style);
    if preferred.is_empty() {
        names.extend(join_names(&file.family, &file.style));
    } else {
        names.extend(preferred);
    }
    names
}

/// `"<family>-<style>"` for every pair, without repeats.
fn join_names(families: &[String], styles: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for family in families {
        for style in styles {
            let joined = format!("{family}-{style}");
            if !out.contains(&joined) {
                out.push(joined);
            }
        }
    }
    out
}

/// Group record positions by the hash of their name, sorted by key.
fn bucketize<'a>(names: impl Iterator<Item = &'a str>) -> Vec<BucketEntry> {
    let mut buckets: BTreeMap<u32, Vec<u32>> = BTreeMap::new();
    for (i, name) in names.enumerate() {
        if let Some(key) = hash_name(name) {
            buckets.entry(key).or_default().push(i as u32);
        }
    }
    buckets
        .into_iter()
        .map(|(key, vals)| BucketEntry { key, vals })
        .collect()
}

/// Insertion-ordered map from name to a deduplicated index list.
#[derive(Default)]
struct OrderedIndex {
    positions: HashMap<String, usize>,
    entries: Vec<(String, Vec<u32>)>,
}

impl OrderedIndex {
    fn push(&mut self, name: &str, index: u32) {
        let slot = match self.positions.get(name) {
            Some(&slot) => slot,
            None => {
                self.positions.insert(name.to_owned(), self.entries.len());
                self.entries.push((name.to_owned(), Vec::new()));
                self.entries.len() - 1
            }
        };
        let inst = &mut self.entries[slot].1;
        if !inst.contains(&index) {
            inst.push(index);
        }
    }

    fn into_entries(self) -> impl Iterator<Item = (String, Vec<u32>)> {
        self.entries.into_iter()
    }
}
