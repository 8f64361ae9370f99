//! The catalog store and its lookup engine.
//!
//! A [`Catalog`] owns a parsed [`CatalogDocument`] and two [`HashTable`]s
//! rebuilt from the document's precomputed buckets:
//! - the link table, used by [`Catalog::search_by_name`]
//! - the fontset table, used by [`Catalog::search_by_family`]
//!
//! A lookup hashes the query, walks the candidate indices of that one bucket
//! and returns the first record whose name matches byte for byte. Once built
//! the store is never mutated, so it can be shared between threads freely.

mod types;
mod validate;

use std::collections::HashSet;
use std::io::ErrorKind;
use std::path::Path;

use specimen_config::CatalogLocator;

use crate::document::{BucketEntry, CatalogDocument};
use crate::error::{CatalogError, Table};
use crate::hash_table::{HashTable, InsertError};
use crate::names::NameCollection;

pub use types::{Font, Fontset, NameKey};

/// Read-only font catalog with hashed name lookup.
#[derive(Debug)]
pub struct Catalog {
    link_table: HashTable,
    fontset_table: HashTable,
    document: CatalogDocument,
}

/// A face found by name together with its family members.
#[derive(Debug, Clone)]
pub struct Resolution<'a> {
    /// The face the name resolved to.
    pub font: Font<'a>,
    /// Names read from that face.
    pub names: NameCollection,
    /// The face itself followed by every other member of its families.
    pub members: Vec<Font<'a>>,
}

impl Catalog {
    /// Locate the catalog through `locator` and load it.
    pub fn init(locator: &dyn CatalogLocator) -> Result<Self, CatalogError> {
        let path = locator.locate().ok_or(CatalogError::Locate)?;
        Self::load(&path)
    }

    /// Load a catalog document from `path`.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        log::info!("Loading font catalog from {:?}", path);
        let bytes = std::fs::read(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => CatalogError::NotFound {
                path: path.to_path_buf(),
            },
            _ => CatalogError::Io {
                path: path.to_path_buf(),
                source: e,
            },
        })?;
        Self::from_slice(&bytes).inspect_err(|e| {
            log::error!("Rejected font catalog {:?}: {}", path, e);
        })
    }

    /// Build a catalog from JSON bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, CatalogError> {
        Self::from_document(CatalogDocument::from_json_slice(bytes)?)
    }

    /// Build a catalog from JSON text.
    pub fn from_json(text: &str) -> Result<Self, CatalogError> {
        Self::from_document(CatalogDocument::from_json_str(text)?)
    }

    /// Validate `document` and rebuild both hash tables from its buckets.
    pub fn from_document(document: CatalogDocument) -> Result<Self, CatalogError> {
        validate::check_records(&document)?;
        let link_table = build_table(Table::Links, &document.link_hash, document.links.len())?;
        let fontset_table = build_table(
            Table::Fontsets,
            &document.fontset_hash,
            document.fontsets.len(),
        )?;

        log::info!(
            "Font catalog ready: {} files, {} links, {} fontsets",
            document.files.len(),
            document.links.len(),
            document.fontsets.len()
        );
        log::debug!(
            "Bucket occupancy: links {}/{} (max {}), fontsets {}/{} (max {})",
            link_table.occupied(),
            crate::HASH_SIZE,
            link_table.max_bucket_len(),
            fontset_table.occupied(),
            crate::HASH_SIZE,
            fontset_table.max_bucket_len()
        );

        Ok(Self {
            link_table,
            fontset_table,
            document,
        })
    }

    /// Release the hash tables, then the document.
    pub fn teardown(self) {
        let Self {
            link_table,
            fontset_table,
            document,
        } = self;
        drop(link_table);
        drop(fontset_table);
        log::debug!("Released font catalog hash tables");
        drop(document);
    }

    /// Find the face registered under the exact name `name`.
    pub fn search_by_name(&self, name: &str) -> Option<Font<'_>> {
        let links = &self.document.links;
        let found = self
            .link_table
            .candidates(name)
            .iter()
            .map(|&i| &links[i as usize])
            .find(|link| link.name == name);

        match found {
            Some(link) => self.font_at(link.inst[0] as usize),
            None => {
                log::trace!("No font named {:?}", name);
                None
            }
        }
    }

    /// Find the family registered under the exact name `name`.
    pub fn search_by_family(&self, name: &str) -> Option<Fontset<'_>> {
        let fontsets = &self.document.fontsets;
        let found = self
            .fontset_table
            .candidates(name)
            .iter()
            .map(|&i| &fontsets[i as usize])
            .find(|set| set.name == name);

        if found.is_none() {
            log::trace!("No font family named {:?}", name);
        }
        found.map(|record| Fontset::new(record, self))
    }

    /// Member `index` of `fontset`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is past the end of the fontset.
    pub fn fontset_get_font<'a>(&'a self, fontset: &Fontset<'a>, index: usize) -> Font<'a> {
        fontset.font(index)
    }

    /// Resolve `name` to a face and collect the members of its families.
    ///
    /// Mirrors what a font manager does on a cache miss: register the face,
    /// then pull in every sibling so later style lookups hit.
    pub fn resolve(&self, name: &str) -> Option<Resolution<'_>> {
        let font = self.search_by_name(name)?;
        let names = NameCollection::from_font(&font);

        let mut members = vec![font];
        for family in &names.family_names {
            let Some(fontset) = self.search_by_family(family) else {
                continue;
            };
            for member in fontset.iter() {
                if !members.contains(&member) {
                    members.push(member);
                }
            }
        }

        Some(Resolution {
            font,
            names,
            members,
        })
    }

    /// Face at position `index` of the file table.
    pub fn font_at(&self, index: usize) -> Option<Font<'_>> {
        let record = self.document.files.get(index)?;
        Some(Font::new(record, index as u32))
    }

    /// Every face, in file-table order.
    pub fn fonts(&self) -> impl Iterator<Item = Font<'_>> {
        self.document
            .files
            .iter()
            .enumerate()
            .map(|(i, record)| Font::new(record, i as u32))
    }

    pub fn file_count(&self) -> usize {
        self.document.files.len()
    }

    pub fn link_count(&self) -> usize {
        self.document.links.len()
    }

    pub fn fontset_count(&self) -> usize {
        self.document.fontsets.len()
    }

    /// Hash table backing [`Self::search_by_name`].
    pub fn link_table(&self) -> &HashTable {
        &self.link_table
    }

    /// Hash table backing [`Self::search_by_family`].
    pub fn fontset_table(&self) -> &HashTable {
        &self.fontset_table
    }

    /// The parsed document.
    pub fn document(&self) -> &CatalogDocument {
        &self.document
    }
}

/// Replay a document's buckets into a fresh table.
fn build_table(
    table: Table,
    buckets: &[BucketEntry],
    records: usize,
) -> Result<HashTable, CatalogError> {
    let mut hash_table = HashTable::new()?;
    let mut declared = HashSet::new();
    for bucket in buckets {
        let key = bucket.key;
        if let Some(&index) = bucket.vals.iter().find(|&&v| v as usize >= records) {
            return Err(CatalogError::IndexOutOfRange {
                table,
                what: format!("{table} hash bucket {key}"),
                index,
                len: records,
            });
        }
        if !declared.insert(key) {
            return Err(CatalogError::DuplicateBucketKey { table, key });
        }
        hash_table
            .insert(key as usize, &bucket.vals)
            .map_err(|e| match e {
                InsertError::KeyOutOfRange(_) => CatalogError::BucketKeyOutOfRange { table, key },
                InsertError::Allocation(e) => CatalogError::Allocation(e),
            })?;
    }
    Ok(hash_table)
}
