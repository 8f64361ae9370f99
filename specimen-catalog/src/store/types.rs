//! Borrowed record views handed out by [`Catalog`].
//!
//! Views hold references into the catalog's document, so the borrow checker
//! keeps them from outliving the store they came from.

use crate::document::{FileRecord, FontsetRecord};

use super::Catalog;

/// Name classes stored for every face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NameKey {
    Family,
    Style,
    FullName,
    PreferFamily,
    PreferStyle,
    PostScript,
}

impl NameKey {
    /// All keys in numeric order.
    pub const ALL: [NameKey; 6] = [
        NameKey::Family,
        NameKey::Style,
        NameKey::FullName,
        NameKey::PreferFamily,
        NameKey::PreferStyle,
        NameKey::PostScript,
    ];

    /// Map the numeric key used by C callers (0..=5).
    pub fn from_raw(key: u32) -> Option<Self> {
        Self::ALL.get(key as usize).copied()
    }

    /// Numeric key (0..=5).
    pub fn to_raw(self) -> u32 {
        match self {
            NameKey::Family => 0,
            NameKey::Style => 1,
            NameKey::FullName => 2,
            NameKey::PreferFamily => 3,
            NameKey::PreferStyle => 4,
            NameKey::PostScript => 5,
        }
    }

    /// Field name in the catalog document.
    pub fn field_name(self) -> &'static str {
        match self {
            NameKey::Family => "family",
            NameKey::Style => "style",
            NameKey::FullName => "full",
            NameKey::PreferFamily => "prefer_family",
            NameKey::PreferStyle => "prefer_style",
            NameKey::PostScript => "postscript",
        }
    }
}

/// A face in the catalog.
#[derive(Clone, Copy)]
pub struct Font<'a> {
    record: &'a FileRecord,
    file_index: u32,
}

impl std::fmt::Debug for Font<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Font")
            .field("file_index", &self.file_index)
            .field("path", &self.record.path)
            .field("index", &self.record.index)
            .finish()
    }
}

impl PartialEq for Font<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.record, other.record)
    }
}

impl Eq for Font<'_> {}

impl<'a> Font<'a> {
    pub(crate) fn new(record: &'a FileRecord, file_index: u32) -> Self {
        Self { record, file_index }
    }

    /// Path of the font file.
    pub fn path(&self) -> &'a str {
        &self.record.path
    }

    /// Face index inside the font file.
    pub fn index(&self) -> u32 {
        self.record.index
    }

    /// Position of this face in the catalog's file table.
    pub fn file_index(&self) -> u32 {
        self.file_index
    }

    /// All names of one class.
    pub fn names(&self, key: NameKey) -> &'a [String] {
        let record = self.record;
        match key {
            NameKey::Family => &record.family,
            NameKey::Style => &record.style,
            NameKey::FullName => &record.full,
            NameKey::PreferFamily => &record.prefer_family,
            NameKey::PreferStyle => &record.prefer_style,
            NameKey::PostScript => &record.postscript,
        }
    }

    /// Number of names of one class; zero when the class is absent.
    pub fn name_count(&self, key: NameKey) -> usize {
        self.names(key).len()
    }

    /// The `index`-th name of one class, if present.
    pub fn name(&self, key: NameKey, index: usize) -> Option<&'a str> {
        self.names(key).get(index).map(String::as_str)
    }

    /// The underlying document record.
    pub fn record(&self) -> &'a FileRecord {
        self.record
    }
}

/// A family and its member faces.
#[derive(Clone, Copy)]
pub struct Fontset<'a> {
    record: &'a FontsetRecord,
    catalog: &'a Catalog,
}

impl std::fmt::Debug for Fontset<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Fontset")
            .field("name", &self.record.name)
            .field("members", &self.record.inst)
            .finish()
    }
}

impl<'a> Fontset<'a> {
    pub(crate) fn new(record: &'a FontsetRecord, catalog: &'a Catalog) -> Self {
        Self { record, catalog }
    }

    /// Family name.
    pub fn name(&self) -> &'a str {
        &self.record.name
    }

    /// File indices of the members, in document order.
    pub fn members(&self) -> &'a [u32] {
        &self.record.inst
    }

    pub fn len(&self) -> usize {
        self.record.inst.len()
    }

    pub fn is_empty(&self) -> bool {
        self.record.inst.is_empty()
    }

    /// Member at `index`, or `None` past the end.
    pub fn get(&self, index: usize) -> Option<Font<'a>> {
        let file_index = *self.record.inst.get(index)?;
        self.catalog.font_at(file_index as usize)
    }

    /// Member at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.len()`.
    pub fn font(&self, index: usize) -> Font<'a> {
        match self.get(index) {
            Some(font) => font,
            None => panic!(
                "fontset '{}' has {} members, index {} is out of range",
                self.record.name,
                self.len(),
                index
            ),
        }
    }

    /// Members in document order.
    pub fn iter(&self) -> impl Iterator<Item = Font<'a>> + 'a {
        let catalog = self.catalog;
        self.record
            .inst
            .iter()
            .filter_map(move |&i| catalog.font_at(i as usize))
    }
}
