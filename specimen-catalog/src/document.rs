//! Serialized catalog document.
//!
//! Field names follow the generator's JSON output (`file`, `link`,
//! `fontset`, `link_hash`, `fontset_hash`, `key`/`vals`); the descriptive
//! plural names are accepted as aliases.

use serde::{Deserialize, Serialize};

/// Root of a catalog document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogDocument {
    /// Physical font faces, indexed by position.
    #[serde(rename = "file", alias = "files", default)]
    pub files: Vec<FileRecord>,

    /// Exact-name entries pointing at faces.
    #[serde(rename = "link", alias = "links", default)]
    pub links: Vec<LinkRecord>,

    /// Family entries listing their member faces.
    #[serde(rename = "fontset", alias = "fontsets", default)]
    pub fontsets: Vec<FontsetRecord>,

    /// Non-empty buckets of the link hash table.
    #[serde(default)]
    pub link_hash: Vec<BucketEntry>,

    /// Non-empty buckets of the fontset hash table.
    #[serde(default)]
    pub fontset_hash: Vec<BucketEntry>,

    /// Informational face count written by the generator.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_count: Option<usize>,

    /// Informational link count written by the generator.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link_count: Option<usize>,
}

/// One face of one font file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    /// Path of the font file.
    #[serde(default)]
    pub path: String,
    /// Face index inside the file (non-zero only for collections).
    #[serde(default)]
    pub index: u32,
    /// Legacy family names (name id 1).
    #[serde(default)]
    pub family: Vec<String>,
    /// Legacy style names (name id 2).
    #[serde(default)]
    pub style: Vec<String>,
    /// Full names (name id 4).
    #[serde(default)]
    pub full: Vec<String>,
    /// Typographic family names (name id 16).
    #[serde(default)]
    pub prefer_family: Vec<String>,
    /// Typographic style names (name id 17).
    #[serde(default)]
    pub prefer_style: Vec<String>,
    /// PostScript names (name id 6).
    #[serde(default)]
    pub postscript: Vec<String>,
}

/// Exact name to face association.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkRecord {
    pub name: String,
    /// File indices; lookups use the first.
    #[serde(default)]
    pub inst: Vec<u32>,
}

/// Family name to member faces association.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontsetRecord {
    pub name: String,
    /// File indices of every member, in document order.
    #[serde(default)]
    pub inst: Vec<u32>,
}

/// One non-empty hash bucket.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketEntry {
    pub key: u32,
    #[serde(rename = "vals", alias = "value_list", default)]
    pub vals: Vec<u32>,
}

impl CatalogDocument {
    /// Parse a document from JSON text.
    pub fn from_json_str(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    /// Parse a document from JSON bytes.
    pub fn from_json_slice(bytes: &[u8]) -> serde_json::Result<Self> {
        serde_json::from_slice(bytes)
    }

    /// Compact JSON, as the generator writes it.
    pub fn to_json_string(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
