//! Name sets a font manager registers for a face.

use crate::store::{Font, NameKey};

/// Family, style and full names of one face, deduplicated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameCollection {
    pub family_names: Vec<String>,
    pub style_names: Vec<String>,
    pub full_names: Vec<String>,
    /// First PostScript name, if the face has one.
    pub ps_name: Option<String>,
}

impl NameCollection {
    /// Read the names of `font`.
    ///
    /// Typographic family/style names win when the face has both; otherwise
    /// the legacy family/style names are used.
    pub fn from_font(font: &Font<'_>) -> Self {
        let (family_key, style_key) = if font.name_count(NameKey::PreferFamily) > 0
            && font.name_count(NameKey::PreferStyle) > 0
        {
            (NameKey::PreferFamily, NameKey::PreferStyle)
        } else {
            (NameKey::Family, NameKey::Style)
        };

        let mut names = Self::default();
        for name in font.names(family_key) {
            append_unique(&mut names.family_names, name);
        }
        for name in font.names(style_key) {
            append_unique(&mut names.style_names, name);
        }
        for name in font.names(NameKey::FullName) {
            append_unique(&mut names.full_names, name);
        }
        names.ps_name = font.name(NameKey::PostScript, 0).map(str::to_owned);
        names
    }
}

fn append_unique(list: &mut Vec<String>, name: &str) {
    if !list.iter().any(|n| n == name) {
        list.push(name.to_owned());
    }
}
