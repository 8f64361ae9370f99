//! Cross-table reference checks run before any hash table is built.

use crate::document::CatalogDocument;
use crate::error::{CatalogError, Table};

/// Every `inst` entry must index the file table and every link must name a face.
pub(super) fn check_records(document: &CatalogDocument) -> Result<(), CatalogError> {
    let files = document.files.len();

    for link in &document.links {
        if link.inst.is_empty() {
            return Err(CatalogError::EmptyInstance {
                name: link.name.clone(),
            });
        }
        check_instances(files, &link.inst, || format!("link record '{}'", link.name))?;
    }

    for fontset in &document.fontsets {
        check_instances(files, &fontset.inst, || {
            format!("fontset record '{}'", fontset.name)
        })?;
    }

    Ok(())
}

fn check_instances(
    files: usize,
    inst: &[u32],
    what: impl FnOnce() -> String,
) -> Result<(), CatalogError> {
    match inst.iter().find(|&&i| i as usize >= files) {
        Some(&index) => Err(CatalogError::IndexOutOfRange {
            table: Table::Files,
            what: what(),
            index,
            len: files,
        }),
        None => Ok(()),
    }
}
