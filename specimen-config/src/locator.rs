//! Resolution of the catalog document's path.
//!
//! The catalog lives in a per-user configuration directory named by one
//! platform environment variable. Lookup code only sees the
//! [`CatalogLocator`] trait, so tests can point it anywhere.

use std::path::PathBuf;

use crate::defaults;

/// Supplies the path of the catalog document.
pub trait CatalogLocator {
    /// Path of the catalog, or `None` when no location can be derived.
    fn locate(&self) -> Option<PathBuf>;
}

/// Always yields the same path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedLocator {
    path: PathBuf,
}

impl FixedLocator {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CatalogLocator for FixedLocator {
    fn locate(&self) -> Option<PathBuf> {
        Some(self.path.clone())
    }
}

/// Joins a configuration directory taken from the environment with the
/// catalog file name.
///
/// The directory comes from [`defaults::CATALOG_DIR_VAR`] (`APPDATA` on
/// Windows, `XDG_CONFIG_HOME` elsewhere). When the variable is unset the
/// platform configuration directory is used instead; when it is set but
/// empty no path is produced.
#[derive(Debug, Clone)]
pub struct EnvLocator {
    var: String,
    file_name: String,
    fallback: Option<PathBuf>,
}

impl Default for EnvLocator {
    fn default() -> Self {
        Self {
            var: defaults::CATALOG_DIR_VAR.to_string(),
            file_name: defaults::CATALOG_FILE_NAME.to_string(),
            fallback: dirs::config_dir(),
        }
    }
}

impl EnvLocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a different variable.
    pub fn with_var(mut self, var: impl Into<String>) -> Self {
        self.var = var.into();
        self
    }

    /// Use a different file name.
    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = file_name.into();
        self
    }

    /// Directory used when the variable is unset; `None` disables it.
    pub fn with_fallback(mut self, fallback: Option<PathBuf>) -> Self {
        self.fallback = fallback;
        self
    }

    /// Resolve using `lookup` in place of the process environment.
    pub fn locate_with(&self, lookup: impl Fn(&str) -> Option<String>) -> Option<PathBuf> {
        let dir = match lookup(&self.var) {
            Some(value) if value.is_empty() => {
                log::debug!("{} is empty; no catalog location", self.var);
                return None;
            }
            Some(value) => PathBuf::from(value),
            None => self.fallback.clone()?,
        };
        Some(dir.join(&self.file_name))
    }
}

impl CatalogLocator for EnvLocator {
    fn locate(&self) -> Option<PathBuf> {
        self.locate_with(|var| std::env::var(var).ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(pairs: &'static [(&'static str, &'static str)]) -> impl Fn(&str) -> Option<String> {
        move |var| {
            pairs
                .iter()
                .find(|(k, _)| *k == var)
                .map(|(_, v)| v.to_string())
        }
    }

    #[test]
    fn test_fixed_locator() {
        let locator = FixedLocator::new("/tmp/fontdb.json");
        assert_eq!(locator.locate(), Some(PathBuf::from("/tmp/fontdb.json")));
    }

    #[test]
    fn test_env_var_joined_with_file_name() {
        let locator = EnvLocator::new().with_var("FONTDB_DIR").with_fallback(None);
        let path = locator.locate_with(env(&[("FONTDB_DIR", "/home/u/.config")]));
        assert_eq!(
            path,
            Some(PathBuf::from("/home/u/.config").join(defaults::CATALOG_FILE_NAME))
        );
    }

    #[test]
    fn test_trailing_separator_is_not_doubled() {
        let locator = EnvLocator::new()
            .with_var("FONTDB_DIR")
            .with_file_name("db.json");
        let path = locator
            .locate_with(env(&[("FONTDB_DIR", "/data/")]))
            .unwrap();
        assert_eq!(path, PathBuf::from("/data/db.json"));
    }

    #[test]
    fn test_empty_var_yields_nothing() {
        let locator = EnvLocator::new()
            .with_var("FONTDB_DIR")
            .with_fallback(Some(PathBuf::from("/fallback")));
        assert_eq!(locator.locate_with(env(&[("FONTDB_DIR", "")])), None);
    }

    #[test]
    fn test_unset_var_uses_fallback() {
        let locator = EnvLocator::new()
            .with_var("FONTDB_DIR")
            .with_fallback(Some(PathBuf::from("/fallback")));
        assert_eq!(
            locator.locate_with(env(&[])),
            Some(PathBuf::from("/fallback").join(defaults::CATALOG_FILE_NAME))
        );

        let locator = locator.with_fallback(None);
        assert_eq!(locator.locate_with(env(&[])), None);
    }
}
