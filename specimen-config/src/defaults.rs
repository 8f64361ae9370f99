//! Default values for configuration.

use std::path::PathBuf;

/// File name of the catalog document inside the configuration directory.
pub const CATALOG_FILE_NAME: &str = "xetex-fontdb.json";

/// Environment variable naming the directory that holds the catalog.
#[cfg(target_os = "windows")]
pub const CATALOG_DIR_VAR: &str = "APPDATA";
#[cfg(not(target_os = "windows"))]
pub const CATALOG_DIR_VAR: &str = "XDG_CONFIG_HOME";

/// Directories scanned when generating a catalog.
pub fn font_dirs() -> Vec<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        let windir = std::env::var_os("WINDIR").unwrap_or_else(|| "C:\\Windows".into());
        let mut paths = texlive_font_dirs(PathBuf::from("C:\\texlive"));
        paths.push(PathBuf::from(windir).join("Fonts"));
        if let Some(local) = dirs::data_local_dir() {
            paths.push(local.join("Microsoft").join("Windows").join("Fonts"));
        }
        paths
    }
    #[cfg(target_os = "macos")]
    {
        let mut paths = texlive_font_dirs(PathBuf::from("/usr/local/texlive"));
        paths.push(PathBuf::from("/System/Library/Fonts"));
        paths.push(PathBuf::from("/Library/Fonts"));
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join("Library").join("Fonts"));
        }
        paths
    }
    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        let mut paths = texlive_font_dirs(PathBuf::from("/usr/local/texlive"));
        paths.push(PathBuf::from("/usr/share/fonts"));
        paths.push(PathBuf::from("/usr/local/share/fonts"));
        if let Some(data) = dirs::data_dir() {
            paths.push(data.join("fonts"));
        }
        paths
    }
}

/// OpenType and TrueType trees of the newest TeX Live release under `root`.
fn texlive_font_dirs(root: PathBuf) -> Vec<PathBuf> {
    let newest = std::fs::read_dir(&root)
        .into_iter()
        .flatten()
        .flatten()
        .filter_map(|e| e.file_name().to_str()?.parse::<u32>().ok())
        .max();
    let Some(year) = newest else {
        return Vec::new();
    };
    let fonts = root.join(year.to_string()).join("texmf-dist").join("fonts");
    vec![fonts.join("opentype"), fonts.join("truetype")]
}
