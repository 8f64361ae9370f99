//! Command-line interface for specimen.
//!
//! This module handles CLI argument parsing and runs the subcommands.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use specimen_catalog::{Catalog, CatalogBuilder, Font, HASH_SIZE, NameKey, scanner};
use specimen_config::{Config, LogLevel};

/// specimen - query and build the precomputed font catalog
#[derive(Parser, Debug)]
#[command(name = "specimen")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Catalog document to use instead of the configured location
    #[arg(long, global = true, value_name = "PATH")]
    pub catalog: Option<PathBuf>,

    /// Settings file to use instead of the default one
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log verbosity (overrides RUST_LOG and the settings file)
    #[arg(long, global = true, value_enum, value_name = "LEVEL")]
    pub log_level: Option<CliLogLevel>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Look up a face by its exact full, PostScript or family-style name
    Name {
        name: String,

        /// Also list the other members of the face's families
        #[arg(long)]
        family: bool,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// List the faces of a family
    Family {
        name: String,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Scan font directories and write a new catalog
    Generate {
        /// Directories to scan (default: font_dirs from the settings)
        dirs: Vec<PathBuf>,

        /// Where to write the catalog (default: the catalog location)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },

    /// Show table sizes and bucket occupancy
    Stats,
}

/// Level names accepted by `--log-level`.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum CliLogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for LogLevel {
    fn from(level: CliLogLevel) -> Self {
        match level {
            CliLogLevel::Off => LogLevel::Off,
            CliLogLevel::Error => LogLevel::Error,
            CliLogLevel::Warn => LogLevel::Warn,
            CliLogLevel::Info => LogLevel::Info,
            CliLogLevel::Debug => LogLevel::Debug,
            CliLogLevel::Trace => LogLevel::Trace,
        }
    }
}

/// Outcome of a subcommand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Found,
    NotFound,
}

impl Outcome {
    pub fn exit_code(self) -> i32 {
        match self {
            Outcome::Found => 0,
            Outcome::NotFound => 1,
        }
    }
}

/// Load settings honoring `--config`.
pub fn load_config(cli: &Cli) -> Result<Config> {
    let config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };
    config.context("failed to load settings")
}

/// Run the parsed command, writing results to `out`.
pub fn run(cli: &Cli, config: &Config, out: &mut dyn Write) -> Result<Outcome> {
    match &cli.command {
        Commands::Name { name, family, json } => {
            let catalog = open(&resolve_catalog_path(cli, config)?)?;
            name_command(&catalog, name, *family, *json, out)
        }
        Commands::Family { name, json } => {
            let catalog = open(&resolve_catalog_path(cli, config)?)?;
            family_command(&catalog, name, *json, out)
        }
        Commands::Generate { dirs, output } => {
            let dirs = if dirs.is_empty() {
                &config.font_dirs
            } else {
                dirs
            };
            let output = match output {
                Some(path) => path.clone(),
                None => resolve_catalog_path(cli, config)?,
            };
            generate_command(dirs, &output, out)
        }
        Commands::Stats => {
            let catalog = open(&resolve_catalog_path(cli, config)?)?;
            stats_command(&catalog, out)
        }
    }
}

fn resolve_catalog_path(cli: &Cli, config: &Config) -> Result<PathBuf> {
    if let Some(path) = &cli.catalog {
        return Ok(path.clone());
    }
    config
        .locator()
        .locate()
        .context("could not determine the catalog location; pass --catalog")
}

fn open(path: &Path) -> Result<Catalog> {
    Catalog::load(path).with_context(|| format!("failed to load catalog {}", path.display()))
}

/// JSON shape of one face.
#[derive(Serialize)]
struct FontSummary<'a> {
    path: &'a str,
    index: u32,
    family: &'a [String],
    style: &'a [String],
    full: &'a [String],
    prefer_family: &'a [String],
    prefer_style: &'a [String],
    postscript: &'a [String],
}

impl<'a> From<&Font<'a>> for FontSummary<'a> {
    fn from(font: &Font<'a>) -> Self {
        Self {
            path: font.path(),
            index: font.index(),
            family: font.names(NameKey::Family),
            style: font.names(NameKey::Style),
            full: font.names(NameKey::FullName),
            prefer_family: font.names(NameKey::PreferFamily),
            prefer_style: font.names(NameKey::PreferStyle),
            postscript: font.names(NameKey::PostScript),
        }
    }
}

fn write_font_text(font: &Font<'_>, out: &mut dyn Write) -> Result<()> {
    writeln!(out, "{} (face {})", font.path(), font.index())?;
    for key in NameKey::ALL {
        let names = font.names(key);
        if !names.is_empty() {
            writeln!(out, "  {}: {}", key.field_name(), names.join(", "))?;
        }
    }
    Ok(())
}

fn name_command(
    catalog: &Catalog,
    name: &str,
    family: bool,
    json: bool,
    out: &mut dyn Write,
) -> Result<Outcome> {
    let Some(resolution) = catalog.resolve(name) else {
        log::info!("No font named {:?}", name);
        return Ok(Outcome::NotFound);
    };

    let members: &[Font<'_>] = if family {
        &resolution.members[1..]
    } else {
        &[]
    };

    if json {
        #[derive(Serialize)]
        struct NameOutput<'a> {
            font: FontSummary<'a>,
            #[serde(skip_serializing_if = "Vec::is_empty")]
            family_members: Vec<FontSummary<'a>>,
        }
        let output = NameOutput {
            font: FontSummary::from(&resolution.font),
            family_members: members.iter().map(FontSummary::from).collect(),
        };
        serde_json::to_writer_pretty(&mut *out, &output)?;
        writeln!(out)?;
    } else {
        write_font_text(&resolution.font, out)?;
        if family {
            writeln!(
                out,
                "family: {}",
                resolution.names.family_names.join(", ")
            )?;
            for member in members {
                writeln!(out, "  {} (face {})", member.path(), member.index())?;
            }
        }
    }
    Ok(Outcome::Found)
}

fn family_command(
    catalog: &Catalog,
    name: &str,
    json: bool,
    out: &mut dyn Write,
) -> Result<Outcome> {
    let Some(fontset) = catalog.search_by_family(name) else {
        log::info!("No font family named {:?}", name);
        return Ok(Outcome::NotFound);
    };

    if json {
        let members: Vec<FontSummary<'_>> = fontset.iter().map(|f| FontSummary::from(&f)).collect();
        serde_json::to_writer_pretty(&mut *out, &members)?;
        writeln!(out)?;
    } else {
        writeln!(out, "{} ({} faces)", fontset.name(), fontset.len())?;
        for i in 0..fontset.len() {
            let font = catalog.fontset_get_font(&fontset, i);
            writeln!(out, "  {} (face {})", font.path(), font.index())?;
        }
    }
    Ok(Outcome::Found)
}

fn generate_command(dirs: &[PathBuf], output: &Path, out: &mut dyn Write) -> Result<Outcome> {
    let records = scanner::scan_dirs(dirs);
    let mut builder = CatalogBuilder::new();
    builder.extend(records);
    let document = builder.build();
    specimen_catalog::write_document(&document, output)
        .with_context(|| format!("failed to write catalog {}", output.display()))?;

    writeln!(out, "font_database @ '{}'", output.display())?;
    writeln!(
        out,
        "flushed {} faces, {} links, {} fontsets",
        document.files.len(),
        document.links.len(),
        document.fontsets.len()
    )?;
    Ok(Outcome::Found)
}

fn stats_command(catalog: &Catalog, out: &mut dyn Write) -> Result<Outcome> {
    writeln!(out, "files:    {}", catalog.file_count())?;
    writeln!(out, "links:    {}", catalog.link_count())?;
    writeln!(out, "fontsets: {}", catalog.fontset_count())?;
    for (label, table) in [
        ("link", catalog.link_table()),
        ("fontset", catalog.fontset_table()),
    ] {
        writeln!(
            out,
            "{} buckets: {}/{} occupied, longest {}",
            label,
            table.occupied(),
            HASH_SIZE,
            table.max_bucket_len()
        )?;
    }
    Ok(Outcome::Found)
}
