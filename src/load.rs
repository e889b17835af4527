//! Entry loading and build-data assembly.
//!
//! Stage 1 of the build pipeline. Reads the site directory, validates every
//! adopter entry, and produces the [`Manifest`] the generate stage renders.
//!
//! ## Directory Structure
//!
//! ```text
//! site/
//! ├── config.toml          # Site configuration (optional)
//! ├── adopters/            # One YAML file per adopter
//! │   ├── acme.yaml
//! │   └── zenith.yml
//! ├── unverified.yaml      # Unverified {name, website} list (optional)
//! └── static/              # Assets copied to the output root
//! ```
//!
//! ## Entry Files
//!
//! ```yaml
//! name: Acme
//! logoUrl: https://acme.test/logo.png
//! website: https://acme.test
//! usage: Billing platform and internal tooling
//! scala3AdoptionStatus: partial   # optional
//! category: product company
//! size: 1200                      # "1200" works too
//! sources:                        # optional; a single string works too
//!   - https://acme.test/blog/scala-3
//! ```
//!
//! ## Validation
//!
//! Any invalid entry fails the whole load. Nothing is skipped: a wrong
//! listing is worse than a failed build. Error messages always name the file,
//! and for field errors the field.
//!
//! ## Ordering
//!
//! Adopters are sorted by `size` descending, ties by `name` ascending
//! (ignoring case and accents, then exact). Entry files are read in sorted path order
//! so the result does not depend on directory iteration order.

use crate::config::{self, SiteConfig};
use crate::types::{Adopter, AdoptersContent, UnverifiedAdopter};
use crate::validate::{self, FieldError};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_yml::Value;
use std::cmp::Ordering;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Entry directory, relative to the site root.
pub const ADOPTERS_DIR: &str = "adopters";

/// Unverified list, relative to the site root.
pub const UNVERIFIED_FILE: &str = "unverified.yaml";

const ENTRY_EXTENSIONS: &[&str] = &["yaml", "yml"];

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Missing adopters directory at {}", .0.display())]
    MissingDirectory(PathBuf),
    #[error("No adopter entries found at {}", .0.display())]
    NoEntries(PathBuf),
    #[error("I/O error reading {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("YAML parse error in {file}: {source}")]
    Parse {
        file: String,
        source: serde_yml::Error,
    },
    #[error("{0} must contain a YAML object")]
    NotAnObject(String),
    #[error(transparent)]
    Field(#[from] FieldError),
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
}

/// Build data handed from the load stage to the generate stage.
///
/// Serialized as `adopters.json`: `{ adopters, lastUpdated, unverified, config }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(flatten)]
    pub content: AdoptersContent,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unverified: Vec<UnverifiedAdopter>,
    pub config: SiteConfig,
}

/// Load everything the site needs from `site_root`.
pub fn load(site_root: &Path) -> Result<Manifest, LoadError> {
    let content = load_adopters(&site_root.join(ADOPTERS_DIR))?;
    let unverified = load_unverified(site_root)?;
    let config = config::load_config(site_root)?;

    Ok(Manifest {
        content,
        unverified,
        config,
    })
}

/// Load, validate and sort every entry in `dir`, stamped with today's UTC date.
pub fn load_adopters(dir: &Path) -> Result<AdoptersContent, LoadError> {
    load_adopters_on(dir, Utc::now().date_naive())
}

/// Same as [`load_adopters`] with an explicit `lastUpdated` date.
pub fn load_adopters_on(dir: &Path, today: NaiveDate) -> Result<AdoptersContent, LoadError> {
    if !dir.exists() {
        return Err(LoadError::MissingDirectory(dir.to_path_buf()));
    }

    let mut adopters = Vec::new();
    for path in entry_files(dir)? {
        let file = file_name(&path);
        let contents = fs::read_to_string(&path).map_err(|source| LoadError::Io {
            path: path.clone(),
            source,
        })?;
        adopters.push(parse_entry(&contents, &file)?);
    }

    if adopters.is_empty() {
        return Err(LoadError::NoEntries(dir.to_path_buf()));
    }

    sort_adopters(&mut adopters);

    Ok(AdoptersContent {
        adopters,
        last_updated: today,
    })
}

/// Entry files in `dir`, sorted by path. Subdirectories and files with other
/// extensions are ignored; anything else with an entry extension is returned
/// and must read cleanly.
pub fn entry_files(dir: &Path) -> Result<Vec<PathBuf>, LoadError> {
    let io_error = |source| LoadError::Io {
        path: dir.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_error)? {
        let path = entry.map_err(io_error)?.path();
        if is_entry_file(&path) && !path.is_dir() {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}

fn is_entry_file(path: &Path) -> bool {
    path.extension()
        .map(|e| {
            ENTRY_EXTENSIONS
                .iter()
                .any(|ext| e.eq_ignore_ascii_case(ext))
        })
        .unwrap_or(false)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

/// Parse and validate the contents of one entry file.
///
/// `file` is only used in error messages.
pub fn parse_entry(contents: &str, file: &str) -> Result<Adopter, LoadError> {
    // An empty document is an empty object; its fields then fail one by one.
    let data: Value = if contents.trim().is_empty() {
        Value::Null
    } else {
        serde_yml::from_str(contents).map_err(|source| LoadError::Parse {
            file: file.to_string(),
            source,
        })?
    };

    if !matches!(data, Value::Mapping(_) | Value::Null) {
        return Err(LoadError::NotAnObject(file.to_string()));
    }

    Ok(Adopter {
        name: validate::validate_string(data.get("name"), "name", file)?,
        logo_url: validate::validate_string(data.get("logoUrl"), "logoUrl", file)?,
        website: validate::validate_string(data.get("website"), "website", file)?,
        usage: validate::validate_string(data.get("usage"), "usage", file)?,
        scala3_adoption_status: validate::parse_adoption_status(
            data.get("scala3AdoptionStatus"),
            file,
        )?,
        category: validate::parse_category(data.get("category"), file)?,
        size: validate::validate_number(data.get("size"), "size", file)?,
        sources: validate::parse_sources(data.get("sources"), file)?,
    })
}

/// Sort by size descending, then name ascending.
pub fn sort_adopters(adopters: &mut [Adopter]) {
    adopters.sort_by(compare_adopters);
}

fn compare_adopters(a: &Adopter, b: &Adopter) -> Ordering {
    b.size
        .total_cmp(&a.size)
        .then_with(|| compare_names(&a.name, &b.name))
}

/// Alphabetical order ignoring case and accents ("Émile" sorts with "E"),
/// with an exact tiebreak so "acme" and "Acme" sort the same way every run.
fn compare_names(a: &str, b: &str) -> Ordering {
    name_key(a)
        .cmp(&name_key(b))
        .then_with(|| a.cmp(b))
}

/// NFD-decompose, drop combining marks, lowercase.
fn name_key(name: &str) -> String {
    name.nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
}

/// Load the optional unverified list. A missing or empty file is an empty list.
pub fn load_unverified(site_root: &Path) -> Result<Vec<UnverifiedAdopter>, LoadError> {
    let path = site_root.join(UNVERIFIED_FILE);
    if !path.exists() {
        return Ok(Vec::new());
    }
    let contents = fs::read_to_string(&path).map_err(|source| LoadError::Io {
        path: path.clone(),
        source,
    })?;
    if contents.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_yml::from_str(&contents).map_err(|source| LoadError::Parse {
        file: UNVERIFIED_FILE.to_string(),
        source,
    })
}
