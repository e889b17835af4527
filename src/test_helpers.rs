//! Shared test utilities for the adoption-tracker test suite.
//!
//! Provides fixture setup, entry writers, and lookup helpers that work with
//! load-stage data (`AdoptersContent`, `Adopter`).
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = setup_fixtures();
//! let manifest = load(tmp.path()).unwrap();
//!
//! let globex = find_adopter(&manifest.content, "Globex");
//! assert_eq!(globex.category, Category::ProductCompany);
//! ```

use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::types::{Adopter, AdoptersContent, Category};

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/site/` to a temp directory and return it.
///
/// Tests get an isolated copy they can mutate without affecting other tests
/// or the source fixtures.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/site");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            std::fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

// =========================================================================
// Entry writers
// =========================================================================

/// Create an empty `adopters/` directory inside `tmp` and return its path.
pub fn adopters_dir(tmp: &TempDir) -> PathBuf {
    let dir = tmp.path().join("adopters");
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

/// Minimal valid entry with the given name, category and raw `size` YAML.
///
/// `size` is inserted verbatim, so `"42"` is a number and `"\"42\""` a string.
pub fn entry_yaml(name: &str, category: &str, size: &str) -> String {
    format!(
        "name: {name}\n\
         logoUrl: https://logos.test/{name}.png\n\
         website: https://{name}.test\n\
         usage: Backend services\n\
         category: {category}\n\
         size: {size}\n"
    )
}

/// Write an entry file into `dir`.
pub fn write_entry(dir: &Path, file_name: &str, contents: &str) {
    std::fs::write(dir.join(file_name), contents).unwrap();
}

// =========================================================================
// Lookups and extractors
// =========================================================================

/// Find an adopter by name. Panics if not found.
pub fn find_adopter<'a>(content: &'a AdoptersContent, name: &str) -> &'a Adopter {
    content
        .adopters
        .iter()
        .find(|a| a.name == name)
        .unwrap_or_else(|| {
            let names = adopter_names(content);
            panic!("adopter '{name}' not found. Available: {names:?}")
        })
}

/// All adopter names in listing order.
pub fn adopter_names(content: &AdoptersContent) -> Vec<&str> {
    content.adopters.iter().map(|a| a.name.as_str()).collect()
}

/// A hand-built adopter for render tests.
pub fn sample_adopter(name: &str, category: Category) -> Adopter {
    Adopter {
        name: name.to_string(),
        logo_url: format!("https://logos.test/{name}.png"),
        website: format!("https://{name}.test"),
        usage: format!("{name} runs its backend on Scala"),
        scala3_adoption_status: None,
        category,
        size: 10.0,
        sources: Vec::new(),
    }
}
