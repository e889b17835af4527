//! # Adoption Tracker
//!
//! A static site generator for a curated list of companies and projects that
//! use Scala. Each adopter is one human-edited YAML file; the build validates
//! every file, sorts the adopters, and renders a single listing page grouped
//! by category.
//!
//! # Architecture: Two-Stage Pipeline
//!
//! ```text
//! 1. Load      site/adopters/*.yaml  →  adopters.json   (validated build data)
//! 2. Generate  adopters.json         →  build/          (final HTML site)
//! ```
//!
//! The `build` command runs both stages in one process and passes the loaded
//! [`load::Manifest`] straight to the renderer; the JSON file is there so each
//! stage can be run and inspected on its own.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`load`] | Stage 1: reads the site directory, validates entries, sorts adopters |
//! | [`validate`] | Per-field narrowing of untyped YAML into typed values |
//! | [`render`] | Stage 2: renders the listing page with Maud |
//! | [`config`] | `config.toml` loading, validation, merging, and CSS generation |
//! | [`types`] | Shared types serialized between stages (`Adopter`, `AdoptersContent`) |
//! | [`output`] | CLI output formatting for both stages |
//!
//! # Design Decisions
//!
//! ## Fail the Build, Never the Listing
//!
//! Every validation error aborts the build. There is no best-effort mode that
//! skips bad files: a public listing with a wrong or missing entry is worse
//! than a red CI run. Errors name the file and the field so a content author
//! can fix them without reading code.
//!
//! ## Untyped Parse, Typed Narrowing
//!
//! Entry files are parsed into a generic YAML value and each field is narrowed
//! by a small function in [`validate`]. That keeps the lenient parts of the
//! format (a `size` given as `"42"`, a single source given as a bare string,
//! a blank adoption status) explicit instead of hidden in deserializer
//! attributes.
//!
//! ## Maud Over Template Engines
//!
//! HTML is generated with [Maud](https://maud.lambda.xyz/): templates are
//! checked at compile time, interpolation is escaped by default, and there is
//! no template directory to ship.

pub mod config;
pub mod load;
pub mod output;
pub mod render;
pub mod types;
pub mod validate;

#[cfg(test)]
pub(crate) mod test_helpers;
