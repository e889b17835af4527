//! Site configuration module.
//!
//! Handles loading and validating the site's `config.toml`. Every key is
//! optional; the file overrides only the keys it names.
//!
//! ## Config File Location
//!
//! ```text
//! site/
//! ├── config.toml              # Site shell (optional)
//! ├── adopters/
//! └── static/
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! title = "Scala Adoption Tracker"
//! tagline = "Real-world evidence of Scala 3 usage"
//! description = "Crowdsourced list of companies and projects adopting Scala."
//! intro = "A curated look at where Scala shows up in the real world..."
//! base_url = "/"                 # Path prefix the site is served under
//! favicon = "img/favicon.ico"    # Relative to base_url
//! logo = "img/logo.svg"          # Relative to base_url
//! badge_label = "Scala 3"        # Text of the partial/full adoption badge
//! unverified_columns = 4         # Columns of the unverified list
//! assets_dir = "static"          # Copied verbatim to the output root
//!
//! [colors.light]
//! background = "#ffffff"
//! text = "#1c1e21"
//! text_muted = "#606770"
//! border = "#dadde1"
//! link = "#2e8555"
//! link_hover = "#205d3b"
//! accent = "#dc322f"            # Adoption badge
//!
//! [colors.dark]
//! background = "#1b1b1d"
//! text = "#e3e3e3"
//! text_muted = "#9da3ab"
//! border = "#444950"
//! link = "#25c2a0"
//! link_hover = "#4fddbf"
//! accent = "#ff6b68"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Deserializer, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
///
/// All fields have defaults matching the published tracker. User config files
/// need only specify the values they want to override. Unknown keys are
/// rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Site title, shown in the navbar, the page heading and `<title>`.
    pub title: String,
    /// One-line tagline shown under the heading.
    pub tagline: String,
    /// `<meta name="description">` content.
    pub description: String,
    /// Introductory paragraph above the listing.
    pub intro: String,
    /// Path prefix the site is served under, e.g. `/scala-adoption-tracker/`.
    pub base_url: String,
    /// Favicon path relative to `base_url`.
    pub favicon: String,
    /// Navbar logo path relative to `base_url`.
    pub logo: String,
    /// Label of the badge shown for partial and full adopters.
    pub badge_label: String,
    /// Number of columns the unverified list is split into.
    pub unverified_columns: usize,
    /// Directory (relative to the site root) copied to the output root.
    pub assets_dir: String,
    /// Color schemes for light and dark modes.
    pub colors: ColorConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Scala Adoption Tracker".to_string(),
            tagline: "Real-world evidence of Scala 3 usage".to_string(),
            description: "Crowdsourced list of companies and projects adopting Scala.".to_string(),
            intro: "A curated look at where Scala shows up in the real world: product teams, \
                    foundational OSS, and consulting shops. Everything listed here links back \
                    to public proof."
                .to_string(),
            base_url: "/".to_string(),
            favicon: "img/favicon.ico".to_string(),
            logo: "img/logo.svg".to_string(),
            badge_label: "Scala 3".to_string(),
            unverified_columns: 4,
            assets_dir: "static".to_string(),
            colors: ColorConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.title.trim().is_empty() {
            return Err(ConfigError::Validation("title must not be empty".into()));
        }
        if !self.base_url.starts_with('/') || !self.base_url.ends_with('/') {
            return Err(ConfigError::Validation(
                "base_url must start and end with '/'".into(),
            ));
        }
        if self.unverified_columns == 0 {
            return Err(ConfigError::Validation(
                "unverified_columns must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// Resolve a site-relative asset path against `base_url`.
    ///
    /// Absolute URLs (`https://...`) pass through untouched.
    pub fn asset_url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        format!("{}{}", self.base_url, path.trim_start_matches('/'))
    }
}

/// Color configuration for light and dark modes.
///
/// Each scheme table may name only some keys; the rest come from that
/// scheme's own defaults, so `[colors.dark] accent = ".."` keeps the dark
/// background.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorConfig {
    /// Light mode color scheme.
    #[serde(deserialize_with = "light_scheme")]
    pub light: ColorScheme,
    /// Dark mode color scheme, applied via `prefers-color-scheme: dark`.
    #[serde(deserialize_with = "dark_scheme")]
    pub dark: ColorScheme,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            light: ColorScheme::default_light(),
            dark: ColorScheme::default_dark(),
        }
    }
}

/// Individual color scheme (light or dark).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColorScheme {
    pub background: String,
    pub text: String,
    /// Muted/secondary text color (taglines, last-updated line, footer).
    pub text_muted: String,
    pub border: String,
    pub link: String,
    pub link_hover: String,
    /// Adoption badge background.
    pub accent: String,
}

impl ColorScheme {
    pub fn default_light() -> Self {
        Self {
            background: "#ffffff".to_string(),
            text: "#1c1e21".to_string(),
            text_muted: "#606770".to_string(),
            border: "#dadde1".to_string(),
            link: "#2e8555".to_string(),
            link_hover: "#205d3b".to_string(),
            accent: "#dc322f".to_string(),
        }
    }

    pub fn default_dark() -> Self {
        Self {
            background: "#1b1b1d".to_string(),
            text: "#e3e3e3".to_string(),
            text_muted: "#9da3ab".to_string(),
            border: "#444950".to_string(),
            link: "#25c2a0".to_string(),
            link_hover: "#4fddbf".to_string(),
            accent: "#ff6b68".to_string(),
        }
    }
}

/// A color scheme table as written by hand: every key optional.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct SchemeOverrides {
    background: Option<String>,
    text: Option<String>,
    text_muted: Option<String>,
    border: Option<String>,
    link: Option<String>,
    link_hover: Option<String>,
    accent: Option<String>,
}

impl SchemeOverrides {
    fn over(self, base: ColorScheme) -> ColorScheme {
        ColorScheme {
            background: self.background.unwrap_or(base.background),
            text: self.text.unwrap_or(base.text),
            text_muted: self.text_muted.unwrap_or(base.text_muted),
            border: self.border.unwrap_or(base.border),
            link: self.link.unwrap_or(base.link),
            link_hover: self.link_hover.unwrap_or(base.link_hover),
            accent: self.accent.unwrap_or(base.accent),
        }
    }
}

fn light_scheme<'de, D: Deserializer<'de>>(deserializer: D) -> Result<ColorScheme, D::Error> {
    Ok(SchemeOverrides::deserialize(deserializer)?.over(ColorScheme::default_light()))
}

fn dark_scheme<'de, D: Deserializer<'de>>(deserializer: D) -> Result<ColorScheme, D::Error> {
    Ok(SchemeOverrides::deserialize(deserializer)?.over(ColorScheme::default_dark()))
}

// =============================================================================
// Config loading
// =============================================================================

/// Config file name, relative to the site root.
pub const CONFIG_FILE: &str = "config.toml";

/// Parse and validate `config.toml` contents. Keys not named keep their
/// defaults.
pub fn parse_config(content: &str) -> Result<SiteConfig, ConfigError> {
    let config: SiteConfig = toml::from_str(content)?;
    config.validate()?;
    Ok(config)
}

/// Load the site config, falling back to stock defaults when the site has no
/// `config.toml`.
pub fn load_config(site_root: &Path) -> Result<SiteConfig, ConfigError> {
    let path = site_root.join(CONFIG_FILE);
    if !path.exists() {
        return Ok(SiteConfig::default());
    }
    parse_config(&fs::read_to_string(&path)?)
}

/// Returns a fully-commented stock `config.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Adoption Tracker Configuration
# ==============================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys will cause an error.

# Site title: navbar, page heading and <title>.
title = "Scala Adoption Tracker"

# Shown under the page heading.
tagline = "Real-world evidence of Scala 3 usage"

# <meta name="description"> content.
description = "Crowdsourced list of companies and projects adopting Scala."

# Paragraph above the listing.
intro = "A curated look at where Scala shows up in the real world: product teams, foundational OSS, and consulting shops. Everything listed here links back to public proof."

# Path prefix the site is served under. Must start and end with '/'.
# For GitHub pages this is usually "/<project-name>/".
base_url = "/"

# Asset paths, relative to base_url.
favicon = "img/favicon.ico"
logo = "img/logo.svg"

# Label of the badge shown for partial and full adopters.
badge_label = "Scala 3"

# Number of columns the unverified list is split into.
unverified_columns = 4

# Directory (relative to the site root) copied verbatim to the output root.
assets_dir = "static"

# ---------------------------------------------------------------------------
# Colors - Light mode (prefers-color-scheme: light)
# ---------------------------------------------------------------------------
[colors.light]
background = "#ffffff"
text = "#1c1e21"
text_muted = "#606770"    # Tagline, last-updated line, footer
border = "#dadde1"
link = "#2e8555"
link_hover = "#205d3b"
accent = "#dc322f"        # Adoption badge

# ---------------------------------------------------------------------------
# Colors - Dark mode (prefers-color-scheme: dark)
# ---------------------------------------------------------------------------
[colors.dark]
background = "#1b1b1d"
text = "#e3e3e3"
text_muted = "#9da3ab"
border = "#444950"
link = "#25c2a0"
link_hover = "#4fddbf"
accent = "#ff6b68"
"##
}

/// Generate CSS custom properties from color config.
pub fn generate_color_css(colors: &ColorConfig) -> String {
    format!(
        r#":root {{
    --color-bg: {light_bg};
    --color-text: {light_text};
    --color-text-muted: {light_text_muted};
    --color-border: {light_border};
    --color-link: {light_link};
    --color-link-hover: {light_link_hover};
    --color-accent: {light_accent};
}}

@media (prefers-color-scheme: dark) {{
    :root {{
        --color-bg: {dark_bg};
        --color-text: {dark_text};
        --color-text-muted: {dark_text_muted};
        --color-border: {dark_border};
        --color-link: {dark_link};
        --color-link-hover: {dark_link_hover};
        --color-accent: {dark_accent};
    }}
}}"#,
        light_bg = colors.light.background,
        light_text = colors.light.text,
        light_text_muted = colors.light.text_muted,
        light_border = colors.light.border,
        light_link = colors.light.link,
        light_link_hover = colors.light.link_hover,
        light_accent = colors.light.accent,
        dark_bg = colors.dark.background,
        dark_text = colors.dark.text,
        dark_text_muted = colors.dark.text_muted,
        dark_border = colors.dark.border,
        dark_link = colors.dark.link,
        dark_link_hover = colors.dark.link_hover,
        dark_accent = colors.dark.accent,
    )
}
