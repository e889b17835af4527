//! HTML site generation.
//!
//! Stage 2 of the build pipeline. Takes the build data produced by
//! [`load`](crate::load) and renders the static listing page.
//!
//! ## Generated Page
//!
//! A single `index.html` with:
//!
//! - **Navbar**: site logo and title
//! - **Category sections**: product companies, OSS projects, consulting
//!   companies, in that order. Empty categories are skipped.
//! - **Adopter cards**: name linking to the website, logo, usage text, an
//!   adoption badge for partial/full adopters, and an expandable source list
//! - **Unverified list**: after the product company section, the unverified
//!   adopters split into columns inside a `<details>` element
//! - **Footer**: last-refreshed date and copyright line
//!
//! ## Output Structure
//!
//! ```text
//! build/
//! ├── index.html       # Listing page, CSS inlined
//! └── img/             # Copied from the site's assets directory
//!     ├── favicon.ico
//!     └── logo.svg
//! ```
//!
//! ## HTML Generation
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating.
//! All interpolation is auto-escaped; entry text never reaches the page raw.

use crate::config::{self, SiteConfig};
use crate::load::Manifest;
use crate::types::{Adopter, AdoptersContent, AdoptionStatus, Category, UnverifiedAdopter};
use chrono::Datelike;
use maud::{DOCTYPE, Markup, html};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

const CSS_STATIC: &str = include_str!("../static/style.css");

/// Render the site from a manifest written by the load stage.
///
/// Returns the manifest so callers can report on what was generated.
pub fn generate(
    manifest_path: &Path,
    site_root: &Path,
    output_dir: &Path,
) -> Result<Manifest, GenerateError> {
    let manifest_content = fs::read_to_string(manifest_path)?;
    let manifest: Manifest = serde_json::from_str(&manifest_content)?;
    write_site(&manifest, site_root, output_dir)?;
    Ok(manifest)
}

/// Write `index.html` and the site assets into `output_dir`.
pub fn write_site(
    manifest: &Manifest,
    site_root: &Path,
    output_dir: &Path,
) -> Result<(), GenerateError> {
    let color_css = config::generate_color_css(&manifest.config.colors);
    let css = format!("{}\n\n{}", color_css, CSS_STATIC);

    fs::create_dir_all(output_dir)?;

    let assets = site_root.join(&manifest.config.assets_dir);
    if assets.is_dir() {
        copy_dir_recursive(&assets, output_dir)?;
    }

    let index_html = render_index(
        &manifest.content,
        &manifest.unverified,
        &manifest.config,
        &css,
    );
    fs::write(output_dir.join("index.html"), index_html.into_string())?;
    Ok(())
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

// ============================================================================
// Grouping and layout helpers
// ============================================================================

/// Group adopters into the fixed category order, dropping empty categories.
///
/// Order within a category is the input order.
pub fn group_by_category(adopters: &[Adopter]) -> Vec<(Category, Vec<&Adopter>)> {
    Category::ALL
        .into_iter()
        .map(|category| {
            let group: Vec<&Adopter> = adopters.iter().filter(|a| a.category == category).collect();
            (category, group)
        })
        .filter(|(_, group)| !group.is_empty())
        .collect()
}

/// Split `items` into exactly `columns` slices of `ceil(len / columns)` items.
///
/// Trailing columns may be shorter or empty: 9 items in 4 columns are
/// `[3, 3, 3, 0]`.
pub fn chunk<T>(items: &[T], columns: usize) -> Vec<&[T]> {
    let size = items.len().div_ceil(columns.max(1));
    (0..columns)
        .map(|i| {
            let start = (i * size).min(items.len());
            let end = (start + size).min(items.len());
            &items[start..end]
        })
        .collect()
}

#[derive(Debug, PartialEq)]
enum Segment<'a> {
    Text(&'a str),
    Link(&'a str),
}

const URL_PREFIXES: &[&str] = &["https://", "http://", "www."];

/// Split free text into plain runs and URL tokens.
///
/// A URL is a whitespace-delimited token starting with one of
/// [`URL_PREFIXES`]; trailing sentence punctuation stays in the text.
fn split_links(text: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut plain_start = 0;
    let mut offset = 0;

    for piece in text.split_inclusive(char::is_whitespace) {
        let word = piece.trim_end_matches(char::is_whitespace);
        let url = trim_url(word);
        let is_url = URL_PREFIXES
            .iter()
            .any(|p| url.len() > p.len() && url.starts_with(p));
        if is_url {
            if plain_start < offset {
                segments.push(Segment::Text(&text[plain_start..offset]));
            }
            segments.push(Segment::Link(url));
            plain_start = offset + url.len();
        }
        offset += piece.len();
    }

    if plain_start < text.len() {
        segments.push(Segment::Text(&text[plain_start..]));
    }
    segments
}

/// Strip trailing sentence punctuation from a URL token. A closing paren is
/// only stripped when it has no opening partner inside the token, so
/// `https://en.wikipedia.org/wiki/Scala_(programming_language)` stays whole.
fn trim_url(word: &str) -> &str {
    let mut url = word;
    loop {
        let trimmed = url.trim_end_matches(['.', ',', ';', ':', '!', '?']);
        let trimmed = match trimmed.strip_suffix(')') {
            Some(inner) if trimmed.matches(')').count() > trimmed.matches('(').count() => inner,
            _ => trimmed,
        };
        if trimmed.len() == url.len() {
            return url;
        }
        url = trimmed;
    }
}

fn link_href(url: &str) -> String {
    if url.starts_with("www.") {
        format!("https://{url}")
    } else {
        url.to_string()
    }
}

// ============================================================================
// HTML Components
// ============================================================================

/// Renders the base HTML document structure
fn base_document(config: &SiteConfig, css: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                meta name="description" content=(config.description);
                title { (config.title) }
                link rel="icon" href=(config.asset_url(&config.favicon));
                style { (css) }
            }
            body {
                (content)
            }
        }
    }
}

/// Renders the top navbar with logo and title
fn navbar(config: &SiteConfig) -> Markup {
    html! {
        nav.navbar {
            a.navbar-brand href=(config.base_url) {
                img.navbar-logo src=(config.asset_url(&config.logo)) alt=(config.title);
                span.navbar-title { (config.title) }
            }
        }
    }
}

/// Renders free text with URLs turned into links
pub fn linkify(text: &str) -> Markup {
    html! {
        @for segment in split_links(text) {
            @match segment {
                Segment::Text(t) => { (t) },
                Segment::Link(url) => {
                    a href=(link_href(url)) target="_blank" rel="noreferrer" { (url) }
                },
            }
        }
    }
}

/// Renders the adoption badge; nothing unless the status is partial or full
pub fn adoption_badge(status: Option<AdoptionStatus>, label: &str) -> Markup {
    html! {
        @if let Some(status) = status.filter(|s| s.has_badge()) {
            span.adoption-badge title=(status.as_str()) { (label) }
        }
    }
}

/// Renders the expandable list of sources; nothing when there are none
pub fn source_list(sources: &[String]) -> Markup {
    html! {
        @if !sources.is_empty() {
            details.adopter-sources {
                summary { "Sources" }
                ul {
                    @for source in sources {
                        li { (linkify(source)) }
                    }
                }
            }
        }
    }
}

/// Renders one adopter card
pub fn render_adopter_card(adopter: &Adopter, badge_label: &str) -> Markup {
    html! {
        article.adopter-card {
            div.adopter-card__header {
                h3 {
                    a.adopter-link href=(adopter.website) target="_blank" rel="noreferrer" {
                        (adopter.name)
                    }
                }
                img.adopter-logo src=(adopter.logo_url) alt={ (adopter.name) " logo" } loading="lazy";
            }
            p.adopter-usage { (adopter.usage) }
            (adoption_badge(adopter.scala3_adoption_status, badge_label))
            (source_list(&adopter.sources))
        }
    }
}

/// Renders the unverified block: count heading plus a columned link list
pub fn render_unverified(unverified: &[UnverifiedAdopter], columns: usize) -> Markup {
    html! {
        @if !unverified.is_empty() {
            div.unverified {
                h3 { "And possibly " (unverified.len()) " more!" }
                p {
                    "List below has been scraped from various sources but the entries have not been verified."
                }
                details.adopter-unverified {
                    summary { "Expand" }
                    div.adopters-grid {
                        @for column in chunk(unverified, columns) {
                            ul.unverified-column {
                                @for entry in column {
                                    li {
                                        a href=(entry.website) target="_blank" rel="noreferrer" {
                                            (entry.name)
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

// ============================================================================
// Page Renderers
// ============================================================================

/// Renders the listing page
pub fn render_index(
    content: &AdoptersContent,
    unverified: &[UnverifiedAdopter],
    config: &SiteConfig,
    css: &str,
) -> Markup {
    let page = html! {
        (navbar(config))
        main.container {
            header.page-header {
                h1 { (config.title) }
                p.tagline { (config.tagline) }
                p.intro { (config.intro) }
            }

            @for (category, group) in group_by_category(&content.adopters) {
                section.category-section id=(category_anchor(category)) {
                    h2 { (category.heading()) }
                    div.adopters-grid {
                        @for adopter in group {
                            (render_adopter_card(adopter, &config.badge_label))
                        }
                    }
                    hr;
                    @if category == Category::ProductCompany {
                        (render_unverified(unverified, config.unverified_columns))
                    }
                }
            }

            p.last-updated { "Data last refreshed on " (content.last_updated) "." }
        }
        footer.site-footer {
            "CC-BY-SA " (content.last_updated.year()) " " (config.title)
        }
    };

    base_document(config, css, page)
}

fn category_anchor(category: Category) -> String {
    category.as_str().to_lowercase().replace(' ', "-")
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;
    use chrono::NaiveDate;

    fn content(adopters: Vec<Adopter>) -> AdoptersContent {
        AdoptersContent {
            adopters,
            last_updated: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
        }
    }

    fn unverified(n: usize) -> Vec<UnverifiedAdopter> {
        (0..n)
            .map(|i| UnverifiedAdopter {
                name: format!("Unverified {i}"),
                website: format!("https://u{i}.test"),
            })
            .collect()
    }

    // =========================================================================
    // chunk
    // =========================================================================

    #[test]
    fn chunk_always_returns_requested_columns() {
        let items: Vec<u32> = (0..9).collect();
        let cols = chunk(&items, 4);
        let lens: Vec<usize> = cols.iter().map(|c| c.len()).collect();
        assert_eq!(lens, vec![3, 3, 3, 0]);
    }

    #[test]
    fn chunk_even_split() {
        let items: Vec<u32> = (0..8).collect();
        let cols = chunk(&items, 4);
        assert_eq!(cols[0], &[0, 1]);
        assert_eq!(cols[3], &[6, 7]);
    }

    #[test]
    fn chunk_fewer_items_than_columns() {
        let items = vec!["a", "b"];
        let lens: Vec<usize> = chunk(&items, 4).iter().map(|c| c.len()).collect();
        assert_eq!(lens, vec![1, 1, 0, 0]);
    }

    #[test]
    fn chunk_empty_input() {
        let items: Vec<u32> = vec![];
        let cols = chunk(&items, 4);
        assert_eq!(cols.len(), 4);
        assert!(cols.iter().all(|c| c.is_empty()));
    }

    // =========================================================================
    // group_by_category
    // =========================================================================

    #[test]
    fn groups_in_display_order_and_skip_empty() {
        let adopters = vec![
            sample_adopter("Consult", Category::ConsultingCompany),
            sample_adopter("Product", Category::ProductCompany),
        ];
        let groups = group_by_category(&adopters);
        let categories: Vec<Category> = groups.iter().map(|(c, _)| *c).collect();
        assert_eq!(
            categories,
            vec![Category::ProductCompany, Category::ConsultingCompany]
        );
    }

    #[test]
    fn groups_preserve_input_order() {
        let adopters = vec![
            sample_adopter("Big", Category::OssProject),
            sample_adopter("Small", Category::OssProject),
        ];
        let groups = group_by_category(&adopters);
        let names: Vec<&str> = groups[0].1.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["Big", "Small"]);
    }

    // =========================================================================
    // linkify
    // =========================================================================

    #[test]
    fn split_links_bare_url() {
        assert_eq!(
            split_links("https://x.test/a"),
            vec![Segment::Link("https://x.test/a")]
        );
    }

    #[test]
    fn split_links_in_sentence() {
        assert_eq!(
            split_links("Talk: https://x.test/talk, recorded."),
            vec![
                Segment::Text("Talk: "),
                Segment::Link("https://x.test/talk"),
                Segment::Text(", recorded."),
            ]
        );
    }

    #[test]
    fn split_links_keeps_balanced_parens() {
        assert_eq!(
            split_links("See https://en.wikipedia.org/wiki/Scala_(programming_language)."),
            vec![
                Segment::Text("See "),
                Segment::Link("https://en.wikipedia.org/wiki/Scala_(programming_language)"),
                Segment::Text("."),
            ]
        );
    }

    #[test]
    fn split_links_drops_unmatched_closing_paren() {
        assert_eq!(
            split_links("(blog: https://x.test/post)"),
            vec![
                Segment::Text("(blog: "),
                Segment::Link("https://x.test/post"),
                Segment::Text(")"),
            ]
        );
    }

    #[test]
    fn split_links_plain_text() {
        assert_eq!(
            split_links("Mentioned in a podcast"),
            vec![Segment::Text("Mentioned in a podcast")]
        );
    }

    #[test]
    fn linkify_www_gets_scheme() {
        let html = linkify("see www.acme.test").into_string();
        assert!(html.contains(r#"href="https://www.acme.test""#));
        assert!(html.starts_with("see "));
    }

    #[test]
    fn linkify_escapes_text() {
        let html = linkify("<b>bold</b> https://x.test").into_string();
        assert!(html.contains("&lt;b&gt;"));
        assert!(html.contains(r#"<a href="https://x.test""#));
    }

    // =========================================================================
    // Cards
    // =========================================================================

    #[test]
    fn card_links_name_to_website() {
        let adopter = sample_adopter("Acme", Category::ProductCompany);
        let html = render_adopter_card(&adopter, "Scala 3").into_string();
        assert!(html.contains(r#"href="https://Acme.test""#));
        assert!(html.contains(r#"rel="noreferrer""#));
        assert!(html.contains(r#"alt="Acme logo""#));
        assert!(html.contains("Acme runs its backend on Scala"));
    }

    #[test]
    fn badge_shown_for_partial_and_full_only() {
        for status in AdoptionStatus::ALL {
            let html = adoption_badge(Some(status), "Scala 3").into_string();
            assert_eq!(html.contains("adoption-badge"), status.has_badge());
        }
        assert!(adoption_badge(None, "Scala 3").into_string().is_empty());
    }

    #[test]
    fn badge_title_is_status() {
        let html = adoption_badge(Some(AdoptionStatus::Full), "Scala 3").into_string();
        assert_eq!(
            html,
            r#"<span class="adoption-badge" title="full">Scala 3</span>"#
        );
    }

    #[test]
    fn sources_omitted_when_empty() {
        let adopter = sample_adopter("Acme", Category::ProductCompany);
        let html = render_adopter_card(&adopter, "Scala 3").into_string();
        assert!(!html.contains("adopter-sources"));
    }

    #[test]
    fn sources_rendered_as_links() {
        let mut adopter = sample_adopter("Acme", Category::ProductCompany);
        adopter.sources = vec!["https://acme.test/blog".to_string()];
        let html = render_adopter_card(&adopter, "Scala 3").into_string();
        assert!(html.contains("<details class=\"adopter-sources\">"));
        assert!(html.contains(r#"<a href="https://acme.test/blog""#));
    }

    #[test]
    fn card_escapes_entry_text() {
        let mut adopter = sample_adopter("Acme", Category::ProductCompany);
        adopter.usage = "<script>alert('xss')</script>".to_string();
        let html = render_adopter_card(&adopter, "Scala 3").into_string();
        assert!(!html.contains("<script>alert"));
        assert!(html.contains("&lt;script&gt;"));
    }

    // =========================================================================
    // Unverified list
    // =========================================================================

    #[test]
    fn unverified_block_counts_entries() {
        let html = render_unverified(&unverified(9), 4).into_string();
        assert!(html.contains("And possibly 9 more!"));
        assert_eq!(html.matches("unverified-column").count(), 4);
    }

    #[test]
    fn unverified_block_empty_renders_nothing() {
        assert!(render_unverified(&[], 4).into_string().is_empty());
    }

    // =========================================================================
    // Page
    // =========================================================================

    #[test]
    fn index_skips_empty_categories() {
        let adopters = vec![sample_adopter("Lib", Category::OssProject)];
        let html = render_index(&content(adopters), &[], &SiteConfig::default(), "").into_string();
        assert!(html.contains("OSS projects"));
        assert!(!html.contains("Product companies"));
        assert!(!html.contains("Consulting companies"));
    }

    #[test]
    fn index_places_unverified_after_product_companies() {
        let adopters = vec![
            sample_adopter("Prod", Category::ProductCompany),
            sample_adopter("Lib", Category::OssProject),
        ];
        let html = render_index(&content(adopters), &unverified(3), &SiteConfig::default(), "")
            .into_string();

        let product = html.find("Product companies").unwrap();
        let more = html.find("And possibly 3 more!").unwrap();
        let oss = html.find("OSS projects").unwrap();
        assert!(product < more && more < oss);
    }

    #[test]
    fn index_without_product_companies_has_no_unverified_block() {
        let adopters = vec![sample_adopter("Lib", Category::OssProject)];
        let html = render_index(&content(adopters), &unverified(3), &SiteConfig::default(), "")
            .into_string();
        assert!(!html.contains("more!"));
    }

    #[test]
    fn index_shows_last_updated_and_footer() {
        let adopters = vec![sample_adopter("Lib", Category::OssProject)];
        let html = render_index(&content(adopters), &[], &SiteConfig::default(), "").into_string();
        assert!(html.contains("Data last refreshed on 2025-06-01."));
        assert!(html.contains("CC-BY-SA 2025 Scala Adoption Tracker"));
    }

    #[test]
    fn index_uses_base_url_for_assets() {
        let config = SiteConfig {
            base_url: "/scala-adoption-tracker/".to_string(),
            ..SiteConfig::default()
        };
        let adopters = vec![sample_adopter("Lib", Category::OssProject)];
        let html = render_index(&content(adopters), &[], &config, "").into_string();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains(r#"href="/scala-adoption-tracker/img/favicon.ico""#));
        assert!(html.contains(r#"src="/scala-adoption-tracker/img/logo.svg""#));
    }

    #[test]
    fn index_renders_custom_badge_label() {
        let mut adopter = sample_adopter("Lib", Category::OssProject);
        adopter.scala3_adoption_status = Some(AdoptionStatus::Partial);
        let config = SiteConfig {
            badge_label: "Next".to_string(),
            ..SiteConfig::default()
        };
        let html = render_index(&content(vec![adopter]), &[], &config, "").into_string();
        assert!(html.contains(r#"title="partial">Next</span>"#));
    }

    // =========================================================================
    // write_site / generate
    // =========================================================================

    #[test]
    fn generate_writes_index_and_assets() {
        let site = setup_fixtures();
        let manifest = crate::load::load(site.path()).unwrap();
        let temp = tempfile::TempDir::new().unwrap();
        let manifest_path = temp.path().join("adopters.json");
        fs::write(&manifest_path, serde_json::to_string_pretty(&manifest).unwrap()).unwrap();

        let out = temp.path().join("build");
        let rendered = generate(&manifest_path, site.path(), &out).unwrap();

        assert_eq!(rendered.content, manifest.content);
        let index = fs::read_to_string(out.join("index.html")).unwrap();
        assert!(index.contains("Globex"));
        assert!(index.contains("--color-accent: #de3423"));
        assert!(out.join("img/logo.svg").exists());
    }
}
