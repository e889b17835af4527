//! Shared types used across both pipeline stages.
//!
//! These types are serialized to JSON between stages (load → generate) and
//! must be identical on both sides. Field names are camelCase on the wire
//! (`logoUrl`, `scala3AdoptionStatus`, `lastUpdated`).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// How far an adopter has moved to Scala 3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AdoptionStatus {
    #[serde(rename = "not planned")]
    NotPlanned,
    #[serde(rename = "planned")]
    Planned,
    #[serde(rename = "partial")]
    Partial,
    #[serde(rename = "full")]
    Full,
}

impl AdoptionStatus {
    /// Allow-list in canonical order.
    pub const ALL: [AdoptionStatus; 4] = [
        AdoptionStatus::NotPlanned,
        AdoptionStatus::Planned,
        AdoptionStatus::Partial,
        AdoptionStatus::Full,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            AdoptionStatus::NotPlanned => "not planned",
            AdoptionStatus::Planned => "planned",
            AdoptionStatus::Partial => "partial",
            AdoptionStatus::Full => "full",
        }
    }

    /// Case-insensitive lookup against the allow-list.
    pub fn lookup(value: &str) -> Option<Self> {
        let key = value.to_lowercase();
        Self::ALL.into_iter().find(|s| s.as_str() == key)
    }

    /// Whether the listing shows an adoption badge for this status.
    pub fn has_badge(self) -> bool {
        matches!(self, AdoptionStatus::Partial | AdoptionStatus::Full)
    }
}

/// What kind of organization an adopter is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "product company")]
    ProductCompany,
    #[serde(rename = "OSS project")]
    OssProject,
    #[serde(rename = "consulting company")]
    ConsultingCompany,
}

impl Category {
    /// Allow-list in display order.
    pub const ALL: [Category; 3] = [
        Category::ProductCompany,
        Category::OssProject,
        Category::ConsultingCompany,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::ProductCompany => "product company",
            Category::OssProject => "OSS project",
            Category::ConsultingCompany => "consulting company",
        }
    }

    /// Section heading on the rendered page.
    pub fn heading(self) -> &'static str {
        match self {
            Category::ProductCompany => "Product companies",
            Category::OssProject => "OSS projects",
            Category::ConsultingCompany => "Consulting companies",
        }
    }

    /// Case-insensitive lookup against the allow-list.
    ///
    /// `"OSS Project"`, `"oss project"` and `"OSS project"` all resolve to
    /// [`Category::OssProject`].
    pub fn lookup(value: &str) -> Option<Self> {
        let key = value.to_lowercase();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().to_lowercase() == key)
    }
}

/// A validated adopter record, built from one entry file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Adopter {
    pub name: String,
    pub logo_url: String,
    pub website: String,
    /// Free-text description of how the adopter uses Scala.
    pub usage: String,
    pub scala3_adoption_status: Option<AdoptionStatus>,
    pub category: Category,
    pub size: f64,
    pub sources: Vec<String>,
}

/// The sorted, validated adopter list plus the date it was built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdoptersContent {
    /// Sorted by size descending, then name ascending.
    pub adopters: Vec<Adopter>,
    /// Serialized as `YYYY-MM-DD`.
    pub last_updated: NaiveDate,
}

/// An adopter scraped from secondary sources and not yet verified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UnverifiedAdopter {
    pub name: String,
    pub website: String,
}
