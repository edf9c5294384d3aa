use serde::{Deserialize, Serialize};

/// One course as extracted from a subject page.
///
/// Field order is the serialized key order (`id`, `title`, `description`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseRecord {
    pub id: String,
    pub title: String,
    pub description: String,
}

/// Whether a course block without a description still yields a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DescriptionPolicy {
    #[default]
    Required,
    /// Missing or empty descriptions become `""`.
    Optional,
}
