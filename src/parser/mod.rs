pub mod schema;
pub mod text;

use scraper::Html;
use thiserror::Error;

use crate::model::{CourseRecord, DescriptionPolicy};
pub use schema::{BulletinSchema, CatalogSchema};

/// Field texts of one course block; `None` when the element is absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawCourse {
    pub id: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
}

/// A course block lacking a required field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("course block missing {}", .missing.join(", "))]
pub struct IncompleteCourse {
    pub missing: Vec<&'static str>,
}

impl RawCourse {
    /// Validate into a record. A field counts as missing when its element is
    /// absent or its text is empty.
    pub fn into_record(self, policy: DescriptionPolicy) -> Result<CourseRecord, IncompleteCourse> {
        let mut missing = Vec::new();
        let id = required(self.id, "id", &mut missing);
        let title = required(self.title, "title", &mut missing);
        let description = match policy {
            DescriptionPolicy::Required => required(self.description, "description", &mut missing),
            DescriptionPolicy::Optional => self.description.unwrap_or_default(),
        };

        if !missing.is_empty() {
            return Err(IncompleteCourse { missing });
        }
        Ok(CourseRecord {
            id,
            title,
            description,
        })
    }
}

fn required(value: Option<String>, name: &'static str, missing: &mut Vec<&'static str>) -> String {
    match value {
        Some(v) if !v.is_empty() => v,
        _ => {
            missing.push(name);
            String::new()
        }
    }
}

/// Records of one subject page, in block order.
#[derive(Debug, Default)]
pub struct PageCourses {
    pub records: Vec<CourseRecord>,
    pub incomplete: Vec<IncompleteCourse>,
}

pub fn extract_courses<S>(schema: &S, html: &str, policy: DescriptionPolicy) -> PageCourses
where
    S: CatalogSchema + ?Sized,
{
    let document = Html::parse_document(html);
    let mut page = PageCourses::default();

    for raw in schema.course_blocks(&document) {
        match raw.into_record(policy) {
            Ok(record) => page.records.push(record),
            Err(incomplete) => page.incomplete.push(incomplete),
        }
    }
    page
}
