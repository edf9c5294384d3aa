//! Derive the `{id, title}` dataset from a full JSON catalog.

use std::fs;
use std::path::Path;

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::error::{CatalogError, Result};
use crate::export::write_json;

/// Projected course. Values are copied verbatim, whatever their JSON type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilteredCourse {
    pub id: Value,
    pub title: Value,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterSummary {
    pub loaded: usize,
    pub kept: usize,
}

/// Read `path` as a JSON array.
pub fn load_courses(path: &Path) -> Result<Vec<Value>> {
    let text = fs::read_to_string(path).map_err(|source| CatalogError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let value: Value = serde_json::from_str(&text).map_err(|source| CatalogError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    match value {
        Value::Array(items) => Ok(items),
        _ => Err(CatalogError::NotAnArray {
            path: path.to_path_buf(),
        }),
    }
}

/// Keep `id` and `title` of every object that has both; drop everything else.
pub fn project(courses: &[Value]) -> Vec<FilteredCourse> {
    courses
        .iter()
        .filter_map(|course| {
            let obj = course.as_object()?;
            Some(FilteredCourse {
                id: obj.get("id")?.clone(),
                title: obj.get("title")?.clone(),
            })
        })
        .collect()
}

pub fn filter_file(input: &Path, output: &Path) -> Result<FilterSummary> {
    let courses = load_courses(input)?;
    let filtered = project(&courses);
    write_json(output, &filtered)?;

    let summary = FilterSummary {
        loaded: courses.len(),
        kept: filtered.len(),
    };
    if summary.kept < summary.loaded {
        debug!(dropped = summary.loaded - summary.kept, "entries without id or title");
    }
    Ok(summary)
}
