use std::collections::HashMap;
use std::fs;

use nyu_courses::crawl::crawl;
use nyu_courses::export::{save_catalog, Saved};
use nyu_courses::fetch::PageFetcher;
use nyu_courses::filter::filter_file;
use nyu_courses::parser::BulletinSchema;
use nyu_courses::settings::OutputFormat;
use nyu_courses::{CatalogError, CourseRecord, DescriptionPolicy};
use serde_json::{json, Value};
use url::Url;

struct Site(HashMap<String, String>);

impl PageFetcher for Site {
    fn fetch(&self, url: &Url) -> Result<String, CatalogError> {
        self.0.get(url.as_str()).cloned().ok_or_else(|| CatalogError::Status {
            url: url.to_string(),
            status: 500,
        })
    }
}

fn fixture(name: &str) -> String {
    fs::read_to_string(format!("tests/fixtures/{}.html", name)).unwrap()
}

fn block(id: &str, title: &str, desc: &str) -> String {
    format!(
        r#"<div class="courseblock"><span class="detail-code"><strong>{id}</strong></span><span class="detail-title"><strong>{title}</strong></span><div class="courseblockextra">{desc}</div></div>"#
    )
}

// anth_ua is linked from the index but not served.
fn site() -> Site {
    let mut pages = HashMap::new();
    pages.insert("https://bulletins.nyu.edu/courses/".to_string(), fixture("index"));
    pages.insert(
        "https://bulletins.nyu.edu/courses/acct_gb/".to_string(),
        block("ACCT-GB 2103", "Financial Accounting", "Ledgers."),
    );
    pages.insert("https://bulletins.nyu.edu/courses/cs_uy/".to_string(), fixture("cs_uy"));
    pages.insert(
        "https://bulletins.nyu.edu/courses/csci_ua/".to_string(),
        block("CSCI-UA 101", "Intro to CS", "Début."),
    );
    Site(pages)
}

fn run() -> nyu_courses::crawl::CrawlReport {
    crawl(
        &site(),
        &BulletinSchema,
        &Url::parse("https://bulletins.nyu.edu/courses/").unwrap(),
        &Url::parse("https://bulletins.nyu.edu/").unwrap(),
        DescriptionPolicy::Required,
    )
}

#[test]
fn crawl_orders_by_link_then_block() {
    let report = run();
    let ids: Vec<&str> = report.catalog.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(
        ids,
        vec!["ACCT-GB 2103", "CS-UY 1114", "CS-UY 1134", "CS-UY 3224", "CSCI-UA 101"]
    );
    assert_eq!(report.pages_total, 4);
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].url.as_str(), "https://bulletins.nyu.edu/courses/anth_ua/");
    assert_eq!(report.skipped.len(), 2);
    assert!(report
        .skipped
        .iter()
        .all(|s| s.page.as_str() == "https://bulletins.nyu.edu/courses/cs_uy/"));
}

#[test]
fn json_then_filter_projects_every_record() {
    let dir = tempfile::tempdir().unwrap();
    let full = dir.path().join("nyu_courses.json");
    let slim = dir.path().join("nyu_courses_no_description.json");

    let report = run();
    let saved = save_catalog(&report.catalog, &full, OutputFormat::Json).unwrap();
    assert_eq!(saved, Saved::Written { path: full.clone(), count: 5 });

    let back: Vec<CourseRecord> = serde_json::from_str(&fs::read_to_string(&full).unwrap()).unwrap();
    assert_eq!(back, report.catalog);

    let summary = filter_file(&full, &slim).unwrap();
    assert_eq!(summary.loaded, 5);
    assert_eq!(summary.kept, 5);

    let filtered: Vec<Value> = serde_json::from_str(&fs::read_to_string(&slim).unwrap()).unwrap();
    let expected: Vec<Value> = report
        .catalog
        .iter()
        .map(|r| json!({"id": r.id, "title": r.title}))
        .collect();
    assert_eq!(filtered, expected);
    assert!(!fs::read_to_string(&slim).unwrap().contains("description"));
}

#[test]
fn csv_output_has_header_and_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nyu_courses.csv");

    save_catalog(&run().catalog, &path, OutputFormat::Csv).unwrap();
    let text = fs::read_to_string(&path).unwrap();
    let mut lines = text.lines();
    assert_eq!(lines.next(), Some("id,title,description"));
    assert_eq!(lines.next(), Some("ACCT-GB 2103,Financial Accounting,Ledgers."));
    assert!(text.contains("CSCI-UA 101,Intro to CS,Début."));
    assert!(text.contains(
        "CS-UY 1114,Intro to Programming & Problem Solving,This course introduces problem solving and computer programming.\n"
    ));
}

#[test]
fn empty_index_writes_no_file() {
    let mut pages = HashMap::new();
    pages.insert(
        "https://bulletins.nyu.edu/courses/".to_string(),
        r##"<div class="az_sitemap"><ul><li><a href="#Z">Z</a></li></ul></div>"##.to_string(),
    );
    let report = crawl(
        &Site(pages),
        &BulletinSchema,
        &Url::parse("https://bulletins.nyu.edu/courses/").unwrap(),
        &Url::parse("https://bulletins.nyu.edu/").unwrap(),
        DescriptionPolicy::Required,
    );

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nyu_courses.json");
    assert_eq!(save_catalog(&report.catalog, &path, OutputFormat::Json).unwrap(), Saved::Empty);
    assert!(!path.exists());
}
