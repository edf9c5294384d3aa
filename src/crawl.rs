use indicatif::{ProgressBar, ProgressStyle};
use tracing::{error, info, warn};
use url::Url;

use crate::error::CatalogError;
use crate::fetch::PageFetcher;
use crate::links::collect_links;
use crate::model::{CourseRecord, DescriptionPolicy};
use crate::parser::{extract_courses, CatalogSchema};

/// A subject page that could not be fetched.
#[derive(Debug)]
pub struct PageFailure {
    pub url: Url,
    pub error: CatalogError,
}

/// A course block dropped for lacking required fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedBlock {
    pub page: Url,
    pub missing: Vec<&'static str>,
}

/// Everything a run produced. `catalog` is in link order, then block order.
#[derive(Debug, Default)]
pub struct CrawlReport {
    pub catalog: Vec<CourseRecord>,
    pub pages_total: usize,
    pub failed: Vec<PageFailure>,
    pub skipped: Vec<SkippedBlock>,
    /// Set when the index page itself could not be fetched.
    pub index_error: Option<CatalogError>,
}

impl CrawlReport {
    pub fn summary(&self) -> String {
        format!(
            "{} pages ({} failed), {} courses, {} blocks skipped",
            self.pages_total,
            self.failed.len(),
            self.catalog.len(),
            self.skipped.len()
        )
    }
}

/// Collect subject links from the index, then extract every subject page.
/// An index failure is logged and yields an empty report.
pub fn crawl<F, S>(
    fetcher: &F,
    schema: &S,
    index_url: &Url,
    base: &Url,
    policy: DescriptionPolicy,
) -> CrawlReport
where
    F: PageFetcher + ?Sized,
    S: CatalogSchema + ?Sized,
{
    match collect_links(fetcher, schema, index_url, base) {
        Ok(links) => extract_catalog(fetcher, schema, &links, policy),
        Err(e) => {
            error!("Error fetching the main URL: {}", e);
            CrawlReport {
                index_error: Some(e),
                ..CrawlReport::default()
            }
        }
    }
}

/// Fetch and extract each page in turn. A failed page is recorded and skipped.
pub fn extract_catalog<F, S>(
    fetcher: &F,
    schema: &S,
    links: &[Url],
    policy: DescriptionPolicy,
) -> CrawlReport
where
    F: PageFetcher + ?Sized,
    S: CatalogSchema + ?Sized,
{
    let pb = progress_bar(links.len());
    let mut report = CrawlReport {
        pages_total: links.len(),
        ..CrawlReport::default()
    };

    for url in links {
        pb.set_message(url.path().to_string());

        let html = match fetcher.fetch(url) {
            Ok(html) => html,
            Err(e) => {
                if e.is_network() {
                    pb.suspend(|| warn!("Error fetching {}: {}", url, e));
                } else {
                    pb.suspend(|| warn!("Skipping {}: {}", url, e));
                }
                report.failed.push(PageFailure {
                    url: url.clone(),
                    error: e,
                });
                pb.inc(1);
                continue;
            }
        };

        let page = extract_courses(schema, &html, policy);
        for incomplete in page.incomplete {
            pb.suspend(|| warn!("  -> Could not find all details for a course on {} ({})", url, incomplete));
            report.skipped.push(SkippedBlock {
                page: url.clone(),
                missing: incomplete.missing,
            });
        }
        report.catalog.extend(page.records);
        pb.inc(1);
    }

    pb.finish_and_clear();
    info!("Extracted {}", report.summary());
    report
}

fn progress_bar(len: usize) -> ProgressBar {
    let pb = ProgressBar::new(len as u64);
    if let Ok(style) = ProgressStyle::default_bar()
        .template("[{elapsed_precise}] {bar:40} {pos}/{len} ({per_sec}, eta {eta}) {msg}")
    {
        pb.set_style(style.progress_chars("=> "));
    }
    pb
}
