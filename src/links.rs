use scraper::Html;
use tracing::{info, warn};
use url::Url;

use crate::error::Result;
use crate::fetch::PageFetcher;
use crate::parser::CatalogSchema;

/// Fetch the index page and return absolute subject-page URLs in document order.
///
/// Fetch failure is returned to the caller; the index is the only source of
/// links, so there is nothing to continue with.
pub fn collect_links<F, S>(fetcher: &F, schema: &S, index_url: &Url, base: &Url) -> Result<Vec<Url>>
where
    F: PageFetcher + ?Sized,
    S: CatalogSchema + ?Sized,
{
    info!("Fetching course index: {}", index_url);
    let html = fetcher.fetch(index_url)?;
    let document = Html::parse_document(&html);

    let links = resolve_links(schema.subject_links(&document), base);
    info!("Subject pages found: {}", links.len());
    Ok(links)
}

/// Drop in-page fragment references and resolve the rest against `base`.
/// Duplicates are kept; an empty href resolves to `base` itself.
pub fn resolve_links<I>(hrefs: I, base: &Url) -> Vec<Url>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    hrefs
        .into_iter()
        .filter_map(|href| {
            let href = href.as_ref();
            if href.starts_with('#') {
                return None;
            }
            match base.join(href) {
                Ok(url) => Some(url),
                Err(e) => {
                    warn!(href, error = %e, "Skipping unresolvable link");
                    None
                }
            }
        })
        .collect()
}
