//! Site structure of the course bulletin.
//!
//! Everything that knows a class name or nesting lives here; traversal code
//! only sees hrefs and raw field triples.

use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

use super::text::element_text;
use super::RawCourse;

/// Maps a parsed page onto subject links and course field triples.
pub trait CatalogSchema {
    /// `href` values of the index page's subject anchors, in document order.
    /// Anchors without an `href` are not reported.
    fn subject_links(&self, index: &Html) -> Vec<String>;

    /// One entry per course block, in document order.
    fn course_blocks(&self, page: &Html) -> Vec<RawCourse>;
}

static SITEMAP_LINK: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div.az_sitemap ul li a").unwrap());
static COURSE_BLOCK: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div.courseblock").unwrap());
static COURSE_CODE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("span.detail-code strong").unwrap());
static COURSE_TITLE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("span.detail-title strong").unwrap());
static COURSE_DESC: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div.courseblockextra").unwrap());

/// CourseLeaf layout used by bulletins.nyu.edu.
#[derive(Debug, Clone, Copy, Default)]
pub struct BulletinSchema;

impl CatalogSchema for BulletinSchema {
    fn subject_links(&self, index: &Html) -> Vec<String> {
        index
            .select(&SITEMAP_LINK)
            .filter_map(|a| a.value().attr("href"))
            .map(str::to_string)
            .collect()
    }

    fn course_blocks(&self, page: &Html) -> Vec<RawCourse> {
        page.select(&COURSE_BLOCK)
            .map(|block| RawCourse {
                id: first_text(block, &COURSE_CODE),
                title: first_text(block, &COURSE_TITLE),
                description: first_text(block, &COURSE_DESC),
            })
            .collect()
    }
}

fn first_text(block: ElementRef<'_>, selector: &Selector) -> Option<String> {
    block.select(selector).next().map(element_text)
}
