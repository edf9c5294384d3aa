use scraper::ElementRef;

/// Concatenated text of `element` and its descendants, whitespace runs
/// (non-breaking spaces included) collapsed to one space, ends trimmed.
pub fn element_text(element: ElementRef<'_>) -> String {
    normalize_ws(&element.text().collect::<String>())
}

pub fn normalize_ws(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
