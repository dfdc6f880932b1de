//! Pagination headers
//!
//! `X-Total-Count` carries the total number of rows and `Link` (RFC 5988)
//! carries `next`, `prev`, `last` and `first` URIs. Each link keeps the
//! request's other query parameters and replaces `page` and `size`.

use axum::http::{header, HeaderMap, HeaderName, HeaderValue, Uri};
use url::form_urlencoded;

use crate::domain::Page;

pub const TOTAL_COUNT_HEADER: HeaderName = HeaderName::from_static("x-total-count");

/// Headers describing `page` as a slice of the listing at `uri`.
pub fn pagination_headers<T>(uri: &Uri, page: &Page<T>) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(TOTAL_COUNT_HEADER, HeaderValue::from(page.total_elements));

    if let Ok(v) = HeaderValue::from_str(&link_header(uri, page)) {
        headers.insert(header::LINK, v);
    }
    headers
}

fn link_header<T>(uri: &Uri, page: &Page<T>) -> String {
    let number = u64::from(page.number);
    let last = page.total_pages().saturating_sub(1);

    let mut links = Vec::with_capacity(4);
    if page.has_next() {
        links.push(link(uri, number + 1, page.size, "next"));
    }
    if page.has_previous() {
        links.push(link(uri, number - 1, page.size, "prev"));
    }
    links.push(link(uri, last, page.size, "last"));
    links.push(link(uri, 0, page.size, "first"));

    links.join(",")
}

fn link(uri: &Uri, page: u64, size: u32, rel: &str) -> String {
    format!("<{}?{}>; rel=\"{}\"", uri.path(), page_query(uri.query(), page, size), rel)
}

/// Re-encode `query` with `page` and `size` replaced, keeping the position
/// of existing parameters and appending missing ones.
fn page_query(query: Option<&str>, page: u64, size: u32) -> String {
    let page = page.to_string();
    let size = size.to_string();

    let mut pairs: Vec<(String, String)> = Vec::new();
    let (mut saw_page, mut saw_size) = (false, false);
    for (key, value) in form_urlencoded::parse(query.unwrap_or_default().as_bytes()) {
        match key.as_ref() {
            "page" if saw_page => continue,
            "size" if saw_size => continue,
            "page" => {
                saw_page = true;
                pairs.push((key.into_owned(), page.clone()));
            }
            "size" => {
                saw_size = true;
                pairs.push((key.into_owned(), size.clone()));
            }
            _ => pairs.push((key.into_owned(), value.into_owned())),
        }
    }
    if !saw_page {
        pairs.push(("page".into(), page));
    }
    if !saw_size {
        pairs.push(("size".into(), size));
    }

    form_urlencoded::Serializer::new(String::new())
        .extend_pairs(pairs)
        .finish()
}
