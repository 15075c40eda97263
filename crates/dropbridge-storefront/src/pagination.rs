//! Cursor pagination via the storefront's `Link` response header.
//!
//! Each page's response carries the adjacent-page URLs in a `Link` header;
//! the cursor is the `page_info` query parameter of the `rel="next"` entry:
//!
//! ```text
//! <https://shop.example.com/admin/api/2024-10/products.json?limit=250&page_info=PREV>; rel="previous",
//! <https://shop.example.com/admin/api/2024-10/products.json?limit=250&page_info=NEXT>; rel="next"
//! ```

/// Extracts the next-page cursor from a `Link` header value.
///
/// Returns `None` when the header is absent, carries no `rel="next"` entry
/// (last page), or the next URL has no `page_info` parameter.
#[must_use]
pub fn next_page_cursor(link_header: Option<&str>) -> Option<String> {
    for segment in link_header?.split(',') {
        let segment = segment.trim();
        if !segment.contains(r#"rel="next""#) {
            continue;
        }
        let url = segment.get(segment.find('<')? + 1..segment.find('>')?)?;
        let query = url.split_once('?')?.1;
        return query
            .split('&')
            .find_map(|pair| pair.strip_prefix("page_info="))
            .map(|cursor| cursor.split('#').next().unwrap_or(cursor))
            .filter(|cursor| !cursor.is_empty())
            .map(str::to_owned);
    }
    None
}
