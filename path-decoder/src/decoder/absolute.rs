use std::borrow::Cow;

use super::origin::normalize_origin_form;

/// Path of an absolute-form target, `scheme://host[:port]/path?query`
/// (RFC 7230 §5.3.2). Uncommon outside of forward proxies.
///
/// Malformed or path-less targets resolve to `/` rather than an error.
pub fn path_from_absolute_form(target: &str) -> Cow<'_, str> {
    let Some(sep) = target.find("://") else {
        return Cow::Borrowed("/");
    };
    let offset = sep + 3;
    let rest = &target[offset..];

    let path = rest.find('/').map(|i| i + offset);
    let query = rest.find('?').map(|i| i + offset);

    match (path, query) {
        // http://host, http://host?query
        (None, _) => Cow::Borrowed("/"),
        (Some(p), None) => normalize_origin_form(&target[p..]),
        // http://host?query/ : the slash belongs to the query
        (Some(p), Some(q)) if q < p => Cow::Borrowed("/"),
        (Some(p), Some(q)) => normalize_origin_form(&target[p..q]),
    }
}
