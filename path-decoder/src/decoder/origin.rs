use std::borrow::Cow;

use super::dot_segments::remove_dot_segments;
use super::percent::decode_in_place;

/// Normalize an origin-form target (`/path?query`, RFC 7230 §5.3.1).
///
/// `input` must start with '/'. The input is handed back borrowed when nothing
/// needed rewriting, which is by far the common case.
pub fn normalize_origin_form(input: &str) -> Cow<'_, str> {
    // extremely common
    if input == "/" {
        return Cow::Borrowed(input);
    }

    let query = input.find('?');
    if query.is_none() && !input.contains(['.', '%']) && !input.contains("//") {
        return Cow::Borrowed(input);
    }

    let mut path = input.as_bytes().to_vec();
    let mut modified = false;

    if let Some(q) = query {
        modified = true;
        path.truncate(q);
    }

    let n = decode_in_place(&mut path);
    if n < path.len() {
        modified = true;
        path.truncate(n);
    }

    let n = remove_dot_segments(&mut path);
    if n < path.len() {
        modified = true;
        path.truncate(n);
    }

    if !modified {
        return Cow::Borrowed(input);
    }

    // only ASCII bytes are ever written or cut on, so this is the input's own UTF-8
    Cow::Owned(String::from_utf8_lossy(&path).into_owned())
}
