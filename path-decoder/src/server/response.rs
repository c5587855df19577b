use bytes::Bytes;
use chrono::Utc;
use http::header::{HeaderValue, CACHE_CONTROL, CONTENT_LENGTH, CONTENT_TYPE};
use http::{Response, StatusCode};
use http_body_util::Full;
use once_cell::sync::Lazy;
use std::sync::atomic::{AtomicU64, Ordering};

pub type Body = Full<Bytes>;

pub const TEXT_PLAIN: &str = "text/plain; charset=utf-8";

static REQ_COUNTER: Lazy<AtomicU64> = Lazy::new(|| AtomicU64::new(1));

/// Low-overhead request id: timestamp(ms) + monotonic counter.
pub fn gen_request_id() -> String {
    let n = REQ_COUNTER.fetch_add(1, Ordering::Relaxed);
    let ts = Utc::now().timestamp_millis();
    format!("req-{}-{:x}", ts, n)
}

pub fn text(status: StatusCode, body: impl Into<Bytes>, request_id: &str) -> Response<Body> {
    with_content_type(status, TEXT_PLAIN, body, request_id)
}

pub fn with_content_type(
    status: StatusCode,
    content_type: &'static str,
    body: impl Into<Bytes>,
    request_id: &str,
) -> Response<Body> {
    let body: Bytes = body.into();
    let len = body.len();

    let mut resp = Response::new(Full::new(body));
    *resp.status_mut() = status;

    let headers = resp.headers_mut();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static(content_type));
    headers.insert(CONTENT_LENGTH, HeaderValue::from(len));
    headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-store"));
    if let Ok(v) = HeaderValue::from_str(request_id) {
        headers.insert("x-request-id", v);
    }

    resp
}
