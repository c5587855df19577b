use std::sync::Arc;

use bytes::Bytes;
use http::{Method, Request, StatusCode};
use http_body_util::BodyExt;
use path_decoder::config::AppConfig;
use path_decoder::server::handler::handle;
use path_decoder::server::service::serve_on;
use path_decoder::server::tap::RawRequestTarget;
use path_decoder::server::AppState;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

async fn call(state: &Arc<AppState>, req: Request<()>) -> (StatusCode, http::HeaderMap, Bytes) {
    let resp = handle(req, Some("127.0.0.1:40000".parse().unwrap()), state.clone())
        .await
        .unwrap();
    let (parts, body) = resp.into_parts();
    let body = body.collect().await.unwrap().to_bytes();
    (parts.status, parts.headers, body)
}

fn get(uri: &str) -> Request<()> {
    Request::builder().uri(uri).body(()).unwrap()
}

/// A request as the service hands it over: with the target from the request line.
fn get_on_wire(target: &str) -> Request<()> {
    let mut req = get(target);
    req.extensions_mut().insert(RawRequestTarget(target.to_string()));
    req
}

/// Send one raw request to a live listener and return the raw response.
async fn exchange(raw_request: &str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(serve_on(listener, Arc::new(AppState::default()), std::future::pending()));

    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream.write_all(raw_request.as_bytes()).await.unwrap();
    let mut out = Vec::new();
    stream.read_to_end(&mut out).await.unwrap();
    String::from_utf8_lossy(&out).into_owned()
}

#[tokio::test]
async fn routes_on_normalized_path() {
    let state = Arc::new(AppState::default());

    let (status, headers, body) = call(&state, get("/a/b/%2E%2E/c%2Fd?x=1")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Bytes::from_static(b"/a/c/d\n"));
    assert!(headers["x-request-id"].to_str().unwrap().starts_with("req-"));
    assert_eq!(headers["cache-control"], "no-store");
}

#[tokio::test]
async fn absolute_form_target() {
    let state = Arc::new(AppState::default());
    let (status, _, body) = call(&state, get_on_wire("http://foo/bar/..//baz?q")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Bytes::from_static(b"/baz\n"));
}

#[tokio::test]
async fn uppercase_scheme_is_bad_request() {
    let state = Arc::new(AppState::default());

    let (status, _, body) = call(&state, get_on_wire("HTTP://foo/a/../b")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(String::from_utf8_lossy(&body).contains("unsupported request target form"));

    // parsed URI alone can't vouch for the scheme spelling
    let (status, _, _) = call(&state, get("HTTP://foo/a/../b")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn served_target_comes_from_the_request_line() {
    let resp = exchange("GET HTTP://foo/a/../b HTTP/1.1\r\nHost: foo\r\n\r\n").await;
    assert!(resp.starts_with("HTTP/1.1 400"), "{resp}");

    let resp = exchange("GET http://foo/a/../b?x HTTP/1.1\r\nHost: foo\r\n\r\n").await;
    assert!(resp.starts_with("HTTP/1.1 200"), "{resp}");
    assert!(resp.ends_with("\r\n\r\n/b\n"), "{resp}");

    let resp = exchange("GET /a%2F%2E%2E/c HTTP/1.1\r\nHost: foo\r\n\r\n").await;
    assert!(resp.ends_with("\r\n\r\n/c\n"), "{resp}");
}

#[tokio::test]
async fn authority_form_is_bad_request() {
    let state = Arc::new(AppState::default());
    let req = Request::builder()
        .method(Method::CONNECT)
        .uri("example.com:443")
        .body(())
        .unwrap();
    let (status, _, body) = call(&state, req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(String::from_utf8_lossy(&body).contains("unsupported request target form"));
}

#[tokio::test]
async fn options_asterisk_has_no_path() {
    let state = Arc::new(AppState::default());
    let req = Request::builder()
        .method(Method::OPTIONS)
        .uri("*")
        .body(())
        .unwrap();
    let (status, headers, body) = call(&state, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers["allow"], "GET, HEAD, OPTIONS");
    assert!(body.is_empty());
}

#[tokio::test]
async fn metrics_reachable_only_through_normalized_path() {
    let state = Arc::new(AppState::default());

    // warm up so the counters have samples
    call(&state, get("/warmup")).await;

    let (status, headers, body) = call(&state, get("/static/..//metrics")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(headers["content-type"].to_str().unwrap().starts_with("text/plain; version=0.0.4"));
    assert!(String::from_utf8_lossy(&body).contains("path_decoder_requests_total"));

    let (_, _, body) = call(&state, get("/metrics/x")).await;
    assert_eq!(body, Bytes::from_static(b"/metrics/x\n"));
}

#[tokio::test]
async fn raw_target_header_is_used_when_configured() {
    let state = Arc::new(AppState::new(AppConfig {
        raw_target_header: Some("X-Original-URI".into()),
        ..AppConfig::default()
    }));

    let req = Request::builder()
        .uri("/decoded-by-front-end")
        .header("x-original-uri", "/a/%2e%2e/b")
        .body(())
        .unwrap();
    let (status, _, body) = call(&state, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Bytes::from_static(b"/b\n"));

    let (status, _, body) = call(&state, get("/no-header")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, Bytes::from_static(b"request target is missing\n"));
}
