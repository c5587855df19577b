use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use bytes::Bytes;
use http::header::{HeaderValue, ALLOW};
use http::uri::PathAndQuery;
use http::{Method, Request, Response, StatusCode, Uri};

use super::context::RequestContext;
use super::response::{self, Body};
use super::AppState;
use crate::metrics;

/// Request pipeline: decode the raw target, overwrite the request path with the
/// result, then route on the rewritten path only.
pub async fn handle<B>(
    mut req: Request<B>,
    peer: Option<SocketAddr>,
    state: Arc<AppState>,
) -> Result<Response<Body>, Infallible> {
    let start = Instant::now();
    let request_id = response::gen_request_id();

    let resp = match RequestContext::from_request(&req, peer, &state.cfg) {
        Ok(ctx) => {
            metrics::counters::on_request(ctx.form.as_str());
            if is_rewrite(&ctx) {
                metrics::counters::on_rewrite();
            }

            tracing::info!(
                request_id = %request_id,
                method = %ctx.method,
                form = ctx.form.as_str(),
                raw_target = %ctx.raw_target,
                original_path = %ctx.original_path,
                path = %ctx.path,
                client_ip = ?ctx.client_ip,
                host = ?ctx.host,
                "request path decoded"
            );

            match rewrite_path(req.uri(), &ctx.path) {
                Ok(Some(uri)) => {
                    *req.uri_mut() = uri;
                    route(&req, &ctx, &state, &request_id)
                }
                Ok(None) => route(&req, &ctx, &state, &request_id),
                Err(e) => {
                    metrics::counters::on_reject("rewrite_failed");
                    tracing::warn!(request_id = %request_id, path = %ctx.path, "uri rewrite failed: {}", e);
                    response::text(StatusCode::BAD_REQUEST, "invalid request target\n", &request_id)
                }
            }
        }
        Err(e) => {
            metrics::counters::on_reject(e.reason());
            tracing::warn!(request_id = %request_id, "request target rejected: {}", e);
            response::text(StatusCode::BAD_REQUEST, format!("{e}\n"), &request_id)
        }
    };

    metrics::counters::on_done(start.elapsed().as_secs_f64());
    Ok(resp)
}

/// The decoded path replaces a different server-parsed path. `OPTIONS *` has no
/// path to replace.
fn is_rewrite(ctx: &RequestContext) -> bool {
    !ctx.path.is_empty() && ctx.path != ctx.original_path
}

/// `uri` with its path replaced by `path`, query kept. `None` when there is
/// nothing to replace (`OPTIONS *`) or the path is already `path`.
pub fn rewrite_path(uri: &Uri, path: &str) -> Result<Option<Uri>, http::Error> {
    if path.is_empty() || uri.path() == path {
        return Ok(None);
    }

    let pq = match uri.query() {
        Some(q) => format!("{path}?{q}"),
        None => path.to_string(),
    };

    let mut parts = uri.clone().into_parts();
    parts.path_and_query = Some(PathAndQuery::try_from(pq)?);
    Ok(Some(Uri::from_parts(parts)?))
}

fn route<B>(req: &Request<B>, ctx: &RequestContext, state: &AppState, request_id: &str) -> Response<Body> {
    // OPTIONS * (or an empty target): no resource to map
    if ctx.path.is_empty() {
        let mut resp = response::text(StatusCode::OK, Bytes::new(), request_id);
        resp.headers_mut()
            .insert(ALLOW, HeaderValue::from_static("GET, HEAD, OPTIONS"));
        return resp;
    }

    if req.uri().path() == state.cfg.metrics_path() {
        if req.method() != Method::GET && req.method() != Method::HEAD {
            return response::text(StatusCode::METHOD_NOT_ALLOWED, "method not allowed\n", request_id);
        }
        return response::with_content_type(
            StatusCode::OK,
            metrics::TEXT_CONTENT_TYPE,
            metrics::gather_as_text(),
            request_id,
        );
    }

    response::text(StatusCode::OK, format!("{}\n", ctx.path), request_id)
}
