use std::net::{IpAddr, SocketAddr};

use http::{Request, Uri};

use super::tap::RawRequestTarget;
use crate::config::AppConfig;
use crate::decoder::{DecodeError, TargetForm};

/// What the handler knows about a request once its target has been decoded.
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub method: String,
    /// Target as it came off the wire: the configured header, the captured request
    /// line, or (origin, asterisk and authority form only) the parsed URI.
    pub raw_target: String,
    pub form: TargetForm,
    /// The server's own parsed path. Not trusted for routing.
    pub original_path: String,
    /// Normalized path; replaces `original_path`.
    pub path: String,
    pub client_ip: Option<IpAddr>,
    pub host: Option<String>,
    pub user_agent: Option<String>,
}

impl RequestContext {
    pub fn from_request<B>(
        req: &Request<B>,
        peer: Option<SocketAddr>,
        cfg: &AppConfig,
    ) -> Result<Self, DecodeError> {
        let raw_target = raw_target(req, cfg).ok_or(DecodeError::NullInput)?;
        let form = TargetForm::classify(&raw_target);
        let path = form.decode(&raw_target)?.into_owned();

        let user_agent = req
            .headers()
            .get(http::header::USER_AGENT)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string());

        Ok(Self {
            method: req.method().to_string(),
            form,
            raw_target,
            original_path: req.uri().path().to_string(),
            path,
            client_ip: peer.map(|sa| sa.ip()),
            host: extract_host(req),
            user_agent,
        })
    }
}

fn raw_target<B>(req: &Request<B>, cfg: &AppConfig) -> Option<String> {
    match cfg.raw_target_header() {
        Some(name) => req
            .headers()
            .get(name.to_ascii_lowercase().as_str())
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string()),
        None => match req.extensions().get::<RawRequestTarget>() {
            Some(RawRequestTarget(target)) => Some(target.clone()),
            None => request_target(req.uri()),
        },
    }
}

/// Re-assemble the request target from the parsed URI.
///
/// `None` for absolute-form: the URI keeps only the canonical spelling of the
/// scheme, so `HTTP://` and `http://` can't be told apart any more.
pub fn request_target(uri: &Uri) -> Option<String> {
    match (uri.scheme(), uri.authority()) {
        (Some(_), _) => None,
        (None, Some(authority)) => Some(authority.as_str().to_string()),
        _ => Some(
            uri.path_and_query()
                .map(|pq| pq.as_str().to_string())
                .unwrap_or_else(|| uri.path().to_string()),
        ),
    }
}

fn extract_host<B>(req: &Request<B>) -> Option<String> {
    req.headers()
        .get(http::header::HOST)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string())
        .or_else(|| req.uri().authority().map(|a| a.as_str().to_string()))
        .map(|h| normalize_host(&h))
}

fn normalize_host(host: &str) -> String {
    let h = host.trim().trim_end_matches('.').to_ascii_lowercase();
    // IPv6 literal, keep as-is (may include port)
    if h.starts_with('[') {
        return h;
    }
    if let Some(i) = h.rfind(':') {
        let (left, right) = h.split_at(i);
        if right.len() > 1 && right[1..].chars().all(|c| c.is_ascii_digit()) {
            return left.trim_end_matches('.').to_string();
        }
    }
    h
}
