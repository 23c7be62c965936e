//! Request dispatch
//!
//! Entry point for each HTTP request: validates the method, captures the
//! headers the asset pipeline cares about, and hands off to
//! `static_files`.

use crate::config::ServerConfig;
use crate::handler::static_files;
use crate::http;
use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Method, Request, Response};
use std::convert::Infallible;
use std::sync::Arc;

/// The slice of a request the asset pipeline needs.
pub struct RequestContext<'a> {
    pub method: &'a str,
    pub path: &'a str,
    pub is_head: bool,
    pub if_none_match: Option<String>,
    pub if_modified_since: Option<String>,
    pub range: Option<String>,
}

/// Main entry point for HTTP request handling.
pub async fn handle_request(
    req: Request<hyper::body::Incoming>,
    config: Arc<ServerConfig>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let method = req.method();

    if let Some(resp) = check_http_method(method) {
        return Ok(resp);
    }

    let ctx = RequestContext {
        method: method.as_str(),
        path: req.uri().path(),
        is_head: *method == Method::HEAD,
        if_none_match: header_value(&req, "if-none-match"),
        if_modified_since: header_value(&req, "if-modified-since"),
        range: header_value(&req, "range"),
    };

    Ok(static_files::serve_asset(&ctx, &config).await)
}

/// Answer non-GET/HEAD methods without touching the filesystem.
fn check_http_method(method: &Method) -> Option<Response<Full<Bytes>>> {
    match method {
        &Method::GET | &Method::HEAD => None,
        &Method::OPTIONS => Some(http::build_options_response()),
        _ => {
            logger::log_warning(&format!("Method not allowed: {method}"));
            Some(http::build_method_not_allowed())
        }
    }
}

/// Extract a header as an owned string, ignoring non-UTF-8 values.
fn header_value(req: &Request<hyper::body::Incoming>, name: &str) -> Option<String> {
    req.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string)
}
