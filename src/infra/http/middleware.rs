//! Request correlation and response logging shared by every route.

use std::time::Instant;

use axum::{
    body::Body,
    http::{HeaderMap, HeaderName, HeaderValue, Method, Request, StatusCode, Uri},
    middleware::Next,
    response::Response,
};
use tracing::{Span, debug, error, field, instrument, warn};
use uuid::Uuid;

use crate::application::error::ErrorReport;

pub const REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

const TARGET: &str = "postboard::http::response";

/// Correlation id for one request. A caller-supplied `x-request-id` is kept
/// when it parses as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestContext {
    pub request_id: Uuid,
}

impl RequestContext {
    fn from_headers(headers: &HeaderMap) -> Self {
        let request_id = headers
            .get(REQUEST_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| Uuid::parse_str(value.trim()).ok())
            .unwrap_or_else(Uuid::new_v4);
        Self { request_id }
    }
}

/// Attach a [`RequestContext`], record it on the `request` span and echo the
/// id back in `x-request-id`.
#[instrument(
    name = "request",
    skip_all,
    fields(
        request_id = field::Empty,
        method = %request.method(),
        path = %request.uri().path(),
    )
)]
pub async fn set_request_context(mut request: Request<Body>, next: Next) -> Response {
    let ctx = RequestContext::from_headers(request.headers());
    Span::current().record("request_id", field::display(ctx.request_id));
    request.extensions_mut().insert(ctx);

    let mut response = next.run(request).await;
    if let Ok(value) = HeaderValue::from_str(&ctx.request_id.to_string()) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    response
}

/// Log every response; failures carry the diagnostics handlers attached.
///
/// Panel streams are logged when their headers go out, not when the stream
/// ends.
pub async fn log_responses(request: Request<Body>, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let request_id = request
        .extensions()
        .get::<RequestContext>()
        .map(|ctx| ctx.request_id);
    let start = Instant::now();

    let mut response = next.run(request).await;
    let status = response.status();
    let elapsed_ms = start.elapsed().as_millis();

    if status.is_client_error() || status.is_server_error() {
        let report = response.extensions_mut().remove::<ErrorReport>();
        let failure = Failure {
            status,
            method: &method,
            uri: &uri,
            request_id,
            elapsed_ms,
            report,
        };
        failure.log();
    } else {
        debug!(
            target: TARGET,
            status = status.as_u16(),
            method = %method,
            path = %uri.path(),
            elapsed_ms,
            "request served"
        );
    }

    response
}

struct Failure<'a> {
    status: StatusCode,
    method: &'a Method,
    uri: &'a Uri,
    request_id: Option<Uuid>,
    elapsed_ms: u128,
    report: Option<ErrorReport>,
}

impl Failure<'_> {
    fn log(self) {
        let (source, messages) = match self.report {
            Some(report) => (report.source, report.messages),
            None => ("unknown", Vec::new()),
        };
        let detail = messages
            .first()
            .map(String::as_str)
            .unwrap_or("no diagnostic available");
        let request_id = self
            .request_id
            .map(|id| id.to_string())
            .unwrap_or_default();

        if self.status.is_server_error() {
            error!(
                target: TARGET,
                status = self.status.as_u16(),
                method = %self.method,
                path = %self.uri.path(),
                query = self.uri.query().unwrap_or(""),
                elapsed_ms = self.elapsed_ms,
                source,
                detail,
                chain = ?messages,
                request_id,
                "request failed"
            );
        } else {
            warn!(
                target: TARGET,
                status = self.status.as_u16(),
                method = %self.method,
                path = %self.uri.path(),
                query = self.uri.query().unwrap_or(""),
                elapsed_ms = self.elapsed_ms,
                source,
                detail,
                chain = ?messages,
                request_id,
                "client request error"
            );
        }
    }
}
