//! Helpers for building server-driven datastar SSE responses.

use std::convert::Infallible;

use async_stream::stream;
use axum::response::{
    IntoResponse, Response,
    sse::{Event, Sse},
};
use datastar::prelude::{ElementPatchMode, PatchElements};
use futures::Stream;

/// Build a single element patch event targeting the supplied selector.
pub fn patch_event(html: String, selector: &str, mode: ElementPatchMode) -> Event {
    PatchElements::new(html)
        .selector(selector)
        .mode(mode)
        .write_as_axum_sse_event()
}

/// An SSE response that patches nothing.
pub fn empty_response() -> Response {
    live_response(futures::stream::empty())
}

/// Wrap a live event stream, for responses that patch while work is pending.
pub fn live_response<S>(events: S) -> Response
where
    S: Stream<Item = Event> + Send + 'static,
{
    let stream = stream! {
        for await event in events {
            yield Ok::<Event, Infallible>(event);
        }
    };
    Sse::new(stream).into_response()
}
