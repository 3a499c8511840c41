//! Listing page and its live panel stream.

use std::sync::Arc;

use async_stream::stream;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use datastar::prelude::ElementPatchMode;
use serde::Deserialize;
use tracing::{debug, error};
use uuid::Uuid;

use crate::{
    application::{
        error::HttpError,
        listing::ListingView,
        pagination::{PageSize, PaginationError},
        posts::{PanelRequest, PostListingService},
        registry::Started,
        stream::{empty_response, live_response, patch_event},
    },
    presentation::{
        listing::{ListingPageTemplate, ListingPanelTemplate, ListingPanelView},
        views::{TemplateRenderError, render_fragment, render_template_response},
    },
};

use super::{HttpState, selectors::LISTING_PANEL};

const SOURCE: &str = "infra::http::listing";

/// Query accepted by the full page; mirrors the upstream `page`/`limit` pair.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(super) struct ListingQuery {
    page: Option<u32>,
    limit: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(super) struct PanelQuery {
    view: Option<Uuid>,
    page: Option<u32>,
    size: Option<u32>,
}

pub(super) async fn listing_page(
    State(state): State<HttpState>,
    Query(query): Query<ListingQuery>,
) -> Response {
    let size = match parse_size(query.limit) {
        Ok(size) => size,
        Err(err) => return HttpError::from(err).into_response(),
    };

    let (id, view) = state.listing.open(query.page, size);
    let panel = ListingPanelView::from_view(id, &view);
    render_template_response(ListingPageTemplate { panel }, StatusCode::OK)
}

/// Streams the loading panel right away, then the loaded panel once the
/// upstream answers. Interactions that change nothing produce an empty stream.
pub(super) async fn listing_panel(
    State(state): State<HttpState>,
    Query(query): Query<PanelQuery>,
) -> Response {
    let size = match parse_size(query.size) {
        Ok(size) => size,
        Err(err) => return HttpError::from(err).into_response(),
    };

    let request = PanelRequest {
        view: query.view,
        page: query.page,
        size,
    };
    let Started { id, view, ticket } = state.listing.begin(request);

    let Some(ticket) = ticket else {
        debug!(view_id = %id, "interaction left the listing unchanged");
        return empty_response();
    };

    let loading = match render_panel(id, &view) {
        Ok(html) => html,
        Err(err) => return HttpError::from(err).into_response(),
    };

    let service: Arc<PostListingService> = state.listing.clone();
    let events = stream! {
        yield patch_event(loading, LISTING_PANEL, ElementPatchMode::Replace);

        if let Some(view) = service.finish(id, ticket).await {
            match render_panel(id, &view) {
                Ok(html) => {
                    yield patch_event(html, LISTING_PANEL, ElementPatchMode::Replace);
                }
                Err(err) => {
                    error!(
                        view_id = %id,
                        source = err.source,
                        error = %err.error,
                        "failed to render loaded listing panel"
                    );
                }
            }
        }
    };

    live_response(events)
}

fn parse_size(raw: Option<u32>) -> Result<Option<PageSize>, PaginationError> {
    raw.map(PageSize::try_from).transpose()
}

fn render_panel(id: Uuid, view: &ListingView) -> Result<String, TemplateRenderError> {
    let panel = ListingPanelView::from_view(id, view);
    render_fragment(&ListingPanelTemplate { panel }, SOURCE)
}
