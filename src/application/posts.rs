//! Service coordinating listing views with the posts source.

use std::{num::NonZeroUsize, sync::Arc};

use tracing::{debug, instrument};
use uuid::Uuid;

use crate::application::{
    listing::{FetchTicket, Interaction, ListingView},
    pagination::{PageQuery, PageSize},
    registry::{ListingRegistry, Settled, Started},
    source::PostsSource,
};

/// What a panel request asks the view to do.
#[derive(Debug, Clone, Copy, Default)]
pub struct PanelRequest {
    pub view: Option<Uuid>,
    pub page: Option<u32>,
    pub size: Option<PageSize>,
}

impl PanelRequest {
    /// A size selection takes precedence over a page click.
    pub fn interaction(&self) -> Interaction {
        match (self.size, self.page) {
            (Some(size), _) => Interaction::ChangePageSize(size),
            (None, Some(page)) => Interaction::GoToPage(page),
            (None, None) => Interaction::Mount,
        }
    }
}

pub struct PostListingService {
    source: Arc<dyn PostsSource>,
    registry: ListingRegistry,
    default_page_size: PageSize,
}

impl PostListingService {
    pub fn new(
        source: Arc<dyn PostsSource>,
        default_page_size: PageSize,
        max_views: NonZeroUsize,
    ) -> Self {
        Self {
            source,
            registry: ListingRegistry::new(max_views),
            default_page_size,
        }
    }

    /// Register a new view for a full page render.
    pub fn open(&self, page: Option<u32>, size: Option<PageSize>) -> (Uuid, ListingView) {
        self.registry.open(self.seed_query(page, size))
    }

    /// Apply a panel request; the returned snapshot is in the loading state
    /// whenever a ticket was issued.
    pub fn begin(&self, request: PanelRequest) -> Started {
        let fallback = self.seed_query(request.page, request.size);
        self.registry
            .begin(request.view, fallback, request.interaction())
    }

    /// Fetch the ticket's page and install it. `None` means a newer request
    /// owns the view and this result was discarded.
    ///
    /// A page past the reported end is refetched as the last page; each
    /// retry asks for a strictly lower page.
    #[instrument(skip(self, ticket), fields(seq = ticket.seq()))]
    pub async fn finish(&self, id: Uuid, mut ticket: FetchTicket) -> Option<ListingView> {
        loop {
            let query = ticket.query();
            let page = self
                .source
                .get_posts(query.page(), query.size().get())
                .await;
            debug!(
                page = query.page(),
                limit = query.size().get(),
                post_count = page.post_count,
                rows = page.posts.len(),
                "posts page fetched"
            );
            match self.registry.complete(id, ticket, page)? {
                Settled::Ready(view) => return Some(view),
                Settled::Refetch(retry) => ticket = retry,
            }
        }
    }

    /// Query for a view created without history. A size selection starts on
    /// page 1 like any other size change.
    fn seed_query(&self, page: Option<u32>, size: Option<PageSize>) -> PageQuery {
        match size {
            Some(size) => PageQuery::first(size),
            None => PageQuery::new(page.unwrap_or(1), self.default_page_size),
        }
    }
}
