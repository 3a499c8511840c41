//! Per-tab listing views, bounded by LRU eviction.

use std::{
    num::NonZeroUsize,
    sync::{Mutex, MutexGuard},
};

use lru::LruCache;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::{
    application::{
        listing::{Completion, FetchTicket, Interaction, ListingView},
        pagination::PageQuery,
    },
    domain::posts::PostsPage,
};

const SOURCE: &str = "application::registry";

/// Result of starting an interaction on a view.
#[derive(Debug, Clone)]
pub struct Started {
    pub id: Uuid,
    /// Snapshot taken right after the interaction was applied.
    pub view: ListingView,
    pub ticket: Option<FetchTicket>,
}

/// Outcome of installing a fetched page.
#[derive(Debug, Clone)]
pub enum Settled {
    Ready(ListingView),
    /// The page was past the end; fetch the last page instead.
    Refetch(FetchTicket),
}

pub struct ListingRegistry {
    views: Mutex<LruCache<Uuid, ListingView>>,
}

impl ListingRegistry {
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self {
            views: Mutex::new(LruCache::new(capacity)),
        }
    }

    /// Register a fresh view in the loading state.
    pub fn open(&self, query: PageQuery) -> (Uuid, ListingView) {
        let id = Uuid::new_v4();
        let view = ListingView::new(query);
        self.lock("open").put(id, view.clone());
        (id, view)
    }

    /// Apply `interaction` to the view registered under `id`.
    ///
    /// Unknown or evicted ids are replaced by a new view seeded from
    /// `fallback`, which is then mounted.
    pub fn begin(&self, id: Option<Uuid>, fallback: PageQuery, interaction: Interaction) -> Started {
        let mut views = self.lock("begin");

        if let Some(id) = id
            && let Some(view) = views.get_mut(&id)
        {
            let ticket = view.apply(interaction);
            return Started {
                id,
                view: view.clone(),
                ticket,
            };
        }

        let id = Uuid::new_v4();
        let mut view = ListingView::new(fallback);
        let ticket = view.apply(Interaction::Mount);
        views.put(id, view.clone());
        debug!(view_id = %id, page = fallback.page(), "registered listing view");
        Started { id, view, ticket }
    }

    /// Install a fetched page. `None` means the ticket was superseded or the
    /// view has been evicted.
    pub fn complete(&self, id: Uuid, ticket: FetchTicket, page: PostsPage) -> Option<Settled> {
        let mut views = self.lock("complete");
        let Some(view) = views.get_mut(&id) else {
            debug!(view_id = %id, seq = ticket.seq(), "dropping completion for evicted view");
            return None;
        };

        match view.complete(ticket, page) {
            Completion::Applied => Some(Settled::Ready(view.clone())),
            Completion::Overshot(retry) => {
                debug!(
                    view_id = %id,
                    requested = ticket.query().page(),
                    last = retry.query().page(),
                    "requested page past the end; refetching last page"
                );
                Some(Settled::Refetch(retry))
            }
            Completion::Stale { seq, latest } => {
                debug!(view_id = %id, seq, latest, "dropping out-of-order completion");
                None
            }
        }
    }

    fn lock(&self, op: &'static str) -> MutexGuard<'_, LruCache<Uuid, ListingView>> {
        match self.views.lock() {
            Ok(guard) => guard,
            Err(poisoned) => {
                warn!(
                    op,
                    target_module = SOURCE,
                    lock_kind = "mutex.lock",
                    result = "poisoned_recovered",
                    "Recovered from poisoned listing registry lock"
                );
                poisoned.into_inner()
            }
        }
    }
}
