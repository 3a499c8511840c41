//! Listing view state: the current page query, the last loaded rows and the
//! request sequence that guards against out-of-order completions.

use crate::{
    application::pagination::{
        ItemRange, PageQuery, PageSize, WindowItem, item_range, page_window, total_pages,
    },
    domain::posts::{Post, PostsPage},
};

#[derive(Debug, Clone, PartialEq, Eq)]
enum ListingState {
    Loading,
    Ready { posts: Vec<Post>, total: u64 },
}

/// User interactions that may change what the listing shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interaction {
    /// Initial load, or an explicit refresh of the current page.
    Mount,
    GoToPage(u32),
    ChangePageSize(PageSize),
}

/// Issued whenever the view starts a fetch; the sequence number identifies
/// the most recent request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    seq: u64,
    query: PageQuery,
}

impl FetchTicket {
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn query(&self) -> PageQuery {
        self.query
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Applied,
    /// The requested page lies past the reported end. The view moved to the
    /// last page and needs the returned fetch.
    Overshot(FetchTicket),
    Stale { seq: u64, latest: u64 },
}

#[derive(Debug, Clone)]
pub struct ListingView {
    query: PageQuery,
    total: u64,
    state: ListingState,
    issued: u64,
}

impl ListingView {
    pub fn new(query: PageQuery) -> Self {
        Self {
            query,
            total: 0,
            state: ListingState::Loading,
            issued: 0,
        }
    }

    /// Apply an interaction, returning the fetch it requires.
    ///
    /// Returns `None` when the interaction leaves page and size unchanged;
    /// that covers "previous" on the first page and "next" on the last.
    pub fn apply(&mut self, interaction: Interaction) -> Option<FetchTicket> {
        let next = match interaction {
            Interaction::Mount => return Some(self.issue(self.query)),
            Interaction::GoToPage(page) => PageQuery::new(self.clamp_page(page), self.query.size()),
            Interaction::ChangePageSize(size) => PageQuery::first(size),
        };

        if next == self.query {
            return None;
        }
        Some(self.issue(next))
    }

    /// Install a fetched page if `ticket` is the latest one issued.
    pub fn complete(&mut self, ticket: FetchTicket, page: PostsPage) -> Completion {
        if ticket.seq != self.issued {
            return Completion::Stale {
                seq: ticket.seq,
                latest: self.issued,
            };
        }

        self.total = page.post_count;
        let last = self.total_pages();
        if last > 0 && self.current_page() > last {
            return Completion::Overshot(self.issue(PageQuery::new(last, self.query.size())));
        }

        self.state = ListingState::Ready {
            posts: page.posts,
            total: page.post_count,
        };
        Completion::Applied
    }

    pub fn query(&self) -> PageQuery {
        self.query
    }

    pub fn current_page(&self) -> u32 {
        self.query.page()
    }

    pub fn page_size(&self) -> PageSize {
        self.query.size()
    }

    pub fn total_pages(&self) -> u32 {
        total_pages(self.total, self.query.size())
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, ListingState::Loading)
    }

    /// Rows of the loaded page; `None` while loading.
    pub fn posts(&self) -> Option<&[Post]> {
        match &self.state {
            ListingState::Loading => None,
            ListingState::Ready { posts, .. } => Some(posts),
        }
    }

    /// Shown range of items; hidden while loading or when nothing matched.
    pub fn summary(&self) -> Option<ItemRange> {
        match &self.state {
            ListingState::Loading => None,
            ListingState::Ready { total, .. } => item_range(self.query, *total),
        }
    }

    pub fn shows_pagination(&self) -> bool {
        !self.is_loading() && self.total_pages() > 0
    }

    pub fn page_window(&self) -> Vec<WindowItem> {
        if !self.shows_pagination() {
            return Vec::new();
        }
        page_window(self.current_page(), self.total_pages())
    }

    pub fn previous_enabled(&self) -> bool {
        self.current_page() > 1
    }

    pub fn next_enabled(&self) -> bool {
        self.current_page() < self.total_pages()
    }

    fn clamp_page(&self, page: u32) -> u32 {
        let pages = self.total_pages();
        if pages == 0 {
            page.max(1)
        } else {
            page.clamp(1, pages)
        }
    }

    fn issue(&mut self, query: PageQuery) -> FetchTicket {
        self.issued += 1;
        self.query = query;
        self.state = ListingState::Loading;
        FetchTicket {
            seq: self.issued,
            query,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn size(value: u32) -> PageSize {
        PageSize::try_from(value).expect("valid size")
    }

    fn posts(count: usize, first: i64) -> Vec<Post> {
        (0..count)
            .map(|offset| Post {
                post_number: first - offset as i64,
                title: format!("post {}", first - offset as i64),
                data_type: "icon_txt".to_string(),
                ..Post::default()
            })
            .collect()
    }

    fn ready_view(page: u32, page_size: u32, total: u64) -> ListingView {
        let mut view = ListingView::new(PageQuery::new(page, size(page_size)));
        let ticket = view.apply(Interaction::Mount).expect("mount fetches");
        let completion = view.complete(
            ticket,
            PostsPage {
                post_count: total,
                posts: posts(page_size as usize, 500),
            },
        );
        assert_eq!(completion, Completion::Applied);
        view
    }

    #[test]
    fn new_view_starts_loading_and_mount_fetches_current_query() {
        let mut view = ListingView::new(PageQuery::default());
        assert!(view.is_loading());
        assert!(view.summary().is_none());
        assert!(!view.shows_pagination());

        let ticket = view.apply(Interaction::Mount).expect("mount fetches");
        assert_eq!(ticket.seq(), 1);
        assert_eq!(ticket.query(), PageQuery::default());
    }

    #[test]
    fn completion_moves_to_ready() {
        let view = ready_view(1, 10, 23);
        assert!(!view.is_loading());
        assert_eq!(view.posts().map(<[Post]>::len), Some(10));
        assert_eq!(view.total_pages(), 3);
        let summary = view.summary().expect("summary when ready");
        assert_eq!((summary.from, summary.to, summary.total), (1, 10, 23));
    }

    #[test]
    fn zero_total_hides_summary_and_pagination() {
        let mut view = ListingView::new(PageQuery::default());
        let ticket = view.apply(Interaction::Mount).expect("mount fetches");
        view.complete(ticket, PostsPage::empty());

        assert!(!view.is_loading());
        assert_eq!(view.posts(), Some(&[][..]));
        assert!(view.summary().is_none());
        assert!(!view.shows_pagination());
        assert!(view.page_window().is_empty());
    }

    #[test]
    fn loading_hides_controls_even_with_known_total() {
        let mut view = ready_view(1, 10, 100);
        view.apply(Interaction::GoToPage(2)).expect("page change fetches");

        assert!(view.is_loading());
        assert_eq!(view.total_pages(), 10);
        assert!(view.summary().is_none());
        assert!(!view.shows_pagination());
    }

    #[test]
    fn page_size_change_resets_to_first_page() {
        let mut view = ready_view(4, 10, 100);
        let ticket = view
            .apply(Interaction::ChangePageSize(size(20)))
            .expect("size change fetches");

        assert_eq!(ticket.query().page(), 1);
        assert_eq!(ticket.query().size(), size(20));
        assert_eq!(view.current_page(), 1);
    }

    #[test]
    fn reselecting_current_size_on_first_page_is_a_no_op() {
        let mut view = ready_view(1, 10, 100);
        assert!(view.apply(Interaction::ChangePageSize(size(10))).is_none());
        assert!(!view.is_loading());
    }

    #[test]
    fn reselecting_current_size_elsewhere_returns_to_first_page() {
        let mut view = ready_view(3, 10, 100);
        let ticket = view
            .apply(Interaction::ChangePageSize(size(10)))
            .expect("page reset fetches");
        assert_eq!(ticket.query().page(), 1);
    }

    #[test]
    fn previous_on_first_page_is_disabled_and_inert() {
        let mut view = ready_view(1, 10, 100);
        assert!(!view.previous_enabled());
        assert!(view.next_enabled());
        assert!(view.apply(Interaction::GoToPage(0)).is_none());
        assert!(!view.is_loading());
    }

    #[test]
    fn next_on_last_page_is_disabled_and_inert() {
        let mut view = ready_view(10, 10, 100);
        assert!(view.previous_enabled());
        assert!(!view.next_enabled());
        assert!(view.apply(Interaction::GoToPage(11)).is_none());
        assert_eq!(view.current_page(), 10);
    }

    #[test]
    fn page_requests_beyond_the_end_are_clamped() {
        let mut view = ready_view(2, 10, 100);
        let ticket = view
            .apply(Interaction::GoToPage(99))
            .expect("clamped page fetches");
        assert_eq!(ticket.query().page(), 10);
    }

    #[test]
    fn seeded_page_past_the_end_refetches_last_page() {
        let mut view = ListingView::new(PageQuery::new(99, size(10)));
        let mount = view.apply(Interaction::Mount).expect("mount fetches");

        let completion = view.complete(
            mount,
            PostsPage {
                post_count: 100,
                posts: Vec::new(),
            },
        );
        let Completion::Overshot(retry) = completion else {
            panic!("expected a follow-up fetch, got {completion:?}");
        };
        assert_eq!(retry.query(), PageQuery::new(10, size(10)));
        assert!(retry.seq() > mount.seq());
        assert!(view.is_loading());
        assert!(view.summary().is_none());

        let completion = view.complete(
            retry,
            PostsPage {
                post_count: 100,
                posts: posts(10, 10),
            },
        );
        assert_eq!(completion, Completion::Applied);
        assert_eq!(view.current_page(), 10);
        let summary = view.summary().expect("summary when ready");
        assert_eq!((summary.from, summary.to, summary.total), (91, 100, 100));
        assert!(!view.next_enabled());
    }

    #[test]
    fn seeded_page_with_no_results_settles_empty() {
        let mut view = ListingView::new(PageQuery::new(7, size(10)));
        let mount = view.apply(Interaction::Mount).expect("mount fetches");
        assert_eq!(view.complete(mount, PostsPage::empty()), Completion::Applied);
        assert!(view.summary().is_none());
    }

    #[test]
    fn window_matches_current_position() {
        let view = ready_view(5, 10, 100);
        let window = view.page_window();
        assert_eq!(window.len(), 9);
        assert_eq!(
            window[4],
            WindowItem::Page {
                number: 5,
                current: true
            }
        );
        assert_eq!(window[1], WindowItem::Ellipsis);
        assert_eq!(window[7], WindowItem::Ellipsis);
    }

    #[test]
    fn stale_completion_never_overwrites_newer_state() {
        let mut view = ready_view(1, 10, 100);
        let slow = view.apply(Interaction::GoToPage(2)).expect("fetch page 2");
        let fast = view.apply(Interaction::GoToPage(3)).expect("fetch page 3");
        assert!(fast.seq() > slow.seq());

        let fresh = PostsPage {
            post_count: 100,
            posts: posts(10, 80),
        };
        assert_eq!(view.complete(fast, fresh.clone()), Completion::Applied);

        let outdated = PostsPage {
            post_count: 100,
            posts: posts(10, 90),
        };
        assert_eq!(
            view.complete(slow, outdated),
            Completion::Stale {
                seq: slow.seq(),
                latest: fast.seq()
            }
        );
        assert_eq!(view.current_page(), 3);
        assert_eq!(view.posts(), Some(fresh.posts.as_slice()));
    }

    #[test]
    fn stale_completion_while_loading_keeps_loading() {
        let mut view = ready_view(1, 10, 100);
        let first = view.apply(Interaction::GoToPage(2)).expect("fetch page 2");
        view.apply(Interaction::GoToPage(3)).expect("fetch page 3");

        let result = view.complete(first, PostsPage::empty());
        assert!(matches!(result, Completion::Stale { .. }));
        assert!(view.is_loading());
    }
}
