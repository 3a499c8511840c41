//! View models and templates for the post listing page.

use askama::Template;
use uuid::Uuid;

use crate::{
    application::{
        listing::ListingView,
        pagination::{PageSize, WindowItem},
    },
    domain::posts::Post,
};

pub const PANEL_ENDPOINT: &str = "/posts/panel";

pub const LOADING_MESSAGE: &str = "데이터를 불러오는 중...";
pub const EMPTY_MESSAGE: &str = "게시글이 없습니다.";

#[derive(Template)]
#[template(path = "listing.html")]
pub struct ListingPageTemplate {
    pub panel: ListingPanelView,
}

#[derive(Template)]
#[template(path = "listing_panel.html")]
pub struct ListingPanelTemplate {
    pub panel: ListingPanelView,
}

#[derive(Debug, Clone)]
pub struct ListingPanelView {
    pub view_id: String,
    /// Datastar expression fetching the panel for the current view.
    pub mount_action: String,
    pub is_loading: bool,
    pub loading_message: &'static str,
    pub empty_message: &'static str,
    pub summary: Option<String>,
    pub page_size_action: String,
    pub page_size_options: Vec<PageSizeOptionView>,
    pub rows: Vec<PostRowView>,
    pub pagination: Option<PaginationView>,
}

#[derive(Debug, Clone)]
pub struct PageSizeOptionView {
    pub value: u32,
    pub selected: bool,
}

#[derive(Debug, Clone)]
pub struct PostRowView {
    pub number: i64,
    pub title: String,
    pub writer: String,
    pub write_date: String,
    pub icon: Option<&'static str>,
    pub label: &'static str,
}

#[derive(Debug, Clone)]
pub struct PaginationView {
    pub previous: PageControlView,
    pub next: PageControlView,
    pub links: Vec<PageLinkView>,
}

/// Previous/next button. Disabled controls carry no action.
#[derive(Debug, Clone)]
pub struct PageControlView {
    pub enabled: bool,
    pub action: String,
    pub href: String,
}

#[derive(Debug, Clone)]
pub struct PageLinkView {
    pub label: String,
    pub action: String,
    pub href: String,
    pub is_active: bool,
    pub is_ellipsis: bool,
}

impl ListingPanelView {
    pub fn from_view(id: Uuid, view: &ListingView) -> Self {
        let view_id = id.to_string();
        let size = view.page_size();

        let rows = view
            .posts()
            .map(|posts| posts.iter().map(PostRowView::from_post).collect())
            .unwrap_or_default();

        let summary = view.summary().map(|range| {
            format!(
                "전체 {}개 중 {}-{}개 표시 중",
                range.total, range.from, range.to
            )
        });

        let pagination = view.shows_pagination().then(|| PaginationView {
            previous: PageControlView::new(
                &view_id,
                view.previous_enabled(),
                view.current_page().saturating_sub(1),
                size,
            ),
            next: PageControlView::new(
                &view_id,
                view.next_enabled(),
                view.current_page().saturating_add(1),
                size,
            ),
            links: view
                .page_window()
                .into_iter()
                .map(|item| PageLinkView::from_item(&view_id, item, size))
                .collect(),
        });

        Self {
            mount_action: format!("@get('{PANEL_ENDPOINT}?view={view_id}')"),
            page_size_action: format!(
                "@get('{PANEL_ENDPOINT}?view={view_id}&size=' + evt.target.value)"
            ),
            page_size_options: PageSize::choices()
                .map(|choice| PageSizeOptionView {
                    value: choice.get(),
                    selected: choice == size,
                })
                .collect(),
            is_loading: view.is_loading(),
            loading_message: LOADING_MESSAGE,
            empty_message: EMPTY_MESSAGE,
            summary,
            rows,
            pagination,
            view_id,
        }
    }

    /// Ready with nothing to show.
    pub fn is_empty(&self) -> bool {
        !self.is_loading && self.rows.is_empty()
    }
}

impl PostRowView {
    fn from_post(post: &Post) -> Self {
        let kind = post.data_type_kind();
        Self {
            number: post.post_number,
            title: post.title.clone(),
            writer: post.writer.clone(),
            write_date: post.write_date.clone(),
            icon: kind.icon().map(|icon| icon.as_str()),
            label: kind.label(),
        }
    }
}

impl PageControlView {
    fn new(view_id: &str, enabled: bool, target: u32, size: PageSize) -> Self {
        if !enabled {
            return Self {
                enabled,
                action: String::new(),
                href: String::new(),
            };
        }
        Self {
            enabled,
            action: page_action(view_id, target),
            href: page_href(target, size),
        }
    }
}

impl PageLinkView {
    fn from_item(view_id: &str, item: WindowItem, size: PageSize) -> Self {
        match item {
            WindowItem::Page { number, current } => Self {
                label: number.to_string(),
                action: if current {
                    String::new()
                } else {
                    page_action(view_id, number)
                },
                href: page_href(number, size),
                is_active: current,
                is_ellipsis: false,
            },
            WindowItem::Ellipsis => Self {
                label: "…".to_string(),
                action: String::new(),
                href: String::new(),
                is_active: false,
                is_ellipsis: true,
            },
        }
    }
}

fn page_action(view_id: &str, page: u32) -> String {
    format!("@get('{PANEL_ENDPOINT}?view={view_id}&page={page}')")
}

fn page_href(page: u32, size: PageSize) -> String {
    format!("/?page={page}&limit={size}")
}
