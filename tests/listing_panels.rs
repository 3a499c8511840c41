use askama::Template;
use postboard::{
    application::{
        listing::{Interaction, ListingView},
        pagination::{PageQuery, PageSize},
    },
    domain::posts::{Post, PostsPage},
    presentation::listing::{ListingPageTemplate, ListingPanelTemplate, ListingPanelView},
};
use uuid::Uuid;

fn post(number: i64, title: &str, data_type: &str) -> Post {
    Post {
        post_number: number,
        title: title.to_string(),
        content: "본문".to_string(),
        writer: "홍길동".to_string(),
        write_date: "2025-02-14".to_string(),
        data_type: data_type.to_string(),
    }
}

fn loaded(page: u32, size: u32, total: u64, posts: Vec<Post>) -> ListingView {
    let size = PageSize::try_from(size).expect("supported size");
    let mut view = ListingView::new(PageQuery::new(page, size));
    let ticket = view.apply(Interaction::Mount).expect("mount issues a fetch");
    view.complete(
        ticket,
        PostsPage {
            post_count: total,
            posts,
        },
    );
    view
}

fn render_panel(view: &ListingView) -> String {
    let panel = ListingPanelView::from_view(Uuid::nil(), view);
    ListingPanelTemplate { panel }
        .render()
        .expect("panel renders")
}

#[test]
fn loading_panel_shows_message_only() {
    let view = ListingView::new(PageQuery::default());
    let html = render_panel(&view);

    assert!(html.contains("데이터를 불러오는 중..."));
    assert!(html.contains("aria-busy=\"true\""));
    assert!(!html.contains("게시글이 없습니다."));
    assert!(!html.contains("class=\"pagination\""));
    for header in ["번호", "제목", "작성자", "작성일", "유형"] {
        assert!(html.contains(header), "missing header {header}");
    }
}

#[test]
fn empty_result_hides_summary_and_pagination() {
    let html = render_panel(&loaded(1, 10, 0, Vec::new()));

    assert!(html.contains("게시글이 없습니다."));
    assert!(!html.contains("전체 "));
    assert!(!html.contains("class=\"pagination\""));
}

#[test]
fn rows_render_type_icon_and_label() {
    let html = render_panel(&loaded(
        1,
        10,
        3,
        vec![
            post(3, "영상 글", "icon_movie"),
            post(2, "사진 글", "icon_pic"),
            post(1, "알 수 없음", "icon_zip"),
        ],
    ));

    assert!(html.contains("icon--video"));
    assert!(html.contains("icon--image"));
    assert!(html.contains("동영상"));
    assert!(html.contains("이미지"));
    assert!(html.contains("기타"));
    assert_eq!(html.matches("class=\"icon ").count(), 2);
    assert!(!html.contains("본문"), "content is never listed");
}

#[test]
fn first_page_disables_previous_only() {
    let html = render_panel(&loaded(1, 5, 12, vec![post(12, "첫 글", "icon_txt")]));

    assert!(html.contains("<button class=\"pagination__control\" type=\"button\" disabled>이전</button>"));
    assert!(html.contains("href=\"/?page=2&limit=5\""));
    assert!(html.contains(&format!(
        "data-on:click__prevent=\"@get('/posts/panel?view={}&page=2')\"",
        Uuid::nil()
    )));
    assert!(html.contains("aria-current=\"page\">1<"));
}

#[test]
fn last_page_disables_next_and_anchors_first() {
    let html = render_panel(&loaded(10, 5, 50, vec![post(1, "끝 글", "icon_txt")]));

    assert!(html.contains("<button class=\"pagination__control\" type=\"button\" disabled>다음</button>"));
    assert!(html.contains("pagination__ellipsis"));
    assert!(html.contains("href=\"/?page=1&limit=5\""));
    assert!(html.contains("aria-current=\"page\">10<"));
    assert!(html.contains("전체 50개 중 46-50개 표시 중"));
}

#[test]
fn page_size_select_marks_current_choice() {
    let html = render_panel(&loaded(1, 20, 3, vec![post(1, "글", "icon_txt")]));

    assert!(html.contains("<option value=\"20\" selected>20</option>"));
    assert!(html.contains("<option value=\"50\">50</option>"));
    assert!(html.contains("&size=' + evt.target.value"));
}

#[test]
fn full_page_embeds_panel_and_mount_action() {
    let view = ListingView::new(PageQuery::new(2, PageSize::DEFAULT));
    let panel = ListingPanelView::from_view(Uuid::nil(), &view);
    let html = ListingPageTemplate { panel }
        .render()
        .expect("page renders");

    assert!(html.contains("<html lang=\"ko\">"));
    assert!(html.contains("/static/listing.css"));
    assert!(html.contains("data-listing-panel"));
    assert!(html.contains(&format!(
        "data-init=\"@get('/posts/panel?view={}')\"",
        Uuid::nil()
    )));
}
