use std::time::Duration;

use reelview::client::{load_post, ApiError, LoadError, API};
use reelview::media::DetachedMedia;
use reelview::session::{Session, SessionProvider, ViewerIdentity};
use reelview::ui::detail::{LikeAction, LikeOutcome};
use reelview::ui::DetailView;
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn post_body(id: &str, likes: usize) -> serde_json::Value {
    json!({
        "_id": id,
        "caption": "tide pools at dawn",
        "video": { "asset": { "url": "https://cdn.example.com/tide.mp4" } },
        "postedBy": { "_id": "creator", "userName": "Rocky", "image": "https://cdn.example.com/r.png" },
        "likes": (0..likes)
            .map(|i| json!({ "_key": format!("k{i}"), "_ref": format!("fan{i}") }))
            .collect::<Vec<_>>(),
        "comments": []
    })
}

fn like_body(likes: usize) -> serde_json::Value {
    json!({ "likes": (0..likes).map(|i| json!({ "_ref": format!("fan{i}") })).collect::<Vec<_>>() })
}

fn api(server: &MockServer) -> API {
    API::new(&server.uri(), Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn test_load_then_like_and_dislike() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/post/abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(post_body("abc123", 5)))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/like"))
        .and(body_partial_json(json!({ "postId": "abc123", "userId": "viewer", "like": true })))
        .respond_with(ResponseTemplate::new(200).set_body_json(like_body(6)))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/like"))
        .and(body_partial_json(json!({ "like": false })))
        .respond_with(ResponseTemplate::new(200).set_body_json(like_body(5)))
        .expect(1)
        .mount(&server)
        .await;

    let api = api(&server);
    let post = load_post(&api, "abc123").await.unwrap();
    let session = SessionProvider::new(Some(ViewerIdentity::new("viewer"))).session();
    let mut view = DetailView::new(post, Box::new(DetachedMedia::new("headless")), session);

    assert_eq!(view.like_control().unwrap().count, 5);
    assert_eq!(view.like_with(&api, LikeAction::Like).await, Some(LikeOutcome::Applied));
    assert_eq!(view.like_control().unwrap().count, 6);
    assert_eq!(view.like_with(&api, LikeAction::Dislike).await, Some(LikeOutcome::Applied));
    assert_eq!(view.like_control().unwrap().count, 5);
}

#[tokio::test]
async fn test_missing_post_fails_before_any_view_exists() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/post/nope"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let result = load_post(&api(&server), "nope").await;
    assert!(matches!(
        result,
        Err(LoadError::Api { source: ApiError::NotFound(_), .. })
    ));
}

#[tokio::test]
async fn test_anonymous_viewer_never_writes() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(post_body("abc123", 3)))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(200).set_body_json(like_body(4)))
        .expect(0)
        .mount(&server)
        .await;

    let api = api(&server);
    let post = load_post(&api, "abc123").await.unwrap();
    let mut view = DetailView::new(
        post,
        Box::new(DetachedMedia::new("headless")),
        Session::anonymous(),
    );

    assert!(view.like_control().is_none());
    assert_eq!(view.like_with(&api, LikeAction::Like).await, None);
}

#[tokio::test]
async fn test_server_error_on_like_keeps_count() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(post_body("abc123", 3)))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let api = api(&server);
    let post = load_post(&api, "abc123").await.unwrap();
    let session = SessionProvider::new(Some(ViewerIdentity::new("viewer"))).session();
    let mut view = DetailView::new(post, Box::new(DetachedMedia::new("headless")), session);

    assert_eq!(view.like_with(&api, LikeAction::Like).await, Some(LikeOutcome::Failed));
    assert_eq!(view.like_control().unwrap().count, 3);
    assert!(view.notice().is_some());
}
