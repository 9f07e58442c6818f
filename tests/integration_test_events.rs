mod common;

use axum::http::StatusCode;
use common::{parse_body, TestApp};
use serde_json::json;

async fn create_event(app: &TestApp, cookie: &str, title: &str) -> String {
    let res = app.json("POST", "/api/events", json!({
        "title": title,
        "description": "一起去海边",
        "time": "2026-11-01 19:00",
        "location": "北戴河",
        "join_link": "https://island.test/join"
    }), Some(cookie)).await;
    assert_eq!(res.status(), StatusCode::OK);
    parse_body(res).await["data"]["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_event_crud() {
    let app = TestApp::new().await;
    let cookie = app.admin_cookie().await;

    let res = app.json("POST", "/api/events", json!({"title": "  "}), Some(&cookie)).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = app.json("POST", "/api/events", json!({"title": "夜潜"}), None).await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let id = create_event(&app, &cookie, "读诗会").await;

    let res = app.json("PUT", &format!("/api/events/{}", id), json!({"location": "线上", "join_link": ""}), Some(&cookie)).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body = parse_body(res).await;
    assert_eq!(body["data"]["title"], "读诗会");
    assert_eq!(body["data"]["location"], "线上");
    assert!(body["data"]["join_link"].is_null());

    let events = parse_body(app.get("/api/events", None).await).await;
    assert_eq!(events.as_array().unwrap().len(), 1);

    let res = app.json("PUT", "/api/events/missing", json!({"title": "x"}), Some(&cookie)).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_registration_flow() {
    let app = TestApp::new().await;
    let cookie = app.admin_cookie().await;
    let id = create_event(&app, &cookie, "搞砸俱乐部").await;
    let base = format!("/api/events/{}/registrations", id);

    let res = app.json("POST", &base, json!({"name": "阿青"}), None).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(parse_body(res).await["error"], "缺少必填字段");

    let res = app.json("POST", "/api/events/nope/registrations", json!({"name": "阿青", "contact": "wx"}), None).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = app.json("POST", &base, json!({"name": "阿青", "contact": "wx:aqing", "notes": "带朋友"}), None).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body = parse_body(res).await;
    assert_eq!(body["data"]["status"], "pending");
    let rid = body["data"]["id"].as_str().unwrap().to_string();

    let res = app.get(&base, None).await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let list = parse_body(app.get(&base, Some(&cookie)).await).await;
    assert_eq!(list.as_array().unwrap().len(), 1);

    let res = app.json("PUT", &format!("{}/{}", base, rid), json!({"status": "vip"}), Some(&cookie)).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = app.json("PUT", &format!("{}/{}", base, rid), json!({"status": "attended", "notes": ""}), Some(&cookie)).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body = parse_body(res).await;
    assert_eq!(body["data"]["status"], "attended");
    assert!(body["data"]["notes"].is_null());
    assert_eq!(body["data"]["name"], "阿青");

    let res = app.json("DELETE", &format!("{}/{}", base, rid), json!({}), Some(&cookie)).await;
    assert_eq!(res.status(), StatusCode::OK);
    let list = parse_body(app.get(&base, Some(&cookie)).await).await;
    assert!(list.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_deleting_event_removes_registrations() {
    let app = TestApp::new().await;
    let cookie = app.admin_cookie().await;
    let id = create_event(&app, &cookie, "攀岩日").await;
    let base = format!("/api/events/{}/registrations", id);

    for name in ["a", "b"] {
        let res = app.json("POST", &base, json!({"name": name, "contact": "c"}), None).await;
        assert_eq!(res.status(), StatusCode::OK);
    }

    let res = app.json("DELETE", &format!("/api/events/{}", id), json!({}), Some(&cookie)).await;
    assert_eq!(res.status(), StatusCode::OK);

    let list = parse_body(app.get(&base, Some(&cookie)).await).await;
    assert!(list.as_array().unwrap().is_empty());

    let res = app.json("DELETE", &format!("/api/events/{}", id), json!({}), Some(&cookie)).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_posts_crud() {
    let app = TestApp::new().await;
    let cookie = app.admin_cookie().await;

    let res = app.json("POST", "/api/posts", json!({"content": "今天的海很蓝", "image_url": "https://img.test/1.jpg"}), Some(&cookie)).await;
    assert_eq!(res.status(), StatusCode::OK);
    let id = parse_body(res).await["data"]["id"].as_str().unwrap().to_string();

    let res = app.json("POST", "/api/posts", json!({"content": ""}), Some(&cookie)).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = app.json("PUT", &format!("/api/posts/{}", id), json!({"content": "今天的海很绿"}), Some(&cookie)).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body = parse_body(res).await;
    assert_eq!(body["data"]["content"], "今天的海很绿");
    assert_eq!(body["data"]["image_url"], "https://img.test/1.jpg");

    let posts = parse_body(app.get("/api/posts", None).await).await;
    assert_eq!(posts.as_array().unwrap().len(), 1);

    let res = app.json("DELETE", &format!("/api/posts/{}", id), json!({}), None).await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let res = app.json("DELETE", &format!("/api/posts/{}", id), json!({}), Some(&cookie)).await;
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_guestbook_entry_is_stored_and_mailed() {
    let app = TestApp::new().await;
    let cookie = app.admin_cookie().await;

    let res = app.json("POST", "/api/stories", json!({"name": "旅人", "message": "<b>你好</b>"}), None).await;
    assert_eq!(res.status(), StatusCode::OK);
    let id = parse_body(res).await["data"]["id"].as_str().unwrap().to_string();

    let res = app.json("POST", "/api/stories", json!({"name": "旅人"}), None).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let mails = app.wait_for_mails(1).await;
    assert_eq!(mails[0].subject, "【瓶中信】旅人 投递了新故事");
    assert!(mails[0].html.contains("&lt;b&gt;"));

    let stories = parse_body(app.get("/api/stories", None).await).await;
    assert_eq!(stories[0]["message"], "<b>你好</b>");

    let res = app.json("DELETE", &format!("/api/stories/{}", id), json!({}), Some(&cookie)).await;
    assert_eq!(res.status(), StatusCode::OK);
    let stories = parse_body(app.get("/api/stories", None).await).await;
    assert!(stories.as_array().unwrap().is_empty());
}
