mod common;

use axum::{body::Body, http::{header, Request, StatusCode}};
use common::{parse_body, TestApp};
use serde_json::json;

fn identity_request(personality: &str, forwarded_for: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/island-identity")
        .header(header::CONTENT_TYPE, "application/json")
        .header("x-forwarded-for", forwarded_for)
        .body(Body::from(json!({ "personality": personality }).to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_empty_personality_is_rejected() {
    let app = TestApp::new().await;

    let res = app.send(identity_request("   ", "198.51.100.7")).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(parse_body(res).await["error"], "请输入你的性格和喜好");
}

#[tokio::test]
async fn test_third_request_in_a_minute_is_throttled() {
    let app = TestApp::new().await;

    for _ in 0..2 {
        let res = app.send(identity_request("喜欢海和夜晚", "198.51.100.7")).await;
        assert_eq!(res.status(), StatusCode::OK);
    }

    let res = app.send(identity_request("喜欢海和夜晚", "198.51.100.7")).await;
    assert_eq!(res.status(), StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(parse_body(res).await["error"], "请求过于频繁，请稍后再试（每分钟最多2次）");

    // another address has its own window
    let res = app.send(identity_request("喜欢海和夜晚", "203.0.113.1, 10.0.0.1")).await;
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_blank_requests_do_not_use_up_the_quota() {
    let app = TestApp::new().await;

    for _ in 0..3 {
        let res = app.send(identity_request("", "198.51.100.8")).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    let res = app.send(identity_request("爱攀岩", "198.51.100.8")).await;
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_fenced_model_reply_is_parsed() {
    let app = TestApp::new().await;

    let res = app.send(identity_request("安静，喜欢潜水", "198.51.100.9")).await;
    assert_eq!(res.status(), StatusCode::OK);

    let body = parse_body(res).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["identity"]["role"], "潮汐信使");
    assert_eq!(body["identity"]["type"], "海洋生物");
    assert_eq!(body["identity"]["traits"].as_array().unwrap().len(), 3);
    assert_eq!(body["identity"]["emoji"], "🐬");
}

#[tokio::test]
async fn test_missing_api_key_is_a_config_error() {
    let app = TestApp::build(|c| c.ai_api_key = None, Default::default()).await;

    let res = app.send(identity_request("随便", "198.51.100.10")).await;
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(parse_body(res).await["error"], "服务配置错误");
}
