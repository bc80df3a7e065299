//! End-to-end tests of the HTTP surface over a real socket.

use reqwest::{header, Method, StatusCode};
use vote_sdk::TeamCount;

use ashes_vote::votes::VoteOptions;

mod common;

fn counts_of(pairs: &[(&str, i64)]) -> Vec<TeamCount> {
    pairs
        .iter()
        .map(|(team, count)| TeamCount {
            team: team.to_string(),
            count: *count,
        })
        .collect()
}

#[tokio::test]
async fn test_health() {
    let app = common::spawn_app().await;
    let res = common::http_client().get(app.url("/health")).send().await.unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.text().await.unwrap(), "ok");
}

#[tokio::test]
async fn test_vote_then_counts_scenario() {
    let app = common::spawn_app().await;
    let client = common::http_client();

    let res = client
        .post(app.url("/vote"))
        .header(header::CONTENT_TYPE, "application/json")
        .body(r#"{"team":"australia"}"#)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    assert!(res.text().await.unwrap().is_empty());

    let res = client.get(app.url("/counts")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(
        res.headers()[header::CONTENT_TYPE].to_str().unwrap(),
        "application/json"
    );
    assert_eq!(
        res.text().await.unwrap(),
        r#"[{"team":"australia","count":1},{"team":"england","count":0}]"#
    );
}

#[tokio::test]
async fn test_disallowed_team_is_rejected_and_store_unchanged() {
    let app = common::spawn_app().await;
    let client = app.client();
    client.cast_vote("england").await.unwrap();

    let err = client.cast_vote("india").await.unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::BAD_REQUEST));
    assert_eq!(app.store.len().await, 1);
    assert_eq!(
        client.counts().await.unwrap(),
        counts_of(&[("australia", 0), ("england", 1)])
    );
}

#[tokio::test]
async fn test_each_allowed_vote_adds_exactly_one() {
    let app = common::spawn_app().await;
    let client = app.client();

    for team in ["england", "australia", "england"] {
        let before = client.counts().await.unwrap();
        client.cast_vote(team).await.unwrap();
        let after = client.counts().await.unwrap();

        for (b, a) in before.iter().zip(after.iter()) {
            let expected = if b.team == team { b.count + 1 } else { b.count };
            assert_eq!(a.count, expected, "after voting {team}");
        }
    }
}

#[tokio::test]
async fn test_malformed_json_is_rejected() {
    let app = common::spawn_app().await;
    let client = common::http_client();

    for body in ["{\"team\":", "not json", "", r#"{"team":["england"]}"#] {
        let res = client
            .post(app.url("/vote"))
            .header(header::CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST, "body {body:?}");
        assert_eq!(res.text().await.unwrap(), "bad request");
    }
    assert!(app.store.is_empty().await);
}

#[tokio::test]
async fn test_wrong_method_on_vote() {
    let app = common::spawn_app().await;
    let client = common::http_client();

    for method in [Method::GET, Method::PUT, Method::PATCH, Method::DELETE] {
        let res = client
            .request(method.clone(), app.url("/vote"))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED, "{method}");
    }
    assert!(app.store.is_empty().await);
}

#[tokio::test]
async fn test_options_short_circuits_everywhere() {
    let app = common::spawn_app().await;
    let client = common::http_client();

    for path in ["/vote", "/counts", "/health", "/unknown"] {
        let res = client
            .request(Method::OPTIONS, app.url(path))
            .header(header::ORIGIN, "http://localhost:3000")
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
            .send()
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::OK, "path {path}");
        assert_eq!(res.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        assert_eq!(
            res.headers()[header::ACCESS_CONTROL_ALLOW_METHODS],
            "GET, POST, OPTIONS"
        );
        assert_eq!(
            res.headers()[header::ACCESS_CONTROL_ALLOW_HEADERS],
            "Content-Type"
        );
        assert!(res.text().await.unwrap().is_empty());
    }
    assert!(app.store.is_empty().await);
}

#[tokio::test]
async fn test_cors_headers_on_every_response() {
    let app = common::spawn_app().await;
    let client = common::http_client();

    let responses = vec![
        client.get(app.url("/health")).send().await.unwrap(),
        client.get(app.url("/counts")).send().await.unwrap(),
        client.post(app.url("/vote")).body("{}").send().await.unwrap(),
        client.get(app.url("/vote")).send().await.unwrap(),
    ];

    for res in responses {
        assert_eq!(
            res.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "*",
            "status {}",
            res.status()
        );
    }
}

#[tokio::test]
async fn test_store_failure_is_generic_500() {
    let app = common::spawn_app().await;
    let client = common::http_client();
    app.store.set_failing(true);

    let res = client
        .post(app.url("/vote"))
        .body(r#"{"team":"england"}"#)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(res.text().await.unwrap(), "internal error");

    let res = client.get(app.url("/counts")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(res.text().await.unwrap(), "internal error");

    // liveness does not depend on the store
    let res = client.get(app.url("/health")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_alternate_option_set() {
    let app = common::spawn_app_with(VoteOptions::new(["red", "green", "blue"])).await;
    let client = app.client();

    client.cast_vote("blue").await.unwrap();
    assert!(client.cast_vote("australia").await.is_err());

    assert_eq!(
        client.counts().await.unwrap(),
        counts_of(&[("red", 0), ("green", 0), ("blue", 1)])
    );
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let app = common::spawn_app().await;
    let client = common::http_client();

    let res = client
        .get(app.url("/health"))
        .header("x-request-id", "trace-me-42")
        .send()
        .await
        .unwrap();
    assert_eq!(res.headers()["x-request-id"], "trace-me-42");

    let res = client.get(app.url("/health")).send().await.unwrap();
    assert!(res.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn test_server_stops_on_shutdown() {
    let app = common::spawn_app().await;
    let client = common::http_client();
    assert!(client.get(app.url("/health")).send().await.is_ok());

    app.stop();
    tokio::time::sleep(std::time::Duration::from_millis(200)).await;

    let fresh = common::http_client();
    assert!(fresh.get(app.url("/health")).send().await.is_err());
}
