//! End-to-end request flows against a mock upstream.

use reqwest::StatusCode;
use serde_json::{json, Value};

mod common;

use common::TEST_API_KEY;

#[tokio::test]
async fn test_snusbase_strips_credit_and_sends_term_body() {
    let (upstream, captured) = common::start_mock_upstream(
        200,
        r#"{"credit": 97, "results": [{"email": "a@b.c", "credit": 1, "source": {"credit": 2, "name": "x"}}]}"#,
    )
    .await;
    let gateway = common::start_gateway(upstream).await;

    let res = gateway
        .client
        .post(gateway.url("/snusbase"))
        .json(&json!({"search_type": "email", "query": "foo"}))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(
        body,
        json!({"results": [{"email": "a@b.c", "source": {"name": "x"}}]})
    );

    let requests = captured.all();
    assert_eq!(requests.len(), 1);
    let request = &requests[0];
    assert_eq!(request.method, "POST");
    assert_eq!(request.target, "/api/snusbase");
    assert_eq!(request.header("x-api-key"), Some(TEST_API_KEY));
    assert_eq!(request.header("content-type"), Some("application/json"));
    assert_eq!(
        request.json_body(),
        json!({"term": "foo", "search_type": "email"})
    );
}

#[tokio::test]
async fn test_seon_email_is_flattened() {
    let (upstream, captured) = common::start_mock_upstream(
        200,
        r#"{"credit": 3, "email": {"valid": true, "domain": "b.c"}, "accounts": ["google", "apple"], "breaches": [], "score": 4}"#,
    )
    .await;
    let gateway = common::start_gateway(upstream).await;

    let res = gateway
        .client
        .get(gateway.url("/seon_email"))
        .query(&[("email", "a@b.c")])
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(
        body,
        json!({
            "email_valid": true,
            "email_domain": "b.c",
            "accounts": "google, apple",
            "breaches": "None",
            "score": 4
        })
    );

    let request = &captured.all()[0];
    assert_eq!(request.method, "GET");
    assert_eq!(request.target, "/api/seon/email?email=a%40b.c");
    assert_eq!(request.header("x-api-key"), Some(TEST_API_KEY));
}

#[tokio::test]
async fn test_seon_phone_array_result_is_not_flattened() {
    let (upstream, _) =
        common::start_mock_upstream(200, r#"[{"carrier": {"name": "x"}, "credit": 1}]"#).await;
    let gateway = common::start_gateway(upstream).await;

    let res = gateway
        .client
        .get(gateway.url("/seon_phone?phone=%2B15551234567"))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body, json!([{"carrier": {"name": "x"}}]));
}

#[tokio::test]
async fn test_get_lookups_hit_their_endpoints() {
    let (upstream, captured) = common::start_mock_upstream(200, r#"{"ok": true}"#).await;
    let gateway = common::start_gateway(upstream).await;

    let cases = [
        ("/leakcheck?term=bob", "/api/leakcheck?term=bob"),
        ("/oathnet_ip?ip=1.2.3.4", "/api/oathnet/ip-info?ip=1.2.3.4"),
        ("/oathnet_roblox?username=bob", "/api/oathnet/roblox-userinfo?username=bob"),
        ("/oathnet_discord_roblox?discordid=42", "/api/oathnet/discord-to-roblox?discordid=42"),
        ("/oathnet_holhe?email=x", "/api/oathnet/holhe?email=x"),
    ];

    for (inbound, _) in cases {
        let res = gateway.client.get(gateway.url(inbound)).send().await.unwrap();
        assert_eq!(res.status(), StatusCode::OK, "{inbound}");
    }

    let targets: Vec<String> = captured.all().into_iter().map(|r| r.target).collect();
    let expected: Vec<String> = cases.iter().map(|(_, up)| up.to_string()).collect();
    assert_eq!(targets, expected);
}

#[tokio::test]
async fn test_ghunt_posts_email() {
    let (upstream, captured) = common::start_mock_upstream(200, r#"{"profile": {}}"#).await;
    let gateway = common::start_gateway(upstream).await;

    let res = gateway
        .client
        .post(gateway.url("/oathnet_ghunt"))
        .json(&json!({"email": "a@b.c"}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let request = &captured.all()[0];
    assert_eq!(request.target, "/api/oathnet/ghunt");
    assert_eq!(request.json_body(), json!({"email": "a@b.c"}));
}

#[tokio::test]
async fn test_generic_search_synthesizes_body() {
    let (upstream, captured) = common::start_mock_upstream(200, r#"{"hits": 1}"#).await;
    let gateway = common::start_gateway(upstream).await;

    let res = gateway
        .client
        .post(gateway.url("/search"))
        .json(&json!({
            "endpoint": "/api/search",
            "search_type": "username",
            "query": "bob"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = gateway
        .client
        .post(gateway.url("/search"))
        .json(&json!({
            "endpoint": "/api/oathnet/search",
            "query": "bob",
            "post_body": {"custom": 1}
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let requests = captured.all();
    assert_eq!(requests[0].target, "/api/search");
    assert_eq!(
        requests[0].json_body(),
        json!({"field": [{"username": "bob"}]})
    );
    assert_eq!(requests[1].target, "/api/oathnet/search");
    assert_eq!(requests[1].json_body(), json!({"custom": 1}));
}

#[tokio::test]
async fn test_generic_search_forwards_missing_inputs_as_null() {
    let (upstream, captured) = common::start_mock_upstream(200, r#"{"ok": true}"#).await;
    let gateway = common::start_gateway(upstream).await;

    for body in [
        json!({"endpoint": "/api/search", "query": "bob", "is_get": null}),
        json!({"endpoint": "/api/oathnet/ghunt"}),
    ] {
        let res = gateway
            .client
            .post(gateway.url("/search"))
            .json(&body)
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
    }

    let requests = captured.all();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].method, "POST");
    assert_eq!(requests[0].json_body(), json!({"field": [{"null": "bob"}]}));
    assert_eq!(requests[1].target, "/api/oathnet/ghunt");
    assert_eq!(requests[1].json_body(), json!({"email": null}));
}

#[tokio::test]
async fn test_generic_search_direct_get() {
    let (upstream, captured) = common::start_mock_upstream(200, r#"{"credit": 1, "x": 2}"#).await;
    let gateway = common::start_gateway(upstream).await;

    let res = gateway
        .client
        .post(gateway.url("/search"))
        .json(&json!({
            "endpoint": "/api/leakcheck",
            "is_get": true,
            "params": {"term": "bob"}
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.json::<Value>().await.unwrap(), json!({"x": 2}));

    let request = &captured.all()[0];
    assert_eq!(request.method, "GET");
    assert_eq!(request.target, "/api/leakcheck?term=bob");
    assert_eq!(request.header("x-api-key"), Some(TEST_API_KEY));
}

#[tokio::test]
async fn test_ping_and_health_never_call_upstream() {
    let (upstream, captured) = common::start_mock_upstream(200, "{}").await;
    let gateway = common::start_gateway(upstream).await;

    let res = gateway.client.get(gateway.url("/ping")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.text().await.unwrap(), "API is online.");

    let res = gateway.client.get(gateway.url("/health")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["status"], "healthy");

    assert_eq!(captured.len(), 0);
}

#[tokio::test]
async fn test_response_carries_request_id() {
    let (upstream, _) = common::start_mock_upstream(200, "{}").await;
    let gateway = common::start_gateway(upstream).await;

    let res = gateway.client.get(gateway.url("/ping")).send().await.unwrap();
    let id = res.headers().get("x-request-id").unwrap().to_str().unwrap();
    assert!(uuid::Uuid::parse_str(id).is_ok());
}
