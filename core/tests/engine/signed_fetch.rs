use http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;
use veridu_core::{ErrorKind, Method, Payload, Result};

use super::{client, MockHttpSend, TIMESTAMP};

#[tokio::test]
async fn test_signed_fetch_strips_matching_nonce() -> Result<()> {
    let mock = MockHttpSend::echo(json!({"status": true, "id": 42}));

    let resp = client(&mock)
        .signed_fetch(Method::POST, "user/jon_doe", Payload::Empty)
        .await?
        .expect("response must not be empty");

    assert_eq!(serde_json::Value::Object(resp), json!({"status": true, "id": 42}));
    Ok(())
}

#[tokio::test]
async fn test_signed_fetch_payload() -> Result<()> {
    let mock = MockHttpSend::echo(json!({"status": true}));

    client(&mock)
        .signed_fetch(Method::POST, "user/jon_doe?x=1", [("extra", "a b")])
        .await?;
    let req = mock.last();

    assert_eq!(req.uri, "https://api.veridu.com/0.3/user/jon_doe?x=1");
    let keys: Vec<String> = form_urlencoded::parse(req.body.as_bytes())
        .map(|(k, _)| k.into_owned())
        .collect();
    assert_eq!(
        keys,
        vec![
            "client",
            "method",
            "nonce",
            "resource",
            "timestamp",
            "version",
            "signature",
            "extra"
        ]
    );
    assert_eq!(req.field("client").as_deref(), Some("client"));
    assert_eq!(req.field("method").as_deref(), Some("POST"));
    assert_eq!(
        req.field("resource").as_deref(),
        Some("https://api.veridu.com/0.3/user/jon_doe")
    );
    assert_eq!(req.field("timestamp"), Some(TIMESTAMP.to_string()));
    assert_eq!(req.field("version").as_deref(), Some("0.3"));
    assert_eq!(req.field("extra").as_deref(), Some("a b"));

    let nonce = req.field("nonce").expect("nonce must be sent");
    assert_eq!(nonce.len(), 20);
    assert_eq!(req.field("signature").map(|v| v.len()), Some(40));

    Ok(())
}

#[tokio::test]
async fn test_signed_fetch_get_carries_payload_in_query() -> Result<()> {
    let mock = MockHttpSend::echo(json!({"status": true}));

    client(&mock)
        .signed_fetch(Method::GET, "profile/jon_doe", [("filter", "kba")])
        .await?;
    let req = mock.last();

    assert!(req
        .uri
        .starts_with("https://api.veridu.com/0.3/profile/jon_doe?client=client&method=GET&"));
    assert!(req.uri.ends_with("&filter=kba"));
    assert_eq!(req.body, "");

    Ok(())
}

#[tokio::test]
async fn test_signed_fetch_get_on_resource_with_query() -> Result<()> {
    let mock = MockHttpSend::echo(json!({"status": true}));

    let resp = client(&mock)
        .signed_fetch(Method::GET, "profile?x=1", Payload::Empty)
        .await?;
    assert!(resp.is_some());
    let req = mock.last();

    assert!(req
        .uri
        .starts_with("https://api.veridu.com/0.3/profile?x=1&client=client&method=GET&"));
    assert_eq!(req.field("x").as_deref(), Some("1"));
    assert_eq!(
        req.field("resource").as_deref(),
        Some("https://api.veridu.com/0.3/profile")
    );
    assert_eq!(req.body, "");

    Ok(())
}

#[tokio::test]
async fn test_signed_fetch_uses_fresh_nonce() -> Result<()> {
    let mock = MockHttpSend::echo(json!({"status": true}));
    let client = client(&mock);

    client
        .signed_fetch(Method::GET, "profile", Payload::Empty)
        .await?;
    client
        .signed_fetch(Method::GET, "profile", Payload::Empty)
        .await?;

    let requests = mock.requests();
    assert_eq!(requests.len(), 2);
    assert_ne!(requests[0].field("nonce"), requests[1].field("nonce"));
    assert_ne!(requests[0].field("signature"), requests[1].field("signature"));

    Ok(())
}

#[tokio::test]
async fn test_signed_fetch_nonce_mismatch() {
    let mock = MockHttpSend::body(r#"{"status":true,"nonce":"00000000000000000000"}"#);

    let err = client(&mock)
        .signed_fetch(Method::GET, "profile", Payload::Empty)
        .await
        .expect_err("nonce must not match");
    assert_eq!(err.kind(), ErrorKind::NonceMismatch);
}

#[tokio::test]
async fn test_signed_fetch_missing_nonce() {
    let mock = MockHttpSend::body(r#"{"status":true}"#);

    let err = client(&mock)
        .signed_fetch(Method::GET, "profile", Payload::Empty)
        .await
        .expect_err("nonce is required");
    assert_eq!(err.kind(), ErrorKind::NonceMismatch);
}

#[tokio::test]
async fn test_signed_fetch_empty_body_is_none() -> Result<()> {
    let mock = MockHttpSend::new(|_| Ok((StatusCode::NO_CONTENT, String::new())));

    let resp = client(&mock)
        .signed_fetch(Method::DELETE, "session/token", Payload::Empty)
        .await?;
    assert!(resp.is_none());

    Ok(())
}

#[tokio::test]
async fn test_signed_fetch_propagates_fetch_errors() {
    let mock = MockHttpSend::body(r#"{"status":false,"error":{"message":"bad signature"}}"#);
    let err = client(&mock)
        .signed_fetch(Method::GET, "profile", Payload::Empty)
        .await
        .expect_err("api error must propagate");
    assert_eq!(err.kind(), ErrorKind::Api);
    assert_eq!(err.message(), "bad signature");

    let mock = MockHttpSend::body("<html>");
    let err = client(&mock)
        .signed_fetch(Method::GET, "profile", Payload::Empty)
        .await
        .expect_err("invalid format must propagate");
    assert_eq!(err.kind(), ErrorKind::InvalidFormat);

    let mock = MockHttpSend::failing();
    let err = client(&mock)
        .signed_fetch(Method::GET, "profile", Payload::Empty)
        .await
        .expect_err("transport failure must propagate");
    assert_eq!(err.kind(), ErrorKind::RequestFailed);
}
