use http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::Arc;
use test_case::test_case;
use veridu_core::{ErrorKind, MemorySessionStore, Method, Payload, Result};

use super::{client, MockHttpSend};

#[test_case("" ; "empty body")]
#[test_case("not json" ; "not json")]
#[test_case(r#"{"no_status":1}"# ; "no status")]
#[test_case(r#"{"status":false,"error":{"message":"bad"}}"# ; "api error")]
#[tokio::test]
async fn test_fetch_envelope_errors(body: &str) {
    let mock = MockHttpSend::body(body);
    let err = client(&mock)
        .fetch(Method::GET, "profile", Payload::Empty)
        .await
        .expect_err("fetch must fail");

    let expected = match body {
        "" => ErrorKind::EmptyResponse,
        "not json" => ErrorKind::InvalidFormat,
        r#"{"no_status":1}"# => ErrorKind::InvalidResponse,
        _ => ErrorKind::Api,
    };
    assert_eq!(err.kind(), expected);
    if expected == ErrorKind::Api {
        assert_eq!(err.message(), "bad");
    }
}

#[tokio::test]
async fn test_fetch_returns_envelope() -> Result<()> {
    let mock = MockHttpSend::body(r#"{"status":true,"x":1}"#);
    let resp = client(&mock)
        .fetch(Method::GET, "profile", Payload::Empty)
        .await?;

    assert_eq!(serde_json::Value::Object(resp), json!({"status": true, "x": 1}));
    Ok(())
}

#[tokio::test]
async fn test_fetch_get_appends_query() -> Result<()> {
    let mock = MockHttpSend::body(r#"{"status":true}"#);
    let client = client(&mock);

    client
        .fetch(Method::GET, "resource", [("filter", "kba")])
        .await?;
    let req = mock.last();
    assert_eq!(req.uri, "https://api.veridu.com/0.3/resource?filter=kba");
    assert_eq!(req.body, "");
    assert!(req.headers.get(http::header::CONTENT_TYPE).is_none());

    client
        .fetch(Method::GET, "/resource?page=2", [("filter", "kba")])
        .await?;
    assert_eq!(
        mock.last().uri,
        "https://api.veridu.com/0.3/resource?page=2&filter=kba"
    );

    Ok(())
}

#[tokio::test]
async fn test_fetch_post_sends_form_body() -> Result<()> {
    let mock = MockHttpSend::body(r#"{"status":true}"#);

    client(&mock)
        .fetch(Method::POST, "resource", [("a", "b")])
        .await?;
    let req = mock.last();
    assert_eq!(req.method, Method::POST);
    assert_eq!(req.uri, "https://api.veridu.com/0.3/resource");
    assert_eq!(req.body, "a=b");
    assert_eq!(
        req.headers[http::header::CONTENT_TYPE],
        "application/x-www-form-urlencoded"
    );
    assert_eq!(req.headers[http::header::CONTENT_LENGTH], "3");

    Ok(())
}

#[tokio::test]
async fn test_fetch_headers() -> Result<()> {
    let mock = MockHttpSend::body(r#"{"status":true}"#);

    let client = client(&mock);
    client.fetch(Method::GET, "profile", Payload::Empty).await?;
    let req = mock.last();
    assert_eq!(req.headers["veridu-client"], "client");
    assert!(req.headers.get("veridy-session").is_none());

    let client = client.with_session_store(Arc::new(MemorySessionStore::with_session_token(
        "session-token",
    )));
    client.fetch(Method::GET, "profile", Payload::Empty).await?;
    let req = mock.last();
    assert_eq!(req.headers["veridu-client"], "client");
    assert_eq!(req.headers["veridy-session"], "session-token");
    assert!(req.headers.get("veridu-session").is_none());

    Ok(())
}

#[tokio::test]
async fn test_fetch_transport_failure() {
    let mock = MockHttpSend::failing();
    let client = client(&mock);

    let err = client
        .fetch(Method::GET, "profile", Payload::Empty)
        .await
        .expect_err("fetch must fail");
    assert_eq!(err.kind(), ErrorKind::RequestFailed);
    assert!(err.is_transport_error());
    assert_eq!(client.last_status(), None);
}

#[tokio::test]
async fn test_fetch_reads_body_of_error_status() -> Result<()> {
    let mock = MockHttpSend::new(|_| {
        Ok((
            StatusCode::BAD_REQUEST,
            r#"{"status":false,"error":{"message":"invalid filter"}}"#.to_string(),
        ))
    });
    let client = client(&mock);

    let err = client
        .fetch(Method::GET, "profile", [("filter", "nope")])
        .await
        .expect_err("fetch must fail");
    assert_eq!(err.kind(), ErrorKind::Api);
    assert_eq!(err.message(), "invalid filter");
    assert_eq!(client.last_status(), Some(StatusCode::BAD_REQUEST));

    Ok(())
}
