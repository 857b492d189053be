use pretty_assertions::assert_eq;
use serde_json::json;
use veridu_core::{ErrorKind, Method, Payload, Result};

use super::{client, MockHttpSend};

#[tokio::test]
async fn test_session_lifecycle() -> Result<()> {
    let mock = MockHttpSend::echo(json!({"status": true, "token": "abc", "expires": 1400003600}));
    let client = client(&mock);

    let token = client.session().create(false).await?;
    assert_eq!(token, "abc");
    let req = mock.last();
    assert_eq!(req.method, Method::POST);
    assert_eq!(req.uri, "https://api.veridu.com/0.3/session/write");

    let store = client.session_store();
    assert_eq!(store.session_token().as_deref(), Some("abc"));
    assert_eq!(store.session_expires(), Some(1400003600));

    // Later calls carry the session.
    client.fetch(Method::GET, "profile", Payload::Empty).await?;
    assert_eq!(mock.last().headers["veridy-session"], "abc");

    let expires = client.session().extend().await?;
    assert_eq!(expires, 1400003600);
    let req = mock.last();
    assert_eq!(req.method, Method::PUT);
    assert_eq!(req.uri, "https://api.veridu.com/0.3/session/abc");

    client.session().expire().await?;
    let req = mock.last();
    assert_eq!(req.method, Method::DELETE);
    assert_eq!(req.uri, "https://api.veridu.com/0.3/session/abc");
    assert!(client.session_store().is_session_empty());
    assert_eq!(client.session_store().session_expires(), None);

    Ok(())
}

#[tokio::test]
async fn test_session_create_readonly() -> Result<()> {
    let mock = MockHttpSend::echo(json!({"status": true, "token": "ro", "expires": 1}));

    client(&mock).session().create(true).await?;
    assert_eq!(mock.last().uri, "https://api.veridu.com/0.3/session/read");

    Ok(())
}

#[tokio::test]
async fn test_session_create_without_token() {
    let mock = MockHttpSend::echo(json!({"status": true, "expires": 1}));

    let client = client(&mock);
    let err = client
        .session()
        .create(false)
        .await
        .expect_err("token is required");
    assert_eq!(err.kind(), ErrorKind::InvalidResponse);
    assert!(client.session_store().is_session_empty());
}

#[tokio::test]
async fn test_session_requires_token() {
    let mock = MockHttpSend::echo(json!({"status": true}));
    let client = client(&mock);

    let err = client
        .session()
        .extend()
        .await
        .expect_err("no session yet");
    assert_eq!(err.kind(), ErrorKind::EmptySession);

    let err = client
        .session()
        .expire()
        .await
        .expect_err("no session yet");
    assert_eq!(err.kind(), ErrorKind::EmptySession);
    assert!(mock.requests().is_empty());
}
