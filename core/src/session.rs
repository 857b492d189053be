use http::Method;
use log::debug;
use serde_json::Value;

use crate::{Client, Error, Object, Result};

/// Session drives the session lifecycle of a [`Client`].
///
/// Every call is signed. Results are written into the client's
/// [`crate::SessionStore`], so later calls pick the token up automatically.
#[derive(Debug, Clone, Copy)]
pub struct Session<'a> {
    client: &'a Client,
}

impl Client {
    /// Session lifecycle helper bound to this client.
    pub fn session(&self) -> Session<'_> {
        Session { client: self }
    }
}

impl Session<'_> {
    /// Create a new session and store its token and expiry.
    ///
    /// A readonly session can only be used to read data.
    pub async fn create(&self, readonly: bool) -> Result<String> {
        let resource = if readonly {
            "session/read"
        } else {
            "session/write"
        };

        let resp = self.signed(Method::POST, resource).await?;
        let token = match resp.get("token") {
            Some(Value::String(v)) if !v.is_empty() => v.clone(),
            _ => return Err(Error::invalid_response("session response has no token")),
        };
        let expires = expires_of(&resp)?;

        let store = self.client.session_store();
        store.purge_session();
        store.set_session_token(&token);
        store.set_session_expires(expires);
        debug!("session created, expires at {expires}");

        Ok(token)
    }

    /// Extend the current session and return its new expiry.
    pub async fn extend(&self) -> Result<i64> {
        let token = self.token()?;

        let resp = self.signed(Method::PUT, &format!("session/{token}")).await?;
        let expires = expires_of(&resp)?;

        self.client.session_store().set_session_expires(expires);
        debug!("session extended, expires at {expires}");

        Ok(expires)
    }

    /// Expire the current session and purge the store.
    pub async fn expire(&self) -> Result<()> {
        let token = self.token()?;

        self.client
            .signed_fetch(Method::DELETE, &format!("session/{token}"), None::<&str>)
            .await?;
        self.client.session_store().purge_session();
        debug!("session expired");

        Ok(())
    }

    fn token(&self) -> Result<String> {
        let store = self.client.session_store();
        if store.is_session_empty() {
            return Err(Error::empty_session("no session to operate on"));
        }
        store
            .session_token()
            .ok_or_else(|| Error::empty_session("no session to operate on"))
    }

    async fn signed(&self, method: Method, resource: &str) -> Result<Object> {
        self.client
            .signed_fetch(method, resource, None::<&str>)
            .await?
            .ok_or_else(|| Error::invalid_response(format!("{resource} returned no data")))
    }
}

fn expires_of(resp: &Object) -> Result<i64> {
    resp.get("expires")
        .and_then(Value::as_i64)
        .ok_or_else(|| Error::invalid_response("session response has no expires"))
}
