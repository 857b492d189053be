use std::sync::atomic::{AtomicU16, Ordering};
use std::sync::Arc;

use bytes::Bytes;
use http::header::{CONTENT_LENGTH, CONTENT_TYPE};
use http::{Method, StatusCode};
use log::{debug, warn};
use serde_json::Value;

use crate::constants::*;
use crate::utils::validate_username;
use crate::{
    Context, Credential, Error, ErrorKind, MemorySessionStore, Nonce, RequestSigner, Result,
    SessionStore,
};

/// JSON object returned by the service.
pub type Object = serde_json::Map<String, Value>;

/// Payload is the data attached to a request.
///
/// `GET` requests carry it as query string, every other method as a form
/// encoded body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Payload {
    /// No data.
    #[default]
    Empty,
    /// Key/value pairs, form encoded when sent.
    Form(Vec<(String, String)>),
    /// A pre-built, already encoded string.
    Raw(String),
}

impl Payload {
    /// Encode the payload, returns `None` if there is nothing to send.
    pub fn encode(&self) -> Option<String> {
        match self {
            Payload::Empty => None,
            Payload::Form(pairs) if pairs.is_empty() => None,
            Payload::Form(pairs) => Some(
                form_urlencoded::Serializer::new(String::new())
                    .extend_pairs(pairs)
                    .finish(),
            ),
            Payload::Raw(s) if s.is_empty() => None,
            Payload::Raw(s) => Some(s.clone()),
        }
    }
}

impl From<&str> for Payload {
    fn from(v: &str) -> Self {
        Payload::Raw(v.to_string())
    }
}

impl From<String> for Payload {
    fn from(v: String) -> Self {
        Payload::Raw(v)
    }
}

impl<K: Into<String>, V: Into<String>> From<Vec<(K, V)>> for Payload {
    fn from(v: Vec<(K, V)>) -> Self {
        Payload::Form(v.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl<K: Into<String>, V: Into<String>, const N: usize> From<[(K, V); N]> for Payload {
    fn from(v: [(K, V); N]) -> Self {
        Payload::Form(v.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl<T: Into<Payload>> From<Option<T>> for Payload {
    fn from(v: Option<T>) -> Self {
        v.map_or(Payload::Empty, Into::into)
    }
}

/// Client is the gateway every endpoint goes through.
///
/// It performs unsigned calls with [`Client::fetch`] and signed, nonce
/// protected calls with [`Client::signed_fetch`]. Neither retries: a single
/// failed attempt is a failed call.
#[derive(Debug, Clone)]
pub struct Client {
    ctx: Context,
    credential: Credential,
    signer: RequestSigner,
    store: Arc<dyn SessionStore>,
    // 0 means no response has been seen yet.
    last_status: Arc<AtomicU16>,
}

impl Client {
    /// Create a new client with an empty in-memory session store.
    pub fn new(ctx: Context, credential: Credential) -> Self {
        Self {
            ctx,
            signer: RequestSigner::new(&credential),
            credential,
            store: Arc::new(MemorySessionStore::new()),
            last_status: Arc::new(AtomicU16::new(0)),
        }
    }

    /// Replace the session store.
    pub fn with_session_store(mut self, store: Arc<dyn SessionStore>) -> Self {
        self.store = store;
        self
    }

    /// Replace the request signer.
    ///
    /// Mostly useful to pin the signing time in tests.
    pub fn with_signer(mut self, signer: RequestSigner) -> Self {
        self.signer = signer;
        self
    }

    /// Credential this client was built with.
    pub fn credential(&self) -> &Credential {
        &self.credential
    }

    /// Session store read on every call.
    pub fn session_store(&self) -> &Arc<dyn SessionStore> {
        &self.store
    }

    /// HTTP status code of the last response, for diagnostics only.
    pub fn last_status(&self) -> Option<StatusCode> {
        match self.last_status.load(Ordering::Relaxed) {
            0 => None,
            v => StatusCode::from_u16(v).ok(),
        }
    }

    /// Check a username before it is placed into a resource path.
    pub fn ensure_username(username: &str) -> Result<()> {
        if username.is_empty() {
            return Err(Error::empty_username("username must not be empty"));
        }
        if !validate_username(username) {
            return Err(Error::invalid_username(format!(
                "username {username:?} contains characters outside [A-Za-z0-9_-]"
            )));
        }
        Ok(())
    }

    /// Perform an unsigned call and return the response envelope.
    ///
    /// # Errors
    ///
    /// - [`ErrorKind::RequestFailed`] if the transport fails.
    /// - [`ErrorKind::EmptyResponse`] if the body is empty.
    /// - [`ErrorKind::InvalidFormat`] if the body is not a JSON object.
    /// - [`ErrorKind::InvalidResponse`] if the object has no `status`.
    /// - [`ErrorKind::Api`] if `status` is false.
    pub async fn fetch(
        &self,
        method: Method,
        resource: &str,
        data: impl Into<Payload>,
    ) -> Result<Object> {
        let data = data.into().encode();

        let mut url = self.credential.endpoint(resource);
        let body = match data {
            Some(query) if method == Method::GET => {
                url.push(if url.contains('?') { '&' } else { '?' });
                url.push_str(&query);
                None
            }
            data => data,
        };

        let mut req = http::Request::builder()
            .method(method.clone())
            .uri(url.as_str())
            .header(VERIDU_CLIENT, self.credential.client_id());
        if let Some(token) = self.store.session_token().filter(|v| !v.is_empty()) {
            req = req.header(VERIDU_SESSION, token);
        }
        if let Some(body) = &body {
            req = req
                .header(CONTENT_TYPE, FORM_URLENCODED)
                .header(CONTENT_LENGTH, body.len().to_string());
        }
        let req = req.body(body.map(Bytes::from).unwrap_or_default())?;

        debug!("sending request: {method} {url}");
        let resp = self.ctx.http_send(req).await.map_err(|err| {
            Error::request_failed(format!("request {method} {resource} failed")).with_source(err)
        })?;
        self.last_status.store(resp.status().as_u16(), Ordering::Relaxed);
        debug!("got response: {method} {url} {}", resp.status());

        parse_envelope(resp.body())
    }

    /// Perform a signed call and verify the echoed nonce.
    ///
    /// Returns `Ok(None)` when the service answers with an empty body. On
    /// success the `nonce` field is removed from the returned object.
    ///
    /// # Errors
    ///
    /// Every error of [`Client::fetch`] except [`ErrorKind::EmptyResponse`],
    /// plus [`ErrorKind::SignatureFailure`] and [`ErrorKind::NonceMismatch`].
    pub async fn signed_fetch(
        &self,
        method: Method,
        resource: &str,
        data: impl Into<Payload>,
    ) -> Result<Option<Object>> {
        let nonce = Nonce::generate();
        let signed = self.signer.sign_request(&method, resource, &nonce)?;

        let payload = match data.into().encode() {
            Some(data) => format!("{signed}&{data}"),
            None => signed,
        };

        let mut resp = match self.fetch(method.clone(), resource, payload).await {
            Ok(resp) => resp,
            Err(err) if err.kind() == ErrorKind::EmptyResponse => {
                debug!("signed request {method} {resource} got empty response");
                return Ok(None);
            }
            Err(err) => return Err(err),
        };

        // fetch has already rejected `status: false`, only successful
        // envelopes reach the nonce check.
        match resp.remove("nonce") {
            Some(Value::String(echoed)) if nonce.matches(&echoed) => Ok(Some(resp)),
            echoed => {
                warn!(
                    "signed request {method} {resource} nonce mismatch: sent {nonce}, got {echoed:?}"
                );
                Err(Error::nonce_mismatch(format!(
                    "nonce mismatch for {method} {resource}"
                )))
            }
        }
    }
}

/// Parse and validate the response envelope.
fn parse_envelope(body: &[u8]) -> Result<Object> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(Error::empty_response("response body is empty"));
    }

    let value: Value = serde_json::from_slice(body)
        .map_err(|err| Error::invalid_format("response body is not json").with_source(err))?;
    let Value::Object(obj) = value else {
        return Err(Error::invalid_format("response body is not a json object"));
    };

    let status = obj
        .get("status")
        .ok_or_else(|| Error::invalid_response("response has no status field"))?;
    if !is_truthy(status) {
        let message = match obj.get("error").and_then(|v| v.get("message")) {
            Some(Value::String(v)) => v.clone(),
            Some(v) => v.to_string(),
            None => "unknown api error".to_string(),
        };
        warn!("service rejected request: {message}");
        return Err(Error::api(message));
    }

    Ok(obj)
}

fn is_truthy(v: &Value) -> bool {
    match v {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|v| v != 0.0),
        Value::String(s) => !s.is_empty() && s != "0" && s != "false",
        Value::Null => false,
        Value::Array(_) | Value::Object(_) => true,
    }
}
