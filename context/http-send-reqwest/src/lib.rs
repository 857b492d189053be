//! Reqwest-based HTTP transport for veridu.
//!
//! This crate provides `ReqwestHttpSend`, which implements the `HttpSend`
//! trait from `veridu_core` on top of a [`reqwest::Client`].
//!
//! ## Example
//!
//! ```no_run
//! use veridu_core::Context;
//! use veridu_http_send_reqwest::ReqwestHttpSend;
//!
//! let ctx = Context::new().with_http_send(ReqwestHttpSend::default());
//! ```

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use log::debug;
use reqwest::Client;
use veridu_core::{Error, HttpSend, Result};

/// Time allowed to establish a connection.
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
/// Time allowed for the whole request once connected.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// ReqwestHttpSend sends requests with a [`reqwest::Client`].
///
/// The response body is returned for every status code; the service reports
/// failures inside the JSON body.
#[derive(Debug, Clone)]
pub struct ReqwestHttpSend {
    client: Client,
}

impl Default for ReqwestHttpSend {
    /// Build a client with [`CONNECT_TIMEOUT`] and [`REQUEST_TIMEOUT`].
    ///
    /// # Panics
    ///
    /// Panics like [`reqwest::Client::new`] if the TLS backend cannot be
    /// initialized.
    fn default() -> Self {
        let client = Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("reqwest client must be buildable");
        Self { client }
    }
}

impl ReqwestHttpSend {
    /// Create a new ReqwestHttpSend with a reqwest::Client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpSend for ReqwestHttpSend {
    async fn http_send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
        let req = reqwest::Request::try_from(req)
            .map_err(|e| Error::request_failed("invalid request").with_source(e))?;
        debug!("reqwest sending: {} {}", req.method(), req.url());

        let resp = self
            .client
            .execute(req)
            .await
            .map_err(|e| Error::request_failed("failed to send request").with_source(e))?;

        let mut builder = http::Response::builder()
            .status(resp.status())
            .version(resp.version());
        if let Some(headers) = builder.headers_mut() {
            headers.extend(resp.headers().clone());
        }
        let body = resp
            .bytes()
            .await
            .map_err(|e| Error::request_failed("failed to read response body").with_source(e))?;

        Ok(builder.body(body)?)
    }
}
