//! Request signing for the Veridu API.
use std::fmt::Write;

use http::Method;
use log::debug;

use crate::hash::hex_hmac_sha1;
use crate::time::{now, DateTime};
use crate::{Credential, Nonce, Result};

/// RequestSigner produces the signed payload required by signed endpoints.
///
/// The payload is a form encoded string:
///
/// ```text
/// client=<id>&method=<METHOD>&nonce=<hex>&resource=<urlencoded canonical url>
///     &timestamp=<unix seconds>&version=<api version>&signature=<hex hmac-sha1>
/// ```
#[derive(Debug, Clone)]
pub struct RequestSigner {
    credential: Credential,
    time: Option<DateTime>,
}

impl RequestSigner {
    /// Create a signer for the given credential.
    pub fn new(credential: &Credential) -> Self {
        Self {
            credential: credential.clone(),
            time: None,
        }
    }

    /// Specify the signing time.
    ///
    /// # Note
    ///
    /// We should always take current time to sign requests.
    /// Only use this function for testing.
    pub fn with_time(mut self, time: DateTime) -> Self {
        self.time = Some(time);
        self
    }

    /// Canonical url of a resource: the full request url without query string.
    pub fn canonical_url(&self, resource: &str) -> String {
        let path = match resource.split_once('?') {
            Some((path, _)) => path,
            None => resource,
        };
        self.credential.endpoint(path)
    }

    /// Sign a call of `method` against `resource` with the given nonce.
    pub fn sign_request(&self, method: &Method, resource: &str, nonce: &Nonce) -> Result<String> {
        let now = self.time.unwrap_or_else(now);

        let canonical_url = self.canonical_url(resource);
        let mut s = string_to_sign(&self.credential, method, &canonical_url, nonce, now)?;
        let signature = hex_hmac_sha1(self.credential.secret().as_bytes(), s.as_bytes())?;

        write!(&mut s, "&signature={}", urlencode(&signature))?;
        Ok(s)
    }
}

/// Construct string to sign
///
/// ## Format
///
/// ```text
/// "client=" + ClientId +
/// "&method=" + Method +
/// "&nonce=" + Nonce +
/// "&resource=" + UrlEncode(CanonicalUrl) +
/// "&timestamp=" + UnixSeconds +
/// "&version=" + Version
/// ```
fn string_to_sign(
    cred: &Credential,
    method: &Method,
    canonical_url: &str,
    nonce: &Nonce,
    now: DateTime,
) -> Result<String> {
    let mut s = String::with_capacity(128 + canonical_url.len());
    write!(&mut s, "client={}", cred.client_id())?;
    write!(&mut s, "&method={}", method.as_str())?;
    write!(&mut s, "&nonce={nonce}")?;
    write!(&mut s, "&resource={}", urlencode(canonical_url))?;
    write!(&mut s, "&timestamp={}", now.timestamp())?;
    write!(&mut s, "&version={}", cred.version())?;

    debug!("string to sign: {}", &s);
    Ok(s)
}

/// `application/x-www-form-urlencoded` byte serialization.
fn urlencode(input: &str) -> String {
    form_urlencoded::byte_serialize(input.as_bytes()).collect()
}
