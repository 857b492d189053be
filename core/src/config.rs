// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use std::fmt::{Debug, Formatter};

use crate::constants::*;
use crate::utils::Redact;
use crate::{Context, Error, Result};

/// Config carries all the configuration for the Veridu API.
#[derive(Clone, Default)]
pub struct Config {
    /// `client_id` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`VERIDU_CLIENT_ID`]
    pub client_id: Option<String>,
    /// `secret` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`VERIDU_SECRET`]
    pub secret: Option<String>,
    /// `version` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`VERIDU_API_VERSION`]
    pub version: Option<String>,
    /// `base_url` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`VERIDU_BASE_URL`]
    /// - default to [`DEFAULT_BASE_URL`]
    pub base_url: Option<String>,
}

impl Config {
    /// Create a new Config
    pub fn new() -> Self {
        Self::default()
    }

    /// Set client_id
    pub fn with_client_id(mut self, client_id: impl Into<String>) -> Self {
        self.client_id = Some(client_id.into());
        self
    }

    /// Set secret
    pub fn with_secret(mut self, secret: impl Into<String>) -> Self {
        self.secret = Some(secret.into());
        self
    }

    /// Set api version
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Set base_url
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Load config from env.
    ///
    /// Values already set on this config are kept.
    pub fn from_env(mut self, ctx: &Context) -> Self {
        if let Some(v) = ctx.env_var(VERIDU_CLIENT_ID) {
            self.client_id.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(VERIDU_SECRET) {
            self.secret.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(VERIDU_API_VERSION) {
            self.version.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(VERIDU_BASE_URL) {
            self.base_url.get_or_insert(v);
        }

        self
    }

    /// Validate this config and freeze it into a [`Credential`].
    pub fn credential(&self) -> Result<Credential> {
        // Blank values are rejected, others are kept byte for byte.
        let required = |v: &Option<String>, name: &str| -> Result<String> {
            match v.as_deref() {
                Some(v) if !v.trim().is_empty() => Ok(v.to_string()),
                _ => Err(Error::config_invalid(format!("{name} is required"))),
            }
        };

        let client_id = required(&self.client_id, "client_id")?;
        let secret = required(&self.secret, "secret")?;
        let version = required(&self.version, "version")?;
        let version = version.trim().trim_matches('/').to_string();
        if version.is_empty() {
            return Err(Error::config_invalid("version must not be only slashes"));
        }

        let base_url = self
            .base_url
            .as_deref()
            .unwrap_or(DEFAULT_BASE_URL)
            .trim_end_matches('/')
            .to_string();
        if !base_url.starts_with("https://") && !base_url.starts_with("http://") {
            return Err(Error::config_invalid(format!(
                "base_url must be an http(s) url, got {base_url}"
            )));
        }

        Ok(Credential {
            client_id,
            secret,
            version,
            base_url,
        })
    }
}

impl Debug for Config {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("client_id", &self.client_id)
            .field("secret", &self.secret.as_ref().map(Redact::from))
            .field("version", &self.version)
            .field("base_url", &self.base_url)
            .finish()
    }
}

/// Credential is the validated, immutable form of [`Config`].
///
/// To rotate a secret, build a new credential and a new client.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    client_id: String,
    secret: String,
    version: String,
    base_url: String,
}

impl Credential {
    /// Create a credential against the production service.
    pub fn new(
        client_id: impl Into<String>,
        secret: impl Into<String>,
        version: impl Into<String>,
    ) -> Result<Self> {
        Config::new()
            .with_client_id(client_id)
            .with_secret(secret)
            .with_version(version)
            .credential()
    }

    /// Client id sent in every request.
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// Shared secret used as HMAC key.
    pub fn secret(&self) -> &str {
        &self.secret
    }

    /// Api version, without slashes.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Base url, without trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build `<base-url>/<version>/<resource>` with exactly one `/` between
    /// version and resource.
    pub fn endpoint(&self, resource: &str) -> String {
        format!(
            "{}/{}/{}",
            self.base_url,
            self.version,
            resource.trim_start_matches('/')
        )
    }
}

impl Debug for Credential {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("client_id", &self.client_id)
            .field("secret", &Redact::from(&self.secret))
            .field("version", &self.version)
            .field("base_url", &self.base_url)
            .finish()
    }
}
