//! Core components for talking to the Veridu API.
//!
//! This crate implements the authenticated request protocol every endpoint
//! of the service is reached through.
//!
//! ## Overview
//!
//! - **Context**: A container that holds implementations for HTTP sending and environment access
//! - **Credential**: The immutable client id, shared secret, api version and base url
//! - **RequestSigner**: Builds the HMAC-SHA1 signed, nonce carrying payload of signed calls
//! - **Client**: Performs unsigned (`fetch`) and signed (`signed_fetch`) calls and
//!   validates the response envelope
//! - **SessionStore**: Holds the session token sent with every call
//!
//! ## Example
//!
//! ```no_run
//! use veridu_core::{Client, Config, Context, Method, OsEnv, Result};
//!
//! # async fn example() -> Result<()> {
//! // Plug a real transport in with `with_http_send`.
//! let ctx = Context::new().with_env(OsEnv);
//! let credential = Config::new().with_version("0.3").from_env(&ctx).credential()?;
//! let client = Client::new(ctx, credential);
//!
//! client.session().create(false).await?;
//! let profile = client.fetch(Method::GET, "profile/jon_doe", [("filter", "kba")]).await?;
//! # let _ = profile;
//! # Ok(())
//! # }
//! ```
//!
//! ## Utilities
//!
//! - [`hash`]: Cryptographic hashing utilities
//! - [`time`]: Time manipulation utilities
//! - [`utils`]: Data redaction and username validation

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

pub mod hash;
pub mod time;
pub mod utils;

#[allow(missing_docs)]
pub mod constants;

mod error;
pub use error::{Error, ErrorKind, Result};
mod context;
pub use context::{Context, Env, HttpSend, NoopEnv, NoopHttpSend, OsEnv, StaticEnv};
mod config;
pub use config::{Config, Credential};
mod store;
pub use store::{MemorySessionStore, SessionStore};
mod nonce;
pub use nonce::Nonce;
mod signer;
pub use signer::RequestSigner;
mod client;
pub use client::{Client, Object, Payload};
mod session;
pub use session::Session;

pub use http::Method;
