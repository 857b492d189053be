use veridu_core::{Context, OsEnv};
use veridu_http_send_reqwest::ReqwestHttpSend;

/// Build a [`Context`] that sends requests with reqwest and reads the
/// process environment.
pub fn default_context() -> Context {
    Context::new()
        .with_http_send(ReqwestHttpSend::default())
        .with_env(OsEnv)
}
