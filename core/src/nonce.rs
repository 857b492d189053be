use std::fmt::{Display, Formatter};

use rand::rngs::OsRng;
use rand::RngCore;

use crate::constants::NONCE_LEN;

/// Nonce is the single-use token embedded in a signed request.
///
/// The service echoes it back in the response; a different echo means the
/// response does not belong to our request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Nonce(String);

impl Nonce {
    /// Draw a fresh nonce from the operating system's CSPRNG.
    pub fn generate() -> Self {
        let mut bs = [0u8; NONCE_LEN];
        OsRng.fill_bytes(&mut bs);
        Nonce(hex::encode(bs))
    }

    #[cfg(test)]
    pub(crate) fn from_hex(v: &str) -> Self {
        Nonce(v.to_string())
    }

    /// Hex representation as sent on the wire.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check an echoed value against this nonce.
    pub fn matches(&self, echoed: &str) -> bool {
        self.0 == echoed
    }
}

impl Display for Nonce {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
