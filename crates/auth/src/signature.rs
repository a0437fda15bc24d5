//! Compact (JWS-style) token signatures.
//!
//! A token is `header.payload.signature`, where `signature` is
//! HMAC-SHA256(secret, `header.payload`) encoded as base64url without padding.
//! The header and payload segments are opaque here: nothing is decoded until
//! the signature has been accepted.

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Shared secret the identity provider signs webhooks with.
#[derive(Clone, PartialEq, Eq)]
pub struct WebhookSecret(Vec<u8>);

impl WebhookSecret {
    pub fn new(secret: impl Into<Vec<u8>>) -> Self {
        Self(secret.into())
    }

    pub fn key_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl core::fmt::Debug for WebhookSecret {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("WebhookSecret(***)")
    }
}

impl From<String> for WebhookSecret {
    fn from(value: String) -> Self {
        Self(value.into_bytes())
    }
}

impl From<&str> for WebhookSecret {
    fn from(value: &str) -> Self {
        Self(value.as_bytes().to_vec())
    }
}

/// The three segments of a compact token, not yet verified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompactToken<'a> {
    pub header: &'a str,
    pub payload: &'a str,
    pub signature: &'a str,
}

impl<'a> CompactToken<'a> {
    /// Split `token` into exactly three non-empty segments.
    pub fn parse(token: &'a str) -> Option<Self> {
        let mut segments = token.split('.');
        let header = segments.next().filter(|s| !s.is_empty())?;
        let payload = segments.next().filter(|s| !s.is_empty())?;
        let signature = segments.next().filter(|s| !s.is_empty())?;
        if segments.next().is_some() {
            return None;
        }

        Some(Self {
            header,
            payload,
            signature,
        })
    }

    /// Check the signature segment against `secret`.
    ///
    /// The supplied segment must be the exact canonical base64url encoding of
    /// the expected MAC: padded, standard-alphabet or otherwise re-encoded
    /// variants fail to decode. The MAC comparison is constant-time.
    pub fn verify(&self, secret: &WebhookSecret) -> bool {
        let Ok(supplied) = URL_SAFE_NO_PAD.decode(self.signature) else {
            return false;
        };

        signing_mac(self.header, self.payload, secret)
            .verify_slice(&supplied)
            .is_ok()
    }
}

/// Verify a compact token against `secret`.
///
/// Fails for anything that is not three non-empty `.`-separated segments.
pub fn verify(token: &str, secret: &WebhookSecret) -> bool {
    CompactToken::parse(token).is_some_and(|token| token.verify(secret))
}

/// Sign already-encoded `header` and `payload` segments, returning the full
/// compact token.
pub fn sign(header: &str, payload: &str, secret: &WebhookSecret) -> String {
    let mac = signing_mac(header, payload, secret).finalize().into_bytes();
    let signature = URL_SAFE_NO_PAD.encode(mac);
    format!("{header}.{payload}.{signature}")
}

fn signing_mac(header: &str, payload: &str, secret: &WebhookSecret) -> HmacSha256 {
    let mut mac =
        HmacSha256::new_from_slice(secret.key_bytes()).expect("HMAC accepts keys of any length");
    mac.update(header.as_bytes());
    mac.update(b".");
    mac.update(payload.as_bytes());
    mac
}
