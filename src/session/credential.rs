//! Session credential signing.
//!
//! Turns a session identifier into the opaque token carried by the client
//! cookie and verifies tokens presented back to the server. Tokens have the
//! form `<session id>.<signature>` where the signature is an HMAC-SHA256 of
//! the identifier.

use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};

type HmacSha256 = Hmac<Sha256>;

const SIGNATURE_LEN: usize = 32;

#[derive(Clone)]
pub struct CredentialSigner {
    signing_key: [u8; 32],
}

impl CredentialSigner {
    /// Creates a signer whose key is derived from `secret`.
    #[must_use]
    pub fn new(secret: &str) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(secret.as_bytes());
        let result = hasher.finalize();
        let mut signing_key = [0u8; 32];
        signing_key.copy_from_slice(&result);
        Self { signing_key }
    }

    /// Produces the cookie token for `session_id`.
    #[must_use]
    pub fn sign(&self, session_id: &str) -> String {
        let mut mac = self.mac();
        mac.update(session_id.as_bytes());
        let signature = mac.finalize().into_bytes();
        format!("{session_id}.{}", URL_SAFE_NO_PAD.encode(signature))
    }

    /// Returns the session id carried by `token` if its signature is valid.
    #[must_use]
    pub fn verify(&self, token: &str) -> Option<String> {
        let (session_id, encoded_sig) = token.rsplit_once('.')?;
        if session_id.is_empty() {
            return None;
        }

        let signature = URL_SAFE_NO_PAD.decode(encoded_sig).ok()?;
        if signature.len() != SIGNATURE_LEN {
            return None;
        }

        let mut mac = self.mac();
        mac.update(session_id.as_bytes());
        mac.verify_slice(&signature).ok()?;
        Some(session_id.to_string())
    }

    /// # Panics
    ///
    /// Panics if HMAC initialization fails, which the fixed key size rules out.
    fn mac(&self) -> HmacSha256 {
        <HmacSha256 as Mac>::new_from_slice(&self.signing_key).expect("HMAC accepts any key size")
    }
}
