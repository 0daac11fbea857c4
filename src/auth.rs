//! Request signing for the character API
//!
//! Every call carries `ts`, `apikey` and `hash` query parameters where
//! `hash = md5(ts + private_key + public_key)` as lowercase hex. The timestamp
//! changes per call, so parameters are derived fresh for each request.

use chrono::Utc;
use md5::{Digest, Md5};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{ExplorerError, Result};

/// API key pair issued by the developer portal
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub public_key: String,
    pub private_key: String,
}

impl Credentials {
    pub fn new(public_key: impl Into<String>, private_key: impl Into<String>) -> Self {
        Self {
            public_key: public_key.into(),
            private_key: private_key.into(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.public_key.trim().is_empty() || self.private_key.trim().is_empty() {
            return Err(ExplorerError::missing_credentials());
        }
        Ok(())
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("public_key", &self.public_key)
            .field("private_key", &"<redacted>")
            .finish()
    }
}

/// The three authentication parameters attached to a request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthParams {
    pub ts: String,
    pub apikey: String,
    pub hash: String,
}

impl AuthParams {
    pub fn query_pairs(&self) -> [(&'static str, String); 3] {
        [
            ("ts", self.ts.clone()),
            ("apikey", self.apikey.clone()),
            ("hash", self.hash.clone()),
        ]
    }
}

/// Derives per-request authentication parameters from a key pair
#[derive(Debug, Clone)]
pub struct RequestSigner {
    credentials: Credentials,
}

impl RequestSigner {
    pub fn new(credentials: Credentials) -> Result<Self> {
        credentials.validate()?;
        Ok(Self { credentials })
    }

    /// Sign with the current wall-clock time in milliseconds
    pub fn sign(&self) -> AuthParams {
        let ts = Utc::now().timestamp_millis().to_string();
        self.sign_at(&ts)
    }

    /// Sign with an explicit timestamp
    pub fn sign_at(&self, ts: &str) -> AuthParams {
        let mut hasher = Md5::new();
        hasher.update(ts.as_bytes());
        hasher.update(self.credentials.private_key.as_bytes());
        hasher.update(self.credentials.public_key.as_bytes());

        AuthParams {
            ts: ts.to_string(),
            apikey: self.credentials.public_key.clone(),
            hash: hex::encode(hasher.finalize()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signer(public_key: &str, private_key: &str) -> RequestSigner {
        RequestSigner::new(Credentials::new(public_key, private_key)).unwrap()
    }

    #[test]
    fn test_known_vector() {
        let params = signer("1234", "abcd").sign_at("1");
        assert_eq!(params.ts, "1");
        assert_eq!(params.apikey, "1234");
        assert_eq!(params.hash, "ffd275c5130566a2916217b101f26150");
    }

    #[test]
    fn test_signature_is_deterministic_for_timestamp() {
        let signer = signer("pub", "priv");
        let first = signer.sign_at("1700000000000");
        let second = signer.sign_at("1700000000000");
        assert_eq!(first, second);
        assert_eq!(first.hash, "a5b63257d9bcf7c267abefb2c62986bb");
    }

    #[test]
    fn test_sign_uses_fresh_timestamp() {
        let signer = signer("pub", "priv");
        let params = signer.sign();
        assert!(params.ts.parse::<i64>().is_ok());
        assert_eq!(params.hash.len(), 32);
        assert_eq!(params.hash, signer.sign_at(&params.ts).hash);
    }

    #[test]
    fn test_query_pairs_order() {
        let pairs = signer("1234", "abcd").sign_at("1").query_pairs();
        assert_eq!(pairs[0], ("ts", "1".to_string()));
        assert_eq!(pairs[1], ("apikey", "1234".to_string()));
        assert_eq!(pairs[2].0, "hash");
    }

    #[test]
    fn test_empty_credentials_rejected() {
        let err = RequestSigner::new(Credentials::new("", "secret")).unwrap_err();
        assert!(!err.is_transport_error());
        assert!(RequestSigner::new(Credentials::new("public", "  ")).is_err());
    }

    #[test]
    fn test_debug_redacts_private_key() {
        let rendered = format!("{:?}", Credentials::new("public", "topsecret"));
        assert!(rendered.contains("public"));
        assert!(!rendered.contains("topsecret"));
    }
}
