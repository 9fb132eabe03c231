//! Time-limited signed download URLs.
//!
//! The gateway serves blob reads without session authentication; a signed URL
//! is the sole credential. The signature is a keyed BLAKE3 MAC over the
//! object key, the attachment filename, and the expiry timestamp, so none of
//! the three can be tampered with after issuance.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use rand::rngs::OsRng;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{Result, StoreError};

/// Query parameters carried by a signed download URL.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignedDownload {
    /// Unix timestamp (seconds) after which the URL is invalid.
    pub expires: i64,
    /// Filename used for the attachment disposition.
    pub name: String,
    /// Hex-encoded MAC over key, name, and expiry.
    pub sig: String,
}

/// Mints and verifies signed download URLs for blob keys.
#[derive(Clone)]
pub struct UrlSigner {
    secret: [u8; 32],
    base: Url,
}

impl std::fmt::Debug for UrlSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UrlSigner").field("base", &self.base).finish()
    }
}

impl UrlSigner {
    /// Create a signer with the given secret key.
    pub fn new(base: Url, secret: [u8; 32]) -> Self {
        Self { secret, base }
    }

    /// Create a signer with a fresh random secret.
    ///
    /// URLs minted before a restart will not verify afterwards; supply a
    /// persistent key where that matters.
    pub fn generate(base: Url) -> Self {
        let mut secret = [0u8; 32];
        OsRng.fill_bytes(&mut secret);
        Self::new(base, secret)
    }

    /// Create a signer from a 64-character hex-encoded secret.
    pub fn from_hex(base: Url, secret_hex: &str) -> Result<Self> {
        let raw = hex::decode(secret_hex)
            .map_err(|e| StoreError::InvalidSigningKey(e.to_string()))?;
        let secret: [u8; 32] = raw
            .try_into()
            .map_err(|_| StoreError::InvalidSigningKey("key must be 32 bytes".into()))?;
        Ok(Self::new(base, secret))
    }

    fn mac(&self, key: &str, name: &str, expires: i64) -> blake3::Hash {
        let mut hasher = blake3::Hasher::new_keyed(&self.secret);
        hasher.update(key.as_bytes());
        hasher.update(b"\n");
        hasher.update(name.as_bytes());
        hasher.update(b"\n");
        hasher.update(&expires.to_le_bytes());
        hasher.finalize()
    }

    /// Mint a signed URL for `key`, valid for `ttl` from now.
    ///
    /// `name` is the display filename the gateway will attach as the
    /// content disposition.
    pub fn sign(&self, key: &str, name: &str, ttl: Duration) -> Url {
        self.sign_at(key, name, unix_now() + ttl.as_secs() as i64)
    }

    /// Mint a signed URL for `key`, valid through `expires` (unix seconds).
    pub fn sign_at(&self, key: &str, name: &str, expires: i64) -> Url {
        let sig = self.mac(key, name, expires).to_hex().to_string();
        let mut url = self.base.clone();
        url.set_path(&format!("/dl/{}", key));
        url.query_pairs_mut()
            .append_pair("expires", &expires.to_string())
            .append_pair("name", name)
            .append_pair("sig", &sig);
        url
    }

    /// Verify a presented signature against the current clock.
    pub fn verify(&self, key: &str, download: &SignedDownload) -> bool {
        self.verify_at(key, download, unix_now())
    }

    /// Verify a presented signature against an explicit clock.
    pub fn verify_at(&self, key: &str, download: &SignedDownload, now: i64) -> bool {
        if download.expires < now {
            return false;
        }
        let presented = match blake3::Hash::from_hex(&download.sig) {
            Ok(h) => h,
            Err(_) => return false,
        };
        // blake3::Hash equality is constant-time
        self.mac(key, &download.name, download.expires) == presented
    }
}

fn unix_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signer() -> UrlSigner {
        UrlSigner::generate(Url::parse("http://localhost:5431").unwrap())
    }

    fn params_of(url: &Url) -> SignedDownload {
        let mut expires = None;
        let mut name = None;
        let mut sig = None;
        for (k, v) in url.query_pairs() {
            match k.as_ref() {
                "expires" => expires = v.parse().ok(),
                "name" => name = Some(v.into_owned()),
                "sig" => sig = Some(v.into_owned()),
                _ => {}
            }
        }
        SignedDownload {
            expires: expires.unwrap(),
            name: name.unwrap(),
            sig: sig.unwrap(),
        }
    }

    #[test]
    fn test_round_trip_verifies() {
        let signer = signer();
        let key = "user-a/1700000000000-cafe1234-a_b_.txt";
        let url = signer.sign(key, "a b!.txt", Duration::from_secs(60));
        assert!(url.path().starts_with("/dl/user-a/"));

        let params = params_of(&url);
        assert_eq!(params.name, "a b!.txt");
        assert!(signer.verify(key, &params));
    }

    #[test]
    fn test_expired_signature_rejected() {
        let signer = signer();
        let key = "user-a/k";
        let url = signer.sign_at(key, "f.txt", 1_000);

        let params = params_of(&url);
        assert!(signer.verify_at(key, &params, 1_000));
        assert!(!signer.verify_at(key, &params, 1_001));
    }

    #[test]
    fn test_tampered_fields_rejected() {
        let signer = signer();
        let key = "user-a/k";
        let url = signer.sign_at(key, "f.txt", i64::MAX - 1);
        let params = params_of(&url);

        // wrong key
        assert!(!signer.verify(&format!("{}x", key), &params));

        // tampered filename
        let mut renamed = params.clone();
        renamed.name = "other.txt".into();
        assert!(!signer.verify(key, &renamed));

        // tampered expiry
        let mut extended = params.clone();
        extended.expires -= 1;
        assert!(!signer.verify(key, &extended));

        // garbage signature
        let mut garbage = params;
        garbage.sig = "zz".into();
        assert!(!signer.verify(key, &garbage));
    }

    #[test]
    fn test_different_keys_do_not_cross_verify() {
        let base = Url::parse("http://localhost:5431").unwrap();
        let a = UrlSigner::generate(base.clone());
        let b = UrlSigner::generate(base);

        let url = a.sign_at("k", "f", i64::MAX - 1);
        let params = params_of(&url);
        assert!(a.verify("k", &params));
        assert!(!b.verify("k", &params));
    }

    #[test]
    fn test_from_hex_round_trip() {
        let base = Url::parse("http://localhost:5431").unwrap();
        let secret = [7u8; 32];
        let a = UrlSigner::new(base.clone(), secret);
        let b = UrlSigner::from_hex(base.clone(), &hex::encode(secret)).unwrap();

        let url = a.sign_at("k", "f", i64::MAX - 1);
        assert!(b.verify("k", &params_of(&url)));

        assert!(UrlSigner::from_hex(base, "abcd").is_err());
    }
}
