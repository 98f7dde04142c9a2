//! Key generation and PEM parsing.

use rsa::pkcs1::{DecodeRsaPrivateKey, DecodeRsaPublicKey};
use rsa::pkcs8::{DecodePrivateKey, DecodePublicKey, EncodePrivateKey, EncodePublicKey, LineEnding};
use rsa::{BigUint, RsaPrivateKey, RsaPublicKey};
use rsalab_core::{RsaLabError, RsaLabResult};
use serde::{Deserialize, Serialize};

use crate::policy::KeySize;
use crate::PUBLIC_EXPONENT;

/// A freshly generated key pair in PEM form.
///
/// `private_key` is PKCS#8, `public_key` is SubjectPublicKeyInfo.
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyPair {
    pub private_key: String,
    pub public_key: String,
    pub key_size: KeySize,
}

impl std::fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyPair")
            .field("private_key", &"[REDACTED]")
            .field("public_key", &self.public_key)
            .field("key_size", &self.key_size)
            .finish()
    }
}

/// Generate an RSA key pair with public exponent 65537.
///
/// `bits` is validated before any key material is produced.
pub fn generate(bits: u32) -> RsaLabResult<KeyPair> {
    let key_size = KeySize::try_from(bits)?;

    let exponent = BigUint::from(PUBLIC_EXPONENT);
    let private = RsaPrivateKey::new_with_exp(&mut rand::thread_rng(), bits as usize, &exponent)
        .map_err(|e| RsaLabError::Crypto(format!("key generation failed: {e}")))?;
    let public = RsaPublicKey::from(&private);

    let private_pem = private
        .to_pkcs8_pem(LineEnding::LF)
        .map_err(|e| RsaLabError::Crypto(format!("private key encoding failed: {e}")))?;
    let public_pem = public
        .to_public_key_pem(LineEnding::LF)
        .map_err(|e| RsaLabError::Crypto(format!("public key encoding failed: {e}")))?;

    tracing::debug!(key_size = %key_size, "generated RSA key pair");

    Ok(KeyPair {
        private_key: private_pem.as_str().to_owned(),
        public_key: public_pem,
        key_size,
    })
}

/// Parse a public key from SubjectPublicKeyInfo PEM (or PKCS#1 `RSA PUBLIC KEY`).
pub fn parse_public_key(pem: &str) -> RsaLabResult<RsaPublicKey> {
    let pem = pem.trim();
    if pem.is_empty() {
        return Err(RsaLabError::KeyUnavailable(
            "Public key is not available".into(),
        ));
    }
    RsaPublicKey::from_public_key_pem(pem)
        .or_else(|_| RsaPublicKey::from_pkcs1_pem(pem))
        .map_err(|e| RsaLabError::KeyUnavailable(format!("Public key is not usable: {e}")))
}

/// Parse a private key from PKCS#8 PEM (or PKCS#1 `RSA PRIVATE KEY`).
pub fn parse_private_key(pem: &str) -> RsaLabResult<RsaPrivateKey> {
    let pem = pem.trim();
    if pem.is_empty() {
        return Err(RsaLabError::KeyUnavailable(
            "Private key is not available".into(),
        ));
    }
    RsaPrivateKey::from_pkcs8_pem(pem)
        .or_else(|_| RsaPrivateKey::from_pkcs1_pem(pem))
        .map_err(|e| RsaLabError::KeyUnavailable(format!("Private key is not usable: {e}")))
}
