//! Key-size to chunk-size policy.
//!
//! | key size | modulus bytes | OAEP-SHA256 bound | chunk size |
//! |----------|---------------|-------------------|------------|
//! | 1024     | 128           | 62                | 62         |
//! | 2048     | 256           | 190               | 190        |

use rsa::traits::PublicKeyParts;
use rsa::RsaPublicKey;
use rsalab_core::{RsaLabError, RsaLabResult};
use serde::{Deserialize, Serialize};

use crate::HASH_LEN;

/// RSA modulus sizes this service supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum KeySize {
    Rsa1024,
    Rsa2048,
}

impl KeySize {
    pub const ALL: [KeySize; 2] = [KeySize::Rsa1024, KeySize::Rsa2048];

    pub const fn bits(self) -> u32 {
        match self {
            KeySize::Rsa1024 => 1024,
            KeySize::Rsa2048 => 2048,
        }
    }

    pub const fn modulus_bytes(self) -> usize {
        self.bits() as usize / 8
    }

    /// Largest plaintext chunk encrypted under one OAEP operation.
    pub const fn max_chunk_bytes(self) -> usize {
        match self {
            KeySize::Rsa1024 => 62,
            KeySize::Rsa2048 => 190,
        }
    }

    /// Classify a parsed public key by its modulus length.
    pub fn from_public_key(key: &RsaPublicKey) -> RsaLabResult<Self> {
        let bits = (key.size() * 8) as u32;
        Self::try_from(bits)
    }
}

/// OAEP payload bound: `k - 2*hLen - 2` (inclusive).
pub const fn oaep_max_payload(modulus_bytes: usize) -> usize {
    modulus_bytes - 2 * HASH_LEN - 2
}

const _: () = {
    assert!(KeySize::Rsa1024.max_chunk_bytes() <= oaep_max_payload(KeySize::Rsa1024.modulus_bytes()));
    assert!(KeySize::Rsa2048.max_chunk_bytes() <= oaep_max_payload(KeySize::Rsa2048.modulus_bytes()));
};

impl TryFrom<u32> for KeySize {
    type Error = RsaLabError;

    fn try_from(bits: u32) -> RsaLabResult<Self> {
        match bits {
            1024 => Ok(KeySize::Rsa1024),
            2048 => Ok(KeySize::Rsa2048),
            _ => Err(RsaLabError::InvalidParameter(
                "Key size must be either 1024 or 2048 bits".into(),
            )),
        }
    }
}

impl From<KeySize> for u32 {
    fn from(size: KeySize) -> u32 {
        size.bits()
    }
}

impl std::fmt::Display for KeySize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.bits())
    }
}

/// ChunkSizePolicy lookup by key length in bits.
pub fn max_chunk_bytes(bits: u32) -> RsaLabResult<usize> {
    KeySize::try_from(bits).map(KeySize::max_chunk_bytes)
}
