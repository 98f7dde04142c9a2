//! rsalab-crypto: chunked RSA-OAEP codec
//!
//! RSA-OAEP can only encrypt a short message per operation, so plaintext is
//! split into fixed-size byte chunks and each chunk is encrypted on its own.
//!
//! Wire format:
//! ```text
//! base64(OAEP(chunk_0)) | base64(OAEP(chunk_1)) | ... | base64(OAEP(chunk_n))
//! ```
//!
//! OAEP parameters: SHA-256 for both the label hash and MGF1, empty label.
//! Chunk size depends on the key size (see [`policy`]).
//!
//! Every operation takes its keys explicitly; nothing is cached between calls.

pub mod avalanche;
pub mod chunk;
pub mod keys;
pub mod policy;

#[cfg(test)]
pub(crate) mod fixtures;

pub use avalanche::{avalanche, bit_difference, AvalancheReport};
pub use chunk::{
    block_count, ciphertext_bytes, decrypt, decrypt_with_key, encrypt, encrypt_with_key,
};
pub use keys::{generate, parse_private_key, parse_public_key, KeyPair};
pub use policy::{max_chunk_bytes, KeySize};

/// Separator between base64 blocks in the wire form
pub const CHUNK_DELIMITER: char = '|';

/// SHA-256 output length, used by the OAEP payload bound
pub const HASH_LEN: usize = 32;

/// Public exponent for generated keys
pub const PUBLIC_EXPONENT: u32 = 65537;
