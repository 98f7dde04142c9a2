//! Chunked RSA-OAEP encryption/decryption
//!
//! Wire format (text):
//! ```text
//! base64(OAEP(chunk_0)) '|' base64(OAEP(chunk_1)) '|' ... '|' base64(OAEP(chunk_n))
//! ```
//!
//! Chunks are contiguous slices of the UTF-8 plaintext, each at most
//! `KeySize::max_chunk_bytes()` long. Block order is plaintext byte order.
//! Empty plaintext encrypts to exactly one block.
//!
//! Chunks are cut at byte offsets, so a multi-byte character may straddle two
//! blocks; only the reassembled byte string is decoded as UTF-8.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use rsa::{Oaep, RsaPrivateKey, RsaPublicKey};
use rsalab_core::{RsaLabError, RsaLabResult};
use sha2::Sha256;
use zeroize::Zeroize;

use crate::keys::{parse_private_key, parse_public_key};
use crate::policy::KeySize;
use crate::CHUNK_DELIMITER;

/// Encrypt `plaintext` under a PEM public key, returning the wire form.
pub fn encrypt(plaintext: &str, public_key_pem: &str) -> RsaLabResult<String> {
    let key = parse_public_key(public_key_pem)?;
    encrypt_with_key(plaintext, &key)
}

/// Encrypt `plaintext` under an already-parsed public key.
///
/// All-or-nothing: a failure on any chunk fails the whole call.
pub fn encrypt_with_key(plaintext: &str, key: &RsaPublicKey) -> RsaLabResult<String> {
    let key_size = KeySize::from_public_key(key)?;
    let max_chunk = key_size.max_chunk_bytes();
    let mut rng = rand::thread_rng();

    let blocks = split_chunks(plaintext.as_bytes(), max_chunk)
        .into_iter()
        .enumerate()
        .map(|(index, chunk)| {
            key.encrypt(&mut rng, Oaep::new::<Sha256>(), chunk)
                .map(|block| STANDARD.encode(block))
                .map_err(|e| RsaLabError::Crypto(format!("chunk {index}: encryption failed: {e}")))
        })
        .collect::<RsaLabResult<Vec<String>>>()?;

    tracing::debug!(
        key_size = %key_size,
        bytes = plaintext.len(),
        blocks = blocks.len(),
        "encrypted plaintext"
    );

    Ok(blocks.join(CHUNK_DELIMITER.to_string().as_str()))
}

/// Decrypt a wire-form ciphertext under a PEM private key.
pub fn decrypt(ciphertext: &str, private_key_pem: &str) -> RsaLabResult<String> {
    let key = parse_private_key(private_key_pem)?;
    decrypt_with_key(ciphertext, &key)
}

/// Decrypt a wire-form ciphertext under an already-parsed private key.
///
/// Blocks are decrypted in order and concatenated; no partial plaintext is
/// ever returned.
pub fn decrypt_with_key(ciphertext: &str, key: &RsaPrivateKey) -> RsaLabResult<String> {
    let mut plaintext = Vec::new();

    for (index, token) in ciphertext.split(CHUNK_DELIMITER).enumerate() {
        let block = match decode_block(index, token) {
            Ok(block) => block,
            Err(e) => {
                plaintext.zeroize();
                return Err(e);
            }
        };
        match key.decrypt(Oaep::new::<Sha256>(), &block) {
            Ok(mut fragment) => {
                plaintext.extend_from_slice(&fragment);
                fragment.zeroize();
            }
            Err(_) => {
                plaintext.zeroize();
                return Err(RsaLabError::Crypto(format!(
                    "chunk {index}: decryption failed: wrong key or corrupted ciphertext"
                )));
            }
        }
    }

    String::from_utf8(plaintext).map_err(|e| {
        let mut bytes = e.into_bytes();
        bytes.zeroize();
        RsaLabError::Encoding("decrypted data is not valid UTF-8".into())
    })
}

/// Concatenated raw OAEP blocks of a wire-form ciphertext, without decrypting.
pub fn ciphertext_bytes(ciphertext: &str) -> RsaLabResult<Vec<u8>> {
    let mut raw = Vec::new();
    for (index, token) in ciphertext.split(CHUNK_DELIMITER).enumerate() {
        raw.extend_from_slice(&decode_block(index, token)?);
    }
    Ok(raw)
}

/// Number of blocks in a wire-form ciphertext.
pub fn block_count(ciphertext: &str) -> usize {
    ciphertext.split(CHUNK_DELIMITER).count()
}

/// Contiguous chunks of at most `max` bytes; empty input yields one empty chunk.
fn split_chunks(data: &[u8], max: usize) -> Vec<&[u8]> {
    if data.is_empty() {
        return vec![data];
    }
    data.chunks(max).collect()
}

fn decode_block(index: usize, token: &str) -> RsaLabResult<Vec<u8>> {
    let token = token.trim();
    if token.is_empty() {
        return Err(RsaLabError::Crypto(format!("chunk {index}: empty block")));
    }
    STANDARD
        .decode(token)
        .map_err(|e| RsaLabError::Crypto(format!("chunk {index}: invalid base64: {e}")))
}
