//! Avalanche-effect demonstration.
//!
//! Encrypts a plaintext and a one-character perturbation of it (`'s'`
//! prepended), then reports the fraction of differing bits between the two
//! raw ciphertexts.
//!
//! Comparison runs over the overlapping prefix only. When the two
//! ciphertexts have different block counts the trailing bytes of the longer
//! one are ignored.

use rsalab_core::RsaLabResult;
use serde::{Deserialize, Serialize};

use crate::chunk::{ciphertext_bytes, encrypt_with_key};
use crate::keys::parse_public_key;
use crate::policy::KeySize;

/// Character prepended to the plaintext to build the perturbed input
pub const PERTURBATION: char = 's';

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvalancheReport {
    pub modified_plaintext: String,
    pub original_ciphertext: String,
    pub modified_ciphertext: String,
    pub original_hex: String,
    pub modified_hex: String,
    pub avalanche_percent: f64,
    pub key_size: KeySize,
}

/// Run the avalanche demonstration for `plaintext` under a PEM public key.
pub fn avalanche(public_key_pem: &str, plaintext: &str) -> RsaLabResult<AvalancheReport> {
    let key = parse_public_key(public_key_pem)?;
    let key_size = KeySize::from_public_key(&key)?;

    let modified_plaintext = format!("{PERTURBATION}{plaintext}");

    let original_ciphertext = encrypt_with_key(plaintext, &key)?;
    let modified_ciphertext = encrypt_with_key(&modified_plaintext, &key)?;

    let original_raw = ciphertext_bytes(&original_ciphertext)?;
    let modified_raw = ciphertext_bytes(&modified_ciphertext)?;

    let (diff_bits, compared) = bit_difference(&original_raw, &modified_raw);
    let avalanche_percent = percent(diff_bits, compared);

    tracing::debug!(
        key_size = %key_size,
        diff_bits,
        compared_bytes = compared,
        avalanche_percent,
        "avalanche computed"
    );

    Ok(AvalancheReport {
        modified_plaintext,
        original_ciphertext,
        modified_ciphertext,
        original_hex: hex::encode(original_raw),
        modified_hex: hex::encode(modified_raw),
        avalanche_percent,
        key_size,
    })
}

/// Hamming distance over the overlapping prefix of `a` and `b`.
///
/// Returns `(differing_bits, compared_bytes)`.
pub fn bit_difference(a: &[u8], b: &[u8]) -> (u64, usize) {
    let diff_bits = a
        .iter()
        .zip(b)
        .map(|(x, y)| u64::from((x ^ y).count_ones()))
        .sum();
    (diff_bits, a.len().min(b.len()))
}

/// `100 * diff_bits / (compared_bytes * 8)`, rounded to two decimals.
fn percent(diff_bits: u64, compared_bytes: usize) -> f64 {
    if compared_bytes == 0 {
        return 0.0;
    }
    let ratio = diff_bits as f64 / (compared_bytes as f64 * 8.0);
    (ratio * 100.0 * 100.0).round() / 100.0
}
