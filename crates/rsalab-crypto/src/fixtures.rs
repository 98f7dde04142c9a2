//! Key pairs shared by unit tests, generated once per test binary.

use std::sync::OnceLock;

use crate::keys::{generate, KeyPair};

pub fn pair_1024() -> &'static KeyPair {
    static PAIR: OnceLock<KeyPair> = OnceLock::new();
    PAIR.get_or_init(|| generate(1024).unwrap())
}

pub fn pair_2048() -> &'static KeyPair {
    static PAIR: OnceLock<KeyPair> = OnceLock::new();
    PAIR.get_or_init(|| generate(2048).unwrap())
}

/// A second 1024-bit pair for wrong-key tests.
pub fn other_1024() -> &'static KeyPair {
    static PAIR: OnceLock<KeyPair> = OnceLock::new();
    PAIR.get_or_init(|| generate(1024).unwrap())
}
