//! Text extraction for uploaded files.

use rsalab_core::{RsaLabError, RsaLabResult};

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Turns uploaded file bytes into UTF-8 text.
pub trait TextExtractor: Send + Sync {
    fn extract(&self, filename: Option<&str>, bytes: &[u8]) -> RsaLabResult<String>;
}

/// Accepts plain UTF-8 text files.
#[derive(Debug, Clone, Copy, Default)]
pub struct Utf8TextExtractor;

impl TextExtractor for Utf8TextExtractor {
    fn extract(&self, filename: Option<&str>, bytes: &[u8]) -> RsaLabResult<String> {
        let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
        std::str::from_utf8(bytes).map(str::to_owned).map_err(|e| {
            tracing::debug!(
                filename = filename.unwrap_or("<unnamed>"),
                valid_up_to = e.valid_up_to(),
                "rejected upload"
            );
            RsaLabError::Encoding("File contains non-UTF-8 characters".into())
        })
    }
}
