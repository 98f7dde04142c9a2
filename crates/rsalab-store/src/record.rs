use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A ciphertext saved by a user, together with the private key that opens it.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedCiphertext {
    pub id: u64,
    pub user_id: String,
    pub user_email: String,
    /// Display name chosen by the owner
    pub name: String,
    /// Wire-form ciphertext (`|`-joined base64 blocks)
    pub ciphertext: String,
    /// PKCS#8 PEM, stored in plaintext
    pub private_key: String,
    pub created_at: DateTime<Utc>,
}

impl std::fmt::Debug for SavedCiphertext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SavedCiphertext")
            .field("id", &self.id)
            .field("user_id", &self.user_id)
            .field("user_email", &self.user_email)
            .field("name", &self.name)
            .field("ciphertext_len", &self.ciphertext.len())
            .field("private_key", &"[REDACTED]")
            .field("created_at", &self.created_at)
            .finish()
    }
}

/// Input for [`crate::CiphertextStore::create`]; the store assigns id and timestamp.
#[derive(Clone, Serialize, Deserialize)]
pub struct NewSavedCiphertext {
    pub user_id: String,
    pub user_email: String,
    pub name: String,
    pub ciphertext: String,
    pub private_key: String,
}

impl std::fmt::Debug for NewSavedCiphertext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewSavedCiphertext")
            .field("user_id", &self.user_id)
            .field("name", &self.name)
            .field("private_key", &"[REDACTED]")
            .finish()
    }
}

/// Listing form of a record: the private key is never included.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedCiphertextSummary {
    pub id: u64,
    pub user_id: String,
    pub user_email: String,
    pub name: String,
    pub ciphertext: String,
    pub created_at: DateTime<Utc>,
}

impl From<&SavedCiphertext> for SavedCiphertextSummary {
    fn from(record: &SavedCiphertext) -> Self {
        Self {
            id: record.id,
            user_id: record.user_id.clone(),
            user_email: record.user_email.clone(),
            name: record.name.clone(),
            ciphertext: record.ciphertext.clone(),
            created_at: record.created_at,
        }
    }
}
