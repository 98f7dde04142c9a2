//! JSON payloads exchanged with the browser frontend.
//!
//! Request bodies use camelCase field names; every response is wrapped in
//! [`ApiEnvelope`].

use serde::{Deserialize, Serialize};

/// `{ "success": bool, "data"?: T, "error"?: string }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiEnvelope<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn err(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    pub key_size: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncryptRequest {
    #[serde(default)]
    pub public_key: String,
    #[serde(default)]
    pub plaintext: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncryptResponse {
    pub ciphertext: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecryptRequest {
    #[serde(default)]
    pub private_key: String,
    #[serde(default)]
    pub ciphertext: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecryptResponse {
    pub plaintext: String,
}

/// Same shape as [`EncryptRequest`]; the avalanche demo perturbs the plaintext.
pub type AvalancheRequest = EncryptRequest;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractTextResponse {
    pub text: String,
    pub filename: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveCiphertextRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub ciphertext: String,
    #[serde(default)]
    pub private_key: String,
}

/// Caller identity as resolved from platform authentication headers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserIdentity {
    pub user_id: String,
    pub email: String,
}
