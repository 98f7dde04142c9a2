//! rsalab-store: saved ciphertexts per authenticated user
//!
//! Records carry the private key alongside the ciphertext so the service can
//! decrypt a saved message on the owner's behalf. Listings never include it.
//!
//! Two backends are available:
//!   - **JSON** (default): whole store in memory, flushed atomically via temp+rename
//!     after every mutation.
//!   - **Memory**: nothing persisted; for tests and throwaway deployments.

pub mod record;
pub mod store;

pub use record::{NewSavedCiphertext, SavedCiphertext, SavedCiphertextSummary};
pub use store::{open_store, CiphertextStore, JsonCiphertextStore, MemoryCiphertextStore};
