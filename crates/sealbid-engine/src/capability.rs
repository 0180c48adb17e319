//! Capability seams for the external encryption collaborators.
//!
//! The encrypting party is untrusted for *writing* but trusted for
//! *computing*: the [`RevealOracle`] reads ciphertexts without mutating
//! anything, and only the engine's bind step makes its output authoritative.
//! Implementations are selected once when the engine is constructed — there
//! is no per-call branching between mock and real backends.

use sealbid_types::{CipherHandle, DealId, EncryptedInput, PartyId, Result};

/// Binds a ciphertext to a specific deal/party pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncryptionContext {
    pub deal_id: DealId,
    pub party: PartyId,
}

/// Turns a plaintext 32-bit integer into an opaque handle plus a proof
/// artifact.
///
/// Failure is reported as `EncryptionUnavailable`.
pub trait Encryptor: Send + Sync {
    fn encrypt32(&self, value: u32, ctx: &EncryptionContext) -> Result<EncryptedInput>;
}

/// Resolves stored ciphertext handles back to plaintext integers.
///
/// This is a pure, side-effect-free read: repeated calls on unchanged
/// handles must yield identical output. Failure is reported as
/// `OracleUnavailable` and is never substituted with fabricated values.
pub trait RevealOracle: Send + Sync {
    fn decrypt(&self, handles: &[CipherHandle]) -> Result<Vec<u32>>;
}
