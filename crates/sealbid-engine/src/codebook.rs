//! In-process codebook implementation of the encryption capabilities.
//!
//! Handles are salted SHA-256 digests over the value and its binding
//! context; the shared codebook maps each handle back to its plaintext.
//! The salt keeps equal values from producing equal handles, so an observer
//! of two deals learns nothing from handle equality.
//!
//! This is the reference backend for local deployments and tests. A real
//! deployment substitutes a gateway-backed implementation behind the same
//! traits; the engine cannot tell the difference.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use sealbid_types::{
    CipherHandle, CipherProof, EncryptedInput, Result, SealbidError,
};
use sha2::{Digest, Sha256};

use crate::capability::{EncryptionContext, Encryptor, RevealOracle};

/// Shared handle-to-plaintext mapping.
#[derive(Default)]
pub struct Codebook {
    entries: Mutex<HashMap<CipherHandle, u32>>,
}

impl Codebook {
    /// Build a connected encryptor/oracle pair over one fresh codebook.
    #[must_use]
    pub fn pair(key: [u8; 32]) -> (CodebookEncryptor, CodebookOracle) {
        let book = Arc::new(Self::default());
        (
            CodebookEncryptor {
                key,
                book: Arc::clone(&book),
            },
            CodebookOracle { book },
        )
    }

    fn insert(&self, handle: CipherHandle, value: u32) {
        self.entries.lock().insert(handle, value);
    }

    fn resolve(&self, handle: &CipherHandle) -> Option<u32> {
        self.entries.lock().get(handle).copied()
    }
}

/// Codebook-backed [`Encryptor`].
pub struct CodebookEncryptor {
    key: [u8; 32],
    book: Arc<Codebook>,
}

impl Encryptor for CodebookEncryptor {
    fn encrypt32(&self, value: u32, ctx: &EncryptionContext) -> Result<EncryptedInput> {
        let salt: [u8; 16] = rand::random();

        let mut hasher = Sha256::new();
        hasher.update(b"sealbid:ct:v1:");
        hasher.update(self.key);
        hasher.update(ctx.deal_id.0.to_le_bytes());
        hasher.update(ctx.party.0.as_bytes());
        hasher.update(value.to_le_bytes());
        hasher.update(salt);
        let digest: [u8; 32] = hasher.finalize().into();
        let handle = CipherHandle(digest);

        let mut proof_hasher = Sha256::new();
        proof_hasher.update(b"sealbid:proof:v1:");
        proof_hasher.update(self.key);
        proof_hasher.update(handle.as_bytes());
        proof_hasher.update(ctx.party.0.as_bytes());
        let proof = CipherProof(proof_hasher.finalize().to_vec());

        self.book.insert(handle, value);
        Ok(EncryptedInput { handle, proof })
    }
}

/// Codebook-backed [`RevealOracle`].
pub struct CodebookOracle {
    book: Arc<Codebook>,
}

impl RevealOracle for CodebookOracle {
    fn decrypt(&self, handles: &[CipherHandle]) -> Result<Vec<u32>> {
        handles
            .iter()
            .map(|handle| {
                self.book
                    .resolve(handle)
                    .ok_or_else(|| SealbidError::OracleUnavailable {
                        reason: format!("unknown ciphertext handle {handle}"),
                    })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sealbid_types::{DealId, PartyId};

    fn ctx() -> EncryptionContext {
        EncryptionContext {
            deal_id: DealId(1),
            party: PartyId::new(),
        }
    }

    #[test]
    fn encrypt_then_decrypt_roundtrips() {
        let (encryptor, oracle) = Codebook::pair([7u8; 32]);
        let input = encryptor.encrypt32(1000, &ctx()).unwrap();
        assert!(!input.proof.is_empty());

        let values = oracle.decrypt(&[input.handle]).unwrap();
        assert_eq!(values, vec![1000]);
    }

    #[test]
    fn equal_values_get_distinct_handles() {
        let (encryptor, _) = Codebook::pair([7u8; 32]);
        let c = ctx();
        let a = encryptor.encrypt32(500, &c).unwrap();
        let b = encryptor.encrypt32(500, &c).unwrap();
        assert_ne!(a.handle, b.handle, "handle equality would leak price equality");
    }

    #[test]
    fn decrypt_is_deterministic() {
        let (encryptor, oracle) = Codebook::pair([7u8; 32]);
        let input = encryptor.encrypt32(42, &ctx()).unwrap();
        let first = oracle.decrypt(&[input.handle]).unwrap();
        let second = oracle.decrypt(&[input.handle]).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn unknown_handle_is_oracle_unavailable() {
        let (_, oracle) = Codebook::pair([7u8; 32]);
        let err = oracle.decrypt(&[CipherHandle([0u8; 32])]).unwrap_err();
        assert!(matches!(err, SealbidError::OracleUnavailable { .. }));
    }

    #[test]
    fn disconnected_books_do_not_resolve_each_other() {
        let (encryptor_a, _) = Codebook::pair([1u8; 32]);
        let (_, oracle_b) = Codebook::pair([2u8; 32]);
        let input = encryptor_a.encrypt32(9, &ctx()).unwrap();
        assert!(oracle_b.decrypt(&[input.handle]).is_err());
    }

    #[test]
    fn boundary_values_roundtrip() {
        let (encryptor, oracle) = Codebook::pair([7u8; 32]);
        let zero = encryptor.encrypt32(0, &ctx()).unwrap();
        let max = encryptor.encrypt32(u32::MAX, &ctx()).unwrap();
        assert_eq!(
            oracle.decrypt(&[zero.handle, max.handle]).unwrap(),
            vec![0, u32::MAX]
        );
    }
}
