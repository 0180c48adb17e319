//! Opaque ciphertext types.
//!
//! The engine never inspects ciphertext contents — a [`CipherHandle`] is a
//! 32-byte reference minted by an `Encryptor` and resolvable only by a
//! `RevealOracle`. The paired [`CipherProof`] is an opaque artifact binding
//! the handle to a specific deal/party pair; the engine carries it but does
//! not interpret it.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::CIPHER_HANDLE_LEN;

/// Opaque reference to an encrypted 32-bit integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct CipherHandle(pub [u8; CIPHER_HANDLE_LEN]);

impl CipherHandle {
    #[must_use]
    pub fn from_bytes(bytes: [u8; CIPHER_HANDLE_LEN]) -> Self {
        Self(bytes)
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8; CIPHER_HANDLE_LEN] {
        &self.0
    }

    #[must_use]
    pub fn short(&self) -> String {
        hex::encode(&self.0[..4])
    }
}

impl fmt::Display for CipherHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ct:{}", hex::encode(&self.0[..8]))
    }
}

/// Opaque proof artifact produced alongside a [`CipherHandle`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CipherProof(pub Vec<u8>);

impl CipherProof {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

/// A ciphertext handle plus its binding proof, as submitted to the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptedInput {
    pub handle: CipherHandle,
    pub proof: CipherProof,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handle_display_is_prefixed_hex() {
        let h = CipherHandle([0xab; 32]);
        assert_eq!(format!("{h}"), "ct:abababababababab");
        assert_eq!(h.short(), "abababab");
    }

    #[test]
    fn proof_emptiness() {
        assert!(CipherProof(Vec::new()).is_empty());
        assert!(!CipherProof(vec![1, 2, 3]).is_empty());
        assert_eq!(CipherProof(vec![1, 2, 3]).len(), 3);
    }

    #[test]
    fn serde_roundtrip() {
        let input = EncryptedInput {
            handle: CipherHandle([7u8; 32]),
            proof: CipherProof(vec![1, 2, 3, 4]),
        };
        let json = serde_json::to_string(&input).unwrap();
        let back: EncryptedInput = serde_json::from_str(&json).unwrap();
        assert_eq!(input, back);
    }
}
