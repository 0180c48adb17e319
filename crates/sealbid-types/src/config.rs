//! Configuration for the SealBid engine.

use serde::{Deserialize, Serialize};

use crate::PartyId;

/// Engine-level configuration, fixed at construction.
///
/// The capability implementations (encryptor, reveal oracle) are also chosen
/// once at construction time and never switched per call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Administrative party allowed to cancel stuck deals. Nil disables the
    /// admin recovery path.
    pub admin: PartyId,
    /// Require a non-empty binding proof on every ciphertext submission.
    pub require_proofs: bool,
}

impl EngineConfig {
    #[must_use]
    pub fn new(admin: PartyId) -> Self {
        Self {
            admin,
            require_proofs: true,
        }
    }

    /// Whether the given party holds the admin role.
    #[must_use]
    pub fn is_admin(&self, party: PartyId) -> bool {
        !self.admin.is_nil() && party == self.admin
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            admin: PartyId::nil(),
            require_proofs: true,
        }
    }
}
