//! System-wide constants for the SealBid engine.

/// Threshold applied at reveal when the seller never set one: exact match.
pub const DEFAULT_THRESHOLD: u32 = 0;

/// Byte length of a ciphertext handle.
pub const CIPHER_HANDLE_LEN: usize = 32;

/// Version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Engine name.
pub const ENGINE_NAME: &str = "SealBid";
