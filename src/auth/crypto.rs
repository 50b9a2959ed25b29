//! Wallet signature verification
//!
//! Verifies ed25519 signatures made by the holder of a base58-encoded
//! public key (Solana-style wallet address).

use base64::{engine::general_purpose, Engine as _};
use ed25519_dalek::{Signature, Verifier, VerifyingKey, PUBLIC_KEY_LENGTH};
use thiserror::Error;

/// Errors that can occur during signature verification
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CryptoError {
    #[error("Failed to decode public key: {0}")]
    InvalidPublicKeyEncoding(String),

    #[error("Expected ed25519 public key size is {expected}, got {actual}")]
    InvalidPublicKeyLength { expected: usize, actual: usize },

    #[error("Can't decode base64 signature: {0}")]
    InvalidSignatureEncoding(String),

    #[error("Signature is incorrect")]
    SignatureVerificationFailed,
}

/// Verify a wallet signature over a challenge message
///
/// # Arguments
/// * `message` - The message that was signed, verified over its raw bytes
/// * `signature_base64` - Standard base64-encoded ed25519 signature
/// * `public_key` - Base58-encoded 32-byte ed25519 public key
///
/// # Returns
/// * `Ok(())` if the signature is valid
/// * `Err(CryptoError)` describing the first check that failed
pub fn verify_signature(
    message: &str,
    signature_base64: &str,
    public_key: &str,
) -> Result<(), CryptoError> {
    let public_key_bytes = decode_public_key(public_key)?;

    let signature_bytes = general_purpose::STANDARD
        .decode(signature_base64)
        .map_err(|e| CryptoError::InvalidSignatureEncoding(e.to_string()))?;

    // A wrong-sized signature or an off-curve key can never verify; report
    // both the same way the primitive's boolean outcome would.
    let signature = Signature::from_slice(&signature_bytes)
        .map_err(|_| CryptoError::SignatureVerificationFailed)?;
    let verifying_key = VerifyingKey::from_bytes(&public_key_bytes)
        .map_err(|_| CryptoError::SignatureVerificationFailed)?;

    verifying_key
        .verify(message.as_bytes(), &signature)
        .map_err(|_| CryptoError::SignatureVerificationFailed)
}

/// Decode a base58 wallet address into raw ed25519 public key bytes
fn decode_public_key(public_key: &str) -> Result<[u8; PUBLIC_KEY_LENGTH], CryptoError> {
    let decoded = bs58::decode(public_key)
        .into_vec()
        .map_err(|e| CryptoError::InvalidPublicKeyEncoding(e.to_string()))?;

    decoded
        .as_slice()
        .try_into()
        .map_err(|_| CryptoError::InvalidPublicKeyLength {
            expected: PUBLIC_KEY_LENGTH,
            actual: decoded.len(),
        })
}
