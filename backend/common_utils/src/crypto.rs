//! Utilities for cryptographic algorithms
use error_stack::{report, ResultExt};

use crate::errors::{self, CustomResult};

/// Trait for generating a digest for SHA
pub trait GenerateDigest {
    /// takes a message and creates a digest for it
    fn generate_digest(&self, message: &[u8]) -> CustomResult<Vec<u8>, errors::CryptoError>;
}

/// Trait for verifying a signature generated by a connector
pub trait VerifySignature {
    /// Takes in a secret, the signature and the message and verifies the message
    /// against the signature
    fn verify_signature(
        &self,
        _secret: &[u8],
        _signature: &[u8],
        _msg: &[u8],
    ) -> CustomResult<bool, errors::CryptoError>;
}

/// Represents no cryptographic algorithm.
/// Implements all crypto traits and acts like a Nop
#[derive(Debug)]
pub struct NoAlgorithm;

impl VerifySignature for NoAlgorithm {
    fn verify_signature(
        &self,
        _secret: &[u8],
        _signature: &[u8],
        _msg: &[u8],
    ) -> CustomResult<bool, errors::CryptoError> {
        Ok(true)
    }
}

/// MD5 hash function
///
/// Connectors that "sign" with a plain digest over a message which already
/// embeds the shared secret use this as their verification algorithm.
#[derive(Debug)]
pub struct Md5;

impl GenerateDigest for Md5 {
    fn generate_digest(&self, message: &[u8]) -> CustomResult<Vec<u8>, errors::CryptoError> {
        let digest = md5::compute(message);
        Ok(digest.0.to_vec())
    }
}

impl VerifySignature for Md5 {
    fn verify_signature(
        &self,
        _secret: &[u8],
        signature: &[u8],
        msg: &[u8],
    ) -> CustomResult<bool, errors::CryptoError> {
        let hashed_digest = Self.generate_digest(msg)?;
        if signature.len() != hashed_digest.len() {
            return Err(report!(errors::CryptoError::SignatureVerificationFailed))
                .attach_printable_lazy(|| {
                    format!("expected a {} byte md5 digest", hashed_digest.len())
                });
        }
        Ok(hashed_digest.as_slice() == signature)
    }
}
