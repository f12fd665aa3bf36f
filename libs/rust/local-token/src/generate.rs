//! Token generation.
//!
//! A token is the standard base64 encoding of the SHA-256 digest of 64
//! bytes drawn from the operating system CSPRNG.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use rand::RngCore;
use rand::rngs::OsRng;
use sha2::{Digest, Sha256};
use zeroize::{Zeroize, Zeroizing};

/// Number of random bytes hashed into each token (512 bits).
pub const RANDOM_BYTES: usize = 64;

/// Length of an encoded token: base64 of a 32-byte digest, padded.
pub const TOKEN_LEN: usize = 44;

/// Generates a fresh token.
///
/// The random seed and the returned string are wiped on drop.
#[must_use]
pub fn generate_token() -> Zeroizing<String> {
    let mut seed = Zeroizing::new([0u8; RANDOM_BYTES]);
    OsRng.fill_bytes(&mut seed[..]);

    let mut digest = Sha256::digest(&seed[..]);
    let token = Zeroizing::new(STANDARD.encode(digest.as_slice()));
    digest.as_mut_slice().zeroize();
    token
}
