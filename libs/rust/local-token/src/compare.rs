//! Constant-time byte comparison.
//!
//! `subtle`'s slice `ct_eq` returns early when lengths differ. The
//! comparison here always walks the longer input and folds the length
//! check into the same accumulator, so run time depends only on the
//! longer length, never on where the first mismatch sits.

use subtle::{Choice, ConstantTimeEq};

/// Compares two byte slices without early exit.
///
/// Positions past the end of the shorter slice read as zero; the length
/// comparison guarantees such inputs still compare unequal.
///
/// # Examples
///
/// ```
/// use local_token::constant_time_eq;
///
/// assert!(constant_time_eq(b"secret", b"secret"));
/// assert!(!constant_time_eq(b"secret", b"secreT"));
/// assert!(!constant_time_eq(b"secret", b"secret-and-more"));
/// ```
#[must_use]
pub fn constant_time_eq(expected: &[u8], candidate: &[u8]) -> bool {
    let len = expected.len().max(candidate.len());
    let mut equal: Choice = expected.len().ct_eq(&candidate.len());

    for i in 0..len {
        let a = expected.get(i).copied().unwrap_or(0);
        let b = candidate.get(i).copied().unwrap_or(0);
        equal &= a.ct_eq(&b);
    }

    equal.into()
}
