//! Bit-serial remainder: `rem := a mod modulus`, by repeated shift-and-subtract.
//!
//! This is the one piece of division the crate needs — just enough to
//! compute the Montgomery residue in [`crate::montgomery::m_residue`] — and
//! it is deliberately the slowest possible correct implementation: align the
//! modulus against the remainder by doubling it as far as it will fit, then
//! subtract, and repeat. A production bignum library would reach for a
//! proper long-division algorithm; this crate does not, because matching the
//! anticipated hardware's bit-serial behaviour is the entire point.

use crate::word::{greater_than, shl1_assign, sub_assign};

/// Reduces `rem` modulo `modulus` in place, using `temp` as scratch.
///
/// `rem` must already hold the value to reduce (the caller copies the
/// dividend into it before calling, e.g. via `rem.copy_from_slice(a)`) and
/// `modulus` must be nonzero — neither is checked, per this crate's
/// no-defensive-checks stance on caller preconditions. `temp` is entirely
/// overwritten and left in an unspecified state; it carries no meaning after
/// the call returns.
///
/// The algorithm: while `rem >= modulus`, copy `modulus` into `temp` and
/// repeatedly double `temp` (via [`shl1_assign`]) for as long as doubling it
/// again would neither overflow its top bit nor exceed `rem`, subtracting
/// the largest such `temp` from `rem` each time the inner loop stops
/// doubling. This converges because the outer loop strictly decreases `rem`
/// and the inner loop cannot double forever (its own top-bit guard stops
/// it). On return, `0 <= rem < modulus`.
///
/// If `a < modulus` on entry, the outer loop never runs and `rem` is
/// returned unchanged.
///
/// # Panics
///
/// Never terminates (rather than panicking) if `modulus` is all zero, since
/// `rem >= 0` is then always true. This mirrors the reference model, which
/// places the same precondition on its caller.
pub fn reduce_assign(rem: &mut [u32], modulus: &[u32], temp: &mut [u32]) {
    debug_assert_eq!(rem.len(), modulus.len(), "operand length mismatch");
    debug_assert_eq!(rem.len(), temp.len(), "operand length mismatch");

    while !greater_than(modulus, rem) {
        temp.copy_from_slice(modulus);

        while (temp[0] & 0x8000_0000) == 0 && !greater_than(temp, rem) {
            sub_assign(rem, temp);
            shl1_assign(temp);
        }
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn u64_to_words(v: u64) -> [u32; 2] {
        [(v >> 32) as u32, v as u32]
    }

    fn words_to_u64(a: &[u32]) -> u64 {
        (u64::from(a[0]) << 32) | u64::from(a[1])
    }

    #[test]
    fn smaller_than_modulus_is_unchanged() {
        let mut rem = u64_to_words(5);
        let modulus = u64_to_words(11);
        let mut temp = [0u32; 2];
        reduce_assign(&mut rem, &modulus, &mut temp);
        assert_eq!(words_to_u64(&rem), 5);
    }

    #[test]
    fn reduces_to_below_modulus() {
        let mut rem = u64_to_words(123_456_789);
        let modulus = u64_to_words(1_000);
        let mut temp = [0u32; 2];
        reduce_assign(&mut rem, &modulus, &mut temp);
        assert_eq!(words_to_u64(&rem), 123_456_789 % 1_000);
    }

    proptest! {
        #[test]
        fn matches_native_remainder(a in any::<u64>(), m in 1u64..u64::MAX) {
            let mut rem = u64_to_words(a);
            let modulus = u64_to_words(m);
            let mut temp = [0u32; 2];
            reduce_assign(&mut rem, &modulus, &mut temp);
            prop_assert_eq!(words_to_u64(&rem), a % m);
        }
    }
}
