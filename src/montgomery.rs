//! Montgomery product and Montgomery residue.
//!
//! Everything in this module assumes `M` is odd and nonzero and that all
//! operands are less than `2^N` where `N = 32 * L`; none of that is checked.
//! These are the two building blocks [`crate::modexp::mont_exp_with_scratch`]
//! composes into full exponentiation.

use crate::{
    remainder::reduce_assign,
    word::{add_assign, shl1_assign, shr1_assign, zero},
};

/// Computes `s := A * B * R^-1 mod M`, where `R = 2^(32 * L)`.
///
/// This is the bit-serial, interleaved-reduction formulation: `B` is scanned
/// one bit at a time, least significant word first and least significant
/// bit of each word first, and each step folds in one conditional `+= M`
/// (the reduction step) and one conditional `+= A` (the multiplication
/// step) before shifting right by one. Concretely, for each bit `b` of `B`:
///
/// ```text
/// q = lsb(s) ^ (b & lsb(A))   // the bit that predicts whether s - b*A is odd
/// if q == 1 { s += M }
/// if b == 1 { s += A }
/// s >>= 1
/// ```
///
/// Both conditional adds are wrap-around (mod `2^N`) additions; the
/// following right shift absorbs the bit that would otherwise have
/// overflowed out the top. After all `32 * L` bits of `B` have been
/// consumed, `s` satisfies `s ≡ A * B * R^-1 (mod M)` and `0 <= s < 2M` —
/// this routine deliberately does **not** perform the final conditional
/// `if s >= M { s -= M }` that classical Montgomery reduction
/// presentations include. Correctness is preserved anyway, because the
/// Montgomery exit conversion in [`crate::modexp::mont_exp_with_scratch`]
/// tolerates an input in `[0, 2M)`.
///
/// `s` is write-only: it is zeroed at the start of the call and never read
/// as an input, so it may be the same buffer used to hold a prior
/// computation's scratch without the caller clearing it first.
pub fn mont_prod(a: &[u32], b: &[u32], m: &[u32], s: &mut [u32]) {
    let len = m.len();
    debug_assert_eq!(a.len(), len, "operand length mismatch");
    debug_assert_eq!(b.len(), len, "operand length mismatch");
    debug_assert_eq!(s.len(), len, "operand length mismatch");

    zero(s);
    for word_index in (0..len).rev() {
        for bit in 0..32u32 {
            let b_bit = (b[word_index] >> bit) & 1;
            let q = (s[len - 1] ^ (a[len - 1] & b_bit.wrapping_neg())) & 1;

            if q == 1 {
                add_assign(s, m);
            }
            if b_bit == 1 {
                add_assign(s, a);
            }
            shr1_assign(s);
        }
    }
}

/// Computes `nr := 2^(2N) mod M`, where `N = 32 * M.len()`.
///
/// Starting from `nr = 1`, doubles `nr` and reduces it modulo `M` `2N`
/// times in a row (using [`reduce_assign`] with `temp` as scratch); each
/// iteration keeps `nr` below `M`, so after `2N` iterations `nr` holds
/// exactly `2^(2N) mod M`. This is the Montgomery residue: multiplying any
/// value by it via [`mont_prod`] converts that value into Montgomery form.
///
/// This costs `O(N^2)` word operations per reduction and is invoked `2N`
/// times, i.e. `O(N^3)` overall — acceptable for a reference model that
/// intentionally mirrors bit-serial hardware, not something a production
/// bignum library would do.
pub fn m_residue(m: &[u32], temp: &mut [u32], nr: &mut [u32]) {
    let len = m.len();
    debug_assert_eq!(temp.len(), len, "operand length mismatch");
    debug_assert_eq!(nr.len(), len, "operand length mismatch");

    zero(nr);
    nr[len - 1] = 1;

    let n = 32 * len;
    for _ in 0..(2 * n) {
        shl1_assign(nr);
        reduce_assign(nr, m, temp);
    }
}

#[cfg(test)]
mod tests {
    use num_bigint::BigUint;
    use proptest::prelude::*;

    use super::*;

    fn u64_to_words(v: u64) -> [u32; 2] {
        [(v >> 32) as u32, v as u32]
    }

    fn words_to_biguint(a: &[u32]) -> BigUint {
        let bytes: Vec<u8> = a.iter().flat_map(|w| w.to_be_bytes()).collect();
        BigUint::from_bytes_be(&bytes)
    }

    /// `m` must be prime: the oracle inverts `R mod m` via Fermat's little
    /// theorem (`R^(m-2) mod m`) rather than the extended Euclidean
    /// algorithm, since every modulus used in this module's tests is prime.
    fn mont_prod_oracle(a: u64, b: u64, m: u64) -> BigUint {
        let r = BigUint::from(1u64) << 64;
        let m_big = BigUint::from(m);
        let r_inv = r.modpow(&(m_big.clone() - 2u64), &m_big);
        let product = BigUint::from(a) * BigUint::from(b);
        (product * r_inv) % m_big
    }

    #[test]
    fn mont_prod_against_oracle_small() {
        let m = 1_000_000_007u64; // prime
        let a = 123_456u64;
        let b = 987_654u64;
        let mut s = [0u32; 2];
        mont_prod(&u64_to_words(a), &u64_to_words(b), &u64_to_words(m), &mut s);
        assert_eq!(words_to_biguint(&s), mont_prod_oracle(a, b, m));
    }

    #[test]
    fn m_residue_matches_definition() {
        let m = 1_000_000_007u64;
        let mut temp = [0u32; 2];
        let mut nr = [0u32; 2];
        m_residue(&u64_to_words(m), &mut temp, &mut nr);

        let expected = (BigUint::from(1u64) << 128) % BigUint::from(m);
        assert_eq!(words_to_biguint(&nr), expected);
    }

    proptest! {
        #[test]
        fn round_trip_through_montgomery_form(
            a in 0u64..1_000_000_007,
        ) {
            let m = 1_000_000_007u64;
            let mut temp = [0u32; 2];
            let mut nr = [0u32; 2];
            m_residue(&u64_to_words(m), &mut temp, &mut nr);

            let mut a_hat = [0u32; 2];
            mont_prod(&u64_to_words(a), &nr, &u64_to_words(m), &mut a_hat);

            let mut one = [0u32; 2];
            one[1] = 1;
            let mut back = [0u32; 2];
            mont_prod(&a_hat, &one, &u64_to_words(m), &mut back);

            prop_assert_eq!(words_to_biguint(&back) % BigUint::from(m), BigUint::from(a));
        }
    }
}
