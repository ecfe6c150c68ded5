//! Square-and-multiply modular exponentiation, and the public entry points.
//!
//! This module draws the same line the reference C model draws between a
//! pure, allocation-free driver ([`mont_exp_with_scratch`]) and an entry
//! point that owns scratch-buffer allocation ([`mod_exp`], [`mod_exp2`]).
//! The driver is exposed separately because a verification harness that
//! re-runs exponentiation many times over the same word length can allocate
//! scratch once and drive it directly, instead of paying an allocation per
//! call.
//!
//! Nothing in this module spawns a thread or retains state between calls:
//! every function here takes its operands and scratch as borrowed slices and
//! returns having written its output slice, so two independent calls (even
//! concurrent ones, each with its own buffers) cannot observe each other.

use crate::{
    montgomery::{m_residue, mont_prod},
    word::zero,
};

/// Computes `z := x^e mod m`, given every scratch buffer as a parameter.
///
/// `x`, `e`, `m`, and `z` must all share one length `L`; `nr`, `p`, `one`,
/// `temp`, and `temp2` are scratch buffers of the same length `L`, whose
/// incoming contents are irrelevant (they are fully overwritten). None of
/// this is checked beyond a `debug_assert_eq!` on lengths.
///
/// The algorithm, with `R = 2^(32*L)` and `â` denoting the Montgomery image
/// `a * R mod m` of a value `a`:
///
/// 1. `nr := 2^(2N) mod m` ([`m_residue`]).
/// 2. `ẑ := MontProd(1, nr, m)` — this is `R mod m`, i.e. `1̂`.
/// 3. `p̂ := MontProd(x, nr, m)` — this is `x̂`.
/// 4. `n := ` index of the highest set bit of `e`, plus one (`0` if `e` is
///    zero). Scanning `e` to find `n` up front is a pure optimisation that
///    does not change the result; a caller could loop the full `32*L`
///    iterations unconditionally and get the same `z`.
/// 5. For `i` from `0` to `n-1`, scanning bits of `e` from least to most
///    significant: if bit `i` of `e` is `1`, `ẑ := MontProd(ẑ, p̂, m)`; then
///    `p̂ := MontProd(p̂, p̂, m)` unconditionally.
/// 6. `z := MontProd(1, ẑ, m)` — the exit conversion out of Montgomery form.
///
/// `MontProd` cannot write into one of its own input buffers, so step 5 and
/// step 2/3 route their results through `temp2` and then copy `temp2` back
/// into `ẑ`/`p̂`/`z` with `copy_from_slice`.
#[allow(clippy::too_many_arguments)]
pub fn mont_exp_with_scratch(
    x: &[u32],
    e: &[u32],
    m: &[u32],
    nr: &mut [u32],
    p: &mut [u32],
    one: &mut [u32],
    temp: &mut [u32],
    temp2: &mut [u32],
    z: &mut [u32],
) {
    let len = m.len();
    debug_assert_eq!(x.len(), len, "operand length mismatch");
    debug_assert_eq!(e.len(), len, "operand length mismatch");
    debug_assert_eq!(z.len(), len, "operand length mismatch");
    for scratch in [nr.len(), p.len(), one.len(), temp.len(), temp2.len()] {
        debug_assert_eq!(scratch, len, "scratch buffer length mismatch");
    }

    mont_exp_inner(len, x, e, m, nr, p, one, temp, temp2, z);
}

/// Shared core of [`mont_exp_with_scratch`] and [`mod_exp2`]: identical
/// except for how many low bits of `e` the exponentiation loop scans.
#[allow(clippy::too_many_arguments)]
fn mont_exp_inner(
    len: usize,
    x: &[u32],
    e: &[u32],
    m: &[u32],
    nr: &mut [u32],
    p: &mut [u32],
    one: &mut [u32],
    temp: &mut [u32],
    temp2: &mut [u32],
    z: &mut [u32],
) {
    // 1. Nr := 2^(2N) mod M.
    m_residue(m, temp, nr);

    // 2. Z0 := MontProd(1, Nr, M) = R mod M = 1-hat.
    zero(one);
    one[len - 1] = 1;
    mont_prod(one, nr, m, z);

    // 3. P0 := MontProd(X, Nr, M) = X-hat.
    mont_prod(x, nr, m, p);

    // 4. n := position of the highest set bit of E, plus one.
    let n = find_n(e);

    // 5. Scan bits of E from LSB to MSB, squaring P and conditionally
    //    folding it into Z.
    for i in 0..n {
        let e_word = e[e.len() - 1 - (i / 32)];
        let e_bit = (e_word >> (i % 32)) & 1;

        if e_bit == 1 {
            mont_prod(z, p, m, temp2);
            z.copy_from_slice(temp2);
        }

        mont_prod(p, p, m, temp2);
        p.copy_from_slice(temp2);
    }

    // 6. Zn := MontProd(1, Zn, M) — exit conversion back to plain form.
    mont_prod(one, z, m, temp2);
    z.copy_from_slice(temp2);
}

/// Returns the index of the highest set bit of `e`, plus one, or `0` if `e`
/// is entirely zero. Bit `0` is the least significant bit of the last
/// (least significant) word.
fn find_n(e: &[u32]) -> usize {
    let total_bits = 32 * e.len();
    let mut n = 0;
    for i in 0..total_bits {
        let word = e[e.len() - 1 - (i / 32)];
        let bit = (word >> (i % 32)) & 1;
        if bit == 1 {
            n = i + 1;
        }
    }
    n
}

/// Computes `z := x^e mod m`, allocating its own scratch buffers.
///
/// `x`, `e`, `m`, and `z` must all share one length `L = m.len()`. This
/// allocates five zeroed `Vec<u32>` scratch buffers of length `L`, runs
/// [`mont_exp_with_scratch`], and lets the buffers drop at the end of the
/// call — there is no manual `free` to forget, and Rust's global allocator
/// already aborts the process with a diagnostic on allocation failure, which
/// is exactly the "fatal, with a short diagnostic" behaviour this crate's
/// only failure mode calls for (see the crate-level docs on error handling).
///
/// # Examples
///
/// ```
/// use modexp_core::mod_exp;
///
/// let x = [0x3u32];
/// let e = [0x7u32];
/// let m = [0xbu32];
/// let mut z = [0u32];
/// mod_exp(&x, &e, &m, &mut z);
/// assert_eq!(z, [0x9]); // 3^7 mod 11 = 9
/// ```
pub fn mod_exp(x: &[u32], e: &[u32], m: &[u32], z: &mut [u32]) {
    let len = m.len();
    debug_assert_eq!(x.len(), len, "operand length mismatch");
    debug_assert_eq!(e.len(), len, "operand length mismatch");
    debug_assert_eq!(z.len(), len, "operand length mismatch");

    let mut nr = vec![0u32; len];
    let mut p = vec![0u32; len];
    let mut one = vec![0u32; len];
    let mut temp = vec![0u32; len];
    let mut temp2 = vec![0u32; len];

    mont_exp_inner(len, x, e, m, &mut nr, &mut p, &mut one, &mut temp, &mut temp2, z);
}

/// The experimental two-length variant: permits the exponent slice to be
/// shorter than the modulus slice.
///
/// `x`, `m`, and `z` must share length `L = m.len()`; `e` must have length
/// `le`, with `le <= L`. The exponentiation loop in
/// [`mont_exp_with_scratch`] scans `32 * L` candidate bit positions of `e`;
/// this variant scans only `32 * le`, indexing `e[le - 1 - (i / 32)]`
/// instead of `e[L - 1 - (i / 32)]`. No other behaviour changes — `x`, `m`,
/// and `z` are still full `L`-word values.
///
/// # Panics
///
/// Panics (via the internal `debug_assert!`, in debug builds only) if
/// `e.len() > m.len()`; release builds leave this as an unchecked caller
/// precondition, consistent with this crate's error-handling stance.
pub fn mod_exp2(le: usize, x: &[u32], e: &[u32], m: &[u32], z: &mut [u32]) {
    let len = m.len();
    debug_assert_eq!(x.len(), len, "operand length mismatch");
    debug_assert_eq!(z.len(), len, "operand length mismatch");
    debug_assert_eq!(e.len(), le, "exponent slice length does not match le");
    debug_assert!(le <= len, "exponent length must not exceed modulus length");

    let mut nr = vec![0u32; len];
    let mut p = vec![0u32; len];
    let mut one = vec![0u32; len];
    let mut temp = vec![0u32; len];
    let mut temp2 = vec![0u32; len];

    // 1-3. identical to mont_exp_inner's setup, reused verbatim.
    m_residue(m, &mut temp, &mut nr);
    zero(&mut one);
    one[len - 1] = 1;
    mont_prod(&one, &nr, m, z);
    mont_prod(x, &nr, m, &mut p);

    for i in 0..(32 * le) {
        let e_word = e[le - 1 - (i / 32)];
        let e_bit = (e_word >> (i % 32)) & 1;

        if e_bit == 1 {
            mont_prod(z, &p, m, &mut temp2);
            z.copy_from_slice(&temp2);
        }

        mont_prod(&p, &p, m, &mut temp2);
        p.copy_from_slice(&temp2);
    }

    mont_prod(&one, z, m, &mut temp2);
    z.copy_from_slice(&temp2);
}
