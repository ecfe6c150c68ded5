//! A bit-exact, side-channel-*un*aware reference model for modular
//! exponentiation of arbitrary-precision unsigned integers, built on
//! Montgomery multiplication.
//!
//! This crate exists to give hardware designers and verification engineers a
//! golden model to check an RSA/modexp accelerator against: every operation
//! is specified down to the word-carry level, and nothing here is optimised
//! away or made constant-time, because doing either would make this crate
//! useless for catching the hardware bugs it is meant to expose.
//!
//! A big integer is represented as a word slice, **big-endian by word**:
//! index `0` holds the most significant 32-bit word, the last index holds
//! the least significant word. Bits within a word are ordered the normal
//! way (bit `i` has value `2^i`). Every function in this crate that takes
//! more than one big-integer slice requires them to share one length `L`;
//! that length is never encoded in the data itself, so leading zero words
//! are legal and simply mean zero, not truncation.
//!
//! ```
//! use modexp_core::mod_exp;
//!
//! // 3 ^ 7 mod 11 = 9
//! let x = [0x3u32];
//! let e = [0x7u32];
//! let m = [0xbu32];
//! let mut z = [0u32];
//! mod_exp(&x, &e, &m, &mut z);
//! assert_eq!(z, [0x9]);
//! ```
//!
//! The crate is organised the way its subject matter is layered:
//!
//! - [`word`] — carry-propagating primitives over word slices (add,
//!   subtract, the two single-bit shifts, comparison).
//! - [`remainder`] — a bit-serial shift-and-subtract remainder, the one
//!   piece of division this crate needs.
//! - [`montgomery`] — the Montgomery product and the Montgomery residue
//!   `2^(2N) mod M` built from it.
//! - [`modexp`] — the square-and-multiply exponentiation driver and the two
//!   public entry points, [`mod_exp`] and [`mod_exp2`].
//!
//! # Non-goals
//!
//! This is not a general big-integer library. There is no multiplication
//! independent of Montgomery form, no signed arithmetic, no division beyond
//! [`remainder::reduce_assign`], no GCD, no prime generation, no blinding,
//! and no constant-time guarantees. `mod_exp` is a deterministic pure
//! function of its inputs; there is no I/O and no concurrency inside the
//! crate (see the module docs on [`modexp`] for how that composes with
//! callers who do want concurrency).

pub mod modexp;
pub mod montgomery;
pub mod remainder;
pub mod word;

pub use modexp::{mod_exp, mod_exp2, mont_exp_with_scratch};
