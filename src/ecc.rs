//! First-order Reed-Muller error correction.
//!
//! This module provides:
//! - `BitVector`, fixed-length bit storage wider than any machine word
//! - `ReedMuller`, the RM(1, r) encoder and noiseless decoder
//! - `HadamardDecoder`, maximum-likelihood correction via the fast Hadamard transform
//! - `NoiseChannel`, a binary symmetric channel for simulating transmission
//!
//! # Examples
//!
//! ```rust
//! use num_bigint::BigUint;
//! use reed_muller::ecc::ReedMuller;
//!
//! let rm = ReedMuller::new(3).unwrap();
//! let codeword = rm.encode(&BigUint::from(13u8)).unwrap();
//!
//! // Flip one bit; the decoder still finds the original codeword
//! let corrupted = &codeword ^ BigUint::from(0b0001_0000u8);
//! let corrected = rm.unalter(&corrupted).unwrap();
//! assert_eq!(corrected, codeword);
//! assert_eq!(rm.decode(&corrected).unwrap(), BigUint::from(13u8));
//! ```

use crate::error::Error;
use num_bigint::BigUint;
use rand::Rng;

/// Result type for error correction operations
pub type Result<T> = std::result::Result<T, Error>;

/// Trait for block codes working on fixed-length bit vectors
pub trait ErrorCorrection {
    /// Encode a message block into a codeword
    fn encode_block(&self, message: &BitVector) -> BitVector;

    /// Decode a codeword that is assumed to be free of errors
    fn decode_block(&self, codeword: &BitVector) -> BitVector;

    /// Replace a received word with the nearest valid codeword
    fn correct_block(&self, received: &BitVector) -> BitVector;
}

pub mod bit_vector;
pub use bit_vector::BitVector;

pub mod channel;
pub use channel::NoiseChannel;

pub mod hadamard;
pub use hadamard::{fast_hadamard_transform, strongest_coefficient, HadamardDecoder};

pub mod reed_muller;
pub use reed_muller::{create_reed_muller, OversizePolicy, ReedMuller, MAX_ORDER};

/// Encodes `message` with RM(1, `order`)
pub fn encode(order: usize, message: &BigUint) -> Result<BigUint> {
    ReedMuller::new(order)?.encode(message)
}

/// Decodes a noiseless RM(1, `order`) codeword
pub fn decode(order: usize, codeword: &BigUint) -> Result<BigUint> {
    ReedMuller::new(order)?.decode(codeword)
}

/// Returns the RM(1, `order`) codeword nearest to `received`
pub fn unalter(order: usize, received: &BigUint) -> Result<BigUint> {
    ReedMuller::new(order)?.unalter(received)
}

/// Flips each of the low `bit_width` bits of `value` with probability `flip_probability`
pub fn alter<R: Rng + ?Sized>(
    bit_width: usize,
    value: &BigUint,
    flip_probability: f64,
    rng: &mut R,
) -> Result<BigUint> {
    Ok(NoiseChannel::new(flip_probability)?.alter(value, bit_width, rng))
}

/// Sends a message through the whole pipeline: encode, channel noise,
/// correction and decoding. Returns the message as seen by the receiver.
pub fn transmit<C, R>(
    code: &C,
    channel: &NoiseChannel,
    message: &BitVector,
    rng: &mut R,
) -> BitVector
where
    C: ErrorCorrection + ?Sized,
    R: Rng + ?Sized,
{
    let codeword = code.encode_block(message);
    let received = channel.alter_bits(&codeword, rng);
    let corrected = code.correct_block(&received);
    code.decode_block(&corrected)
}
