//! Fixed-length bit vectors used for messages and codewords.
//!
//! RM(1, r) codewords are 2^r bits long, which outgrows native integer widths
//! as soon as r > 7. `BitVector` stores the bits in a `bitvec` buffer and
//! converts to and from arbitrary-precision integers at the API boundary.
//!
//! Bit `i` of a vector is bit `i` of its integer value, counted from the
//! least-significant end.

use crate::ecc::Result;
use crate::error::Error;
use bitvec::prelude::*;
use num_bigint::BigUint;
use num_traits::Zero;
use std::fmt::{self, Display, Formatter};

/// A value-type sequence of bits with a fixed length.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct BitVector {
    bits: BitVec<u64, Lsb0>,
}

impl BitVector {
    /// Creates a vector of `len` zero bits
    pub fn zeros(len: usize) -> Self {
        BitVector {
            bits: bitvec![u64, Lsb0; 0; len],
        }
    }

    /// Creates a vector of `len` one bits
    pub fn ones(len: usize) -> Self {
        BitVector {
            bits: bitvec![u64, Lsb0; 1; len],
        }
    }

    /// Builds a vector of `len` bits from the low bits of `value`.
    ///
    /// Bits of `value` at positions `len` and above are dropped.
    pub fn from_biguint(value: &BigUint, len: usize) -> Self {
        let mut vector = Self::zeros(len);
        let significant = usize::try_from(value.bits()).map_or(len, |bits| bits.min(len));
        for i in 0..significant {
            if value.bit(i as u64) {
                vector.bits.set(i, true);
            }
        }
        vector
    }

    /// Builds a vector of `len` bits from `value`, refusing values that do not fit.
    ///
    /// # Errors
    ///
    /// Returns `Error::InputTooLarge` if `value` needs more than `len` bits.
    pub fn try_from_biguint(value: &BigUint, len: usize) -> Result<Self> {
        let needed = value.bits();
        if needed > len as u64 {
            return Err(Error::InputTooLarge {
                length: needed as usize,
                max_length: len,
            });
        }
        Ok(Self::from_biguint(value, len))
    }

    /// Builds a vector of `len` bits from the low bits of a machine integer
    pub fn from_u64(value: u64, len: usize) -> Self {
        Self::from_biguint(&BigUint::from(value), len)
    }

    /// The canonical non-negative integer value of this vector
    pub fn to_biguint(&self) -> BigUint {
        let mut value = BigUint::zero();
        for i in self.bits.iter_ones() {
            value.set_bit(i as u64, true);
        }
        value
    }

    /// The integer value of this vector, if it fits in 64 bits
    pub fn to_u64(&self) -> Option<u64> {
        let mut value = 0u64;
        for i in self.bits.iter_ones() {
            if i >= 64 {
                return None;
            }
            value |= 1 << i;
        }
        Some(value)
    }

    /// Number of bits in the vector
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// Whether the vector holds no bits at all
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Reads bit `index`. Positions past the end read as zero, the way an
    /// integer has infinitely many leading zeros.
    pub fn get(&self, index: usize) -> bool {
        self.bits.get(index).map(|bit| *bit).unwrap_or(false)
    }

    /// Writes bit `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.len()`.
    pub fn set(&mut self, index: usize, value: bool) {
        self.bits.set(index, value);
    }

    /// Clears bit `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.len()`.
    pub fn clear(&mut self, index: usize) {
        self.bits.set(index, false);
    }

    /// Inverts bit `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.len()`.
    pub fn flip(&mut self, index: usize) {
        let current = self.bits[index];
        self.bits.set(index, !current);
    }

    /// Inverts every bit of the vector in place
    pub fn complement(&mut self) {
        for mut bit in self.bits.iter_mut() {
            *bit = !*bit;
        }
    }

    /// Returns a copy truncated or zero-extended to `len` bits
    pub fn resized(&self, len: usize) -> Self {
        let mut bits = self.bits.clone();
        bits.resize(len, false);
        BitVector { bits }
    }

    /// Number of set bits
    pub fn count_ones(&self) -> usize {
        self.bits.count_ones()
    }

    /// Indices of the set bits, lowest first
    pub fn iter_ones(&self) -> impl Iterator<Item = usize> + '_ {
        self.bits.iter_ones()
    }

    /// Number of positions at which two equal-length vectors differ.
    ///
    /// # Panics
    ///
    /// Panics if the lengths differ.
    pub fn hamming_distance(&self, other: &BitVector) -> usize {
        assert_eq!(
            self.len(),
            other.len(),
            "Hamming distance needs vectors of equal length"
        );
        self.bits
            .iter()
            .zip(other.bits.iter())
            .filter(|(a, b)| **a != **b)
            .count()
    }

    /// XORs `other` into this vector. Bits of `other` past the end of
    /// `self` are ignored.
    pub fn xor_assign(&mut self, other: &BitVector) {
        for i in other.iter_ones() {
            if i < self.len() {
                self.flip(i);
            }
        }
    }

    /// Borrow the underlying bits
    pub fn as_bitslice(&self) -> &BitSlice<u64, Lsb0> {
        &self.bits
    }
}

/// Formats the vector as a binary string, most-significant bit first,
/// padded to the full length.
impl Display for BitVector {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for bit in self.bits.iter().rev() {
            write!(f, "{}", if *bit { '1' } else { '0' })?;
        }
        Ok(())
    }
}
