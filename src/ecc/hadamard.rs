//! Maximum-likelihood decoding of RM(1, r) with the fast Hadamard transform.
//!
//! Mapping a received word to ±1 (bit 0 -> +1, bit 1 -> -1) turns every
//! RM(1, r) codeword into a row of the 2^r x 2^r Hadamard matrix or its
//! negation. Correlating the received vector against all rows at once is a
//! Walsh-Hadamard transform, which the butterfly computes in O(r * 2^r)
//! instead of O(4^r).
//!
//! Coefficient k of the transform equals `2^r - 2 * d(y, c_k)` where `c_k`
//! is the codeword whose linear part has mask k and no constant term. The
//! coefficient with the largest magnitude therefore names the nearest
//! codeword, and its sign tells whether the constant term is set.

use crate::ecc::bit_vector::BitVector;
use crate::ecc::reed_muller::ReedMuller;
use crate::ecc::ErrorCorrection;
use log::{debug, trace};

/// Nearest-codeword decoder for an RM(1, r) code
#[derive(Debug, Clone, Copy)]
pub struct HadamardDecoder {
    code: ReedMuller,
}

impl HadamardDecoder {
    /// Creates a decoder for the given code
    pub fn new(code: ReedMuller) -> Self {
        HadamardDecoder { code }
    }

    /// The code this decoder corrects
    pub fn code(&self) -> &ReedMuller {
        &self.code
    }

    /// Computes the Hadamard spectrum of a received word.
    ///
    /// The word is truncated or zero-extended to 2^r bits first.
    pub fn spectrum(&self, received: &BitVector) -> Vec<i64> {
        let signal: Vec<i64> = (0..self.code.codeword_bits())
            .map(|i| if received.get(i) { -1 } else { 1 })
            .collect();
        fast_hadamard_transform(&signal)
    }

    /// Finds the message whose codeword is nearest to `received`.
    ///
    /// Ties between coefficients of equal magnitude go to the lowest index.
    pub fn most_likely_message(&self, received: &BitVector) -> BitVector {
        let order = self.code.order();
        let spectrum = self.spectrum(received);
        let (position, coefficient) = strongest_coefficient(&spectrum);

        trace!(
            "RM(1, {}) spectrum peak at {} with coefficient {}",
            order,
            position,
            coefficient
        );

        // The index holds w_0..w_{r-1}; a negative peak means the
        // complemented codeword matched, i.e. w_r = 1
        let mut message = BitVector::from_u64(position as u64, order + 1);
        if coefficient < 0 {
            message.set(order, true);
        }
        message
    }

    /// Returns the valid codeword nearest to `received`.
    ///
    /// The output is a codeword, re-encoded from the most likely message. A
    /// word that is already a codeword comes back unchanged.
    pub fn unalter(&self, received: &BitVector) -> BitVector {
        let message = self.most_likely_message(received);
        let corrected = self.code.encode_block(&message);

        let corrections = corrected.hamming_distance(&received.resized(corrected.len()));
        if corrections > 0 {
            debug!(
                "RM(1, {}) decoder corrected {} bit(s)",
                self.code.order(),
                corrections
            );
        }

        corrected
    }
}

/// Unnormalised Walsh-Hadamard transform of a signal whose length is a power
/// of two.
///
/// Rounds run from the highest bit down. Each round reads only the previous
/// round's output, so the two buffers are swapped rather than updated in place.
///
/// # Panics
///
/// Panics if the signal length is not a power of two.
pub fn fast_hadamard_transform(signal: &[i64]) -> Vec<i64> {
    let length = signal.len();
    assert!(
        length.is_power_of_two(),
        "Hadamard transform length must be a power of 2, got {}",
        length
    );
    let rounds = length.trailing_zeros();

    let mut current = signal.to_vec();
    let mut next = vec![0i64; length];

    for round in (0..rounds).rev() {
        let half = 1usize << round;
        for i in 0..length {
            next[i] = if i & half != 0 {
                current[i - half] - current[i]
            } else {
                current[i] + current[i + half]
            };
        }
        std::mem::swap(&mut current, &mut next);
    }

    current
}

/// Index and value of the coefficient with the largest magnitude.
///
/// The lowest index wins ties. An empty slice yields `(0, 0)`.
pub fn strongest_coefficient(coefficients: &[i64]) -> (usize, i64) {
    let mut best = (0, coefficients.first().copied().unwrap_or(0));
    for (index, &value) in coefficients.iter().enumerate().skip(1) {
        if value.abs() > best.1.abs() {
            best = (index, value);
        }
    }
    best
}
