//! Binary symmetric channel.
//!
//! Every bit of a word is flipped independently with a fixed probability p.
//! The random source is passed in by the caller, so a seeded generator gives
//! reproducible noise.

use crate::ecc::bit_vector::BitVector;
use crate::ecc::Result;
use crate::error::Error;
use crate::pgm::PgmImage;
use log::{debug, trace};
use num_bigint::BigUint;
use rand::Rng;

/// A binary symmetric channel with flip probability p
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NoiseChannel {
    flip_probability: f64,
}

impl NoiseChannel {
    /// Creates a new channel.
    ///
    /// # Arguments
    ///
    /// * `flip_probability` - Probability that any single bit is inverted
    ///
    /// # Returns
    ///
    /// A new `NoiseChannel` or an error if the probability is outside [0, 1]
    pub fn new(flip_probability: f64) -> Result<Self> {
        // Also rejects NaN
        if !(0.0..=1.0).contains(&flip_probability) {
            return Err(Error::InvalidParameter(format!(
                "Flip probability must be between 0 and 1, got {}",
                flip_probability
            )));
        }

        debug!("Binary symmetric channel with p = {}", flip_probability);
        Ok(NoiseChannel { flip_probability })
    }

    /// The probability of flipping a bit
    pub fn flip_probability(&self) -> f64 {
        self.flip_probability
    }

    /// Passes a word through the channel.
    ///
    /// One uniform sample in [0, 1) is drawn per bit, lowest bit first; the
    /// bit is flipped when the sample is below p. p = 0 never flips and
    /// p = 1 always flips.
    pub fn alter_bits<R: Rng + ?Sized>(&self, word: &BitVector, rng: &mut R) -> BitVector {
        let mut altered = word.clone();
        let mut flips = 0;
        for i in 0..word.len() {
            let sample: f64 = rng.gen();
            if sample < self.flip_probability {
                altered.flip(i);
                flips += 1;
            }
        }
        trace!("Channel flipped {} of {} bits", flips, word.len());
        altered
    }

    /// Passes the low `bit_width` bits of an integer through the channel.
    /// Bits at `bit_width` and above are left as they are.
    pub fn alter<R: Rng + ?Sized>(
        &self,
        value: &BigUint,
        bit_width: usize,
        rng: &mut R,
    ) -> BigUint {
        let low = BitVector::from_biguint(value, bit_width);
        let noise = self.alter_bits(&BitVector::zeros(bit_width), rng);
        let mut altered = low;
        altered.xor_assign(&noise);

        let high = (value >> bit_width) << bit_width;
        high + altered.to_biguint()
    }

    /// Passes every pixel value of an image through the channel.
    ///
    /// Values are processed in order so a seeded generator reproduces the
    /// same noise.
    pub fn alter_image<R: Rng + ?Sized>(
        &self,
        image: &PgmImage,
        bit_width: usize,
        rng: &mut R,
    ) -> Result<PgmImage> {
        image.map_values(|value| Ok(self.alter(value, bit_width, rng)))
    }
}
