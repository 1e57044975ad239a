//! First-order Reed-Muller code RM(1, r).
//!
//! RM(1, r) encodes r + 1 message bits into a 2^r-bit codeword. Each codeword
//! is the evaluation table of an affine Boolean function on r variables:
//!
//! ```text
//! c(i) = w_r ^ (x_0(i) & w_0) ^ (x_1(i) & w_1) ^ ... ^ (x_{r-1}(i) & w_{r-1})
//! ```
//!
//! where `x_j(i)` is bit j of the position i. Equivalently the codeword is the
//! message multiplied by a generator matrix whose first r rows hold the binary
//! expansions of the column indices and whose last row is all ones. For r = 3:
//!
//! ```text
//!  0 1 0 1 0 1 0 1
//!  0 0 1 1 0 0 1 1
//!  0 0 0 0 1 1 1 1
//!  1 1 1 1 1 1 1 1
//! ```
//!
//! Properties:
//! - Minimum distance 2^(r-1)
//! - Corrects up to 2^(r-2) - 1 bit errors with nearest-codeword decoding
//!
//! # Applications
//!
//! - Deep-space telemetry (Mariner 9 used RM(1, 5))
//! - Inner code of concatenated schemes such as HQC
//! - Spread-spectrum and CDMA spreading sequences

use crate::ecc::bit_vector::BitVector;
use crate::ecc::hadamard::HadamardDecoder;
use crate::ecc::{ErrorCorrection, Result};
use crate::error::Error;
use crate::pgm::PgmImage;
use log::debug;
use num_bigint::BigUint;

/// Largest supported order r. Codewords hold 2^20 bits at this order.
pub const MAX_ORDER: usize = 20;

/// What to do with integer inputs wider than the code allows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OversizePolicy {
    /// Keep only the low bits (r + 1 for messages, 2^r for codewords)
    #[default]
    Truncate,
    /// Fail with `Error::InputTooLarge`
    Reject,
}

/// An RM(1, r) code. Carries only its order and oversize policy, so it is
/// `Copy` and can be shared freely between threads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReedMuller {
    /// Number of variables r
    order: usize,
    /// Handling of integers wider than the message or codeword
    policy: OversizePolicy,
}

impl ReedMuller {
    /// Creates a new RM(1, r) code that truncates oversized inputs.
    ///
    /// # Arguments
    ///
    /// * `order` - The number of variables r. Messages are r + 1 bits,
    ///   codewords 2^r bits. r = 0 gives the one-bit identity code.
    ///
    /// # Returns
    ///
    /// A new `ReedMuller` instance or an error if r exceeds `MAX_ORDER`
    pub fn new(order: usize) -> Result<Self> {
        Self::with_policy(order, OversizePolicy::Truncate)
    }

    /// Creates a new RM(1, r) code with an explicit oversize policy
    pub fn with_policy(order: usize, policy: OversizePolicy) -> Result<Self> {
        if order > MAX_ORDER {
            return Err(Error::InvalidParameter(format!(
                "Reed-Muller order must be at most {}, got {}",
                MAX_ORDER, order
            )));
        }

        debug!(
            "RM(1, {}) code: {} message bits, {} codeword bits, {:?} oversized inputs",
            order,
            order + 1,
            1usize << order,
            policy
        );

        Ok(ReedMuller { order, policy })
    }

    /// The order r
    pub fn order(&self) -> usize {
        self.order
    }

    /// The oversize policy in effect
    pub fn policy(&self) -> OversizePolicy {
        self.policy
    }

    /// Message length in bits (r + 1)
    pub fn message_bits(&self) -> usize {
        self.order + 1
    }

    /// Codeword length in bits (2^r)
    pub fn codeword_bits(&self) -> usize {
        1 << self.order
    }

    /// Minimum Hamming distance between two distinct codewords.
    ///
    /// This is 2^(r-1); for r = 0 the only two codewords are 0 and 1.
    pub fn minimum_distance(&self) -> usize {
        if self.order == 0 {
            1
        } else {
            1 << (self.order - 1)
        }
    }

    /// Number of bit errors that nearest-codeword decoding always corrects
    pub fn correctable_errors(&self) -> usize {
        if self.order < 2 {
            0
        } else {
            (1 << (self.order - 2)) - 1
        }
    }

    /// Encodes a message given as an integer.
    ///
    /// # Arguments
    ///
    /// * `message` - Message value; bit j is the coefficient w_j
    ///
    /// # Returns
    ///
    /// The 2^r-bit codeword value. Fails only under `OversizePolicy::Reject`
    /// when `message` needs more than r + 1 bits.
    pub fn encode(&self, message: &BigUint) -> Result<BigUint> {
        let message = self.fit(message, self.message_bits())?;
        Ok(self.encode_block(&message).to_biguint())
    }

    /// Decodes a noiseless codeword given as an integer.
    ///
    /// No validity check is made: a corrupted word yields some message
    /// without an error. Route noisy words through [`ReedMuller::unalter`]
    /// first.
    pub fn decode(&self, codeword: &BigUint) -> Result<BigUint> {
        let codeword = self.fit(codeword, self.codeword_bits())?;
        Ok(self.decode_block(&codeword).to_biguint())
    }

    /// Replaces a possibly corrupted word with the nearest valid codeword.
    ///
    /// The result is a codeword, not a message; pass it to
    /// [`ReedMuller::decode`] to recover the message.
    pub fn unalter(&self, received: &BigUint) -> Result<BigUint> {
        let received = self.fit(received, self.codeword_bits())?;
        Ok(self.correct_block(&received).to_biguint())
    }

    /// Encodes every pixel value of an image
    pub fn encode_image(&self, image: &PgmImage) -> Result<PgmImage> {
        image.par_map_values(|value| self.encode(value))
    }

    /// Decodes every pixel value of an image
    pub fn decode_image(&self, image: &PgmImage) -> Result<PgmImage> {
        image.par_map_values(|value| self.decode(value))
    }

    /// Corrects every pixel codeword of an image
    pub fn unalter_image(&self, image: &PgmImage) -> Result<PgmImage> {
        image.par_map_values(|value| self.unalter(value))
    }

    /// Converts an integer to a bit vector of `width` bits, applying the
    /// oversize policy.
    fn fit(&self, value: &BigUint, width: usize) -> Result<BitVector> {
        match self.policy {
            OversizePolicy::Truncate => Ok(BitVector::from_biguint(value, width)),
            OversizePolicy::Reject => BitVector::try_from_biguint(value, width),
        }
    }
}

impl ErrorCorrection for ReedMuller {
    fn encode_block(&self, message: &BitVector) -> BitVector {
        let length = self.codeword_bits();

        // Message bit r multiplies the all-ones row
        let constant = message.get(self.order);

        // Message bits 0..r multiply the coordinate rows. Packing them into a
        // mask turns the dot product with column i into the parity of (i & mask).
        let linear = (0..self.order)
            .filter(|&j| message.get(j))
            .fold(0usize, |mask, j| mask | (1 << j));

        let mut codeword = BitVector::zeros(length);
        for i in 0..length {
            let parity = (i & linear).count_ones() % 2 == 1;
            if parity != constant {
                codeword.set(i, true);
            }
        }
        codeword
    }

    fn decode_block(&self, codeword: &BitVector) -> BitVector {
        let mut word = codeword.resized(self.codeword_bits());
        let mut message = BitVector::zeros(self.message_bits());

        // Position 0 evaluates every coordinate function to 0, so it carries
        // the constant term alone.
        let constant = word.get(0);
        if constant {
            word.complement();
        }

        // Position 2^j has only coordinate j set
        for j in 0..self.order {
            message.set(j, word.get(1 << j));
        }
        message.set(self.order, constant);

        message
    }

    fn correct_block(&self, received: &BitVector) -> BitVector {
        HadamardDecoder::new(*self).unalter(received)
    }
}

/// Creates an RM(1, r) code with the default truncating policy
pub fn create_reed_muller(order: usize) -> Result<ReedMuller> {
    ReedMuller::new(order)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn big(value: u64) -> BigUint {
        BigUint::from(value)
    }

    /// Evaluates the defining parity relation directly
    fn expected_bit(order: usize, message: u64, position: usize) -> bool {
        let mut bit = (message >> order) & 1 == 1;
        for j in 0..order {
            let x_j = (position >> j) & 1 == 1;
            let w_j = (message >> j) & 1 == 1;
            bit ^= x_j && w_j;
        }
        bit
    }

    #[test]
    fn test_reed_muller_creation() {
        let rm = ReedMuller::new(3).unwrap();
        assert_eq!(rm.order(), 3);
        assert_eq!(rm.message_bits(), 4);
        assert_eq!(rm.codeword_bits(), 8);
        assert_eq!(rm.minimum_distance(), 4);
        assert_eq!(rm.correctable_errors(), 1);
        assert_eq!(rm.policy(), OversizePolicy::Truncate);

        let rm = ReedMuller::new(5).unwrap();
        assert_eq!(rm.codeword_bits(), 32);
        assert_eq!(rm.minimum_distance(), 16);
        assert_eq!(rm.correctable_errors(), 7);

        assert!(ReedMuller::new(MAX_ORDER).is_ok());
        assert!(matches!(
            ReedMuller::new(MAX_ORDER + 1),
            Err(Error::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_encode_r3_message_13() {
        // 13 = 0b1101: w0 = 1, w1 = 0, w2 = 1, w3 = 1.
        // c(i) = 1 ^ x0(i) ^ x2(i) -> bits (i = 0..7): 1 0 1 0 0 1 0 1
        let rm = ReedMuller::new(3).unwrap();
        let codeword = rm.encode(&big(13)).unwrap();
        assert_eq!(codeword, big(0b1010_0101));
        assert_eq!(rm.decode(&codeword).unwrap(), big(13));
    }

    #[test]
    fn test_encode_matches_generator_rows() {
        // Each unit message selects one row of the generator matrix
        let rm = ReedMuller::new(3).unwrap();
        assert_eq!(rm.encode(&big(0b0001)).unwrap(), big(0b1010_1010));
        assert_eq!(rm.encode(&big(0b0010)).unwrap(), big(0b1100_1100));
        assert_eq!(rm.encode(&big(0b0100)).unwrap(), big(0b1111_0000));
        assert_eq!(rm.encode(&big(0b1000)).unwrap(), big(0b1111_1111));
        assert_eq!(rm.encode(&big(0)).unwrap(), big(0));
    }

    #[test]
    fn test_codeword_validity() {
        for order in 0..=6 {
            let rm = ReedMuller::new(order).unwrap();
            for message in 0..(1u64 << (order + 1)) {
                let codeword = rm.encode_block(&BitVector::from_u64(message, order + 1));
                assert_eq!(codeword.len(), 1 << order);
                for i in 0..codeword.len() {
                    assert_eq!(
                        codeword.get(i),
                        expected_bit(order, message, i),
                        "r = {}, message = {}, position = {}",
                        order,
                        message,
                        i
                    );
                }
            }
        }
    }

    #[test]
    fn test_roundtrip_noiseless() {
        for order in 0..=8 {
            let rm = ReedMuller::new(order).unwrap();
            for message in 0..(1u64 << (order + 1)) {
                let codeword = rm.encode(&big(message)).unwrap();
                assert_eq!(rm.decode(&codeword).unwrap(), big(message));
            }
        }
    }

    #[test]
    fn test_minimum_distance() {
        for order in 2..=5 {
            let rm = ReedMuller::new(order).unwrap();
            let count = 1u64 << (order + 1);
            let codewords: Vec<BitVector> = (0..count)
                .map(|m| rm.encode_block(&BitVector::from_u64(m, order + 1)))
                .collect();
            for a in 0..codewords.len() {
                for b in (a + 1)..codewords.len() {
                    let distance = codewords[a].hamming_distance(&codewords[b]);
                    // Complementary pairs sit at distance 2^r, everything else at 2^(r-1)
                    if a ^ b == 1 << order {
                        assert_eq!(distance, 1 << order);
                    } else {
                        assert_eq!(distance, rm.minimum_distance());
                    }
                }
            }
        }
    }

    #[test]
    fn test_r1_repetition_code() {
        // r = 1: codewords are 00, 10, 11, 01 (bit 1 written first)
        let rm = ReedMuller::new(1).unwrap();
        let expected = [0b00u64, 0b10, 0b11, 0b01];
        for (message, &codeword) in expected.iter().enumerate() {
            let encoded = rm.encode(&big(message as u64)).unwrap();
            assert_eq!(encoded, big(codeword));
            assert_eq!(rm.decode(&encoded).unwrap(), big(message as u64));
            assert_eq!(rm.unalter(&encoded).unwrap(), encoded);
        }
    }

    #[test]
    fn test_r0_degenerate_code() {
        let rm = ReedMuller::new(0).unwrap();
        assert_eq!(rm.message_bits(), 1);
        assert_eq!(rm.codeword_bits(), 1);
        assert_eq!(rm.encode(&big(1)).unwrap(), big(1));
        assert_eq!(rm.encode(&big(0)).unwrap(), big(0));
        assert_eq!(rm.decode(&big(1)).unwrap(), big(1));
        assert_eq!(rm.unalter(&big(1)).unwrap(), big(1));
        assert_eq!(rm.unalter(&big(0)).unwrap(), big(0));
    }

    #[test]
    fn test_oversized_truncate() {
        let rm = ReedMuller::new(3).unwrap();
        // 0b1_0000 + 13 keeps only its low four bits
        assert_eq!(rm.encode(&big(16 + 13)).unwrap(), rm.encode(&big(13)).unwrap());
        // Codeword bits above 2^r are dropped before decoding
        let codeword = rm.encode(&big(13)).unwrap();
        assert_eq!(rm.decode(&(codeword + big(1 << 8))).unwrap(), big(13));
    }

    #[test]
    fn test_oversized_reject() {
        let rm = ReedMuller::with_policy(3, OversizePolicy::Reject).unwrap();
        assert_eq!(
            rm.encode(&big(16)),
            Err(Error::InputTooLarge {
                length: 5,
                max_length: 4
            })
        );
        assert!(matches!(
            rm.decode(&big(256)),
            Err(Error::InputTooLarge { .. })
        ));
        assert!(matches!(
            rm.unalter(&big(256)),
            Err(Error::InputTooLarge { .. })
        ));
        assert_eq!(rm.encode(&big(15)).unwrap(), big(0b0110_1001));
    }

    #[test]
    fn test_decode_does_not_validate() {
        // A non-codeword still decodes to something, deterministically
        let rm = ReedMuller::new(3).unwrap();
        let garbage = big(0b0000_0110);
        let first = rm.decode(&garbage).unwrap();
        let second = rm.decode(&garbage).unwrap();
        assert_eq!(first, second);
        assert_ne!(rm.encode(&first).unwrap(), garbage);
    }

    #[test]
    fn test_wide_codewords() {
        // r = 10 gives 1024-bit codewords, far beyond any machine word
        let rm = ReedMuller::new(10).unwrap();
        let message = big(0b101_1001_0111);
        let codeword = rm.encode(&message).unwrap();
        assert!(codeword.bits() > 128);
        assert_eq!(rm.decode(&codeword).unwrap(), message);
    }

    #[test]
    fn test_image_pipeline() {
        use crate::ecc::NoiseChannel;
        use rand::SeedableRng;
        use rand_chacha::ChaCha20Rng;

        let image = PgmImage::parse("P2\n# test\n3 2\n15\n0 1 2\n13 14 15\n").unwrap();
        let rm = ReedMuller::new(5).unwrap();

        let encoded = rm.encode_image(&image).unwrap();
        assert_eq!(encoded.header(), image.header());
        assert_eq!(encoded.values()[3], rm.encode(&big(13)).unwrap());
        assert_eq!(rm.decode_image(&encoded).unwrap(), image);

        // 32-bit codewords correct up to 7 flips; p = 0.02 averages 0.64
        let channel = NoiseChannel::new(0.02).unwrap();
        let mut rng = ChaCha20Rng::seed_from_u64(8);
        let noisy = channel
            .alter_image(&encoded, rm.codeword_bits(), &mut rng)
            .unwrap();
        let corrected = rm.unalter_image(&noisy).unwrap();
        assert_eq!(corrected, encoded);
        assert_eq!(rm.decode_image(&corrected).unwrap(), image);
    }

    #[test]
    fn test_helper_function() {
        let rm = create_reed_muller(4).unwrap();
        assert_eq!(rm, ReedMuller::new(4).unwrap());
    }
}
