pub mod ecc;
pub mod error;
pub mod pgm;

pub use ecc::{BitVector, HadamardDecoder, NoiseChannel, OversizePolicy, ReedMuller};
pub use error::{Error, Result};
pub use pgm::PgmImage;
