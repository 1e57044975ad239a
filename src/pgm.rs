//! Plain-text (P2) PGM images as streams of integers.
//!
//! An ASCII PGM file starts with a header:
//!
//! ```text
//! P2
//! # any number of comment lines
//! 128 128
//! 63
//! ```
//!
//! followed by whitespace-separated pixel values. Encoding replaces each
//! pixel with its codeword, so after the first step the values no longer fit
//! the advertised gray level; the header is carried through untouched and the
//! values are arbitrary-precision integers.

use crate::error::{Error, Result};
use num_bigint::BigUint;
use rayon::prelude::*;

/// A PGM image split into its verbatim header and its pixel values
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PgmImage {
    header: String,
    values: Vec<BigUint>,
}

impl PgmImage {
    /// Builds an image from a header and pixel values. A trailing newline is
    /// added to the header if it lacks one.
    pub fn from_parts(header: impl Into<String>, values: Vec<BigUint>) -> Self {
        let mut header = header.into();
        if !header.is_empty() && !header.ends_with('\n') {
            header.push('\n');
        }
        PgmImage { header, values }
    }

    /// Parses the text of an ASCII PGM file.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidInput` if the header is incomplete or a data
    /// token is not a non-negative decimal integer.
    pub fn parse(text: &str) -> Result<Self> {
        let mut lines = text.split_inclusive('\n');
        let mut header = String::new();

        let magic = lines
            .next()
            .filter(|line| !line.trim().is_empty())
            .ok_or_else(|| {
                Error::InvalidInput("PGM data is missing its magic line".to_string())
            })?;
        header.push_str(magic);

        // Comments, then the size line
        let size = loop {
            match lines.next() {
                Some(line) if line.trim_start().starts_with('#') => header.push_str(line),
                Some(line) => break line,
                None => {
                    return Err(Error::InvalidInput(
                        "PGM header ends before the size line".to_string(),
                    ))
                }
            }
        };
        header.push_str(size);

        let gray = lines.next().ok_or_else(|| {
            Error::InvalidInput("PGM header ends before the gray level line".to_string())
        })?;
        header.push_str(gray);

        let data = &text[header.len()..];
        let values = data
            .split_whitespace()
            .map(|token| {
                token.parse::<BigUint>().map_err(|_| {
                    Error::InvalidInput(format!("Invalid pixel value '{}'", token))
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self::from_parts(header, values))
    }

    /// The header text, exactly as read
    pub fn header(&self) -> &str {
        &self.header
    }

    /// The pixel values in file order
    pub fn values(&self) -> &[BigUint] {
        &self.values
    }

    /// Serializes the image: the header followed by the values on one line,
    /// separated by single spaces.
    pub fn to_text(&self) -> String {
        let mut text = self.header.clone();
        let body: Vec<String> = self.values.iter().map(|v| v.to_string()).collect();
        text.push_str(&body.join(" "));
        text.push('\n');
        text
    }

    /// Applies `f` to each value in order, keeping the header
    pub fn map_values<F>(&self, mut f: F) -> Result<Self>
    where
        F: FnMut(&BigUint) -> Result<BigUint>,
    {
        let values = self.values.iter().map(&mut f).collect::<Result<Vec<_>>>()?;
        Ok(PgmImage {
            header: self.header.clone(),
            values,
        })
    }

    /// Applies `f` to the values in parallel. Output order matches input order.
    pub fn par_map_values<F>(&self, f: F) -> Result<Self>
    where
        F: Fn(&BigUint) -> Result<BigUint> + Sync + Send,
    {
        let values = self.values.par_iter().map(f).collect::<Result<Vec<_>>>()?;
        Ok(PgmImage {
            header: self.header.clone(),
            values,
        })
    }
}
