// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! # 8×8 Boolean Matrices
//!
//! `BMat8` packs a boolean matrix of dimension at most 8 into a single `u64`.
//! Entry `(r, c)` is bit `63 - 8r - c`, so row `r` is the `r`-th most
//! significant byte and the integer order coincides with the lexicographic
//! order of the rows.
//!
//! Arithmetic is over the boolean semiring: `+` is OR and `*` is AND. A
//! matrix of smaller dimension `d` is embedded in the top-left corner with
//! zero padding.

use crate::{element::Element, error::ElementError};

const DIM: usize = 8;

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
pub struct BMat8(u64);

#[inline]
const fn bit(r: usize, c: usize) -> u64 {
    1u64 << (63 - 8 * r - c)
}

impl BMat8 {
    #[inline]
    pub const fn new(bits: u64) -> Self {
        BMat8(bits)
    }

    /// Builds a matrix from square rows of dimension at most 8.
    pub fn from_rows(rows: &[Vec<bool>]) -> Result<Self, ElementError> {
        let dim = rows.len();
        if dim > DIM {
            return Err(ElementError::DegreeTooLarge {
                degree: dim,
                max: DIM,
            });
        }
        let mut bits = 0u64;
        for (r, row) in rows.iter().enumerate() {
            if row.len() != dim {
                return Err(ElementError::LengthMismatch {
                    expected: dim,
                    found: row.len(),
                });
            }
            for (c, &entry) in row.iter().enumerate() {
                if entry {
                    bits |= bit(r, c);
                }
            }
        }
        Ok(BMat8(bits))
    }

    /// The identity of dimension `dim`, zero-padded to 8.
    pub fn one(dim: usize) -> Self {
        debug_assert!(dim <= DIM, "called `BMat8::one` with dim {} > 8", dim);
        BMat8((0..dim.min(DIM)).fold(0, |bits, i| bits | bit(i, i)))
    }

    /// A matrix with uniformly random entries.
    pub fn random<R>(rng: &mut R) -> Self
    where
        R: rand::Rng,
    {
        BMat8(rng.r#gen())
    }

    /// A random matrix supported on the top-left `dim × dim` block.
    pub fn random_of_dim<R>(dim: usize, rng: &mut R) -> Result<Self, ElementError>
    where
        R: rand::Rng,
    {
        if dim > DIM {
            return Err(ElementError::DegreeTooLarge {
                degree: dim,
                max: DIM,
            });
        }
        let mask = (0..dim).fold(0u64, |mask, r| {
            (0..dim).fold(mask, |mask, c| mask | bit(r, c))
        });
        Ok(BMat8(rng.r#gen::<u64>() & mask))
    }

    #[inline]
    pub const fn to_int(self) -> u64 {
        self.0
    }

    fn check(r: usize, c: usize) -> Result<(), ElementError> {
        for index in [r, c] {
            if index >= DIM {
                return Err(ElementError::IndexOutOfBounds { index, bound: DIM });
            }
        }
        Ok(())
    }

    pub fn at(&self, r: usize, c: usize) -> Result<bool, ElementError> {
        Self::check(r, c)?;
        Ok(self.0 & bit(r, c) != 0)
    }

    pub fn set(&mut self, r: usize, c: usize, value: bool) -> Result<(), ElementError> {
        Self::check(r, c)?;
        if value {
            self.0 |= bit(r, c);
        } else {
            self.0 &= !bit(r, c);
        }
        Ok(())
    }

    /// The eight rows as bytes, column 0 in the most significant bit.
    pub fn rows(&self) -> [u8; DIM] {
        self.0.to_be_bytes()
    }

    pub fn transpose(&self) -> Self {
        let mut bits = 0u64;
        for r in 0..DIM {
            for c in 0..DIM {
                if self.0 & bit(r, c) != 0 {
                    bits |= bit(c, r);
                }
            }
        }
        BMat8(bits)
    }

    /// Number of non-zero rows.
    pub fn number_of_rows(&self) -> usize {
        self.rows().iter().filter(|&&row| row != 0).count()
    }

    /// Number of non-zero columns.
    pub fn number_of_cols(&self) -> usize {
        self.transpose().number_of_rows()
    }

    /// Smallest `d` such that every set entry lies in the top-left `d × d`
    /// block.
    pub fn minimum_dim(&self) -> usize {
        let last = |rows: [u8; DIM]| {
            rows.iter()
                .rposition(|&row| row != 0)
                .map_or(0, |r| r + 1)
        };
        last(self.rows()).max(last(self.transpose().rows()))
    }
}

impl std::ops::Mul for BMat8 {
    type Output = BMat8;

    fn mul(self, rhs: BMat8) -> BMat8 {
        let rhs_rows = rhs.rows();
        let mut out = [0u8; DIM];
        for (out_row, lhs_row) in out.iter_mut().zip(self.rows()) {
            for (c, rhs_row) in rhs_rows.iter().enumerate() {
                if lhs_row & (0x80 >> c) != 0 {
                    *out_row |= rhs_row;
                }
            }
        }
        BMat8(u64::from_be_bytes(out))
    }
}

impl Element for BMat8 {
    #[inline]
    fn degree(&self) -> usize {
        DIM
    }

    #[inline]
    fn one(_degree: usize) -> Self {
        BMat8::one(DIM)
    }

    #[inline]
    fn product_inplace(&mut self, x: &Self, y: &Self) {
        *self = *x * *y;
    }

    #[inline]
    fn complexity(&self) -> usize {
        0
    }
}

impl std::fmt::Display for BMat8 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (r, row) in self.rows().iter().enumerate() {
            if r > 0 {
                writeln!(f)?;
            }
            write!(f, "{:08b}", row)?;
        }
        Ok(())
    }
}
