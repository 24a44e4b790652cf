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

//! # Element
//!
//! The operations an enumeration needs from the objects it multiplies.
//!
//! Products are taken left to right: `x * y` applies `x` first and `y` second
//! for mappings, and is the ordinary matrix product for matrices. All elements
//! of one semigroup share the same degree.

use std::{fmt::Debug, hash::Hash};

pub trait Element: Clone + Eq + Ord + Hash + Debug {
    /// Size of the underlying set (or matrix dimension bound).
    fn degree(&self) -> usize;

    /// The identity element of the given degree.
    fn one(degree: usize) -> Self;

    /// Overwrites `self` with `x * y`.
    ///
    /// `self`, `x` and `y` must have the same degree.
    fn product_inplace(&mut self, x: &Self, y: &Self);

    /// Rough cost of one `product_inplace`, in units of word-graph lookups.
    /// Products of short words are traced through the Cayley graph instead
    /// of multiplied when this is large.
    #[inline]
    fn complexity(&self) -> usize {
        self.degree()
    }

    /// The identity element of the same degree as `self`.
    #[inline]
    fn identity(&self) -> Self {
        Self::one(self.degree())
    }

    /// Returns `self * other`.
    #[inline]
    fn product(&self, other: &Self) -> Self {
        let mut result = self.identity();
        result.product_inplace(self, other);
        result
    }
}
