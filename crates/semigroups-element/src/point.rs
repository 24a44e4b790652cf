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

//! Unsigned integer types usable as points of a transformation.

use num_traits::{PrimInt, Unsigned};
use std::{fmt::Debug, hash::Hash};

/// An unsigned primitive integer that stores a point `0..degree`.
pub trait Point: PrimInt + Unsigned + Hash + Debug + Send + Sync + 'static {
    /// Returns the point as an index.
    #[inline]
    fn index(self) -> usize {
        // `usize` is at least as wide as every point type in use.
        self.to_usize().unwrap_or(usize::MAX)
    }

    /// Converts an index into a point, or `None` if it does not fit.
    #[inline]
    fn from_index(index: usize) -> Option<Self> {
        <Self as num_traits::NumCast>::from(index)
    }

    /// Largest degree representable with this point type.
    #[inline]
    fn max_degree() -> usize {
        Self::max_value().index().saturating_add(1)
    }
}

impl<T> Point for T where T: PrimInt + Unsigned + Hash + Debug + Send + Sync + 'static {}

/// Converts an index known to be below the degree of a validated element.
///
/// # Panics
///
/// Panics if `index` does not fit into `T`.
#[inline]
pub(crate) fn point<T: Point>(index: usize) -> T {
    match T::from_index(index) {
        Some(p) => p,
        None => panic!(
            "called `point` with index {} exceeding the point type maximum {}",
            index,
            T::max_degree() - 1
        ),
    }
}

/// Fails with `DegreeTooLarge` if `degree` cannot be represented with `T`.
#[inline]
pub(crate) fn check_degree<T: Point>(degree: usize) -> Result<(), crate::error::ElementError> {
    if degree > T::max_degree() {
        return Err(crate::error::ElementError::DegreeTooLarge {
            degree,
            max: T::max_degree(),
        });
    }
    Ok(())
}
