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

//! # Permutations
//!
//! Bijections of `{0, .., n - 1}`. A `Perm` is a `Transf` known to be
//! injective, so it additionally has an inverse.

use crate::{
    element::Element,
    error::ElementError,
    point::{Point, check_degree, point},
    transf::Transf,
};

#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Perm<T> {
    images: Vec<T>,
}

impl<T> Perm<T>
where
    T: Point,
{
    /// Creates a permutation from its images.
    ///
    /// # Errors
    ///
    /// Returns `ImageOutOfRange` or `DuplicateImage` if `images` is not a
    /// bijection of `{0, .., images.len() - 1}`.
    pub fn new(images: Vec<T>) -> Result<Self, ElementError> {
        let degree = images.len();
        check_degree::<T>(degree)?;
        let mut seen: Vec<Option<usize>> = vec![None; degree];
        for (position, value) in images.iter().map(|v| v.index()).enumerate() {
            if value >= degree {
                return Err(ElementError::ImageOutOfRange {
                    position,
                    value,
                    degree,
                });
            }
            if let Some(first) = seen[value] {
                return Err(ElementError::DuplicateImage {
                    value,
                    first,
                    second: position,
                });
            }
            seen[value] = Some(position);
        }
        Ok(Self { images })
    }

    pub fn one(degree: usize) -> Self {
        Self {
            images: (0..degree).map(point).collect(),
        }
    }

    /// A uniformly random permutation.
    pub fn random<R>(degree: usize, rng: &mut R) -> Result<Self, ElementError>
    where
        R: rand::Rng,
    {
        use rand::seq::SliceRandom;

        check_degree::<T>(degree)?;
        let mut perm = Self::one(degree);
        perm.images.shuffle(rng);
        Ok(perm)
    }

    #[inline]
    pub fn degree(&self) -> usize {
        self.images.len()
    }

    #[inline]
    pub fn images(&self) -> &[T] {
        &self.images
    }

    pub fn at(&self, i: usize) -> Result<T, ElementError> {
        self.images
            .get(i)
            .copied()
            .ok_or(ElementError::IndexOutOfBounds {
                index: i,
                bound: self.degree(),
            })
    }

    pub fn inverse(&self) -> Self {
        let mut images = self.images.clone();
        for (i, value) in self.images.iter().enumerate() {
            images[value.index()] = point(i);
        }
        Self { images }
    }
}

impl<T> From<Perm<T>> for Transf<T>
where
    T: Point,
{
    fn from(perm: Perm<T>) -> Self {
        // Every permutation is a valid transformation.
        match Transf::new(perm.images) {
            Ok(transf) => transf,
            Err(err) => unreachable!("permutation is not a transformation: {}", err),
        }
    }
}

impl<T> Element for Perm<T>
where
    T: Point,
{
    #[inline]
    fn degree(&self) -> usize {
        self.images.len()
    }

    #[inline]
    fn one(degree: usize) -> Self {
        Perm::one(degree)
    }

    fn product_inplace(&mut self, x: &Self, y: &Self) {
        debug_assert_eq!(x.degree(), y.degree());
        debug_assert_eq!(self.degree(), x.degree());
        for (out, &xi) in self.images.iter_mut().zip(&x.images) {
            *out = y.images[xi.index()];
        }
    }
}

impl<T> std::fmt::Display for Perm<T>
where
    T: Point + std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Perm([")?;
        for (i, value) in self.images.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", value)?;
        }
        write!(f, "])")
    }
}
