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

//! # Transformations
//!
//! A transformation of degree `n` is a total map from `{0, .., n - 1}` to
//! itself, stored as its list of images. Composition is left to right:
//! `(x * y)(i) = y(x(i))`.
//!
//! ## Usage
//!
//! ```rust
//! use semigroups_element::element::Element;
//! use semigroups_element::transf::Transf;
//!
//! let x = Transf::<u8>::new(vec![1, 0, 2]).unwrap();
//! let y = Transf::<u8>::new(vec![0, 0, 1]).unwrap();
//! assert_eq!(x.product(&y).images(), &[0, 0, 1]);
//! assert_eq!(x.rank(), 3);
//! ```

use crate::{
    element::Element,
    error::ElementError,
    point::{Point, check_degree, point},
};

#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Transf<T> {
    images: Vec<T>,
}

impl<T> Transf<T>
where
    T: Point,
{
    /// Creates a transformation from its images.
    ///
    /// # Errors
    ///
    /// Returns `ImageOutOfRange` if some image is not below `images.len()`, and
    /// `DegreeTooLarge` if the degree does not fit into `T`.
    pub fn new(images: Vec<T>) -> Result<Self, ElementError> {
        let degree = images.len();
        check_degree::<T>(degree)?;
        for (position, value) in images.iter().enumerate() {
            if value.index() >= degree {
                return Err(ElementError::ImageOutOfRange {
                    position,
                    value: value.index(),
                    degree,
                });
            }
        }
        Ok(Self { images })
    }

    /// The identity transformation of the given degree.
    ///
    /// # Panics
    ///
    /// Panics if `degree` does not fit into `T`.
    pub fn one(degree: usize) -> Self {
        Self {
            images: (0..degree).map(point).collect(),
        }
    }

    /// A uniformly random transformation.
    pub fn random<R>(degree: usize, rng: &mut R) -> Result<Self, ElementError>
    where
        R: rand::Rng,
    {
        check_degree::<T>(degree)?;
        Ok(Self {
            images: (0..degree).map(|_| point(rng.gen_range(0..degree))).collect(),
        })
    }

    #[inline]
    pub fn degree(&self) -> usize {
        self.images.len()
    }

    #[inline]
    pub fn images(&self) -> &[T] {
        &self.images
    }

    /// The image of `i`.
    pub fn at(&self, i: usize) -> Result<T, ElementError> {
        self.images
            .get(i)
            .copied()
            .ok_or(ElementError::IndexOutOfBounds {
                index: i,
                bound: self.degree(),
            })
    }

    /// The sorted set of image values.
    pub fn image(&self) -> Vec<T> {
        let mut image = self.images.clone();
        image.sort_unstable();
        image.dedup();
        image
    }

    /// All points the transformation is defined on.
    pub fn domain(&self) -> Vec<T> {
        (0..self.degree()).map(point).collect()
    }

    /// Number of distinct images.
    pub fn rank(&self) -> usize {
        let mut seen = vec![false; self.degree()];
        self.images
            .iter()
            .filter(|value| !std::mem::replace(&mut seen[value.index()], true))
            .count()
    }

    /// Appends `n` fixed points.
    pub fn increase_degree_by(&mut self, n: usize) -> Result<(), ElementError> {
        let old = self.degree();
        check_degree::<T>(old + n)?;
        self.images.extend((old..old + n).map(point::<T>));
        Ok(())
    }
}

impl<T> std::ops::Index<usize> for Transf<T> {
    type Output = T;

    #[inline]
    fn index(&self, i: usize) -> &T {
        &self.images[i]
    }
}

impl<T> Element for Transf<T>
where
    T: Point,
{
    #[inline]
    fn degree(&self) -> usize {
        self.images.len()
    }

    #[inline]
    fn one(degree: usize) -> Self {
        Transf::one(degree)
    }

    fn product_inplace(&mut self, x: &Self, y: &Self) {
        debug_assert_eq!(x.degree(), y.degree());
        debug_assert_eq!(self.degree(), x.degree());
        for (out, &xi) in self.images.iter_mut().zip(&x.images) {
            *out = y.images[xi.index()];
        }
    }
}

impl<T> std::fmt::Display for Transf<T>
where
    T: Point + std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Transf([")?;
        for (i, value) in self.images.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", value)?;
        }
        write!(f, "])")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    type PointType = u8;

    #[test]
    fn test_new_validates_images() {
        assert!(Transf::<PointType>::new(vec![0, 2, 1]).is_ok());
        assert_eq!(
            Transf::<PointType>::new(vec![0, 3, 1]),
            Err(ElementError::ImageOutOfRange {
                position: 1,
                value: 3,
                degree: 3
            })
        );
    }

    #[test]
    fn test_new_rejects_degree_too_large() {
        let images = vec![0u8; 300];
        assert!(matches!(
            Transf::new(images),
            Err(ElementError::DegreeTooLarge { degree: 300, .. })
        ));
    }

    #[test]
    fn test_product_composes_left_to_right() {
        let x = Transf::<PointType>::new(vec![1, 2, 0]).unwrap();
        let y = Transf::<PointType>::new(vec![0, 0, 2]).unwrap();
        // (x * y)(0) = y(x(0)) = y(1) = 0
        assert_eq!(x.product(&y).images(), &[0, 2, 0]);
        assert_eq!(y.product(&x).images(), &[1, 1, 0]);
    }

    #[test]
    fn test_one_is_identity() {
        let x = Transf::<PointType>::new(vec![2, 2, 0]).unwrap();
        let id = Transf::<PointType>::one(3);
        assert_eq!(x.product(&id), x);
        assert_eq!(id.product(&x), x);
        assert_eq!(x.identity(), id);
    }

    #[test]
    fn test_rank_image_domain() {
        let x = Transf::<PointType>::new(vec![3, 3, 1, 3]).unwrap();
        assert_eq!(x.rank(), 2);
        assert_eq!(x.image(), vec![1, 3]);
        assert_eq!(x.domain(), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_at_checks_bounds() {
        let x = Transf::<PointType>::new(vec![1, 0]).unwrap();
        assert_eq!(x.at(1), Ok(0));
        assert_eq!(
            x.at(2),
            Err(ElementError::IndexOutOfBounds { index: 2, bound: 2 })
        );
    }

    #[test]
    fn test_increase_degree_by_adds_fixed_points() {
        let mut x = Transf::<PointType>::new(vec![1, 0]).unwrap();
        x.increase_degree_by(2).unwrap();
        assert_eq!(x.images(), &[1, 0, 2, 3]);
    }

    #[test]
    fn test_random_is_valid() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        for _ in 0..20 {
            let x = Transf::<PointType>::random(6, &mut rng).unwrap();
            assert_eq!(x.degree(), 6);
            assert!(x.images().iter().all(|&v| v < 6));
        }
    }

    #[test]
    fn test_display() {
        let x = Transf::<PointType>::new(vec![1, 0, 2]).unwrap();
        assert_eq!(format!("{}", x), "Transf([1, 0, 2])");
    }
}
