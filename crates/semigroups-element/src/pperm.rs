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

//! # Partial Permutations
//!
//! An injective partial map from `{0, .., n - 1}` to itself. Points outside
//! the domain map to `None`.

use crate::{
    element::Element,
    error::ElementError,
    point::{Point, check_degree, point},
};

#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct PPerm<T> {
    images: Vec<Option<T>>,
}

impl<T> PPerm<T>
where
    T: Point,
{
    /// Creates a partial permutation from its images.
    ///
    /// # Errors
    ///
    /// Returns `ImageOutOfRange` for an image not below the degree and
    /// `DuplicateImage` if two points share an image.
    pub fn new(images: Vec<Option<T>>) -> Result<Self, ElementError> {
        let degree = images.len();
        check_degree::<T>(degree)?;
        let mut seen: Vec<Option<usize>> = vec![None; degree];
        for (position, value) in images.iter().enumerate() {
            let Some(value) = value.map(Point::index) else {
                continue;
            };
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

    /// Creates the partial permutation of degree `degree` mapping
    /// `domain[i]` to `image[i]`.
    pub fn from_domain_image(
        domain: &[T],
        image: &[T],
        degree: usize,
    ) -> Result<Self, ElementError> {
        if domain.len() != image.len() {
            return Err(ElementError::LengthMismatch {
                expected: domain.len(),
                found: image.len(),
            });
        }
        check_degree::<T>(degree)?;
        let mut images = vec![None; degree];
        for (position, (&d, &r)) in domain.iter().zip(image).enumerate() {
            if d.index() >= degree {
                return Err(ElementError::IndexOutOfBounds {
                    index: d.index(),
                    bound: degree,
                });
            }
            if images[d.index()].is_some() {
                return Err(ElementError::DuplicateImage {
                    value: d.index(),
                    first: domain
                        .iter()
                        .position(|&x| x == d)
                        .unwrap_or(position),
                    second: position,
                });
            }
            images[d.index()] = Some(r);
        }
        Self::new(images)
    }

    /// The identity on all `degree` points.
    pub fn one(degree: usize) -> Self {
        Self {
            images: (0..degree).map(|i| Some(point(i))).collect(),
        }
    }

    #[inline]
    pub fn degree(&self) -> usize {
        self.images.len()
    }

    #[inline]
    pub fn images(&self) -> &[Option<T>] {
        &self.images
    }

    /// The image of `i`, `None` if `i` is outside the domain.
    pub fn at(&self, i: usize) -> Result<Option<T>, ElementError> {
        self.images
            .get(i)
            .copied()
            .ok_or(ElementError::IndexOutOfBounds {
                index: i,
                bound: self.degree(),
            })
    }

    /// Sorted points on which the map is defined.
    pub fn domain(&self) -> Vec<T> {
        self.images
            .iter()
            .enumerate()
            .filter(|(_, value)| value.is_some())
            .map(|(i, _)| point(i))
            .collect()
    }

    /// Sorted image values.
    pub fn image(&self) -> Vec<T> {
        let mut image: Vec<T> = self.images.iter().flatten().copied().collect();
        image.sort_unstable();
        image
    }

    #[inline]
    pub fn rank(&self) -> usize {
        self.images.iter().flatten().count()
    }

    /// The inverse partial permutation, defined on `self.image()`.
    pub fn inverse(&self) -> Self {
        let mut images = vec![None; self.degree()];
        for (i, value) in self.images.iter().enumerate() {
            if let Some(value) = value {
                images[value.index()] = Some(point(i));
            }
        }
        Self { images }
    }
}

impl<T> Element for PPerm<T>
where
    T: Point,
{
    #[inline]
    fn degree(&self) -> usize {
        self.images.len()
    }

    #[inline]
    fn one(degree: usize) -> Self {
        PPerm::one(degree)
    }

    fn product_inplace(&mut self, x: &Self, y: &Self) {
        debug_assert_eq!(x.degree(), y.degree());
        debug_assert_eq!(self.degree(), x.degree());
        for (out, xi) in self.images.iter_mut().zip(&x.images) {
            *out = xi.and_then(|j| y.images[j.index()]);
        }
    }
}

impl<T> std::fmt::Display for PPerm<T>
where
    T: Point + std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PPerm([")?;
        for (i, value) in self.images.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            match value {
                Some(value) => write!(f, "{}", value)?,
                None => write!(f, "-")?,
            }
        }
        write!(f, "])")
    }
}
