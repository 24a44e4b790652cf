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

/// Errors raised when constructing or indexing an element.
///
/// Construction never yields a partially valid element: every check runs
/// before the value is built.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ElementError {
    #[error(
        "image value out of bounds in position {position}: expected a value in [0, {degree}), found {value}"
    )]
    ImageOutOfRange {
        position: usize,
        value: usize,
        degree: usize,
    },
    #[error("duplicate image value {value} in positions {first} and {second}")]
    DuplicateImage {
        value: usize,
        first: usize,
        second: usize,
    },
    #[error("degree mismatch: expected {expected}, found {found}")]
    DegreeMismatch { expected: usize, found: usize },
    #[error("index out of bounds: expected a value in [0, {bound}), found {index}")]
    IndexOutOfBounds { index: usize, bound: usize },
    #[error("length mismatch: expected {expected}, found {found}")]
    LengthMismatch { expected: usize, found: usize },
    #[error("degree {degree} exceeds the maximum {max} supported by the point type")]
    DegreeTooLarge { degree: usize, max: usize },
}
