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

use semigroups_element::error::ElementError;
use semigroups_runner::error::RunnerError;

/// Errors raised by `FroidurePin`.
///
/// Validation failures are reported before any state is touched, so an `Err`
/// never leaves the enumeration half-updated.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FroidurePinError {
    #[error(transparent)]
    Element(#[from] ElementError),
    #[error(transparent)]
    Runner(#[from] RunnerError),
    #[error("no generators have been defined")]
    NoGenerators,
    #[error("generator degree mismatch: expected {expected}, found {found}")]
    GeneratorDegreeMismatch { expected: usize, found: usize },
    #[error("element position out of bounds: expected a value in [0, {bound}), found {index}")]
    PositionOutOfBounds { index: usize, bound: usize },
    #[error("generator index out of bounds: expected a value in [0, {bound}), found {index}")]
    GeneratorOutOfBounds { index: usize, bound: usize },
    #[error(
        "letter {letter} in position {position} is out of bounds: expected a value in [0, {bound})"
    )]
    LetterOutOfBounds {
        letter: usize,
        position: usize,
        bound: usize,
    },
    #[error("the empty word does not represent an element")]
    EmptyWord,
    #[error("the enumeration was killed before it finished; call `init` to start over")]
    Killed,
}
