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

//! # Semigroups Elements
//!
//! Concrete element types that a Froidure-Pin enumeration can multiply,
//! compare and hash.
//!
//! ## Modules
//!
//! - `element`: The `Element` trait shared by every element type.
//! - `point`: The `Point` bound for unsigned integer point types.
//! - `transf`: Full transformations of `{0, .., n - 1}`.
//! - `pperm`: Partial permutations.
//! - `perm`: Permutations.
//! - `bmat8`: Boolean matrices of dimension at most 8, packed into a `u64`.
//! - `error`: Validation and bounds errors raised by construction and access.

pub mod bmat8;
pub mod element;
pub mod error;
pub mod perm;
pub mod point;
pub mod pperm;
pub mod transf;
