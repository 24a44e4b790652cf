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

//! # Froidure-Pin Enumeration
//!
//! Lazy, incremental enumeration of the semigroup generated by a finite set of
//! elements. Elements are discovered breadth-first by word length, so the word
//! recorded for each element is a shortlex-minimal factorisation over the
//! generators, and every non-trivial relation found along the way is recorded
//! as a rule.
//!
//! ## Motivation
//!
//! Semigroups of transformations or matrices grow quickly; the full monoid of
//! transformations of seven points already has 823 543 elements. Callers need
//! to look at partial results, stop after a time budget, or abandon the work
//! from another thread. `FroidurePin` therefore runs under a `Runner` and
//! advances in batches, and each query comes in two flavours:
//!
//! - *current* queries (`current_size`, `current_rules`, ...) never enumerate
//!   and reflect the batches completed so far;
//! - *eager* queries (`size`, `rules`, ...) run the enumeration to completion
//!   first and fail with `FroidurePinError::Killed` if the runner is dead.
//!
//! ## Highlights
//!
//! - Products are cached in the right Cayley graph. Adding generators keeps
//!   every element and every known product; the word data is re-derived from
//!   the cached graph, so only products involving the new generators are ever
//!   computed.
//! - Positions are stable: once an element has a position it keeps it until
//!   `init`.
//! - A `ProgressHandle` exposes the size and rule count at the last batch
//!   boundary to other threads and to `run_until` predicates.
//!
//! ## Usage
//!
//! ```rust
//! use semigroups_element::perm::Perm;
//! use semigroups_froidure_pin::froidure_pin::FroidurePin;
//! use semigroups_runner::runner::Runnable;
//!
//! let gens = vec![
//!     Perm::<u8>::new(vec![1, 2, 0]).unwrap(),
//!     Perm::<u8>::new(vec![1, 0, 2]).unwrap(),
//! ];
//! let mut s = FroidurePin::from_generators(gens).unwrap();
//! assert_eq!(s.size().unwrap(), 6);
//! assert!(s.finished());
//! ```

use crate::{
    error::FroidurePinError,
    progress::{Progress, ProgressHandle},
    word_graph::WordGraph,
};
use fixedbitset::FixedBitSet;
use rustc_hash::FxHashMap;
use semigroups_core::{
    constants::{Extended, Tril},
    word::Word,
};
use semigroups_element::element::Element;
use semigroups_runner::{
    error::RunnerError,
    report::reporting_enabled,
    runner::{Algorithm, Runnable, Runner},
};
use std::ops::Range;

/// Default upper bound on the number of new elements found per batch.
pub const DEFAULT_BATCH_SIZE: usize = 8192;

/// Positions ordered by the elements' `Ord`.
#[derive(Debug, Clone)]
struct SortedIndex {
    by_rank: Vec<usize>,
    rank_of: Vec<usize>,
}

impl SortedIndex {
    fn new<E: Ord>(elements: &[E]) -> Self {
        let mut by_rank: Vec<usize> = (0..elements.len()).collect();
        by_rank.sort_unstable_by(|&a, &b| elements[a].cmp(&elements[b]));
        let mut rank_of = vec![0; elements.len()];
        for (rank, &position) in by_rank.iter().enumerate() {
            rank_of[position] = rank;
        }
        Self { by_rank, rank_of }
    }
}

/// The Froidure-Pin enumerator.
#[derive(Debug)]
pub struct FroidurePin<E> {
    runner: Runner,
    batch_size: usize,
    generators: Vec<E>,
    /// Position of the element represented by each generator letter.
    letter_to_pos: Vec<usize>,
    elements: Vec<E>,
    positions: FxHashMap<E, usize>,
    prefix: Vec<Option<usize>>,
    suffix: Vec<Option<usize>>,
    first: Vec<usize>,
    last: Vec<usize>,
    length: Vec<usize>,
    right: WordGraph,
    /// Bit `i * k + a` is set iff `word(i) a` is the word of `right[i][a]`.
    reduced: FixedBitSet,
    /// Elements whose word data belongs to the current breadth-first pass.
    reached: FixedBitSet,
    /// Reached positions in breadth-first order.
    order: Vec<usize>,
    /// Index into `order` of the next element to process.
    pos: usize,
    number_of_rules: usize,
    one: Option<E>,
    pos_one: Option<usize>,
    scratch: Option<E>,
    sorted: Option<SortedIndex>,
    progress: ProgressHandle,
}

impl<E> Default for FroidurePin<E>
where
    E: Element,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Clone for FroidurePin<E>
where
    E: Element,
{
    /// The copy has its own runner state and its own progress handle.
    fn clone(&self) -> Self {
        let copy = Self {
            runner: self.runner.clone(),
            batch_size: self.batch_size,
            generators: self.generators.clone(),
            letter_to_pos: self.letter_to_pos.clone(),
            elements: self.elements.clone(),
            positions: self.positions.clone(),
            prefix: self.prefix.clone(),
            suffix: self.suffix.clone(),
            first: self.first.clone(),
            last: self.last.clone(),
            length: self.length.clone(),
            right: self.right.clone(),
            reduced: self.reduced.clone(),
            reached: self.reached.clone(),
            order: self.order.clone(),
            pos: self.pos,
            number_of_rules: self.number_of_rules,
            one: self.one.clone(),
            pos_one: self.pos_one,
            scratch: None,
            sorted: self.sorted.clone(),
            progress: ProgressHandle::new(),
        };
        copy.publish();
        copy
    }
}

impl<E> FroidurePin<E>
where
    E: Element,
{
    /// Creates an enumerator without generators.
    pub fn new() -> Self {
        Self {
            runner: Runner::new(),
            batch_size: DEFAULT_BATCH_SIZE,
            generators: Vec::new(),
            letter_to_pos: Vec::new(),
            elements: Vec::new(),
            positions: FxHashMap::default(),
            prefix: Vec::new(),
            suffix: Vec::new(),
            first: Vec::new(),
            last: Vec::new(),
            length: Vec::new(),
            right: WordGraph::new(0, 0),
            reduced: FixedBitSet::new(),
            reached: FixedBitSet::new(),
            order: Vec::new(),
            pos: 0,
            number_of_rules: 0,
            one: None,
            pos_one: None,
            scratch: None,
            sorted: None,
            progress: ProgressHandle::new(),
        }
    }

    /// Creates an enumerator for the semigroup generated by `generators`.
    ///
    /// # Errors
    ///
    /// `NoGenerators` if `generators` is empty and `GeneratorDegreeMismatch`
    /// if the generators do not all have the same degree.
    pub fn from_generators<I>(generators: I) -> Result<Self, FroidurePinError>
    where
        I: IntoIterator<Item = E>,
    {
        let generators: Vec<E> = generators.into_iter().collect();
        if generators.is_empty() {
            return Err(FroidurePinError::NoGenerators);
        }
        let mut fp = Self::new();
        fp.add_generators(generators)?;
        Ok(fp)
    }

    /// A handle on the progress published at every batch boundary.
    #[inline]
    pub fn progress(&self) -> ProgressHandle {
        self.progress.clone()
    }

    #[inline]
    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Sets the number of new elements sought per batch. Smaller batches
    /// lower cancellation latency; the result is the same. Zero is treated
    /// as one.
    #[inline]
    pub fn set_batch_size(&mut self, batch_size: usize) -> &mut Self {
        self.batch_size = batch_size.max(1);
        self
    }

    /// Reserves room for `additional` more elements.
    pub fn reserve(&mut self, additional: usize) {
        self.elements.reserve(additional);
        self.positions.reserve(additional);
        self.prefix.reserve(additional);
        self.suffix.reserve(additional);
        self.first.reserve(additional);
        self.last.reserve(additional);
        self.length.reserve(additional);
        self.order.reserve(additional);
        self.right.reserve(additional);
    }

    // ---------------------------------------------------------------------
    // Generators
    // ---------------------------------------------------------------------

    #[inline]
    pub fn number_of_generators(&self) -> usize {
        self.generators.len()
    }

    #[inline]
    pub fn generators(&self) -> &[E] {
        &self.generators
    }

    pub fn generator(&self, letter: usize) -> Result<&E, FroidurePinError> {
        self.generators
            .get(letter)
            .ok_or(FroidurePinError::GeneratorOutOfBounds {
                index: letter,
                bound: self.generators.len(),
            })
    }

    /// Position of the element represented by generator `letter`.
    pub fn position_of_generator(&self, letter: usize) -> Result<usize, FroidurePinError> {
        self.letter_to_pos
            .get(letter)
            .copied()
            .ok_or(FroidurePinError::GeneratorOutOfBounds {
                index: letter,
                bound: self.generators.len(),
            })
    }

    /// Degree shared by all generators.
    pub fn degree(&self) -> Result<usize, FroidurePinError> {
        self.generators
            .first()
            .map(Element::degree)
            .ok_or(FroidurePinError::NoGenerators)
    }

    pub fn add_generator(&mut self, generator: E) -> Result<(), FroidurePinError> {
        self.add_generators(std::iter::once(generator))
    }

    /// Adds generators without discarding the elements and products found so
    /// far. The enumeration is no longer finished afterwards (unless nothing
    /// was added); the next run resumes from the cached Cayley graph.
    ///
    /// # Errors
    ///
    /// `GeneratorDegreeMismatch` if some new generator has a different degree
    /// than the existing ones. Nothing is added in that case.
    pub fn add_generators<I>(&mut self, generators: I) -> Result<(), FroidurePinError>
    where
        I: IntoIterator<Item = E>,
    {
        let new: Vec<E> = generators.into_iter().collect();
        let Some(head) = new.first() else {
            return Ok(());
        };
        let expected = self.degree().unwrap_or_else(|_| head.degree());
        if let Some(bad) = new.iter().find(|g| g.degree() != expected) {
            return Err(FroidurePinError::GeneratorDegreeMismatch {
                expected,
                found: bad.degree(),
            });
        }

        if self.one.is_none() {
            self.one = Some(head.identity());
        }
        let added = new.len();
        self.generators.extend(new);
        self.right.add_to_out_degree(added);
        self.sorted = None;
        self.restart();
        self.publish();

        tracing::debug!(
            added,
            generators = self.generators.len(),
            known = self.elements.len(),
            "generators added"
        );
        Ok(())
    }

    /// Adds those of `generators` that are not already elements.
    ///
    /// Membership is decided eagerly, so this enumerates the semigroup once
    /// per candidate.
    pub fn closure<I>(&mut self, generators: I) -> Result<(), FroidurePinError>
    where
        I: IntoIterator<Item = E>,
    {
        let candidates: Vec<E> = generators.into_iter().collect();
        let Some(head) = candidates.first() else {
            return Ok(());
        };
        let expected = self.degree().unwrap_or_else(|_| head.degree());
        if let Some(bad) = candidates.iter().find(|g| g.degree() != expected) {
            return Err(FroidurePinError::GeneratorDegreeMismatch {
                expected,
                found: bad.degree(),
            });
        }
        for candidate in candidates {
            if self.generators.is_empty() || !self.contains(&candidate)? {
                self.add_generator(candidate)?;
            }
        }
        Ok(())
    }

    /// A copy of `self` with `generators` added; `self` is left untouched.
    pub fn copy_add_generators<I>(&self, generators: I) -> Result<Self, FroidurePinError>
    where
        I: IntoIterator<Item = E>,
    {
        let mut copy = self.clone();
        copy.add_generators(generators)?;
        Ok(copy)
    }

    /// A copy of `self` closed under `generators`; `self` is left untouched.
    pub fn copy_closure<I>(&self, generators: I) -> Result<Self, FroidurePinError>
    where
        I: IntoIterator<Item = E>,
    {
        let mut copy = self.clone();
        copy.closure(generators)?;
        Ok(copy)
    }

    // ---------------------------------------------------------------------
    // Enumeration
    // ---------------------------------------------------------------------

    /// Enumerates until at least `limit` elements are known or the semigroup
    /// is fully enumerated. `LimitMax` and `PositiveInfinity` mean no limit.
    pub fn enumerate(&mut self, limit: Extended<usize>) -> Result<(), FroidurePinError> {
        match limit {
            Extended::Finite(limit) => {
                if self.finished() || self.elements.len() >= limit {
                    return Ok(());
                }
                let progress = self.progress();
                self.run_until(move || progress.current_size() >= limit)
            }
            Extended::LimitMax | Extended::PositiveInfinity => self.run(),
            Extended::NegativeInfinity => Ok(()),
            Extended::Undefined => Err(RunnerError::InvalidArgument(
                "cannot enumerate up to an undefined limit".to_string(),
            )
            .into()),
        }
    }

    /// Runs to completion; `Killed` if the runner died first.
    fn run_to_completion(&mut self) -> Result<(), FroidurePinError> {
        if !self.finished() {
            self.run()?;
        }
        if self.finished() {
            Ok(())
        } else {
            Err(FroidurePinError::Killed)
        }
    }

    /// `Tril::True` once fully enumerated, `Tril::Unknown` before.
    pub fn is_finite(&self) -> Tril {
        if self.finished() {
            Tril::True
        } else {
            Tril::Unknown
        }
    }

    // ---------------------------------------------------------------------
    // Sizes and rules
    // ---------------------------------------------------------------------

    #[inline]
    pub fn current_size(&self) -> usize {
        self.elements.len()
    }

    pub fn size(&mut self) -> Result<usize, FroidurePinError> {
        self.run_to_completion()?;
        Ok(self.elements.len())
    }

    #[inline]
    pub fn current_number_of_rules(&self) -> usize {
        self.number_of_rules
    }

    pub fn number_of_rules(&mut self) -> Result<usize, FroidurePinError> {
        self.run_to_completion()?;
        Ok(self.number_of_rules)
    }

    /// Length of the longest word found so far.
    #[inline]
    pub fn current_max_word_length(&self) -> usize {
        self.order.last().map_or(0, |&i| self.length[i])
    }

    pub fn current_rules(&self) -> Vec<(Word, Word)> {
        self.rules_processed_by(self.pos)
    }

    pub fn rules(&mut self) -> Result<Vec<(Word, Word)>, FroidurePinError> {
        self.run_to_completion()?;
        Ok(self.rules_processed_by(self.pos))
    }

    /// Rules found while processing the first `processed` elements of the
    /// breadth-first order, duplicate generators first.
    fn rules_processed_by(&self, processed: usize) -> Vec<(Word, Word)> {
        let k = self.generators.len();
        let mut rules = Vec::with_capacity(self.number_of_rules);
        for (letter, &p) in self.letter_to_pos.iter().enumerate() {
            if self.last[p] != letter {
                rules.push((vec![letter], vec![self.last[p]]));
            }
        }
        for &i in &self.order[..processed] {
            let suffix = self.suffix[i];
            for a in 0..k {
                if self.reduced.contains(i * k + a)
                    || suffix.is_some_and(|s| !self.reduced.contains(s * k + a))
                {
                    continue;
                }
                let Some(target) = self.right.target(i, a) else {
                    continue;
                };
                let mut lhs = self.word_of(i);
                lhs.push(a);
                rules.push((lhs, self.word_of(target)));
            }
        }
        rules
    }

    pub fn number_of_elements_of_length(&mut self, len: usize) -> Result<usize, FroidurePinError> {
        self.run_to_completion()?;
        Ok(self.length.iter().filter(|&&l| l == len).count())
    }

    /// Number of elements whose minimal word length lies in `lengths`.
    pub fn number_of_elements_of_length_in(
        &mut self,
        lengths: Range<usize>,
    ) -> Result<usize, FroidurePinError> {
        self.run_to_completion()?;
        Ok(self.length.iter().filter(|&&l| lengths.contains(&l)).count())
    }

    // ---------------------------------------------------------------------
    // Elements and positions
    // ---------------------------------------------------------------------

    #[inline]
    pub fn current_elements(&self) -> &[E] {
        &self.elements
    }

    pub fn elements(&mut self) -> Result<&[E], FroidurePinError> {
        self.run_to_completion()?;
        Ok(&self.elements)
    }

    /// The element at `position`, enumerating only as far as needed.
    pub fn at(&mut self, position: usize) -> Result<&E, FroidurePinError> {
        if position >= self.elements.len() {
            self.enumerate(Extended::Finite(position.saturating_add(1)))?;
            if position >= self.elements.len() && self.dead() {
                return Err(FroidurePinError::Killed);
            }
        }
        self.elements
            .get(position)
            .ok_or(FroidurePinError::PositionOutOfBounds {
                index: position,
                bound: self.elements.len(),
            })
    }

    fn degree_matches(&self, x: &E) -> bool {
        self.degree().is_ok_and(|d| d == x.degree())
    }

    /// Position of `x` among the elements found so far.
    pub fn current_position(&self, x: &E) -> Extended<usize> {
        if !self.degree_matches(x) {
            return Extended::Undefined;
        }
        self.positions.get(x).copied().into()
    }

    /// Position of `x`, enumerating until it is found or the semigroup is
    /// exhausted. `Undefined` if `x` is not an element.
    pub fn position(&mut self, x: &E) -> Result<Extended<usize>, FroidurePinError> {
        if !self.degree_matches(x) {
            return Ok(Extended::Undefined);
        }
        loop {
            if let Some(&p) = self.positions.get(x) {
                return Ok(Extended::Finite(p));
            }
            if self.finished() {
                return Ok(Extended::Undefined);
            }
            if self.dead() {
                return Err(FroidurePinError::Killed);
            }
            let next = self.elements.len() + 1;
            self.enumerate(Extended::Finite(next))?;
        }
    }

    pub fn contains(&mut self, x: &E) -> Result<bool, FroidurePinError> {
        Ok(self.position(x)?.is_finite())
    }

    #[inline]
    pub fn currently_contains_one(&self) -> bool {
        self.pos_one.is_some()
    }

    pub fn contains_one(&mut self) -> Result<bool, FroidurePinError> {
        self.run_to_completion()?;
        Ok(self.pos_one.is_some())
    }

    fn sorted_index(&mut self) -> Result<&SortedIndex, FroidurePinError> {
        self.run_to_completion()?;
        let elements = &self.elements;
        Ok(self.sorted.get_or_insert_with(|| SortedIndex::new(elements)))
    }

    /// The element of rank `rank` in the `Ord` order of the elements.
    pub fn sorted_at(&mut self, rank: usize) -> Result<&E, FroidurePinError> {
        let position = {
            let index = self.sorted_index()?;
            match index.by_rank.get(rank) {
                Some(&p) => p,
                None => {
                    return Err(FroidurePinError::PositionOutOfBounds {
                        index: rank,
                        bound: index.by_rank.len(),
                    });
                }
            }
        };
        Ok(&self.elements[position])
    }

    /// The rank of the element at `position`, `Undefined` if out of range.
    pub fn to_sorted_position(&mut self, position: usize) -> Result<Extended<usize>, FroidurePinError> {
        let index = self.sorted_index()?;
        Ok(index.rank_of.get(position).copied().into())
    }

    /// The rank of `x`, `Undefined` if `x` is not an element.
    pub fn sorted_position(&mut self, x: &E) -> Result<Extended<usize>, FroidurePinError> {
        match self.position(x)? {
            Extended::Finite(p) => self.to_sorted_position(p),
            _ => Ok(Extended::Undefined),
        }
    }

    pub fn sorted_elements(&mut self) -> Result<Vec<&E>, FroidurePinError> {
        self.sorted_index()?;
        let Some(index) = self.sorted.as_ref() else {
            return Ok(Vec::new());
        };
        Ok(index.by_rank.iter().map(|&p| &self.elements[p]).collect())
    }

    // ---------------------------------------------------------------------
    // Word data
    // ---------------------------------------------------------------------

    fn check_current(&self, position: usize) -> Result<(), FroidurePinError> {
        if position >= self.elements.len() {
            return Err(FroidurePinError::PositionOutOfBounds {
                index: position,
                bound: self.elements.len(),
            });
        }
        Ok(())
    }

    /// Position of the word with the last letter removed, `None` for
    /// generators.
    pub fn prefix(&self, position: usize) -> Result<Option<usize>, FroidurePinError> {
        self.check_current(position)?;
        Ok(self.prefix[position])
    }

    /// Position of the word with the first letter removed, `None` for
    /// generators.
    pub fn suffix(&self, position: usize) -> Result<Option<usize>, FroidurePinError> {
        self.check_current(position)?;
        Ok(self.suffix[position])
    }

    pub fn first_letter(&self, position: usize) -> Result<usize, FroidurePinError> {
        self.check_current(position)?;
        Ok(self.first[position])
    }

    pub fn final_letter(&self, position: usize) -> Result<usize, FroidurePinError> {
        self.check_current(position)?;
        Ok(self.last[position])
    }

    pub fn current_length(&self, position: usize) -> Result<usize, FroidurePinError> {
        self.check_current(position)?;
        Ok(self.length[position])
    }

    pub fn length(&mut self, position: usize) -> Result<usize, FroidurePinError> {
        self.run_to_completion()?;
        self.current_length(position)
    }

    fn word_of(&self, mut position: usize) -> Word {
        let mut word = Vec::with_capacity(self.length[position]);
        loop {
            word.push(self.last[position]);
            match self.prefix[position] {
                Some(p) => position = p,
                None => break,
            }
        }
        word.reverse();
        word
    }

    /// The word recorded for an element found so far.
    pub fn current_minimal_factorisation(&self, position: usize) -> Result<Word, FroidurePinError> {
        self.check_current(position)?;
        Ok(self.word_of(position))
    }

    /// The shortlex-least word over the generators equal to the element at
    /// `position`.
    pub fn minimal_factorisation(&mut self, position: usize) -> Result<Word, FroidurePinError> {
        self.run_to_completion()?;
        self.current_minimal_factorisation(position)
    }

    #[inline]
    pub fn factorisation(&mut self, position: usize) -> Result<Word, FroidurePinError> {
        self.minimal_factorisation(position)
    }

    /// A factorisation of `x`, `None` if `x` is not an element.
    pub fn factorisation_of(&mut self, x: &E) -> Result<Option<Word>, FroidurePinError> {
        match self.position(x)? {
            Extended::Finite(p) => self.minimal_factorisation(p).map(Some),
            _ => Ok(None),
        }
    }

    pub fn current_normal_forms(&self) -> Vec<Word> {
        (0..self.elements.len()).map(|i| self.word_of(i)).collect()
    }

    pub fn normal_forms(&mut self) -> Result<Vec<Word>, FroidurePinError> {
        self.run_to_completion()?;
        Ok(self.current_normal_forms())
    }

    fn validate_word(&self, word: &[usize]) -> Result<(), FroidurePinError> {
        if word.is_empty() {
            return Err(FroidurePinError::EmptyWord);
        }
        let bound = self.generators.len();
        if let Some((position, &letter)) = word.iter().enumerate().find(|(_, l)| **l >= bound) {
            return Err(FroidurePinError::LetterOutOfBounds {
                letter,
                position,
                bound,
            });
        }
        Ok(())
    }

    /// Follows `word` through the right Cayley graph from its first letter.
    fn trace(&self, word: &[usize]) -> Option<usize> {
        let (&head, tail) = word.split_first()?;
        tail.iter()
            .try_fold(self.letter_to_pos[head], |p, &a| self.right.target(p, a))
    }

    /// Position of the element represented by `word`, using only products
    /// found so far.
    pub fn current_position_of_word(&self, word: &[usize]) -> Result<Extended<usize>, FroidurePinError> {
        self.validate_word(word)?;
        Ok(self.trace(word).into())
    }

    pub fn position_of_word(&mut self, word: &[usize]) -> Result<usize, FroidurePinError> {
        self.validate_word(word)?;
        self.run_to_completion()?;
        match self.trace(word) {
            Some(p) => Ok(p),
            None => unreachable!("the right Cayley graph is complete after enumeration"),
        }
    }

    /// Evaluates `word` by multiplying generators. Does not enumerate.
    pub fn to_element(&self, word: &[usize]) -> Result<E, FroidurePinError> {
        self.validate_word(word)?;
        if let Some(p) = self.trace(word) {
            return Ok(self.elements[p].clone());
        }
        let mut x = self.generators[word[0]].clone();
        let mut tmp = x.clone();
        for &a in &word[1..] {
            tmp.product_inplace(&x, &self.generators[a]);
            std::mem::swap(&mut x, &mut tmp);
        }
        Ok(x)
    }

    /// Whether `u` and `v` represent the same element. Does not enumerate.
    pub fn equal_to(&self, u: &[usize], v: &[usize]) -> Result<bool, FroidurePinError> {
        self.validate_word(u)?;
        self.validate_word(v)?;
        if self.finished() {
            return Ok(self.trace(u) == self.trace(v));
        }
        Ok(self.to_element(u)? == self.to_element(v)?)
    }

    // ---------------------------------------------------------------------
    // Products and idempotents
    // ---------------------------------------------------------------------

    fn check_positions(&mut self, i: usize, j: usize) -> Result<(), FroidurePinError> {
        self.run_to_completion()?;
        self.check_current(i)?;
        self.check_current(j)
    }

    /// Product of two positions by tracing the word of `j` from `i`.
    /// Requires a complete enumeration.
    fn reduce(&self, i: usize, j: usize) -> usize {
        let mut p = i;
        for a in self.word_of(j) {
            p = match self.right.target(p, a) {
                Some(t) => t,
                None => unreachable!("the right Cayley graph is complete after enumeration"),
            };
        }
        p
    }

    /// Product of two positions, by tracing for short words and by
    /// multiplying otherwise. Requires a complete enumeration.
    fn product_position(&self, i: usize, j: usize) -> usize {
        let complexity = self.elements[i].complexity();
        if self.length[i] < 2 * complexity || self.length[j] < 2 * complexity {
            return self.reduce(i, j);
        }
        let product = self.elements[i].product(&self.elements[j]);
        match self.positions.get(&product) {
            Some(&p) => p,
            None => unreachable!("the semigroup is closed under multiplication"),
        }
    }

    /// Position of `element(i) * element(j)`, computed through the Cayley
    /// graph.
    pub fn product_by_reduction(&mut self, i: usize, j: usize) -> Result<usize, FroidurePinError> {
        self.check_positions(i, j)?;
        Ok(self.reduce(i, j))
    }

    /// Position of `element(i) * element(j)`, by whichever of tracing and
    /// multiplying is expected to be cheaper.
    pub fn fast_product(&mut self, i: usize, j: usize) -> Result<usize, FroidurePinError> {
        self.check_positions(i, j)?;
        Ok(self.product_position(i, j))
    }

    pub fn is_idempotent(&mut self, position: usize) -> Result<bool, FroidurePinError> {
        self.check_positions(position, position)?;
        Ok(self.product_position(position, position) == position)
    }

    /// Positions of all idempotents, in position order.
    pub fn idempotents(&mut self) -> Result<Vec<usize>, FroidurePinError> {
        self.run_to_completion()?;
        Ok((0..self.elements.len())
            .filter(|&i| self.product_position(i, i) == i)
            .collect())
    }

    pub fn number_of_idempotents(&mut self) -> Result<usize, FroidurePinError> {
        Ok(self.idempotents()?.len())
    }

    // ---------------------------------------------------------------------
    // Cayley graphs
    // ---------------------------------------------------------------------

    /// Right Cayley graph over the elements found so far. Edges of elements
    /// that have not been processed yet are undefined.
    #[inline]
    pub fn current_right_cayley_graph(&self) -> &WordGraph {
        &self.right
    }

    pub fn right_cayley_graph(&mut self) -> Result<&WordGraph, FroidurePinError> {
        self.run_to_completion()?;
        Ok(&self.right)
    }

    /// Left Cayley graph over the elements found so far; an edge is undefined
    /// when the product has not been found yet.
    pub fn current_left_cayley_graph(&self) -> WordGraph {
        let k = self.generators.len();
        let mut graph = WordGraph::new(self.elements.len(), k);
        let Some(mut tmp) = self.elements.first().map(Element::identity) else {
            return graph;
        };
        for (i, x) in self.elements.iter().enumerate() {
            for (a, g) in self.generators.iter().enumerate() {
                tmp.product_inplace(g, x);
                if let Some(&t) = self.positions.get(&tmp) {
                    graph.set_target(i, a, t);
                }
            }
        }
        graph
    }

    pub fn left_cayley_graph(&mut self) -> Result<WordGraph, FroidurePinError> {
        self.run_to_completion()?;
        Ok(self.current_left_cayley_graph())
    }

    // ---------------------------------------------------------------------
    // Internals
    // ---------------------------------------------------------------------

    fn publish(&self) {
        self.progress.publish(Progress {
            size: self.elements.len(),
            number_of_rules: self.number_of_rules,
            max_word_length: self.current_max_word_length(),
            finished: self.is_finished(),
        });
    }

    /// Appends a new element with empty word data and returns its position.
    fn push_element(&mut self, x: E) -> usize {
        let position = self.elements.len();
        let k = self.generators.len();
        if self.pos_one.is_none() && self.one.as_ref() == Some(&x) {
            self.pos_one = Some(position);
        }
        self.positions.insert(x.clone(), position);
        self.elements.push(x);
        self.prefix.push(None);
        self.suffix.push(None);
        self.first.push(0);
        self.last.push(0);
        self.length.push(0);
        self.right.add_nodes(1);
        self.reached.grow(position + 1);
        self.reduced.grow((position + 1) * k);
        position
    }

    /// Records the word data of `t` and queues it for processing.
    fn reach(
        &mut self,
        t: usize,
        prefix: Option<usize>,
        suffix: Option<usize>,
        first: usize,
        last: usize,
        length: usize,
    ) {
        self.prefix[t] = prefix;
        self.suffix[t] = suffix;
        self.first[t] = first;
        self.last[t] = last;
        self.length[t] = length;
        self.reached.insert(t);
        self.order.push(t);
    }

    /// Starts a new breadth-first pass from the generators. Known elements
    /// and cached products are kept.
    fn restart(&mut self) {
        let n = self.elements.len();
        let k = self.generators.len();
        self.order.clear();
        self.pos = 0;
        self.number_of_rules = 0;
        self.reached = FixedBitSet::with_capacity(n);
        self.reduced = FixedBitSet::with_capacity(n * k);
        self.letter_to_pos.clear();

        for letter in 0..k {
            let known = self.positions.get(&self.generators[letter]).copied();
            let p = match known {
                Some(p) => p,
                None => {
                    let generator = self.generators[letter].clone();
                    self.push_element(generator)
                }
            };
            self.letter_to_pos.push(p);
            if self.reached.contains(p) {
                // Duplicate generator.
                self.number_of_rules += 1;
            } else {
                self.reach(p, None, None, letter, letter, 1);
            }
        }
    }

    /// Computes every right multiple of the element at position `i`.
    fn process(&mut self, i: usize) {
        let k = self.generators.len();
        let suffix = self.suffix[i];
        let first = self.first[i];
        let length = self.length[i];

        for a in 0..k {
            let t = match self.right.target(i, a) {
                Some(t) => t,
                None => {
                    let mut tmp = self
                        .scratch
                        .take()
                        .unwrap_or_else(|| self.elements[i].identity());
                    tmp.product_inplace(&self.elements[i], &self.generators[a]);
                    let t = match self.positions.get(&tmp).copied() {
                        Some(t) => {
                            self.scratch = Some(tmp);
                            t
                        }
                        None => self.push_element(tmp),
                    };
                    self.right.set_target(i, a, t);
                    t
                }
            };

            if !self.reached.contains(t) {
                let t_suffix = match suffix {
                    None => Some(self.letter_to_pos[a]),
                    Some(s) => self.right.target(s, a),
                };
                self.reach(t, Some(i), t_suffix, first, a, length + 1);
                self.reduced.insert(i * k + a);
            } else if suffix.is_none_or(|s| self.reduced.contains(s * k + a)) {
                self.number_of_rules += 1;
            }
        }
    }
}

impl<E> Algorithm for FroidurePin<E>
where
    E: Element,
{
    type Error = FroidurePinError;

    fn run_batch(&mut self) -> Result<(), FroidurePinError> {
        let target = self.elements.len().saturating_add(self.batch_size);
        let mut processed = 0;
        while self.pos < self.order.len()
            && self.elements.len() < target
            && processed < self.batch_size
        {
            let i = self.order[self.pos];
            self.process(i);
            self.pos += 1;
            processed += 1;
        }
        self.publish();

        if reporting_enabled() {
            tracing::info!(
                elements = self.elements.len(),
                rules = self.number_of_rules,
                max_word_length = self.current_max_word_length(),
                "found elements"
            );
        } else {
            tracing::trace!(
                elements = self.elements.len(),
                processed,
                remaining = self.order.len() - self.pos,
                "batch complete"
            );
        }
        Ok(())
    }

    #[inline]
    fn is_finished(&self) -> bool {
        self.pos >= self.order.len()
    }
}

impl<E> Runnable for FroidurePin<E>
where
    E: Element,
{
    #[inline]
    fn runner(&self) -> &Runner {
        &self.runner
    }

    #[inline]
    fn runner_mut(&mut self) -> &mut Runner {
        &mut self.runner
    }

    /// Discards every element found so far and resets the runner. The
    /// generators and the batch size are kept.
    fn init(&mut self) {
        self.runner.init();
        let k = self.generators.len();
        self.elements.clear();
        self.positions.clear();
        self.prefix.clear();
        self.suffix.clear();
        self.first.clear();
        self.last.clear();
        self.length.clear();
        self.right = WordGraph::new(0, k);
        self.pos_one = None;
        self.sorted = None;
        self.restart();
        self.publish();
    }
}

impl<E> std::fmt::Display for FroidurePin<E>
where
    E: Element,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "FroidurePin(generators: {}, elements: {}, rules: {}, finished: {})",
            self.generators.len(),
            self.elements.len(),
            self.number_of_rules,
            self.finished()
        )
    }
}

/// Builder for `FroidurePin`.
#[derive(Debug, Clone)]
pub struct FroidurePinBuilder<E> {
    generators: Vec<E>,
    batch_size: usize,
    capacity: usize,
}

impl<E> Default for FroidurePinBuilder<E>
where
    E: Element,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<E> FroidurePinBuilder<E>
where
    E: Element,
{
    #[inline]
    pub fn new() -> Self {
        Self {
            generators: Vec::new(),
            batch_size: DEFAULT_BATCH_SIZE,
            capacity: 0,
        }
    }

    #[inline]
    pub fn generator(mut self, generator: E) -> Self {
        self.generators.push(generator);
        self
    }

    #[inline]
    pub fn generators<I>(mut self, generators: I) -> Self
    where
        I: IntoIterator<Item = E>,
    {
        self.generators.extend(generators);
        self
    }

    #[inline]
    pub fn batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Expected number of elements, used to pre-size storage.
    #[inline]
    pub fn reserve(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn build(self) -> Result<FroidurePin<E>, FroidurePinError> {
        if self.generators.is_empty() {
            return Err(FroidurePinError::NoGenerators);
        }
        let mut fp = FroidurePin::new();
        fp.set_batch_size(self.batch_size);
        fp.reserve(self.capacity);
        fp.add_generators(self.generators)?;
        Ok(fp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use semigroups_core::word::word_to_string;
    use semigroups_element::{bmat8::BMat8, perm::Perm, pperm::PPerm, transf::Transf};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use semigroups_runner::state::RunnerState;
    use std::time::Duration;

    type PointType = u8;

    fn transf(images: &[PointType]) -> Transf<PointType> {
        Transf::new(images.to_vec()).unwrap()
    }

    fn perm(images: &[PointType]) -> Perm<PointType> {
        Perm::new(images.to_vec()).unwrap()
    }

    /// Generators of the full transformation monoid on `n` points.
    fn full_transformation_monoid(n: usize) -> Vec<Transf<PointType>> {
        let n8 = n as PointType;
        let mut swap: Vec<PointType> = (0..n8).collect();
        swap.swap(0, 1);
        let cycle: Vec<PointType> = (0..n8).map(|i| (i + 1) % n8).collect();
        let mut collapse: Vec<PointType> = (0..n8).collect();
        collapse[1] = 0;
        vec![transf(&swap), transf(&cycle), transf(&collapse)]
    }

    fn symmetric_group_3() -> FroidurePin<Perm<PointType>> {
        FroidurePin::from_generators(vec![perm(&[1, 2, 0]), perm(&[1, 0, 2])]).unwrap()
    }

    fn assert_rules_hold<E: Element>(fp: &FroidurePin<E>, rules: &[(Word, Word)]) {
        for (lhs, rhs) in rules {
            assert_eq!(
                fp.to_element(lhs).unwrap(),
                fp.to_element(rhs).unwrap(),
                "rule {} = {} does not hold",
                word_to_string(lhs),
                word_to_string(rhs)
            );
        }
    }

    #[test]
    fn test_symmetric_group_of_degree_3() {
        let mut s = symmetric_group_3();
        assert_eq!(s.size().unwrap(), 6);
        assert!(s.finished());
        assert_eq!(s.number_of_generators(), 2);
        assert_eq!(s.degree().unwrap(), 3);
        assert!(s.contains_one().unwrap());
        assert_eq!(s.number_of_idempotents().unwrap(), 1);
        assert_eq!(s.is_finite(), Tril::True);
    }

    #[test]
    fn test_from_generators_validates_input() {
        assert_eq!(
            FroidurePin::<Transf<PointType>>::from_generators(Vec::new()).unwrap_err(),
            FroidurePinError::NoGenerators
        );
        assert_eq!(
            FroidurePin::from_generators(vec![transf(&[0, 1]), transf(&[0, 1, 2])]).unwrap_err(),
            FroidurePinError::GeneratorDegreeMismatch {
                expected: 2,
                found: 3
            }
        );
    }

    #[test]
    fn test_full_transformation_monoids() {
        let mut t3 = FroidurePin::from_generators(full_transformation_monoid(3)).unwrap();
        assert_eq!(t3.size().unwrap(), 27);
        assert_eq!(t3.number_of_idempotents().unwrap(), 10);

        let mut t4 = FroidurePin::from_generators(full_transformation_monoid(4)).unwrap();
        assert_eq!(t4.size().unwrap(), 256);
        assert_eq!(t4.number_of_idempotents().unwrap(), 41);
    }

    #[test]
    fn test_rules_are_consistent() {
        let mut t3 = FroidurePin::from_generators(full_transformation_monoid(3)).unwrap();
        let rules = t3.rules().unwrap();
        assert_eq!(rules.len(), t3.number_of_rules().unwrap());
        assert_rules_hold(&t3, &rules);
    }

    #[test]
    fn test_words_are_minimal_and_evaluate_correctly() {
        let mut t3 = FroidurePin::from_generators(full_transformation_monoid(3)).unwrap();
        let n = t3.size().unwrap();
        let mut previous = 0;
        for i in 0..n {
            let word = t3.minimal_factorisation(i).unwrap();
            assert_eq!(word.len(), t3.length(i).unwrap());
            assert_eq!(&t3.to_element(&word).unwrap(), t3.at(i).unwrap());
            assert_eq!(t3.position_of_word(&word).unwrap(), i);
            previous = previous.max(word.len());
        }
        assert_eq!(previous, t3.current_max_word_length());
        let by_length: usize = (1..=previous)
            .map(|len| t3.number_of_elements_of_length(len).unwrap())
            .sum();
        assert_eq!(by_length, n);
        assert_eq!(
            t3.number_of_elements_of_length_in(0..previous + 1).unwrap(),
            n
        );
    }

    #[test]
    fn test_prefix_and_suffix_structure() {
        let mut s = symmetric_group_3();
        let n = s.size().unwrap();
        for i in 0..n {
            let word = s.factorisation(i).unwrap();
            assert_eq!(s.first_letter(i).unwrap(), word[0]);
            assert_eq!(s.final_letter(i).unwrap(), *word.last().unwrap());
            match (s.prefix(i).unwrap(), s.suffix(i).unwrap()) {
                (None, None) => assert_eq!(word.len(), 1),
                (Some(p), Some(q)) => {
                    assert_eq!(s.to_element(&word[..word.len() - 1]).unwrap(), *s.at(p).unwrap());
                    assert_eq!(s.to_element(&word[1..]).unwrap(), *s.at(q).unwrap());
                }
                other => panic!("expected both or neither of prefix and suffix, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_duplicate_generators_are_rules() {
        let a = perm(&[1, 2, 0]);
        let mut s = FroidurePin::from_generators(vec![a.clone(), a]).unwrap();
        assert_eq!(s.size().unwrap(), 3);
        assert_eq!(
            s.position_of_generator(0).unwrap(),
            s.position_of_generator(1).unwrap()
        );
        let rules = s.rules().unwrap();
        assert!(rules.contains(&(vec![1], vec![0])));
        assert_eq!(rules.len(), s.number_of_rules().unwrap());
    }

    #[test]
    fn test_add_generator_resumes_enumeration() {
        let mut s = FroidurePin::from_generators(vec![perm(&[1, 2, 0])]).unwrap();
        assert_eq!(s.size().unwrap(), 3);
        let before: Vec<_> = s.current_elements().to_vec();

        s.add_generator(perm(&[1, 0, 2])).unwrap();
        assert!(!s.finished());
        assert!(s.current_size() >= 3);
        // Positions of known elements are stable.
        assert_eq!(&s.current_elements()[..3], &before[..]);

        assert_eq!(s.size().unwrap(), 6);
        let mut fresh = symmetric_group_3();
        assert_eq!(s.number_of_rules().unwrap(), fresh.number_of_rules().unwrap());

        let mut words = s.normal_forms().unwrap();
        let mut fresh_words = fresh.normal_forms().unwrap();
        words.sort();
        fresh_words.sort();
        assert_eq!(words, fresh_words);
        assert_rules_hold(&s, &s.current_rules());
    }

    #[test]
    fn test_add_generators_rejects_mismatched_degree_without_mutation() {
        let mut s = symmetric_group_3();
        s.run().unwrap();
        let err = s.add_generators(vec![perm(&[0, 1, 2]), perm(&[0, 1])]).unwrap_err();
        assert!(matches!(err, FroidurePinError::GeneratorDegreeMismatch { .. }));
        assert_eq!(s.number_of_generators(), 2);
        assert!(s.finished());
    }

    #[test]
    fn test_closure_rejects_mismatched_degree_without_mutation() {
        let mut s = FroidurePin::from_generators(vec![perm(&[1, 2, 0])]).unwrap();
        s.run().unwrap();
        let err = s.closure(vec![perm(&[1, 0, 2]), perm(&[1, 0])]).unwrap_err();
        assert_eq!(
            err,
            FroidurePinError::GeneratorDegreeMismatch {
                expected: 3,
                found: 2
            }
        );
        assert_eq!(s.number_of_generators(), 1);
        assert_eq!(s.current_size(), 3);
        assert!(s.finished());
    }

    #[test]
    fn test_closure_skips_known_elements() {
        let mut s = FroidurePin::from_generators(vec![perm(&[1, 2, 0])]).unwrap();
        s.closure(vec![perm(&[2, 0, 1]), perm(&[1, 0, 2])]).unwrap();
        assert_eq!(s.number_of_generators(), 2);
        assert_eq!(s.size().unwrap(), 6);
    }

    #[test]
    fn test_copies_are_independent() {
        let mut s = FroidurePin::from_generators(vec![perm(&[1, 2, 0])]).unwrap();
        let mut bigger = s.copy_add_generators(vec![perm(&[1, 0, 2])]).unwrap();
        assert_eq!(bigger.size().unwrap(), 6);
        assert_eq!(s.number_of_generators(), 1);
        assert_eq!(s.size().unwrap(), 3);

        let mut closed = s.copy_closure(vec![perm(&[0, 2, 1])]).unwrap();
        assert_eq!(closed.size().unwrap(), 6);
        assert_eq!(s.progress().current_size(), 3);
    }

    #[test]
    fn test_positions_and_membership() {
        let mut t3 = FroidurePin::from_generators(full_transformation_monoid(3)).unwrap();
        let constant = transf(&[2, 2, 2]);
        assert_eq!(t3.current_position(&constant), Extended::Undefined);
        let position = t3.position(&constant).unwrap();
        assert!(position.is_finite());
        assert!(t3.contains(&constant).unwrap());
        assert_eq!(t3.current_position(&constant), position);

        assert_eq!(t3.position(&transf(&[0, 1])).unwrap(), Extended::Undefined);
        let word = t3.factorisation_of(&constant).unwrap().unwrap();
        assert_eq!(t3.to_element(&word).unwrap(), constant);
    }

    #[test]
    fn test_position_of_non_member_is_undefined() {
        let mut s = FroidurePin::from_generators(vec![perm(&[1, 2, 0])]).unwrap();
        assert_eq!(s.position(&perm(&[1, 0, 2])).unwrap(), Extended::Undefined);
        assert!(s.finished());
        assert_eq!(s.factorisation_of(&perm(&[1, 0, 2])).unwrap(), None);
    }

    #[test]
    fn test_sorted_access() {
        let mut s = symmetric_group_3();
        let sorted: Vec<Perm<PointType>> = s.sorted_elements().unwrap().into_iter().cloned().collect();
        let mut expected = s.elements().unwrap().to_vec();
        expected.sort();
        assert_eq!(sorted, expected);

        for (rank, x) in expected.iter().enumerate() {
            assert_eq!(s.sorted_at(rank).unwrap(), x);
            assert_eq!(s.sorted_position(x).unwrap(), Extended::Finite(rank));
        }
        assert_eq!(s.to_sorted_position(6).unwrap(), Extended::Undefined);
        assert!(matches!(
            s.sorted_at(6),
            Err(FroidurePinError::PositionOutOfBounds { index: 6, bound: 6 })
        ));
    }

    #[test]
    fn test_products() {
        let mut t3 = FroidurePin::from_generators(full_transformation_monoid(3)).unwrap();
        let n = t3.size().unwrap();
        let elements = t3.current_elements().to_vec();
        for i in 0..n {
            for j in 0..n {
                let by_reduction = t3.product_by_reduction(i, j).unwrap();
                let fast = t3.fast_product(i, j).unwrap();
                assert_eq!(by_reduction, fast);
                assert_eq!(elements[fast], elements[i].product(&elements[j]));
            }
        }
        assert!(matches!(
            t3.fast_product(0, n),
            Err(FroidurePinError::PositionOutOfBounds { .. })
        ));
    }

    #[test]
    fn test_word_validation() {
        let mut s = symmetric_group_3();
        assert_eq!(s.to_element(&[]).unwrap_err(), FroidurePinError::EmptyWord);
        assert_eq!(
            s.position_of_word(&[0, 2]).unwrap_err(),
            FroidurePinError::LetterOutOfBounds {
                letter: 2,
                position: 1,
                bound: 2
            }
        );
        assert!(!s.started());
    }

    #[test]
    fn test_equal_to() {
        let mut s = symmetric_group_3();
        // (0 1 2)^3 = id = (0 1)^2
        assert!(s.equal_to(&[0, 0, 0], &[1, 1]).unwrap());
        assert!(!s.equal_to(&[0], &[1]).unwrap());
        s.run().unwrap();
        assert!(s.equal_to(&[0, 0, 0], &[1, 1]).unwrap());
        assert!(!s.equal_to(&[0, 1], &[1, 0]).unwrap());
    }

    #[test]
    fn test_cayley_graphs() {
        let mut s = symmetric_group_3();
        let n = s.size().unwrap();
        let right = s.right_cayley_graph().unwrap().clone();
        let left = s.left_cayley_graph().unwrap();
        assert_eq!(right.number_of_nodes(), n);
        assert_eq!(right.number_of_edges(), n * 2);
        assert_eq!(left.number_of_edges(), n * 2);

        for i in 0..n {
            for a in 0..2 {
                let g = s.generator(a).unwrap().clone();
                let x = s.at(i).unwrap().clone();
                let r = right.target(i, a).unwrap();
                let l = left.target(i, a).unwrap();
                assert_eq!(s.at(r).unwrap(), &x.product(&g));
                assert_eq!(s.at(l).unwrap(), &g.product(&x));
            }
        }
    }

    #[test]
    fn test_enumerate_stops_at_limit() {
        let mut t4 = FroidurePin::from_generators(full_transformation_monoid(4)).unwrap();
        t4.set_batch_size(8);
        t4.enumerate(Extended::Finite(20)).unwrap();
        assert!(t4.current_size() >= 20);
        assert!(!t4.finished());
        assert_eq!(t4.current_state(), RunnerState::StoppedByPredicate);

        t4.enumerate(Extended::Finite(10)).unwrap();
        t4.enumerate(Extended::LimitMax).unwrap();
        assert!(t4.finished());
        assert_eq!(t4.current_size(), 256);
        assert!(matches!(
            t4.enumerate(Extended::Undefined),
            Err(FroidurePinError::Runner(_))
        ));
    }

    #[test]
    fn test_at_enumerates_only_as_needed() {
        let mut t4 = FroidurePin::from_generators(full_transformation_monoid(4)).unwrap();
        t4.set_batch_size(4);
        assert!(t4.at(5).is_ok());
        assert!(!t4.finished());
        assert!(matches!(
            t4.at(1000),
            Err(FroidurePinError::PositionOutOfBounds {
                index: 1000,
                bound: 256
            })
        ));
        assert!(matches!(
            t4.at(usize::MAX),
            Err(FroidurePinError::PositionOutOfBounds {
                index: usize::MAX,
                bound: 256
            })
        ));
    }

    #[test]
    fn test_partial_enumeration_is_consistent() {
        let mut t4 = FroidurePin::from_generators(full_transformation_monoid(4)).unwrap();
        t4.set_batch_size(16);
        t4.run_until(|| true).unwrap();
        assert_eq!(t4.current_size(), 3);

        let progress = t4.progress();
        t4.run_until(move || progress.current_size() >= 50).unwrap();
        assert!(t4.stopped_by_predicate());
        let rules = t4.current_rules();
        assert_eq!(rules.len(), t4.current_number_of_rules());
        for (lhs, rhs) in &rules {
            assert!(t4.current_position_of_word(lhs).unwrap().finite().unwrap() < t4.current_size());
            assert!(t4.current_position_of_word(rhs).unwrap().finite().unwrap() < t4.current_size());
        }
        assert_rules_hold(&t4, &rules);
        assert_eq!(t4.current_normal_forms().len(), t4.current_size());
        assert_eq!(t4.progress().snapshot().size, t4.current_size());
    }

    #[test]
    fn test_eager_equals_current_after_finish() {
        let mut t3 = FroidurePin::from_generators(full_transformation_monoid(3)).unwrap();
        t3.run().unwrap();
        assert_eq!(t3.size().unwrap(), t3.current_size());
        assert_eq!(t3.number_of_rules().unwrap(), t3.current_number_of_rules());
        assert_eq!(t3.rules().unwrap(), t3.current_rules());
        assert_eq!(t3.normal_forms().unwrap(), t3.current_normal_forms());
        assert_eq!(t3.contains_one().unwrap(), t3.currently_contains_one());
        let graph = t3.current_right_cayley_graph().clone();
        assert_eq!(t3.right_cayley_graph().unwrap(), &graph);
        assert_eq!(t3.left_cayley_graph().unwrap(), t3.current_left_cayley_graph());
        assert!(t3.progress().snapshot().finished);
    }

    #[test]
    fn test_killed_enumeration_fails_eager_queries() {
        let mut t4 = FroidurePin::from_generators(full_transformation_monoid(4)).unwrap();
        t4.set_batch_size(4);
        t4.run_for(Duration::ZERO).unwrap();
        t4.kill();
        assert!(t4.dead());
        assert_eq!(t4.size().unwrap_err(), FroidurePinError::Killed);
        assert_eq!(t4.rules().unwrap_err(), FroidurePinError::Killed);
        // Current queries stay valid.
        assert_eq!(t4.current_size(), 3);
        assert_eq!(t4.current_rules().len(), t4.current_number_of_rules());
    }

    #[test]
    fn test_init_restarts_from_generators() {
        let mut s = symmetric_group_3();
        s.kill();
        assert!(s.dead());
        s.init();
        assert!(!s.dead());
        assert!(!s.started());
        assert_eq!(s.current_size(), 2);
        assert_eq!(s.number_of_generators(), 2);
        assert_eq!(s.size().unwrap(), 6);
    }

    #[test]
    fn test_builder() {
        let mut s = FroidurePinBuilder::new()
            .generator(perm(&[1, 2, 0]))
            .generators(vec![perm(&[1, 0, 2])])
            .batch_size(2)
            .reserve(6)
            .build()
            .unwrap();
        assert_eq!(s.batch_size(), 2);
        assert_eq!(s.size().unwrap(), 6);
        assert!(s.statistics().batches > 1);

        assert_eq!(
            FroidurePinBuilder::<Perm<PointType>>::new().build().unwrap_err(),
            FroidurePinError::NoGenerators
        );
    }

    #[test]
    fn test_random_generators_are_closed_under_products() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let gens: Vec<Transf<PointType>> = (0..3)
            .map(|_| Transf::random(5, &mut rng).unwrap())
            .collect();
        let mut s = FroidurePin::from_generators(gens).unwrap();
        let n = s.size().unwrap();
        assert!(n <= 3125);

        let elements = s.current_elements().to_vec();
        for x in &elements {
            for g in s.generators() {
                assert!(s.current_position(&x.product(g)).is_finite());
            }
        }
        assert_rules_hold(&s, &s.current_rules());
    }

    #[test]
    fn test_partial_permutations() {
        // The symmetric inverse monoid on 2 points has 7 elements.
        let gens = vec![
            PPerm::<PointType>::new(vec![Some(1), Some(0)]).unwrap(),
            PPerm::<PointType>::new(vec![Some(0), None]).unwrap(),
            PPerm::<PointType>::new(vec![Some(1), None]).unwrap(),
        ];
        let mut s = FroidurePin::from_generators(gens).unwrap();
        assert_eq!(s.size().unwrap(), 7);
        assert!(s.contains_one().unwrap());
    }

    #[test]
    fn test_boolean_matrices() {
        let mut nilpotent = BMat8::default();
        nilpotent.set(0, 1, true).unwrap();
        let mut s = FroidurePin::from_generators(vec![nilpotent]).unwrap();
        assert_eq!(s.size().unwrap(), 2);
        assert!(!s.contains_one().unwrap());
        assert_eq!(s.number_of_rules().unwrap(), 1);
        let zero = s.fast_product(0, 0).unwrap();
        assert_eq!(s.at(zero).unwrap(), &BMat8::default());
        assert_eq!(s.idempotents().unwrap(), vec![zero]);
    }

    #[test]
    fn test_display() {
        let mut s = symmetric_group_3();
        s.run().unwrap();
        assert_eq!(
            s.to_string(),
            "FroidurePin(generators: 2, elements: 6, rules: 8, finished: true)"
        );
    }
}
