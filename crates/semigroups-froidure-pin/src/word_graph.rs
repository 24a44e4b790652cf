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

//! # Word Graph
//!
//! A directed graph in which every node has exactly `out_degree` labelled
//! out-edge slots, any of which may be undefined. Cayley graphs of a
//! semigroup are word graphs whose nodes are element positions and whose
//! labels are generator letters.
//!
//! Targets are stored in one flat row-major buffer: the slot for node `s`
//! and label `a` lives at `s * out_degree + a`.

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct WordGraph {
    out_degree: usize,
    targets: Vec<Option<usize>>,
}

impl WordGraph {
    /// Creates a graph with `nodes` nodes and no edges.
    #[inline]
    pub fn new(nodes: usize, out_degree: usize) -> Self {
        Self {
            out_degree,
            targets: vec![None; nodes * out_degree],
        }
    }

    #[inline]
    pub fn number_of_nodes(&self) -> usize {
        if self.out_degree == 0 {
            0
        } else {
            self.targets.len() / self.out_degree
        }
    }

    #[inline]
    pub fn out_degree(&self) -> usize {
        self.out_degree
    }

    /// Number of defined edges.
    pub fn number_of_edges(&self) -> usize {
        self.targets.iter().filter(|t| t.is_some()).count()
    }

    /// Number of defined edges leaving `source`.
    pub fn number_of_edges_from(&self, source: usize) -> usize {
        self.targets(source).iter().filter(|t| t.is_some()).count()
    }

    /// The target of the edge `source --label-->`, or `None` if the edge is
    /// undefined or either index is out of range.
    #[inline]
    pub fn target(&self, source: usize, label: usize) -> Option<usize> {
        if label >= self.out_degree {
            return None;
        }
        self.targets
            .get(source * self.out_degree + label)
            .copied()
            .flatten()
    }

    /// Defines the edge `source --label--> target`.
    ///
    /// # Panics
    ///
    /// Panics if `source` or `label` is out of range.
    #[inline]
    pub fn set_target(&mut self, source: usize, label: usize, target: usize) {
        assert!(
            label < self.out_degree,
            "called `WordGraph::set_target` with label out of bounds: the out-degree is {} but the label is {}",
            self.out_degree,
            label
        );
        self.targets[source * self.out_degree + label] = Some(target);
    }

    /// The first defined edge from `source` with label at least `label`.
    pub fn next_label_and_target(&self, source: usize, label: usize) -> Option<(usize, usize)> {
        (label..self.out_degree)
            .find_map(|a| self.target(source, a).map(|t| (a, t)))
    }

    /// All out-edge slots of `source`.
    ///
    /// # Panics
    ///
    /// Panics if `source` is not a node.
    #[inline]
    pub fn targets(&self, source: usize) -> &[Option<usize>] {
        let start = source * self.out_degree;
        &self.targets[start..start + self.out_degree]
    }

    /// Appends `n` nodes without edges.
    #[inline]
    pub fn add_nodes(&mut self, n: usize) {
        self.targets
            .resize(self.targets.len() + n * self.out_degree, None);
    }

    /// Adds `n` undefined label slots to every node.
    pub fn add_to_out_degree(&mut self, n: usize) {
        if n == 0 {
            return;
        }
        let nodes = self.number_of_nodes();
        let old = self.out_degree;
        let new = old + n;
        let mut targets = vec![None; nodes * new];
        for s in 0..nodes {
            targets[s * new..s * new + old].copy_from_slice(&self.targets[s * old..(s + 1) * old]);
        }
        self.out_degree = new;
        self.targets = targets;
    }

    /// Reserves room for `additional` more nodes.
    #[inline]
    pub fn reserve(&mut self, additional: usize) {
        self.targets.reserve(additional * self.out_degree);
    }
}

impl std::fmt::Display for WordGraph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "WordGraph(nodes: {}, out_degree: {}, edges: {})",
            self.number_of_nodes(),
            self.out_degree,
            self.number_of_edges()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_graph_has_no_edges() {
        let g = WordGraph::new(3, 2);
        assert_eq!(g.number_of_nodes(), 3);
        assert_eq!(g.out_degree(), 2);
        assert_eq!(g.number_of_edges(), 0);
        assert_eq!(g.target(0, 0), None);
    }

    #[test]
    fn test_set_and_query_targets() {
        let mut g = WordGraph::new(3, 2);
        g.set_target(0, 1, 2);
        g.set_target(2, 0, 0);
        assert_eq!(g.target(0, 1), Some(2));
        assert_eq!(g.number_of_edges(), 2);
        assert_eq!(g.number_of_edges_from(0), 1);
        assert_eq!(g.targets(2), &[Some(0), None]);
        assert_eq!(g.next_label_and_target(0, 0), Some((1, 2)));
        assert_eq!(g.next_label_and_target(2, 1), None);
    }

    #[test]
    fn test_out_of_range_target_is_none() {
        let g = WordGraph::new(1, 1);
        assert_eq!(g.target(5, 0), None);
        assert_eq!(g.target(0, 3), None);
    }

    #[test]
    fn test_add_nodes_and_out_degree_preserve_edges() {
        let mut g = WordGraph::new(2, 1);
        g.set_target(1, 0, 0);
        g.add_nodes(1);
        g.add_to_out_degree(2);

        assert_eq!(g.number_of_nodes(), 3);
        assert_eq!(g.out_degree(), 3);
        assert_eq!(g.target(1, 0), Some(0));
        assert_eq!(g.targets(1), &[Some(0), None, None]);
        assert_eq!(g.targets(2), &[None, None, None]);
    }

    #[test]
    fn test_equality_and_ordering() {
        let mut a = WordGraph::new(2, 1);
        let b = a.clone();
        assert_eq!(a, b);
        a.set_target(0, 0, 1);
        assert_ne!(a, b);
        assert!(b < a);
    }

    #[test]
    fn test_display() {
        let mut g = WordGraph::new(2, 2);
        g.set_target(0, 0, 1);
        assert_eq!(g.to_string(), "WordGraph(nodes: 2, out_degree: 2, edges: 1)");
    }
}
