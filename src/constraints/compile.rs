//! Compilation of partial distances into directed difference constraints.

use std::fmt::Display;

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;

use crate::points::{PointId, PointSpace};

use super::{PartialDistanceStore, Quadrangles, Triangles};

/// Direction of a difference constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Relation {
    /// `M[i][j] <= bound`
    AtMost,
    /// `M[i][j] >= bound`, i.e. `M[j][i] <= -bound`
    AtLeast,
}

/// A directed constraint `(relation, i, j, bound)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DifferenceConstraint {
    pub relation: Relation,
    pub from: PointId,
    pub to: PointId,
    pub bound: f64,
}

impl DifferenceConstraint {
    pub const fn at_most(from: PointId, to: PointId, bound: f64) -> Self {
        Self {
            relation: Relation::AtMost,
            from,
            to,
            bound,
        }
    }

    pub const fn at_least(from: PointId, to: PointId, bound: f64) -> Self {
        Self {
            relation: Relation::AtLeast,
            from,
            to,
            bound,
        }
    }

    /// The equivalent upper bound `(i, j, v)` meaning `M[i][j] <= v`.
    pub fn as_upper_bound(&self) -> (PointId, PointId, f64) {
        match self.relation {
            Relation::AtMost => (self.from, self.to, self.bound),
            Relation::AtLeast => (self.to, self.from, -self.bound),
        }
    }
}

impl Display for DifferenceConstraint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let op = match self.relation {
            Relation::AtMost => "<=",
            Relation::AtLeast => ">=",
        };
        write!(f, "d({}, {}) {} {}", self.from, self.to, op, self.bound)
    }
}

/// Directed difference constraints over a fixed set of points.
///
/// Node `k` of the graph is point `k`; every constraint is an edge from its
/// `from` point to its `to` point. Edges keep their emission order.
#[derive(Debug, Clone)]
pub struct CompiledNetwork {
    graph: DiGraph<PointId, DifferenceConstraint>,
}

impl CompiledNetwork {
    /// Builds a network over `point_count` points from arbitrary constraints.
    ///
    /// # Panics
    ///
    /// Panics if a constraint refers to a point `>= point_count`.
    pub fn from_constraints(
        point_count: usize,
        constraints: impl IntoIterator<Item = DifferenceConstraint>,
    ) -> Self {
        let mut graph = DiGraph::with_capacity(point_count, 0);
        for index in 0..point_count {
            graph.add_node(PointId::new(index));
        }
        let mut network = Self { graph };
        for constraint in constraints {
            network.push(constraint);
        }
        network
    }

    fn push(&mut self, constraint: DifferenceConstraint) {
        let n = self.point_count();
        assert!(
            constraint.from.index() < n && constraint.to.index() < n,
            "constraint refers to a point outside the network"
        );
        self.graph.add_edge(
            NodeIndex::new(constraint.from.index()),
            NodeIndex::new(constraint.to.index()),
            constraint,
        );
    }

    pub fn point_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn constraint_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Constraints in emission order.
    pub fn constraints(&self) -> impl Iterator<Item = &DifferenceConstraint> {
        self.graph.edge_weights()
    }

    pub fn graph(&self) -> &DiGraph<PointId, DifferenceConstraint> {
        &self.graph
    }

    /// The constraints as a weighted graph of upper bounds: an edge `i -> j`
    /// of weight `v` means `M[i][j] <= v`.
    pub fn upper_bound_graph(&self) -> DiGraph<PointId, f64> {
        let mut graph = DiGraph::with_capacity(self.point_count(), self.constraint_count());
        for index in 0..self.point_count() {
            graph.add_node(PointId::new(index));
        }
        for edge in self.graph.edge_references() {
            let (from, to, bound) = edge.weight().as_upper_bound();
            graph.add_edge(NodeIndex::new(from.index()), NodeIndex::new(to.index()), bound);
        }
        graph
    }

    /// Fresh triangle sequence over all points.
    pub fn triangles(&self) -> Triangles {
        Triangles::new(self.point_count())
    }

    /// Fresh quadrangle sequence over all points.
    pub fn quadrangles(&self) -> Quadrangles {
        Quadrangles::new(self.point_count())
    }
}

/// Compiles a store into directed difference constraints.
///
/// Pairs are visited in ascending `(i, j)` order. A present lower bound
/// emits `(>=, i, j, low)` and `(>=, j, i, low)`; a present upper bound emits
/// `(<=, i, j, high)` and `(<=, j, i, high)`.
pub fn compile(points: &PointSpace, store: &PartialDistanceStore) -> CompiledNetwork {
    let mut pairs: Vec<_> = store.iter().collect();
    pairs.sort_by_key(|&(key, _)| key);

    let mut network = CompiledNetwork::from_constraints(points.len(), std::iter::empty());
    for ((i, j), interval) in pairs {
        if let Some(low) = interval.low() {
            network.push(DifferenceConstraint::at_least(i, j, low));
            network.push(DifferenceConstraint::at_least(j, i, low));
        }
        if let Some(high) = interval.high() {
            network.push(DifferenceConstraint::at_most(i, j, high));
            network.push(DifferenceConstraint::at_most(j, i, high));
        }
    }
    network
}
