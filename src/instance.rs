//! The external collaborator contract: a directed graph with integer
//! vertices, non-negative integer arc costs, a root and a terminal set.
//!
//! The core never owns a graph; it is handed one through the
//! [`Instance`] trait. [`ArcListInstance`] is a minimal, self-contained
//! implementation built from a plain arc list, enough to exercise the
//! solver without depending on an external graph crate.

use std::collections::HashMap;

/// Identifier of a vertex. Vertices are dense: for an instance with `n`
/// vertices, valid ids are `0..n`.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct VertexId(pub usize);

/// Non-negative integer arc cost.
pub type Cost = u64;

/// A directed arc, identified solely by its endpoints. Cost is looked
/// up through the instance or the solver's mutable cost map, never
/// stored on the arc.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Arc {
    /// Origin vertex.
    pub tail: VertexId,
    /// Destination vertex.
    pub head: VertexId,
}

impl Arc {
    /// Build an arc from its endpoints.
    #[must_use]
    pub const fn new(tail: VertexId, head: VertexId) -> Self {
        Self { tail, head }
    }
}

/// A directed graph instance: vertices, arcs, costs, root and terminals.
///
/// Implementors only need to answer these queries; how the graph is
/// stored is entirely up to the caller. Vertex ids must be dense over
/// `0..vertex_count()`.
pub trait Instance {
    /// The root vertex every arborescence is rooted at.
    fn root(&self) -> VertexId;

    /// The vertices that must be reached by the solution.
    fn terminals(&self) -> &[VertexId];

    /// Number of vertices; valid ids range over `0..vertex_count()`.
    fn vertex_count(&self) -> usize;

    /// Arcs entering `v`, i.e. arcs `a` with `a.head == v`.
    fn entering_arcs(&self, v: VertexId) -> &[Arc];

    /// Arcs leaving `v`, i.e. arcs `a` with `a.tail == v`.
    fn outgoing_arcs(&self, v: VertexId) -> &[Arc];

    /// Cost of an arc. Must be non-negative; the core treats it as an
    /// integer over which saturation volumes accumulate.
    fn cost(&self, a: Arc) -> Cost;
}

/// A minimal [`Instance`] built from a plain list of weighted arcs.
///
/// This is the crate's only bundled graph representation; it exists so
/// the solver is usable and testable without a separate graph crate.
/// Loading instances from files, or from a caller's own graph type, is
/// out of scope for the core.
#[derive(Clone, Debug)]
pub struct ArcListInstance {
    root: VertexId,
    terminals: Vec<VertexId>,
    entering: Vec<Vec<Arc>>,
    outgoing: Vec<Vec<Arc>>,
    costs: HashMap<Arc, Cost>,
}

impl ArcListInstance {
    /// Build an instance from `vertex_count` vertices, a `root`, a set
    /// of `terminals`, and a list of `(tail, head, cost)` arcs.
    ///
    /// Structural validation (unknown vertices, arcs reported more
    /// than once) is performed lazily by [`crate::solve`], not here, so
    /// that instances can be assembled incrementally. When an arc is
    /// passed twice, both occurrences are kept (so validation has
    /// something to reject) and `cost` returns whichever was seen last.
    #[must_use]
    pub fn new(
        vertex_count: usize,
        root: VertexId,
        terminals: Vec<VertexId>,
        arcs: impl IntoIterator<Item = (VertexId, VertexId, Cost)>,
    ) -> Self {
        let mut entering = vec![Vec::new(); vertex_count];
        let mut outgoing = vec![Vec::new(); vertex_count];
        let mut costs = HashMap::new();
        for (tail, head, cost) in arcs {
            let a = Arc::new(tail, head);
            if tail.0 < vertex_count {
                outgoing[tail.0].push(a);
            }
            if head.0 < vertex_count {
                entering[head.0].push(a);
            }
            costs.insert(a, cost);
        }
        Self {
            root,
            terminals,
            entering,
            outgoing,
            costs,
        }
    }
}

impl Instance for ArcListInstance {
    fn root(&self) -> VertexId {
        self.root
    }

    fn terminals(&self) -> &[VertexId] {
        &self.terminals
    }

    fn vertex_count(&self) -> usize {
        self.entering.len()
    }

    fn entering_arcs(&self, v: VertexId) -> &[Arc] {
        self.entering.get(v.0).map_or(&[], Vec::as_slice)
    }

    fn outgoing_arcs(&self, v: VertexId) -> &[Arc] {
        self.outgoing.get(v.0).map_or(&[], Vec::as_slice)
    }

    fn cost(&self, a: Arc) -> Cost {
        self.costs.get(&a).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arc_list_instance_indexes_entering_and_outgoing() {
        let instance = ArcListInstance::new(
            3,
            VertexId(0),
            vec![VertexId(2)],
            [
                (VertexId(0), VertexId(1), 5),
                (VertexId(1), VertexId(2), 1),
            ],
        );
        assert_eq!(instance.outgoing_arcs(VertexId(0)).len(), 1);
        assert_eq!(instance.entering_arcs(VertexId(1)).len(), 1);
        assert_eq!(instance.entering_arcs(VertexId(0)).len(), 0);
        assert_eq!(
            instance.cost(Arc::new(VertexId(0), VertexId(1))),
            5
        );
    }
}
