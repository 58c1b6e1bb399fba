//! The mutable working copy of an instance's costs, owned exclusively
//! by one [`crate::solve`] call for its lifetime.
//!
//! G_F keeps its own copy of the cost map (the instance's original
//! costs are never altered) and the sorted entering-arc index that
//! goes with it. Zeroing a committed arc is the sole mutation, and it
//! always goes through [`WorkingGraph::zero`] so the index stays
//! consistent with the costs it is supposed to reflect.

use std::collections::HashMap;

use crate::entering_index::EnteringIndex;
use crate::instance::{Arc, Cost, Instance, VertexId};

pub(crate) struct WorkingGraph<'a, I> {
    pub(crate) instance: &'a I,
    costs: HashMap<Arc, Cost>,
    pub(crate) entering_index: EnteringIndex,
}

impl<'a, I: Instance> WorkingGraph<'a, I> {
    pub(crate) fn new(instance: &'a I) -> Self {
        let n = instance.vertex_count();
        let mut costs = HashMap::new();
        let mut entering_index = EnteringIndex::new(n);
        for v in 0..n {
            for &a in instance.entering_arcs(VertexId(v)) {
                let c = instance.cost(a);
                costs.insert(a, c);
                entering_index.insert(a.head, c, a.tail);
            }
        }
        Self {
            instance,
            costs,
            entering_index,
        }
    }

    pub(crate) fn cost(&self, a: Arc) -> Cost {
        self.costs.get(&a).copied().unwrap_or(0)
    }

    /// Zero an arc's cost and reposition it in the entering-arc index:
    /// remove under the old key before mutating, insert under the new
    /// one after. Idempotent on arcs already at cost 0.
    pub(crate) fn zero(&mut self, a: Arc) {
        let old = self.cost(a);
        if old == 0 {
            return;
        }
        self.entering_index.reprice(a.head, a.tail, old, 0);
        self.costs.insert(a, 0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instance::ArcListInstance;

    #[test]
    fn zero_updates_cost_map_and_index_order() {
        let instance = ArcListInstance::new(
            2,
            VertexId(0),
            vec![VertexId(1)],
            [(VertexId(0), VertexId(1), 7)],
        );
        let mut graph = WorkingGraph::new(&instance);
        let a = Arc::new(VertexId(0), VertexId(1));
        assert_eq!(graph.cost(a), 7);
        graph.zero(a);
        assert_eq!(graph.cost(a), 0);
        assert_eq!(
            graph.entering_index.next_after(VertexId(1), None),
            Some((0, VertexId(0), VertexId(1)))
        );
    }
}
