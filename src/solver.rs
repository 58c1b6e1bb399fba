//! G_F: the greedy outer loop around FLAC (component A of the design).
//!
//! Repeatedly invoke FLAC, commit its returned tree into the cumulative
//! solution, zero the committed arcs' costs so later FLAC runs are
//! biased to reuse them, retire the terminals just reached, and repeat
//! until every terminal has been covered or FLAC can no longer make
//! progress.

use std::collections::BTreeSet;

use crate::error::DstError;
use crate::flac::FlacState;
use crate::graph::WorkingGraph;
use crate::instance::{Arc, Cost, Instance, VertexId};

/// The result of a [`solve`] call.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SolveOutcome {
    /// A feasible arborescence was found.
    Solved {
        /// Arcs of the arborescence, rooted at the instance's root.
        arborescence: BTreeSet<Arc>,
        /// Sum of the instance's original costs over `arborescence`.
        total_cost: Cost,
    },
    /// No feasible arborescence exists: some FLAC invocation exhausted
    /// its priority queue before reaching the root.
    Infeasible,
}

/// Solve a directed Steiner tree instance heuristically.
///
/// Returns `Err` only for structural precondition violations in
/// `instance` (see [`DstError`]); infeasibility is reported as
/// `Ok(SolveOutcome::Infeasible)`, not an error.
///
/// # Examples
///
/// ```
/// use dst_flac::{solve, ArcListInstance, SolveOutcome, VertexId};
///
/// let instance = ArcListInstance::new(
///     2,
///     VertexId(0),
///     vec![VertexId(1)],
///     [(VertexId(0), VertexId(1), 5)],
/// );
/// match solve(&instance).unwrap() {
///     SolveOutcome::Solved { total_cost, .. } => assert_eq!(total_cost, 5),
///     SolveOutcome::Infeasible => unreachable!(),
/// }
/// ```
pub fn solve<I: Instance>(instance: &I) -> Result<SolveOutcome, DstError> {
    validate(instance)?;

    let root = instance.root();
    let mut outstanding: BTreeSet<VertexId> = instance
        .terminals()
        .iter()
        .copied()
        .filter(|&t| t != root)
        .collect();

    let mut graph = WorkingGraph::new(instance);
    let mut arborescence: BTreeSet<Arc> = BTreeSet::new();

    while !outstanding.is_empty() {
        let Some((tree, reached)) = FlacState::reinit(&graph, &outstanding).run(&graph) else {
            return Ok(SolveOutcome::Infeasible);
        };
        for &a in &tree {
            arborescence.insert(a);
            graph.zero(a);
        }
        for t in reached {
            outstanding.remove(&t);
        }
    }

    let total_cost = arborescence.iter().map(|&a| instance.cost(a)).sum();
    Ok(SolveOutcome::Solved {
        arborescence,
        total_cost,
    })
}

/// Structural precondition checks (§7): every arc endpoint must be a
/// known vertex, and no arc may be reported more than once.
fn validate<I: Instance>(instance: &I) -> Result<(), DstError> {
    use std::collections::HashSet;

    let n = instance.vertex_count();
    let check = |v: VertexId| -> Result<(), DstError> {
        if v.0 >= n {
            Err(DstError::UnknownVertex { vertex: v })
        } else {
            Ok(())
        }
    };
    check(instance.root())?;
    for &t in instance.terminals() {
        check(t)?;
    }

    let mut seen: HashSet<Arc> = HashSet::new();
    for v in 0..n {
        for &a in instance.outgoing_arcs(VertexId(v)) {
            check(a.tail)?;
            check(a.head)?;
            if !seen.insert(a) {
                return Err(DstError::DuplicateArc {
                    tail: a.tail,
                    head: a.head,
                });
            }
        }
    }
    Ok(())
}
