#![deny(missing_docs)]

//! A heuristic solver for the **Directed Steiner Tree** problem.
//!
//! Given a directed graph with non-negative integer arc costs, a root
//! vertex, and a set of terminal vertices, [`solve`] produces a
//! feasible arborescence rooted at the root that spans every terminal,
//! built from two coupled algorithms:
//!
//! - **FLAC** grows a saturating multi-source flow backward from
//!   terminals toward the root and returns a low-density partial
//!   arborescence (a tree reaching some terminals at small
//!   cost-per-terminal ratio).
//! - **G_F** is the greedy outer loop: it repeatedly invokes FLAC,
//!   commits the returned tree, zeroes the committed arcs' costs so
//!   later runs are biased to reuse them, retires the terminals just
//!   reached, and iterates until every terminal is covered.
//!
//! The crate makes no claim of optimality or an approximation bound;
//! see the individual module docs for the invariants it does maintain.
//!
//! Graph loading, result serialization and a CLI surface are out of
//! scope: the crate exposes only the [`Instance`] trait as its
//! external contract, plus a minimal [`ArcListInstance`] so the solver
//! is usable without a separate graph crate.

mod entering_index;
mod error;
mod flac;
mod graph;
mod instance;
mod solver;

pub use error::DstError;
pub use instance::{Arc, ArcListInstance, Cost, Instance, VertexId};
pub use solver::{solve, SolveOutcome};
