//! Structural precondition errors.
//!
//! These are programming errors, not solver outcomes: an [`Instance`]
//! that violates them has no well-defined FLAC/G_F run, so the core
//! refuses it up front rather than behaving unpredictably partway
//! through a solve. Infeasibility (no arborescence reaching every
//! terminal) is a normal, non-error result; see [`crate::SolveOutcome`].
//!
//! [`Instance`]: crate::Instance

use thiserror::Error;

use crate::instance::VertexId;

/// A structural precondition violation in an [`Instance`](crate::Instance).
#[derive(Debug, Error, Eq, PartialEq)]
pub enum DstError {
    /// An arc referenced a vertex outside `0..vertex_count()`.
    #[error("vertex {} is not a valid vertex of this instance", .vertex.0)]
    UnknownVertex {
        /// The out-of-range vertex id.
        vertex: VertexId,
    },

    /// The same arc (by endpoints) was reported more than once by
    /// `outgoing_arcs`. An [`Instance`](crate::Instance) models a simple
    /// digraph: `cost` is a pure function of `(tail, head)`, so a second
    /// occurrence of the same pair can never be distinguished from the
    /// first by cost alone: the duplicate itself is the violation.
    #[error("arc ({}, {}) is reported more than once", .tail.0, .head.0)]
    DuplicateArc {
        /// Arc tail.
        tail: VertexId,
        /// Arc head.
        head: VertexId,
    },
}
