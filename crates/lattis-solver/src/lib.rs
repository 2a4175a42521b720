//! Observation, propagation, and solve orchestration for Lattis.
//!
//! The solver repeatedly collapses the most constrained tile
//! ([`observe`]) and restores arc consistency around it
//! ([`propagate`]) until the grid is fully collapsed or a tile runs
//! out of options. [`collapse`] wraps the loop with seeded retries:
//! every attempt starts from a fresh copy of the initial grid, and the
//! seed chain is fully determined by the caller's seed, so any outcome
//! can be reproduced exactly.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

mod observe;
mod propagate;
mod queue;
mod solve;

pub use observe::observe;
pub use propagate::{propagate, Contradiction};
pub use queue::{enqueue_adjacent, QueueEntry, WorkQueue};
pub use solve::{collapse, observation_propagation, SolveConfig, SolveError, Solution};
