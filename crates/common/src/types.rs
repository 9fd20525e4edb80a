use std::fmt;

/// Type alias for a single directed edge: (from, to, weight)
pub type Edge<W> = (usize, usize, W);

/// Operations that may only run while the distance matrix is consistent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GuardedOperation {
    /// Reading the distance matrix (`dist()` / `distance()`).
    ReadDistances,
    /// Scanning the diagonal for negative self-distances.
    NegativeCycleCheck,
    /// Folding an edge in with the O(n^2) incremental pass.
    IncrementalUpdate,
}

impl fmt::Display for GuardedOperation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            GuardedOperation::ReadDistances => write!(f, "accessing dist"),
            GuardedOperation::NegativeCycleCheck => write!(f, "has_negative_cycle()"),
            GuardedOperation::IncrementalUpdate => write!(f, "add_edge_and_update()"),
        }
    }
}
