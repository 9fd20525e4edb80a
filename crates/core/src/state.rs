use common::error::Error;
use common::types::GuardedOperation;

/// Whether the stored matrix reflects shortest distances for the current edge set.
///
/// ```text
///                add_edge (improving, deferred)
///   Consistent ───────────────────────────────▶ Inconsistent
///       ▲                                             │
///       └──────────────────── solve() ────────────────┘
/// ```
///
/// Every other operation leaves the state where it is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatrixState {
    /// Reads, negative-cycle checks and incremental updates are allowed.
    #[default]
    Consistent,
    /// At least one relaxation was recorded without propagation.
    Inconsistent,
}

impl MatrixState {
    pub fn is_consistent(self) -> bool {
        self == MatrixState::Consistent
    }

    /// Gate for operations that need an up-to-date matrix.
    ///
    /// # Errors
    /// Returns `Error::StaleMatrix(op)` when the state is `Inconsistent`.
    pub fn ensure_consistent(self, op: GuardedOperation) -> Result<(), Error> {
        match self {
            MatrixState::Consistent => Ok(()),
            MatrixState::Inconsistent => Err(Error::StaleMatrix(op)),
        }
    }

    pub(crate) fn mark_inconsistent(&mut self) {
        *self = MatrixState::Inconsistent;
    }

    pub(crate) fn mark_consistent(&mut self) {
        *self = MatrixState::Consistent;
    }
}
