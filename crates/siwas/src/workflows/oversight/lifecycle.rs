//! Transition tables for the three status machines.
//!
//! Every mutation routes through these tables; no call site compares status
//! literals on its own. Illegal edges are refused, never coerced to the
//! nearest valid state.

use super::domain::{FindingStatus, MonitoringStatus, PackageStatus};

impl PackageStatus {
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }

    /// Forward chain Draft -> Published -> OnProgress -> Completed, with
    /// Cancelled reachable from any non-terminal state.
    pub const fn permits(self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Draft, Self::Published)
                | (Self::Published, Self::OnProgress)
                | (Self::OnProgress, Self::Completed)
                | (Self::Draft, Self::Cancelled)
                | (Self::Published, Self::Cancelled)
                | (Self::OnProgress, Self::Cancelled)
        )
    }
}

impl FindingStatus {
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Resolved | Self::Deferred)
    }

    /// Forward-only: a finding may skip InProgress, but nothing leaves
    /// Resolved or Deferred and nothing moves backward.
    pub const fn permits(self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::New, Self::InProgress)
                | (Self::New, Self::Resolved)
                | (Self::New, Self::Deferred)
                | (Self::InProgress, Self::Resolved)
                | (Self::InProgress, Self::Deferred)
        )
    }
}

impl MonitoringStatus {
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed)
    }

    /// Health can swing both ways between reporting periods, so the three
    /// non-terminal indicators interchange freely. Completed is final.
    pub const fn permits(self, target: Self) -> bool {
        match (self, target) {
            (Self::Completed, _) => false,
            (from, to) if from as u8 == to as u8 => false,
            (_, _) => true,
        }
    }
}
