//! Status enums backed by TEXT columns, plus the project lifecycle
//! transition rules.
//!
//! Each enum round-trips through its lowercase snake_case string form,
//! which is exactly what the database stores. Conversion from `String`
//! is provided so `sqlx::FromRow` derives can use
//! `#[sqlx(try_from = "String")]` on status fields.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

macro_rules! define_status_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident = $text:expr ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $name {
            /// The database/wire representation.
            pub fn as_str(self) -> &'static str {
                match self {
                    $( $name::$variant => $text ),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $( $text => Ok($name::$variant), )+
                    other => Err(format!(
                        concat!("Unknown ", stringify!($name), ": {}"),
                        other
                    )),
                }
            }
        }

        impl TryFrom<String> for $name {
            type Error = String;

            fn try_from(s: String) -> Result<Self, Self::Error> {
                s.parse()
            }
        }
    };
}

define_status_enum! {
    /// Project lifecycle status.
    ///
    /// The main path only moves forward: `draft -> proposal_ready ->
    /// in_progress -> completed`. `on_hold` and `cancelled` are
    /// absorbing side branches reachable from any non-terminal state.
    ProjectStatus {
        Draft = "draft",
        ProposalReady = "proposal_ready",
        InProgress = "in_progress",
        Completed = "completed",
        OnHold = "on_hold",
        Cancelled = "cancelled",
    }
}

define_status_enum! {
    /// Project request triage status. `converted` and `rejected` are
    /// terminal; conversion is one-way and creates exactly one project.
    RequestStatus {
        Pending = "pending",
        Converted = "converted",
        Rejected = "rejected",
    }
}

define_status_enum! {
    /// Milestone status. Any transition between the three states is
    /// permitted; there is no enforced ordering.
    MilestoneStatus {
        Pending = "pending",
        InProgress = "in_progress",
        Completed = "completed",
    }
}

define_status_enum! {
    /// Change request resolution status. `pending -> approved` only.
    ChangeRequestStatus {
        Pending = "pending",
        Approved = "approved",
    }
}

impl ProjectStatus {
    /// Whether no further transitions are allowed out of this state.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            ProjectStatus::Completed | ProjectStatus::OnHold | ProjectStatus::Cancelled
        )
    }

    /// Validate a requested transition.
    ///
    /// Self-transitions are permitted no-ops (a repeated approval must
    /// not fail). Otherwise the main path is strictly forward, and the
    /// absorbing side branches accept any non-terminal state.
    pub fn can_transition(self, to: ProjectStatus) -> bool {
        use ProjectStatus::*;

        if self == to {
            return true;
        }

        match (self, to) {
            (Draft, ProposalReady) => true,
            (ProposalReady, InProgress) => true,
            (InProgress, Completed) => true,
            (from, OnHold | Cancelled) => !from.is_terminal(),
            _ => false,
        }
    }
}

impl RequestStatus {
    /// `converted` and `rejected` are irreversible.
    pub fn is_terminal(self) -> bool {
        self != RequestStatus::Pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn project_status_round_trips_through_text() {
        for status in [
            ProjectStatus::Draft,
            ProjectStatus::ProposalReady,
            ProjectStatus::InProgress,
            ProjectStatus::Completed,
            ProjectStatus::OnHold,
            ProjectStatus::Cancelled,
        ] {
            let parsed: ProjectStatus = status.as_str().parse().unwrap();
            assert_eq!(parsed, status);
        }
        assert!("shipped".parse::<ProjectStatus>().is_err());
    }

    #[test]
    fn main_path_only_moves_forward() {
        use ProjectStatus::*;
        assert!(Draft.can_transition(ProposalReady));
        assert!(ProposalReady.can_transition(InProgress));
        assert!(InProgress.can_transition(Completed));

        // No skipping ahead or moving backwards.
        assert!(!Draft.can_transition(InProgress));
        assert!(!Draft.can_transition(Completed));
        assert!(!ProposalReady.can_transition(Draft));
        assert!(!InProgress.can_transition(ProposalReady));
        assert!(!Completed.can_transition(InProgress));
    }

    #[test]
    fn self_transition_is_a_permitted_noop() {
        use ProjectStatus::*;
        for status in [Draft, ProposalReady, InProgress, Completed, OnHold, Cancelled] {
            assert!(status.can_transition(status));
        }
    }

    #[test]
    fn hold_and_cancel_absorb_non_terminal_states() {
        use ProjectStatus::*;
        for from in [Draft, ProposalReady, InProgress] {
            assert!(from.can_transition(OnHold));
            assert!(from.can_transition(Cancelled));
        }
        // Terminal states do not move sideways.
        assert!(!Completed.can_transition(OnHold));
        assert!(!Cancelled.can_transition(OnHold));
        assert!(!OnHold.can_transition(Cancelled));
    }

    #[test]
    fn request_terminal_states() {
        assert!(!RequestStatus::Pending.is_terminal());
        assert!(RequestStatus::Converted.is_terminal());
        assert!(RequestStatus::Rejected.is_terminal());
    }

    #[test]
    fn milestone_status_parses() {
        assert_eq!(
            "in_progress".parse::<MilestoneStatus>().unwrap(),
            MilestoneStatus::InProgress
        );
        assert!("done".parse::<MilestoneStatus>().is_err());
    }
}
