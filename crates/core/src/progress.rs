//! Derived project progress.
//!
//! Progress is always recomputed from the current milestone statuses.
//! It is never stored on the project row, so the admin and client views
//! can never disagree for the same project.

use crate::status::MilestoneStatus;

/// Percentage of completed milestones, rounded to the nearest integer.
///
/// Returns 0 for a project with no milestones. The result is always in
/// `0..=100`, and is 100 exactly when every milestone is completed.
pub fn progress(statuses: &[MilestoneStatus]) -> u8 {
    if statuses.is_empty() {
        return 0;
    }

    let completed = statuses
        .iter()
        .filter(|s| **s == MilestoneStatus::Completed)
        .count();

    let pct = (completed as f64 / statuses.len() as f64) * 100.0;
    pct.round() as u8
}
