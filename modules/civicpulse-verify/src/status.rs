//! Admin-driven status transitions.
//!
//! Pure snapshot-in, snapshot-out: the caller persists the returned issue
//! and applies the reputation delta to the reporter's user row. The core
//! never touches user records itself.

use chrono::{DateTime, Utc};

use civicpulse_common::{Issue, IssueStatus};

/// Reputation awarded to a reporter when their issue is resolved.
pub const RESOLVED_REPUTATION_AWARD: i32 = 10;

/// Next issue snapshot plus the side effect the caller owes the reporter.
#[derive(Debug, Clone)]
pub struct StatusChange {
    pub issue: Issue,
    /// Points to add to the reporter's reputation, zero for most transitions.
    pub reputation_delta: i32,
}

/// Apply an admin status change. Entering `verified` for the first time
/// stamps the verification fields; entering `resolved` stamps `resolved_at`
/// and awards the reporter. Re-applying a status an issue already holds is
/// harmless.
pub fn apply_status_change(
    mut issue: Issue,
    new_status: IssueStatus,
    admin_notes: Option<String>,
    now: DateTime<Utc>,
) -> StatusChange {
    issue.status = new_status;
    if let Some(notes) = admin_notes {
        issue.admin_notes = Some(notes);
    }

    let mut reputation_delta = 0;

    if new_status == IssueStatus::Verified && !issue.is_verified {
        issue.is_verified = true;
        issue.verified_at = Some(now);
    }

    if new_status == IssueStatus::Resolved && issue.resolved_at.is_none() {
        issue.resolved_at = Some(now);
        reputation_delta = RESOLVED_REPUTATION_AWARD;
    }

    issue.updated_at = now;

    StatusChange {
        issue,
        reputation_delta,
    }
}
