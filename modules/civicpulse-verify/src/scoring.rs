//! Verification scoring and the auto-verify policy.
//!
//! Pure functions over an issue snapshot — callers pass `now` so results
//! are deterministic under test. The score is the crowd-confidence metric
//! shown next to every issue and the first gate of auto-verification.

use chrono::{DateTime, Utc};

use civicpulse_common::{Issue, VerificationConfig};

/// Cap on the net-vote-ratio component.
pub const VOTE_SCORE_MAX: f64 = 50.0;
/// Cap on the evidence-photo component.
pub const EVIDENCE_SCORE_MAX: f64 = 20.0;
/// Points per attached photo, up to the cap.
pub const EVIDENCE_POINTS_PER_IMAGE: f64 = 10.0;
/// Issues younger than this get a linearly-decaying recency boost.
pub const RECENCY_WINDOW_DAYS: f64 = 7.0;
/// Score floor for auto-verification.
pub const AUTO_VERIFY_MIN_SCORE: u32 = 60;

const MILLIS_PER_DAY: f64 = 1000.0 * 60.0 * 60.0 * 24.0;

/// Crowd-confidence score for an issue.
///
/// Summed from independent components:
/// - votes: `min(50, net/total * 50)` when any votes exist (negative when
///   downvotes dominate);
/// - evidence: `min(20, images * 10)`;
/// - recency: `10 - age_days` while the issue is under a week old;
/// - reporter reputation: reserved, contributes 0 for now.
///
/// The sum is rounded to the nearest integer. Component caps bound it at
/// 80 from above; a heavily downvoted issue saturates at 0 rather than
/// going negative, since the stored score is unsigned.
pub fn verification_score(issue: &Issue, now: DateTime<Utc>) -> u32 {
    let total_votes = issue.total_votes();
    let net_votes = issue.upvotes as f64 - issue.downvotes as f64;

    let mut score = 0.0;

    if total_votes > 0 {
        score += (net_votes / total_votes as f64 * VOTE_SCORE_MAX).min(VOTE_SCORE_MAX);
    }

    if !issue.images.is_empty() {
        score += (issue.images.len() as f64 * EVIDENCE_POINTS_PER_IMAGE).min(EVIDENCE_SCORE_MAX);
    }

    let age_days = (now - issue.created_at).num_milliseconds() as f64 / MILLIS_PER_DAY;
    if age_days < RECENCY_WINDOW_DAYS {
        score += 10.0 - age_days;
    }

    // Reporter reputation component: reserved. The original system never
    // shipped a formula, so it stays a no-op rather than inventing one.

    score.round().max(0.0) as u32
}

/// Whether crowd signal is strong enough to promote the issue to
/// `verified` without an admin. All three gates must pass: score floor,
/// minimum participation, and a strictly positive vote ratio
/// (`upvotes > 2 * downvotes`).
pub fn should_auto_verify(issue: &Issue, now: DateTime<Utc>, config: &VerificationConfig) -> bool {
    let score = verification_score(issue, now);
    let has_min_votes = issue.total_votes() >= config.min_votes_for_verification;
    let has_positive_ratio = issue.upvotes > issue.downvotes * 2;

    score >= AUTO_VERIFY_MIN_SCORE && has_min_votes && has_positive_ratio
}
