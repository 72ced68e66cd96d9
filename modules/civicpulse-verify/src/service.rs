//! Orchestration over the pipeline: the three calls the web layer makes.
//!
//! `submit_issue` runs spam guard then duplicate detection before
//! persisting; `cast_vote` runs the vote ledger, recomputes the score, and
//! applies auto-verify side effects. Side effects outside the issue row
//! (reporter reputation, notifications) stay with the caller.

use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use civicpulse_common::{
    CivicPulseError, EvidenceImage, GeoPoint, Issue, IssueCategory, IssueStatus, Priority,
    VerificationConfig, Vote, VoteType, DESCRIPTION_MAX_LEN, TITLE_MAX_LEN,
};

use crate::dedup::find_duplicates;
use crate::scoring::{should_auto_verify, verification_score};
use crate::spam::{is_spamming, window_start};
use crate::store::IssueStore;
use crate::votes::{apply_vote, VoteTransition};

/// A submission as it arrives from the web layer, before validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewIssue {
    pub title: String,
    pub description: String,
    pub category: IssueCategory,
    pub location: GeoPoint,
    pub address: String,
    pub priority: Option<Priority>,
    pub reporter_id: Uuid,
    pub images: Vec<EvidenceImage>,
}

/// Result of a submission: the persisted issue plus advisory duplicate info.
#[derive(Debug, Clone, Serialize)]
pub struct SubmitOutcome {
    pub issue: Issue,
    pub duplicate_warning: Option<String>,
    pub duplicate_candidates: Vec<Issue>,
}

/// Counts and derived state after a vote mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VoteReceipt {
    pub upvotes: u32,
    pub downvotes: u32,
    pub verification_score: u32,
    pub is_verified: bool,
}

pub struct VerificationService {
    store: Arc<dyn IssueStore>,
    config: VerificationConfig,
}

impl VerificationService {
    pub fn new(store: Arc<dyn IssueStore>, config: VerificationConfig) -> Self {
        Self { store, config }
    }

    /// Validate, rate-limit, and dedup-check a new report, then persist it
    /// in `reported` status with score 0. Duplicates don't block creation:
    /// the issue is stored flagged, back-referencing the first match.
    pub async fn submit_issue(&self, new: NewIssue) -> Result<SubmitOutcome, CivicPulseError> {
        validate_submission(&new)?;

        let now = Utc::now();

        let recent = self
            .store
            .count_recent_by_reporter(new.reporter_id, window_start(now))
            .await?;
        if is_spamming(recent, self.config.spam_threshold) {
            info!(reporter_id = %new.reporter_id, recent, "Submission blocked by spam guard");
            return Err(CivicPulseError::RateLimited);
        }

        let pool = self
            .store
            .open_issues_near(
                new.location,
                self.config.duplicate_radius_meters,
                new.category,
            )
            .await?;
        let duplicate_candidates: Vec<Issue> = find_duplicates(
            &new.location,
            new.category,
            &new.title,
            &pool,
            self.config.duplicate_radius_meters,
        )
        .into_iter()
        .cloned()
        .collect();

        let is_duplicate = !duplicate_candidates.is_empty();
        let issue = Issue {
            id: Uuid::new_v4(),
            title: new.title,
            description: new.description,
            category: new.category,
            location: new.location,
            address: new.address,
            images: new.images,
            reporter_id: new.reporter_id,
            status: IssueStatus::Reported,
            priority: new.priority.unwrap_or_default(),
            upvotes: 0,
            downvotes: 0,
            verification_score: 0,
            is_duplicate,
            duplicate_of: duplicate_candidates.first().map(|d| d.id),
            is_verified: false,
            verified_at: None,
            resolved_at: None,
            admin_notes: None,
            created_at: now,
            updated_at: now,
        };
        self.store.insert_issue(&issue).await?;

        info!(
            issue_id = %issue.id,
            category = %issue.category,
            is_duplicate,
            candidates = duplicate_candidates.len(),
            "Issue submitted"
        );

        Ok(SubmitOutcome {
            issue,
            duplicate_warning: is_duplicate.then(|| "Similar issues found nearby".to_string()),
            duplicate_candidates,
        })
    }

    /// Run one vote cast through the ledger, recompute the score, and
    /// promote to `verified` if the policy fires (first time only).
    pub async fn cast_vote(
        &self,
        issue_id: Uuid,
        user_id: Uuid,
        vote_type: VoteType,
    ) -> Result<VoteReceipt, CivicPulseError> {
        let mut issue = self
            .store
            .get_issue(issue_id)
            .await?
            .ok_or_else(|| CivicPulseError::NotFound("Issue not found".to_string()))?;

        let existing = self
            .store
            .get_vote(issue_id, user_id)
            .await?
            .map(|v| v.vote_type);

        let now = Utc::now();
        let update = apply_vote(existing, vote_type, issue.upvotes, issue.downvotes);

        match update.transition {
            VoteTransition::Cast | VoteTransition::Flipped => {
                self.store
                    .put_vote(&Vote {
                        issue_id,
                        user_id,
                        vote_type,
                        created_at: now,
                    })
                    .await?;
            }
            VoteTransition::Retracted => {
                self.store.delete_vote(issue_id, user_id).await?;
            }
        }

        issue.upvotes = update.upvotes;
        issue.downvotes = update.downvotes;
        issue.verification_score = verification_score(&issue, now);

        if !issue.is_verified && should_auto_verify(&issue, now, &self.config) {
            issue.is_verified = true;
            issue.verified_at = Some(now);
            issue.status = IssueStatus::Verified;
            info!(issue_id = %issue.id, score = issue.verification_score, "Issue auto-verified");
        }

        issue.updated_at = now;
        self.store.update_issue(&issue).await?;

        debug!(
            issue_id = %issue.id,
            user_id = %user_id,
            transition = ?update.transition,
            upvotes = issue.upvotes,
            downvotes = issue.downvotes,
            score = issue.verification_score,
            "Vote recorded"
        );

        Ok(VoteReceipt {
            upvotes: issue.upvotes,
            downvotes: issue.downvotes,
            verification_score: issue.verification_score,
            is_verified: issue.is_verified,
        })
    }

    /// Current score of a stored issue, recomputed as of now.
    pub async fn verification_score_for(&self, issue_id: Uuid) -> Result<u32, CivicPulseError> {
        let issue = self
            .store
            .get_issue(issue_id)
            .await?
            .ok_or_else(|| CivicPulseError::NotFound("Issue not found".to_string()))?;
        Ok(verification_score(&issue, Utc::now()))
    }

    /// Whether the stored issue currently clears the auto-verify policy.
    pub async fn check_auto_verify(&self, issue_id: Uuid) -> Result<bool, CivicPulseError> {
        let issue = self
            .store
            .get_issue(issue_id)
            .await?
            .ok_or_else(|| CivicPulseError::NotFound("Issue not found".to_string()))?;
        Ok(should_auto_verify(&issue, Utc::now(), &self.config))
    }
}

fn validate_submission(new: &NewIssue) -> Result<(), CivicPulseError> {
    if new.title.trim().is_empty() {
        return Err(CivicPulseError::Validation(
            "Please provide a title".to_string(),
        ));
    }
    if new.title.chars().count() > TITLE_MAX_LEN {
        return Err(CivicPulseError::Validation(format!(
            "Title cannot exceed {TITLE_MAX_LEN} characters"
        )));
    }
    if new.description.chars().count() > DESCRIPTION_MAX_LEN {
        return Err(CivicPulseError::Validation(format!(
            "Description cannot exceed {DESCRIPTION_MAX_LEN} characters"
        )));
    }
    if !new.location.lng.is_finite() || !(-180.0..=180.0).contains(&new.location.lng) {
        return Err(CivicPulseError::Validation("Invalid longitude".to_string()));
    }
    if !new.location.lat.is_finite() || !(-90.0..=90.0).contains(&new.location.lat) {
        return Err(CivicPulseError::Validation("Invalid latitude".to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submission() -> NewIssue {
        NewIssue {
            title: "Big pothole near market".to_string(),
            description: "Deep pothole, two-wheelers swerving into traffic".to_string(),
            category: IssueCategory::Pothole,
            location: GeoPoint { lat: 12.9716, lng: 77.5946 },
            address: "Market Rd".to_string(),
            priority: None,
            reporter_id: Uuid::new_v4(),
            images: vec![],
        }
    }

    #[test]
    fn valid_submission_passes() {
        assert!(validate_submission(&submission()).is_ok());
    }

    #[test]
    fn overlong_title_rejected() {
        let mut new = submission();
        new.title = "x".repeat(TITLE_MAX_LEN + 1);
        assert!(matches!(
            validate_submission(&new),
            Err(CivicPulseError::Validation(_))
        ));
    }

    #[test]
    fn overlong_description_rejected() {
        let mut new = submission();
        new.description = "x".repeat(DESCRIPTION_MAX_LEN + 1);
        assert!(matches!(
            validate_submission(&new),
            Err(CivicPulseError::Validation(_))
        ));
    }

    #[test]
    fn bad_longitude_rejected_before_latitude() {
        let mut new = submission();
        new.location = GeoPoint { lat: 95.0, lng: 200.0 };
        let err = validate_submission(&new).unwrap_err();
        assert!(err.to_string().contains("longitude"), "{err}");
    }

    #[test]
    fn bad_latitude_rejected() {
        let mut new = submission();
        new.location.lat = -90.5;
        let err = validate_submission(&new).unwrap_err();
        assert!(err.to_string().contains("latitude"), "{err}");
    }
}
