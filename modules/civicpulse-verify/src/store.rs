//! Storage port for the verification pipeline.
//!
//! The core never talks to a database directly — it reads and writes
//! through this trait, and the surrounding system supplies an adapter over
//! its relational store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use civicpulse_common::{CivicPulseError, GeoPoint, Issue, IssueCategory, Vote};

/// Persistence operations the pipeline depends on.
///
/// Atomicity contract: each cast-vote is a read-modify-write on shared
/// counters, and the adapter must make it atomic with respect to
/// concurrent votes on the same issue — a row lock, a transaction, or an
/// optimistic version check all satisfy this. The scoring and policy
/// functions themselves are pure and reentrant. Duplicate-detection reads
/// need no such guarantee: a racing create producing a missed or extra
/// duplicate flag is an acceptable advisory-level error.
#[async_trait]
pub trait IssueStore: Send + Sync {
    async fn insert_issue(&self, issue: &Issue) -> Result<(), CivicPulseError>;

    async fn get_issue(&self, id: Uuid) -> Result<Option<Issue>, CivicPulseError>;

    async fn update_issue(&self, issue: &Issue) -> Result<(), CivicPulseError>;

    /// Open candidate pool for duplicate detection: same-category issues
    /// roughly within `radius_meters` of `location`. Adapters may return a
    /// coarse superset (e.g. a bounding-box prefilter) — the detector
    /// applies the exact haversine radius. Order should be whatever the
    /// backing store returns; the detector preserves it.
    async fn open_issues_near(
        &self,
        location: GeoPoint,
        radius_meters: f64,
        category: IssueCategory,
    ) -> Result<Vec<Issue>, CivicPulseError>;

    /// Number of issues this reporter created at or after `since`.
    async fn count_recent_by_reporter(
        &self,
        reporter_id: Uuid,
        since: DateTime<Utc>,
    ) -> Result<u32, CivicPulseError>;

    async fn get_vote(
        &self,
        issue_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<Vote>, CivicPulseError>;

    /// Insert or replace the (issue, user) vote row.
    async fn put_vote(&self, vote: &Vote) -> Result<(), CivicPulseError>;

    async fn delete_vote(&self, issue_id: Uuid, user_id: Uuid) -> Result<(), CivicPulseError>;
}
