//! In-memory `IssueStore` for tests and local development.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use uuid::Uuid;

use civicpulse_common::{CivicPulseError, GeoPoint, Issue, IssueCategory, Vote};

use crate::store::IssueStore;

#[derive(Default)]
struct Tables {
    issues: HashMap<Uuid, Issue>,
    votes: HashMap<(Uuid, Uuid), Vote>,
}

/// Everything behind one mutex, so each store call is trivially atomic —
/// which is all the cast-vote contract asks of an adapter.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl IssueStore for MemoryStore {
    async fn insert_issue(&self, issue: &Issue) -> Result<(), CivicPulseError> {
        let mut tables = self.tables.lock().await;
        tables.issues.insert(issue.id, issue.clone());
        Ok(())
    }

    async fn get_issue(&self, id: Uuid) -> Result<Option<Issue>, CivicPulseError> {
        let tables = self.tables.lock().await;
        Ok(tables.issues.get(&id).cloned())
    }

    async fn update_issue(&self, issue: &Issue) -> Result<(), CivicPulseError> {
        let mut tables = self.tables.lock().await;
        if !tables.issues.contains_key(&issue.id) {
            return Err(CivicPulseError::NotFound(format!("Issue {}", issue.id)));
        }
        tables.issues.insert(issue.id, issue.clone());
        Ok(())
    }

    async fn open_issues_near(
        &self,
        location: GeoPoint,
        radius_meters: f64,
        category: IssueCategory,
    ) -> Result<Vec<Issue>, CivicPulseError> {
        // Bounding-box prefilter, same shape a SQL adapter would use.
        // ~111km per degree of latitude, scaled by cos(lat) for longitude.
        let lat_delta = radius_meters / 111_000.0;
        let lng_delta = radius_meters / (111_000.0 * location.lat.to_radians().cos());

        let tables = self.tables.lock().await;
        let mut matches: Vec<Issue> = tables
            .issues
            .values()
            .filter(|i| {
                i.category == category
                    && (i.location.lat - location.lat).abs() <= lat_delta
                    && (i.location.lng - location.lng).abs() <= lng_delta
            })
            .cloned()
            .collect();
        matches.sort_by_key(|i| i.created_at);
        Ok(matches)
    }

    async fn count_recent_by_reporter(
        &self,
        reporter_id: Uuid,
        since: DateTime<Utc>,
    ) -> Result<u32, CivicPulseError> {
        let tables = self.tables.lock().await;
        Ok(tables
            .issues
            .values()
            .filter(|i| i.reporter_id == reporter_id && i.created_at >= since)
            .count() as u32)
    }

    async fn get_vote(
        &self,
        issue_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<Vote>, CivicPulseError> {
        let tables = self.tables.lock().await;
        Ok(tables.votes.get(&(issue_id, user_id)).cloned())
    }

    async fn put_vote(&self, vote: &Vote) -> Result<(), CivicPulseError> {
        let mut tables = self.tables.lock().await;
        tables
            .votes
            .insert((vote.issue_id, vote.user_id), vote.clone());
        Ok(())
    }

    async fn delete_vote(&self, issue_id: Uuid, user_id: Uuid) -> Result<(), CivicPulseError> {
        let mut tables = self.tables.lock().await;
        tables.votes.remove(&(issue_id, user_id));
        Ok(())
    }
}
