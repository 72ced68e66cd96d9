use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::geo::haversine_meters;

/// Title length limit enforced at submission.
pub const TITLE_MAX_LEN: usize = 100;
/// Description length limit enforced at submission.
pub const DESCRIPTION_MAX_LEN: usize = 1000;

// --- Geo Types ---

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    /// Both components finite and within WGS84 ranges.
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }

    /// Great-circle distance to another point in meters.
    pub fn distance_meters(&self, other: &GeoPoint) -> f64 {
        haversine_meters(self.lat, self.lng, other.lat, other.lng)
    }
}

// --- Enums ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum IssueCategory {
    Pothole,
    Streetlight,
    Garbage,
    Drainage,
    WaterSupply,
    RoadDamage,
    TrafficSignal,
    ParkMaintenance,
    Graffiti,
    Other,
}

impl std::fmt::Display for IssueCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IssueCategory::Pothole => write!(f, "pothole"),
            IssueCategory::Streetlight => write!(f, "streetlight"),
            IssueCategory::Garbage => write!(f, "garbage"),
            IssueCategory::Drainage => write!(f, "drainage"),
            IssueCategory::WaterSupply => write!(f, "water_supply"),
            IssueCategory::RoadDamage => write!(f, "road_damage"),
            IssueCategory::TrafficSignal => write!(f, "traffic_signal"),
            IssueCategory::ParkMaintenance => write!(f, "park_maintenance"),
            IssueCategory::Graffiti => write!(f, "graffiti"),
            IssueCategory::Other => write!(f, "other"),
        }
    }
}

impl std::str::FromStr for IssueCategory {
    type Err = crate::CivicPulseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pothole" => Ok(IssueCategory::Pothole),
            "streetlight" => Ok(IssueCategory::Streetlight),
            "garbage" => Ok(IssueCategory::Garbage),
            "drainage" => Ok(IssueCategory::Drainage),
            "water_supply" => Ok(IssueCategory::WaterSupply),
            "road_damage" => Ok(IssueCategory::RoadDamage),
            "traffic_signal" => Ok(IssueCategory::TrafficSignal),
            "park_maintenance" => Ok(IssueCategory::ParkMaintenance),
            "graffiti" => Ok(IssueCategory::Graffiti),
            "other" => Ok(IssueCategory::Other),
            _ => Err(crate::CivicPulseError::Validation(format!(
                "Invalid category: {s}"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum IssueStatus {
    Reported,
    Verified,
    InProgress,
    Resolved,
    Rejected,
}

impl IssueStatus {
    /// Resolved and rejected issues are closed — they never count as live
    /// duplicate candidates.
    pub fn is_terminal(self) -> bool {
        matches!(self, IssueStatus::Resolved | IssueStatus::Rejected)
    }
}

impl std::fmt::Display for IssueStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IssueStatus::Reported => write!(f, "reported"),
            IssueStatus::Verified => write!(f, "verified"),
            IssueStatus::InProgress => write!(f, "in_progress"),
            IssueStatus::Resolved => write!(f, "resolved"),
            IssueStatus::Rejected => write!(f, "rejected"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    Medium,
    High,
    Critical,
}

impl Default for Priority {
    fn default() -> Self {
        Priority::Medium
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum VoteType {
    Upvote,
    Downvote,
}

impl std::str::FromStr for VoteType {
    type Err = crate::CivicPulseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "upvote" => Ok(VoteType::Upvote),
            "downvote" => Ok(VoteType::Downvote),
            _ => Err(crate::CivicPulseError::Validation(format!(
                "Invalid vote type: {s}. Must be \"upvote\" or \"downvote\""
            ))),
        }
    }
}

// --- Entities ---

/// One evidence photo attached to an issue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvidenceImage {
    pub filename: String,
    pub path: String,
    pub uploaded_at: DateTime<Utc>,
}

/// A citizen-submitted civic problem report.
///
/// `verification_score` is derived — always a pure function of the current
/// vote counts, evidence count, and age. It is recomputed on every vote
/// mutation and never written independently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub category: IssueCategory,
    pub location: GeoPoint,
    pub address: String,
    pub images: Vec<EvidenceImage>,
    /// Owning user — immutable after creation.
    pub reporter_id: Uuid,
    pub status: IssueStatus,
    pub priority: Priority,
    pub upvotes: u32,
    pub downvotes: u32,
    pub verification_score: u32,
    pub is_duplicate: bool,
    /// Back-reference to the canonical issue this one duplicates.
    pub duplicate_of: Option<Uuid>,
    pub is_verified: bool,
    pub verified_at: Option<DateTime<Utc>>,
    pub resolved_at: Option<DateTime<Utc>>,
    pub admin_notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Issue {
    pub fn total_votes(&self) -> u32 {
        self.upvotes + self.downvotes
    }
}

/// A single user's vote on a single issue. (issue_id, user_id) is unique —
/// the store enforces at-most-one-vote-per-user-per-issue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vote {
    pub issue_id: Uuid,
    pub user_id: Uuid,
    pub vote_type: VoteType,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_coordinates_accepted() {
        assert!(GeoPoint { lat: 12.9716, lng: 77.5946 }.is_valid());
        assert!(GeoPoint { lat: -90.0, lng: 180.0 }.is_valid());
    }

    #[test]
    fn out_of_range_coordinates_rejected() {
        assert!(!GeoPoint { lat: 91.0, lng: 0.0 }.is_valid());
        assert!(!GeoPoint { lat: 0.0, lng: -180.5 }.is_valid());
        assert!(!GeoPoint { lat: f64::NAN, lng: 0.0 }.is_valid());
    }

    #[test]
    fn terminal_statuses() {
        assert!(IssueStatus::Resolved.is_terminal());
        assert!(IssueStatus::Rejected.is_terminal());
        assert!(!IssueStatus::Reported.is_terminal());
        assert!(!IssueStatus::Verified.is_terminal());
        assert!(!IssueStatus::InProgress.is_terminal());
    }

    #[test]
    fn category_round_trips_through_str() {
        for s in [
            "pothole",
            "streetlight",
            "garbage",
            "drainage",
            "water_supply",
            "road_damage",
            "traffic_signal",
            "park_maintenance",
            "graffiti",
            "other",
        ] {
            let cat: IssueCategory = s.parse().unwrap();
            assert_eq!(cat.to_string(), s);
        }
    }

    #[test]
    fn unknown_vote_type_rejected() {
        assert!("sidevote".parse::<VoteType>().is_err());
        assert_eq!("upvote".parse::<VoteType>().unwrap(), VoteType::Upvote);
    }
}
