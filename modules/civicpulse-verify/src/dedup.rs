//! Duplicate detection for new submissions.
//!
//! Pure filter over a candidate pool the store has already narrowed to a
//! coarse bounding box. Three gates, in order: same category and still
//! open, within the exact haversine radius, title similarity above
//! threshold. Survivors keep the pool's order.

use tracing::warn;

use civicpulse_common::{GeoPoint, Issue, IssueCategory};

use crate::similarity::title_similarity;

/// Titles must overlap this much (bigram similarity) to count as duplicates.
pub const TITLE_SIMILARITY_THRESHOLD: f64 = 0.6;

/// Return the candidates that look like duplicates of a new report.
///
/// A missed duplicate is a lesser harm than a blocked submission, so
/// malformed candidates (broken coordinates) are skipped with a warning
/// rather than failing the whole check. Linking the winner into the new
/// issue's `duplicate_of` is the caller's job.
pub fn find_duplicates<'a>(
    location: &GeoPoint,
    category: IssueCategory,
    title: &str,
    candidates: &'a [Issue],
    radius_meters: f64,
) -> Vec<&'a Issue> {
    candidates
        .iter()
        .filter(|issue| issue.category == category && !issue.status.is_terminal())
        .filter(|issue| {
            if !issue.location.is_valid() {
                warn!(
                    issue_id = %issue.id,
                    lat = issue.location.lat,
                    lng = issue.location.lng,
                    "Skipping duplicate candidate with malformed coordinates"
                );
                return false;
            }
            location.distance_meters(&issue.location) <= radius_meters
        })
        .filter(|issue| title_similarity(title, &issue.title) > TITLE_SIMILARITY_THRESHOLD)
        .collect()
}
