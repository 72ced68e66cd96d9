use std::env;

/// Tunables for the verification pipeline. These are the only knobs the
/// core depends on; everything else (ports, upload limits, mail) belongs
/// to the surrounding web layer.
#[derive(Debug, Clone)]
pub struct VerificationConfig {
    /// Radius within which a nearby same-category issue counts as a
    /// duplicate candidate.
    pub duplicate_radius_meters: f64,
    /// Minimum total votes before an issue can auto-verify.
    pub min_votes_for_verification: u32,
    /// Submissions per reporter per trailing hour before the spam guard trips.
    pub spam_threshold: u32,
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            duplicate_radius_meters: 100.0,
            min_votes_for_verification: 3,
            spam_threshold: 5,
        }
    }
}

impl VerificationConfig {
    /// Load configuration from environment variables, falling back to the
    /// defaults above. Panics with a clear message on unparseable values.
    pub fn from_env() -> Self {
        Self {
            duplicate_radius_meters: env::var("DUPLICATE_RADIUS_METERS")
                .unwrap_or_else(|_| "100".to_string())
                .parse()
                .expect("DUPLICATE_RADIUS_METERS must be a number"),
            min_votes_for_verification: env::var("MIN_VOTES_FOR_VERIFICATION")
                .unwrap_or_else(|_| "3".to_string())
                .parse()
                .expect("MIN_VOTES_FOR_VERIFICATION must be a number"),
            spam_threshold: env::var("SPAM_THRESHOLD")
                .unwrap_or_else(|_| "5".to_string())
                .parse()
                .expect("SPAM_THRESHOLD must be a number"),
        }
    }
}
