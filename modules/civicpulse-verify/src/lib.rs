pub mod dedup;
pub mod scoring;
pub mod service;
pub mod similarity;
pub mod spam;
pub mod status;
pub mod store;
pub mod testutil;
pub mod votes;

pub use dedup::find_duplicates;
pub use scoring::{should_auto_verify, verification_score};
pub use service::{NewIssue, SubmitOutcome, VerificationService, VoteReceipt};
pub use similarity::title_similarity;
pub use status::{apply_status_change, StatusChange};
pub use store::IssueStore;
pub use votes::{apply_vote, VoteTransition, VoteUpdate};
