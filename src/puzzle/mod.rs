//! Candidate pairs and the knowledge filters over them

pub mod pair;
pub mod grouping;
pub mod candidate_set;
pub mod dialogue;

pub use pair::{Pair, Attribute, Claim};
pub use grouping::Grouping;
pub use candidate_set::CandidateSet;
pub use dialogue::{Dialogue, Speaker, Statement};
