pub mod classifier;
pub mod patterns;
pub mod reputation;

pub use classifier::SuspicionClassifier;
pub use patterns::{AttackPattern, PatternSet};
pub use reputation::IpReputationList;
