pub mod classifier;

pub use classifier::{classify, has_submittable_risk, recommend_abuse_type};
