pub mod engagement;

pub use engagement::{EngagementScorer, EngagementWeights};
