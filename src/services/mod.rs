pub mod feedback;

pub use feedback::{FeedbackChanges, FeedbackError, FeedbackPolicy, FeedbackService};
