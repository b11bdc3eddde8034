use crate::services::FeedbackChanges;
use serde::{Deserialize, Serialize};
use serde_valid::Validate;

/// Partial update, absent fields keep their stored values.
#[derive(Serialize, Deserialize, Debug, Validate)]
pub struct EditFeedback {
    #[serde(default, deserialize_with = "super::trim::trimmed_option")]
    #[validate(min_length = 1)]
    #[validate(max_length = 1000)]
    pub comment: Option<String>,
    #[validate(minimum = 1)]
    #[validate(maximum = 5)]
    pub rating: Option<i32>,
}

impl From<EditFeedback> for FeedbackChanges {
    fn from(form: EditFeedback) -> Self {
        FeedbackChanges {
            comment: form.comment,
            rating: form.rating,
        }
    }
}
