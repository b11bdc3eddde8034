use crate::models;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::convert::From;

/// Feedback as shown on a product page.
#[derive(Debug, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Anonymous {
    pub id: i32,
    pub product_id: i32,
    pub user_id: i32,
    pub user_email: String,
    pub comment: String,
    pub rating: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<models::FeedbackDetails> for Anonymous {
    fn from(details: models::FeedbackDetails) -> Self {
        let feedback = details.feedback;
        Self {
            id: feedback.id,
            product_id: feedback.product_id,
            user_id: feedback.user_id,
            user_email: details.user_email,
            comment: feedback.comment,
            rating: feedback.rating,
            created_at: feedback.created_at,
            updated_at: feedback.updated_at,
        }
    }
}
