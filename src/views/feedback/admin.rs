use crate::models;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::convert::From;

#[derive(Debug, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Admin {
    pub id: i32,
    pub product_id: i32,
    pub product_title: String,
    pub user_id: i32,
    pub user_email: String,
    pub comment: String,
    pub rating: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<models::FeedbackDetails> for Admin {
    fn from(details: models::FeedbackDetails) -> Self {
        let feedback = details.feedback;
        Self {
            id: feedback.id,
            product_id: feedback.product_id,
            product_title: details.product_title,
            user_id: feedback.user_id,
            user_email: details.user_email,
            comment: feedback.comment,
            rating: feedback.rating,
            created_at: feedback.created_at,
            updated_at: feedback.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn carries_display_data() {
        let details = models::FeedbackDetails {
            feedback: models::Feedback {
                id: 1,
                product_id: 5,
                user_id: 2,
                comment: "Great".to_string(),
                rating: 5,
                ..Default::default()
            },
            user_email: "owner@example.com".to_string(),
            product_title: "Sample Laptop".to_string(),
        };

        let view: Admin = details.into();
        assert_eq!(view.product_title, "Sample Laptop");
        assert_eq!(view.user_email, "owner@example.com");

        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["productId"], 5);
        assert_eq!(json["userEmail"], "owner@example.com");
    }
}
