use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Inclusive bounds of a feedback rating.
pub const MIN_RATING: i32 = 1;
pub const MAX_RATING: i32 = 5;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Feedback {
    pub id: i32,
    pub product_id: i32, // product.id
    pub user_id: i32,    // users.id, the owner
    pub comment: String,
    pub rating: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A feedback row together with the display data of its author and product.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackDetails {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub feedback: Feedback,
    pub user_email: String,
    pub product_title: String,
}
