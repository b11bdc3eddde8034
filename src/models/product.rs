use serde::{Deserialize, Serialize};

// Owned by the platform, the feedback service only reads it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Product {
    pub id: i32,
    pub title: String,
}
