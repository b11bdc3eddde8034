use crate::db::{self, StoreError};
use crate::models;
use async_trait::async_trait;
use sqlx::PgPool;

/// Storage operations the feedback service needs.
#[async_trait]
pub trait FeedbackRepository: Send + Sync {
    async fn fetch_product(&self, product_id: i32) -> Result<Option<models::Product>, StoreError>;

    async fn fetch(&self, id: i32) -> Result<Option<models::Feedback>, StoreError>;

    async fn fetch_details(&self, id: i32)
        -> Result<Option<models::FeedbackDetails>, StoreError>;

    /// Newest first.
    async fn fetch_by_product(
        &self,
        product_id: i32,
    ) -> Result<Vec<models::FeedbackDetails>, StoreError>;

    /// Newest first.
    async fn fetch_all(&self) -> Result<Vec<models::FeedbackDetails>, StoreError>;

    async fn fetch_by_product_and_user(
        &self,
        product_id: i32,
        user_id: i32,
    ) -> Result<Option<models::Feedback>, StoreError>;

    /// Stores a new row, `id` and timestamps are assigned by the store.
    async fn insert(&self, feedback: models::Feedback) -> Result<models::Feedback, StoreError>;

    /// Saves comment and rating, returns `None` when the row is gone.
    async fn update(
        &self,
        feedback: models::Feedback,
    ) -> Result<Option<models::Feedback>, StoreError>;

    async fn delete(&self, id: i32) -> Result<bool, StoreError>;
}

pub struct PgFeedbackRepository {
    pool: PgPool,
}

impl PgFeedbackRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FeedbackRepository for PgFeedbackRepository {
    async fn fetch_product(&self, product_id: i32) -> Result<Option<models::Product>, StoreError> {
        db::product::fetch(&self.pool, product_id).await
    }

    async fn fetch(&self, id: i32) -> Result<Option<models::Feedback>, StoreError> {
        db::feedback::fetch(&self.pool, id).await
    }

    async fn fetch_details(
        &self,
        id: i32,
    ) -> Result<Option<models::FeedbackDetails>, StoreError> {
        db::feedback::fetch_details(&self.pool, id).await
    }

    async fn fetch_by_product(
        &self,
        product_id: i32,
    ) -> Result<Vec<models::FeedbackDetails>, StoreError> {
        db::feedback::fetch_by_product(&self.pool, product_id).await
    }

    async fn fetch_all(&self) -> Result<Vec<models::FeedbackDetails>, StoreError> {
        db::feedback::fetch_all(&self.pool).await
    }

    async fn fetch_by_product_and_user(
        &self,
        product_id: i32,
        user_id: i32,
    ) -> Result<Option<models::Feedback>, StoreError> {
        db::feedback::fetch_by_product_and_user(&self.pool, product_id, user_id).await
    }

    async fn insert(&self, feedback: models::Feedback) -> Result<models::Feedback, StoreError> {
        db::feedback::insert(&self.pool, feedback).await
    }

    async fn update(
        &self,
        feedback: models::Feedback,
    ) -> Result<Option<models::Feedback>, StoreError> {
        db::feedback::update(&self.pool, feedback).await
    }

    async fn delete(&self, id: i32) -> Result<bool, StoreError> {
        db::feedback::delete(&self.pool, id).await
    }
}
