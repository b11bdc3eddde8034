use crate::db::{feedback::UNIQUE_PAIR_INDEX, StoreError};
use crate::models;
use async_trait::async_trait;
use chrono::{Duration, Utc};
use std::collections::{BTreeMap, HashMap};
use tokio::sync::RwLock;

use super::FeedbackRepository;

/// In-memory feedback store with the same constraints as the feedback table:
/// foreign keys to products and users, and the optional unique pair index.
pub struct MockFeedbackRepository {
    state: RwLock<MockState>,
}

struct MockState {
    next_id: i32,
    unique_pair: bool,
    rows: BTreeMap<i32, models::Feedback>,
    products: HashMap<i32, String>,
    users: HashMap<i32, String>,
}

impl MockFeedbackRepository {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(MockState {
                next_id: 1,
                unique_pair: true,
                rows: BTreeMap::new(),
                products: HashMap::new(),
                users: HashMap::new(),
            }),
        }
    }

    pub fn with_product(mut self, id: i32, title: &str) -> Self {
        self.state.get_mut().products.insert(id, title.to_string());
        self
    }

    pub fn with_user(mut self, id: i32, email: &str) -> Self {
        self.state.get_mut().users.insert(id, email.to_string());
        self
    }

    /// Toggles the (product_id, user_id) unique index.
    pub fn with_unique_pair(mut self, enabled: bool) -> Self {
        self.state.get_mut().unique_pair = enabled;
        self
    }

    pub async fn len(&self) -> usize {
        self.state.read().await.rows.len()
    }
}

impl Default for MockFeedbackRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl MockState {
    fn details(&self, feedback: &models::Feedback) -> models::FeedbackDetails {
        models::FeedbackDetails {
            feedback: feedback.clone(),
            user_email: self.users.get(&feedback.user_id).cloned().unwrap_or_default(),
            product_title: self
                .products
                .get(&feedback.product_id)
                .cloned()
                .unwrap_or_default(),
        }
    }

    fn newest_first<'a>(
        &self,
        rows: impl Iterator<Item = &'a models::Feedback>,
    ) -> Vec<models::FeedbackDetails> {
        let mut list: Vec<models::FeedbackDetails> = rows.map(|row| self.details(row)).collect();
        list.sort_by(|a, b| {
            b.feedback
                .created_at
                .cmp(&a.feedback.created_at)
                .then(b.feedback.id.cmp(&a.feedback.id))
        });
        list
    }
}

#[async_trait]
impl FeedbackRepository for MockFeedbackRepository {
    async fn fetch_product(&self, product_id: i32) -> Result<Option<models::Product>, StoreError> {
        let state = self.state.read().await;
        Ok(state.products.get(&product_id).map(|title| models::Product {
            id: product_id,
            title: title.clone(),
        }))
    }

    async fn fetch(&self, id: i32) -> Result<Option<models::Feedback>, StoreError> {
        Ok(self.state.read().await.rows.get(&id).cloned())
    }

    async fn fetch_details(
        &self,
        id: i32,
    ) -> Result<Option<models::FeedbackDetails>, StoreError> {
        let state = self.state.read().await;
        Ok(state.rows.get(&id).map(|row| state.details(row)))
    }

    async fn fetch_by_product(
        &self,
        product_id: i32,
    ) -> Result<Vec<models::FeedbackDetails>, StoreError> {
        let state = self.state.read().await;
        Ok(state.newest_first(
            state
                .rows
                .values()
                .filter(|row| row.product_id == product_id),
        ))
    }

    async fn fetch_all(&self) -> Result<Vec<models::FeedbackDetails>, StoreError> {
        let state = self.state.read().await;
        Ok(state.newest_first(state.rows.values()))
    }

    async fn fetch_by_product_and_user(
        &self,
        product_id: i32,
        user_id: i32,
    ) -> Result<Option<models::Feedback>, StoreError> {
        let state = self.state.read().await;
        Ok(state
            .rows
            .values()
            .find(|row| row.product_id == product_id && row.user_id == user_id)
            .cloned())
    }

    async fn insert(&self, mut feedback: models::Feedback) -> Result<models::Feedback, StoreError> {
        let mut state = self.state.write().await;
        if !state.products.contains_key(&feedback.product_id) {
            return Err(StoreError::ForeignKeyViolation(
                "feedback_product_id_fkey".to_string(),
            ));
        }
        if !state.users.contains_key(&feedback.user_id) {
            return Err(StoreError::ForeignKeyViolation(
                "feedback_user_id_fkey".to_string(),
            ));
        }
        if state.unique_pair
            && state.rows.values().any(|row| {
                row.product_id == feedback.product_id && row.user_id == feedback.user_id
            })
        {
            return Err(StoreError::UniqueViolation(UNIQUE_PAIR_INDEX.to_string()));
        }

        let now = Utc::now();
        feedback.id = state.next_id;
        feedback.created_at = now;
        feedback.updated_at = now;
        state.next_id += 1;
        state.rows.insert(feedback.id, feedback.clone());

        Ok(feedback)
    }

    async fn update(
        &self,
        feedback: models::Feedback,
    ) -> Result<Option<models::Feedback>, StoreError> {
        let mut state = self.state.write().await;
        Ok(state.rows.get_mut(&feedback.id).map(|row| {
            row.comment = feedback.comment;
            row.rating = feedback.rating;
            row.updated_at = Utc::now().max(row.updated_at + Duration::microseconds(1));
            row.clone()
        }))
    }

    async fn delete(&self, id: i32) -> Result<bool, StoreError> {
        Ok(self.state.write().await.rows.remove(&id).is_some())
    }
}
