//! Feedback access layer.
//!
//! Enforces the rules every caller shares (rating range, non-empty comment,
//! the one-feedback-per-user-per-product policy, owner-or-admin mutations)
//! on top of a [`FeedbackRepository`].

use crate::db::StoreError;
use crate::helpers::JsonResponse;
use crate::models;
use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use std::sync::Arc;

pub mod mock;
mod repository;

pub use mock::MockFeedbackRepository;
pub use repository::{FeedbackRepository, PgFeedbackRepository};

pub const MAX_COMMENT_LENGTH: usize = 1000;

#[derive(Debug, thiserror::Error)]
pub enum FeedbackError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Permission(String),
    #[error("{0}")]
    Conflict(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ResponseError for FeedbackError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Permission(_) => StatusCode::FORBIDDEN,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self {
            Self::Store(err) => {
                tracing::error!("Feedback store failure: {}", err);
                "Internal Server Error".to_string()
            }
            err => err.to_string(),
        };

        JsonResponse::<()>::build().to_response(self.status_code(), message)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FeedbackPolicy {
    pub one_per_user_per_product: bool,
}

/// Fields a caller may change on an existing feedback row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeedbackChanges {
    pub comment: Option<String>,
    pub rating: Option<i32>,
}

impl FeedbackChanges {
    pub fn is_empty(&self) -> bool {
        self.comment.is_none() && self.rating.is_none()
    }
}

pub fn validate_rating(rating: i32) -> Result<i32, FeedbackError> {
    if (models::MIN_RATING..=models::MAX_RATING).contains(&rating) {
        Ok(rating)
    } else {
        Err(FeedbackError::Validation(format!(
            "Rating must be between {} and {}",
            models::MIN_RATING,
            models::MAX_RATING
        )))
    }
}

/// Returns the trimmed comment.
pub fn validate_comment(comment: &str) -> Result<String, FeedbackError> {
    let comment = comment.trim();
    if comment.is_empty() {
        return Err(FeedbackError::Validation("Comment is required".to_string()));
    }
    if comment.chars().count() > MAX_COMMENT_LENGTH {
        return Err(FeedbackError::Validation(format!(
            "Comment must be at most {} characters",
            MAX_COMMENT_LENGTH
        )));
    }

    Ok(comment.to_string())
}

pub struct FeedbackService {
    repository: Arc<dyn FeedbackRepository>,
    policy: FeedbackPolicy,
}

impl FeedbackService {
    pub fn new(repository: Arc<dyn FeedbackRepository>, policy: FeedbackPolicy) -> Self {
        Self { repository, policy }
    }

    pub fn policy(&self) -> FeedbackPolicy {
        self.policy
    }

    pub async fn fetch_product(&self, product_id: i32) -> Result<models::Product, FeedbackError> {
        self.repository
            .fetch_product(product_id)
            .await?
            .ok_or_else(|| FeedbackError::NotFound(format!("Product {} not found", product_id)))
    }

    /// Feedback of one product, newest first. Unknown products have none.
    #[tracing::instrument(name = "List feedback of a product.", skip(self))]
    pub async fn list_by_product(
        &self,
        product_id: i32,
    ) -> Result<Vec<models::FeedbackDetails>, FeedbackError> {
        Ok(self.repository.fetch_by_product(product_id).await?)
    }

    #[tracing::instrument(name = "List all feedback.", skip(self))]
    pub async fn list_all(&self) -> Result<Vec<models::FeedbackDetails>, FeedbackError> {
        Ok(self.repository.fetch_all().await?)
    }

    pub async fn get(&self, id: i32) -> Result<models::FeedbackDetails, FeedbackError> {
        self.repository
            .fetch_details(id)
            .await?
            .ok_or_else(|| FeedbackError::NotFound("Feedback not found".to_string()))
    }

    pub async fn find_for_user(
        &self,
        product_id: i32,
        user_id: i32,
    ) -> Result<Option<models::Feedback>, FeedbackError> {
        Ok(self
            .repository
            .fetch_by_product_and_user(product_id, user_id)
            .await?)
    }

    /// Only customers write feedback, administrators moderate it.
    #[tracing::instrument(name = "Create feedback.", skip(self, author, comment), fields(author = author.id))]
    pub async fn create(
        &self,
        product_id: i32,
        author: &models::User,
        comment: &str,
        rating: i32,
    ) -> Result<models::Feedback, FeedbackError> {
        if author.is_admin() {
            return Err(FeedbackError::Permission(
                "Only customers can create feedback".to_string(),
            ));
        }
        let user_id = author.id;
        let rating = validate_rating(rating)?;
        let comment = validate_comment(comment)?;

        self.fetch_product(product_id).await?;

        if self.policy.one_per_user_per_product {
            if let Some(existing) = self.find_for_user(product_id, user_id).await? {
                tracing::info!(
                    "feedback exists: {}, user: {}, product: {}",
                    existing.id,
                    user_id,
                    product_id
                );
                return Err(already_submitted());
            }
        }

        let feedback = models::Feedback {
            product_id,
            user_id,
            comment,
            rating,
            ..Default::default()
        };

        // the pre-check above loses races, the store's constraints do not
        self.repository
            .insert(feedback)
            .await
            .map_err(|err| match err {
                StoreError::UniqueViolation(_) => already_submitted(),
                StoreError::ForeignKeyViolation(_) => {
                    FeedbackError::NotFound("Product or user not found".to_string())
                }
                err => err.into(),
            })
    }

    #[tracing::instrument(name = "Update feedback.", skip(self, requester), fields(requester = requester.id))]
    pub async fn update(
        &self,
        id: i32,
        requester: &models::User,
        changes: FeedbackChanges,
    ) -> Result<models::Feedback, FeedbackError> {
        let mut feedback = self.fetch_modifiable(id, requester, "update").await?;

        if changes.is_empty() {
            return Err(FeedbackError::Validation(
                "Nothing to update: provide comment or rating".to_string(),
            ));
        }
        if let Some(rating) = changes.rating {
            feedback.rating = validate_rating(rating)?;
        }
        if let Some(comment) = changes.comment {
            feedback.comment = validate_comment(&comment)?;
        }

        self.repository
            .update(feedback)
            .await?
            .ok_or_else(|| FeedbackError::NotFound("Feedback not found".to_string()))
    }

    #[tracing::instrument(name = "Delete feedback.", skip(self, requester), fields(requester = requester.id))]
    pub async fn delete(&self, id: i32, requester: &models::User) -> Result<(), FeedbackError> {
        let feedback = self.fetch_modifiable(id, requester, "delete").await?;

        match self.repository.delete(feedback.id).await? {
            true => Ok(()),
            false => Err(FeedbackError::NotFound("Feedback not found".to_string())),
        }
    }

    async fn fetch_modifiable(
        &self,
        id: i32,
        requester: &models::User,
        action: &str,
    ) -> Result<models::Feedback, FeedbackError> {
        match self.repository.fetch(id).await? {
            Some(feedback) if requester.can_modify(&feedback) => Ok(feedback),
            Some(_) => Err(FeedbackError::Permission(format!(
                "You can only {} your own feedback",
                action
            ))),
            None => Err(FeedbackError::NotFound("Feedback not found".to_string())),
        }
    }
}

fn already_submitted() -> FeedbackError {
    FeedbackError::Conflict("You have already provided feedback for this product".to_string())
}
