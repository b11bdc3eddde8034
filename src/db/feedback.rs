use crate::db::StoreError;
use crate::models;
use sqlx::PgPool;
use tracing::Instrument;

pub const UNIQUE_PAIR_INDEX: &str = "feedback_product_user_uidx";

const FEEDBACK_COLUMNS: &str =
    "f.id, f.product_id, f.user_id, f.comment, f.rating, f.created_at, f.updated_at";

fn details_query(filter: &str) -> String {
    format!(
        r#"
        SELECT {FEEDBACK_COLUMNS}, u.email AS user_email, p.title AS product_title
        FROM feedback f
        JOIN users u ON u.id = f.user_id
        JOIN product p ON p.id = f.product_id
        {filter}
        ORDER BY f.created_at DESC, f.id DESC
        "#
    )
}

pub async fn fetch(pool: &PgPool, id: i32) -> Result<Option<models::Feedback>, StoreError> {
    tracing::info!("Fetch feedback {}", id);
    sqlx::query_as::<_, models::Feedback>(&format!(
        "SELECT {FEEDBACK_COLUMNS} FROM feedback f WHERE f.id = $1"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await
    .map_err(|err| {
        tracing::error!("Failed to fetch feedback, error: {:?}", err);
        err.into()
    })
}

pub async fn fetch_details(
    pool: &PgPool,
    id: i32,
) -> Result<Option<models::FeedbackDetails>, StoreError> {
    let query_span = tracing::info_span!("Fetch feedback with author and product.", id);
    sqlx::query_as::<_, models::FeedbackDetails>(&details_query("WHERE f.id = $1"))
        .bind(id)
        .fetch_optional(pool)
        .instrument(query_span)
        .await
        .map_err(|err| {
            tracing::error!("Failed to fetch feedback, error: {:?}", err);
            err.into()
        })
}

pub async fn fetch_by_product(
    pool: &PgPool,
    product_id: i32,
) -> Result<Vec<models::FeedbackDetails>, StoreError> {
    let query_span = tracing::info_span!("Fetch feedback by product id.", product_id);
    sqlx::query_as::<_, models::FeedbackDetails>(&details_query("WHERE f.product_id = $1"))
        .bind(product_id)
        .fetch_all(pool)
        .instrument(query_span)
        .await
        .map_err(|err| {
            tracing::error!("Failed to fetch feedback, error: {:?}", err);
            err.into()
        })
}

pub async fn fetch_all(pool: &PgPool) -> Result<Vec<models::FeedbackDetails>, StoreError> {
    let query_span = tracing::info_span!("Fetch all feedback.");
    sqlx::query_as::<_, models::FeedbackDetails>(&details_query(""))
        .fetch_all(pool)
        .instrument(query_span)
        .await
        .map_err(|err| {
            tracing::error!("Failed to fetch feedback, error: {:?}", err);
            err.into()
        })
}

pub async fn fetch_by_product_and_user(
    pool: &PgPool,
    product_id: i32,
    user_id: i32,
) -> Result<Option<models::Feedback>, StoreError> {
    let query_span = tracing::info_span!("Search for existing feedback.", product_id, user_id);
    sqlx::query_as::<_, models::Feedback>(&format!(
        "SELECT {FEEDBACK_COLUMNS} FROM feedback f WHERE f.product_id = $1 AND f.user_id = $2 LIMIT 1"
    ))
    .bind(product_id)
    .bind(user_id)
    .fetch_optional(pool)
    .instrument(query_span)
    .await
    .map_err(|err| {
        tracing::error!("Failed to fetch feedback, error: {:?}", err);
        err.into()
    })
}

pub async fn insert(
    pool: &PgPool,
    feedback: models::Feedback,
) -> Result<models::Feedback, StoreError> {
    let query_span = tracing::info_span!("Saving new feedback into the database");
    // NOW() is fixed for the statement, so created_at == updated_at
    sqlx::query_as::<_, models::Feedback>(
        r#"
        INSERT INTO feedback (product_id, user_id, comment, rating, created_at, updated_at)
        VALUES ($1, $2, $3, $4, NOW(), NOW())
        RETURNING id, product_id, user_id, comment, rating, created_at, updated_at
        "#,
    )
    .bind(feedback.product_id)
    .bind(feedback.user_id)
    .bind(feedback.comment)
    .bind(feedback.rating)
    .fetch_one(pool)
    .instrument(query_span)
    .await
    .map(|feedback| {
        tracing::info!("New feedback {} has been saved to database", feedback.id);
        feedback
    })
    .map_err(|err| {
        let err = StoreError::from(err);
        match err {
            StoreError::Database(ref msg) => tracing::error!("Failed to insert feedback: {}", msg),
            ref violation => tracing::warn!("Feedback rejected by the store: {}", violation),
        }
        err
    })
}

pub async fn update(
    pool: &PgPool,
    feedback: models::Feedback,
) -> Result<Option<models::Feedback>, StoreError> {
    let query_span = tracing::info_span!("Updating feedback", id = feedback.id);
    // updated_at must move forward even when two updates land in the same clock tick
    sqlx::query_as::<_, models::Feedback>(
        r#"
        UPDATE feedback
        SET
            comment = $2,
            rating = $3,
            updated_at = GREATEST(NOW(), updated_at + INTERVAL '1 microsecond')
        WHERE id = $1
        RETURNING id, product_id, user_id, comment, rating, created_at, updated_at
        "#,
    )
    .bind(feedback.id)
    .bind(feedback.comment)
    .bind(feedback.rating)
    .fetch_optional(pool)
    .instrument(query_span)
    .await
    .map_err(|err| {
        tracing::error!("Failed to execute query: {:?}", err);
        err.into()
    })
}

#[tracing::instrument(name = "Delete feedback.", skip(pool))]
pub async fn delete(pool: &PgPool, id: i32) -> Result<bool, StoreError> {
    sqlx::query::<sqlx::Postgres>("DELETE FROM feedback WHERE id = $1;")
        .bind(id)
        .execute(pool)
        .await
        .map(|result| result.rows_affected() > 0)
        .map_err(|err| {
            tracing::error!("Failed to delete feedback: {:?}", err);
            err.into()
        })
}

/// Creates or drops the (product_id, user_id) unique index so the store
/// enforces the configured one-feedback-per-user-per-product policy.
#[tracing::instrument(name = "Apply feedback uniqueness policy.", skip(pool))]
pub async fn apply_uniqueness_policy(pool: &PgPool, enabled: bool) -> Result<(), StoreError> {
    let statement = if enabled {
        format!("CREATE UNIQUE INDEX IF NOT EXISTS {UNIQUE_PAIR_INDEX} ON feedback (product_id, user_id)")
    } else {
        format!("DROP INDEX IF EXISTS {UNIQUE_PAIR_INDEX}")
    };

    sqlx::query::<sqlx::Postgres>(&statement)
        .execute(pool)
        .await
        .map(|_| ())
        .map_err(|err| {
            // duplicates already stored make the index impossible to build
            tracing::error!("Failed to apply uniqueness policy: {:?}", err);
            err.into()
        })
}
