use crate::db::StoreError;
use crate::models;
use sqlx::PgPool;
use tracing::Instrument;

pub async fn fetch(pool: &PgPool, id: i32) -> Result<Option<models::Product>, StoreError> {
    let query_span = tracing::info_span!("Fetch product by id.", product_id = id);
    sqlx::query_as::<_, models::Product>(r#"SELECT id, title FROM product WHERE id = $1"#)
        .bind(id)
        .fetch_optional(pool)
        .instrument(query_span)
        .await
        .map_err(|err| {
            tracing::error!("Failed to fetch product, error: {:?}", err);
            err.into()
        })
}
