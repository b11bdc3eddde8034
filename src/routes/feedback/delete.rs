use crate::helpers::JsonResponse;
use crate::models;
use crate::services::FeedbackService;
use actix_web::{delete, web, Responder, Result};
use std::sync::Arc;

use super::authenticated;

#[tracing::instrument(name = "Delete feedback.", skip(service))]
#[delete("/{id}")]
pub async fn delete_handler(
    path: web::Path<(i32,)>,
    user: Option<web::ReqData<Arc<models::User>>>,
    service: web::Data<FeedbackService>,
) -> Result<impl Responder> {
    let user = authenticated(user)?;
    let (id,) = path.into_inner();

    service.delete(id, &user).await?;
    tracing::info!("Feedback {} deleted by user {}", id, user.id);

    Ok(JsonResponse::<models::Feedback>::build().no_content())
}
