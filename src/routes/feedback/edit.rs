use crate::forms;
use crate::helpers::JsonResponse;
use crate::models;
use crate::services::FeedbackService;
use actix_web::{put, web, Responder, Result};
use serde_valid::Validate;
use std::sync::Arc;

use super::authenticated;

#[tracing::instrument(name = "Edit feedback.", skip(service))]
#[put("/{id}")]
pub async fn edit_handler(
    path: web::Path<(i32,)>,
    user: Option<web::ReqData<Arc<models::User>>>,
    form: web::Json<forms::feedback::Edit>,
    service: web::Data<FeedbackService>,
) -> Result<impl Responder> {
    let user = authenticated(user)?;

    if let Err(errors) = form.validate() {
        return Err(JsonResponse::<models::Feedback>::build().form_error(errors.to_string()));
    }

    let (id,) = path.into_inner();
    let feedback = service
        .update(id, &user, form.into_inner().into())
        .await?;

    Ok(JsonResponse::build()
        .set_id(feedback.id)
        .set_item(feedback)
        .ok("Updated"))
}
