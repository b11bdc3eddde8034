use crate::forms;
use crate::helpers::JsonResponse;
use crate::models;
use crate::services::FeedbackService;
use actix_web::{post, web, Responder, Result};
use serde_valid::Validate;
use std::sync::Arc;

use super::authenticated;

#[tracing::instrument(name = "Add feedback.", skip(service))]
#[post("")]
pub async fn add_handler(
    user: Option<web::ReqData<Arc<models::User>>>,
    form: web::Json<forms::feedback::Add>,
    service: web::Data<FeedbackService>,
) -> Result<impl Responder> {
    let user = authenticated(user)?;

    if let Err(errors) = form.validate() {
        let errors = errors.to_string();
        tracing::debug!("Invalid feedback received {:?}", &errors);
        return Err(JsonResponse::<models::Feedback>::build().form_error(errors));
    }

    let form = form.into_inner();
    let feedback = service
        .create(form.product_id, &user, &form.comment, form.rating)
        .await?;

    Ok(JsonResponse::build()
        .set_id(feedback.id)
        .set_item(feedback)
        .created("Saved"))
}
