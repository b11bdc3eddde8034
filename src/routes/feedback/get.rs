use crate::forms;
use crate::helpers::JsonResponse;
use crate::models;
use crate::services::FeedbackService;
use crate::views;
use actix_web::{get, web, Responder, Result};
use std::sync::Arc;

/// `?productId=` lists one product's feedback for anyone. Without it the
/// whole table is listed, which only administrators may do.
#[tracing::instrument(name = "List feedback.", skip(service))]
#[get("")]
pub async fn list_handler(
    query: web::Query<forms::feedback::ListQuery>,
    user: Option<web::ReqData<Arc<models::User>>>,
    service: web::Data<FeedbackService>,
) -> Result<impl Responder> {
    let product_id = query
        .product_id()
        .map_err(|msg| JsonResponse::<views::feedback::Anonymous>::build().bad_request(msg))?;

    match product_id {
        Some(product_id) => {
            let list = service
                .list_by_product(product_id)
                .await?
                .into_iter()
                .map(Into::into)
                .collect::<Vec<views::feedback::Anonymous>>();

            Ok(JsonResponse::build().set_list(list).ok("OK"))
        }
        None if user.as_ref().map_or(false, |user| user.is_admin()) => {
            let list = service
                .list_all()
                .await?
                .into_iter()
                .map(Into::into)
                .collect::<Vec<views::feedback::Admin>>();

            Ok(JsonResponse::build().set_list(list).ok("OK"))
        }
        None => Err(JsonResponse::<views::feedback::Anonymous>::build()
            .bad_request("Missing productId parameter")),
    }
}

#[tracing::instrument(name = "Get feedback.", skip(service))]
#[get("/{id}")]
pub async fn item_handler(
    path: web::Path<(i32,)>,
    service: web::Data<FeedbackService>,
) -> Result<impl Responder> {
    let (id,) = path.into_inner();
    let feedback: views::feedback::Anonymous = service.get(id).await?.into();

    Ok(JsonResponse::build()
        .set_id(feedback.id)
        .set_item(feedback)
        .ok("OK"))
}
