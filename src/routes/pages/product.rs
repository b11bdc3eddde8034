use crate::forms;
use crate::models;
use crate::services::FeedbackService;
use crate::views::{
    self,
    pages::{redirect, Banner, Templates, PRODUCT_FEEDBACK},
};
use actix_web::{get, post, web, HttpResponse};
use std::sync::Arc;
use tera::Context;

use super::{error_page, page_message};

fn average_rating(feedbacks: &[views::feedback::Anonymous]) -> String {
    if feedbacks.is_empty() {
        return String::new();
    }
    let total: i32 = feedbacks.iter().map(|feedback| feedback.rating).sum();
    format!("{:.1}", total as f64 / feedbacks.len() as f64)
}

fn page_location(product_id: i32) -> String {
    format!("/products/{}/feedback", product_id)
}

#[tracing::instrument(name = "Product feedback page.", skip(service, templates))]
#[get("/{product_id}/feedback")]
pub async fn product_page(
    path: web::Path<(i32,)>,
    status: web::Query<forms::feedback::PageStatus>,
    user: Option<web::ReqData<Arc<models::User>>>,
    service: web::Data<FeedbackService>,
    templates: web::Data<Templates>,
) -> HttpResponse {
    let (product_id,) = path.into_inner();

    let product = match service.fetch_product(product_id).await {
        Ok(product) => product,
        Err(err) => return error_page(&templates, err),
    };
    let feedbacks = match service.list_by_product(product_id).await {
        Ok(list) => list
            .into_iter()
            .map(Into::into)
            .collect::<Vec<views::feedback::Anonymous>>(),
        Err(err) => return error_page(&templates, err),
    };

    let user = user.map(web::ReqData::into_inner);
    let already_submitted = match &user {
        Some(user) if service.policy().one_per_user_per_product => {
            match service.find_for_user(product_id, user.id).await {
                Ok(existing) => existing.is_some(),
                Err(err) => return error_page(&templates, err),
            }
        }
        _ => false,
    };

    let mut context = Context::new();
    context.insert("product", &product);
    context.insert("average_rating", &average_rating(&feedbacks));
    context.insert("feedbacks", &feedbacks);
    context.insert("user", &user.as_deref());
    context.insert("already_submitted", &already_submitted);
    context.insert("banner", &Banner::from_status(&status));

    templates.render(PRODUCT_FEEDBACK, &context)
}

#[tracing::instrument(name = "Submit feedback from product page.", skip(service))]
#[post("/{product_id}/feedback")]
pub async fn product_submit(
    path: web::Path<(i32,)>,
    form: web::Form<forms::feedback::PageForm>,
    user: Option<web::ReqData<Arc<models::User>>>,
    service: web::Data<FeedbackService>,
) -> HttpResponse {
    let (product_id,) = path.into_inner();
    let location = page_location(product_id);

    let user = match user {
        Some(user) => user.into_inner(),
        None => return redirect(&location, "error", Some("Please login to submit feedback")),
    };
    if form.comment.trim().is_empty() {
        return redirect(&location, "error", Some("Please enter your comment"));
    }
    let rating = match form.rating {
        Some(rating) => rating,
        None => return redirect(&location, "error", Some("Please select a rating")),
    };

    match service.create(product_id, &user, &form.comment, rating).await {
        Ok(feedback) => {
            tracing::info!("Feedback {} submitted from product page", feedback.id);
            redirect(&location, "created", None)
        }
        Err(err) => redirect(&location, "error", Some(&page_message(&err))),
    }
}
