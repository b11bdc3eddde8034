mod admin;
mod product;

pub use admin::*;
pub use product::*;

use crate::models;
use crate::services::FeedbackError;
use crate::views::pages::Templates;
use actix_web::{http::StatusCode, web, HttpResponse, ResponseError};
use std::sync::Arc;

fn require_admin(
    user: Option<web::ReqData<Arc<models::User>>>,
    templates: &Templates,
) -> Result<Arc<models::User>, HttpResponse> {
    match user.map(web::ReqData::into_inner) {
        Some(user) if user.is_admin() => Ok(user),
        Some(_) => Err(templates.error_page(StatusCode::FORBIDDEN, "Administrator access required")),
        None => Err(templates.error_page(StatusCode::UNAUTHORIZED, "Please login to continue")),
    }
}

/// Message shown to the browser, store details stay in the log.
fn page_message(err: &FeedbackError) -> String {
    match err {
        FeedbackError::Store(err) => {
            tracing::error!("Feedback store failure: {}", err);
            "Something went wrong, please try again".to_string()
        }
        err => err.to_string(),
    }
}

fn error_page(templates: &Templates, err: FeedbackError) -> HttpResponse {
    templates.error_page(err.status_code(), &page_message(&err))
}
