use crate::forms;
use crate::models;
use crate::services::{FeedbackChanges, FeedbackService};
use crate::views::{
    self,
    pages::{redirect, Banner, Templates, ADMIN_FEEDBACK, ADMIN_FEEDBACK_ITEM},
};
use actix_web::{get, post, web, HttpResponse};
use std::sync::Arc;
use tera::Context;

use super::{error_page, page_message, require_admin};

const TABLE_LOCATION: &str = "/admin/feedback";

#[tracing::instrument(name = "Admin feedback table.", skip(service, templates))]
#[get("")]
pub async fn admin_table(
    status: web::Query<forms::feedback::PageStatus>,
    user: Option<web::ReqData<Arc<models::User>>>,
    service: web::Data<FeedbackService>,
    templates: web::Data<Templates>,
) -> HttpResponse {
    if let Err(response) = require_admin(user, &templates) {
        return response;
    }

    let rows = match service.list_all().await {
        Ok(list) => list
            .into_iter()
            .map(Into::into)
            .collect::<Vec<views::feedback::Admin>>(),
        Err(err) => return error_page(&templates, err),
    };

    let mut context = Context::new();
    context.insert("rows", &rows);
    context.insert("banner", &Banner::from_status(&status));

    templates.render(ADMIN_FEEDBACK, &context)
}

#[tracing::instrument(name = "Admin feedback item.", skip(service, templates))]
#[get("/{id}")]
pub async fn admin_item(
    path: web::Path<(i32,)>,
    status: web::Query<forms::feedback::PageStatus>,
    user: Option<web::ReqData<Arc<models::User>>>,
    service: web::Data<FeedbackService>,
    templates: web::Data<Templates>,
) -> HttpResponse {
    if let Err(response) = require_admin(user, &templates) {
        return response;
    }

    let (id,) = path.into_inner();
    let row: views::feedback::Admin = match service.get(id).await {
        Ok(details) => details.into(),
        Err(err) => return error_page(&templates, err),
    };

    let mut context = Context::new();
    context.insert("row", &row);
    context.insert("banner", &Banner::from_status(&status));

    templates.render(ADMIN_FEEDBACK_ITEM, &context)
}

#[tracing::instrument(name = "Admin edit feedback.", skip(service, templates))]
#[post("/{id}/edit")]
pub async fn admin_edit(
    path: web::Path<(i32,)>,
    form: web::Form<forms::feedback::PageForm>,
    user: Option<web::ReqData<Arc<models::User>>>,
    service: web::Data<FeedbackService>,
    templates: web::Data<Templates>,
) -> HttpResponse {
    let admin = match require_admin(user, &templates) {
        Ok(admin) => admin,
        Err(response) => return response,
    };

    let (id,) = path.into_inner();
    let form = form.into_inner();
    let changes = FeedbackChanges {
        comment: Some(form.comment),
        rating: form.rating,
    };

    match service.update(id, &admin, changes).await {
        Ok(_) => redirect(TABLE_LOCATION, "updated", None),
        Err(err) => redirect(TABLE_LOCATION, "error", Some(&page_message(&err))),
    }
}

#[tracing::instrument(name = "Admin delete feedback.", skip(service, templates))]
#[post("/{id}/delete")]
pub async fn admin_delete(
    path: web::Path<(i32,)>,
    user: Option<web::ReqData<Arc<models::User>>>,
    service: web::Data<FeedbackService>,
    templates: web::Data<Templates>,
) -> HttpResponse {
    let admin = match require_admin(user, &templates) {
        Ok(admin) => admin,
        Err(response) => return response,
    };

    let (id,) = path.into_inner();
    match service.delete(id, &admin).await {
        Ok(()) => redirect(TABLE_LOCATION, "deleted", None),
        Err(err) => redirect(TABLE_LOCATION, "error", Some(&page_message(&err))),
    }
}
