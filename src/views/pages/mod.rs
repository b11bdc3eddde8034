//! Server-rendered feedback pages: the product page section and the admin table.

use crate::forms::feedback::PageStatus;
use actix_web::{
    http::{header, header::ContentType, StatusCode},
    HttpResponse,
};
use anyhow::{Context as _, Result};
use serde::Serialize;
use tera::{Context, Tera};

pub const PRODUCT_FEEDBACK: &str = "product_feedback.html";
pub const ADMIN_FEEDBACK: &str = "admin_feedback.html";
pub const ADMIN_FEEDBACK_ITEM: &str = "admin_feedback_item.html";
const ERROR: &str = "error.html";

pub struct Templates {
    tera: Tera,
}

impl Templates {
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();
        tera.add_raw_templates(vec![
            ("base.html", include_str!("templates/base.html")),
            ("macros.html", include_str!("templates/macros.html")),
            (PRODUCT_FEEDBACK, include_str!("templates/product_feedback.html")),
            (ADMIN_FEEDBACK, include_str!("templates/admin_feedback.html")),
            (ADMIN_FEEDBACK_ITEM, include_str!("templates/admin_feedback_item.html")),
            (ERROR, include_str!("templates/error.html")),
        ])
        .context("Failed to add feedback page templates")?;

        Ok(Self { tera })
    }

    pub fn render(&self, name: &str, context: &Context) -> HttpResponse {
        self.render_with_status(StatusCode::OK, name, context)
    }

    pub fn error_page(&self, code: StatusCode, message: &str) -> HttpResponse {
        let mut context = Context::new();
        context.insert("code", &code.as_u16());
        context.insert("message", message);
        context.insert("banner", &Option::<Banner>::None);
        self.render_with_status(code, ERROR, &context)
    }

    fn render_with_status(&self, code: StatusCode, name: &str, context: &Context) -> HttpResponse {
        match self.tera.render(name, context) {
            Ok(body) => HttpResponse::build(code)
                .content_type(ContentType::html())
                .body(body),
            Err(err) => {
                tracing::error!("Failed to render {}: {:?}", name, err);
                HttpResponse::InternalServerError().finish()
            }
        }
    }
}

#[derive(Debug, Serialize, PartialEq)]
pub struct Banner {
    pub kind: &'static str,
    pub message: String,
}

impl Banner {
    pub fn from_status(status: &PageStatus) -> Option<Self> {
        let success = |message: &str| {
            Some(Banner {
                kind: "success",
                message: message.to_string(),
            })
        };

        match status.status.as_deref() {
            Some("created") => success("Feedback submitted successfully!"),
            Some("updated") => success("Feedback updated successfully"),
            Some("deleted") => success("Feedback deleted successfully"),
            Some("error") => Some(Banner {
                kind: "error",
                message: status
                    .message
                    .clone()
                    .unwrap_or_else(|| "Something went wrong".to_string()),
            }),
            _ => None,
        }
    }
}

/// 303 back to `location`, carrying the outcome for the banner.
pub fn redirect(location: &str, status: &str, message: Option<&str>) -> HttpResponse {
    let mut target = format!("{}?status={}", location, urlencoding::encode(status));
    if let Some(message) = message {
        target.push_str("&message=");
        target.push_str(&urlencoding::encode(message));
    }

    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, target))
        .finish()
}
