use actix_web::{error, http::StatusCode, Error, HttpResponse};
use serde_derive::Serialize;
use std::fmt;

/// Envelope of every JSON body the service returns.
#[derive(Serialize)]
pub struct JsonResponse<T> {
    pub status: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub list: Option<Vec<T>>,
}

pub struct JsonResponseBuilder<T>
where
    T: serde::Serialize,
{
    id: Option<i32>,
    item: Option<T>,
    list: Option<Vec<T>>,
}

impl<T> JsonResponse<T>
where
    T: serde::Serialize,
{
    pub fn build() -> JsonResponseBuilder<T> {
        JsonResponseBuilder::default()
    }
}

impl<T> fmt::Display for JsonResponse<T>
where
    T: serde::Serialize,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match serde_json::to_string(self) {
            Ok(body) => write!(f, "{}", body),
            Err(_) => Err(fmt::Error),
        }
    }
}

impl<T> Default for JsonResponseBuilder<T>
where
    T: serde::Serialize,
{
    fn default() -> Self {
        Self {
            id: None,
            item: None,
            list: None,
        }
    }
}

impl<T> JsonResponseBuilder<T>
where
    T: serde::Serialize,
{
    pub fn set_id(mut self, id: i32) -> Self {
        self.id = Some(id);
        self
    }

    pub fn set_item(mut self, item: T) -> Self {
        self.item = Some(item);
        self
    }

    pub fn set_list(mut self, list: Vec<T>) -> Self {
        self.list = Some(list);
        self
    }

    pub fn to_json_response(self, status: &str, message: impl Into<String>) -> JsonResponse<T> {
        JsonResponse {
            status: status.to_string(),
            message: message.into(),
            id: self.id,
            item: self.item,
            list: self.list,
        }
    }

    pub fn to_response(self, code: StatusCode, message: impl Into<String>) -> HttpResponse {
        let status = if code.is_success() { "OK" } else { "Error" };
        HttpResponse::build(code).json(self.to_json_response(status, message))
    }

    pub fn ok(self, message: impl Into<String>) -> HttpResponse {
        self.to_response(StatusCode::OK, message)
    }

    pub fn created(self, message: impl Into<String>) -> HttpResponse {
        self.to_response(StatusCode::CREATED, message)
    }

    pub fn no_content(self) -> HttpResponse {
        HttpResponse::NoContent().finish()
    }

    fn error(self, code: StatusCode, message: impl Into<String>) -> Error {
        let message = message.into();
        let response = self.to_response(code, message.clone());
        error::InternalError::from_response(message, response).into()
    }

    pub fn bad_request(self, message: impl Into<String>) -> Error {
        self.error(StatusCode::BAD_REQUEST, message)
    }

    pub fn form_error(self, message: impl Into<String>) -> Error {
        self.error(StatusCode::BAD_REQUEST, message)
    }

    pub fn unauthorized(self, message: impl Into<String>) -> Error {
        self.error(StatusCode::UNAUTHORIZED, message)
    }

    pub fn forbidden(self, message: impl Into<String>) -> Error {
        self.error(StatusCode::FORBIDDEN, message)
    }

    pub fn not_found(self, message: impl Into<String>) -> Error {
        self.error(StatusCode::NOT_FOUND, message)
    }

    pub fn conflict(self, message: impl Into<String>) -> Error {
        self.error(StatusCode::CONFLICT, message)
    }

    pub fn internal_server_error(self, message: impl Into<String>) -> Error {
        self.error(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}
