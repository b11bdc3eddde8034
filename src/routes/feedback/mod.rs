use crate::helpers::JsonResponse;
use crate::models;
use actix_web::web;
use std::sync::Arc;

mod add;
mod delete;
mod edit;
mod get;

pub use add::*;
pub use delete::*;
pub use edit::*;
pub use get::*;

/// Mutating endpoints need a resolved user, anonymous callers get 401.
fn authenticated(
    user: Option<web::ReqData<Arc<models::User>>>,
) -> Result<Arc<models::User>, actix_web::Error> {
    user.map(web::ReqData::into_inner)
        .ok_or_else(|| JsonResponse::<()>::build().unauthorized("Authentication required"))
}
