use crate::middleware::authentication::get_header;
use actix_web::{dev::ServiceRequest, http::Method};

use super::f_oauth::{attach_user, resolve_user};

pub const ACCESS_TOKEN_COOKIE: &str = "access_token";
/// The JSON API authenticates with bearer tokens only.
const API_SCOPE: &str = "/feedback";

fn find_token(cookies: &str) -> Option<String> {
    cookies.split(';').find_map(|cookie| {
        let (name, value) = cookie.trim().split_once('=')?;
        (name == ACCESS_TOKEN_COOKIE && !value.is_empty()).then(|| value.to_string())
    })
}

fn is_api_path(path: &str) -> bool {
    path == API_SCOPE || path.starts_with("/feedback/")
}

/// `origin` is `scheme://host[:port]`, `host` is the Host the request was sent to.
fn origin_matches(origin: &str, host: &str) -> bool {
    origin
        .split_once("://")
        .map_or(false, |(_, authority)| authority.eq_ignore_ascii_case(host))
}

/// Form posts carrying the cookie must come from our own pages.
fn is_cross_site(req: &ServiceRequest) -> Result<bool, String> {
    if *req.method() == Method::GET || *req.method() == Method::HEAD {
        return Ok(false);
    }

    match get_header::<String>(req, "origin")? {
        Some(origin) => Ok(!origin_matches(&origin, req.connection_info().host())),
        None => Ok(false),
    }
}

/// Browser pages carry the platform token in the `access_token` cookie.
/// A stale cookie leaves the request anonymous instead of failing it.
#[tracing::instrument(name = "Authenticate with cookie", skip(req))]
pub async fn try_cookie(req: &mut ServiceRequest) -> Result<bool, String> {
    if is_api_path(req.path()) {
        return Ok(false);
    }
    if is_cross_site(req)? {
        tracing::warn!(
            "Ignoring access_token cookie on cross-site {} {}",
            req.method(),
            req.path()
        );
        return Ok(false);
    }

    let token = match get_header::<String>(req, "cookie")?.as_deref().and_then(find_token) {
        Some(token) => token,
        None => return Ok(false),
    };

    tracing::debug!("Found access_token in cookies");
    match resolve_user(req, token).await {
        Ok(user) => {
            attach_user(req, user)?;
            Ok(true)
        }
        Err(err) => {
            tracing::info!("Ignoring access_token cookie: {}", err);
            Ok(false)
        }
    }
}
