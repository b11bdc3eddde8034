mod f_cookie;
mod f_oauth;

pub use f_cookie::try_cookie;
pub use f_oauth::{fetch_user, try_oauth, OAuthCache};
