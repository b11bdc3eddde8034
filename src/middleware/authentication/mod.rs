mod getheader;
mod manager;
mod manager_middleware;
pub mod method;

pub use getheader::*;
pub use manager::*;
pub use manager_middleware::*;
pub use method::OAuthCache;
