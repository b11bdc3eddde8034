mod admin;
mod anonymous;

pub use admin::Admin;
pub use anonymous::Anonymous;
