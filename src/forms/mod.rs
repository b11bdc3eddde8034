pub mod feedback;
pub mod user;

pub use user::UserForm;
