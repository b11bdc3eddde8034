mod feedback;
mod product;
pub mod user;

pub use feedback::*;
pub use product::*;
pub use user::*;
