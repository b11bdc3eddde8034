pub mod feedback;
pub mod health_checks;
pub mod pages;

pub use health_checks::*;
