pub mod feedback;
pub mod pages;
