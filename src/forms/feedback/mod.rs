mod add;
mod edit;
mod page;
mod query;
mod trim;

pub use add::AddFeedback as Add;
pub use edit::EditFeedback as Edit;
pub use page::FeedbackPageForm as PageForm;
pub use page::PageStatus;
pub use query::ListQuery;
