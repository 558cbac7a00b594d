pub mod admin;
pub mod choice;
pub mod question;
pub mod response;

pub use choice::Choice;
pub use question::{Question, QuestionSummary, QuestionWithChoices};
pub use response::{ApiResponse, PaginatedResult};
