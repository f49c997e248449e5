pub mod feedback;
pub mod history;
pub mod submission;
