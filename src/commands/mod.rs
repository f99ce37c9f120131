//! CLI command implementations.

pub mod survey;

pub use survey::SurveyCommand;
