pub mod projects;
pub mod reports;
pub mod tasks;
