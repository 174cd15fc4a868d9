pub mod correlation;
pub mod dashboard;
pub mod summary;
