pub mod config;
pub mod matrix;
pub mod observation;
pub mod result;
pub mod series;
pub mod summary;
pub mod ticker;
