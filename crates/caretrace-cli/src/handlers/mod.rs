pub mod comment;
pub mod config;
pub mod monitor;
pub mod patients;
pub mod progress;
