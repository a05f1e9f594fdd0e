pub mod answers;
pub mod catalog;
pub mod config;
pub mod interactive;
pub mod output;
pub mod progress;
pub mod scoring;
pub mod session;
