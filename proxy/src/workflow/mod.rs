pub mod config;
pub mod refresher;
pub mod source;
pub mod transcript;
