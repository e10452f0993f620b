pub mod charts;
pub mod config;
pub mod data;
pub mod error;
pub mod filters;
pub mod server;
pub mod types;
