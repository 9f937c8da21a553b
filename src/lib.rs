// Don't change this value, it will be replaced by the version
pub static VERSION: &str = "0.1.0 - Dev";

pub mod conf;
pub mod erx;
pub mod listing;
pub mod log;
pub mod macros;
pub mod store;
pub mod web;
