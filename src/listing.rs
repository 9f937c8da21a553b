// Paginated, filterable listings whose state lives in the url query string

pub mod catalog;
pub mod controller;
pub mod source;
