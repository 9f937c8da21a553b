// Messages shared by listing pages and the list api

pub mod list;
pub mod pagination;
pub mod query;
