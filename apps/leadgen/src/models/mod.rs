pub mod chat;
pub mod filters;
pub mod lead;
