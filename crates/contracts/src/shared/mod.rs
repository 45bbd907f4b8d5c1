pub mod dashboard;
pub mod export;
pub mod filters;
pub mod import;
pub mod list;
pub mod validation;
