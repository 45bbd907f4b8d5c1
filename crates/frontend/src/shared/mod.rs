pub mod api_error;
pub mod api_utils;
pub mod components;
pub mod config;
pub mod csv_check;
pub mod export;
pub mod format;
pub mod icons;
pub mod list_api;
pub mod list_controller;
pub mod list_page;
pub mod page_frame;
pub mod toast;
