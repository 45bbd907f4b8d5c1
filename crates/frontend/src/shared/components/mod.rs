pub mod confirm_dialog;
pub mod csv_upload;
pub mod filter_panel;
pub mod pagination_controls;
pub mod table_checkbox;
