pub mod common;
pub mod data_table;
pub mod logs_dialog;
pub mod menu;
pub mod status_bar;
pub mod toasts;

pub use data_table::DataTable;
pub use logs_dialog::LogsDialog;
pub use menu::MenuComponent;
pub use status_bar::StatusBar;
pub use toasts::ToastsComponent;
