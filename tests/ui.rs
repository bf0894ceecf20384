mod common;

#[path = "ui/app_component.rs"]
mod app_component;
#[path = "ui/components/data_table.rs"]
mod data_table;
#[path = "ui/core/task_manager.rs"]
mod task_manager;
#[path = "ui/components/menu.rs"]
mod menu;
#[path = "ui/core/actions.rs"]
mod actions;
