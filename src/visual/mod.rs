pub mod plugin;
pub mod render;
pub mod ui;
