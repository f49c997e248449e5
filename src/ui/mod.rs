pub mod app;
pub mod history_panel;
pub mod puzzle_panel;
pub mod settings;
pub mod settings_io;
