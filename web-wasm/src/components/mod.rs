pub mod editor;
pub mod header;
pub mod history_panel;
pub mod preview;
pub mod prompt_panel;
pub mod settings_panel;
