pub mod banners;
pub mod diagnostics_panel;
pub mod help_panel;
pub mod keybinds_panel;
pub mod signal_panel;
pub mod status_panel;
