// TUI widget modules for each panel of the comparison screen.

pub mod quit_confirm;
pub mod radar;
pub mod slots;
pub mod stat_table;
pub mod status_bar;
