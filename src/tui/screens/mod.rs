//! TUI screen implementations.

pub mod court_edit;
pub mod court_list;
pub mod help;

pub use court_edit::{CourtEditState, EditTab, draw_court_edit};
pub use court_list::{CourtListState, draw_court_list};
pub use help::{HelpState, draw_help};
