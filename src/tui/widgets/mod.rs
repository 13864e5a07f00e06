//! Reusable TUI widgets.

pub mod form;
pub mod notice_bar;

pub use form::{Form, FormField, draw_form};
pub use notice_bar::{Notice, NoticeKind, draw_notice_bar};
