//! Small reusable rendering helpers.

pub mod badge;
pub mod sub_tabs;
