//! Server-rendered HTML. Every dynamic value goes through [`escape_html`].

pub mod catalog;
pub mod info;
pub mod layout;
pub mod log;
pub mod pages;

pub use crate::utils::escape_html;
pub use layout::Layout;
