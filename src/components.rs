//! Reusable HTML components for the review page
//!
//! Maud component functions for the page layout, the comment panel, the
//! editor overlay and the export panel.

pub mod comment_list;
pub mod editor;
pub mod export;
pub mod layout;
