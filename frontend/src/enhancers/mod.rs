//! Behaviour attached to server-rendered markup after the page loads.
//!
//! Each enhancer looks for its anchors in the document and does nothing when
//! they are absent, so every page can run the full set.

pub mod category_filter;
pub mod color_picker;
pub mod currency;
pub mod delete_links;
pub mod flash_messages;
pub mod loading_state;
pub mod phone;
pub mod unsaved_changes;
pub mod validation;
