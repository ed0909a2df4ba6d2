pub mod clipboard;
pub mod content;
pub mod entry;
pub mod listing;
pub mod preview;
pub mod search;
pub mod upload;
