pub mod file_service;
pub mod listing_service;
pub mod preview_service;
pub mod search_service;
