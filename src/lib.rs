pub mod commands;
pub mod config;
pub mod data;
pub mod error;
pub mod models;
pub mod services;
pub mod state;
pub mod vpath;

pub use config::StoreConfig;
pub use error::VaultError;
pub use models::clipboard::{ClipboardAction, ClipboardItem};
pub use models::entry::{Entry, EntryId, EntryKind};
pub use models::listing::{DirectoryListing, FolderNode, ViewState};
pub use models::preview::Preview;
pub use models::upload::{OnCollision, UploadFile, UploadReport};
pub use state::Session;
pub use vpath::ROOT_PATH;
