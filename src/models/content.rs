use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::entry::EntryId;

/// Payload of a file entry, stored apart from metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Content {
    pub entry_id: EntryId,
    pub data: Vec<u8>,
    pub last_modified: Option<DateTime<Utc>>,
}
