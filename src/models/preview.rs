use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Preview {
    Image {
        mime_type: String,
        data_url: String,
    },
    Text {
        mime_type: String,
        text: String,
    },
    Download {
        file_name: String,
        mime_type: String,
        bytes: Vec<u8>,
    },
}
