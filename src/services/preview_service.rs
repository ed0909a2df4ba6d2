use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use mime_guess::mime::Mime;
use rusqlite::Connection;

use crate::data::{content_store, path_store};
use crate::error::VaultError;
use crate::models::preview::Preview;

const TEXTUAL_APPLICATION_TYPES: &[&str] = &[
    "application/json",
    "application/xml",
    "application/javascript",
    "application/x-javascript",
    "application/x-sh",
    "application/toml",
    "application/yaml",
    "application/x-yaml",
];

pub fn guess_mime(name: &str) -> String {
    mime_guess::from_path(name)
        .first_or_octet_stream()
        .essence_str()
        .to_string()
}

/// Lowercased `type/subtype` with any parameters dropped.
fn essence(mime_type: &str) -> String {
    match mime_type.trim().parse::<Mime>() {
        Ok(parsed) => parsed.essence_str().to_ascii_lowercase(),
        Err(_) => mime_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase(),
    }
}

/// Loads the file at `path` fully and picks how the UI should present it.
pub fn open(conn: &Connection, path: &str) -> Result<Preview, VaultError> {
    let entry = path_store::get(conn, path)?.ok_or_else(|| VaultError::NotFound(path.to_string()))?;
    if entry.is_folder() {
        return Err(VaultError::InvalidOperation(format!(
            "cannot open a folder: {}",
            entry.path
        )));
    }
    let content = content_store::get_at(conn, &entry.path)?
        .ok_or_else(|| VaultError::NotFound(format!("content of {}", entry.path)))?;

    let mime_type = entry
        .mime_type
        .map(|m| essence(&m))
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| guess_mime(&entry.name));
    Ok(render(entry.name, mime_type, content.data))
}

fn render(file_name: String, mime_type: String, data: Vec<u8>) -> Preview {
    if mime_type.starts_with("image/") {
        let data_url = format!("data:{mime_type};base64,{}", STANDARD.encode(&data));
        return Preview::Image {
            mime_type,
            data_url,
        };
    }
    if is_textual(&mime_type) {
        return Preview::Text {
            mime_type,
            text: String::from_utf8_lossy(&data).into_owned(),
        };
    }
    Preview::Download {
        file_name,
        mime_type,
        bytes: data,
    }
}

fn is_textual(mime_type: &str) -> bool {
    mime_type.starts_with("text/")
        || TEXTUAL_APPLICATION_TYPES.contains(&mime_type)
        || mime_type.ends_with("+json")
        || mime_type.ends_with("+xml")
}
