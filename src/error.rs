use serde::Serialize;

#[derive(Debug, thiserror::Error)]
pub enum VaultError {
    #[error("Could not open file store: {0}")]
    StoreOpen(String),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("already exists: {0}")]
    Collision(String),

    #[error("invalid path: {0}")]
    InvalidPath(String),

    #[error("invalid name: {0}")]
    InvalidName(String),

    #[error("{0}")]
    InvalidOperation(String),

    #[error("{0}")]
    General(String),
}

impl VaultError {
    /// A failed store open leaves the session unusable; the user has to reload.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::StoreOpen(_))
    }

    pub fn is_collision(&self) -> bool {
        matches!(self, Self::Collision(_))
    }
}

impl Serialize for VaultError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}
