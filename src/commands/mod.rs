pub mod file_commands;
pub mod search_commands;

use std::sync::Arc;

use crate::error::VaultError;
use crate::state::Session;

/// Runs storage work off the caller's thread. The caller awaits the result and
/// never blocks on SQLite itself.
pub(crate) async fn blocking<T, F>(session: &Arc<Session>, f: F) -> Result<T, VaultError>
where
    T: Send + 'static,
    F: FnOnce(&Session) -> Result<T, VaultError> + Send + 'static,
{
    let session = Arc::clone(session);
    tokio::task::spawn_blocking(move || f(&session))
        .await
        .map_err(|e| VaultError::General(format!("storage task failed: {e}")))?
}
