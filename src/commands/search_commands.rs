use std::sync::Arc;

use crate::commands::blocking;
use crate::error::VaultError;
use crate::models::listing::FolderNode;
use crate::models::search::SearchResult;
use crate::services::{listing_service, search_service};
use crate::state::Session;

pub async fn search(
    session: &Arc<Session>,
    query: String,
    limit: Option<usize>,
) -> Result<Vec<SearchResult>, VaultError> {
    blocking(session, move |s| {
        let limit = limit.unwrap_or(s.config().search_limit);
        search_service::search(&s.db(), &query, limit)
    })
    .await
}

pub async fn folder_tree(session: &Arc<Session>) -> Result<FolderNode, VaultError> {
    blocking(session, |s| listing_service::build_folder_tree(&s.db())).await
}
