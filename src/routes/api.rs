use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;

use crate::error::Result;
use crate::models::{User, UserId};
use crate::presentation::SortConfig;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct ListUsersResponse {
    pub users: Vec<User>,
    pub search: String,
    pub sort: SortConfig,
    pub loading: bool,
}

/// The list exactly as the page shows it: current search and sort applied
pub async fn list_users(State(state): State<AppState>) -> Json<ListUsersResponse> {
    let view = state.view.lock().await;

    Json(ListUsersResponse {
        users: view.visible_users().into_iter().cloned().collect(),
        search: view.search().to_string(),
        sort: view.sort(),
        loading: view.is_loading(),
    })
}

/// A single stored record, read from the store rather than the view
pub async fn get_user(State(state): State<AppState>, Path(id): Path<UserId>) -> Result<Json<User>> {
    let user = state.service.find_user(id).await?;
    Ok(Json(user))
}
