//! Page handlers.
//!
//! Each post applies one view transition, runs the store work it started
//! (if any) and redirects back to the page.

use axum::{
    extract::{Path, State},
    response::{Html, Redirect},
    Form,
};
use chrono::Utc;
use serde::Deserialize;

use crate::models::UserId;
use crate::presentation::{FormInput, Rejection, SortConfig, SortDirection, SortKey};
use crate::routes::render::render_page;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct SearchForm {
    #[serde(default)]
    pub q: String,
}

/// Sort selection; an empty form flips the direction
#[derive(Debug, Deserialize)]
pub struct SortForm {
    pub key: Option<SortKey>,
    pub direction: Option<SortDirection>,
}

fn back() -> Redirect {
    Redirect::to("/")
}

fn note_rejection(action: &str, result: Result<(), Rejection>) {
    if let Err(rejection) = result {
        tracing::debug!("{} rejected: {:?}", action, rejection);
    }
}

/// Render the page, dropping expired notifications first
pub async fn index(State(state): State<AppState>) -> Html<String> {
    let mut view = state.view.lock().await;
    view.prune_notifications(Utc::now());
    Html(render_page(&view))
}

/// Open the create form; rejected while an operation is pending
pub async fn open_create_form(State(state): State<AppState>) -> Redirect {
    let result = state.view.lock().await.open_create_form();
    note_rejection("Open create form", result);
    back()
}

/// Open the edit form seeded from a listed user
pub async fn open_edit_form(State(state): State<AppState>, Path(id): Path<UserId>) -> Redirect {
    let result = state.view.lock().await.open_edit_form(id);
    note_rejection("Open edit form", result);
    back()
}

/// Close the form, discarding its values and errors
pub async fn cancel_form(State(state): State<AppState>) -> Redirect {
    let result = state.view.lock().await.close_form();
    note_rejection("Cancel form", result);
    back()
}

/// Validate the form and start the create or edit in the background
pub async fn submit_form(State(state): State<AppState>, Form(input): Form<FormInput>) -> Redirect {
    let pending = state.view.lock().await.begin_submit(input);
    match pending {
        Ok(pending) => state.run(pending).await,
        Err(rejection) => tracing::debug!("Submit rejected: {:?}", rejection),
    }
    back()
}

/// Ask for confirmation before deleting a user
pub async fn request_delete(State(state): State<AppState>, Path(id): Path<UserId>) -> Redirect {
    let result = state.view.lock().await.request_delete(id);
    note_rejection("Delete request", result);
    back()
}

/// Dismiss the delete confirmation
pub async fn cancel_delete(State(state): State<AppState>) -> Redirect {
    let result = state.view.lock().await.cancel_delete();
    note_rejection("Cancel delete", result);
    back()
}

/// Start removing the user awaiting confirmation
pub async fn confirm_delete(State(state): State<AppState>) -> Redirect {
    let pending = state.view.lock().await.begin_delete();
    match pending {
        Ok(pending) => state.run(pending).await,
        Err(rejection) => tracing::debug!("Delete confirmation rejected: {:?}", rejection),
    }
    back()
}

/// Set the search term; rejected while an operation is pending
pub async fn search(State(state): State<AppState>, Form(form): Form<SearchForm>) -> Redirect {
    let result = state.view.lock().await.set_search(form.q);
    note_rejection("Search", result);
    back()
}

/// Change the sort order; allowed at any time
pub async fn sort(State(state): State<AppState>, Form(form): Form<SortForm>) -> Redirect {
    let mut view = state.view.lock().await;
    match (form.key, form.direction) {
        (None, None) => view.toggle_sort(),
        (key, direction) => {
            let current = view.sort();
            view.set_sort(SortConfig {
                key: key.unwrap_or(current.key),
                direction: direction.unwrap_or(current.direction),
            });
        }
    }
    back()
}

/// Remove one notification; unknown ids are ignored
pub async fn dismiss_notification(State(state): State<AppState>, Path(id): Path<u64>) -> Redirect {
    state.view.lock().await.dismiss_notification(id);
    back()
}
