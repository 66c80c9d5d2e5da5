pub mod api;
pub mod health;
pub mod page;
pub mod render;

pub use api::{get_user, list_users};
pub use health::health_check;
pub use page::{
    cancel_delete, cancel_form, confirm_delete, dismiss_notification, index, open_create_form,
    open_edit_form, request_delete, search, sort, submit_form,
};

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::AppState;

/// Build the application router
pub fn router(state: AppState) -> Router {
    let log_requests = state.config.log_requests;

    let app = Router::new()
        .route("/", get(index))
        .route("/health", get(health_check))
        .route("/api/users", get(list_users))
        .route("/api/users/:id", get(get_user))
        .route("/users/new", post(open_create_form))
        .route("/users/:id/edit", post(open_edit_form))
        .route("/users/:id/delete", post(request_delete))
        .route("/form/submit", post(submit_form))
        .route("/form/cancel", post(cancel_form))
        .route("/delete/confirm", post(confirm_delete))
        .route("/delete/cancel", post(cancel_delete))
        .route("/search", post(search))
        .route("/sort", post(sort))
        .route("/notifications/:id/dismiss", post(dismiss_notification))
        .with_state(state);

    if log_requests {
        app.layer(TraceLayer::new_for_http())
    } else {
        app
    }
}
