use axum::{
    Router,
    routing::{get, post},
};

use super::controller::{
    create_user, delete_user, get_user, get_user_stats, list_users, reset_password, update_user,
};
use crate::state::AppState;

pub fn init_users_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/stats", get(get_user_stats))
        .route(
            "/{id}",
            get(get_user).put(update_user).delete(delete_user),
        )
        .route("/{id}/reset-password", post(reset_password))
}
