use axum::{
    Router,
    routing::{get, post},
};

use super::controller::{change_password, login, me};
use crate::state::AppState;

pub fn init_auth_router() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/me", get(me))
        .route("/change-password", post(change_password))
}
