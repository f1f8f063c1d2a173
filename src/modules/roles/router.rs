use axum::{Router, routing::get};

use super::controller::list_roles;
use crate::state::AppState;

pub fn init_roles_router() -> Router<AppState> {
    Router::new().route("/", get(list_roles))
}
