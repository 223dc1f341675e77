//! User API module

mod handler;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/users", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/{nic}/activate", put(handler::activate))
        .route("/{nic}/deactivate", put(handler::deactivate))
        .route("/{nic}/reconcile", post(handler::reconcile))
        .route(
            "/{nic}",
            get(handler::get_by_nic)
                .put(handler::update)
                .delete(handler::delete),
        )
}
