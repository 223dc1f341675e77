//! Train API module

mod handler;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/trains", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/booking", get(handler::for_booking))
        .route("/{id}/schedule", put(handler::assign_schedule))
        .route("/{id}/activate", put(handler::activate))
        .route("/{id}/deactivate", put(handler::deactivate))
        .route("/{id}/reconcile", post(handler::reconcile))
        .route(
            "/{id}",
            get(handler::get_by_id)
                .put(handler::update)
                .delete(handler::delete),
        )
}
