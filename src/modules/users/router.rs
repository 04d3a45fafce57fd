use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::{
    create_user, find_all_by_filters, find_all_by_pagination, find_current, find_one_by_id,
    remove_user, update_by_id, update_current, update_partial_by_id,
};

/// User management routes. Role requirements live on the handlers: admin
/// endpoints take `RequireAdmin`, self-service endpoints take `AuthUser`.
pub fn init_users_router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(find_all_by_filters)
                .post(create_user)
                .patch(update_current),
        )
        .route("/paginado", get(find_all_by_pagination))
        .route("/current", get(find_current))
        .route(
            "/{id}",
            get(find_one_by_id)
                .put(update_by_id)
                .patch(update_partial_by_id)
                .delete(remove_user),
        )
}
