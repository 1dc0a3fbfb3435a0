//! Restaurant API
//!
//! | Path | Method | Auth |
//! |------|--------|------|
//! | /api/restaurants | POST | owner |
//! | /api/restaurants/me | PATCH | owner with a bound restaurant |
//! | /api/admin/restaurants/{id} | PATCH | admin |
//! | /api/admin/restaurants/{id} | DELETE | admin |

mod handler;

use axum::{
    Router,
    routing::{patch, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    let owner_routes = Router::new()
        .route("/", post(handler::create))
        .route("/me", patch(handler::update_own));

    let admin_routes = Router::new().route(
        "/{id}",
        patch(handler::update_as_admin).delete(handler::delete),
    );

    Router::new()
        .nest("/api/restaurants", owner_routes)
        .nest("/api/admin/restaurants", admin_routes)
}
