use axum::Router;

pub mod products;
pub mod system;
pub mod users;

/// Router for the `/api` surface.
pub fn router() -> Router {
    Router::new()
        .nest("/products", products::router())
        .nest("/users", users::router())
}
