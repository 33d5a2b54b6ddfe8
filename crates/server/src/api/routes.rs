use axum::{
    middleware as axum_middleware,
    routing::{delete, get, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use super::{books, handlers, lists, middleware, search};
use crate::state::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    let api_routes = Router::new()
        // Health and config
        .route("/health", get(handlers::health))
        .route("/config", get(handlers::get_config))
        // External catalog search
        .route("/search", post(search::search))
        .route("/search/author/{author}", get(search::search_by_author))
        .route("/bestsellers", get(search::bestsellers))
        // Lists
        .route("/users/{user_id}/lists", get(lists::get_lists))
        .route("/users/{user_id}/lists", post(lists::create_list))
        .route("/users/{user_id}/lists/{name}", put(lists::rename_list))
        .route("/users/{user_id}/lists/{name}", delete(lists::delete_list))
        .route("/users/{user_id}/lists/{name}/books", get(lists::get_list_books))
        // Books
        .route("/users/{user_id}/books", get(books::get_books))
        .route("/users/{user_id}/books", post(books::add_book))
        .route("/users/{user_id}/books/resolve", post(books::resolve_details))
        .route("/users/{user_id}/books/{doc_id}", delete(books::remove_book))
        .route("/users/{user_id}/books/{doc_id}/move", post(books::move_book))
        .route(
            "/users/{user_id}/books/{book_id}/membership",
            get(books::get_membership),
        )
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::auth_middleware,
        ))
        .with_state(state);

    Router::new()
        .nest("/api/v1", api_routes)
        .layer(TraceLayer::new_for_http())
}
