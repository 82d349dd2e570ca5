pub mod books;
pub mod error;
pub mod health;
pub mod sections;

use axum::routing::get;
use axum::Router;

use crate::infrastructure::AppState;

pub fn api_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Sections
        .route(
            "/sections",
            get(sections::list_sections).post(sections::create_section),
        )
        .route(
            "/sections/:id",
            get(sections::get_section)
                .put(sections::update_section)
                .delete(sections::delete_section),
        )
        // Books
        .route("/books", get(books::list_books).post(books::create_book))
        .route(
            "/books/:id",
            get(books::get_book)
                .put(books::update_book)
                .delete(books::delete_book),
        )
        .with_state(state)
}
