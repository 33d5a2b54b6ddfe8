pub mod books;
pub mod handlers;
pub mod lists;
pub mod middleware;
pub mod routes;
pub mod search;

pub use routes::create_router;
