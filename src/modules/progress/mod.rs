mod handlers;
mod routes;

pub use routes::progress_routes;
