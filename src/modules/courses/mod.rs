mod handlers;
mod routes;

pub use routes::course_routes;
