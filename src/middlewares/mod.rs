pub mod access_log;
pub mod auth;
pub mod cors;

pub use access_log::AccessLogMiddleware;
pub use auth::{AuthMiddleware, current_claims};
pub use cors::create_cors;
