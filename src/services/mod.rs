pub mod admin_service;
pub mod auth_service;
pub mod catalog_service;
pub mod user_service;

pub use admin_service::*;
pub use auth_service::*;
pub use catalog_service::*;
pub use user_service::*;
