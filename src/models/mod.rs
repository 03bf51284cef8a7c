pub mod catalog;
pub mod common;
pub mod pagination;
pub mod user;

pub use catalog::*;
pub use common::*;
pub use pagination::*;
pub use user::*;
