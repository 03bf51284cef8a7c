pub mod code_generator;
pub mod html;
pub mod jwt;
pub mod pagination;
pub mod password;
pub mod search;

pub use code_generator::generate_confirmation_code;
pub use html::{encode_query, escape_html};
pub use jwt::*;
pub use pagination::PageInfo;
pub use password::*;
pub use search::icontains;
