use crate::utils::PageInfo;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Query string shared by the admin list endpoints. `categorie`, `brand` and
/// `in_stoc` only apply to the product list.
#[derive(Debug, Clone, Default, Deserialize, Serialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct AdminListQuery {
    /// Search text matched against the two search fields of the model.
    pub q: Option<String>,
    pub page: Option<String>,
    pub categorie: Option<i32>,
    pub brand: Option<i32>,
    /// `1` or `0`.
    pub in_stoc: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub page: u64,
    pub page_size: u64,
    pub total: u64,
    pub total_pages: u64,
}

impl<T> PaginatedResponse<T> {
    pub fn new(data: Vec<T>, page: &PageInfo) -> Self {
        Self {
            data,
            page: page.number,
            page_size: page.per_page,
            total: page.total,
            total_pages: page.num_pages,
        }
    }
}
