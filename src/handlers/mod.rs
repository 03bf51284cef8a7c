pub mod admin;
pub mod auth;
pub mod catalog;
pub mod contact;
pub mod pages;
pub mod user;

pub use admin::admin_config;
pub use auth::auth_config;
pub use catalog::catalog_config;
pub use contact::contact_config;
pub use pages::pages_config;
pub use user::user_config;

use crate::access_log::{Access, AccessLog, current_access};
use crate::entities::category_entity as categories;
use crate::error::{AppError, AppResult};
use crate::services::CatalogService;
use crate::views::{Layout, pages as view_pages};
use actix_web::{HttpRequest, HttpResponse, ResponseError, http::StatusCode};
use std::fmt;

/// Data every HTML page needs: the logged access and the navigation categories.
pub(crate) struct PageContext {
    pub access: Access,
    pub categories: Vec<categories::Model>,
}

impl PageContext {
    pub async fn load(
        req: &HttpRequest,
        log: &AccessLog,
        catalog: &CatalogService,
    ) -> AppResult<Self> {
        Ok(Self {
            access: current_access(req, log),
            categories: catalog.nav_categories().await?,
        })
    }

    pub fn layout(&self) -> Layout<'_> {
        Layout {
            client_ip: &self.access.ip,
            categories: &self.categories,
        }
    }
}

pub(crate) fn html(status: StatusCode, body: String) -> HttpResponse {
    HttpResponse::build(status)
        .content_type("text/html; charset=utf-8")
        .body(body)
}

/// Failure of an HTML route. Rendered as an error page instead of the JSON
/// envelope used by the API.
#[derive(Debug)]
pub struct PageError(AppError);

pub type PageResult = Result<HttpResponse, PageError>;

impl From<AppError> for PageError {
    fn from(err: AppError) -> Self {
        PageError(err)
    }
}

impl fmt::Display for PageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl ResponseError for PageError {
    fn status_code(&self) -> StatusCode {
        match self.0 {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let layout = Layout {
            client_ip: "",
            categories: &[],
        };
        let body = match &self.0 {
            AppError::NotFound(msg) => view_pages::not_found(&layout, msg),
            err => {
                log::error!("Page failed: {err}");
                view_pages::server_error(&layout)
            }
        };
        html(self.status_code(), body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    #[actix_web::test]
    async fn database_errors_render_an_html_page() {
        let err = PageError::from(AppError::DatabaseError(sea_orm::DbErr::Custom(
            "no such table: products".into(),
        )));
        let resp = err.error_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            resp.headers().get("content-type").unwrap().to_str().unwrap(),
            "text/html; charset=utf-8"
        );
        let body = to_bytes(resp.into_body()).await.unwrap();
        let text = String::from_utf8(body.to_vec()).unwrap();
        assert!(text.contains("Eroare 500"));
        assert!(!text.contains("no such table"));
    }

    #[test]
    fn missing_records_are_404_pages() {
        let err = PageError::from(AppError::NotFound("Produsul cu ID-ul 3 nu există.".into()));
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }
}
