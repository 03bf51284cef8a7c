use actix_web::web;
use utoipa::OpenApi;
use utoipa::{
    Modify,
    openapi::security::{Http, HttpAuthScheme, SecurityScheme},
};
use utoipa_swagger_ui::SwaggerUi;

use crate::entities::{GenderTarget, PromotionTemplate, SizeSystem};
use crate::forms::{
    ContactForm, ContactMessage, LoginForm, MessageType, ProductForm, PromotionForm,
    RegistrationForm,
};
use crate::handlers;
use crate::models::*;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
            )
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::auth::register,
        handlers::auth::login,
        handlers::contact::send_message,
        handlers::user::record_view,
        handlers::user::list_views,
        handlers::admin::site_info,
        handlers::admin::list_categories,
        handlers::admin::create_category,
        handlers::admin::update_category,
        handlers::admin::delete_category,
        handlers::admin::list_brands,
        handlers::admin::create_brand,
        handlers::admin::update_brand,
        handlers::admin::delete_brand,
        handlers::admin::list_materials,
        handlers::admin::create_material,
        handlers::admin::update_material,
        handlers::admin::delete_material,
        handlers::admin::list_sizes,
        handlers::admin::create_size,
        handlers::admin::update_size,
        handlers::admin::delete_size,
        handlers::admin::list_products,
        handlers::admin::get_product,
        handlers::admin::create_product,
        handlers::admin::update_product,
        handlers::admin::delete_product,
        handlers::admin::list_size_stocks,
        handlers::admin::create_size_stock,
        handlers::admin::update_size_stock,
        handlers::admin::delete_size_stock,
        handlers::admin::list_promotions,
        handlers::admin::create_promotion,
        handlers::admin::update_promotion,
        handlers::admin::delete_promotion,
    ),
    components(
        schemas(
            RegistrationForm,
            LoginForm,
            UserResponse,
            AuthResponse,
            RegisterResponse,
            ContactForm,
            ContactMessage,
            MessageType,
            ProductViewResponse,
            GenderTarget,
            SizeSystem,
            PromotionTemplate,
            AdminListQuery,
            SiteInfoResponse,
            CategoryRequest,
            CategoryResponse,
            BrandRequest,
            BrandResponse,
            MaterialRequest,
            MaterialResponse,
            SizeRequest,
            SizeResponse,
            ProductForm,
            ProductUpdateRequest,
            ProductResponse,
            ProductListRow,
            SizeStockRequest,
            SizeStockResponse,
            PromotionForm,
            PromotionResponse,
            DeletedResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "auth", description = "Înregistrare și autentificare"),
        (name = "contact", description = "Formularul de contact"),
        (name = "user", description = "Produse vizualizate de utilizator"),
        (name = "admin", description = "Administrarea catalogului"),
    ),
    info(
        title = "Magazin Încălțăminte API",
        version = "1.0.0",
        description = "API-ul JSON al magazinului de încălțăminte"
    )
)]
pub struct ApiDoc;

pub fn swagger_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
    )
    .route(
        "/swagger-ui",
        web::get().to(|| async {
            actix_web::HttpResponse::Found()
                .append_header(("Location", "/swagger-ui/"))
                .finish()
        }),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documents_the_json_api() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/api/v1/auth/register"));
        assert!(doc.paths.paths.contains_key("/api/v1/admin/products/{id}"));
        assert!(doc.paths.paths.contains_key("/api/v1/user/views"));
    }
}
