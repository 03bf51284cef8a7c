#![allow(dead_code)]

use actix_web::web;
use chrono::{DateTime, TimeZone, Utc};
use magazin_incaltaminte::{
    access_log::AccessLog,
    config::{CatalogConfig, DatabaseConfig},
    database::{create_pool, run_migrations},
    entities::{
        GenderTarget, SizeSystem, brand_entity as brands, category_entity as categories,
        material_entity as materials, product_entity as products, size_entity as sizes,
        size_stock_entity as size_stocks,
    },
    services::{AdminService, AuthService, CatalogService, UserService},
    utils::JwtService,
};
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};
use std::str::FromStr;

pub struct TestState {
    pub pool: DatabaseConnection,
    pub jwt: JwtService,
    pub log: web::Data<AccessLog>,
    pub settings: web::Data<CatalogConfig>,
    pub auth: AuthService,
    pub users: UserService,
    pub catalog: CatalogService,
    pub admin: AdminService,
}

impl TestState {
    pub async fn new() -> Self {
        // A single connection keeps every query on the same in-memory database.
        let pool = create_pool(&DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
            dump_path: "backup_insert.sql".to_string(),
        })
        .await
        .unwrap();
        run_migrations(&pool).await.unwrap();

        let jwt = JwtService::new("test-secret", 3600);
        let settings = CatalogConfig::default();
        Self {
            auth: AuthService::new(pool.clone(), jwt.clone()),
            users: UserService::new(pool.clone()),
            catalog: CatalogService::new(pool.clone()),
            admin: AdminService::new(pool.clone(), settings.admin_page_size),
            log: web::Data::new(AccessLog::new()),
            settings: web::Data::new(settings),
            jwt,
            pool,
        }
    }

    pub fn token(&self, user_id: i32, staff: bool) -> String {
        self.jwt
            .generate_access_token(user_id, "tester", staff, false)
            .unwrap()
            .0
    }
}

/// Builds the full application around a [`TestState`].
#[macro_export]
macro_rules! test_app {
    ($state:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .wrap(magazin_incaltaminte::middlewares::AuthMiddleware::new(
                    $state.jwt.clone(),
                ))
                .wrap(magazin_incaltaminte::middlewares::AccessLogMiddleware::new(
                    $state.log.clone(),
                ))
                .app_data($state.log.clone())
                .app_data($state.settings.clone())
                .app_data(actix_web::web::Data::new($state.auth.clone()))
                .app_data(actix_web::web::Data::new($state.users.clone()))
                .app_data(actix_web::web::Data::new($state.catalog.clone()))
                .app_data(actix_web::web::Data::new($state.admin.clone()))
                .configure(magazin_incaltaminte::handlers::pages_config)
                .configure(magazin_incaltaminte::handlers::catalog_config)
                .service(
                    actix_web::web::scope("/api/v1")
                        .configure(magazin_incaltaminte::handlers::auth_config)
                        .configure(magazin_incaltaminte::handlers::contact_config)
                        .configure(magazin_incaltaminte::handlers::user_config)
                        .configure(magazin_incaltaminte::handlers::admin_config),
                ),
        )
        .await
    };
}

pub fn utc(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
}

pub fn price(text: &str) -> Decimal {
    Decimal::from_str(text).unwrap()
}

pub async fn category(pool: &DatabaseConnection, name: &str, visible: bool) -> categories::Model {
    categories::ActiveModel {
        name: Set(name.to_string()),
        gender_target: Set(GenderTarget::Unisex),
        visible: Set(visible),
        color_code: Set("#004d99".to_string()),
        icon_class: Set("fa-solid fa-shoe-prints".to_string()),
        ..Default::default()
    }
    .insert(pool)
    .await
    .unwrap()
}

pub async fn brand(pool: &DatabaseConnection, name: &str) -> brands::Model {
    brands::ActiveModel {
        name: Set(name.to_string()),
        country: Set("România".to_string()),
        founded_year: Set(Some(1990)),
        ..Default::default()
    }
    .insert(pool)
    .await
    .unwrap()
}

pub async fn material(pool: &DatabaseConnection, name: &str) -> materials::Model {
    materials::ActiveModel {
        name: Set(name.to_string()),
        waterproof: Set(false),
        care_instructions: Set(None),
        ..Default::default()
    }
    .insert(pool)
    .await
    .unwrap()
}

pub async fn size(pool: &DatabaseConnection, value: &str) -> sizes::Model {
    sizes::ActiveModel {
        value: Set(value.to_string()),
        size_system: Set(SizeSystem::Eu),
        for_children: Set(false),
        ..Default::default()
    }
    .insert(pool)
    .await
    .unwrap()
}

pub async fn stock(pool: &DatabaseConnection, product_id: i32, size_id: i32, quantity: i32) {
    size_stocks::ActiveModel {
        product_id: Set(product_id),
        size_id: Set(size_id),
        quantity: Set(quantity),
        ..Default::default()
    }
    .insert(pool)
    .await
    .unwrap();
}

/// Inserts a product with sensible defaults; `tweak` overrides fields.
pub async fn product(
    pool: &DatabaseConnection,
    name: &str,
    category_id: i32,
    brand_id: i32,
    tweak: impl FnOnce(&mut products::ActiveModel),
) -> products::Model {
    let mut model = products::ActiveModel {
        name: Set(name.to_string()),
        price: Set(price("100.50")),
        description: Set("Pantof comod pentru fiecare zi".to_string()),
        in_stock: Set(true),
        weight: Set(Some(350.5)),
        primary_color: Set("Negru".to_string()),
        category_id: Set(category_id),
        brand_id: Set(brand_id),
        material_id: Set(None),
        ..Default::default()
    };
    tweak(&mut model);
    model.insert(pool).await.unwrap()
}

pub async fn body_text<B: actix_web::body::MessageBody>(
    resp: actix_web::dev::ServiceResponse<B>,
) -> String {
    let bytes = actix_web::test::read_body(resp).await;
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Number of product cards on a listing page.
pub fn card_count(html: &str) -> usize {
    html.matches("<article class=\"produs\">").count()
}

pub fn lists_product(html: &str, name: &str) -> bool {
    html.contains(&format!(">{name}</a></h3>"))
}
