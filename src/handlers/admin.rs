use crate::error::{AppError, AppResult};
use crate::forms::{ProductForm, PromotionForm};
use crate::middlewares::current_claims;
use crate::models::*;
use crate::services::AdminService;
use actix_web::{HttpRequest, HttpResponse, ResponseError, Result, web};
use chrono::Utc;
use serde::Serialize;
use std::future::Future;

fn require_staff(req: &HttpRequest) -> AppResult<()> {
    let claims = current_claims(req)?;
    if !claims.staff {
        log::warn!("User {} tried to reach the admin API", claims.username);
        return Err(AppError::Forbidden);
    }
    Ok(())
}

/// Runs `action` for staff users only and wraps the result in the usual envelope.
async fn staff_only<T, F>(req: &HttpRequest, action: F) -> Result<HttpResponse>
where
    T: Serialize,
    F: Future<Output = AppResult<T>>,
{
    if let Err(e) = require_staff(req) {
        return Ok(e.error_response());
    }
    match action.await {
        Ok(data) => Ok(HttpResponse::Ok().json(ApiResponse::success(data))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/admin/site",
    tag = "admin",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Titlurile panoului de administrare", body = SiteInfoResponse),
        (status = 403, description = "Doar pentru personal")
    )
)]
pub async fn site_info(admin: web::Data<AdminService>, req: HttpRequest) -> Result<HttpResponse> {
    staff_only(&req, async { Ok::<_, AppError>(admin.site_info()) }).await
}

// Categories

#[utoipa::path(
    get,
    path = "/api/v1/admin/categories",
    tag = "admin",
    params(AdminListQuery),
    security(("bearer_auth" = [])),
    responses((status = 200, description = "Categorii, căutare după nume și public țintă"))
)]
pub async fn list_categories(
    admin: web::Data<AdminService>,
    req: HttpRequest,
    query: web::Query<AdminListQuery>,
) -> Result<HttpResponse> {
    staff_only(&req, admin.list_categories(&query)).await
}

#[utoipa::path(
    post,
    path = "/api/v1/admin/categories",
    tag = "admin",
    request_body = CategoryRequest,
    security(("bearer_auth" = [])),
    responses((status = 200, body = CategoryResponse), (status = 400, description = "Date invalide"))
)]
pub async fn create_category(
    admin: web::Data<AdminService>,
    req: HttpRequest,
    body: web::Json<CategoryRequest>,
) -> Result<HttpResponse> {
    staff_only(&req, admin.create_category(body.into_inner())).await
}

#[utoipa::path(
    put,
    path = "/api/v1/admin/categories/{id}",
    tag = "admin",
    params(("id" = i32, Path, description = "ID-ul înregistrării")),
    request_body = CategoryRequest,
    security(("bearer_auth" = [])),
    responses((status = 200, body = CategoryResponse), (status = 404, description = "Nu există"))
)]
pub async fn update_category(
    admin: web::Data<AdminService>,
    req: HttpRequest,
    path: web::Path<i32>,
    body: web::Json<CategoryRequest>,
) -> Result<HttpResponse> {
    staff_only(&req, admin.update_category(path.into_inner(), body.into_inner())).await
}

#[utoipa::path(
    delete,
    path = "/api/v1/admin/categories/{id}",
    tag = "admin",
    params(("id" = i32, Path, description = "ID-ul înregistrării")),
    security(("bearer_auth" = [])),
    responses((status = 200, description = "Șters", body = DeletedResponse), (status = 404, description = "Nu există"))
)]
pub async fn delete_category(
    admin: web::Data<AdminService>,
    req: HttpRequest,
    path: web::Path<i32>,
) -> Result<HttpResponse> {
    let id = path.into_inner();
    staff_only(&req, async { admin.delete_category(id).await.map(|_| DeletedResponse::new(id)) }).await
}

// Brands

#[utoipa::path(
    get,
    path = "/api/v1/admin/brands",
    tag = "admin",
    params(AdminListQuery),
    security(("bearer_auth" = [])),
    responses((status = 200, description = "Branduri, căutare după nume și țară"))
)]
pub async fn list_brands(
    admin: web::Data<AdminService>,
    req: HttpRequest,
    query: web::Query<AdminListQuery>,
) -> Result<HttpResponse> {
    staff_only(&req, admin.list_brands(&query)).await
}

#[utoipa::path(
    post,
    path = "/api/v1/admin/brands",
    tag = "admin",
    request_body = BrandRequest,
    security(("bearer_auth" = [])),
    responses((status = 200, body = BrandResponse), (status = 400, description = "Nume duplicat sau date invalide"))
)]
pub async fn create_brand(
    admin: web::Data<AdminService>,
    req: HttpRequest,
    body: web::Json<BrandRequest>,
) -> Result<HttpResponse> {
    staff_only(&req, admin.create_brand(body.into_inner())).await
}

#[utoipa::path(
    put,
    path = "/api/v1/admin/brands/{id}",
    tag = "admin",
    params(("id" = i32, Path, description = "ID-ul înregistrării")),
    request_body = BrandRequest,
    security(("bearer_auth" = [])),
    responses((status = 200, body = BrandResponse), (status = 404, description = "Nu există"))
)]
pub async fn update_brand(
    admin: web::Data<AdminService>,
    req: HttpRequest,
    path: web::Path<i32>,
    body: web::Json<BrandRequest>,
) -> Result<HttpResponse> {
    staff_only(&req, admin.update_brand(path.into_inner(), body.into_inner())).await
}

#[utoipa::path(
    delete,
    path = "/api/v1/admin/brands/{id}",
    tag = "admin",
    params(("id" = i32, Path, description = "ID-ul înregistrării")),
    security(("bearer_auth" = [])),
    responses((status = 200, description = "Șters", body = DeletedResponse), (status = 404, description = "Nu există"))
)]
pub async fn delete_brand(
    admin: web::Data<AdminService>,
    req: HttpRequest,
    path: web::Path<i32>,
) -> Result<HttpResponse> {
    let id = path.into_inner();
    staff_only(&req, async { admin.delete_brand(id).await.map(|_| DeletedResponse::new(id)) }).await
}

// Materials

#[utoipa::path(
    get,
    path = "/api/v1/admin/materials",
    tag = "admin",
    params(AdminListQuery),
    security(("bearer_auth" = [])),
    responses((status = 200, description = "Materiale, căutare după nume și instrucțiuni de îngrijire"))
)]
pub async fn list_materials(
    admin: web::Data<AdminService>,
    req: HttpRequest,
    query: web::Query<AdminListQuery>,
) -> Result<HttpResponse> {
    staff_only(&req, admin.list_materials(&query)).await
}

#[utoipa::path(
    post,
    path = "/api/v1/admin/materials",
    tag = "admin",
    request_body = MaterialRequest,
    security(("bearer_auth" = [])),
    responses((status = 200, body = MaterialResponse))
)]
pub async fn create_material(
    admin: web::Data<AdminService>,
    req: HttpRequest,
    body: web::Json<MaterialRequest>,
) -> Result<HttpResponse> {
    staff_only(&req, admin.create_material(body.into_inner())).await
}

#[utoipa::path(
    put,
    path = "/api/v1/admin/materials/{id}",
    tag = "admin",
    params(("id" = i32, Path, description = "ID-ul înregistrării")),
    request_body = MaterialRequest,
    security(("bearer_auth" = [])),
    responses((status = 200, body = MaterialResponse), (status = 404, description = "Nu există"))
)]
pub async fn update_material(
    admin: web::Data<AdminService>,
    req: HttpRequest,
    path: web::Path<i32>,
    body: web::Json<MaterialRequest>,
) -> Result<HttpResponse> {
    staff_only(&req, admin.update_material(path.into_inner(), body.into_inner())).await
}

#[utoipa::path(
    delete,
    path = "/api/v1/admin/materials/{id}",
    tag = "admin",
    params(("id" = i32, Path, description = "ID-ul înregistrării")),
    security(("bearer_auth" = [])),
    responses((status = 200, description = "Șters", body = DeletedResponse), (status = 404, description = "Nu există"))
)]
pub async fn delete_material(
    admin: web::Data<AdminService>,
    req: HttpRequest,
    path: web::Path<i32>,
) -> Result<HttpResponse> {
    let id = path.into_inner();
    staff_only(&req, async { admin.delete_material(id).await.map(|_| DeletedResponse::new(id)) }).await
}

// Sizes

#[utoipa::path(
    get,
    path = "/api/v1/admin/sizes",
    tag = "admin",
    params(AdminListQuery),
    security(("bearer_auth" = [])),
    responses((status = 200, description = "Mărimi, căutare după valoare și sistem"))
)]
pub async fn list_sizes(
    admin: web::Data<AdminService>,
    req: HttpRequest,
    query: web::Query<AdminListQuery>,
) -> Result<HttpResponse> {
    staff_only(&req, admin.list_sizes(&query)).await
}

#[utoipa::path(
    post,
    path = "/api/v1/admin/sizes",
    tag = "admin",
    request_body = SizeRequest,
    security(("bearer_auth" = [])),
    responses((status = 200, body = SizeResponse))
)]
pub async fn create_size(
    admin: web::Data<AdminService>,
    req: HttpRequest,
    body: web::Json<SizeRequest>,
) -> Result<HttpResponse> {
    staff_only(&req, admin.create_size(body.into_inner())).await
}

#[utoipa::path(
    put,
    path = "/api/v1/admin/sizes/{id}",
    tag = "admin",
    params(("id" = i32, Path, description = "ID-ul înregistrării")),
    request_body = SizeRequest,
    security(("bearer_auth" = [])),
    responses((status = 200, body = SizeResponse), (status = 404, description = "Nu există"))
)]
pub async fn update_size(
    admin: web::Data<AdminService>,
    req: HttpRequest,
    path: web::Path<i32>,
    body: web::Json<SizeRequest>,
) -> Result<HttpResponse> {
    staff_only(&req, admin.update_size(path.into_inner(), body.into_inner())).await
}

#[utoipa::path(
    delete,
    path = "/api/v1/admin/sizes/{id}",
    tag = "admin",
    params(("id" = i32, Path, description = "ID-ul înregistrării")),
    security(("bearer_auth" = [])),
    responses((status = 200, description = "Șters", body = DeletedResponse), (status = 404, description = "Nu există"))
)]
pub async fn delete_size(
    admin: web::Data<AdminService>,
    req: HttpRequest,
    path: web::Path<i32>,
) -> Result<HttpResponse> {
    let id = path.into_inner();
    staff_only(&req, async { admin.delete_size(id).await.map(|_| DeletedResponse::new(id)) }).await
}

// Products

#[utoipa::path(
    get,
    path = "/api/v1/admin/products",
    tag = "admin",
    params(AdminListQuery),
    security(("bearer_auth" = [])),
    responses((status = 200, description = "Produse ordonate descrescător după preț"))
)]
pub async fn list_products(
    admin: web::Data<AdminService>,
    req: HttpRequest,
    query: web::Query<AdminListQuery>,
) -> Result<HttpResponse> {
    staff_only(&req, admin.list_products(&query)).await
}

#[utoipa::path(
    get,
    path = "/api/v1/admin/products/{id}",
    tag = "admin",
    params(("id" = i32, Path, description = "ID-ul înregistrării")),
    security(("bearer_auth" = [])),
    responses((status = 200, body = ProductResponse), (status = 404, description = "Nu există"))
)]
pub async fn get_product(
    admin: web::Data<AdminService>,
    req: HttpRequest,
    path: web::Path<i32>,
) -> Result<HttpResponse> {
    staff_only(&req, admin.get_product(path.into_inner())).await
}

#[utoipa::path(
    post,
    path = "/api/v1/admin/products",
    tag = "admin",
    request_body = ProductForm,
    security(("bearer_auth" = [])),
    responses((status = 200, body = ProductResponse), (status = 400, description = "Formular invalid"))
)]
pub async fn create_product(
    admin: web::Data<AdminService>,
    req: HttpRequest,
    body: web::Json<ProductForm>,
) -> Result<HttpResponse> {
    let form = body.into_inner();
    staff_only(&req, async {
        let product = form.clean()?;
        admin.create_product(product).await
    })
    .await
}

#[utoipa::path(
    put,
    path = "/api/v1/admin/products/{id}",
    tag = "admin",
    params(("id" = i32, Path, description = "ID-ul înregistrării")),
    request_body = ProductUpdateRequest,
    security(("bearer_auth" = [])),
    responses((status = 200, body = ProductResponse), (status = 404, description = "Nu există"))
)]
pub async fn update_product(
    admin: web::Data<AdminService>,
    req: HttpRequest,
    path: web::Path<i32>,
    body: web::Json<ProductUpdateRequest>,
) -> Result<HttpResponse> {
    staff_only(&req, admin.update_product(path.into_inner(), body.into_inner())).await
}

#[utoipa::path(
    delete,
    path = "/api/v1/admin/products/{id}",
    tag = "admin",
    params(("id" = i32, Path, description = "ID-ul înregistrării")),
    security(("bearer_auth" = [])),
    responses((status = 200, description = "Șters", body = DeletedResponse), (status = 404, description = "Nu există"))
)]
pub async fn delete_product(
    admin: web::Data<AdminService>,
    req: HttpRequest,
    path: web::Path<i32>,
) -> Result<HttpResponse> {
    let id = path.into_inner();
    staff_only(&req, async { admin.delete_product(id).await.map(|_| DeletedResponse::new(id)) }).await
}

// Size stocks

#[utoipa::path(
    get,
    path = "/api/v1/admin/size-stocks",
    tag = "admin",
    params(AdminListQuery),
    security(("bearer_auth" = [])),
    responses((status = 200, description = "Stocuri, căutare după numele produsului și valoarea mărimii"))
)]
pub async fn list_size_stocks(
    admin: web::Data<AdminService>,
    req: HttpRequest,
    query: web::Query<AdminListQuery>,
) -> Result<HttpResponse> {
    staff_only(&req, admin.list_size_stocks(&query)).await
}

#[utoipa::path(
    post,
    path = "/api/v1/admin/size-stocks",
    tag = "admin",
    request_body = SizeStockRequest,
    security(("bearer_auth" = [])),
    responses((status = 200, body = SizeStockResponse), (status = 400, description = "Stoc duplicat"))
)]
pub async fn create_size_stock(
    admin: web::Data<AdminService>,
    req: HttpRequest,
    body: web::Json<SizeStockRequest>,
) -> Result<HttpResponse> {
    staff_only(&req, admin.create_size_stock(body.into_inner())).await
}

#[utoipa::path(
    put,
    path = "/api/v1/admin/size-stocks/{id}",
    tag = "admin",
    params(("id" = i32, Path, description = "ID-ul înregistrării")),
    request_body = SizeStockRequest,
    security(("bearer_auth" = [])),
    responses((status = 200, body = SizeStockResponse), (status = 404, description = "Nu există"))
)]
pub async fn update_size_stock(
    admin: web::Data<AdminService>,
    req: HttpRequest,
    path: web::Path<i32>,
    body: web::Json<SizeStockRequest>,
) -> Result<HttpResponse> {
    staff_only(&req, admin.update_size_stock(path.into_inner(), body.into_inner())).await
}

#[utoipa::path(
    delete,
    path = "/api/v1/admin/size-stocks/{id}",
    tag = "admin",
    params(("id" = i32, Path, description = "ID-ul înregistrării")),
    security(("bearer_auth" = [])),
    responses((status = 200, description = "Șters", body = DeletedResponse), (status = 404, description = "Nu există"))
)]
pub async fn delete_size_stock(
    admin: web::Data<AdminService>,
    req: HttpRequest,
    path: web::Path<i32>,
) -> Result<HttpResponse> {
    let id = path.into_inner();
    staff_only(&req, async { admin.delete_size_stock(id).await.map(|_| DeletedResponse::new(id)) }).await
}

// Promotions

#[utoipa::path(
    get,
    path = "/api/v1/admin/promotions",
    tag = "admin",
    params(AdminListQuery),
    security(("bearer_auth" = [])),
    responses((status = 200, description = "Promoții, căutare după nume și subiect"))
)]
pub async fn list_promotions(
    admin: web::Data<AdminService>,
    req: HttpRequest,
    query: web::Query<AdminListQuery>,
) -> Result<HttpResponse> {
    staff_only(&req, admin.list_promotions(&query)).await
}

#[utoipa::path(
    post,
    path = "/api/v1/admin/promotions",
    tag = "admin",
    request_body = PromotionForm,
    security(("bearer_auth" = [])),
    responses((status = 200, body = PromotionResponse), (status = 400, description = "Formular invalid"))
)]
pub async fn create_promotion(
    admin: web::Data<AdminService>,
    req: HttpRequest,
    body: web::Json<PromotionForm>,
) -> Result<HttpResponse> {
    let form = body.into_inner();
    staff_only(&req, async {
        let promotion = form.clean(Utc::now())?;
        admin.create_promotion(promotion).await
    })
    .await
}

#[utoipa::path(
    put,
    path = "/api/v1/admin/promotions/{id}",
    tag = "admin",
    params(("id" = i32, Path, description = "ID-ul înregistrării")),
    request_body = PromotionForm,
    security(("bearer_auth" = [])),
    responses((status = 200, body = PromotionResponse), (status = 404, description = "Nu există"))
)]
pub async fn update_promotion(
    admin: web::Data<AdminService>,
    req: HttpRequest,
    path: web::Path<i32>,
    body: web::Json<PromotionForm>,
) -> Result<HttpResponse> {
    let id = path.into_inner();
    let form = body.into_inner();
    staff_only(&req, async {
        let promotion = form.clean(Utc::now())?;
        admin.update_promotion(id, promotion).await
    })
    .await
}

#[utoipa::path(
    delete,
    path = "/api/v1/admin/promotions/{id}",
    tag = "admin",
    params(("id" = i32, Path, description = "ID-ul înregistrării")),
    security(("bearer_auth" = [])),
    responses((status = 200, description = "Șters", body = DeletedResponse), (status = 404, description = "Nu există"))
)]
pub async fn delete_promotion(
    admin: web::Data<AdminService>,
    req: HttpRequest,
    path: web::Path<i32>,
) -> Result<HttpResponse> {
    let id = path.into_inner();
    staff_only(&req, async { admin.delete_promotion(id).await.map(|_| DeletedResponse::new(id)) }).await
}

pub fn admin_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/admin")
            .route("/site", web::get().to(site_info))
            .route("/categories", web::get().to(list_categories))
            .route("/categories", web::post().to(create_category))
            .route("/categories/{id}", web::put().to(update_category))
            .route("/categories/{id}", web::delete().to(delete_category))
            .route("/brands", web::get().to(list_brands))
            .route("/brands", web::post().to(create_brand))
            .route("/brands/{id}", web::put().to(update_brand))
            .route("/brands/{id}", web::delete().to(delete_brand))
            .route("/materials", web::get().to(list_materials))
            .route("/materials", web::post().to(create_material))
            .route("/materials/{id}", web::put().to(update_material))
            .route("/materials/{id}", web::delete().to(delete_material))
            .route("/sizes", web::get().to(list_sizes))
            .route("/sizes", web::post().to(create_size))
            .route("/sizes/{id}", web::put().to(update_size))
            .route("/sizes/{id}", web::delete().to(delete_size))
            .route("/products", web::get().to(list_products))
            .route("/products", web::post().to(create_product))
            .route("/products/{id}", web::get().to(get_product))
            .route("/products/{id}", web::put().to(update_product))
            .route("/products/{id}", web::delete().to(delete_product))
            .route("/size-stocks", web::get().to(list_size_stocks))
            .route("/size-stocks", web::post().to(create_size_stock))
            .route("/size-stocks/{id}", web::put().to(update_size_stock))
            .route("/size-stocks/{id}", web::delete().to(delete_size_stock))
            .route("/promotions", web::get().to(list_promotions))
            .route("/promotions", web::post().to(create_promotion))
            .route("/promotions/{id}", web::put().to(update_promotion))
            .route("/promotions/{id}", web::delete().to(delete_promotion)),
    );
}
